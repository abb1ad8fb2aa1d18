//! Reqwest-based backend client.
//!
//! One [`reqwest::Client`] is built from the TLS settings at startup
//! and reused for every call. No retries and no explicit request
//! timeout: transient failures surface immediately and transport
//! defaults apply.

use std::path::PathBuf;

use tracing::debug;

use checkforge_core::CheckDefinition;

use crate::traits::{AuthToken, BackendClient, BackendError, Credential};

/// Connection settings for the monitoring backend API.
#[derive(Debug, Clone)]
pub struct BackendSettings {
    /// Use https instead of http.
    pub secure: bool,
    pub host: String,
    pub port: u16,
    /// Basic auth user for the auth endpoint.
    pub user: String,
    /// Basic auth password for the auth endpoint.
    pub password: String,
    /// PEM bundle of trusted CA certificates.
    pub trusted_ca_file: Option<PathBuf>,
    /// Skip TLS certificate verification (not recommended).
    pub insecure_skip_verify: bool,
}

impl BackendSettings {
    pub fn protocol(&self) -> &'static str {
        if self.secure {
            "https"
        } else {
            "http"
        }
    }

    /// `{protocol}://{host}:{port}` with no trailing slash.
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.protocol(), self.host, self.port)
    }
}

/// HTTP implementation of [`BackendClient`].
pub struct HttpBackend {
    settings: BackendSettings,
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Build the client, loading the trusted CA bundle if configured.
    ///
    /// An unreadable or unparsable CA file is a fatal configuration
    /// error.
    pub fn from_settings(settings: BackendSettings) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder().use_rustls_tls();

        if let Some(ref ca_path) = settings.trusted_ca_file {
            let pem = std::fs::read(ca_path).map_err(|e| {
                BackendError::Tls(format!(
                    "failed to read trusted CA file {}: {e}",
                    ca_path.display()
                ))
            })?;
            let certs = reqwest::Certificate::from_pem_bundle(&pem).map_err(|e| {
                BackendError::Tls(format!(
                    "failed to parse trusted CA file {}: {e}",
                    ca_path.display()
                ))
            })?;
            for cert in certs {
                builder = builder.add_root_certificate(cert);
            }
        }

        if settings.insecure_skip_verify {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build()?;
        let base_url = settings.base_url();

        Ok(Self {
            settings,
            base_url,
            client,
        })
    }

    fn auth_url(&self) -> String {
        format!("{}/auth", self.base_url)
    }

    fn check_url(&self, namespace: &str, name: &str) -> String {
        format!(
            "{}/api/core/v2/namespaces/{}/checks/{}",
            self.base_url, namespace, name
        )
    }
}

#[async_trait::async_trait]
impl BackendClient for HttpBackend {
    async fn authenticate(&self) -> Result<AuthToken, BackendError> {
        let url = self.auth_url();
        debug!(%url, user = %self.settings.user, "requesting access token");

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.settings.user, Some(&self.settings.password))
            .send()
            .await?;

        let body = response.text().await?;
        parse_auth_body(&body, &self.settings.user)
    }

    async fn put_check(
        &self,
        credential: &Credential,
        check: &CheckDefinition,
    ) -> Result<(), BackendError> {
        let url = self.check_url(&check.metadata.namespace, &check.metadata.name);
        let encoded = serde_json::to_string(check)?;

        debug!(%url, check = %check.metadata.name, "upserting check definition");

        let response = self
            .client
            .put(&url)
            .header(reqwest::header::AUTHORIZATION, credential.authorization_value())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(encoded.clone())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::PutFailed {
                url,
                status: status.to_string(),
                payload: encoded,
            });
        }

        Ok(())
    }
}

/// Interpret the auth endpoint's response body.
///
/// The backend answers an invalid basic auth pair with a plain-text
/// body starting with `Unauthorized` rather than a JSON record, so the
/// prefix is checked before decoding.
fn parse_auth_body(body: &str, user: &str) -> Result<AuthToken, BackendError> {
    const SNIPPET_LEN: usize = 64;

    if body.starts_with("Unauthorized") {
        return Err(BackendError::Unauthorized {
            user: user.to_string(),
        });
    }

    serde_json::from_str(body).map_err(|e| BackendError::AuthDecode {
        reason: e.to_string(),
        limit: SNIPPET_LEN,
        snippet: truncate(body, SNIPPET_LEN),
    })
}

/// First `max_len` bytes of a response body, for error diagnostics.
fn truncate(body: &str, max_len: usize) -> String {
    let mut end = max_len.min(body.len());
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(secure: bool) -> BackendSettings {
        BackendSettings {
            secure,
            host: "sensu-backend.example.com".into(),
            port: 8080,
            user: "admin".into(),
            password: "P@ssw0rd!".into(),
            trusted_ca_file: None,
            insecure_skip_verify: false,
        }
    }

    #[test]
    fn base_url_protocol_follows_secure_flag() {
        assert_eq!(
            settings(false).base_url(),
            "http://sensu-backend.example.com:8080"
        );
        assert_eq!(
            settings(true).base_url(),
            "https://sensu-backend.example.com:8080"
        );
    }

    #[test]
    fn auth_and_check_urls() {
        let backend = HttpBackend::from_settings(settings(false)).unwrap();
        assert_eq!(
            backend.auth_url(),
            "http://sensu-backend.example.com:8080/auth"
        );
        assert_eq!(
            backend.check_url("default", "check-pods-describe-dynamic"),
            "http://sensu-backend.example.com:8080/api/core/v2/namespaces/default/checks/check-pods-describe-dynamic"
        );
    }

    #[test]
    fn parse_auth_body_accepts_token_record() {
        let token = parse_auth_body(
            r#"{"access_token": "tok", "refresh_token": "ref", "expires_at": 1}"#,
            "admin",
        )
        .unwrap();
        assert_eq!(token.access_token, "tok");
    }

    #[test]
    fn parse_auth_body_detects_unauthorized_marker() {
        let err = parse_auth_body("Unauthorized: invalid credentials", "admin").unwrap_err();
        match err {
            BackendError::Unauthorized { user } => assert_eq!(user, "admin"),
            other => panic!("expected Unauthorized, got: {other:?}"),
        }
    }

    #[test]
    fn parse_auth_body_embeds_snippet_on_decode_failure() {
        let err = parse_auth_body("<html>502 Bad Gateway</html>", "admin").unwrap_err();
        match err {
            BackendError::AuthDecode { snippet, limit, .. } => {
                assert_eq!(limit, 64);
                assert_eq!(snippet, "<html>502 Bad Gateway</html>");
            }
            other => panic!("expected AuthDecode, got: {other:?}"),
        }
    }

    #[test]
    fn truncate_limits_long_bodies() {
        let long = "x".repeat(200);
        assert_eq!(truncate(&long, 64).len(), 64);
        assert_eq!(truncate("short", 64), "short");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        // 'é' is two bytes; a cut inside it must back off.
        let body = "é".repeat(40);
        let cut = truncate(&body, 63);
        assert!(cut.len() <= 63);
        assert!(body.starts_with(&cut));
    }
}
