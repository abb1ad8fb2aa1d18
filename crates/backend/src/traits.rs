//! Backend client trait definition and shared error types.

use checkforge_core::CheckDefinition;
use serde::{Deserialize, Serialize};

/// Errors that can occur while talking to the monitoring backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("authorization failed for user {user}")]
    Unauthorized { user: String },

    #[error("error decoding auth response: {reason}\nFirst {limit} bytes of response: {snippet}")]
    AuthDecode {
        reason: String,
        limit: usize,
        snippet: String,
    },

    #[error("PUT of check to {url} failed with status {status}\npayload: {payload}")]
    PutFailed {
        url: String,
        status: String,
        payload: String,
    },

    #[error("failed to serialize check definition: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("TLS configuration error: {0}")]
    Tls(String),
}

/// A short-lived credential record returned by the backend's auth
/// endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthToken {
    #[serde(default)]
    pub access_token: String,

    #[serde(default)]
    pub refresh_token: String,

    /// Unix timestamp at which the access token expires.
    #[serde(default)]
    pub expires_at: i64,
}

/// How an outbound call authenticates itself.
///
/// A statically configured API key takes precedence over token auth
/// and skips the auth endpoint entirely.
#[derive(Debug, Clone)]
pub enum Credential {
    ApiKey(String),
    Bearer(AuthToken),
}

impl Credential {
    /// Value for the `Authorization` header.
    pub fn authorization_value(&self) -> String {
        match self {
            Credential::ApiKey(key) => format!("Key {key}"),
            Credential::Bearer(token) => format!("Bearer {}", token.access_token),
        }
    }
}

/// Client contract for the monitoring backend.
///
/// Kept behind a trait so the mutation pipeline stays testable without
/// a live backend, and so retry policy could be layered in without
/// touching rule evaluation.
#[async_trait::async_trait]
pub trait BackendClient: Send + Sync {
    /// Obtain a short-lived access token using the configured basic
    /// auth credentials.
    async fn authenticate(&self) -> Result<AuthToken, BackendError>;

    /// Idempotently upsert a check definition into its namespace.
    async fn put_check(
        &self,
        credential: &Credential,
        check: &CheckDefinition,
    ) -> Result<(), BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_authorization_header() {
        let credential = Credential::ApiKey("abc123".into());
        assert_eq!(credential.authorization_value(), "Key abc123");
    }

    #[test]
    fn bearer_authorization_header() {
        let credential = Credential::Bearer(AuthToken {
            access_token: "tok".into(),
            refresh_token: "ref".into(),
            expires_at: 1736418000,
        });
        assert_eq!(credential.authorization_value(), "Bearer tok");
    }

    #[test]
    fn auth_token_decodes_from_backend_response() {
        let token: AuthToken = serde_json::from_str(
            r#"{"access_token": "a", "refresh_token": "r", "expires_at": 1736418000}"#,
        )
        .unwrap();
        assert_eq!(token.access_token, "a");
        assert_eq!(token.refresh_token, "r");
        assert_eq!(token.expires_at, 1736418000);
    }

    #[test]
    fn auth_token_tolerates_missing_optional_fields() {
        let token: AuthToken = serde_json::from_str(r#"{"access_token": "a"}"#).unwrap();
        assert_eq!(token.access_token, "a");
        assert_eq!(token.refresh_token, "");
        assert_eq!(token.expires_at, 0);
    }
}
