//! Flag surface of the mutator binary.

use clap::Parser;

use checkforge_rules::render::{DEFAULT_ARGUMENTS_TEMPLATE, DEFAULT_BOOL_ARGUMENTS_TEMPLATE};

/// Synthesizes diagnostic checks from monitoring events based on
/// declarative rule templates.
#[derive(Parser, Debug)]
#[command(name = "checkforge-mutator", version, about)]
pub struct Cli {
    /// JSON array of rule templates.
    #[arg(short = 'c', long, env = "CHECKFORGE_CHECK_CONFIG")]
    pub check_config: String,

    /// Template rendering extracted option/argument pairs into command
    /// fragments.
    #[arg(long, default_value = DEFAULT_ARGUMENTS_TEMPLATE)]
    pub command_arguments_template: String,

    /// Template rendering boolean flag lists into command fragments.
    #[arg(long, default_value = DEFAULT_BOOL_ARGUMENTS_TEMPLATE)]
    pub command_bool_arguments_template: String,

    /// Handler attached to synthesized checks that name none.
    #[arg(long, default_value = "default")]
    pub command_handler: String,

    /// Backend API user for token authentication.
    #[arg(short = 'u', long, env = "SENSU_API_USER", default_value = "admin")]
    pub api_backend_user: String,

    /// Backend API password for token authentication.
    #[arg(short = 'P', long, env = "SENSU_API_PASSWORD", default_value = "P@ssw0rd!")]
    pub api_backend_pass: String,

    /// Static backend API key; when set, token authentication is
    /// skipped entirely.
    #[arg(short = 'k', long, env = "SENSU_API_KEY", default_value = "")]
    pub api_backend_key: String,

    /// Backend API host (e.g. 'sensu-backend.example.com').
    #[arg(short = 'B', long, default_value = "127.0.0.1")]
    pub api_backend_host: String,

    /// Backend API port.
    #[arg(short = 'p', long, default_value_t = 8080)]
    pub api_backend_port: u16,

    /// Use TLS when connecting to the backend API.
    #[arg(short = 's', long)]
    pub secure: bool,

    /// Skip TLS certificate verification (not recommended).
    #[arg(short = 'i', long)]
    pub insecure_skip_verify: bool,

    /// TLS CA certificate bundle in PEM format.
    #[arg(short = 't', long)]
    pub trusted_ca_file: Option<String>,

    /// Suffix appended to every generated check name.
    #[arg(long, default_value = "dynamic")]
    pub default_check_suffix_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_surface_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_the_documented_surface() {
        let cli = Cli::parse_from(["checkforge-mutator", "--check-config", "[]"]);
        assert_eq!(cli.check_config, "[]");
        assert_eq!(cli.command_arguments_template, DEFAULT_ARGUMENTS_TEMPLATE);
        assert_eq!(
            cli.command_bool_arguments_template,
            DEFAULT_BOOL_ARGUMENTS_TEMPLATE
        );
        assert_eq!(cli.command_handler, "default");
        assert_eq!(cli.api_backend_user, "admin");
        assert_eq!(cli.api_backend_host, "127.0.0.1");
        assert_eq!(cli.api_backend_port, 8080);
        assert!(!cli.secure);
        assert!(!cli.insecure_skip_verify);
        assert!(cli.trusted_ca_file.is_none());
        assert_eq!(cli.default_check_suffix_name, "dynamic");
    }

    #[test]
    fn short_flags_parse() {
        let cli = Cli::parse_from([
            "checkforge-mutator",
            "-c", "[]",
            "-u", "ops",
            "-P", "hunter2",
            "-k", "api-key",
            "-B", "backend.internal",
            "-p", "4242",
            "-s",
            "-i",
            "-t", "/etc/ssl/ca.pem",
        ]);
        assert_eq!(cli.api_backend_user, "ops");
        assert_eq!(cli.api_backend_pass, "hunter2");
        assert_eq!(cli.api_backend_key, "api-key");
        assert_eq!(cli.api_backend_host, "backend.internal");
        assert_eq!(cli.api_backend_port, 4242);
        assert!(cli.secure);
        assert!(cli.insecure_skip_verify);
        assert_eq!(cli.trusted_ca_file.as_deref(), Some("/etc/ssl/ca.pem"));
    }

    #[test]
    fn check_config_is_required() {
        assert!(Cli::try_parse_from(["checkforge-mutator"]).is_err());
    }
}
