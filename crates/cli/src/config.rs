//! Immutable runtime configuration.
//!
//! The parsed flag surface is frozen into one [`MutatorConfig`] value
//! before any rule evaluates; components receive it (or the pieces
//! they need) by reference. Nothing configuration-shaped is mutable or
//! global after startup.

use std::path::PathBuf;

use checkforge_backend::BackendSettings;

use crate::cli::Cli;

/// Frozen configuration for one mutator run.
#[derive(Debug, Clone)]
pub struct MutatorConfig {
    /// Raw check-config JSON (parsed separately by the rules loader).
    pub check_config: String,
    pub command_arguments_template: String,
    pub command_bool_arguments_template: String,
    /// Default handler for templates that set none.
    pub command_handler: String,
    /// Suffix appended to every generated check name.
    pub default_check_suffix_name: String,
    /// Static API key; `None` means token authentication.
    pub api_key: Option<String>,
    pub backend: BackendSettings,
}

impl MutatorConfig {
    pub fn from_cli(cli: Cli) -> Self {
        let api_key = Some(cli.api_backend_key).filter(|key| !key.is_empty());

        Self {
            check_config: cli.check_config,
            command_arguments_template: cli.command_arguments_template,
            command_bool_arguments_template: cli.command_bool_arguments_template,
            command_handler: cli.command_handler,
            default_check_suffix_name: cli.default_check_suffix_name,
            api_key,
            backend: BackendSettings {
                secure: cli.secure,
                host: cli.api_backend_host,
                port: cli.api_backend_port,
                user: cli.api_backend_user,
                password: cli.api_backend_pass,
                trusted_ca_file: cli.trusted_ca_file.map(PathBuf::from),
                insecure_skip_verify: cli.insecure_skip_verify,
            },
        }
    }
}
