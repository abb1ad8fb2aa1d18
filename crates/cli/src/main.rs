//! checkforge-mutator — synthesizes diagnostic checks from monitoring
//! events.
//!
//! Host pipeline contract: the event arrives as JSON on stdin, the
//! mutated event leaves as JSON on stdout, and any fatal error maps to
//! a non-zero exit. Rule-local skips are not errors.

mod cli;
mod config;

use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use checkforge_backend::HttpBackend;
use checkforge_core::Event;
use checkforge_rules::{mutate, parse_check_config, CommandRenderer, RuleEvaluator};

use crate::cli::Cli;
use crate::config::MutatorConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    dotenvy::dotenv().ok();

    let config = MutatorConfig::from_cli(Cli::parse());

    let templates = parse_check_config(&config.check_config)
        .context("failed to load check-config")?;
    debug!(count = templates.len(), "loaded rule templates");

    let renderer = CommandRenderer::new(
        &config.command_arguments_template,
        &config.command_bool_arguments_template,
    );
    let evaluator = RuleEvaluator::new(
        renderer,
        &config.default_check_suffix_name,
        &config.command_handler,
    );

    let backend = HttpBackend::from_settings(config.backend.clone())
        .context("failed to construct backend client")?;

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read event from stdin")?;
    let event: Event =
        serde_json::from_str(&input).context("failed to parse event from stdin")?;

    info!(
        check = %event.check_name(),
        entity = %event.entity_name(),
        namespace = %event.namespace(),
        "mutating event"
    );

    let mutated = mutate(
        &templates,
        &evaluator,
        &backend,
        config.api_key.as_deref(),
        event,
    )
    .await
    .context("event mutation failed")?;

    let encoded =
        serde_json::to_string(&mutated).context("failed to serialize mutated event")?;
    println!("{encoded}");

    Ok(())
}
