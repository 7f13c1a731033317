#![cfg_attr(feature = "strict", deny(warnings))]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use credential_artifact::ArtifactCore;
use credential_artifact::config::core_config::AppConfig;
use serde::Deserialize;
use tracing_subscriber::prelude::*;

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
struct CliConfig {
    trace_level: Option<String>,
    trace_json: Option<bool>,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    config: Option<Vec<PathBuf>>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List enabled issuers
    Issuers {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// List credential types supported by an issuer
    CredentialTypes {
        issuer_id: String,
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Download a credential and render it as PDF
    Render {
        #[arg(long)]
        issuer: String,
        #[arg(long)]
        credential_type: String,
        #[arg(long, env = "ARTIFACT_ACCESS_TOKEN")]
        access_token: String,
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config_files = cli.config.unwrap_or_default();
    config_files.insert(0, "config/config.yml".into());

    let app_config: AppConfig<CliConfig> =
        AppConfig::from_files(&config_files).context("Failed creating config")?;

    initialize_tracing(&app_config.app)?;

    let core = ArtifactCore::new(Arc::new(app_config.core), None);

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(core, cli.command))
}

async fn run(core: ArtifactCore, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Issuers { search } => {
            let issuers = core.issuer_service.get_all_issuers(search.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&issuers)?);
        }
        Command::CredentialTypes { issuer_id, search } => {
            let response = core
                .issuer_service
                .get_credentials_supported(&issuer_id, search.as_deref())
                .await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Render {
            issuer,
            credential_type,
            access_token,
            output,
        } => {
            let issuer = core.issuer_service.get_issuer_config(&issuer)?;
            let supported = core
                .issuer_service
                .get_credentials_supported(&issuer.credential_issuer, None)
                .await?;
            let descriptor = supported
                .supported_credentials
                .into_iter()
                .find(|descriptor| descriptor.id.as_deref() == Some(credential_type.as_str()))
                .with_context(|| {
                    format!(
                        "Credential type `{credential_type}` not supported by `{}`",
                        issuer.credential_issuer
                    )
                })?;

            let document = core
                .credential_service
                .generate_pdf_for_verifiable_credential(
                    &access_token,
                    &issuer,
                    &descriptor,
                    &issuer.credential_endpoint,
                )
                .await?;

            std::fs::write(&output, &document)
                .with_context(|| format!("Failed writing {}", output.display()))?;
            tracing::info!(output = %output.display(), size = document.len(), "Document written");
        }
    }

    Ok(())
}

fn initialize_tracing(config: &CliConfig) -> anyhow::Result<()> {
    // RUST_LOG wins over the configured level
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| {
            tracing_subscriber::EnvFilter::try_new(
                config.trace_level.as_deref().unwrap_or("debug"),
            )
        })
        .context("Failed to create env filter")?;

    // stdout carries command output
    let tracing_layer = tracing_subscriber::registry().with(filter);

    if config.trace_json.unwrap_or_default() {
        tracing_layer
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_layer
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    };

    Ok(())
}
