//! Project scaffolding (`haul init`).

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::command::CommandDefinition;
use crate::commands::common::{CONFIG_FILE, Platform};
use crate::config::Config;
use crate::schema::{OptionDefinition, parse};

pub const NAME: &str = "init";

/// Resolved options for `haul init`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InitOptions {
    pub config: PathBuf,
    pub entry: String,
    pub force: bool,
}

/// Contents of a freshly generated project configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarterConfig {
    pub created_at: DateTime<Utc>,
    pub entry: String,
    pub platforms: Vec<Platform>,
}

impl StarterConfig {
    pub fn new<S: Into<String>>(entry: S) -> Self {
        Self {
            created_at: Utc::now(),
            entry: entry.into(),
            platforms: vec![Platform::Ios, Platform::Android],
        }
    }
}

pub fn command() -> CommandDefinition {
    CommandDefinition::new(NAME, "Generate a project configuration file", run).with_options([
        OptionDefinition::new("config")
            .with_description("Where to write the configuration")
            .with_default(CONFIG_FILE),
        OptionDefinition::new("entry")
            .with_description("Entry file of the application")
            .with_default("index.js"),
        OptionDefinition::new("force")
            .with_description("Overwrite an existing configuration")
            .with_default("false")
            .with_parser(parse::boolean),
    ])
}

async fn run(config: Config) -> Result<()> {
    let options: InitOptions = config
        .deserialize()
        .context("resolved options do not match `haul init`")?;
    write_starter(&options).await?;
    println!("Created {}", options.config.display());
    Ok(())
}

async fn write_starter(options: &InitOptions) -> Result<()> {
    let path = &options.config;
    let exists = tokio::fs::try_exists(path)
        .await
        .with_context(|| format!("failed to check {}", path.display()))?;
    if exists && !options.force {
        return Err(anyhow!(
            "{} already exists. Pass --force true to overwrite it.",
            path.display()
        ));
    }
    let starter = StarterConfig::new(options.entry.clone());
    let mut body = serde_json::to_string_pretty(&starter).context("failed to serialize config")?;
    body.push('\n');
    tokio::fs::write(path, body)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "wrote starter configuration");
    Ok(())
}
