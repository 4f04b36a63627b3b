//! Development packager (`haul start`), the default command.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::command::CommandDefinition;
use crate::commands::common::{Platform, config_option, dev_option, minify_option, platform_choices};
use crate::config::Config;
use crate::schema::{Choice, OptionDefinition, parse};

pub const NAME: &str = "start";

/// Resolved options for `haul start`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StartOptions {
    pub port: u16,
    pub dev: bool,
    pub platform: Platform,
    pub minify: bool,
    pub config: String,
}

pub fn command() -> CommandDefinition {
    CommandDefinition::new(NAME, "Start the development packager", run).with_options([
        OptionDefinition::new("port")
            .with_description("Port to run the packager on")
            .with_default("8081")
            .with_parser(parse::port),
        dev_option(),
        OptionDefinition::new("platform")
            .with_description("Platform to serve bundles for")
            .with_default("all")
            .with_choices(
                platform_choices()
                    .into_iter()
                    .chain([Choice::new("all", "Serve every platform")]),
            ),
        minify_option(),
        config_option(),
    ])
}

async fn run(config: Config) -> Result<()> {
    let options: StartOptions = config
        .deserialize()
        .context("resolved options do not match `haul start`")?;
    info!(port = options.port, platform = %options.platform, "starting packager");
    println!("{}", plan(&options));
    Ok(())
}

fn plan(options: &StartOptions) -> String {
    format!(
        "Packager for {} on http://localhost:{} (dev: {}, minify: {}, config: {})",
        options.platform, options.port, options.dev, options.minify, options.config
    )
}
