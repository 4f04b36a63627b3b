//! Offline bundle builds (`haul bundle`).

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::command::CommandDefinition;
use crate::commands::common::{Platform, config_option, dev_option, minify_option, platform_choices};
use crate::config::Config;
use crate::schema::{Choice, OptionDefinition, Value};

pub const NAME: &str = "bundle";

/// How much build progress to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Progress {
    None,
    Minimal,
    Compact,
    Full,
}

/// Resolved options for `haul bundle`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BundleOptions {
    pub platform: Platform,
    pub dev: bool,
    pub minify: bool,
    pub bundle_output: String,
    pub assets_dest: Option<String>,
    pub sourcemap_output: Option<String>,
    pub progress: Progress,
    pub config: String,
}

pub fn command() -> CommandDefinition {
    CommandDefinition::new(NAME, "Create an offline bundle", run).with_options([
        OptionDefinition::new("platform")
            .with_description("Platform to bundle for")
            .required()
            .with_choices(platform_choices()),
        dev_option(),
        minify_option(),
        OptionDefinition::new("bundle_output")
            .with_description("File to write the bundle to")
            .with_derived_default(|resolved| {
                resolved
                    .get_str("platform")
                    .map(|platform| Value::text(format!("index.{platform}.bundle")))
            }),
        OptionDefinition::new("assets_dest")
            .with_description("Directory to copy assets into (defaults to the bundle directory)")
            .with_derived_default(|resolved| {
                let output = resolved.get_str("bundle_output")?;
                let parent = Path::new(output).parent()?.to_str()?;
                Some(Value::text(parent))
            }),
        OptionDefinition::new("sourcemap_output")
            .with_description("File to write the source map to"),
        OptionDefinition::new("progress")
            .with_description("Progress reporting style")
            .with_default("compact")
            .with_choices([
                Choice::new("none", "No progress output"),
                Choice::new("minimal", "Only the final result"),
                Choice::new("compact", "Single updating line"),
                Choice::new("full", "Every build step"),
            ]),
        config_option(),
    ])
}

async fn run(config: Config) -> Result<()> {
    let options: BundleOptions = config
        .deserialize()
        .context("resolved options do not match `haul bundle`")?;
    info!(platform = %options.platform, output = %options.bundle_output, "bundling");
    println!("{}", plan(&options));
    Ok(())
}

fn plan(options: &BundleOptions) -> String {
    let mut lines = vec![
        format!("Bundle for {}", options.platform),
        format!("  output:    {}", options.bundle_output),
    ];
    if let Some(assets) = &options.assets_dest {
        lines.push(format!("  assets:    {}", assets));
    }
    if let Some(sourcemap) = &options.sourcemap_output {
        lines.push(format!("  sourcemap: {}", sourcemap));
    }
    lines.push(format!(
        "  dev: {}, minify: {}, progress: {:?}, config: {}",
        options.dev, options.minify, options.progress, options.config
    ));
    lines.join("\n")
}
