//! Option definitions shared by several subcommands.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::{Choice, OptionDefinition, Value, parse};

/// Project configuration file read by `start` and `bundle`.
pub const CONFIG_FILE: &str = "haul.config.json";

/// Target platform of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
    All,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Ios => write!(f, "ios"),
            Platform::Android => write!(f, "android"),
            Platform::All => write!(f, "all"),
        }
    }
}

pub fn platform_choices() -> [Choice; 2] {
    [
        Choice::new("ios", "Build for iOS"),
        Choice::new("android", "Build for Android"),
    ]
}

pub fn config_option() -> OptionDefinition {
    OptionDefinition::new("config")
        .with_description("Path to the project configuration file")
        .with_default(CONFIG_FILE)
}

pub fn dev_option() -> OptionDefinition {
    OptionDefinition::new("dev")
        .with_description("Whether to build in development mode")
        .with_default("true")
        .with_parser(parse::boolean)
}

/// Minification defaults to the opposite of `dev`, so it must follow it.
pub fn minify_option() -> OptionDefinition {
    OptionDefinition::new("minify")
        .with_description("Whether to minify the output (defaults to the opposite of --dev)")
        .with_derived_default(|resolved| resolved.get_bool("dev").map(|dev| Value::Bool(!dev)))
        .with_parser(parse::boolean)
}
