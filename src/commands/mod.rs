//! Built-in subcommands and the registry that ties them together.

pub mod bundle;
pub mod common;
pub mod init;
pub mod start;

use crate::error::SchemaError;
use crate::resolver::CommandRegistry;

/// react-native CLI commands that haul deliberately does not provide.
pub const RETIRED_COMMANDS: &[&str] = &[
    "run-ios",
    "run-android",
    "library",
    "unbundle",
    "link",
    "unlink",
    "install",
    "uninstall",
    "upgrade",
    "log-android",
    "log-ios",
    "dependencies",
];

/// Registry of `init`, `start` and `bundle`, falling back to `start`.
pub fn registry() -> Result<CommandRegistry, SchemaError> {
    CommandRegistry::new(
        vec![init::command(), start::command(), bundle::command()],
        start::NAME,
        RETIRED_COMMANDS.to_vec(),
    )
}
