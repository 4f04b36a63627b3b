//! Command-line front-end for the haul packager.
//!
//! Maps an argument vector to one of a fixed set of subcommands, resolves
//! and validates the subcommand's declared options into a [`Config`], and
//! runs the subcommand's action with it.

mod command;
pub mod commands;
mod config;
mod dispatch;
mod error;
pub mod messages;
mod resolver;
mod schema;
mod tokenizer;
mod validate;

pub use command::CommandDefinition;
pub use config::Config;
pub use dispatch::{Dispatcher, Outcome};
pub use error::{Failure, SchemaError};
pub use resolver::{CommandRegistry, Resolution};
pub use schema::{Choice, DefaultValue, DeriveFn, OptionDefinition, ParseFn, Value, parse};
pub use tokenizer::tokenize;
pub use validate::{Flags, validate_options};

/// Program name used in messages (`haul bundle`).
pub const PROGRAM: &str = "haul";

/// Dispatcher over the built-in subcommands.
pub fn dispatcher() -> Result<Dispatcher, SchemaError> {
    Ok(Dispatcher::new(
        PROGRAM,
        env!("CARGO_PKG_VERSION"),
        commands::registry()?,
    ))
}
