//! Failure types for command resolution, validation and execution.

use thiserror::Error;

/// Every way a dispatched command can fail.
///
/// The validator raises the first two variants; everything it does not
/// understand (tokenizer errors, `parse` errors, action errors) is carried
/// as [`Failure::Execution`] with its cause chain intact.
#[derive(Debug, Error)]
pub enum Failure {
    /// A required option had no flag and no usable default.
    #[error("Option '--{option}' is required for '{command}'")]
    MissingRequired { option: String, command: String },

    /// The resolved value is not among the option's declared choices.
    #[error(
        "Invalid value '{value}' for option '--{option}' in '{command}'. Possible values: {}",
        .choices.join(", ")
    )]
    InvalidChoice {
        option: String,
        value: String,
        choices: Vec<String>,
        command: String,
    },

    /// Anything else that went wrong while running the command.
    #[error("Command '{command}' failed")]
    Execution {
        command: String,
        #[source]
        source: anyhow::Error,
    },
}

impl Failure {
    /// Wrap `source` as a failure of `command`.
    pub fn execution<S: Into<String>>(command: S, source: anyhow::Error) -> Self {
        Failure::Execution {
            command: command.into(),
            source,
        }
    }

    /// Validation failures are reported with their message alone.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Failure::MissingRequired { .. } | Failure::InvalidChoice { .. }
        )
    }
}

/// Static registry data that breaks a schema invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("command name cannot be empty")]
    EmptyCommandName,
    #[error("duplicate command in registry: {0}")]
    DuplicateCommand(String),
    #[error("duplicate option '{option}' in command '{command}'")]
    DuplicateOption { command: String, option: String },
    #[error("default command '{0}' is not registered")]
    UnknownDefault(String),
}
