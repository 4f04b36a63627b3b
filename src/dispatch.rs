//! Dispatch: resolve → tokenize → validate → run, with one catch boundary.

use std::ffi::OsString;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use anyhow::anyhow;
use tracing::{debug, error, info};

use crate::error::Failure;
use crate::messages;
use crate::resolver::{CommandRegistry, Resolution};
use crate::tokenizer::tokenize;
use crate::validate::validate_options;

/// Result of an invocation that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `v<version>` line.
    Version(String),
    /// Overview of every registered command.
    GlobalHelp(String),
    /// Options of one command.
    CommandHelp(String),
    /// Notice for a retired command.
    NotImplemented(String),
    /// The named command's action ran to completion.
    Completed(&'static str),
}

/// Drives one invocation against a fixed registry.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    program: &'static str,
    version: &'static str,
    registry: CommandRegistry,
}

impl Dispatcher {
    /// Dispatcher for `program` reporting `version`.
    pub fn new(program: &'static str, version: &'static str, registry: CommandRegistry) -> Self {
        Self {
            program,
            version,
            registry,
        }
    }

    /// Run the pipeline without rendering anything.
    ///
    /// Terminal resolutions return their text; otherwise the command's
    /// action is awaited with the validated config.
    pub async fn dispatch(&self, argv: &[String]) -> Result<Outcome, Failure> {
        let (command, args) = match self.registry.resolve(argv) {
            Resolution::ShowVersion => return Ok(Outcome::Version(messages::version(self.version))),
            Resolution::ShowGlobalHelp => {
                return Ok(Outcome::GlobalHelp(messages::global_help(
                    self.program,
                    &self.registry,
                )));
            }
            Resolution::ShowCommandHelp(command) => {
                return Ok(Outcome::CommandHelp(messages::command_help(
                    self.program,
                    command,
                )));
            }
            Resolution::NotImplemented(name) => {
                return Ok(Outcome::NotImplemented(messages::command_not_implemented(
                    self.program,
                    name,
                )));
            }
            Resolution::Dispatch { command, args } => (command, args),
        };

        let display_name = command.display_name(self.program);
        let flags = tokenize(&display_name, &command.options, args)
            .map_err(|err| Failure::execution(&display_name, err))?;
        debug!(command = %display_name, ?flags, "tokenized");

        let config = validate_options(&command.options, &flags, &display_name)?;
        debug!(command = %display_name, ?config, "validated");

        command
            .invoke(config)
            .await
            .map_err(|err| Failure::execution(&display_name, err))?;
        Ok(Outcome::Completed(command.name))
    }

    /// Run and report; never fails.
    ///
    /// Any failure maps to [`ExitCode::FAILURE`].
    pub async fn run(&self, argv: &[String]) -> ExitCode {
        exit_code(self.execute(argv).await)
    }

    /// Like [`Dispatcher::run`], for raw process arguments.
    ///
    /// An argument that is not valid UTF-8 is reported as an execution
    /// failure of the program itself.
    pub async fn run_os<I>(&self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        match decode_args(self.program, args) {
            Ok(argv) => self.run(&argv).await,
            Err(failure) => exit_code(report(Err(failure))),
        }
    }

    /// Dispatch and render the outcome, returning whether it succeeded.
    async fn execute(&self, argv: &[String]) -> bool {
        report(self.dispatch(argv).await)
    }
}

fn exit_code(succeeded: bool) -> ExitCode {
    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Convert process arguments to UTF-8 strings, failing on the first one
/// that is not.
fn decode_args<I>(program: &str, args: I) -> Result<Vec<String>, Failure>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .enumerate()
        .map(|(index, arg)| {
            arg.into_string().map_err(|raw| {
                Failure::execution(
                    program,
                    anyhow!(
                        "argument {} is not valid UTF-8: {}",
                        index + 1,
                        raw.to_string_lossy()
                    ),
                )
            })
        })
        .collect()
}

/// Render an outcome, returning whether it succeeded.
///
/// Help and version go to stdout, notices and failures to the log.
fn report(result: Result<Outcome, Failure>) -> bool {
    match result {
        Ok(Outcome::Version(text) | Outcome::GlobalHelp(text) | Outcome::CommandHelp(text)) => {
            println!("{}", text.trim_end());
            true
        }
        Ok(Outcome::NotImplemented(text)) => {
            info!("{text}");
            true
        }
        Ok(Outcome::Completed(name)) => {
            debug!(command = name, "completed");
            true
        }
        Err(failure) => {
            clear_terminal();
            error!("{}", messages::command_failed(&failure));
            false
        }
    }
}

/// Clear the screen so the failure report stands alone.
fn clear_terminal() {
    let mut stderr = io::stderr();
    if stderr.is_terminal() {
        let _ = stderr.write_all(b"\x1b[2J\x1b[H");
        let _ = stderr.flush();
    }
}
