//! Command registry and resolution of the first positional token.

use std::collections::HashSet;

use tracing::debug;

use crate::command::CommandDefinition;
use crate::error::SchemaError;

const VERSION_FLAGS: &[&str] = &["-v", "--version"];
const HELP_FLAGS: &[&str] = &["-h", "--help"];

/// What the dispatcher should do with an argument vector.
#[derive(Debug)]
pub enum Resolution<'a> {
    ShowVersion,
    ShowGlobalHelp,
    /// Help for one registered command.
    ShowCommandHelp(&'a CommandDefinition),
    /// A retired command name; informational only.
    NotImplemented(&'a str),
    /// Run `command` with the arguments that follow its name.
    Dispatch {
        command: &'a CommandDefinition,
        args: &'a [String],
    },
}

impl Resolution<'_> {
    /// Whether processing ends without reaching validation.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Resolution::Dispatch { .. })
    }
}

/// Fixed set of subcommands, the fallback command and retired names.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    commands: Vec<CommandDefinition>,
    default: usize,
    retired: Vec<&'static str>,
}

impl CommandRegistry {
    /// Validate and assemble a registry.
    ///
    /// Command names must be non-empty and unique, option names unique
    /// within each command, and `default` must name a registered command.
    pub fn new(
        commands: Vec<CommandDefinition>,
        default: &str,
        retired: Vec<&'static str>,
    ) -> Result<Self, SchemaError> {
        let mut seen_commands = HashSet::new();
        for command in &commands {
            if command.name.trim().is_empty() {
                return Err(SchemaError::EmptyCommandName);
            }
            if !seen_commands.insert(command.name) {
                return Err(SchemaError::DuplicateCommand(command.name.to_string()));
            }
            let mut seen_options = HashSet::new();
            for option in &command.options {
                if !seen_options.insert(option.name) {
                    return Err(SchemaError::DuplicateOption {
                        command: command.name.to_string(),
                        option: option.name.to_string(),
                    });
                }
            }
        }
        let default = commands
            .iter()
            .position(|command| command.name == default)
            .ok_or_else(|| SchemaError::UnknownDefault(default.to_string()))?;
        Ok(Self {
            commands,
            default,
            retired,
        })
    }

    /// Registered commands in registration order.
    pub fn commands(&self) -> &[CommandDefinition] {
        &self.commands
    }

    /// Command run when the first token names no command.
    pub fn default_command(&self) -> &CommandDefinition {
        &self.commands[self.default]
    }

    /// Names answered with a not-implemented notice.
    pub fn retired(&self) -> &[&'static str] {
        &self.retired
    }

    /// Registered command called `name`.
    pub fn find(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.iter().find(|command| command.name == name)
    }

    /// Map a raw argument vector (without program name) to a [`Resolution`].
    ///
    /// Version and help requests are checked against the raw tokens before
    /// any command lookup, then retired names, then registered names with
    /// the default command as fallback.
    pub fn resolve<'a>(&'a self, argv: &'a [String]) -> Resolution<'a> {
        let first = argv.first().map(String::as_str);

        if first == Some("version") || contains_any(argv, VERSION_FLAGS) {
            return Resolution::ShowVersion;
        }

        if matches!(first, Some("help" | "-h" | "--help")) {
            return match argv.get(1).and_then(|name| self.find(name)) {
                Some(command) => Resolution::ShowCommandHelp(command),
                None => Resolution::ShowGlobalHelp,
            };
        }

        if let Some(name) = first {
            if let Some(retired) = self.retired.iter().find(|retired| **retired == name) {
                return Resolution::NotImplemented(*retired);
            }
        }

        let (command, args) = match first.and_then(|name| self.find(name)) {
            Some(command) => (command, &argv[1..]),
            None => (self.default_command(), argv),
        };
        debug!(command = command.name, args = args.len(), "resolved command");

        if contains_any(args, HELP_FLAGS) {
            return Resolution::ShowCommandHelp(command);
        }

        Resolution::Dispatch { command, args }
    }
}

fn contains_any(argv: &[String], needles: &[&str]) -> bool {
    argv.iter().any(|arg| needles.contains(&arg.as_str()))
}
