//! User-facing text: version, help screens and failure reports.

use crate::command::CommandDefinition;
use crate::error::Failure;
use crate::resolver::CommandRegistry;
use crate::schema::DefaultValue;

/// Version line, `v` followed by the package version.
pub fn version(version: &str) -> String {
    format!("v{version}")
}

/// Overview of every registered command.
pub fn global_help(program: &str, registry: &CommandRegistry) -> String {
    let width = registry
        .commands()
        .iter()
        .map(|command| command.name.len())
        .max()
        .unwrap_or(0);

    let mut lines = vec![
        format!("Usage: {program} [command] [options]"),
        String::new(),
        "Commands:".to_string(),
    ];
    lines.extend(registry.commands().iter().map(|command| {
        let marker = if command.name == registry.default_command().name {
            " (default)"
        } else {
            ""
        };
        format!("  {:<width$}  {}{}", command.name, command.description, marker)
    }));
    if !registry.retired().is_empty() {
        lines.push(String::new());
        lines.push(format!("Not supported: {}", registry.retired().join(", ")));
    }
    lines.push(String::new());
    lines.push(format!(
        "Run `{program} help <command>` or `{program} <command> --help` for command options."
    ));
    lines.join("\n")
}

/// Options of a single command, in declaration order.
pub fn command_help(program: &str, command: &CommandDefinition) -> String {
    let mut lines = vec![
        format!("Usage: {} [options]", command.display_name(program)),
        String::new(),
        command.description.to_string(),
    ];
    if !command.options.is_empty() {
        lines.push(String::new());
        lines.push("Options:".to_string());
    }
    for option in &command.options {
        let mut line = format!("  --{:<18} {}", option.flag(), option.description);
        if option.required {
            line.push_str(" (required)");
        }
        if let Some(DefaultValue::Literal(value)) = &option.default {
            line.push_str(&format!(" [default: {value}]"));
        }
        lines.push(line);
        lines.extend(
            option
                .choices
                .iter()
                .flatten()
                .map(|choice| format!("      {:<10} {}", choice.value, choice.description)),
        );
    }
    lines.join("\n")
}

/// Notice for a retired command name.
pub fn command_not_implemented(program: &str, name: &str) -> String {
    format!(
        "'{name}' is not implemented in {program}. Use the react-native CLI for this command."
    )
}

/// Report for a failure caught at the dispatch boundary.
///
/// Validation failures are shown by their message alone; execution
/// failures carry the whole cause chain.
pub fn command_failed(failure: &Failure) -> String {
    match failure {
        Failure::Execution { source, .. } => format!("{failure}\n\n{source:?}"),
        _ => failure.to_string(),
    }
}
