//! Option validation: schema + tokenized flags → [`Config`].

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::Config;
use crate::error::Failure;
use crate::schema::{OptionDefinition, Value};

/// Raw option values keyed by schema option name.
pub type Flags = BTreeMap<String, Value>;

/// Resolve every option of a schema against the supplied flags.
///
/// Options are processed in declaration order as a left fold over an
/// immutable [`Config`]; a derived default sees only the options declared
/// before it. The first missing or invalid option aborts resolution.
/// `parse` errors are returned as [`Failure::Execution`].
pub fn validate_options(
    options: &[OptionDefinition],
    flags: &Flags,
    command: &str,
) -> Result<Config, Failure> {
    options
        .iter()
        .try_fold(Config::default(), |resolved, option| {
            resolve_option(option, flags, command, resolved)
        })
}

fn resolve_option(
    option: &OptionDefinition,
    flags: &Flags,
    command: &str,
    resolved: Config,
) -> Result<Config, Failure> {
    let explicit = flags.get(option.name).filter(|value| !value.is_empty());
    let value = match explicit {
        Some(value) => Some(value.clone()),
        None => option
            .default
            .as_ref()
            .and_then(|default| default.resolve(&resolved)),
    };

    let value = match value {
        Some(value) if !value.is_empty() => value,
        _ if option.required => {
            return Err(Failure::MissingRequired {
                option: option.flag(),
                command: command.to_string(),
            });
        }
        _ => {
            debug!(option = option.name, "no value, skipping");
            return Ok(resolved);
        }
    };

    if !option.accepts(&value) {
        return Err(Failure::InvalidChoice {
            option: option.flag(),
            value: value.to_string(),
            choices: option.choice_values(),
            command: command.to_string(),
        });
    }

    let value = match option.parse {
        Some(parse) => parse(value).map_err(|err| {
            Failure::execution(
                command,
                err.context(format!("invalid value for '--{}'", option.flag())),
            )
        })?,
        None => value,
    };

    debug!(option = option.name, %value, "resolved");
    Ok(resolved.with(option.name, value))
}
