//! Schema-aware tokenization of a subcommand's arguments.

use std::collections::HashSet;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::debug;

use crate::schema::{OptionDefinition, Value};
use crate::validate::Flags;

const POSITIONAL: &str = "positional";

/// Build the clap parser for one schema.
///
/// Every option is a string-typed long flag that may repeat. A bare flag
/// with no value yields an empty string so the option's default applies.
fn parser(command: &str, options: &[OptionDefinition]) -> Command {
    let mut cmd = Command::new(command.to_string())
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new(POSITIONAL)
                .action(ArgAction::Append)
                .num_args(1..)
                .hide(true),
        );

    for option in options {
        let flag = option.flag();
        let camel = option.camel_case_flag();
        let mut arg = Arg::new(option.name)
            .long(flag.clone())
            .action(ArgAction::Append)
            .num_args(0..=1)
            .default_missing_value("");
        if camel != flag {
            arg = arg.alias(camel);
        }
        cmd = cmd.arg(arg);
    }
    cmd
}

/// Rewrite `args` so only flags the schema declares reach clap.
///
/// `--no-<flag>` becomes `--<flag>=false`. Unknown flags are dropped along
/// with a following value token. Everything after `--` passes through.
fn known_args(options: &[OptionDefinition], args: &[String]) -> Vec<String> {
    let known: HashSet<String> = options
        .iter()
        .flat_map(|option| [option.flag(), option.camel_case_flag()])
        .collect();

    let mut kept = Vec::with_capacity(args.len());
    let mut iter = args.iter().peekable();
    while let Some(arg) = iter.next() {
        if arg == "--" {
            kept.push(arg.clone());
            kept.extend(iter.cloned());
            break;
        }
        if !arg.starts_with('-') || arg == "-" {
            kept.push(arg.clone());
            continue;
        }

        let (name, inline) = match arg.trim_start_matches('-').split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (arg.trim_start_matches('-'), None),
        };
        if arg.starts_with("--") {
            if known.contains(name) {
                kept.push(arg.clone());
                continue;
            }
            let negated = name
                .strip_prefix("no-")
                .filter(|negated| inline.is_none() && known.contains(*negated));
            if let Some(negated) = negated {
                kept.push(format!("--{negated}=false"));
                continue;
            }
        }

        debug!(flag = %arg, "ignoring undeclared flag");
        if inline.is_none() && iter.peek().is_some_and(|next| !next.starts_with('-')) {
            iter.next();
        }
    }
    kept
}

/// Tokenize `args` against `options`, keyed by option name.
///
/// Flags absent from `args` are absent from the result. A flag given once
/// maps to [`Value::Text`]; repeated flags map to [`Value::List`]. Flags the
/// schema does not declare are ignored.
pub fn tokenize(command: &str, options: &[OptionDefinition], args: &[String]) -> Result<Flags> {
    let matches = parser(command, options)
        .try_get_matches_from(known_args(options, args))
        .with_context(|| format!("could not parse arguments for '{}'", command))?;
    Ok(collect(&matches, options))
}

fn collect(matches: &ArgMatches, options: &[OptionDefinition]) -> Flags {
    let mut flags = Flags::new();
    for option in options {
        let Some(values) = matches.get_many::<String>(option.name) else {
            continue;
        };
        let mut values: Vec<String> = values.cloned().collect();
        let value = if values.len() == 1 {
            Value::Text(values.remove(0))
        } else {
            Value::List(values)
        };
        flags.insert(option.name.to_string(), value);
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn schema() -> Vec<OptionDefinition> {
        vec![
            OptionDefinition::new("platform"),
            OptionDefinition::new("bundle_output"),
            OptionDefinition::new("dev"),
        ]
    }

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn separate_and_inline_values() {
        let flags = tokenize(
            "haul bundle",
            &schema(),
            &args(&["--platform", "ios", "--bundle-output=out/main.jsbundle"]),
        )
        .unwrap();
        assert_eq!(flags.get("platform"), Some(&Value::text("ios")));
        assert_eq!(
            flags.get("bundle_output"),
            Some(&Value::text("out/main.jsbundle"))
        );
        assert!(!flags.contains_key("dev"));
    }

    #[test]
    fn camel_case_alias_normalizes_to_option_name() {
        let flags = tokenize(
            "haul bundle",
            &schema(),
            &args(&["--bundleOutput", "dist/app.bundle"]),
        )
        .unwrap();
        assert_eq!(
            flags.get("bundle_output"),
            Some(&Value::text("dist/app.bundle"))
        );
    }

    #[test]
    fn bare_flag_is_empty_text() {
        let flags = tokenize("haul start", &schema(), &args(&["--dev"])).unwrap();
        assert_eq!(flags.get("dev"), Some(&Value::text("")));
    }

    #[test]
    fn repeated_flag_becomes_list() {
        let flags = tokenize(
            "haul start",
            &schema(),
            &args(&["--platform", "ios", "--platform", "android"]),
        )
        .unwrap();
        assert_eq!(
            flags.get("platform"),
            Some(&Value::List(vec!["ios".into(), "android".into()]))
        );
    }

    #[test]
    fn positionals_are_ignored() {
        let flags = tokenize(
            "haul start",
            &schema(),
            &args(&["extra", "--dev", "false"]),
        )
        .unwrap();
        assert_eq!(flags.len(), 1);
        assert_eq!(flags.get("dev"), Some(&Value::text("false")));
    }

    #[test]
    fn undeclared_flags_are_ignored() {
        let flags = tokenize(
            "haul start",
            &schema(),
            &args(&["--reset-cache", "--nope", "1", "-x", "--verbose=2", "--platform", "ios"]),
        )
        .unwrap();
        assert_eq!(flags.len(), 1);
        assert_eq!(flags.get("platform"), Some(&Value::text("ios")));
    }

    #[test]
    fn negated_flag_is_false() {
        let flags = tokenize("haul start", &schema(), &args(&["--no-dev", "--no-cache"])).unwrap();
        assert_eq!(flags.len(), 1);
        assert_eq!(flags.get("dev"), Some(&Value::text("false")));
    }

    #[test]
    fn dash_values_and_empty_inline_values() {
        let flags = tokenize(
            "haul bundle",
            &schema(),
            &args(&["--bundle-output", "-", "--dev="]),
        )
        .unwrap();
        assert_eq!(flags.get("bundle_output"), Some(&Value::text("-")));
        assert_eq!(flags.get("dev"), Some(&Value::text("")));
    }

    #[test]
    fn empty_args_yield_no_flags() {
        let flags = tokenize("haul start", &schema(), &[]).unwrap();
        assert!(flags.is_empty());
    }
}
