//! Declarative option schemas for subcommands.
//!
//! An [`OptionDefinition`] carries no behaviour beyond the pure `default`
//! and `parse` functions supplied by whoever declares it. Schemas are built
//! once at start-up with the builder methods below and never mutated.

use std::fmt;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Dynamically typed option value.
///
/// Raw values coming from the command line are always [`Value::Text`] or,
/// for repeated flags, [`Value::List`]. Defaults and `parse` functions may
/// produce any variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Integer(i64),
    Text(String),
    List(Vec<String>),
}

impl Value {
    /// Build a text value.
    pub fn text<S: Into<String>>(value: S) -> Self {
        Value::Text(value.into())
    }

    /// Whether the value counts as unset for default and required checks.
    ///
    /// Only empty text and empty lists are unset; `false` and `0` are
    /// explicit values.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Text(text) => text.is_empty(),
            Value::List(items) => items.is_empty(),
            Value::Bool(_) | Value::Integer(_) => false,
        }
    }

    /// Borrow the text of a [`Value::Text`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The flag of a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// The number of a [`Value::Integer`].
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(number) => Some(*number),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(flag) => write!(f, "{flag}"),
            Value::Integer(number) => write!(f, "{number}"),
            Value::Text(text) => write!(f, "{text}"),
            Value::List(items) => write!(f, "{}", items.join(",")),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

/// One accepted value for an option with a closed set of choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    /// Exact text the flag must carry.
    pub value: &'static str,
    pub description: &'static str,
}

impl Choice {
    /// Choice with a one-line help description.
    pub const fn new(value: &'static str, description: &'static str) -> Self {
        Self { value, description }
    }
}

/// Computes a default from the options resolved before this one.
pub type DeriveFn = fn(&Config) -> Option<Value>;

/// Turns a resolved value into its final typed form.
pub type ParseFn = fn(Value) -> Result<Value>;

/// Default value of an option.
#[derive(Debug, Clone)]
pub enum DefaultValue {
    /// Fixed value, shown in help.
    Literal(Value),
    /// Computed from earlier options; not shown in help.
    Derived(DeriveFn),
}

impl DefaultValue {
    /// Evaluate the default against the configuration resolved so far.
    pub fn resolve(&self, resolved: &Config) -> Option<Value> {
        match self {
            DefaultValue::Literal(value) => Some(value.clone()),
            DefaultValue::Derived(derive) => derive(resolved),
        }
    }
}

/// Describes one flag accepted by a subcommand.
#[derive(Debug, Clone)]
pub struct OptionDefinition {
    /// Config key, in `snake_case`. The flag is its kebab-case form.
    pub name: &'static str,
    /// One-line help text.
    pub description: &'static str,
    /// Fail when neither the flag nor the default yields a value.
    pub required: bool,
    pub default: Option<DefaultValue>,
    /// Closed set of accepted values; `None` accepts anything.
    pub choices: Option<Vec<Choice>>,
    /// Applied after the choice check.
    pub parse: Option<ParseFn>,
}

impl OptionDefinition {
    /// Optional option with no default, choices or parser.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            description: "",
            required: false,
            default: None,
            choices: None,
            parse: None,
        }
    }

    /// Set the help text.
    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Mark the option as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Use a fixed default.
    pub fn with_default<V: Into<Value>>(mut self, value: V) -> Self {
        self.default = Some(DefaultValue::Literal(value.into()));
        self
    }

    /// Compute the default from options declared earlier.
    pub fn with_derived_default(mut self, derive: DeriveFn) -> Self {
        self.default = Some(DefaultValue::Derived(derive));
        self
    }

    /// Restrict the value to `choices`, kept in the given order.
    pub fn with_choices<I: IntoIterator<Item = Choice>>(mut self, choices: I) -> Self {
        self.choices = Some(choices.into_iter().collect());
        self
    }

    /// Convert the resolved value with `parse`.
    pub fn with_parser(mut self, parse: ParseFn) -> Self {
        self.parse = Some(parse);
        self
    }

    /// Long command-line flag without the leading dashes (`bundle-output`).
    pub fn flag(&self) -> String {
        self.name.replace('_', "-")
    }

    /// camelCase spelling accepted as an alias (`bundleOutput`).
    pub fn camel_case_flag(&self) -> String {
        let mut out = String::with_capacity(self.name.len());
        let mut upper_next = false;
        for ch in self.name.chars() {
            if ch == '_' || ch == '-' {
                upper_next = true;
            } else if upper_next {
                out.push(ch.to_ascii_uppercase());
                upper_next = false;
            } else {
                out.push(ch);
            }
        }
        out
    }

    /// Whether `value` is listed among the declared choices.
    ///
    /// Always true when the option declares no choices.
    pub fn accepts(&self, value: &Value) -> bool {
        match &self.choices {
            None => true,
            Some(choices) => value
                .as_str()
                .is_some_and(|raw| choices.iter().any(|choice| choice.value == raw)),
        }
    }

    /// Choice values in declaration order.
    pub fn choice_values(&self) -> Vec<String> {
        self.choices
            .iter()
            .flatten()
            .map(|choice| choice.value.to_string())
            .collect()
    }
}

/// Stock `parse` functions for schema authors.
pub mod parse {
    use super::*;

    /// Anything but the literal `false` (and `0`/`no`) is true.
    pub fn boolean(value: Value) -> Result<Value> {
        match value {
            Value::Bool(_) => Ok(value),
            Value::Text(text) => {
                let flag = !matches!(text.to_ascii_lowercase().as_str(), "false" | "0" | "no");
                Ok(Value::Bool(flag))
            }
            Value::Integer(number) => Ok(Value::Bool(number != 0)),
            Value::List(_) => Err(anyhow!("expected a single boolean, got '{}'", value)),
        }
    }

    /// Decimal `i64`, surrounding whitespace allowed.
    pub fn integer(value: Value) -> Result<Value> {
        match value {
            Value::Integer(_) => Ok(value),
            Value::Text(text) => text
                .trim()
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| anyhow!("'{}' is not a number", text)),
            other => Err(anyhow!("expected a number, got '{}'", other)),
        }
    }

    /// TCP port in `1..=65535`.
    pub fn port(value: Value) -> Result<Value> {
        let parsed = integer(value)?;
        match parsed.as_integer() {
            Some(number) if (1..=65535).contains(&number) => Ok(parsed),
            _ => Err(anyhow!("port {} is out of range 1..65535", parsed)),
        }
    }

    /// Pass the value through unchanged.
    pub fn identity(value: Value) -> Result<Value> {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_values_are_text_and_lists_only() {
        assert!(Value::text("").is_empty());
        assert!(Value::List(Vec::new()).is_empty());
        assert!(!Value::Bool(false).is_empty());
        assert!(!Value::Integer(0).is_empty());
        assert!(!Value::text("x").is_empty());
    }

    #[test]
    fn typed_accessors_match_only_their_variant() {
        assert_eq!(Value::text("ios").as_str(), Some("ios"));
        assert_eq!(Value::Bool(true).as_str(), None);
        assert_eq!(Value::Bool(false).as_bool(), Some(false));
        assert_eq!(Value::text("false").as_bool(), None);
        assert_eq!(Value::Integer(0).as_integer(), Some(0));
        assert_eq!(Value::List(vec!["1".into()]).as_integer(), None);
    }

    #[test]
    fn flag_spellings() {
        let option = OptionDefinition::new("bundle_output");
        assert_eq!(option.flag(), "bundle-output");
        assert_eq!(option.camel_case_flag(), "bundleOutput");
        assert_eq!(OptionDefinition::new("dev").camel_case_flag(), "dev");
    }

    #[test]
    fn accepts_only_declared_choices() {
        let option = OptionDefinition::new("mode")
            .with_choices([Choice::new("a", ""), Choice::new("b", "")]);
        assert!(option.accepts(&Value::text("a")));
        assert!(!option.accepts(&Value::text("c")));
        assert!(!option.accepts(&Value::List(vec!["a".into()])));
        assert!(OptionDefinition::new("free").accepts(&Value::text("anything")));
    }

    #[test]
    fn boolean_parser_treats_false_spellings_as_false() {
        assert_eq!(parse::boolean(Value::text("false")).unwrap(), Value::Bool(false));
        assert_eq!(parse::boolean(Value::text("FALSE")).unwrap(), Value::Bool(false));
        assert_eq!(parse::boolean(Value::text("true")).unwrap(), Value::Bool(true));
        assert_eq!(parse::boolean(Value::Bool(false)).unwrap(), Value::Bool(false));
    }

    #[test]
    fn port_parser_rejects_garbage_and_out_of_range() {
        assert_eq!(parse::port(Value::text("8081")).unwrap(), Value::Integer(8081));
        assert!(parse::port(Value::text("eighty")).is_err());
        assert!(parse::port(Value::text("70000")).is_err());
        assert!(parse::port(Value::text("0")).is_err());
    }

    #[test]
    fn derived_default_sees_resolved_config() {
        let default = DefaultValue::Derived(|config| {
            config.get_str("name").map(|name| Value::text(format!("{name}.bundle")))
        });
        let config = Config::default().with("name", Value::text("app"));
        assert_eq!(default.resolve(&config), Some(Value::text("app.bundle")));
        assert_eq!(default.resolve(&Config::default()), None);
    }
}
