use crate::api::Bindable;
use crate::constant::*;
use crate::matcher::{ArgumentConfig, Bound, OptionConfig};
use crate::model::{Kind, Value};
use crate::parser::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ParameterClass {
    Opt,
    Arg,
}

/// An option/argument declaration, to be [`add`](./struct.CommandLineParser.html#method.add)ed to a [`CommandLineParser`](./struct.CommandLineParser.html).
///
/// The type `T` of the default value selects the kind of the destination:
/// `bool`, `String`, `i64`, `Vec<String>` or `Vec<i64>`.
pub struct Parameter<T> {
    class: ParameterClass,
    names: String,
    default: T,
    help: Option<String>,
    env: Vec<String>,
}

impl<T: Bindable> Parameter<T> {
    /// Declare an option.
    ///
    /// `names` is a whitespace separated list of names, each with or without their leading dashes.
    /// Single character names become short flags (`-v`), longer names become long flags (`--verbose`).
    /// Boolean options do not need a value on the command line (`-v` means `-v true`).
    ///
    /// ### Example
    /// ```
    /// # use argbind_builder as argbind;
    /// use argbind::{CommandLineParser, Parameter};
    ///
    /// let mut parser = CommandLineParser::new("program");
    /// let verbose = parser.add(Parameter::option("v verbose", false)).unwrap();
    /// let level = parser.add(Parameter::option("-l --level", 1i64)).unwrap();
    ///
    /// parser.parse_tokens(&["-vl3"]).unwrap();
    ///
    /// assert!(verbose.get());
    /// assert_eq!(level.get(), 3);
    /// ```
    pub fn option(names: impl Into<String>, default: T) -> Self {
        Self::new(ParameterClass::Opt, names, default)
    }

    /// Declare a positional argument.
    ///
    /// Arguments claim the non-option tokens in declaration order.
    /// Scalar arguments claim at most one token, list arguments claim every token offered to them.
    ///
    /// ### Example
    /// ```
    /// # use argbind_builder as argbind;
    /// use argbind::{CommandLineParser, Parameter};
    ///
    /// let mut parser = CommandLineParser::new("program");
    /// let first = parser.add(Parameter::argument("FIRST", String::default())).unwrap();
    /// let rest = parser.add(Parameter::argument("REST", Vec::<i64>::default())).unwrap();
    ///
    /// parser.parse_tokens(&["a", "1", "2"]).unwrap();
    ///
    /// assert_eq!(first.get(), "a");
    /// assert_eq!(rest.get(), vec![1, 2]);
    /// ```
    pub fn argument(name: impl Into<String>, default: T) -> Self {
        Self::new(ParameterClass::Arg, name, default)
    }

    fn new(class: ParameterClass, names: impl Into<String>, default: T) -> Self {
        Self {
            class,
            names: names.into(),
            default,
            help: None,
            env: Vec::default(),
        }
    }

    /// Document the help message for this parameter.
    /// If repeated, only the final help message will apply.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.help.replace(description.into());
        self
    }

    /// Declare environment variables (a whitespace separated list of names) that override the default.
    /// If repeated, the variables accumulate.
    ///
    /// The first variable that is set and converts to the parameter's kind wins.
    /// List kinds read a comma separated value.
    ///
    /// ### Example
    /// ```
    /// # use argbind_builder as argbind;
    /// use argbind::{CommandLineParser, Parameter, Source};
    /// use std::collections::HashMap;
    ///
    /// let environment = HashMap::from([("RETRIES".to_string(), "3".to_string())]);
    /// let mut parser = CommandLineParser::with_environment("program", environment);
    /// let retries = parser
    ///     .add(Parameter::option("retries", 0i64).env("APP_RETRIES RETRIES"))
    ///     .unwrap();
    ///
    /// assert_eq!(retries.get(), 3);
    /// assert_eq!(retries.source(), Source::Environment("RETRIES".to_string()));
    /// ```
    pub fn env(mut self, variables: impl AsRef<str>) -> Self {
        self.env
            .extend(variables.as_ref().split_whitespace().map(str::to_string));
        self
    }

    pub(super) fn consume(self) -> ParameterInner<T> {
        let Parameter {
            class,
            names,
            default,
            help,
            env,
        } = self;
        ParameterInner {
            class,
            names,
            default,
            help,
            env,
        }
    }
}

pub(super) struct ParameterInner<T> {
    pub(super) class: ParameterClass,
    pub(super) names: String,
    pub(super) default: T,
    pub(super) help: Option<String>,
    pub(super) env: Vec<String>,
}

impl<T: Bindable> std::fmt::Debug for Parameter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let class = match &self.class {
            ParameterClass::Opt => "Opt",
            ParameterClass::Arg => "Arg",
        };
        let help = if let Some(d) = &self.help {
            format!(", {d}")
        } else {
            "".to_string()
        };
        let env = if self.env.is_empty() {
            "".to_string()
        } else {
            format!(", ${}", self.env.join(" $"))
        };

        write!(
            f,
            "{class}[{kind}, {names}, {default}{env}{help}]",
            kind = T::KIND,
            names = self.names,
            default = self.default.to_value(),
        )
    }
}

impl<T: Bindable> ParameterInner<T> {
    pub(super) fn option_config(&self) -> Result<OptionConfig, ConfigError> {
        let flags = option_flags(&self.names)?;
        Ok(OptionConfig::new(flags, T::KIND == Kind::Bool))
    }

    pub(super) fn argument_config(&self) -> Result<ArgumentConfig, ConfigError> {
        let bound = if T::KIND.is_list() {
            Bound::Unbounded
        } else {
            Bound::AtMost(1)
        };
        Ok(ArgumentConfig::new(argument_name(&self.names)?, bound))
    }
}

/// The flag tokens for a whitespace separated list of option names.
fn option_flags(names: &str) -> Result<Vec<String>, ConfigError> {
    let flags = names
        .split_whitespace()
        .map(|name| {
            let bare = name
                .strip_prefix(LONG_PREFIX)
                .or_else(|| name.strip_prefix(PREFIX))
                .unwrap_or(name);

            if bare.is_empty() || bare.starts_with(PREFIX) || bare.contains(VALUE_DELIMITER) {
                return Err(ConfigError::InvalidName(name.to_string()));
            }

            if bare.chars().count() == 1 {
                Ok(format!("{PREFIX}{bare}"))
            } else {
                Ok(format!("{LONG_PREFIX}{bare}"))
            }
        })
        .collect::<Result<Vec<String>, ConfigError>>()?;

    if flags.is_empty() {
        Err(ConfigError::EmptyNames)
    } else {
        Ok(flags)
    }
}

fn argument_name(name: &str) -> Result<String, ConfigError> {
    let trimmed = name.trim();

    if trimmed.is_empty() || trimmed.starts_with(PREFIX) || trimmed.contains(char::is_whitespace)
    {
        Err(ConfigError::InvalidName(name.to_string()))
    } else {
        Ok(trimmed.to_string())
    }
}

/// A read-only description of a declaration, for rendering help or documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// `true` for options, `false` for positional arguments.
    pub option: bool,
    /// The flag tokens of an option (ex: `["-v", "--verbose"]`), or the single argument name.
    pub names: Vec<String>,
    /// The destination kind.
    pub kind: Kind,
    /// The help message.
    pub help: Option<String>,
    /// The environment variables consulted for the initial value.
    pub env: Vec<String>,
    /// The declared default value (before any environment override).
    pub default: Value,
}

impl<T: Bindable> From<&ParameterInner<T>> for Declaration {
    fn from(value: &ParameterInner<T>) -> Self {
        Declaration {
            option: value.class == ParameterClass::Opt,
            names: Vec::default(),
            kind: T::KIND,
            help: value.help.clone(),
            env: value.env.clone(),
            default: value.default.to_value(),
        }
    }
}
