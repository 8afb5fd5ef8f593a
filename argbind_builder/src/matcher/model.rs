use std::collections::HashMap;
use thiserror::Error;

use crate::constant::*;

/// Identifies a declaration within a single command scope.
/// Options and arguments are each numbered in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Identity {
    Opt(usize),
    Arg(usize),
}

/// How many tokens an argument may claim during a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Bound {
    AtMost(usize),
    Unbounded,
}

impl Bound {
    pub(crate) fn admits(&self, claimed: usize) -> bool {
        match self {
            Bound::AtMost(n) => claimed < *n,
            Bound::Unbounded => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OptionConfig {
    flags: Vec<String>,
    boolean: bool,
}

impl OptionConfig {
    /// `flags` are the full flag tokens, including their prefix (ex: `-v`, `--verbose`).
    pub(crate) fn new(flags: Vec<String>, boolean: bool) -> Self {
        Self { flags, boolean }
    }

    pub(crate) fn flags(&self) -> &[String] {
        &self.flags
    }

    pub(crate) fn is_boolean(&self) -> bool {
        self.boolean
    }

    pub(crate) fn shorts(&self) -> impl Iterator<Item = char> + '_ {
        self.flags.iter().filter_map(|flag| short_of(flag))
    }
}

impl std::fmt::Display for OptionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.flags.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ArgumentConfig {
    name: String,
    bound: Bound,
}

impl ArgumentConfig {
    pub(crate) fn new(name: impl Into<String>, bound: Bound) -> Self {
        Self {
            name: name.into(),
            bound,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn bound(&self) -> Bound {
        self.bound
    }
}

impl std::fmt::Display for ArgumentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The single character of a short flag token (ex: `-v` -> `v`).
pub(crate) fn short_of(flag: &str) -> Option<char> {
    if flag.starts_with(LONG_PREFIX) {
        return None;
    }

    let mut chars = flag.strip_prefix(PREFIX)?.chars();
    match (chars.next(), chars.next()) {
        (Some(single), None) => Some(single),
        _ => None,
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum TokenMatcherError {
    #[error("Cannot duplicate the option '{0}'.")]
    DuplicateOption(String),

    #[error("Cannot duplicate the short option '{0}'.")]
    DuplicateShortOption(char),

    #[error("Cannot duplicate the argument '{0}'.")]
    DuplicateArgument(String),
}

/// The declared options of a command scope, indexed by flag token and by short name.
#[derive(Debug, Default)]
pub(crate) struct OptionIndex {
    options: Vec<OptionConfig>,
    flags: HashMap<String, usize>,
    shorts: HashMap<char, usize>,
}

impl OptionIndex {
    pub(crate) fn insert(&mut self, option_config: OptionConfig) -> Result<usize, TokenMatcherError> {
        let index = self.options.len();
        let mut seen: Vec<&str> = Vec::default();

        // Validate every flag before inserting any of them, so a rejected option leaves no trace.
        for flag in option_config.flags() {
            if self.flags.contains_key(flag) || seen.contains(&flag.as_str()) {
                return Err(match short_of(flag) {
                    Some(short) => TokenMatcherError::DuplicateShortOption(short),
                    None => TokenMatcherError::DuplicateOption(
                        flag.trim_start_matches(PREFIX).to_string(),
                    ),
                });
            }

            seen.push(flag);
        }

        for flag in option_config.flags() {
            self.flags.insert(flag.clone(), index);
        }

        for short in option_config.shorts() {
            self.shorts.insert(short, index);
        }

        self.options.push(option_config);
        Ok(index)
    }

    pub(crate) fn len(&self) -> usize {
        self.options.len()
    }

    pub(crate) fn get(&self, index: usize) -> &OptionConfig {
        &self.options[index]
    }

    pub(crate) fn by_flag(&self, flag: &str) -> Option<(usize, &OptionConfig)> {
        self.flags
            .get(flag)
            .map(|index| (*index, &self.options[*index]))
    }

    pub(crate) fn by_short(&self, short: char) -> Option<(usize, &OptionConfig)> {
        self.shorts
            .get(&short)
            .map(|index| (*index, &self.options[*index]))
    }
}
