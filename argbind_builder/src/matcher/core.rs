use std::collections::{HashMap, HashSet};

use crate::constant::*;
use crate::matcher::model::*;
use crate::matcher::normalize::*;
use crate::model::Normalized;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The raw values seen for each declaration during a single parse.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ParseContext {
    values: HashMap<Identity, Vec<String>>,
}

impl ParseContext {
    fn push(&mut self, identity: Identity, value: &str) {
        self.values
            .entry(identity)
            .or_default()
            .push(value.to_string());
    }

    pub(crate) fn values(&self, identity: Identity) -> &[String] {
        self.values
            .get(&identity)
            .map(|values| values.as_slice())
            .unwrap_or(&[])
    }

    pub(crate) fn occurrences(&self, identity: Identity) -> usize {
        self.values(identity).len()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Matches {
    pub context: ParseContext,
    pub leftover: Option<Vec<String>>,
}

impl OptionConfig {
    /// Claim the flag/value pair at the head of `window`, returning how many tokens were consumed.
    ///
    /// The window must be normalized: a declared flag is always followed by its value.
    fn claim(
        &self,
        identity: Identity,
        window: &[String],
        context: &mut ParseContext,
    ) -> Option<usize> {
        match window {
            [flag, ..] if !self.flags().contains(flag) => None,
            [_, value, ..] => {
                context.push(identity, value);
                Some(2)
            }
            [flag] => unreachable!("internal error - normalized flag '{flag}' has no value"),
            [] => None,
        }
    }
}

impl ArgumentConfig {
    /// Claim the positional token at the head of `window`, returning how many tokens were consumed.
    fn claim(
        &self,
        identity: Identity,
        window: &[String],
        positional_only: bool,
        context: &mut ParseContext,
    ) -> Option<usize> {
        let token = window.first()?;

        if !positional_only && token != STDIN && token.starts_with(PREFIX) {
            return None;
        }

        if self.bound().admits(context.occurrences(identity)) {
            context.push(identity, token);
            Some(1)
        } else {
            None
        }
    }
}

/// Holds the declarations of a single command scope, and walks normalized tokens against them.
#[derive(Debug, Default)]
pub(crate) struct TokenMatcher {
    options: OptionIndex,
    arguments: Vec<ArgumentConfig>,
    argument_names: HashSet<String>,
}

impl TokenMatcher {
    pub(crate) fn add_option(
        &mut self,
        option_config: OptionConfig,
    ) -> Result<Identity, TokenMatcherError> {
        self.options.insert(option_config).map(Identity::Opt)
    }

    pub(crate) fn add_argument(
        &mut self,
        argument_config: ArgumentConfig,
    ) -> Result<Identity, TokenMatcherError> {
        if !self
            .argument_names
            .insert(argument_config.name().to_string())
        {
            return Err(TokenMatcherError::DuplicateArgument(
                argument_config.name().to_string(),
            ));
        }

        let identity = Identity::Arg(self.arguments.len());
        self.arguments.push(argument_config);
        Ok(identity)
    }

    /// Describe the declaration behind `identity`, as used in error messages.
    pub(crate) fn describe(&self, identity: Identity) -> String {
        match identity {
            Identity::Opt(index) => self.options.get(index).to_string(),
            Identity::Arg(index) => self.arguments[index].to_string(),
        }
    }

    pub(crate) fn normalize(&self, tokens: &[&str]) -> Result<Normalized, NormalizeError> {
        Normalizer::new(&self.options).normalize(tokens)
    }

    /// Walk the normalized tokens left to right, in a single pass.
    ///
    /// Options are tried first (by exact flag token), then the arguments in declaration order.
    /// Matching stops at the first token that nothing claims.
    /// The tokens must come from [`TokenMatcher::normalize`].
    pub(crate) fn consume(&self, tokens: &[String]) -> Matches {
        let mut context = ParseContext::default();
        let mut position = 0;
        let mut positional_only = false;

        while position < tokens.len() {
            let window = &tokens[position..];

            if !positional_only && window[0] == END_OF_OPTIONS {
                positional_only = true;
                position += 1;
                continue;
            }

            match self.claim(window, positional_only, &mut context) {
                Some(consumed) => {
                    position += consumed;
                }
                None => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Token '{t}' is unclaimed, stopping.", t = window[0]);
                    }

                    return Matches {
                        context,
                        leftover: Some(window.to_vec()),
                    };
                }
            }
        }

        Matches {
            context,
            leftover: None,
        }
    }

    fn claim(
        &self,
        window: &[String],
        positional_only: bool,
        context: &mut ParseContext,
    ) -> Option<usize> {
        if !positional_only {
            if let Some((index, option_config)) = self.options.by_flag(&window[0]) {
                let consumed = option_config.claim(Identity::Opt(index), window, context);

                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Option '{option_config}' claimed {consumed:?} token(s).");
                }

                return consumed;
            }
        }

        for (index, argument_config) in self.arguments.iter().enumerate() {
            if let Some(consumed) =
                argument_config.claim(Identity::Arg(index), window, positional_only, context)
            {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Argument '{argument_config}' claimed '{t}'.", t = window[0]);
                }

                return Some(consumed);
            }
        }

        None
    }

    pub(crate) fn option_count(&self) -> usize {
        self.options.len()
    }

    pub(crate) fn argument_count(&self) -> usize {
        self.arguments.len()
    }
}
