use thiserror::Error;

use crate::api::InvalidCapture;
use crate::matcher::*;
use crate::model::{Kind, Normalized, Outcome};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A declaration was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No names were given for an option.
    #[error("Config error: an option requires at least one name.")]
    EmptyNames,

    /// The name cannot be used as a flag/argument name.
    #[error("Config error: invalid name '{0}'.")]
    InvalidName(String),

    /// The long name is already declared.
    #[error("Config error: cannot duplicate the option '{0}'.")]
    DuplicateOption(String),

    /// The short name is already declared.
    #[error("Config error: cannot duplicate the short option '{0}'.")]
    DuplicateShortOption(char),

    /// The argument name is already declared.
    #[error("Config error: cannot duplicate the argument '{0}'.")]
    DuplicateArgument(String),
}

impl From<TokenMatcherError> for ConfigError {
    fn from(error: TokenMatcherError) -> Self {
        match error {
            TokenMatcherError::DuplicateOption(name) => ConfigError::DuplicateOption(name),
            TokenMatcherError::DuplicateShortOption(short) => {
                ConfigError::DuplicateShortOption(short)
            }
            TokenMatcherError::DuplicateArgument(name) => ConfigError::DuplicateArgument(name),
        }
    }
}

/// A parse was rejected.
///
/// There is no rollback: destinations bound before the error keep their new values.
/// Treat any error as invalidating the whole parse.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The tokens could not be normalized.
    #[error("Parse error: {0}")]
    Normalize(#[from] NormalizeError),

    /// A value could not be converted for its destination.
    #[error("Parse error: '{token}' cannot convert to {kind} for '{destination}'.")]
    InvalidConversion {
        /// The option flags (ex: `-v, --verbose`) or argument name.
        destination: String,
        /// The raw token.
        token: String,
        /// The expected kind.
        kind: Kind,
    },
}

/// Behaviour to capture an implicit generic type T from an input `&str`.
///
/// We use this at the middle/top of the parser object graph so that different types may all be 'captured' in a single parser.
pub(crate) trait AnonymousCapturable {
    fn kind(&self) -> Kind;

    /// Declare that a new parse is starting.
    fn begin(&mut self);

    /// Capture a value anonymously for this parameter.
    fn capture(&mut self, value: &str) -> Result<(), InvalidCapture>;
}


/// The registry of a single command scope: declarations plus their destinations.
#[derive(Default)]
pub(crate) struct Parser {
    token_matcher: TokenMatcher,
    option_captures: Vec<Box<dyn AnonymousCapturable>>,
    argument_captures: Vec<Box<dyn AnonymousCapturable>>,
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser{..}").finish()
    }
}

impl Parser {
    pub(crate) fn add_option(
        &mut self,
        option_config: OptionConfig,
        capture: Box<dyn AnonymousCapturable>,
    ) -> Result<(), ConfigError> {
        self.token_matcher.add_option(option_config)?;
        self.option_captures.push(capture);
        Ok(())
    }

    pub(crate) fn add_argument(
        &mut self,
        argument_config: ArgumentConfig,
        capture: Box<dyn AnonymousCapturable>,
    ) -> Result<(), ConfigError> {
        self.token_matcher.add_argument(argument_config)?;
        self.argument_captures.push(capture);
        Ok(())
    }

    pub(crate) fn normalize(&self, tokens: &[&str]) -> Result<Normalized, NormalizeError> {
        self.token_matcher.normalize(tokens)
    }

    pub(crate) fn consume(&mut self, tokens: &[&str]) -> Result<Outcome, ParseError> {
        // 1. Expand the raw tokens into flag/value pairs.
        let normalized = self.token_matcher.normalize(tokens)?;
        // 2. Align the tokens to options/arguments, still as raw strings.
        let matches = self.token_matcher.consume(&normalized.tokens);

        // 3. Convert each raw value into its destination, in declaration order.
        debug_assert_eq!(self.option_captures.len(), self.token_matcher.option_count());
        debug_assert_eq!(
            self.argument_captures.len(),
            self.token_matcher.argument_count()
        );
        let identities = (0..self.option_captures.len())
            .map(Identity::Opt)
            .chain((0..self.argument_captures.len()).map(Identity::Arg));

        for identity in identities {
            let token_matcher = &self.token_matcher;
            let capture = match identity {
                Identity::Opt(index) => &mut self.option_captures[index],
                Identity::Arg(index) => &mut self.argument_captures[index],
            };
            capture.begin();

            for value in matches.context.values(identity) {
                capture
                    .capture(value)
                    .map_err(|error| ParseError::InvalidConversion {
                        destination: token_matcher.describe(identity),
                        token: error.token,
                        kind: capture.kind(),
                    })?;
            }
        }

        match matches.leftover {
            None => Ok(Outcome::Complete),
            Some(leftover) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Parse finished with {n} leftover token(s).", n = leftover.len());
                }

                Ok(Outcome::Leftover(leftover))
            }
        }
    }
}
