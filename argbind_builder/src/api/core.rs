use std::env;

use crate::api::parameter::{Declaration, ParameterClass};
use crate::api::{Bindable, Handle, Parameter};
use crate::matcher::NormalizeError;
use crate::model::{Normalized, Outcome};
use crate::parser::{initialize, ConfigError, ParseError, Parser, ProcessEnvironment};
use crate::prelude::Environment;

/// The command line parser: a registry of options and arguments for a single command scope.
///
/// ### Example
/// ```
/// # use argbind_builder as argbind;
/// use argbind::{CommandLineParser, Outcome};
///
/// let mut parser = CommandLineParser::new("program");
/// // Declare with CommandLineParser::add.
/// assert_eq!(parser.parse_tokens(&[]).unwrap(), Outcome::Complete);
/// ```
pub struct CommandLineParser {
    program: String,
    environment: Box<dyn Environment>,
    parser: Parser,
    declarations: Vec<Declaration>,
}

impl std::fmt::Debug for CommandLineParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandLineParser")
            .field("program", &self.program)
            .field("declarations", &self.declarations)
            .finish()
    }
}

impl CommandLineParser {
    /// Create a command line parser which reads environment variables from the running process.
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_environment(program, ProcessEnvironment)
    }

    /// Create a command line parser which reads environment variables from `environment`.
    ///
    /// ### Example
    /// ```
    /// # use argbind_builder as argbind;
    /// use argbind::{CommandLineParser, Parameter};
    ///
    /// let environment = vec![("NAMES".to_string(), "x,y".to_string())];
    /// let mut parser = CommandLineParser::with_environment("program", environment);
    /// let names = parser
    ///     .add(Parameter::option("n name", Vec::<String>::default()).env("NAMES"))
    ///     .unwrap();
    ///
    /// assert_eq!(names.get(), vec!["x", "y"]);
    /// ```
    pub fn with_environment(
        program: impl Into<String>,
        environment: impl Environment + 'static,
    ) -> Self {
        Self {
            program: program.into(),
            environment: Box::new(environment),
            parser: Parser::default(),
            declarations: Vec::default(),
        }
    }

    /// The program name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The declarations, in the order they were added.
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Add an argument/option to the command line parser, returning the handle to its destination.
    ///
    /// The destination is created right away, holding the default value (or the environment override).
    /// The order of argument parameters corresponds to their positional order during parsing.
    /// The order of option parameters does not affect the parser semantics.
    ///
    /// Fails when a name is invalid, or already declared in this parser.
    ///
    /// ### Example
    /// ```
    /// # use argbind_builder as argbind;
    /// use argbind::{CommandLineParser, ConfigError, Parameter};
    ///
    /// let mut parser = CommandLineParser::new("program");
    /// let a = parser.add(Parameter::argument("a", 0i64)).unwrap();
    /// let b = parser.add(Parameter::argument("b", 0i64)).unwrap();
    /// assert_eq!(
    ///     parser.add(Parameter::argument("a", false)).unwrap_err(),
    ///     ConfigError::DuplicateArgument("a".to_string())
    /// );
    ///
    /// parser.parse_tokens(&["1", "2"]).unwrap();
    ///
    /// assert_eq!(a.get(), 1);
    /// assert_eq!(b.get(), 2);
    /// ```
    pub fn add<T: Bindable>(&mut self, parameter: Parameter<T>) -> Result<Handle<T>, ConfigError> {
        let inner = parameter.consume();
        let mut declaration = Declaration::from(&inner);

        match inner.class {
            ParameterClass::Opt => {
                let option_config = inner.option_config()?;
                declaration.names = option_config.flags().to_vec();
                let handle = self.materialize(inner.default, &inner.env);
                self.parser
                    .add_option(option_config, Box::new(handle.clone()))?;
                self.declarations.push(declaration);
                Ok(handle)
            }
            ParameterClass::Arg => {
                let argument_config = inner.argument_config()?;
                declaration.names = vec![argument_config.name().to_string()];
                let handle = self.materialize(inner.default, &inner.env);
                self.parser
                    .add_argument(argument_config, Box::new(handle.clone()))?;
                self.declarations.push(declaration);
                Ok(handle)
            }
        }
    }

    fn materialize<T: Bindable>(&self, default: T, variables: &[String]) -> Handle<T> {
        let (value, source) = initialize(&*self.environment, variables, default);
        Handle::new(value, source)
    }

    /// Rewrite the tokens so each option is a flag token immediately followed by exactly one value token.
    /// Combined short option clusters are expanded (ex: `-ab` becomes `-a true -b true`).
    ///
    /// ### Example
    /// ```
    /// # use argbind_builder as argbind;
    /// use argbind::{CommandLineParser, Parameter};
    ///
    /// let mut parser = CommandLineParser::new("program");
    /// parser.add(Parameter::option("a", false)).unwrap();
    /// parser.add(Parameter::option("b", String::default())).unwrap();
    ///
    /// let normalized = parser.normalize(&["-ab", "test", "ab"]).unwrap();
    /// assert_eq!(normalized.tokens, vec!["-a", "true", "-b", "test", "ab"]);
    /// assert_eq!(normalized.consumed, 3);
    /// ```
    pub fn normalize(&self, tokens: &[&str]) -> Result<Normalized, NormalizeError> {
        self.parser.normalize(tokens)
    }

    /// Run the command line parser against the input tokens.
    ///
    /// Parsing happens in three phases:
    /// 1. Normalization expands option clusters into flag/value pairs.
    /// 2. Token matching aligns the tokens to options (by flag) and arguments (by position), as raw strings.
    /// Matching is single pass and stops at the first token nothing claims.
    /// 3. Binding converts the raw strings into each destination.
    /// This phase will actually mutate the destinations behind your handles.
    ///
    /// Unclaimed tokens are not an error: they are returned as [`Outcome::Leftover`] for the caller to classify.
    /// After an error, destinations may be partially updated; treat the whole parse as invalid.
    ///
    /// ### Example
    /// ```
    /// # use argbind_builder as argbind;
    /// use argbind::{CommandLineParser, Outcome, Parameter};
    ///
    /// let mut parser = CommandLineParser::new("program");
    /// let tags = parser.add(Parameter::option("t tag", Vec::<String>::default())).unwrap();
    ///
    /// let outcome = parser.parse_tokens(&["-t", "x", "--tag=y", "extra"]).unwrap();
    ///
    /// assert_eq!(tags.get(), vec!["x", "y"]);
    /// assert_eq!(outcome, Outcome::Leftover(vec!["extra".to_string()]));
    /// ```
    pub fn parse_tokens(&mut self, tokens: &[&str]) -> Result<Outcome, ParseError> {
        self.parser.consume(tokens)
    }

    /// Run the command line parser against the process arguments ([`std::env::args`], skipping the program name).
    /// See [`CommandLineParser::parse_tokens`] for details.
    pub fn parse(&mut self) -> Result<Outcome, ParseError> {
        let command_input: Vec<String> = env::args().skip(1).collect();
        let tokens: Vec<&str> = command_input.iter().map(AsRef::as_ref).collect();
        self.parse_tokens(tokens.as_slice())
    }
}
