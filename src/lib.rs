//! `argbind` declares typed command line options and arguments, and binds them from raw tokens.
//!
//! It covers the *parse into variables* part of a command line program, and intentionally nothing more.
//! Specifically, `argbind` prioritizes the following design concerns:
//! * *Typed destinations*:
//! Each declaration produces a [`Handle`] to a destination of a fixed kind (`bool`, `String`, `i64`, `Vec<String>`, `Vec<i64>`).
//! The user should not call any `&str -> T` conversion functions directly.
//! * *Environment fallbacks*:
//! A declaration may name environment variables whose value replaces the default, before any parse.
//! The command line always beats the environment.
//! * *Predictable tokenization*:
//! Short option clusters (ex: `-vn3`) are normalized into explicit flag/value pairs, and that step is available on its own.
//! * *Leftover tokens*:
//! Matching stops at the first token nothing claims; the remainder is returned so the caller may dispatch on it (ex: to a sub-command).
//!
//! Help rendering, shell completions and sub-command trees are out of scope.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/summer.rs")]
//! ```
//!
//! ```console
//! $ summer 1 2 3
//! Sum: 6
//!
//! $ SUMMER_ITEMS=4,5 summer
//! Sum: 9
//!
//! $ summer 1 blah
//! Parse error: 'blah' cannot convert to list of int for 'item'.
//!
//! $ summer 1 --bogus
//! Unexpected tokens: --bogus
//! ```
//!
//! # Declarations
//! Configure `argbind` by starting with a [`CommandLineParser`] and `add`ing parameters.
//! There are two classes of parameters: [`Parameter::option`] and [`Parameter::argument`].
//!
//! Options are specified via `--name`/`--name=value` or `-n`/`-nvalue`, and may be given in any order.
//! Names are whitespace separated: a single character name becomes a short flag (`-n`), any other a long flag (`--name`).
//!
//! Arguments are positional, and are filled in the order they are added.
//! Scalar arguments take a single token, list arguments take every remaining positional token.
//!
//! ```
//! use argbind::{CommandLineParser, Parameter, Source};
//!
//! let environment = vec![("LEVEL".to_string(), "3".to_string())];
//! let mut parser = CommandLineParser::with_environment("program", environment);
//! let verbose = parser.add(Parameter::option("v verbose", false)).unwrap();
//! let level = parser.add(Parameter::option("l level", 1i64).env("LEVEL")).unwrap();
//! let files = parser.add(Parameter::argument("FILES", Vec::<String>::default())).unwrap();
//!
//! // The environment is applied as soon as the parameter is added.
//! assert_eq!(level.get(), 3);
//! assert_eq!(level.source(), Source::Environment("LEVEL".to_string()));
//!
//! parser.parse_tokens(&["-vl5", "a.txt", "b.txt"]).unwrap();
//!
//! assert!(verbose.get());
//! assert_eq!(level.get(), 5);
//! assert_eq!(files.get(), vec!["a.txt", "b.txt"]);
//! ```
//!
//! # Normalization
//! Before matching, the tokens are rewritten so each option is a flag token followed by exactly one value token.
//! * A boolean flag without a value gets an implicit `true`: `-v` becomes `-v true`.
//! An `=` joined boolean is written out canonically: `-v=0` becomes `-v false`.
//! * A value-taking short flag takes the rest of its cluster, or else the next token: `-n3` and `-n 3` both become `-n 3`.
//! * In a cluster, boolean flags expand until the first value-taking flag: `-vn3` becomes `-v true -n 3`.
//! * Everything after `--` is passed through untouched.
//!
//! ```
//! use argbind::{CommandLineParser, Parameter};
//!
//! let mut parser = CommandLineParser::new("program");
//! parser.add(Parameter::option("a", false)).unwrap();
//! parser.add(Parameter::option("b", String::default())).unwrap();
//!
//! let normalized = parser.normalize(&["-ab", "test"]).unwrap();
//! assert_eq!(normalized.tokens, vec!["-a", "true", "-b", "test"]);
//! ```
//!
//! # Features
//! * `tracing_debug`: emit `tracing` debug events while normalizing, matching and binding.
//! * `unit_test`: enable `Handle::test_dummy`, for testing code which receives handles.
pub use argbind_builder::*;
