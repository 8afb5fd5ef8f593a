#[macro_use]
extern crate assert_matches;

use argbind::prelude::Environment;
use argbind::{
    CommandLineParser, ConfigError, Kind, NormalizeError, Outcome, Parameter,
    ParseError, Source, Value,
};
use std::collections::HashMap;

struct Fixed(&'static str, &'static str);

impl Environment for Fixed {
    fn var(&self, name: &str) -> Option<String> {
        if name == self.0 {
            Some(self.1.to_string())
        } else {
            None
        }
    }
}

fn no_environment() -> HashMap<String, String> {
    HashMap::default()
}

#[test]
fn builder_compiles() {
    CommandLineParser::new("organization");
}

#[test]
fn copy_program() {
    let mut parser = CommandLineParser::with_environment("copy", no_environment());
    let recursive = parser.add(Parameter::option("r recursive", false)).unwrap();
    let verbose = parser.add(Parameter::option("v verbose", false)).unwrap();
    let exclude = parser
        .add(Parameter::option("x exclude", Vec::<String>::default()))
        .unwrap();
    let source = parser
        .add(Parameter::argument("SOURCE", String::default()))
        .unwrap();
    let target = parser
        .add(Parameter::argument("TARGET", String::default()))
        .unwrap();

    let outcome = parser
        .parse_tokens(&["-rvx*.o", "src", "--exclude", "*.a", "dst"])
        .unwrap();

    assert_eq!(outcome, Outcome::Complete);
    assert!(recursive.get());
    assert!(verbose.get());
    assert_eq!(exclude.get(), vec!["*.o", "*.a"]);
    assert_eq!(source.get(), "src");
    assert_eq!(target.get(), "dst");
    assert_eq!(exclude.value(), Value::Strs(vec!["*.o".into(), "*.a".into()]));
}

#[test]
fn custom_environment() {
    let mut parser = CommandLineParser::with_environment("program", Fixed("PORT", "8080"));
    let port = parser
        .add(Parameter::option("p port", 80i64).env("HTTP_PORT").env("PORT"))
        .unwrap();

    assert_eq!(port.get(), 8080);
    assert_eq!(port.source(), Source::Environment("PORT".to_string()));

    parser.parse_tokens(&["-p", "-1"]).unwrap();
    assert_eq!(port.get(), -1);
    assert_eq!(port.source(), Source::CommandLine);
}

#[test]
fn unparseable_environment_keeps_default() {
    let mut parser = CommandLineParser::with_environment("program", Fixed("PORT", "eighty"));
    let port = parser
        .add(Parameter::option("port", 80i64).env("PORT"))
        .unwrap();

    assert_eq!(port.get(), 80);
    assert_eq!(port.source(), Source::Default);
}

#[test]
fn leftover_sub_command() {
    let mut parser = CommandLineParser::with_environment("git", no_environment());
    let debug = parser.add(Parameter::option("d", false)).unwrap();

    let outcome = parser
        .parse_tokens(&["-d", "commit", "--message", "message"])
        .unwrap();
    assert!(debug.get());
    assert_eq!(outcome.leftover(), ["commit", "--message", "message"]);

    let rest: Vec<&str> = outcome.leftover()[1..].iter().map(AsRef::as_ref).collect();
    let mut sub_parser = CommandLineParser::with_environment("commit", no_environment());
    let message = sub_parser
        .add(Parameter::option("m message", String::default()))
        .unwrap();

    assert!(sub_parser.parse_tokens(&rest).unwrap().is_complete());
    assert_eq!(message.get(), "message");

    // Short flags are resolved against the outer declarations, even past the sub-command.
    assert_matches!(
        parser.parse_tokens(&["commit", "-m", "message"]),
        Err(ParseError::Normalize(NormalizeError::MalformedCluster { short: 'm', .. }))
    );
}

#[test]
fn end_of_options() {
    let mut parser = CommandLineParser::with_environment("program", no_environment());
    let verbose = parser.add(Parameter::option("v", false)).unwrap();
    let items = parser
        .add(Parameter::argument("ITEMS", Vec::<String>::default()))
        .unwrap();

    let normalized = parser.normalize(&["a", "--", "-v", "-x"]).unwrap();
    assert_eq!(normalized.tokens, vec!["a", "--", "-v", "-x"]);

    parser.parse_tokens(&["a", "--", "-v", "-x"]).unwrap();
    assert!(!verbose.get());
    assert_eq!(items.get(), vec!["a", "-v", "-x"]);
}

#[test]
fn errors() {
    let mut parser = CommandLineParser::with_environment("program", no_environment());
    parser.add(Parameter::option("v", false)).unwrap();
    parser.add(Parameter::option("n", 0i64)).unwrap();

    assert_eq!(
        parser.add(Parameter::option("v", 0i64)).unwrap_err(),
        ConfigError::DuplicateShortOption('v')
    );
    assert_matches!(
        parser.parse_tokens(&["-vx"]),
        Err(ParseError::Normalize(NormalizeError::MalformedCluster { short: 'x', .. }))
    );
    assert_matches!(
        parser.parse_tokens(&["-n"]),
        Err(ParseError::Normalize(NormalizeError::MissingValue { .. }))
    );
    assert_eq!(
        parser.parse_tokens(&["-v", "maybe"]).unwrap(),
        Outcome::Leftover(vec!["maybe".to_string()])
    );
    assert_eq!(
        parser.parse_tokens(&["-n", "x"]).unwrap_err().to_string(),
        "Parse error: 'x' cannot convert to int for '-n'."
    );
    assert_eq!(Kind::Int.to_string(), "int");
}
