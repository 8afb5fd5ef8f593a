/// The kind of value a destination holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `bool`
    Bool,
    /// `String`
    Str,
    /// `i64`
    Int,
    /// `Vec<String>`
    Strs,
    /// `Vec<i64>`
    Ints,
}

impl Kind {
    /// Whether the kind accumulates every value it is given (rather than keeping the last one).
    pub fn is_list(&self) -> bool {
        matches!(self, Kind::Strs | Kind::Ints)
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Kind::Bool => "bool",
            Kind::Str => "string",
            Kind::Int => "int",
            Kind::Strs => "list of string",
            Kind::Ints => "list of int",
        };
        write!(f, "{name}")
    }
}

/// A snapshot of a destination's current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A boolean value.
    Bool(bool),
    /// A string value.
    Str(String),
    /// An integer value.
    Int(i64),
    /// A list of strings.
    Strs(Vec<String>),
    /// A list of integers.
    Ints(Vec<i64>),
}

impl Value {
    /// The kind of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::Str(_) => Kind::Str,
            Value::Int(_) => Kind::Int,
            Value::Strs(_) => Kind::Strs,
            Value::Ints(_) => Kind::Ints,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Strs(items) => {
                let items: Vec<String> = items.iter().map(|s| format!("{s:?}")).collect();
                write!(f, "[{}]", items.join(", "))
            }
            Value::Ints(items) => {
                let items: Vec<String> = items.iter().map(|i| i.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
        }
    }
}

/// Where the current value of a destination came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// The declared default value.
    Default,
    /// The named environment variable.
    Environment(String),
    /// The command line tokens of the most recent parse.
    CommandLine,
}

/// The result of normalizing raw tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// The rewritten tokens: every option flag is immediately followed by exactly one value.
    pub tokens: Vec<String>,
    /// How many input tokens were read.
    pub consumed: usize,
}

/// The result of a successful parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every token was claimed by a declared option or argument.
    Complete,
    /// Matching stopped at a token no declaration claims.
    /// Holds the (normalized) tokens from that point onwards.
    Leftover(Vec<String>),
}

impl Outcome {
    /// Whether every token was claimed.
    pub fn is_complete(&self) -> bool {
        matches!(self, Outcome::Complete)
    }

    /// The unclaimed tokens (empty when complete).
    pub fn leftover(&self) -> &[String] {
        match self {
            Outcome::Complete => &[],
            Outcome::Leftover(tokens) => tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Kind::Bool, false)]
    #[case(Kind::Str, false)]
    #[case(Kind::Int, false)]
    #[case(Kind::Strs, true)]
    #[case(Kind::Ints, true)]
    fn kind_is_list(#[case] kind: Kind, #[case] expected: bool) {
        assert_eq!(kind.is_list(), expected);
    }

    #[rstest]
    #[case(Value::Bool(true), Kind::Bool, "true")]
    #[case(Value::Str("a b".to_string()), Kind::Str, "\"a b\"")]
    #[case(Value::Int(-3), Kind::Int, "-3")]
    #[case(Value::Strs(vec!["x".to_string(), "y".to_string()]), Kind::Strs, "[\"x\", \"y\"]")]
    #[case(Value::Ints(vec![]), Kind::Ints, "[]")]
    fn value_display(#[case] value: Value, #[case] kind: Kind, #[case] expected: &str) {
        assert_eq!(value.kind(), kind);
        assert_eq!(value.to_string(), expected);
    }

    #[test]
    fn outcome() {
        assert!(Outcome::Complete.is_complete());
        assert!(Outcome::Complete.leftover().is_empty());

        let outcome = Outcome::Leftover(vec!["sub".to_string(), "-x".to_string()]);
        assert!(!outcome.is_complete());
        assert_eq!(outcome.leftover(), &["sub".to_string(), "-x".to_string()]);
    }
}
