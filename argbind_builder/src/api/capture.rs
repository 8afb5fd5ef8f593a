use thiserror::Error;

use crate::constant::{canonical_bool, IMPLICIT_TRUE, LIST_SEPARATOR};
use crate::model::{Kind, Value};

mod private {
    pub trait Sealed {}

    impl Sealed for bool {}
    impl Sealed for String {}
    impl Sealed for i64 {}
    impl Sealed for Vec<String> {}
    impl Sealed for Vec<i64> {}
}

/// Behaviour to bind an input `&str` onto one of the supported value kinds.
///
/// The set of implementations is closed: `bool`, `String`, `i64`, `Vec<String>` and `Vec<i64>`.
/// Scalar kinds are overwritten by each bound token, list kinds append each bound token.
pub trait Bindable: private::Sealed + Clone + 'static {
    /// The kind of this destination.
    const KIND: Kind;

    /// Convert the token and store it (scalars replace, lists append).
    fn bind(&mut self, token: &str) -> Result<(), InvalidCapture>;

    /// Convert a full environment variable value.
    /// List kinds split the value on `,`.
    fn from_env(raw: &str) -> Result<Self, InvalidCapture>;

    /// Snapshot the current value.
    fn to_value(&self) -> Value;

    /// Reset before the first command line value of a parse is bound.
    #[doc(hidden)]
    fn reset(&mut self) {
        // Do nothing.
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot convert '{token}' to {kind}.")]
#[doc(hidden)]
pub struct InvalidCapture {
    /// The raw token.
    pub token: String,
    /// The kind it failed to convert to.
    pub kind: Kind,
}

impl InvalidCapture {
    fn new(token: &str, kind: Kind) -> Self {
        Self {
            token: token.to_string(),
            kind,
        }
    }
}

fn parse_bool(token: &str) -> Result<bool, InvalidCapture> {
    match canonical_bool(token) {
        Some(canonical) => Ok(canonical == IMPLICIT_TRUE),
        None => Err(InvalidCapture::new(token, Kind::Bool)),
    }
}

fn parse_int(token: &str, kind: Kind) -> Result<i64, InvalidCapture> {
    token
        .parse::<i64>()
        .map_err(|_| InvalidCapture::new(token, kind))
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

impl Bindable for bool {
    const KIND: Kind = Kind::Bool;

    fn bind(&mut self, token: &str) -> Result<(), InvalidCapture> {
        *self = parse_bool(token)?;
        Ok(())
    }

    fn from_env(raw: &str) -> Result<Self, InvalidCapture> {
        parse_bool(raw)
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Bindable for String {
    const KIND: Kind = Kind::Str;

    fn bind(&mut self, token: &str) -> Result<(), InvalidCapture> {
        *self = token.to_string();
        Ok(())
    }

    fn from_env(raw: &str) -> Result<Self, InvalidCapture> {
        Ok(raw.to_string())
    }

    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl Bindable for i64 {
    const KIND: Kind = Kind::Int;

    fn bind(&mut self, token: &str) -> Result<(), InvalidCapture> {
        *self = parse_int(token, Kind::Int)?;
        Ok(())
    }

    fn from_env(raw: &str) -> Result<Self, InvalidCapture> {
        parse_int(raw, Kind::Int)
    }

    fn to_value(&self) -> Value {
        Value::Int(*self)
    }
}

impl Bindable for Vec<String> {
    const KIND: Kind = Kind::Strs;

    fn bind(&mut self, token: &str) -> Result<(), InvalidCapture> {
        self.push(token.to_string());
        Ok(())
    }

    fn from_env(raw: &str) -> Result<Self, InvalidCapture> {
        Ok(split_list(raw).map(str::to_string).collect())
    }

    fn to_value(&self) -> Value {
        Value::Strs(self.clone())
    }

    fn reset(&mut self) {
        self.clear();
    }
}

impl Bindable for Vec<i64> {
    const KIND: Kind = Kind::Ints;

    fn bind(&mut self, token: &str) -> Result<(), InvalidCapture> {
        self.push(parse_int(token, Kind::Ints)?);
        Ok(())
    }

    fn from_env(raw: &str) -> Result<Self, InvalidCapture> {
        split_list(raw)
            .map(|item| parse_int(item, Kind::Ints))
            .collect()
    }

    fn to_value(&self) -> Value {
        Value::Ints(self.clone())
    }

    fn reset(&mut self) {
        self.clear();
    }
}
