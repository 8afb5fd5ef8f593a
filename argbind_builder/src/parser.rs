mod base;
mod environment;

pub(crate) use self::base::*;
pub use self::base::{ConfigError, ParseError};
pub(crate) use environment::initialize;
pub use environment::ProcessEnvironment;
