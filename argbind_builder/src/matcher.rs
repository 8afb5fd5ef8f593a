mod core;
mod model;
mod normalize;

pub(crate) use self::core::*;
pub(crate) use model::*;
pub use normalize::NormalizeError;
