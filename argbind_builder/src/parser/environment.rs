use std::env;

use crate::api::Bindable;
use crate::model::Source;
use crate::prelude::Environment;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Environment lookups against the running process (via [`std::env::var`]).
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

/// Materialize the initial value of a destination.
///
/// The variables are checked in order; the first one that is set (non-empty) and converts successfully wins.
/// Otherwise the default is used as-is.
pub(crate) fn initialize<T: Bindable>(
    environment: &(impl Environment + ?Sized),
    variables: &[String],
    default: T,
) -> (T, Source) {
    for variable in variables {
        match environment.var(variable) {
            Some(raw) if !raw.is_empty() => match T::from_env(&raw) {
                Ok(value) => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Initialized from environment variable '{variable}'.");
                    }

                    return (value, Source::Environment(variable.clone()));
                }
                Err(_error) => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Ignoring environment variable '{variable}': {_error}");
                    }
                }
            },
            _ => {}
        }
    }

    (default, Source::Default)
}
