//! Traits which, typically, may be imported without concern: `use argbind::prelude::*`.

pub use crate::api::Bindable;

/// Behaviour to look up environment variables by name.
// Needs to be imported in order to implement a custom `Environment`.
pub trait Environment {
    /// The value of the variable `name`, or `None` if it is not set.
    fn var(&self, name: &str) -> Option<String>;
}

impl Environment for std::collections::HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl Environment for Vec<(String, String)> {
    fn var(&self, name: &str) -> Option<String> {
        self.iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }
}
