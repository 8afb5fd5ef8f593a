use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::api::capture::*;
use crate::model::{Kind, Source, Value};
use crate::parser::AnonymousCapturable;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

struct Slot<T> {
    value: RefCell<T>,
    source: RefCell<Source>,
    occurrences: Cell<usize>,
}

/// The destination of a declared option/argument.
///
/// A handle is returned by [`CommandLineParser::add`](./struct.CommandLineParser.html#method.add) with the initial value already in place
/// (the declared default, or the environment override).
/// The parser populates it in place; callers only ever read from it.
pub struct Handle<T> {
    slot: Rc<Slot<T>>,
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handle")
            .field("value", &*self.slot.value.borrow())
            .field("source", &*self.slot.source.borrow())
            .field("occurrences", &self.slot.occurrences.get())
            .finish()
    }
}

impl<T: Bindable> Handle<T> {
    pub(crate) fn new(value: T, source: Source) -> Self {
        Self {
            slot: Rc::new(Slot {
                value: RefCell::new(value),
                source: RefCell::new(source),
                occurrences: Cell::new(0),
            }),
        }
    }

    /// *Available using 'unit_test' crate feature only.*</br></br>
    /// Build a detached [`Handle`] holding `value`, for use in testing code that consumes handles.
    #[cfg(feature = "unit_test")]
    pub fn test_dummy(value: T) -> Self {
        Self::new(value, Source::Default)
    }

    /// A copy of the current value.
    ///
    /// The copy is detached: it is unaffected by later parses.
    pub fn get(&self) -> T {
        self.slot.value.borrow().clone()
    }

    /// The current value as a [`Value`].
    pub fn value(&self) -> Value {
        self.slot.value.borrow().to_value()
    }

    /// Where the current value came from.
    pub fn source(&self) -> Source {
        self.slot.source.borrow().clone()
    }

    /// How many command line values were bound during the most recent parse.
    pub fn occurrences(&self) -> usize {
        self.slot.occurrences.get()
    }

    /// Whether the most recent parse bound at least one command line value.
    pub fn is_set(&self) -> bool {
        self.occurrences() > 0
    }
}

impl<T: Bindable> AnonymousCapturable for Handle<T> {
    fn kind(&self) -> Kind {
        T::KIND
    }

    fn begin(&mut self) {
        self.slot.occurrences.set(0);
    }

    fn capture(&mut self, token: &str) -> Result<(), InvalidCapture> {
        let mut value = self.slot.value.borrow_mut();

        if self.slot.occurrences.get() == 0 {
            // The first command line value replaces a list's default, rather than extending it.
            // Bind into a copy so a failed conversion leaves the default (and its source) intact.
            let mut fresh = value.clone();
            fresh.reset();
            fresh.bind(token)?;
            *value = fresh;
        } else {
            value.bind(token)?;
        }
        self.slot.occurrences.set(self.slot.occurrences.get() + 1);
        self.slot.source.replace(Source::CommandLine);

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Bound '{token}' as {k}.", k = T::KIND);
        }

        Ok(())
    }
}
