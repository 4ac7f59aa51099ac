//! Registry entries
//!
//! An entry is either bound to a ready instance or holds a deferred factory
//! that runs the first time the entry is read. Either way the instance is
//! memoized, so every read returns the same shared handle.

use std::cell::Cell;

use once_cell::unsync::OnceCell;

use super::Registry;
use super::capability::Binding;

pub(crate) type Factory = Box<dyn FnOnce(&Registry) -> Binding>;

pub(crate) struct Entry {
    factory: Cell<Option<Factory>>,
    value: OnceCell<Binding>,
}

impl Entry {
    pub(crate) fn ready(binding: Binding) -> Self {
        Self {
            factory: Cell::new(None),
            value: OnceCell::with_value(binding),
        }
    }

    pub(crate) fn deferred(factory: Factory) -> Self {
        Self {
            factory: Cell::new(Some(factory)),
            value: OnceCell::new(),
        }
    }

    pub(crate) fn is_resolved(&self) -> bool {
        self.value.get().is_some()
    }

    /// Read the instance, running the factory on first access.
    ///
    /// The factory may read other entries of `registry`; it must not read
    /// this one.
    pub(crate) fn force(&self, registry: &Registry) -> Option<&Binding> {
        self.value
            .get_or_try_init(|| match self.factory.take() {
                Some(factory) => Ok(factory(registry)),
                None => Err(()),
            })
            .ok()
    }
}
