//! Dependency Registry
//!
//! A registry maps each [`Capability`] to one lazily constructed, shared
//! instance. Bindings are set-once: the first instance bound to a capability
//! wins and later attempts are ignored. The staged builder binds caller
//! overrides first and then calls [`Registry::register_defaults`], so a
//! default can never replace something the caller supplied.
//!
//! A registry belongs to a single assembly and is not thread-safe.
//!
//! # Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use delivery_client::config::DeliveryOptionsBuilder;
//! use delivery_client::registry::Registry;
//! use delivery_client::traits::PropertyMapper;
//!
//! # fn main() -> Result<(), delivery_client::DeliveryError> {
//! let options = DeliveryOptionsBuilder::new()
//!     .with_project_id("e5629811-ddaa-4c2b-80d2-fa91e16bb264")?
//!     .build()?;
//!
//! let mut registry = Registry::new();
//! registry.register_defaults(&options);
//! let mapper: Option<Arc<dyn PropertyMapper>> = registry.get();
//! assert!(mapper.is_some());
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::config::DeliveryOptions;
use crate::defaults::{
    DefaultInlineContentItemsProcessor, DefaultModelProvider, DefaultPropertyMapper,
    DefaultResiliencePolicyProvider, WarnAboutRegistrationResolver,
    WarnAboutUnretrievedItemResolver,
};
use crate::traits::{
    InlineContentItemsProcessor, InlineContentItemsResolver, ModelProvider, PropertyMapper,
    ResiliencePolicyProvider, UnknownContentItem, UnretrievedContentItem,
};

pub mod capability;
mod entry;

pub use capability::{Bindable, Binding, Capability};

use entry::Entry;

type UnknownItemResolver = Arc<dyn InlineContentItemsResolver<UnknownContentItem>>;
type UnretrievedItemResolver = Arc<dyn InlineContentItemsResolver<UnretrievedContentItem>>;

/// Keyed store of capability bindings for one client assembly.
#[derive(Default)]
pub struct Registry {
    entries: BTreeMap<Capability, Entry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `instance` unless its capability is already bound or the
    /// instance is absent. Returns whether a binding was added.
    pub fn try_add<T: Bindable>(&mut self, instance: impl Into<Option<T>>) -> bool {
        let Some(instance) = instance.into() else {
            return false;
        };
        if self.skip_bound(T::CAPABILITY) {
            return false;
        }

        tracing::debug!(capability = %T::CAPABILITY, "Binding capability");
        self.entries
            .insert(T::CAPABILITY, Entry::ready(instance.into_binding()));
        true
    }

    /// Bind a deferred factory unless the capability is already bound.
    ///
    /// The factory runs on the first read of the capability and receives the
    /// registry to resolve its own dependencies. If the capability is already
    /// bound the factory is dropped without running.
    pub fn try_add_with<T, F>(&mut self, factory: F) -> bool
    where
        T: Bindable,
        F: FnOnce(&Registry) -> T + 'static,
    {
        if self.skip_bound(T::CAPABILITY) {
            return false;
        }

        tracing::debug!(capability = %T::CAPABILITY, "Binding deferred capability");
        self.entries.insert(
            T::CAPABILITY,
            Entry::deferred(Box::new(move |registry: &Registry| {
                tracing::debug!(capability = %T::CAPABILITY, "Constructing capability");
                factory(registry).into_binding()
            })),
        );
        true
    }

    fn skip_bound(&self, capability: Capability) -> bool {
        let bound = self.entries.contains_key(&capability);
        if bound {
            tracing::debug!(%capability, "Capability already bound, keeping existing binding");
        }
        bound
    }

    /// Instance bound to `T`'s capability, constructing it on first access.
    pub fn get<T: Bindable>(&self) -> Option<T> {
        self.binding(T::CAPABILITY)
            .and_then(|binding| T::from_binding(&binding))
    }

    /// Untyped access to a capability's binding.
    pub fn binding(&self, capability: Capability) -> Option<Binding> {
        self.entries
            .get(&capability)
            .and_then(|entry| entry.force(self))
            .cloned()
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.entries.contains_key(&capability)
    }

    /// Whether the capability is bound and its instance already exists.
    pub fn is_resolved(&self, capability: Capability) -> bool {
        self.entries
            .get(&capability)
            .is_some_and(Entry::is_resolved)
    }

    /// Bound capabilities, in declaration order.
    pub fn capabilities(&self) -> impl Iterator<Item = Capability> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bind a default for every capability of the fixed set that is still
    /// unbound.
    ///
    /// Order: options, the two fallback inline item resolvers, the inline
    /// content items processor, the property mapper, the model provider, the
    /// resilience policy provider. Defaults are deferred and read their
    /// dependencies from the registry when first resolved, so they pick up
    /// caller overrides as well as other defaults. Calling this again has no
    /// effect.
    pub fn register_defaults(&mut self, options: &DeliveryOptions) {
        self.try_add(Arc::new(options.clone()));

        self.try_add_with(|_| -> UnknownItemResolver { Arc::new(WarnAboutRegistrationResolver) });
        self.try_add_with(|_| -> UnretrievedItemResolver {
            Arc::new(WarnAboutUnretrievedItemResolver)
        });

        self.try_add_with(|registry| -> Arc<dyn InlineContentItemsProcessor> {
            Arc::new(DefaultInlineContentItemsProcessor::new(
                registry
                    .get::<UnknownItemResolver>()
                    .unwrap_or_else(|| Arc::new(WarnAboutRegistrationResolver)),
                registry
                    .get::<UnretrievedItemResolver>()
                    .unwrap_or_else(|| Arc::new(WarnAboutUnretrievedItemResolver)),
            ))
        });

        self.try_add_with(|_| -> Arc<dyn PropertyMapper> { Arc::new(DefaultPropertyMapper) });

        self.try_add_with(|registry| -> Arc<dyn ModelProvider> {
            let processor = registry
                .get::<Arc<dyn InlineContentItemsProcessor>>()
                .unwrap_or_else(|| {
                    Arc::new(DefaultInlineContentItemsProcessor::new(
                        Arc::new(WarnAboutRegistrationResolver),
                        Arc::new(WarnAboutUnretrievedItemResolver),
                    ))
                });
            let property_mapper = registry
                .get::<Arc<dyn PropertyMapper>>()
                .unwrap_or_else(|| Arc::new(DefaultPropertyMapper));

            Arc::new(DefaultModelProvider::new(
                registry.get(),
                processor,
                registry.get(),
                property_mapper,
            ))
        });

        let max_retry_attempts = options.max_retry_attempts();
        self.try_add_with(move |registry| -> Arc<dyn ResiliencePolicyProvider> {
            let attempts = registry
                .get::<Arc<DeliveryOptions>>()
                .map_or(max_retry_attempts, |options| options.max_retry_attempts());
            Arc::new(DefaultResiliencePolicyProvider::new(attempts))
        });
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.entries
                    .iter()
                    .map(|(capability, entry)| (capability.name(), entry.is_resolved())),
            )
            .finish()
    }
}
