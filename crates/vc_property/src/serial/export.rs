use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;

use log::trace;
use serde_core::ser::SerializeMap;
use serde_core::{Serialize, Serializer};

use crate::Object;
use crate::format::AccessorKind;
use crate::registry::ClassRegistry;
use crate::serial::StorageKey;

// -----------------------------------------------------------------------------
// ExportedState

/// The fields to persist, by property name, with the key to store them under.
///
/// Serializes as a map from name to key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportedState(Vec<(Box<str>, StorageKey)>);

impl ExportedState {
    #[inline]
    pub fn get(&self, name: &str) -> Option<&StorageKey> {
        self.0
            .iter()
            .find(|(key, _)| &**key == name)
            .map(|(_, key)| key)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Adds `name`, or replaces its key if it is already exported.
    pub fn force(&mut self, name: &str, key: StorageKey) {
        match self.0.iter_mut().find(|(n, _)| &**n == name) {
            Some((_, old)) => *old = key,
            None => self.0.push((Box::from(name), key)),
        }
    }

    /// Removes `name`, returning its key.
    pub fn remove(&mut self, name: &str) -> Option<StorageKey> {
        let index = self.0.iter().position(|(n, _)| &**n == name)?;
        Some(self.0.remove(index).1)
    }

    fn push_new(&mut self, name: &str, key: StorageKey) {
        if !self.contains(name) {
            self.0.push((Box::from(name), key));
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the entries in export order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &StorageKey)> {
        self.0.iter().map(|(name, key)| (&**name, key))
    }

    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.0.iter().map(|(name, _)| &**name)
    }
}

impl Serialize for ExportedState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_map(Some(self.0.len()))?;
        for (name, key) in &self.0 {
            state.serialize_entry(&**name, key)?;
        }
        state.end()
    }
}

// -----------------------------------------------------------------------------
// Export & Restore

/// Returns the fields of `object` to persist.
///
/// - every present field visible from the root class, except those with a
///   lazy getter, which are recomputed after a restore;
/// - every façade field, present or not.
///
/// # Examples
///
/// ```
/// use vc_property::class::{Class, ClassInfo};
/// use vc_property::registry::ClassRegistry;
/// use vc_property::serial::{StorageKey, export_state};
/// use vc_property::Value;
///
/// struct Page;
///
/// impl Class for Page {
///     fn class_info() -> ClassInfo {
///         ClassInfo::builder::<Self>("Page")
///             .public("title", "Home")
///             .public("html", "")
///             .lazy_getter("html", |_| Ok(Value::from("<h1>Home</h1>")))
///             .build()
///     }
/// }
///
/// let mut registry = ClassRegistry::new();
/// let page = registry.instantiate::<Page>();
///
/// let state = export_state(&mut registry, &page);
/// assert_eq!(state.names().collect::<Vec<_>>(), ["title"]);
/// assert_eq!(state.get("title"), Some(&StorageKey::public("title")));
/// ```
pub fn export_state(registry: &mut ClassRegistry, object: &Object) -> ExportedState {
    let class = object.class();
    let is_lazy = |name: &str| class.has_accessor(name, AccessorKind::Getter, true);

    let mut state = ExportedState::default();

    for (field, slot) in object.slots() {
        if slot.is_set() && class.in_scope(field) && !is_lazy(field.name()) {
            state.push_new(field.name(), StorageKey::of(field));
        }
    }

    for (name, slot) in object.dynamic_fields() {
        if slot.is_set() && !is_lazy(name) {
            state.push_new(name, StorageKey::dynamic(name));
        }
    }

    for field in registry.resolve_facade_fields_of(object).iter() {
        state.force(field.name(), StorageKey::of(field));
    }

    state
}

/// Unsets every present field of `object` that has a lazy getter, so the
/// next read computes it again.
///
/// Returns the number of unset fields.
pub fn restore_state(object: &mut Object) -> usize {
    let class = Arc::clone(object.class());
    object.unset_where(|name| {
        let lazy = class.has_accessor(name, AccessorKind::Getter, true);
        if lazy {
            trace!("{}::{name}: unset on restore", class.name());
        }
        lazy
    })
}
