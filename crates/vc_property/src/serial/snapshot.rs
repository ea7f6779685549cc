use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::class::ClassInfo;
use crate::registry::ClassRegistry;
use crate::serial::{ExportedState, StorageKey, export_state, restore_state};
use crate::{Object, Value};

// -----------------------------------------------------------------------------
// Snapshot

/// The persisted state of an [`Object`].
///
/// [`persist`](Self::persist) clones the fields selected by
/// [`export_state`], keyed by [`StorageKey`]. [`revive`](Self::revive)
/// creates a fresh instance of the same class from its initial values,
/// writes the persisted fields back and then applies [`restore_state`].
///
/// # Examples
///
/// ```
/// use vc_property::class::{Class, ClassInfo};
/// use vc_property::registry::ClassRegistry;
/// use vc_property::serial::Snapshot;
/// use vc_property::Value;
///
/// struct Counter;
///
/// impl Class for Counter {
///     fn class_info() -> ClassInfo {
///         ClassInfo::builder::<Self>("Counter")
///             .public("count", 0_u32)
///             .unset_field("label", vc_property::class::Visibility::Public)
///             .lazy_getter("label", |obj| {
///                 let count = obj.field_as::<u32>("count").copied().unwrap_or(0);
///                 Ok(Value::from(format!("#{count}")))
///             })
///             .build()
///     }
/// }
///
/// let mut registry = ClassRegistry::new();
/// let mut counter = registry.instantiate::<Counter>();
/// counter.set("count", 3_u32).unwrap();
/// assert_eq!(counter.get("label").unwrap(), Value::from("#3"));
///
/// let snapshot = Snapshot::persist(&mut registry, &counter);
/// let revived = snapshot.revive();
///
/// assert_eq!(revived.field("count"), Some(&Value::from(3_u32)));
/// assert!(!revived.is_set("label"));
/// ```
#[derive(Debug, Clone)]
pub struct Snapshot {
    class: Arc<ClassInfo>,
    values: Vec<(StorageKey, Value)>,
}

impl Snapshot {
    /// Persists the fields of `object` selected by [`export_state`].
    pub fn persist(registry: &mut ClassRegistry, object: &Object) -> Self {
        let state = export_state(registry, object);
        Self::persist_with(object, &state)
    }

    /// Persists the fields listed by `state`.
    ///
    /// Entries whose field is absent are skipped.
    pub fn persist_with(object: &Object, state: &ExportedState) -> Self {
        let values = state
            .iter()
            .filter_map(|(name, key)| {
                let value = object
                    .slots()
                    .find(|(field, _)| key.matches(field))
                    .map(|(_, slot)| slot.value())
                    .unwrap_or_else(|| object.slot(name).and_then(|slot| slot.value()))?;
                Some((key.clone(), value.clone()))
            })
            .collect();

        Self {
            class: Arc::clone(object.class()),
            values,
        }
    }

    #[inline]
    pub fn class(&self) -> &Arc<ClassInfo> {
        &self.class
    }

    #[inline]
    pub fn get(&self, key: &StorageKey) -> Option<&Value> {
        self.values.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &StorageKey> {
        self.values.iter().map(|(key, _)| key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Creates an instance from the persisted state.
    pub fn revive(&self) -> Object {
        let mut object = Object::new(Arc::clone(&self.class));

        for (key, value) in &self.values {
            let index = self.class.fields().iter().position(|field| key.matches(field));
            match index {
                Some(index) => object.store_at(index, value.clone()),
                None => object.store_dynamic(key.name(), value.clone()),
            }
        }

        restore_state(&mut object);
        object
    }
}
