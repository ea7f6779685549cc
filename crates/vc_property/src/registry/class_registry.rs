use alloc::sync::Arc;
use core::any::TypeId;

use log::{debug, warn};
use vc_utils::TypeIdMap;
use vc_utils::hash::{FixedHashState, HashMap};

use crate::Object;
use crate::class::{Class, ClassInfo, FieldInfo};
use crate::registry::reflect::{FacadeFields, collect_facade_fields, collect_private_fields};

// -----------------------------------------------------------------------------
// ClassEntry

/// A registered class and its reflection data.
///
/// Computed once, when the class is registered, and never modified.
/// Clones share the descriptor and the field lists.
#[derive(Debug, Clone)]
pub struct ClassEntry {
    class: Arc<ClassInfo>,
    private_fields: Arc<[FieldInfo]>,
    facade_fields: Arc<FacadeFields>,
}

impl ClassEntry {
    fn new(class: Arc<ClassInfo>) -> Self {
        let private_fields: Arc<[FieldInfo]> = collect_private_fields(&class).into();
        let facade_fields = Arc::new(collect_facade_fields(&class, &private_fields));
        Self {
            class,
            private_fields,
            facade_fields,
        }
    }

    #[inline]
    pub fn class(&self) -> &Arc<ClassInfo> {
        &self.class
    }

    /// Returns the non-public fields of the class and its ancestors,
    /// most-derived level first.
    #[inline]
    pub fn private_fields(&self) -> &Arc<[FieldInfo]> {
        &self.private_fields
    }

    /// Returns the façade fields, a subset of
    /// [`private_fields`](Self::private_fields).
    #[inline]
    pub fn facade_fields(&self) -> &Arc<FacadeFields> {
        &self.facade_fields
    }
}

// -----------------------------------------------------------------------------
// ClassRegistry

/// A registry of [classes](Class).
///
/// Registering a class builds its [`ClassInfo`] once and caches the field
/// lists used by serialization. Parents are registered with their children.
/// Entries are never replaced or removed.
///
/// # Examples
///
/// ```
/// use vc_property::class::{Class, ClassInfo};
/// use vc_property::registry::ClassRegistry;
/// use vc_property::Value;
///
/// struct Account;
///
/// impl Class for Account {
///     fn class_info() -> ClassInfo {
///         ClassInfo::builder::<Self>("Account")
///             .private("password", "")
///             .protected("email", "")
///             .getter("email", |obj| Ok(obj.field("email").cloned().unwrap_or_else(Value::unit)))
///             .setter("email", |obj, value| {
///                 obj.store("email", value);
///                 Ok(())
///             })
///             .build()
///     }
/// }
///
/// let mut registry = ClassRegistry::new();
///
/// let private = registry.resolve_private_fields::<Account>();
/// assert_eq!(private.len(), 2);
///
/// let facade = registry.resolve_facade_fields::<Account>();
/// assert_eq!(facade.names().collect::<Vec<_>>(), ["email"]);
///
/// let account = registry.instantiate::<Account>();
/// assert_eq!(registry.resolve_facade_fields_of(&account), facade);
/// ```
#[derive(Debug)]
pub struct ClassRegistry {
    entries: TypeIdMap<ClassEntry>,
    names: HashMap<&'static str, TypeId>,
}

impl Default for ClassRegistry {
    /// See [`ClassRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ClassRegistry {
    /// Creates an empty registry.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: TypeIdMap::new(),
            names: HashMap::with_hasher(FixedHashState),
        }
    }

    /// Registers `T` and its ancestors if needed, and returns the entry of `T`.
    ///
    /// [`Class::class_info`] is only called the first time.
    pub fn register<T: Class>(&mut self) -> ClassEntry {
        if let Some(entry) = self.entries.get_type::<T>() {
            return entry.clone();
        }
        self.register_class(Arc::new(T::class_info()))
    }

    /// Registers an already built descriptor and its ancestors if needed,
    /// and returns the entry of its type.
    pub fn register_class(&mut self, class: Arc<ClassInfo>) -> ClassEntry {
        let type_id = class.type_id();
        if let Some(entry) = self.entries.get(&type_id) {
            return entry.clone();
        }

        if let Some(parent) = class.parent() {
            self.register_class(Arc::clone(parent));
        }

        let name = class.name();
        if let Some(other) = self.names.get(name) {
            if *other != type_id {
                warn!("class name `{name}` is used by several types, lookup by name keeps the first");
            }
        } else {
            self.names.insert(name, type_id);
        }

        debug!(
            "register class `{name}` ({} fields, {} methods)",
            class.fields().len(),
            class.method_names().count(),
        );

        let entry = ClassEntry::new(class);
        debug!(
            "reflect class `{name}`: {} private fields, {} façade fields",
            entry.private_fields.len(),
            entry.facade_fields.len(),
        );
        self.entries.try_insert(type_id, || entry.clone());
        entry
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.entries.contains(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&ClassEntry> {
        self.entries.get(&type_id)
    }

    #[inline]
    pub fn get_type<T: Class>(&self) -> Option<&ClassEntry> {
        self.entries.get_type::<T>()
    }

    /// Looks up a class by its display name.
    pub fn get_with_name(&self, name: &str) -> Option<&ClassEntry> {
        self.names
            .get(name)
            .and_then(|type_id| self.entries.get(type_id))
    }

    /// Returns the number of registered classes.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the registered classes in arbitrary order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ClassEntry> {
        self.entries.values()
    }

    /// Creates an instance of `T`, registering it first.
    pub fn instantiate<T: Class>(&mut self) -> Object {
        Object::new(Arc::clone(self.register::<T>().class()))
    }

    // -------------------------------------------------------------------------
    // Reflection

    /// Returns the non-public fields of `T` and its ancestors,
    /// most-derived level first.
    #[inline]
    pub fn resolve_private_fields<T: Class>(&mut self) -> Arc<[FieldInfo]> {
        Arc::clone(self.register::<T>().private_fields())
    }

    /// Same as [`resolve_private_fields`](Self::resolve_private_fields), for
    /// the class of `object`.
    #[inline]
    pub fn resolve_private_fields_of(&mut self, object: &Object) -> Arc<[FieldInfo]> {
        Arc::clone(self.register_class(Arc::clone(object.class())).private_fields())
    }

    /// Returns the façade fields of `T`.
    #[inline]
    pub fn resolve_facade_fields<T: Class>(&mut self) -> Arc<FacadeFields> {
        Arc::clone(self.register::<T>().facade_fields())
    }

    /// Same as [`resolve_facade_fields`](Self::resolve_facade_fields), for
    /// the class of `object`.
    #[inline]
    pub fn resolve_facade_fields_of(&mut self, object: &Object) -> Arc<FacadeFields> {
        Arc::clone(self.register_class(Arc::clone(object.class())).facade_fields())
    }
}

// -----------------------------------------------------------------------------
// ClassRegistryArc

#[cfg(feature = "std")]
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A shared [`ClassRegistry`].
///
/// Lookups of registered classes only take the read lock. A miss takes the
/// write lock, where registration still happens at most once per type.
#[cfg(feature = "std")]
#[derive(Clone, Default)]
pub struct ClassRegistryArc {
    /// The wrapped [`ClassRegistry`].
    pub internal: Arc<RwLock<ClassRegistry>>,
}

#[cfg(feature = "std")]
impl ClassRegistryArc {
    /// Takes a read lock on the underlying [`ClassRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, ClassRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`ClassRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, ClassRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the descriptor of `T`, registering it first if needed.
    pub fn class<T: Class>(&self) -> Arc<ClassInfo> {
        if let Some(entry) = self.read().get_type::<T>() {
            return Arc::clone(entry.class());
        }
        Arc::clone(self.write().register::<T>().class())
    }

    /// See [`ClassRegistry::instantiate`].
    #[inline]
    pub fn instantiate<T: Class>(&self) -> Object {
        Object::new(self.class::<T>())
    }

    /// See [`ClassRegistry::resolve_private_fields`].
    pub fn resolve_private_fields<T: Class>(&self) -> Arc<[FieldInfo]> {
        if let Some(entry) = self.read().get_type::<T>() {
            return Arc::clone(entry.private_fields());
        }
        self.write().resolve_private_fields::<T>()
    }

    /// See [`ClassRegistry::resolve_facade_fields`].
    pub fn resolve_facade_fields<T: Class>(&self) -> Arc<FacadeFields> {
        if let Some(entry) = self.read().get_type::<T>() {
            return Arc::clone(entry.facade_fields());
        }
        self.write().resolve_facade_fields::<T>()
    }
}

#[cfg(feature = "std")]
impl core::fmt::Debug for ClassRegistryArc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.read().names.keys(), f)
    }
}
