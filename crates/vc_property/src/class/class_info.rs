use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;

use vc_utils::hash::HashMap;

use crate::class::{AccessorSet, ClassBuilder, FieldInfo, Method};
use crate::format::{AccessorKind, Convention, FormatName};

// -----------------------------------------------------------------------------
// Class

/// A host type that can describe itself.
///
/// The implementation is usually a single [`ClassBuilder`] chain.
/// Register the type in a [`ClassRegistry`](crate::registry::ClassRegistry)
/// to create instances and query reflection data.
///
/// # Examples
///
/// ```
/// use vc_property::class::{Class, ClassInfo};
/// use vc_property::Value;
///
/// struct Clock;
///
/// impl Class for Clock {
///     fn class_info() -> ClassInfo {
///         ClassInfo::builder::<Self>("Clock")
///             .public("seconds", 0_i64)
///             .getter("minutes", |obj| {
///                 let seconds = obj.field_as::<i64>("seconds").copied().unwrap_or(0);
///                 Ok(Value::from(seconds / 60))
///             })
///             .setter("minutes", |obj, value| {
///                 let minutes = value.into_typed::<i64>("minutes")?;
///                 obj.store("seconds", minutes * 60);
///                 Ok(())
///             })
///             .build()
///     }
/// }
///
/// let info = Clock::class_info();
/// assert!(info.has_method("get_minutes"));
/// assert!(info.has_method("set_minutes"));
/// assert!(!info.has_method("lazy_get_minutes"));
/// ```
pub trait Class: 'static {
    fn class_info() -> ClassInfo;
}

// -----------------------------------------------------------------------------
// ClassInfo

/// The descriptor of a host type.
///
/// Built once by [`ClassBuilder`] and immutable afterwards. Holds:
///
/// - the declared fields, own level and full instance layout;
/// - the method table, keyed by formatted method name;
/// - the accessor bindings, keyed by property name;
/// - the naming [`Convention`] and the parent class, if any.
pub struct ClassInfo {
    pub(crate) type_id: TypeId,
    pub(crate) name: &'static str,
    pub(crate) convention: Convention,
    pub(crate) parent: Option<Arc<ClassInfo>>,
    pub(crate) own_fields: Vec<FieldInfo>,
    // Most-derived level first. Parent non-private fields redeclared by
    // a child are shadowed, parent private fields keep their own slot.
    pub(crate) layout: Vec<FieldInfo>,
    pub(crate) methods: HashMap<Box<str>, Method>,
    pub(crate) accessors: HashMap<Box<str>, AccessorSet>,
}

impl ClassInfo {
    /// Starts describing the host type `T`, displayed as `name`.
    #[inline]
    pub fn builder<T: 'static>(name: &'static str) -> ClassBuilder {
        ClassBuilder::new(TypeId::of::<T>(), name)
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Check if the descriptor belongs to `T`.
    #[inline]
    pub fn type_is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn convention(&self) -> Convention {
        self.convention
    }

    #[inline]
    pub fn parent(&self) -> Option<&Arc<ClassInfo>> {
        self.parent.as_ref()
    }

    /// Iterates over this class and its ancestors, most-derived first.
    pub fn ancestors(&self) -> impl Iterator<Item = &ClassInfo> {
        core::iter::successors(Some(self), |class| class.parent.as_deref())
    }

    /// Returns the base class of the inheritance chain.
    ///
    /// The accessor machinery is installed there: its private fields are the
    /// only private fields visible to dispatch diagnostics and export.
    pub fn root(&self) -> &ClassInfo {
        let mut class = self;
        while let Some(parent) = class.parent.as_deref() {
            class = parent;
        }
        class
    }

    /// Returns the fields declared by this level only.
    #[inline]
    pub fn own_fields(&self) -> &[FieldInfo] {
        &self.own_fields
    }

    /// Returns every field of an instance, most-derived level first.
    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.layout
    }

    /// Returns the layout index of the first field named `name`.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.layout.iter().position(|field| field.name() == name)
    }

    /// Returns the first field named `name`, if declared.
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.layout.iter().find(|field| field.name() == name)
    }

    #[inline]
    pub fn is_declared(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Returns `true` if `field` is visible from the root class.
    #[inline]
    pub fn in_scope(&self, field: &FieldInfo) -> bool {
        !field.visibility().is_private() || field.owner_id() == self.root().type_id
    }

    /// Whether the method table contains `name`.
    #[inline]
    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    #[inline]
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.get(name)
    }

    /// Iterates over the method names in arbitrary order.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(|name| &**name)
    }

    /// Returns the accessors bound to `property`.
    #[inline]
    pub fn accessors(&self, property: &str) -> AccessorSet {
        self.accessors
            .get(property)
            .copied()
            .unwrap_or(AccessorSet::EMPTY)
    }

    /// Formats an accessor name with the class convention.
    #[inline]
    pub fn format_name(&self, property: &str, kind: AccessorKind, lazy: bool) -> String {
        self.convention.format_name(property, kind, lazy)
    }

    /// Whether the accessor of `property` with `kind` and laziness is bound.
    ///
    /// Plain methods whose names look like accessors are not counted,
    /// dispatch never calls them.
    #[inline]
    pub fn has_accessor(&self, property: &str, kind: AccessorKind, lazy: bool) -> bool {
        self.accessors(property).has(kind, lazy)
    }
}

impl fmt::Debug for ClassInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassInfo")
            .field("name", &self.name)
            .field("convention", &self.convention)
            .field("parent", &self.parent.as_ref().map(|parent| parent.name))
            .field("fields", &self.layout)
            .field("methods", &self.methods)
            .finish()
    }
}
