use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::access;
use crate::class::{ClassInfo, FieldInfo, Method, Visibility};
use crate::{AccessError, Value};

// -----------------------------------------------------------------------------
// Slot

/// The state of one field of an [`Object`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Slot {
    /// Absent. Reads and writes of the field go through accessor dispatch.
    #[default]
    Unset,
    /// Written by a default, a setter or a direct write.
    Stored(Value),
    /// Materialized by a lazy getter.
    Cached(Value),
}

impl Slot {
    #[inline]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Slot::Unset => None,
            Slot::Stored(value) | Slot::Cached(value) => Some(value),
        }
    }

    #[inline]
    pub fn value_mut(&mut self) -> Option<&mut Value> {
        match self {
            Slot::Unset => None,
            Slot::Stored(value) | Slot::Cached(value) => Some(value),
        }
    }

    #[inline]
    pub const fn is_set(&self) -> bool {
        !matches!(self, Slot::Unset)
    }

    #[inline]
    pub const fn is_cached(&self) -> bool {
        matches!(self, Slot::Cached(_))
    }

    /// Leaves [`Slot::Unset`] in place, returning the previous value.
    #[inline]
    pub fn take(&mut self) -> Option<Value> {
        match core::mem::take(self) {
            Slot::Unset => None,
            Slot::Stored(value) | Slot::Cached(value) => Some(value),
        }
    }
}

// -----------------------------------------------------------------------------
// Object

/// An instance of a host class.
///
/// Holds one [`Slot`] per declared field, in [`ClassInfo::fields`] order,
/// plus the dynamic fields created by writes to undeclared properties.
///
/// There are two ways to reach a field:
///
/// - The raw API ([`field`](Self::field), [`store`](Self::store),
///   [`unset`](Self::unset), ...) reads and writes slots as the class itself
///   would. Accessor functions use it, it never dispatches.
/// - [`get`](Self::get) and [`set`](Self::set) behave like an outside caller:
///   a public present field, a dynamic field or a materialized lazy value is
///   accessed directly, anything else goes through [accessor dispatch].
///
/// [accessor dispatch]: crate::access
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use vc_property::class::{Class, ClassInfo};
/// use vc_property::{AccessError, Object, Value};
///
/// struct Clock;
///
/// impl Class for Clock {
///     fn class_info() -> ClassInfo {
///         ClassInfo::builder::<Self>("Clock")
///             .private("seconds", 0_i64)
///             .getter("seconds", |obj| Ok(obj.field("seconds").cloned().unwrap_or_else(Value::unit)))
///             .build()
///     }
/// }
///
/// let mut clock = Object::new(Arc::new(Clock::class_info()));
///
/// clock.store("seconds", 90_i64);
/// assert_eq!(clock.get("seconds").unwrap(), Value::from(90_i64));
/// assert!(matches!(clock.set("seconds", 0_i64), Err(AccessError::NotWritable { .. })));
/// ```
#[derive(Clone)]
pub struct Object {
    class: Arc<ClassInfo>,
    slots: Vec<Slot>,
    dynamic: Vec<(Box<str>, Slot)>,
}

impl Object {
    /// Creates an instance with every declared field at its initial value.
    pub fn new(class: Arc<ClassInfo>) -> Self {
        let slots = class
            .fields()
            .iter()
            .map(|field| match field.initial_value() {
                Some(value) => Slot::Stored(value.clone()),
                None => Slot::Unset,
            })
            .collect();
        Self {
            class,
            slots,
            dynamic: Vec::new(),
        }
    }

    #[inline]
    pub fn class(&self) -> &Arc<ClassInfo> {
        &self.class
    }

    #[inline]
    pub fn class_name(&self) -> &'static str {
        self.class.name()
    }

    /// Check if the object is an instance of `T`, not counting parents.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.class.type_is::<T>()
    }

    // -------------------------------------------------------------------------
    // Raw field access

    fn dynamic_index(&self, name: &str) -> Option<usize> {
        self.dynamic.iter().position(|(key, _)| &**key == name)
    }

    /// Returns the slot of the field `name`, declared or dynamic.
    pub fn slot(&self, name: &str) -> Option<&Slot> {
        match self.class.field_index(name) {
            Some(index) => self.slots.get(index),
            None => self
                .dynamic
                .iter()
                .find(|(key, _)| &**key == name)
                .map(|(_, slot)| slot),
        }
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut Slot> {
        match self.class.field_index(name) {
            Some(index) => self.slots.get_mut(index),
            None => self
                .dynamic
                .iter_mut()
                .find(|(key, _)| &**key == name)
                .map(|(_, slot)| slot),
        }
    }

    /// Returns the value of the field `name`, `None` if absent.
    #[inline]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.slot(name).and_then(Slot::value)
    }

    /// Returns the value of the field `name` if it is present and a `T`.
    #[inline]
    pub fn field_as<T: Any>(&self, name: &str) -> Option<&T> {
        self.field(name).and_then(Value::downcast_ref)
    }

    #[inline]
    pub fn field_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.slot_mut(name).and_then(Slot::value_mut)
    }

    fn write(&mut self, name: &str, slot: Slot) {
        match self.slot_mut(name) {
            Some(old) => *old = slot,
            None => self.dynamic.push((Box::from(name), slot)),
        }
    }

    /// Writes the field `name`, creating a dynamic field if it is not declared.
    #[inline]
    pub fn store(&mut self, name: &str, value: impl Into<Value>) {
        self.write(name, Slot::Stored(value.into()));
    }

    /// Writes a lazily computed value into the field `name`.
    #[inline]
    pub fn materialize(&mut self, name: &str, value: Value) {
        self.write(name, Slot::Cached(value));
    }

    /// Makes the field `name` absent, returning its previous value.
    ///
    /// A dynamic field is removed.
    pub fn unset(&mut self, name: &str) -> Option<Value> {
        match self.class.field_index(name) {
            Some(index) => self.slots.get_mut(index).and_then(Slot::take),
            None => {
                let index = self.dynamic_index(name)?;
                self.dynamic.remove(index).1.take()
            }
        }
    }

    /// Returns `true` if the field `name` is present.
    #[inline]
    pub fn is_set(&self, name: &str) -> bool {
        self.slot(name).is_some_and(Slot::is_set)
    }

    /// Returns `true` if the field `name` holds a value materialized by a
    /// lazy getter.
    #[inline]
    pub fn is_materialized(&self, name: &str) -> bool {
        self.slot(name).is_some_and(Slot::is_cached)
    }

    /// Returns `true` if the class declares a field `name`.
    #[inline]
    pub fn is_declared(&self, name: &str) -> bool {
        self.class.is_declared(name)
    }

    #[inline]
    pub fn declared_field(&self, name: &str) -> Option<&FieldInfo> {
        self.class.field(name)
    }

    /// Returns the visibility of the property `name` as storage.
    ///
    /// The declared visibility for a declared field, `Public` for a present
    /// dynamic field, and `None` if there is no storage at all.
    pub fn property_visibility(&self, name: &str) -> Option<Visibility> {
        match self.class.field(name) {
            Some(field) => Some(field.visibility()),
            None => self.dynamic_index(name).map(|_| Visibility::Public),
        }
    }

    /// Iterates over the present fields, declared fields first.
    pub fn present_fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        let declared = self
            .class
            .fields()
            .iter()
            .zip(&self.slots)
            .filter_map(|(field, slot)| Some((field.name(), slot.value()?)));
        let dynamic = self
            .dynamic
            .iter()
            .filter_map(|(name, slot)| Some((&**name, slot.value()?)));
        declared.chain(dynamic)
    }

    /// Iterates over the present fields visible from the root class.
    ///
    /// Private fields declared by subclasses are skipped.
    pub fn visible_fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        let class = &*self.class;
        let declared = class
            .fields()
            .iter()
            .zip(&self.slots)
            .filter(|(field, _)| class.in_scope(field))
            .filter_map(|(field, slot)| Some((field.name(), slot.value()?)));
        let dynamic = self
            .dynamic
            .iter()
            .filter_map(|(name, slot)| Some((&**name, slot.value()?)));
        declared.chain(dynamic)
    }

    /// Iterates over the declared fields and their slots.
    pub fn slots(&self) -> impl Iterator<Item = (&FieldInfo, &Slot)> {
        self.class.fields().iter().zip(&self.slots)
    }

    /// Iterates over the dynamic fields.
    pub fn dynamic_fields(&self) -> impl Iterator<Item = (&str, &Slot)> {
        self.dynamic.iter().map(|(name, slot)| (&**name, slot))
    }

    pub(crate) fn store_at(&mut self, index: usize, value: Value) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = Slot::Stored(value);
        }
    }

    pub(crate) fn store_dynamic(&mut self, name: &str, value: Value) {
        match self.dynamic_index(name) {
            Some(index) => self.dynamic[index].1 = Slot::Stored(value),
            None => self.dynamic.push((Box::from(name), Slot::Stored(value))),
        }
    }

    /// Unsets every present field whose name matches `f`.
    pub(crate) fn unset_where(&mut self, mut f: impl FnMut(&str) -> bool) -> usize {
        let mut count = 0;
        for (field, slot) in self.class.fields().iter().zip(&mut self.slots) {
            if slot.is_set() && f(field.name()) {
                *slot = Slot::Unset;
                count += 1;
            }
        }
        let before = self.dynamic.len();
        self.dynamic.retain(|(name, slot)| !(slot.is_set() && f(name)));
        count + (before - self.dynamic.len())
    }

    // -------------------------------------------------------------------------
    // External access

    // A public present field, a dynamic field or a materialized lazy value.
    fn accessible(&self, property: &str) -> Option<&Value> {
        match self.class.field_index(property) {
            Some(index) => {
                let slot = self.slots.get(index)?;
                let public = self.class.fields()[index].visibility().is_public();
                if public || slot.is_cached() {
                    slot.value()
                } else {
                    None
                }
            }
            None => self.field(property),
        }
    }

    /// Reads `property` as an outside caller.
    ///
    /// # Errors
    ///
    /// See [`access::get`].
    pub fn get(&mut self, property: &str) -> Result<Value, AccessError> {
        match self.accessible(property) {
            Some(value) => Ok(value.clone()),
            None => access::get(self, property),
        }
    }

    /// Writes `property` as an outside caller.
    ///
    /// # Errors
    ///
    /// See [`access::set`].
    pub fn set(&mut self, property: &str, value: impl Into<Value>) -> Result<(), AccessError> {
        let direct = match self.class.field_index(property) {
            Some(index) => {
                self.slots[index].is_set() && self.class.fields()[index].visibility().is_public()
            }
            None => self.is_set(property),
        };
        if direct {
            self.store(property, value);
            Ok(())
        } else {
            access::set(self, property, value.into())
        }
    }

    /// See [`access::has_property`].
    #[inline]
    pub fn has_property(&self, property: &str) -> bool {
        access::has_property(self, property)
    }

    /// See [`access::has_method`].
    #[inline]
    pub fn has_method(&self, name: &str) -> bool {
        access::has_method(self, name)
    }

    /// Calls the method `name` without arguments.
    ///
    /// Plain methods and getters can be called, a lazy getter called this way
    /// does not materialize its result. Returns `None` if the method does not
    /// exist or needs an argument.
    pub fn call(&mut self, name: &str) -> Option<Result<Value, AccessError>> {
        match self.class.method(name).copied()? {
            Method::Call(f) | Method::Getter(f) | Method::LazyGetter(f) => Some(f(self)),
            Method::Setter(_) | Method::LazySetter(_) => None,
        }
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.class.type_id() == other.class.type_id()
            && self.slots == other.slots
            && self.dynamic == other.dynamic
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(self.class.name());
        for (field, slot) in self.slots() {
            s.field(field.name(), slot);
        }
        for (name, slot) in self.dynamic_fields() {
            s.field(name, slot);
        }
        s.finish()
    }
}
