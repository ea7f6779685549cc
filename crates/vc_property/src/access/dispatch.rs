use alloc::string::{String, ToString};
use alloc::vec::Vec;

use log::trace;

use crate::class::{AccessorSet, Visibility};
use crate::error::AvailableFields;
use crate::{AccessError, Object, Value};

macro_rules! dispatch_trace {
    ($($arg:tt)*) => {
        if cfg!(all(debug_assertions, feature = "debug")) {
            trace!($($arg)*);
        }
    };
}

// -----------------------------------------------------------------------------
// Get & Set

/// Reads `property` through its accessors.
///
/// In order:
///
/// 1. an eager getter is invoked and its result returned;
/// 2. a lazy getter is invoked, its result is materialized into the field
///    `property` and returned;
/// 3. otherwise the property is diagnosed as not readable or not defined.
///
/// # Errors
///
/// - [`AccessError::NotReadable`] if the property is declared non-public,
///   or if a setter exists for it.
/// - [`AccessError::NotDefined`] otherwise.
/// - Any error returned by the getter.
pub fn get(object: &mut Object, property: &str) -> Result<Value, AccessError> {
    let accessors = object.class().accessors(property);

    if let Some(getter) = accessors.getter {
        dispatch_trace!("{}::{property}: eager getter", object.class_name());
        return getter(object);
    }

    if let Some(lazy_getter) = accessors.lazy_getter {
        let value = lazy_getter(object)?;
        object.materialize(property, value.clone());
        trace!("{}::{property}: materialized", object.class_name());
        return Ok(value);
    }

    Err(diagnose_unreadable(object, property, accessors))
}

/// Writes `property` through its accessors.
///
/// In order:
///
/// 1. an eager setter is invoked, it is responsible for storage;
/// 2. a lazy setter is invoked and its result is stored into the field
///    `property`;
/// 3. otherwise `value` is stored directly if the property is writable.
///    A declared field with a lazy getter keeps the value as its
///    materialized result, so later reads return it without recomputing.
///
/// # Errors
///
/// - [`AccessError::NotWritable`] if the property is declared non-public
///   without a lazy getter, or if it has no storage but an eager getter.
/// - Any error returned by the setter.
pub fn set(object: &mut Object, property: &str, value: Value) -> Result<(), AccessError> {
    let accessors = object.class().accessors(property);

    if let Some(setter) = accessors.setter {
        dispatch_trace!("{}::{property}: eager setter", object.class_name());
        return setter(object, value);
    }

    if let Some(lazy_setter) = accessors.lazy_setter {
        dispatch_trace!("{}::{property}: lazy setter", object.class_name());
        let value = lazy_setter(object, value)?;
        object.store(property, value);
        return Ok(());
    }

    assert_writable(object, property, accessors)?;
    if accessors.lazy_getter.is_some() && object.is_declared(property) {
        dispatch_trace!("{}::{property}: overrides lazy value", object.class_name());
        object.materialize(property, value);
    } else {
        dispatch_trace!("{}::{property}: direct write", object.class_name());
        object.store(property, value);
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// Queries

/// Returns `true` if `property` has storage or any accessor.
///
/// Storage is a declared field, present or not, or a present dynamic field.
pub fn has_property(object: &Object, property: &str) -> bool {
    object.property_visibility(property).is_some()
        || !object.class().accessors(property).is_empty()
}

/// Returns `true` if the class of `object` has a method named `name`.
///
/// Accessor names are formatted with the class convention.
#[inline]
pub fn has_method(object: &Object, name: &str) -> bool {
    object.class().has_method(name)
}

// -----------------------------------------------------------------------------
// Diagnosis

fn diagnose_unreadable(object: &Object, property: &str, accessors: AccessorSet) -> AccessError {
    let class = object.class_name();

    let hidden = object
        .property_visibility(property)
        .is_some_and(|vis| !vis.is_public());

    if hidden || accessors.has_any_setter() {
        return AccessError::NotReadable {
            property: property.into(),
            class,
        };
    }

    let available: Vec<String> = object
        .visible_fields()
        .map(|(name, _)| name.to_string())
        .collect();

    AccessError::NotDefined {
        property: property.into(),
        class,
        available: AvailableFields(available),
    }
}

fn assert_writable(
    object: &Object,
    property: &str,
    accessors: AccessorSet,
) -> Result<(), AccessError> {
    let writable = match object.property_visibility(property) {
        Some(_) if accessors.lazy_getter.is_some() => true,
        Some(vis) => vis == Visibility::Public,
        None => accessors.getter.is_none(),
    };

    if writable {
        Ok(())
    } else {
        Err(AccessError::NotWritable {
            property: property.into(),
            class: object.class_name(),
        })
    }
}
