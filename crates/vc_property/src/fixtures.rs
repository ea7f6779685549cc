//! Classes shared by the unit tests.

use alloc::string::String;
use alloc::sync::Arc;

use crate::class::{Class, ClassInfo, Visibility};
use crate::{AccessError, Object, Value};

pub(crate) fn instance<T: Class>() -> Object {
    Object::new(Arc::new(T::class_info()))
}

pub(crate) fn raw(obj: &Object, name: &str) -> Value {
    obj.field(name).cloned().unwrap_or_else(Value::unit)
}

fn unit(_: &mut Object) -> Result<Value, AccessError> {
    Ok(Value::unit())
}

fn ignore(_: &mut Object, _: Value) -> Result<(), AccessError> {
    Ok(())
}

fn keep(_: &mut Object, value: Value) -> Result<Value, AccessError> {
    Ok(value)
}

// -----------------------------------------------------------------------------
// Undefined

pub(crate) struct UndefinedProperty;

impl Class for UndefinedProperty {
    fn class_info() -> ClassInfo {
        ClassInfo::builder::<Self>("UndefinedProperty").build()
    }
}

pub(crate) struct UnsetPublicProperty;

impl Class for UnsetPublicProperty {
    fn class_info() -> ClassInfo {
        ClassInfo::builder::<Self>("UnsetPublicProperty")
            .public("property", "value")
            .build()
    }
}

pub(crate) struct PropertyList;

impl Class for PropertyList {
    fn class_info() -> ClassInfo {
        ClassInfo::builder::<Self>("PropertyList")
            .public("public", 1_i32)
            .protected("protected", 2_i32)
            .private("private", 3_i32)
            .build()
    }
}

// -----------------------------------------------------------------------------
// Read-only

pub(crate) struct ReadOnlyPrivateProperty;

impl Class for ReadOnlyPrivateProperty {
    fn class_info() -> ClassInfo {
        ClassInfo::builder::<Self>("ReadOnlyPrivateProperty")
            .private("property", "success")
            .getter("property", |obj| Ok(raw(obj, "property")))
            .build()
    }
}

pub(crate) struct ReadOnlyProtectedProperty;

impl Class for ReadOnlyProtectedProperty {
    fn class_info() -> ClassInfo {
        ClassInfo::builder::<Self>("ReadOnlyProtectedProperty")
            .protected("property", "success")
            .getter("property", |obj| Ok(raw(obj, "property")))
            .build()
    }
}

pub(crate) struct ReadOnlyVirtualProperty;

impl Class for ReadOnlyVirtualProperty {
    fn class_info() -> ClassInfo {
        ClassInfo::builder::<Self>("ReadOnlyVirtualProperty")
            .public("another_property", ())
            .getter("property", |obj| Ok(raw(obj, "another_property")))
            .build()
    }
}

// -----------------------------------------------------------------------------
// Write-only

fn check(obj: &mut Object) -> Result<Value, AccessError> {
    Ok(raw(obj, "property"))
}

fn store_property(obj: &mut Object, value: Value) -> Result<(), AccessError> {
    obj.store("property", value);
    Ok(())
}

pub(crate) struct WriteOnlyPrivateProperty;

impl Class for WriteOnlyPrivateProperty {
    fn class_info() -> ClassInfo {
        ClassInfo::builder::<Self>("WriteOnlyPrivateProperty")
            .private("property", ())
            .setter("property", store_property)
            .method("check", check)
            .build()
    }
}

pub(crate) struct WriteOnlyProtectedProperty;

impl Class for WriteOnlyProtectedProperty {
    fn class_info() -> ClassInfo {
        ClassInfo::builder::<Self>("WriteOnlyProtectedProperty")
            .protected("property", ())
            .setter("property", store_property)
            .method("check", check)
            .build()
    }
}

pub(crate) struct WriteOnlyVirtualProperty;

impl Class for WriteOnlyVirtualProperty {
    fn class_info() -> ClassInfo {
        ClassInfo::builder::<Self>("WriteOnlyVirtualProperty")
            .public("another_property", ())
            .setter("property", |obj, value| {
                obj.store("another_property", value);
                Ok(())
            })
            .build()
    }
}

// -----------------------------------------------------------------------------
// Virtual

pub(crate) struct VirtualProperty;

impl Class for VirtualProperty {
    fn class_info() -> ClassInfo {
        ClassInfo::builder::<Self>("VirtualProperty")
            .public("seconds", 0_i64)
            .setter("minutes", |obj, value| {
                let minutes = value.into_typed::<i64>("minutes")?;
                obj.store("seconds", minutes * 60);
                Ok(())
            })
            .getter("minutes", |obj| {
                let seconds = obj.field_as::<i64>("seconds").copied().unwrap_or(0);
                Ok(Value::from(seconds / 60))
            })
            .build()
    }
}

/// Seconds since the epoch, parsed from a string on first read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Timestamp(pub u64);

pub(crate) struct TypeControl;

impl Class for TypeControl {
    fn class_info() -> ClassInfo {
        ClassInfo::builder::<Self>("TypeControl")
            .private("timestamp", ())
            .setter("timestamp", |obj, value| {
                obj.store("timestamp", value);
                Ok(())
            })
            .getter("timestamp", |obj| {
                let value = raw(obj, "timestamp");
                let timestamp = if let Some(timestamp) = value.downcast_ref::<Timestamp>() {
                    return Ok(Value::new(*timestamp));
                } else if value.is_unit() {
                    Timestamp(0)
                } else {
                    let text = value.into_typed::<String>("timestamp")?;
                    let seconds = text.parse().map_err(|_| AccessError::InvalidValue {
                        property: "timestamp".into(),
                        expected: "seconds since the epoch",
                        found: "malformed string",
                    })?;
                    Timestamp(seconds)
                };
                obj.store("timestamp", Value::new(timestamp));
                Ok(Value::new(timestamp))
            })
            .build()
    }
}

// -----------------------------------------------------------------------------
// Default & lazy

pub(crate) struct DefaultProperty;

impl Class for DefaultProperty {
    fn class_info() -> ClassInfo {
        ClassInfo::builder::<Self>("DefaultProperty")
            .public("value", ())
            .getter("value", |_| Ok(Value::from("default-value")))
            .build()
    }
}

pub(crate) struct LazyProperty;

impl Class for LazyProperty {
    fn class_info() -> ClassInfo {
        ClassInfo::builder::<Self>("LazyProperty")
            .lazy_getter("property", |_| Ok(Value::from("success")))
            .build()
    }
}

pub(crate) struct CountingLazy;

impl Class for CountingLazy {
    fn class_info() -> ClassInfo {
        ClassInfo::builder::<Self>("CountingLazy")
            .private("calls", 0_u32)
            .lazy_getter("answer", |obj| {
                if let Some(calls) = obj.field_mut("calls").and_then(Value::downcast_mut::<u32>) {
                    *calls += 1;
                }
                Ok(Value::from(42_u32))
            })
            .build()
    }
}

pub(crate) struct DeclaredLazyProperty;

impl Class for DeclaredLazyProperty {
    fn class_info() -> ClassInfo {
        ClassInfo::builder::<Self>("DeclaredLazyProperty")
            .private("calls", 0_u32)
            .unset_field("answer", Visibility::Private)
            .lazy_getter("answer", |obj| {
                if let Some(calls) = obj.field_mut("calls").and_then(Value::downcast_mut::<u32>) {
                    *calls += 1;
                }
                Ok(Value::from(42_u32))
            })
            .build()
    }
}

pub(crate) struct LazySetProperty;

impl Class for LazySetProperty {
    fn class_info() -> ClassInfo {
        ClassInfo::builder::<Self>("LazySetProperty")
            .protected("property", ())
            .lazy_setter("property", |_, value| {
                let text = value.into_typed::<String>("property")?;
                Ok(Value::from(text.to_uppercase()))
            })
            .getter("property", |obj| Ok(raw(obj, "property")))
            .build()
    }
}

// -----------------------------------------------------------------------------
// has_property

pub(crate) struct HasPropertyFixture;

impl Class for HasPropertyFixture {
    fn class_info() -> ClassInfo {
        ClassInfo::builder::<Self>("HasPropertyFixture")
            .public("public", ())
            .protected("protected", ())
            .private("private", ())
            .unset_field("unset_public", Visibility::Public)
            .unset_field("unset_protected", Visibility::Protected)
            .unset_field("unset_private", Visibility::Private)
            .getter("readonly", unit)
            .lazy_getter("lazy_readonly", unit)
            .setter("writeonly", ignore)
            .lazy_setter("lazy_writeonly", keep)
            .build()
    }
}

pub(crate) struct HasPropertyFixtureCamel;

impl Class for HasPropertyFixtureCamel {
    fn class_info() -> ClassInfo {
        ClassInfo::builder::<Self>("HasPropertyFixtureCamel")
            .camel_case()
            .public("public", ())
            .protected("protected", ())
            .private("private", ())
            .unset_field("unsetPublic", Visibility::Public)
            .unset_field("unsetProtected", Visibility::Protected)
            .unset_field("unsetPrivate", Visibility::Private)
            .getter("readonly", unit)
            .lazy_getter("lazyReadonly", unit)
            .setter("writeonly", ignore)
            .lazy_setter("lazyWriteonly", keep)
            .build()
    }
}

// -----------------------------------------------------------------------------
// Reflection

pub(crate) struct PrivateProperty;

impl Class for PrivateProperty {
    fn class_info() -> ClassInfo {
        ClassInfo::builder::<Self>("PrivateProperty")
            .public("public", ())
            .protected("protected", ())
            .private("private", ())
            .build()
    }
}

pub(crate) struct FacadeProperty;

impl Class for FacadeProperty {
    fn class_info() -> ClassInfo {
        ClassInfo::builder::<Self>("FacadeProperty")
            .private("private", ())
            .private("facade", ())
            .setter("facade", ignore)
            .getter("facade", unit)
            .build()
    }
}

pub(crate) struct PlainAccessorNames;

impl Class for PlainAccessorNames {
    fn class_info() -> ClassInfo {
        ClassInfo::builder::<Self>("PlainAccessorNames")
            .private("x", "x")
            .setter("x", ignore)
            .method("get_x", |obj| Ok(raw(obj, "x")))
            .public("y", "kept")
            .method("lazy_get_y", |_| Ok(Value::from("recomputed")))
            .build()
    }
}

// -----------------------------------------------------------------------------
// Serialization

pub(crate) struct MixedProperties;

impl Class for MixedProperties {
    fn class_info() -> ClassInfo {
        ClassInfo::builder::<Self>("MixedProperties")
            .public("public", "public")
            .public("public_with_lazy_getter", "public_with_lazy_getter")
            .lazy_getter("public_with_lazy_getter", |_| {
                Ok(Value::from("VALUE: public_with_lazy_getter"))
            })
            .protected("protected", "protected")
            .protected("protected_with_getter", "protected_with_getter")
            .protected("protected_with_setter", "protected_with_setter")
            .protected(
                "protected_with_getter_and_setter",
                "protected_with_getter_and_setter",
            )
            .protected("protected_with_lazy_getter", "protected_with_lazy_getter")
            .getter("protected_with_getter", |_| {
                Ok(Value::from("VALUE: protected_with_getter"))
            })
            .setter("protected_with_setter", ignore)
            .getter("protected_with_getter_and_setter", |_| {
                Ok(Value::from("VALUE: protected_with_getter"))
            })
            .setter("protected_with_getter_and_setter", ignore)
            .lazy_getter("protected_with_lazy_getter", |_| {
                Ok(Value::from("VALUE: protected_with_lazy_getter"))
            })
            .build()
    }
}

pub(crate) struct InheritedMixedProperties;

impl Class for InheritedMixedProperties {
    fn class_info() -> ClassInfo {
        ClassInfo::builder::<Self>("InheritedMixedProperties")
            .extends::<MixedProperties>()
            .private("private", "private")
            .private("private_with_getter", "private_with_getter")
            .private("private_with_setter", "private_with_setter")
            .private(
                "private_with_getter_and_setter",
                "private_with_getter_and_setter",
            )
            .private("private_with_lazy_getter", "private_with_lazy_getter")
            .getter("private_with_getter", |_| {
                Ok(Value::from("VALUE: private_with_getter"))
            })
            .setter("private_with_setter", ignore)
            .getter("private_with_getter_and_setter", |_| {
                Ok(Value::from("VALUE: private_with_getter"))
            })
            .setter("private_with_getter_and_setter", ignore)
            .lazy_getter("private_with_lazy_getter", |_| {
                Ok(Value::from("VALUE: private_with_lazy_getter"))
            })
            .build()
    }
}

pub(crate) struct MixedPropertiesCamel;

impl Class for MixedPropertiesCamel {
    fn class_info() -> ClassInfo {
        ClassInfo::builder::<Self>("MixedPropertiesCamel")
            .camel_case()
            .public("public", "public")
            .public("publicWithLazyGetter", "publicWithLazyGetter")
            .lazy_getter("publicWithLazyGetter", |_| {
                Ok(Value::from("VALUE: publicWithLazyGetter"))
            })
            .protected("protected", "protected")
            .protected("protectedWithGetter", "protectedWithGetter")
            .protected("protectedWithSetter", "protectedWithSetter")
            .protected(
                "protectedWithGetterAndSetter",
                "protectedWithGetterAndSetter",
            )
            .protected("protectedWithLazyGetter", "protectedWithLazyGetter")
            .getter("protectedWithGetter", |_| {
                Ok(Value::from("VALUE: protectedWithGetter"))
            })
            .setter("protectedWithSetter", ignore)
            .getter("protectedWithGetterAndSetter", |_| {
                Ok(Value::from("VALUE: protectedWithGetter"))
            })
            .setter("protectedWithGetterAndSetter", ignore)
            .lazy_getter("protectedWithLazyGetter", |_| {
                Ok(Value::from("VALUE: protectedWithLazyGetter"))
            })
            .build()
    }
}

pub(crate) struct InheritedMixedPropertiesCamel;

impl Class for InheritedMixedPropertiesCamel {
    fn class_info() -> ClassInfo {
        ClassInfo::builder::<Self>("InheritedMixedPropertiesCamel")
            .extends::<MixedPropertiesCamel>()
            .private("private", "private")
            .private("privateWithGetter", "privateWithGetter")
            .private("privateWithSetter", "privateWithSetter")
            .private("privateWithGetterAndSetter", "privateWithGetterAndSetter")
            .private("privateWithLazyGetter", "privateWithLazyGetter")
            .getter("privateWithGetter", |_| {
                Ok(Value::from("VALUE: privateWithGetter"))
            })
            .setter("privateWithSetter", ignore)
            .getter("privateWithGetterAndSetter", |_| {
                Ok(Value::from("VALUE: privateWithGetter"))
            })
            .setter("privateWithGetterAndSetter", ignore)
            .lazy_getter("privateWithLazyGetter", |_| {
                Ok(Value::from("VALUE: privateWithLazyGetter"))
            })
            .build()
    }
}

pub(crate) struct B;

impl Class for B {
    fn class_info() -> ClassInfo {
        ClassInfo::builder::<Self>("B").build()
    }
}

pub(crate) struct PropertyWithGetterAndForcedExport;

impl Class for PropertyWithGetterAndForcedExport {
    fn class_info() -> ClassInfo {
        ClassInfo::builder::<Self>("PropertyWithGetterAndForcedExport")
            .extends::<B>()
            .public("property", "value")
            .lazy_getter("property", |_| Ok(Value::from("lazy_value")))
            .build()
    }
}
