use alloc::boxed::Box;
use alloc::string::String;
use core::any::{Any, type_name};
use core::fmt;

use crate::AccessError;

// -----------------------------------------------------------------------------
// PropertyValue

/// A value that can be stored in a property slot.
///
/// Implemented for every `'static` type that is `Clone + PartialEq + Debug`
/// and thread-safe, so class descriptors holding defaults can be shared.
pub trait PropertyValue: Any + Send + Sync {
    /// Clones the value into a new box.
    fn clone_value(&self) -> Box<dyn PropertyValue>;

    /// Compares with another value, `false` when the types differ.
    fn eq_value(&self, other: &dyn PropertyValue) -> bool;

    /// Formats the inner value with its `Debug` impl.
    fn debug_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    /// Returns the type name of the inner value.
    fn value_type_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T> PropertyValue for T
where
    T: Any + Send + Sync + Clone + PartialEq + fmt::Debug,
{
    fn clone_value(&self) -> Box<dyn PropertyValue> {
        Box::new(self.clone())
    }

    fn eq_value(&self, other: &dyn PropertyValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn debug_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }

    #[inline]
    fn value_type_name(&self) -> &'static str {
        type_name::<T>()
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    #[inline]
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

// -----------------------------------------------------------------------------
// Value

/// A type-erased property value.
///
/// The unit value `()` stands for "no value": a declared field that has a
/// slot but no meaningful content.
///
/// # Examples
///
/// ```
/// use vc_property::Value;
///
/// let value = Value::from(60_i64);
/// assert!(value.is::<i64>());
/// assert_eq!(value.downcast_ref::<i64>(), Some(&60));
/// assert_eq!(value.clone(), Value::from(60_i64));
///
/// let text = Value::from("success");
/// assert_eq!(text.downcast::<String>().unwrap(), "success");
/// ```
pub struct Value(Box<dyn PropertyValue>);

impl Value {
    /// Wraps a value.
    ///
    /// Passing a `Value` nests it; use the value directly instead.
    #[inline]
    pub fn new<T: PropertyValue>(value: T) -> Self {
        Self(Box::new(value))
    }

    /// Returns the unit value.
    #[inline]
    pub fn unit() -> Self {
        Self::new(())
    }

    /// Returns `true` if this is the unit value.
    #[inline]
    pub fn is_unit(&self) -> bool {
        self.is::<()>()
    }

    /// Returns `true` if the inner value is a `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.0.as_any().is::<T>()
    }

    /// Returns the type name of the inner value.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.0.value_type_name()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.0.as_any_mut().downcast_mut::<T>()
    }

    /// Takes the inner value out, or returns `self` if it is not a `T`.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        if !self.is::<T>() {
            return Err(self);
        }
        match self.0.into_any().downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => unreachable!("type checked above"),
        }
    }

    /// Like [`downcast`](Self::downcast), but reports a mismatch as
    /// [`AccessError::InvalidValue`] for `property`.
    ///
    /// Meant for setters that only accept one type.
    pub fn into_typed<T: Any>(self, property: &str) -> Result<T, AccessError> {
        self.downcast::<T>().map_err(|value| AccessError::InvalidValue {
            property: property.into(),
            expected: type_name::<T>(),
            found: value.type_name(),
        })
    }
}

impl Clone for Value {
    #[inline]
    fn clone(&self) -> Self {
        Self(self.0.clone_value())
    }
}

impl PartialEq for Value {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_value(&*other.0)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.debug_value(f)
    }
}

macro_rules! impl_from_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::new(value)
                }
            }
        )*
    };
}

impl_from_value!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    String,
);

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::new(String::from(value))
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::Value;
    use crate::AccessError;

    #[test]
    fn compare_across_types() {
        assert_eq!(Value::from(1_i64), Value::from(1_i64));
        assert_ne!(Value::from(1_i64), Value::from(1_i32));
        assert_ne!(Value::from("1"), Value::from(1_i64));
        assert!(Value::unit().is_unit());
    }

    #[test]
    fn custom_types_round_trip() {
        let value = Value::new(vec![1_u8, 2, 3]);
        let copy = value.clone();
        assert_eq!(copy.downcast::<Vec<u8>>().unwrap(), vec![1, 2, 3]);

        let value = value.downcast::<String>().unwrap_err();
        assert_eq!(value.downcast_ref::<Vec<u8>>().map(Vec::len), Some(3));
    }

    #[test]
    fn into_typed_reports_mismatch() {
        let err = Value::from("now").into_typed::<i64>("seconds").unwrap_err();
        assert!(matches!(
            err,
            AccessError::InvalidValue { ref property, .. } if property == "seconds"
        ));
    }
}
