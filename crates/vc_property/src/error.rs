use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use thiserror::Error;

// -----------------------------------------------------------------------------
// AccessError

/// An error raised while reading or writing a property.
///
/// `NotDefined`, `NotReadable` and `NotWritable` are the three diagnoses of
/// accessor dispatch. They are programming errors: they are never retried
/// and never replaced by a default value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AccessError {
    /// The property has neither storage nor an accessor.
    #[error("Unknown or inaccessible property \"{property}\" for object of class \"{class}\"{available}.")]
    NotDefined {
        property: String,
        class: &'static str,
        available: AvailableFields,
    },

    /// The property has storage or a setter, but nothing to read it with.
    #[error("The property \"{property}\" for object of class \"{class}\" is not readable.")]
    NotReadable {
        property: String,
        class: &'static str,
    },

    /// The property has storage or a getter, but nothing to write it with.
    #[error("The property \"{property}\" for object of class \"{class}\" is not writable.")]
    NotWritable {
        property: String,
        class: &'static str,
    },

    /// A setter rejected a value of the wrong type.
    #[error("Invalid value for property \"{property}\": expected `{expected}`, found `{found}`.")]
    InvalidValue {
        property: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl AccessError {
    /// Returns the name of the property the error is about.
    pub fn property(&self) -> &str {
        match self {
            AccessError::NotDefined { property, .. }
            | AccessError::NotReadable { property, .. }
            | AccessError::NotWritable { property, .. }
            | AccessError::InvalidValue { property, .. } => property.as_str(),
        }
    }

    /// Returns the class name of the host, if the error carries one.
    pub fn class(&self) -> Option<&'static str> {
        match self {
            AccessError::NotDefined { class, .. }
            | AccessError::NotReadable { class, .. }
            | AccessError::NotWritable { class, .. } => Some(*class),
            AccessError::InvalidValue { .. } => None,
        }
    }
}

// -----------------------------------------------------------------------------
// AvailableFields

/// The present fields listed by [`AccessError::NotDefined`].
///
/// Displays as ` (available properties: a, b)`, or nothing when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailableFields(pub Vec<String>);

impl AvailableFields {
    #[inline]
    pub fn names(&self) -> &[String] {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AvailableFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((first, rest)) = self.0.split_first() else {
            return Ok(());
        };
        write!(f, " (available properties: {first}")?;
        for name in rest {
            write!(f, ", {name}")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec;

    use super::*;

    #[test]
    fn not_defined_lists_fields() {
        let err = AccessError::NotDefined {
            property: "undefined".into(),
            class: "PropertyList",
            available: AvailableFields(vec!["public".into(), "protected".into()]),
        };
        assert_eq!(
            err.to_string(),
            "Unknown or inaccessible property \"undefined\" for object of class \"PropertyList\" (available properties: public, protected)."
        );
    }

    #[test]
    fn not_defined_without_fields() {
        let err = AccessError::NotDefined {
            property: String::from("undefined"),
            class: "UndefinedProperty",
            available: AvailableFields::default(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown or inaccessible property \"undefined\" for object of class \"UndefinedProperty\"."
        );
        assert_eq!(err.property(), "undefined");
        assert_eq!(err.class(), Some("UndefinedProperty"));
    }
}
