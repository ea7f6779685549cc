use core::any::TypeId;
use core::fmt;

use crate::Value;

// -----------------------------------------------------------------------------
// Visibility

/// Visibility of a declared field.
///
/// Only `Public` fields can be read or written directly from outside the
/// class; the others go through accessor dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    #[inline]
    pub const fn is_public(self) -> bool {
        matches!(self, Visibility::Public)
    }

    #[inline]
    pub const fn is_private(self) -> bool {
        matches!(self, Visibility::Private)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        })
    }
}

// -----------------------------------------------------------------------------
// FieldInfo

/// A field declaration.
///
/// Created by [`ClassBuilder`](crate::class::ClassBuilder), which records
/// the declaring class as the field's owner.
///
/// # Examples
///
/// ```
/// use vc_property::class::{Class, ClassInfo, Visibility};
///
/// struct Clock;
///
/// impl Class for Clock {
///     fn class_info() -> ClassInfo {
///         ClassInfo::builder::<Self>("Clock")
///             .private("seconds", 0_i64)
///             .build()
///     }
/// }
///
/// let info = Clock::class_info();
/// let field = info.field("seconds").unwrap();
///
/// assert_eq!(field.visibility(), Visibility::Private);
/// assert_eq!(field.owner(), "Clock");
/// assert!(field.is_owned_by::<Clock>());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInfo {
    name: &'static str,
    visibility: Visibility,
    owner: &'static str,
    owner_id: TypeId,
    // `None` means the slot starts unset.
    default: Option<Value>,
}

impl FieldInfo {
    #[inline]
    pub(crate) fn new(
        name: &'static str,
        visibility: Visibility,
        owner: &'static str,
        owner_id: TypeId,
        default: Option<Value>,
    ) -> Self {
        Self {
            name,
            visibility,
            owner,
            owner_id,
            default,
        }
    }

    /// Returns the field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Returns the name of the declaring class.
    #[inline]
    pub const fn owner(&self) -> &'static str {
        self.owner
    }

    /// Returns the `TypeId` of the declaring class.
    #[inline]
    pub const fn owner_id(&self) -> TypeId {
        self.owner_id
    }

    /// Check if the field is declared by `T`.
    #[inline]
    pub fn is_owned_by<T: 'static>(&self) -> bool {
        self.owner_id == TypeId::of::<T>()
    }

    /// Returns the initial value, `None` if the field starts unset.
    #[inline]
    pub fn initial_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}
