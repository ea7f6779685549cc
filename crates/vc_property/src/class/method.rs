use core::fmt;

use crate::format::AccessorKind;
use crate::{AccessError, Object, Value};

// -----------------------------------------------------------------------------
// Function pointers

/// An eager getter, a lazy getter, or a plain method without arguments.
pub type Getter = fn(&mut Object) -> Result<Value, AccessError>;

/// An eager setter. It is fully responsible for storage.
pub type Setter = fn(&mut Object, Value) -> Result<(), AccessError>;

/// A lazy setter. Its return value is stored into the property's field.
pub type LazySetter = fn(&mut Object, Value) -> Result<Value, AccessError>;

// -----------------------------------------------------------------------------
// Method

/// An entry of a class method table.
#[derive(Clone, Copy)]
pub enum Method {
    Getter(Getter),
    LazyGetter(Getter),
    Setter(Setter),
    LazySetter(LazySetter),
    /// A method that is not an accessor.
    Call(Getter),
}

impl Method {
    /// Returns the accessor kind and laziness, `None` for [`Method::Call`].
    #[inline]
    pub const fn accessor(&self) -> Option<(AccessorKind, bool)> {
        match self {
            Method::Getter(_) => Some((AccessorKind::Getter, false)),
            Method::LazyGetter(_) => Some((AccessorKind::Getter, true)),
            Method::Setter(_) => Some((AccessorKind::Setter, false)),
            Method::LazySetter(_) => Some((AccessorKind::Setter, true)),
            Method::Call(_) => None,
        }
    }

    #[inline]
    pub const fn is_accessor(&self) -> bool {
        !matches!(self, Method::Call(_))
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Getter(_) => "Getter",
            Method::LazyGetter(_) => "LazyGetter",
            Method::Setter(_) => "Setter",
            Method::LazySetter(_) => "LazySetter",
            Method::Call(_) => "Call",
        })
    }
}

// -----------------------------------------------------------------------------
// AccessorSet

/// The accessors bound to one property, resolved when the class is built.
#[derive(Clone, Copy, Default)]
pub struct AccessorSet {
    pub getter: Option<Getter>,
    pub lazy_getter: Option<Getter>,
    pub setter: Option<Setter>,
    pub lazy_setter: Option<LazySetter>,
}

impl AccessorSet {
    /// An empty set, for properties without accessors.
    pub const EMPTY: Self = Self {
        getter: None,
        lazy_getter: None,
        setter: None,
        lazy_setter: None,
    };

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.getter.is_none()
            && self.lazy_getter.is_none()
            && self.setter.is_none()
            && self.lazy_setter.is_none()
    }

    /// Returns `true` if the accessor of `kind` and laziness is bound.
    #[inline]
    pub const fn has(&self, kind: AccessorKind, lazy: bool) -> bool {
        match (kind, lazy) {
            (AccessorKind::Getter, false) => self.getter.is_some(),
            (AccessorKind::Getter, true) => self.lazy_getter.is_some(),
            (AccessorKind::Setter, false) => self.setter.is_some(),
            (AccessorKind::Setter, true) => self.lazy_setter.is_some(),
        }
    }

    /// Returns `true` if an eager or lazy setter is bound.
    #[inline]
    pub const fn has_any_setter(&self) -> bool {
        self.setter.is_some() || self.lazy_setter.is_some()
    }

    pub(crate) fn bind(&mut self, method: Method) {
        match method {
            Method::Getter(f) => self.getter = Some(f),
            Method::LazyGetter(f) => self.lazy_getter = Some(f),
            Method::Setter(f) => self.setter = Some(f),
            Method::LazySetter(f) => self.lazy_setter = Some(f),
            Method::Call(_) => {}
        }
    }
}

impl fmt::Debug for AccessorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessorSet")
            .field("getter", &self.getter.is_some())
            .field("lazy_getter", &self.lazy_getter.is_some())
            .field("setter", &self.setter.is_some())
            .field("lazy_setter", &self.lazy_setter.is_some())
            .finish()
    }
}
