use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use serde_core::de::{self, Visitor};
use serde_core::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::class::{FieldInfo, Visibility};

// -----------------------------------------------------------------------------
// StorageKey

/// The key a field is persisted under.
///
/// Two levels of an inheritance chain may both declare a private field with
/// the same name, so private keys are qualified with the declaring class:
///
/// | field                       | key             |
/// |-----------------------------|-----------------|
/// | public or dynamic `name`    | `name`          |
/// | protected `name`            | `*::name`       |
/// | private `name` of `Owner`   | `Owner::name`   |
///
/// A public name that is empty or contains `::` is written with a leading
/// `::`, so dynamic fields such as `a::b` keep their kind: `::a::b`.
///
/// # Examples
///
/// ```
/// use vc_property::serial::StorageKey;
///
/// let key: StorageKey = "Account::password".parse().unwrap();
/// assert_eq!(key.owner(), Some("Account"));
/// assert_eq!(key.name(), "password");
/// assert_eq!(key.to_string(), "Account::password");
///
/// assert_eq!("*::email".parse::<StorageKey>().unwrap(), StorageKey::protected("email"));
/// assert_eq!("email".parse::<StorageKey>().unwrap(), StorageKey::public("email"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StorageKey {
    Public(Cow<'static, str>),
    Protected(Cow<'static, str>),
    Private {
        owner: Cow<'static, str>,
        name: Cow<'static, str>,
    },
}

const PROTECTED_OWNER: &str = "*";
const SEPARATOR: &str = "::";

impl StorageKey {
    /// Returns the key of a declared field.
    pub fn of(field: &FieldInfo) -> Self {
        let name = Cow::Borrowed(field.name());
        match field.visibility() {
            Visibility::Public => StorageKey::Public(name),
            Visibility::Protected => StorageKey::Protected(name),
            Visibility::Private => StorageKey::Private {
                owner: Cow::Borrowed(field.owner()),
                name,
            },
        }
    }

    #[inline]
    pub fn public(name: impl Into<Cow<'static, str>>) -> Self {
        StorageKey::Public(name.into())
    }

    #[inline]
    pub fn protected(name: impl Into<Cow<'static, str>>) -> Self {
        StorageKey::Protected(name.into())
    }

    #[inline]
    pub fn private(
        owner: impl Into<Cow<'static, str>>,
        name: impl Into<Cow<'static, str>>,
    ) -> Self {
        StorageKey::Private {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Returns the key of a dynamic field.
    #[inline]
    pub fn dynamic(name: &str) -> Self {
        StorageKey::Public(Cow::Owned(String::from(name)))
    }

    /// Returns the field name.
    pub fn name(&self) -> &str {
        match self {
            StorageKey::Public(name)
            | StorageKey::Protected(name)
            | StorageKey::Private { name, .. } => name,
        }
    }

    pub fn visibility(&self) -> Visibility {
        match self {
            StorageKey::Public(_) => Visibility::Public,
            StorageKey::Protected(_) => Visibility::Protected,
            StorageKey::Private { .. } => Visibility::Private,
        }
    }

    /// Returns the declaring class of a private field.
    pub fn owner(&self) -> Option<&str> {
        match self {
            StorageKey::Private { owner, .. } => Some(&**owner),
            _ => None,
        }
    }

    /// Returns `true` if the key designates `field`.
    pub fn matches(&self, field: &FieldInfo) -> bool {
        self.name() == field.name()
            && self.visibility() == field.visibility()
            && self.owner().is_none_or(|owner| owner == field.owner())
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageKey::Public(name) if name.is_empty() || name.contains(SEPARATOR) => {
                write!(f, "{SEPARATOR}{name}")
            }
            StorageKey::Public(name) => f.write_str(name),
            StorageKey::Protected(name) => write!(f, "{PROTECTED_OWNER}{SEPARATOR}{name}"),
            StorageKey::Private { owner, name } => write!(f, "{owner}{SEPARATOR}{name}"),
        }
    }
}

// -----------------------------------------------------------------------------
// Parsing

/// An error returned when a [`StorageKey`] cannot be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseStorageKeyError {
    #[error("storage key `{0}` has an empty field name")]
    EmptyName(String),
}

impl FromStr for StorageKey {
    type Err = ParseStorageKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(name) = s.strip_prefix(SEPARATOR) {
            return Ok(StorageKey::dynamic(name));
        }

        if let Some(name) = s
            .strip_prefix(PROTECTED_OWNER)
            .and_then(|rest| rest.strip_prefix(SEPARATOR))
        {
            if name.is_empty() {
                return Err(ParseStorageKeyError::EmptyName(s.into()));
            }
            return Ok(StorageKey::Protected(Cow::Owned(name.into())));
        }

        let Some((owner, name)) = s.rsplit_once(SEPARATOR) else {
            if s.is_empty() {
                return Err(ParseStorageKeyError::EmptyName(String::new()));
            }
            return Ok(StorageKey::dynamic(s));
        };

        if name.is_empty() {
            return Err(ParseStorageKeyError::EmptyName(s.into()));
        }

        Ok(StorageKey::Private {
            owner: Cow::Owned(owner.into()),
            name: Cow::Owned(name.into()),
        })
    }
}

// -----------------------------------------------------------------------------
// Serde

impl Serialize for StorageKey {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StorageKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StorageKeyVisitor;

        impl Visitor<'_> for StorageKeyVisitor {
            type Value = StorageKey;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a storage key such as `name`, `*::name` or `Owner::name`")
            }

            #[inline]
            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                value.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(StorageKeyVisitor)
    }
}
