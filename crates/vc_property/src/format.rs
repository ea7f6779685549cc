//! Accessor method naming conventions.
//!
//! An accessor method name is derived from a property name, an
//! [`AccessorKind`] and a laziness flag:
//!
//! | property    | kind   | lazy | [`SnakeCase`]        | [`CamelCase`]     |
//! |-------------|--------|------|----------------------|-------------------|
//! | `user_name` | get    | no   | `get_user_name`      |                   |
//! | `userName`  | get    | no   |                      | `getUserName`     |
//! | `user_name` | set    | yes  | `lazy_set_user_name` |                   |
//! | `userName`  | set    | yes  |                      | `lazySetUserName` |
//!
//! A class picks one [`Convention`]; its accessor names are formatted once,
//! when the class is built.

use alloc::string::String;
use core::fmt;

// -----------------------------------------------------------------------------
// AccessorKind

/// Whether an accessor reads or writes a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    Getter,
    Setter,
}

impl AccessorKind {
    /// The name fragment used in method names, `get` or `set`.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            AccessorKind::Getter => "get",
            AccessorKind::Setter => "set",
        }
    }
}

impl fmt::Display for AccessorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The name fragment of lazy accessors.
pub const LAZY: &str = "lazy";

// -----------------------------------------------------------------------------
// FormatName

/// Formats accessor method names.
///
/// Implementations must be pure: the same input always gives the same name.
pub trait FormatName {
    fn format_name(&self, property: &str, kind: AccessorKind, lazy: bool) -> String;
}

/// `[lazy_]{kind}_{property}`.
///
/// # Examples
///
/// ```
/// use vc_property::format::{AccessorKind, FormatName, SnakeCase};
///
/// assert_eq!(SnakeCase.format_name("minutes", AccessorKind::Setter, false), "set_minutes");
/// assert_eq!(SnakeCase.format_name("user_name", AccessorKind::Getter, true), "lazy_get_user_name");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnakeCase;

impl FormatName for SnakeCase {
    fn format_name(&self, property: &str, kind: AccessorKind, lazy: bool) -> String {
        let kind = kind.as_str();
        let mut name = String::with_capacity(LAZY.len() + kind.len() + property.len() + 2);
        if lazy {
            name.push_str(LAZY);
            name.push('_');
        }
        name.push_str(kind);
        name.push('_');
        name.push_str(property);
        name
    }
}

/// `{kind}{Property}`, prefixed as `lazy{Kind}{Property}` when lazy.
///
/// # Examples
///
/// ```
/// use vc_property::format::{AccessorKind, CamelCase, FormatName};
///
/// assert_eq!(CamelCase.format_name("minutes", AccessorKind::Setter, false), "setMinutes");
/// assert_eq!(CamelCase.format_name("userName", AccessorKind::Getter, true), "lazyGetUserName");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CamelCase;

impl FormatName for CamelCase {
    fn format_name(&self, property: &str, kind: AccessorKind, lazy: bool) -> String {
        let mut name = String::from(kind.as_str());
        push_capitalized(&mut name, property);
        if lazy {
            let mut lazy_name = String::from(LAZY);
            push_capitalized(&mut lazy_name, &name);
            lazy_name
        } else {
            name
        }
    }
}

fn push_capitalized(buf: &mut String, s: &str) {
    let mut chars = s.chars();
    if let Some(first) = chars.next() {
        buf.extend(first.to_uppercase());
        buf.push_str(chars.as_str());
    }
}

// -----------------------------------------------------------------------------
// Convention

/// The naming convention of a class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Convention {
    /// See [`SnakeCase`].
    #[default]
    Snake,
    /// See [`CamelCase`].
    Camel,
}

impl FormatName for Convention {
    #[inline]
    fn format_name(&self, property: &str, kind: AccessorKind, lazy: bool) -> String {
        match self {
            Convention::Snake => SnakeCase.format_name(property, kind, lazy),
            Convention::Camel => CamelCase.format_name(property, kind, lazy),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::*;

    const CASES: &[(&str, &str)] = &[
        ("value", "value"),
        ("user_name", "userName"),
        ("private_with_lazy_getter", "privateWithLazyGetter"),
    ];

    fn snake_to_camel(snake: &str) -> String {
        let mut out = String::new();
        let mut upper = false;
        for c in snake.chars() {
            if c == '_' {
                upper = true;
            } else if upper {
                out.extend(c.to_uppercase());
                upper = false;
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn conventions_are_isomorphic() {
        for &(snake, camel) in CASES {
            for kind in [AccessorKind::Getter, AccessorKind::Setter] {
                for lazy in [false, true] {
                    let a = Convention::Snake.format_name(snake, kind, lazy);
                    let b = Convention::Camel.format_name(camel, kind, lazy);
                    assert_eq!(snake_to_camel(&a), b);
                }
            }
        }
    }

    #[test]
    fn camel_capitalizes_unicode() {
        assert_eq!(
            CamelCase.format_name("été", AccessorKind::Getter, false),
            "getÉté"
        );
        assert_eq!(CamelCase.format_name("", AccessorKind::Setter, true), "lazySet");
    }
}
