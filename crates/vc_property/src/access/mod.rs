//! Accessor dispatch.
//!
//! Given a property name, dispatch looks up the accessors bound to it by the
//! class, prefers eager accessors over lazy ones, falls back to the field of
//! the same name, and reports a typed [`AccessError`](crate::AccessError)
//! when none of those apply.
//!
//! | state of `p`                      | `get(p)`            | `set(p, v)`         |
//! |-----------------------------------|---------------------|---------------------|
//! | eager getter / setter             | getter result       | setter stores       |
//! | lazy getter                       | computed and cached | `v` overrides cache |
//! | lazy setter                       | field or error      | setter result kept  |
//! | non-public field, no accessor     | `NotReadable`       | `NotWritable`       |
//! | only a setter                     | `NotReadable`       | setter stores       |
//! | only a getter, no storage         | getter result       | `NotWritable`       |
//! | nothing                           | `NotDefined`        | dynamic field       |
//!
//! [`Object::get`](crate::Object::get) and [`Object::set`](crate::Object::set)
//! only dispatch when the field is not directly accessible.

// -----------------------------------------------------------------------------
// Modules

mod dispatch;

// -----------------------------------------------------------------------------
// Exports

pub use dispatch::{get, has_method, has_property, set};
