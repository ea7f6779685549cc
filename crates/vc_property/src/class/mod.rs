//! Class descriptors.
//!
//! A host type implements [`Class`] and describes its fields, accessors and
//! plain methods with a [`ClassBuilder`]. The resulting [`ClassInfo`] replaces
//! runtime reflection: it is built once and shared by every instance.

// -----------------------------------------------------------------------------
// Modules

mod builder;
mod class_info;
mod field_info;
mod method;

// -----------------------------------------------------------------------------
// Exports

pub use builder::ClassBuilder;
pub use class_info::{Class, ClassInfo};
pub use field_info::{FieldInfo, Visibility};
pub use method::{AccessorSet, Getter, LazySetter, Method, Setter};
