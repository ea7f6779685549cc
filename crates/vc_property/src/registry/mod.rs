//! Class registration and reflection caches.
//!
//! - [`ClassRegistry`]: owns the registered [`ClassInfo`](crate::class::ClassInfo)
//!   descriptors and, per class, the non-public fields and the façade fields.
//! - [`ClassRegistryArc`]: a thread-safe shared registry, requires `std`.

// -----------------------------------------------------------------------------
// Modules

mod class_registry;
mod reflect;

// -----------------------------------------------------------------------------
// Exports

pub use class_registry::{ClassEntry, ClassRegistry};
pub use reflect::FacadeFields;

#[cfg(feature = "std")]
pub use class_registry::ClassRegistryArc;
