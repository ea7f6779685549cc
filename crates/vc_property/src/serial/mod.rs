//! Persistence of object state.
//!
//! [`export_state`] selects the fields worth persisting: present fields
//! without a lazy getter, plus façade fields. [`restore_state`] unsets the
//! lazily computed fields of a restored object. [`Snapshot`] combines both
//! into an in-memory persist and revive cycle.

// -----------------------------------------------------------------------------
// Modules

mod export;
mod snapshot;
mod storage_key;

// -----------------------------------------------------------------------------
// Exports

pub use export::{ExportedState, export_state, restore_state};
pub use snapshot::Snapshot;
pub use storage_key::{ParseStorageKeyError, StorageKey};
