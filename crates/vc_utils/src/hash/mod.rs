//! Provide hash containers, re-exports *hashbrown* and *foldhash*.
//!
//! - [`HashMap`]: a `hashbrown` map with [`FixedHashState`], so iteration
//!   order only depends on the inserted keys.
//! - [`NoOpHashMap`]: for keys that already are well distributed hashes,
//!   such as [`TypeId`](core::any::TypeId).

// -----------------------------------------------------------------------------
// Modules

mod hasher;

// -----------------------------------------------------------------------------
// Exports

pub use hasher::{FixedHashState, FixedHasher};
pub use hasher::{NoOpHashState, NoOpHasher};

/// A [`hashbrown::HashMap`] using [`FixedHashState`].
///
/// # Examples
///
/// ```
/// use vc_utils::hash::HashMap;
///
/// let mut methods: HashMap<&str, u32> = HashMap::default();
/// methods.insert("get_name", 1);
///
/// assert_eq!(methods.get("get_name"), Some(&1));
/// ```
pub type HashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;

/// A [`hashbrown::HashMap`] using [`NoOpHashState`].
pub type NoOpHashMap<K, V> = hashbrown::HashMap<K, V, NoOpHashState>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;
