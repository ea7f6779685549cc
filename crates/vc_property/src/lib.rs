#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod object;
mod value;

pub mod access;
pub mod class;
pub mod format;
pub mod registry;
pub mod serial;

#[cfg(test)]
mod fixtures;

// -----------------------------------------------------------------------------
// Top-level exports

pub use error::{AccessError, AvailableFields};
pub use object::{Object, Slot};
pub use value::{PropertyValue, Value};
