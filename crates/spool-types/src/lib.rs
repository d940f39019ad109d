//! Foundation types for the Spool staking-pool ledger store.
//!
//! This crate provides the identity, key, and scalar-value types used
//! throughout the Spool system. Every other Spool crate depends on
//! `spool-types`.
//!
//! # Key Types
//!
//! - [`Address`] — 20-byte caller/participant identity
//! - [`StorageKey`] — opaque 256-bit key, typically the hash of a
//!   human-readable path string
//! - [`Bytes32`] — fixed-length byte-sequence scalar
//! - [`Value`] / [`ValueKind`] — closed tagged-variant scalar model
//! - [`ScalarValue`] — sealed trait binding each Rust scalar type to its kind

pub mod address;
pub mod error;
pub mod key;
pub mod value;

pub use address::Address;
pub use error::TypeError;
pub use key::StorageKey;
pub use value::{Bytes32, ScalarValue, Value, ValueKind};
