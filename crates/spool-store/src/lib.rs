//! Access-locked primitive scalar store for the Spool ledger.
//!
//! This crate implements the leaf layer of the ledger store: a single flat
//! namespace mapping derived 256-bit slots to scalar values, guarded by a
//! frozen set of authorized writers. Every higher-level module — node
//! registry, partner registry, deposit accounting — keeps its state here and
//! holds no private copies.
//!
//! # Design Rules
//!
//! 1. Reads are public; mutations require an authorized caller.
//! 2. Absence is indistinguishable from the kind's zero value: there is no
//!    "not found" error and no explicit delete.
//! 3. The authorized-writer set is configured before [`PrimitiveStore::freeze`]
//!    and is immutable afterwards. Nobody regains unrestricted access, the
//!    deployer included.
//! 4. Validation precedes every slot write: a failed call leaves the store
//!    byte-for-byte unchanged.
//!
//! # Storage Backends
//!
//! All backends implement the [`SlotBackend`] trait:
//!
//! - [`InMemorySlotBackend`] — `HashMap`-based backend for tests and embedding

pub mod access;
pub mod config;
pub mod error;
pub mod memory;
pub mod store;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use access::AccessLock;
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use memory::InMemorySlotBackend;
pub use store::PrimitiveStore;
pub use traits::SlotBackend;
