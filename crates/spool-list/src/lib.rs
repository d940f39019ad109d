//! Bounds-checked typed list collections over the Spool primitive store.
//!
//! A list is not a materialized structure: it is a length counter plus one
//! scalar slot per `(key, index)` pair, all living in the primitive store's
//! flat namespace. This crate maintains that layout and exposes ordered
//! collection semantics on top of it:
//!
//! - [`ListStore::push`] / [`ListStore::set`] / [`ListStore::get`] /
//!   [`ListStore::count`]
//! - [`ListStore::insert`] — order-preserving, O(n - index) shift
//! - [`ListStore::remove_ordered`] — order-preserving removal, for lists
//!   where index encodes meaning (registration order)
//! - [`ListStore::remove_unordered`] — O(1) swap-remove, for unordered
//!   membership sets
//!
//! Every mutation resolves caller authorization first, then validates index
//! bounds against the length counter, then touches slots; a failed call
//! mutates nothing.

pub mod error;
pub mod list;

pub use error::{ListError, ListResult};
pub use list::ListStore;
