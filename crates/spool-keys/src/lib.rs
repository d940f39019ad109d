//! Typed slot derivation for the Spool flat key namespace.
//!
//! The primitive store is a single flat map from 256-bit slots to scalar
//! values. Everything layered on top — per-kind scalar namespaces, list
//! length counters, list item slots — shares that one map, so unrelated
//! collections must never alias. This crate makes the collision avoidance
//! explicit: every slot is derived with domain-separated BLAKE3 from the
//! `(namespace, kind tag, logical key, index)` tuple rather than by string
//! concatenation.
//!
//! # Key Types
//!
//! - [`SlotId`] — a derived 256-bit address in the flat namespace
//! - [`SlotHasher`] — domain-separated BLAKE3 derivation
//! - [`scalar_slot`] / [`list_count_slot`] / [`list_item_slot`] — the three
//!   derivation families the store uses

pub mod hasher;
pub mod slot;

pub use hasher::{list_count_slot, list_item_slot, scalar_slot, SlotHasher};
pub use slot::SlotId;
