use spool_types::{StorageKey, ValueKind};

use crate::slot::SlotId;

/// Domain-separated BLAKE3 slot derivation.
///
/// Each hasher carries a namespace tag (e.g. `"spool-scalar-v1"`) that is
/// prepended to every derivation. This keeps the three slot families —
/// plain scalars, list length counters, list items — disjoint even for the
/// same kind and logical key, and keeps lists of different kinds under one
/// nominal key from ever aliasing.
pub struct SlotHasher {
    namespace: &'static str,
}

impl SlotHasher {
    /// Derivation family for plain scalar slots.
    pub const SCALAR: Self = Self {
        namespace: "spool-scalar-v1",
    };
    /// Derivation family for list length counters.
    pub const LIST_COUNT: Self = Self {
        namespace: "spool-list-count-v1",
    };
    /// Derivation family for per-index list item slots.
    pub const LIST_ITEM: Self = Self {
        namespace: "spool-list-item-v1",
    };

    /// Create a hasher with a custom namespace tag.
    pub const fn new(namespace: &'static str) -> Self {
        Self { namespace }
    }

    /// Derive the slot for `(kind, key)` in this namespace.
    pub fn derive(&self, kind: ValueKind, key: &StorageKey) -> SlotId {
        let hasher = self.begin(kind, key);
        SlotId::from_hash(*hasher.finalize().as_bytes())
    }

    /// Derive the slot for `(kind, key, index)` in this namespace.
    pub fn derive_indexed(&self, kind: ValueKind, key: &StorageKey, index: u64) -> SlotId {
        let mut hasher = self.begin(kind, key);
        hasher.update(b":");
        hasher.update(&index.to_le_bytes());
        SlotId::from_hash(*hasher.finalize().as_bytes())
    }

    /// The namespace tag used by this hasher.
    pub fn namespace(&self) -> &str {
        self.namespace
    }

    fn begin(&self, kind: ValueKind, key: &StorageKey) -> blake3::Hasher {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.namespace.as_bytes());
        hasher.update(b":");
        hasher.update(kind.tag().as_bytes());
        hasher.update(b":");
        hasher.update(key.as_bytes());
        hasher
    }
}

/// Slot holding the scalar of `kind` stored under `key`.
pub fn scalar_slot(kind: ValueKind, key: &StorageKey) -> SlotId {
    SlotHasher::SCALAR.derive(kind, key)
}

/// Slot holding the length counter of the `kind`-valued list under `key`.
pub fn list_count_slot(kind: ValueKind, key: &StorageKey) -> SlotId {
    SlotHasher::LIST_COUNT.derive(kind, key)
}

/// Slot holding item `index` of the `kind`-valued list under `key`.
pub fn list_item_slot(kind: ValueKind, key: &StorageKey, index: u64) -> SlotId {
    SlotHasher::LIST_ITEM.derive_indexed(kind, key, index)
}
