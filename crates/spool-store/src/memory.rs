use std::collections::HashMap;
use std::sync::RwLock;

use spool_keys::SlotId;
use spool_types::Value;

use crate::error::StoreResult;
use crate::traits::SlotBackend;

/// In-memory, HashMap-based slot backend.
///
/// Intended for tests and embedding. All slots are held in memory behind a
/// `RwLock` for safe concurrent access. Values are cloned on load.
pub struct InMemorySlotBackend {
    slots: RwLock<HashMap<SlotId, Value>>,
}

impl InMemorySlotBackend {
    /// Create a new empty backend.
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Number of slots ever written.
    pub fn len(&self) -> usize {
        self.slots.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no slot was ever written.
    pub fn is_empty(&self) -> bool {
        self.slots.read().expect("lock poisoned").is_empty()
    }

    /// Snapshot of the slot map, for equality assertions in tests.
    pub fn snapshot(&self) -> HashMap<SlotId, Value> {
        self.slots.read().expect("lock poisoned").clone()
    }
}

impl Default for InMemorySlotBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotBackend for InMemorySlotBackend {
    fn load(&self, slot: &SlotId) -> StoreResult<Option<Value>> {
        let map = self.slots.read().expect("lock poisoned");
        Ok(map.get(slot).cloned())
    }

    fn store(&self, slot: SlotId, value: Value) -> StoreResult<()> {
        let mut map = self.slots.write().expect("lock poisoned");
        map.insert(slot, value);
        Ok(())
    }
}

impl std::fmt::Debug for InMemorySlotBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySlotBackend")
            .field("slot_count", &self.len())
            .finish()
    }
}
