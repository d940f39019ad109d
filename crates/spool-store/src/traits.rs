use spool_keys::SlotId;
use spool_types::Value;

use crate::error::StoreResult;

/// Flat slot-to-scalar storage backend.
///
/// All implementations must satisfy these invariants:
/// - Slots are created implicitly on first store; there is no delete.
///   Callers "delete" by overwriting with the kind's zero value.
/// - A load observes the latest committed store for that slot, or `None` if
///   the slot was never written.
/// - The backend never interprets values — kind discipline is enforced above
///   it by slot derivation.
/// - All backend errors are propagated, never silently ignored.
pub trait SlotBackend: Send + Sync {
    /// Load the value at `slot`.
    ///
    /// Returns `Ok(None)` if the slot was never written.
    fn load(&self, slot: &SlotId) -> StoreResult<Option<Value>>;

    /// Store `value` at `slot`, overwriting unconditionally.
    fn store(&self, slot: SlotId, value: Value) -> StoreResult<()>;
}
