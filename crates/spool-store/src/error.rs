use spool_keys::SlotId;
use spool_types::{Address, ValueKind};

/// Errors from primitive store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The caller is not in the authorized-writer set.
    #[error("caller {caller} is not an authorized writer")]
    Unauthorized { caller: Address },

    /// The freeze step ran twice, or configuration was attempted after it.
    #[error("store is already initialized")]
    AlreadyInitialized,

    /// A slot held a value of the wrong kind (backend corruption; well-formed
    /// backends never produce this — slot derivation is kind-tagged).
    #[error("kind mismatch at slot {slot}: expected {expected}, found {found}")]
    KindMismatch {
        slot: SlotId,
        expected: ValueKind,
        found: ValueKind,
    },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
