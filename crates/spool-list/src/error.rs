use spool_store::StoreError;

/// Errors from list store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    /// The index does not address an occupied slot (`index >= length` for
    /// get/set/remove, `index > length` for insert).
    #[error("index {index} out of bounds for list of length {len}")]
    IndexOutOfBounds { index: u64, len: u64 },

    /// The underlying primitive store rejected the operation
    /// (unauthorized caller, backend corruption).
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result alias for list operations.
pub type ListResult<T> = Result<T, ListError>;
