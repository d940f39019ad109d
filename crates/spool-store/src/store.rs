use std::sync::Arc;

use spool_keys::{scalar_slot, SlotId};
use spool_types::{Address, ScalarValue, StorageKey};

use crate::access::AccessLock;
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::memory::InMemorySlotBackend;
use crate::traits::SlotBackend;

/// The primitive scalar store: typed accessors over a flat slot namespace,
/// gated by an [`AccessLock`].
///
/// `PrimitiveStore` is the single shared instance all higher-level modules
/// write through. Reads are public. The scalar kind of every access is fixed
/// at compile time by the [`ScalarValue`] type parameter, and the kind tag
/// participates in slot derivation, so accessors of different kinds under
/// one [`StorageKey`] address disjoint slots.
pub struct PrimitiveStore {
    backend: Arc<dyn SlotBackend>,
    access: AccessLock,
}

impl PrimitiveStore {
    /// Create a store over the given backend.
    pub fn new(config: StoreConfig, backend: Arc<dyn SlotBackend>) -> Self {
        Self {
            backend,
            access: AccessLock::new(config),
        }
    }

    /// Create a store over a fresh [`InMemorySlotBackend`].
    pub fn in_memory(config: StoreConfig) -> Self {
        Self::new(config, Arc::new(InMemorySlotBackend::new()))
    }

    /// The access lock guarding mutations.
    pub fn access(&self) -> &AccessLock {
        &self.access
    }

    /// Add or remove an authorized writer. Deployer-only, bootstrap phase
    /// only; see [`AccessLock::set_authorized`].
    pub fn set_authorized(
        &self,
        caller: &Address,
        subject: Address,
        allowed: bool,
    ) -> StoreResult<()> {
        self.access.set_authorized(caller, subject, allowed)
    }

    /// Seal the writer set. Runs exactly once; see [`AccessLock::freeze`].
    pub fn freeze(&self, caller: &Address) -> StoreResult<()> {
        self.access.freeze(caller)
    }

    /// Read the scalar of kind `T` stored under `key`.
    ///
    /// Public: no caller identity required. Never-written keys read as the
    /// kind's zero value.
    pub fn read<T: ScalarValue>(&self, key: &StorageKey) -> StoreResult<T> {
        self.read_at(scalar_slot(T::KIND, key))
    }

    /// Write the scalar of kind `T` under `key`, overwriting unconditionally.
    ///
    /// Fails with [`StoreError::Unauthorized`] if `caller` may not mutate.
    pub fn write<T: ScalarValue>(
        &self,
        caller: &Address,
        key: &StorageKey,
        value: T,
    ) -> StoreResult<()> {
        self.write_at(caller, scalar_slot(T::KIND, key), value)
    }

    /// Read the scalar of kind `T` at an already-derived slot.
    ///
    /// Used by layers that run their own derivation (the list store derives
    /// count and item slots).
    pub fn read_at<T: ScalarValue>(&self, slot: SlotId) -> StoreResult<T> {
        match self.backend.load(&slot)? {
            None => Ok(T::zero()),
            Some(value) => {
                let found = value.kind();
                T::from_value(value).ok_or(StoreError::KindMismatch {
                    slot,
                    expected: T::KIND,
                    found,
                })
            }
        }
    }

    /// Write the scalar of kind `T` at an already-derived slot.
    pub fn write_at<T: ScalarValue>(
        &self,
        caller: &Address,
        slot: SlotId,
        value: T,
    ) -> StoreResult<()> {
        self.access.require_writer(caller)?;
        self.backend.store(slot, value.into_value())
    }
}

impl std::fmt::Debug for PrimitiveStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrimitiveStore")
            .field("access", &self.access)
            .finish()
    }
}
