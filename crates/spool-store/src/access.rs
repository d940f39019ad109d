use std::collections::HashSet;
use std::sync::RwLock;

use tracing::debug;

use spool_types::Address;

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};

/// The freeze-then-lock writer authorization state machine.
///
/// Lifecycle: constructed from a [`StoreConfig`], the lock starts in the
/// bootstrap phase where the deployer may write and adjust the writer set.
/// [`AccessLock::freeze`] transitions it exactly once into the locked phase:
/// from then on only the frozen writer set may mutate, the set itself cannot
/// grow or shrink, and the deployer holds no special powers. There is no
/// teardown transition.
pub struct AccessLock {
    deployer: Address,
    inner: RwLock<AccessState>,
}

struct AccessState {
    writers: HashSet<Address>,
    frozen: bool,
}

impl AccessLock {
    /// Create a lock in the bootstrap phase.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            deployer: config.deployer,
            inner: RwLock::new(AccessState {
                writers: config.authorized.into_iter().collect(),
                frozen: false,
            }),
        }
    }

    /// The deployer address this lock was configured with.
    pub fn deployer(&self) -> &Address {
        &self.deployer
    }

    /// Returns `true` once [`AccessLock::freeze`] has run.
    pub fn is_frozen(&self) -> bool {
        self.inner.read().expect("lock poisoned").frozen
    }

    /// Returns `true` if `addr` is in the writer set.
    pub fn is_authorized(&self, addr: &Address) -> bool {
        self.inner
            .read()
            .expect("lock poisoned")
            .writers
            .contains(addr)
    }

    /// Add or remove `subject` from the writer set.
    ///
    /// Only the deployer may call this, and only before the freeze step;
    /// afterwards the set is immutable and the call fails with
    /// [`StoreError::AlreadyInitialized`].
    pub fn set_authorized(
        &self,
        caller: &Address,
        subject: Address,
        allowed: bool,
    ) -> StoreResult<()> {
        let mut state = self.inner.write().expect("lock poisoned");
        if state.frozen {
            return Err(StoreError::AlreadyInitialized);
        }
        if *caller != self.deployer {
            return Err(StoreError::Unauthorized { caller: *caller });
        }
        if allowed {
            state.writers.insert(subject);
        } else {
            state.writers.remove(&subject);
        }
        debug!(subject = %subject.short_hex(), allowed, "writer set updated");
        Ok(())
    }

    /// Seal the writer set, ending the bootstrap phase.
    ///
    /// Deployer-only. Runs exactly once: a second call fails with
    /// [`StoreError::AlreadyInitialized`] and leaves the writer set
    /// unaltered.
    pub fn freeze(&self, caller: &Address) -> StoreResult<()> {
        let mut state = self.inner.write().expect("lock poisoned");
        if state.frozen {
            return Err(StoreError::AlreadyInitialized);
        }
        if *caller != self.deployer {
            return Err(StoreError::Unauthorized { caller: *caller });
        }
        state.frozen = true;
        debug!(writers = state.writers.len(), "store access frozen");
        Ok(())
    }

    /// Check that `caller` may mutate the store right now.
    ///
    /// Before the freeze step the deployer passes alongside the configured
    /// writers (the bootstrap phase); after it, only the frozen set does.
    pub fn require_writer(&self, caller: &Address) -> StoreResult<()> {
        let state = self.inner.read().expect("lock poisoned");
        let allowed = if state.frozen {
            state.writers.contains(caller)
        } else {
            *caller == self.deployer || state.writers.contains(caller)
        };
        if allowed {
            Ok(())
        } else {
            Err(StoreError::Unauthorized { caller: *caller })
        }
    }
}

impl std::fmt::Debug for AccessLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.read().expect("lock poisoned");
        f.debug_struct("AccessLock")
            .field("deployer", &self.deployer)
            .field("writers", &state.writers.len())
            .field("frozen", &state.frozen)
            .finish()
    }
}
