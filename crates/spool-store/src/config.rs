use serde::{Deserialize, Serialize};

use spool_types::Address;

/// Configuration for the primitive store's access lock.
///
/// Captures the deployment-time state: the deployer that bootstraps the
/// store and the writer set it starts from. The set can still be adjusted
/// with [`crate::PrimitiveStore::set_authorized`] until the store is frozen;
/// after that it is immutable for the life of the process.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    /// The address that deploys the store. It may write and configure the
    /// writer set until the freeze step, and loses both powers at freeze
    /// unless it appears in `authorized`.
    pub deployer: Address,
    /// Writer addresses authorized from the start.
    pub authorized: Vec<Address>,
}

impl StoreConfig {
    /// Configuration with an empty initial writer set.
    pub fn new(deployer: Address) -> Self {
        Self {
            deployer,
            authorized: Vec::new(),
        }
    }

    /// Add an initial authorized writer.
    pub fn with_writer(mut self, writer: Address) -> Self {
        self.authorized.push(writer);
        self
    }
}
