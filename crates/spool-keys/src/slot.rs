use std::fmt;

use serde::{Deserialize, Serialize};

/// A derived 256-bit address in the flat slot namespace.
///
/// `SlotId`s are produced only by the derivation functions in
/// [`crate::hasher`]; callers never construct them from logical keys by
/// hand. Two distinct `(namespace, kind, key, index)` tuples derive distinct
/// slots with the collision resistance of BLAKE3.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId([u8; 32]);

impl SlotId {
    /// Create a slot from a finalized hash.
    pub(crate) const fn from_hash(hash: [u8; 32]) -> Self {
        Self(hash)
    }

    /// The raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Debug for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlotId({})", self.short_hex())
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
