use std::fmt;

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::TypeError;

/// Fixed-length 32-byte scalar payload.
///
/// Used for content hashes and other fixed-width binary state kept in the
/// store (e.g. a minipool's validator pubkey digest).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Bytes32([u8; 32]);

impl Bytes32 {
    /// Create from raw bytes.
    pub const fn from_raw(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// All zero bytes. The `Bytes` kind's default value.
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Returns `true` if all bytes are zero.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// The raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a hex string (64 hex characters).
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bytes32({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 32]> for Bytes32 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// The closed set of scalar kinds the store understands.
///
/// Each kind occupies its own addressing sub-namespace: a `Uint` written
/// under some key can never be observed through the `Bool` accessors of the
/// "same" key, because the derived slots differ.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Bool,
    Uint,
    Int,
    Bytes,
    Text,
    Address,
}

impl ValueKind {
    /// Stable tag fed into slot derivation. Never reuse or reorder tags:
    /// they define the persistent addressing sub-namespaces.
    pub const fn tag(&self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Uint => "uint",
            ValueKind::Int => "int",
            ValueKind::Bytes => "bytes",
            ValueKind::Text => "text",
            ValueKind::Address => "address",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One stored scalar: the closed tagged-variant the flat namespace maps to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    Uint(u128),
    Int(i128),
    Bytes(Bytes32),
    Text(String),
    Address(Address),
}

impl Value {
    /// The kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Uint(_) => ValueKind::Uint,
            Value::Int(_) => ValueKind::Int,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::Text(_) => ValueKind::Text,
            Value::Address(_) => ValueKind::Address,
        }
    }

    /// The zero value for a kind — what a never-written slot reads as.
    pub fn zero(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Bool => Value::Bool(false),
            ValueKind::Uint => Value::Uint(0),
            ValueKind::Int => Value::Int(0),
            ValueKind::Bytes => Value::Bytes(Bytes32::zero()),
            ValueKind::Text => Value::Text(String::new()),
            ValueKind::Address => Value::Address(Address::zero()),
        }
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for bool {}
    impl Sealed for u128 {}
    impl Sealed for i128 {}
    impl Sealed for super::Bytes32 {}
    impl Sealed for String {}
    impl Sealed for super::Address {}
}

/// Binds a Rust scalar type to its [`ValueKind`].
///
/// The trait is sealed: exactly the six types in the kind table implement
/// it, so the per-kind accessor families of the store are closed at compile
/// time and cross-kind access under one key is unrepresentable.
pub trait ScalarValue: sealed::Sealed + Clone + Send + Sync + 'static {
    /// The kind whose addressing sub-namespace this type occupies.
    const KIND: ValueKind;

    /// The kind's zero value.
    fn zero() -> Self;

    /// Wrap into the tagged-variant representation.
    fn into_value(self) -> Value;

    /// Unwrap from the tagged-variant representation.
    ///
    /// Returns `None` on a kind mismatch. Well-formed backends never produce
    /// one: slot derivation includes the kind tag, so a slot only ever holds
    /// its own kind.
    fn from_value(value: Value) -> Option<Self>;
}

impl ScalarValue for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn zero() -> Self {
        false
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(v),
            _ => None,
        }
    }
}

impl ScalarValue for u128 {
    const KIND: ValueKind = ValueKind::Uint;

    fn zero() -> Self {
        0
    }

    fn into_value(self) -> Value {
        Value::Uint(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Uint(v) => Some(v),
            _ => None,
        }
    }
}

impl ScalarValue for i128 {
    const KIND: ValueKind = ValueKind::Int;

    fn zero() -> Self {
        0
    }

    fn into_value(self) -> Value {
        Value::Int(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Int(v) => Some(v),
            _ => None,
        }
    }
}

impl ScalarValue for Bytes32 {
    const KIND: ValueKind = ValueKind::Bytes;

    fn zero() -> Self {
        Bytes32::zero()
    }

    fn into_value(self) -> Value {
        Value::Bytes(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bytes(v) => Some(v),
            _ => None,
        }
    }
}

impl ScalarValue for String {
    const KIND: ValueKind = ValueKind::Text;

    fn zero() -> Self {
        String::new()
    }

    fn into_value(self) -> Value {
        Value::Text(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl ScalarValue for Address {
    const KIND: ValueKind = ValueKind::Address;

    fn zero() -> Self {
        Address::zero()
    }

    fn into_value(self) -> Value {
        Value::Address(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Address(v) => Some(v),
            _ => None,
        }
    }
}
