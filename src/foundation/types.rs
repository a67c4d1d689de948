//! Core types for the Knowledger timelock.
//!
//! These mirror the arguments of OpenZeppelin's TimelockController
//! (`target`, `value`, `data`, `predecessor`, `salt`) with fixed-width
//! identifiers in place of EVM addresses and `bytes32`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::crypto::hash::{hash_operation, hash_operation_batch};
use crate::foundation::clock::Clock;
use crate::foundation::config::{ADDRESS_SIZE, ID_SIZE};

/// Seconds on the host clock.
pub type Timestamp = u64;

/// Fixed-width byte identifier, hex encoded for display and serde.
macro_rules! fixed_bytes {
    ($(#[$meta:meta])* $name:ident, $size:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        pub struct $name(pub [u8; $size]);

        impl $name {
            pub const ZERO: $name = $name([0u8; $size]);

            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; $size]
            }

            pub fn as_bytes(&self) -> &[u8; $size] {
                &self.0
            }

            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }
        }

        impl From<[u8; $size]> for $name {
            fn from(bytes: [u8; $size]) -> Self {
                $name(bytes)
            }
        }

        impl FromStr for $name {
            type Err = hex::FromHexError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix("0x").unwrap_or(s);
                let mut bytes = [0u8; $size];
                hex::decode_to_slice(s, &mut bytes)?;
                Ok($name(bytes))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

fixed_bytes!(
    /// Account identity: callers, role members, call targets and the timelock itself.
    Address,
    ADDRESS_SIZE
);

fixed_bytes!(
    /// Content-derived operation id. `ZERO` doubles as the "no predecessor" sentinel.
    OperationId,
    ID_SIZE
);

fixed_bytes!(
    /// Caller-chosen nonce that lets otherwise identical operations coexist.
    Salt,
    ID_SIZE
);

impl From<u64> for Salt {
    fn from(nonce: u64) -> Self {
        let mut bytes = [0u8; ID_SIZE];
        bytes[ID_SIZE - 8..].copy_from_slice(&nonce.to_be_bytes());
        Salt(bytes)
    }
}

/// Who is calling and when. Every entry point receives one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallContext {
    pub sender: Address,
    pub timestamp: Timestamp,
}

impl CallContext {
    pub fn new(sender: Address, timestamp: Timestamp) -> Self {
        CallContext { sender, timestamp }
    }

    /// Context stamped with the clock's current reading.
    pub fn at(sender: Address, clock: &impl Clock) -> Self {
        CallContext::new(sender, clock.now())
    }
}

/// A single `(target, value, data)` triple.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    pub target: Address,
    pub value: u64,
    #[serde(with = "hex")]
    pub data: Vec<u8>,
}

impl Call {
    pub fn new(target: Address, value: u64, data: Vec<u8>) -> Self {
        Call { target, value, data }
    }
}

/// A single-call operation. Mirrors the arguments of `schedule()` / `execute()`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub call: Call,
    pub predecessor: OperationId,
    pub salt: Salt,
}

impl Operation {
    pub fn new(call: Call, predecessor: OperationId, salt: Salt) -> Self {
        Operation { call, predecessor, salt }
    }

    pub fn id(&self) -> OperationId {
        hash_operation(
            &self.call.target,
            self.call.value,
            &self.call.data,
            &self.predecessor,
            &self.salt,
        )
    }
}

/// A batch of calls sharing one predecessor, salt and id.
/// Mirrors the arguments of `scheduleBatch()` / `executeBatch()`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOperation {
    pub calls: Vec<Call>,
    pub predecessor: OperationId,
    pub salt: Salt,
}

impl BatchOperation {
    pub fn new(calls: Vec<Call>, predecessor: OperationId, salt: Salt) -> Self {
        BatchOperation { calls, predecessor, salt }
    }

    pub fn id(&self) -> OperationId {
        hash_operation_batch(&self.calls, &self.predecessor, &self.salt)
    }
}
