//! Call dispatch for executed operations.
//!
//! Entries targeting the timelock's own address carry a [`TimelockCall`]
//! payload and are applied to the controller itself. Every other entry is
//! handed to the external [`CallHandler`] (the payment token).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::foundation::error::TimelockError;
use crate::foundation::types::{Address, Call};
use crate::governance::access::Role;

/// Failure reported by an external call target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct CallError(pub String);

impl CallError {
    pub fn new(reason: impl Into<String>) -> Self {
        CallError(reason.into())
    }
}

/// External side of `execute`.
///
/// Every execution is bracketed: `begin` before the first entry, then
/// exactly one of `commit` (all entries succeeded) or `rollback` (some
/// entry failed). After `rollback` the handler must be observably in its
/// `begin` state again.
pub trait CallHandler {
    fn begin(&mut self);

    fn call(&mut self, sender: &Address, call: &Call) -> Result<(), CallError>;

    fn commit(&mut self);

    fn rollback(&mut self);
}

/// Handler that accepts every call and does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHandler;

impl CallHandler for NoopHandler {
    fn begin(&mut self) {}

    fn call(&mut self, _sender: &Address, _call: &Call) -> Result<(), CallError> {
        Ok(())
    }

    fn commit(&mut self) {}

    fn rollback(&mut self) {}
}

/// Administrative actions the timelock performs on itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum TimelockCall {
    UpdateDelay { new_delay: u64 },
    GrantRole { role: Role, account: Address },
    RevokeRole { role: Role, account: Address },
}

impl TimelockCall {
    pub fn encode(&self) -> Result<Vec<u8>, TimelockError> {
        serde_json::to_vec(self).map_err(|e| TimelockError::InvalidCallData(e.to_string()))
    }

    pub fn decode(data: &[u8]) -> Result<Self, TimelockError> {
        serde_json::from_slice(data).map_err(|e| TimelockError::InvalidCallData(e.to_string()))
    }

    /// Wrap into a zero-value call against `timelock`.
    pub fn to_call(&self, timelock: Address) -> Result<Call, TimelockError> {
        Ok(Call::new(timelock, 0, self.encode()?))
    }
}
