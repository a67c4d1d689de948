//! Error taxonomy for the timelock call surface.
//!
//! Replaces the `ERR_*` return codes with a typed enum. Every variant is a
//! synchronous failure of the triggering call; nothing is retried internally.

use thiserror::Error;

use crate::foundation::types::{Address, OperationId, Timestamp};
use crate::governance::access::Role;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimelockError {
    #[error("account {account} is missing role {role}")]
    MissingRole { role: Role, account: Address },

    #[error("operation {0} already scheduled")]
    OperationAlreadyScheduled(OperationId),

    #[error("insufficient delay: requested {requested}, minimum is {minimum}")]
    InsufficientDelay { requested: u64, minimum: u64 },

    #[error("operation {0} is not ready")]
    OperationNotReady(OperationId),

    #[error("predecessor {0} has not been executed")]
    OperationPredecessorNotExecuted(OperationId),

    #[error("operation {0} cannot be cancelled")]
    OperationCannotBeCancelled(OperationId),

    #[error("caller {0} must be the timelock")]
    UnauthorizedCaller(Address),

    #[error("call {index} to {target} failed: {reason}")]
    CallFailed {
        index: usize,
        target: Address,
        reason: String,
    },

    #[error("ready timestamp overflows: {now} + {delay}")]
    TimestampOverflow { now: Timestamp, delay: u64 },

    #[error("ready timestamp {0} collides with a reserved sentinel")]
    ReservedTimestamp(Timestamp),

    #[error("batch contains no calls")]
    EmptyBatch,

    #[error("invalid timelock call data: {0}")]
    InvalidCallData(String),
}
