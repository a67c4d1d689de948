//! Operation registry — id → ready timestamp.
//!
//! Mirrors TimelockController's `_timestamps` mapping. Only the timestamp
//! is stored; Pending and Ready are derived from it at query time:
//!
//!   0                       → Unset
//!   DONE_TIMESTAMP (1)      → Done
//!   t > 1, now <  t         → Pending
//!   t > 1, now >= t         → Ready
//!
//! ## Predecessors
//!
//! An operation may name a predecessor id. A non-zero predecessor must be
//! Done before the dependent operation can execute.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::foundation::config::{DONE_TIMESTAMP, UNSET_TIMESTAMP};
use crate::foundation::error::TimelockError;
use crate::foundation::types::{OperationId, Timestamp};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationState {
    Unset,
    Pending,
    Ready,
    Done,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OperationRegistry {
    timestamps: BTreeMap<OperationId, Timestamp>,
}

impl OperationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirrors `getTimestamp()`. 0 for unknown ids.
    pub fn get_timestamp(&self, id: &OperationId) -> Timestamp {
        self.timestamps.get(id).copied().unwrap_or(UNSET_TIMESTAMP)
    }

    pub fn state(&self, id: &OperationId, now: Timestamp) -> OperationState {
        match self.get_timestamp(id) {
            UNSET_TIMESTAMP => OperationState::Unset,
            DONE_TIMESTAMP => OperationState::Done,
            ready_at if ready_at > now => OperationState::Pending,
            _ => OperationState::Ready,
        }
    }

    pub fn is_operation(&self, id: &OperationId) -> bool {
        self.get_timestamp(id) > UNSET_TIMESTAMP
    }

    /// True while scheduled and not yet executed (covers Ready too).
    pub fn is_operation_pending(&self, id: &OperationId) -> bool {
        self.get_timestamp(id) > DONE_TIMESTAMP
    }

    pub fn is_operation_ready(&self, id: &OperationId, now: Timestamp) -> bool {
        self.state(id, now) == OperationState::Ready
    }

    pub fn is_operation_done(&self, id: &OperationId) -> bool {
        self.get_timestamp(id) == DONE_TIMESTAMP
    }

    /// Number of ids with a non-zero timestamp.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OperationId, &Timestamp)> {
        self.timestamps.iter()
    }

    /// Record `ready_at` for an unset id. Mirrors `_schedule()`.
    pub(crate) fn schedule(
        &mut self,
        id: OperationId,
        ready_at: Timestamp,
    ) -> Result<(), TimelockError> {
        if self.is_operation(&id) {
            return Err(TimelockError::OperationAlreadyScheduled(id));
        }
        if ready_at <= DONE_TIMESTAMP {
            return Err(TimelockError::ReservedTimestamp(ready_at));
        }
        self.timestamps.insert(id, ready_at);
        Ok(())
    }

    /// Mirrors `_beforeCall()`.
    pub(crate) fn before_call(
        &self,
        id: &OperationId,
        predecessor: &OperationId,
        now: Timestamp,
    ) -> Result<(), TimelockError> {
        if !self.is_operation_ready(id, now) {
            return Err(TimelockError::OperationNotReady(*id));
        }
        if !predecessor.is_zero() && !self.is_operation_done(predecessor) {
            return Err(TimelockError::OperationPredecessorNotExecuted(*predecessor));
        }
        Ok(())
    }

    /// Mirrors `_afterCall()`: re-check readiness, then mark Done.
    pub(crate) fn after_call(&mut self, id: &OperationId, now: Timestamp) -> Result<(), TimelockError> {
        if !self.is_operation_ready(id, now) {
            return Err(TimelockError::OperationNotReady(*id));
        }
        self.timestamps.insert(*id, DONE_TIMESTAMP);
        Ok(())
    }

    /// Mirrors `cancel()`: only Pending or Ready operations.
    pub(crate) fn cancel(&mut self, id: &OperationId) -> Result<(), TimelockError> {
        if !self.is_operation_pending(id) {
            return Err(TimelockError::OperationCannotBeCancelled(*id));
        }
        self.timestamps.remove(id);
        Ok(())
    }

    /// Raw insert used by snapshot restore.
    pub(crate) fn restore(&mut self, id: OperationId, timestamp: Timestamp) {
        if timestamp != UNSET_TIMESTAMP {
            self.timestamps.insert(id, timestamp);
        }
    }
}
