//! Append-only event log. Mirrors the events TimelockController and
//! AccessControl emit.

use serde::{Deserialize, Serialize};

use crate::foundation::types::{Address, OperationId};
use crate::governance::access::Role;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum TimelockEvent {
    CallScheduled {
        id: OperationId,
        index: usize,
        target: Address,
        value: u64,
        #[serde(with = "hex")]
        data: Vec<u8>,
        predecessor: OperationId,
        delay: u64,
    },
    CallExecuted {
        id: OperationId,
        index: usize,
        target: Address,
        value: u64,
        #[serde(with = "hex")]
        data: Vec<u8>,
        predecessor: OperationId,
    },
    Cancelled {
        id: OperationId,
    },
    MinDelayChange {
        old_delay: u64,
        new_delay: u64,
    },
    RoleGranted {
        role: Role,
        account: Address,
        sender: Address,
    },
    RoleRevoked {
        role: Role,
        account: Address,
        sender: Address,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<TimelockEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: TimelockEvent) {
        self.events.push(event);
    }

    pub fn as_slice(&self) -> &[TimelockEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drop events recorded after the first `len`.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.events.truncate(len);
    }

    /// Hand every recorded event to the caller, leaving the log empty.
    pub fn drain(&mut self) -> Vec<TimelockEvent> {
        std::mem::take(&mut self.events)
    }
}
