//! Delay policy — the timelock's minimum delay.
//!
//! Self-governed: the only mutator takes the timelock's own identity and
//! rejects any other sender, so shortening the delay is itself subject to
//! the current delay.

use crate::foundation::error::TimelockError;
use crate::foundation::types::Address;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DelayPolicy {
    min_delay: u64,
}

impl DelayPolicy {
    pub fn new(min_delay: u64) -> Self {
        DelayPolicy { min_delay }
    }

    /// Mirrors `getMinDelay()`.
    pub fn min_delay(&self) -> u64 {
        self.min_delay
    }

    pub fn check(&self, requested: u64) -> Result<(), TimelockError> {
        if requested < self.min_delay {
            return Err(TimelockError::InsufficientDelay {
                requested,
                minimum: self.min_delay,
            });
        }
        Ok(())
    }

    /// Mirrors `updateDelay()`: `sender` must be the timelock itself.
    /// Returns the previous delay.
    pub fn update(
        &mut self,
        timelock: &Address,
        sender: &Address,
        new_delay: u64,
    ) -> Result<u64, TimelockError> {
        if sender != timelock {
            return Err(TimelockError::UnauthorizedCaller(*sender));
        }
        let old = self.min_delay;
        self.min_delay = new_delay;
        Ok(old)
    }

    /// Unchecked reset, used to undo an update from a failed execution.
    pub(crate) fn restore(&mut self, min_delay: u64) {
        self.min_delay = min_delay;
    }
}
