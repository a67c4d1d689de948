//! Knowledger Timelock — OpenZeppelin TimelockController for the
//! Knowledger content-licensing platform.
//!
//! # Architecture
//!
//! Privileged platform actions (role grants, parameter changes, upgrades)
//! are never applied directly. A proposer schedules them, the minimum delay
//! elapses, and an executor runs them:
//!
//! | OZ Component                 | Module                          |
//! |------------------------------|---------------------------------|
//! | TimelockController.sol       | timelock::controller            |
//! | `_timestamps` / op states    | timelock::operations            |
//! | `hashOperation[Batch]`       | crypto::hash                    |
//! | AccessControl.sol            | governance::access              |
//! | `getMinDelay` / `updateDelay`| governance::delay               |
//! | Timelock events              | timelock::events                |
//! | `_call` (low-level call)     | timelock::dispatch              |
//! | Knowledger ERC20 (KLD)       | token::ledger                   |
//! | Constructor arguments        | foundation::config              |
//!
//! # Call surface
//!
//! - `schedule` / `schedule_batch` — proposer; delay must meet the minimum
//! - `execute` / `execute_batch`   — executor; operation must be Ready
//! - `cancel`                      — admin or canceller; Pending or Ready only
//! - `update_delay`                — the timelock itself only
//! - `grant_role` / `revoke_role`  — admin; `renounce_role` — self
//! - queries: `get_min_delay`, `get_timestamp`, `is_operation*`, `has_role`
//!
//! Every entry point takes a [`CallContext`] carrying the sender and the
//! host clock reading. Calls are expected to be serialized by the host;
//! each one either commits completely or leaves all state untouched.

pub mod crypto;
pub mod foundation;
pub mod governance;
pub mod timelock;
pub mod token;


pub use foundation::clock::{Clock, ManualClock, SystemClock};
pub use foundation::config::{ConfigError, TimelockConfig, DEFAULT_MIN_DELAY, DONE_TIMESTAMP};
pub use foundation::error::TimelockError;
pub use foundation::types::{
    Address, BatchOperation, Call, CallContext, Operation, OperationId, Salt, Timestamp,
};
pub use governance::access::Role;
pub use timelock::controller::TimelockController;
pub use timelock::dispatch::{CallError, CallHandler, NoopHandler, TimelockCall};
pub use timelock::events::TimelockEvent;
pub use timelock::operations::OperationState;
pub use token::ledger::TokenLedger;
