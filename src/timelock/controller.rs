//! TimelockController — mirrors OpenZeppelin TimelockController.sol
//!
//! Enforces a delay between scheduling and executing privileged operations.
//! Operations follow the lifecycle:
//!
//!   Unset → Pending → Ready → Done
//!     ↑        │        │
//!     └─cancel─┴────────┘
//!
//! Ready is never stored: it is Pending whose ready timestamp has been
//! reached by the caller's clock reading.
//!
//! ## Atomicity
//!
//! `execute` and `execute_batch` apply entries in place and keep a
//! [`Journal`] of what they changed: the event log length on entry plus one
//! undo record per delay or role change. The handler is bracketed with
//! `begin` / `commit` / `rollback`. If any entry fails, or the operation
//! cannot be marked Done, the journal is unwound and the handler rolled
//! back. The cost of an execution is bounded by the operation itself, never
//! by the accumulated history.

use crate::foundation::config::{ConfigError, TimelockConfig};
use crate::foundation::error::TimelockError;
use crate::foundation::types::{
    Address, BatchOperation, Call, CallContext, Operation, OperationId, Timestamp,
};
use crate::governance::access::{AccessControl, Role};
use crate::governance::delay::DelayPolicy;
use crate::timelock::dispatch::{CallHandler, TimelockCall};
use crate::timelock::events::{EventLog, TimelockEvent};
use crate::timelock::operations::{OperationRegistry, OperationState};

/// Everything a single call may mutate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TimelockState {
    pub(crate) operations: OperationRegistry,
    pub(crate) access: AccessControl,
    pub(crate) delay: DelayPolicy,
    pub(crate) events: EventLog,
}

impl TimelockState {
    fn schedule_calls(
        &mut self,
        ctx: &CallContext,
        id: OperationId,
        calls: &[Call],
        predecessor: &OperationId,
        delay: u64,
    ) -> Result<(), TimelockError> {
        self.access.check_role(Role::Proposer, &ctx.sender)?;
        if calls.is_empty() {
            return Err(TimelockError::EmptyBatch);
        }
        self.delay.check(delay)?;
        if self.operations.is_operation(&id) {
            return Err(TimelockError::OperationAlreadyScheduled(id));
        }
        let ready_at = ctx
            .timestamp
            .checked_add(delay)
            .ok_or(TimelockError::TimestampOverflow { now: ctx.timestamp, delay })?;
        self.operations.schedule(id, ready_at)?;

        for (index, call) in calls.iter().enumerate() {
            self.events.push(TimelockEvent::CallScheduled {
                id,
                index,
                target: call.target,
                value: call.value,
                data: call.data.clone(),
                predecessor: *predecessor,
                delay,
            });
        }
        tracing::info!(%id, ready_at, calls = calls.len(), proposer = %ctx.sender, "operation scheduled");
        Ok(())
    }

    /// Returns whether membership changed.
    fn grant_role(&mut self, sender: &Address, role: Role, account: &Address) -> Result<bool, TimelockError> {
        let granted = self.access.grant_role(sender, role, account)?;
        if granted {
            tracing::info!(%role, %account, %sender, "role granted");
            self.events.push(TimelockEvent::RoleGranted { role, account: *account, sender: *sender });
        }
        Ok(granted)
    }

    /// Returns whether membership changed.
    fn revoke_role(&mut self, sender: &Address, role: Role, account: &Address) -> Result<bool, TimelockError> {
        let revoked = self.access.revoke_role(sender, role, account)?;
        if revoked {
            tracing::info!(%role, %account, %sender, "role revoked");
            self.events.push(TimelockEvent::RoleRevoked { role, account: *account, sender: *sender });
        }
        Ok(revoked)
    }

    /// Returns the previous delay.
    fn update_delay(
        &mut self,
        timelock: &Address,
        sender: &Address,
        new_delay: u64,
    ) -> Result<u64, TimelockError> {
        let old_delay = self.delay.update(timelock, sender, new_delay)?;
        tracing::info!(old_delay, new_delay, "minimum delay changed");
        self.events.push(TimelockEvent::MinDelayChange { old_delay, new_delay });
        Ok(old_delay)
    }
}

/// One reversible change made by a self-call.
#[derive(Clone, Copy, Debug)]
enum Undo {
    Delay(u64),
    Granted(Role, Address),
    Revoked(Role, Address),
}

/// Undo log for a single execution.
#[derive(Debug)]
struct Journal {
    events_len: usize,
    undo: Vec<Undo>,
}

impl Journal {
    fn begin(state: &TimelockState) -> Self {
        Journal {
            events_len: state.events.len(),
            undo: Vec::new(),
        }
    }

    fn record(&mut self, undo: Undo) {
        self.undo.push(undo);
    }

    fn rollback(self, state: &mut TimelockState) {
        for undo in self.undo.into_iter().rev() {
            match undo {
                Undo::Delay(old) => state.delay.restore(old),
                Undo::Granted(role, account) => {
                    state.access.remove_role(role, &account);
                }
                Undo::Revoked(role, account) => {
                    state.access.setup_role(role, &account);
                }
            }
        }
        state.events.truncate(self.events_len);
    }
}

#[derive(Clone, Debug)]
pub struct TimelockController {
    address: Address,
    state: TimelockState,
}

impl TimelockController {
    /// Deploy a controller. Mirrors the TimelockController constructor:
    /// the timelock and the optional admin get the admin role, proposers
    /// get proposer and canceller, executors get executor.
    pub fn new(config: &TimelockConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let address = config.address;
        let mut controller = TimelockController::from_parts(
            address,
            OperationRegistry::new(),
            AccessControl::new(),
            DelayPolicy::new(config.min_delay),
        );

        let mut grants = vec![(Role::Admin, address)];
        grants.extend(config.admin.map(|admin| (Role::Admin, admin)));
        for proposer in &config.proposers {
            grants.push((Role::Proposer, *proposer));
            grants.push((Role::Canceller, *proposer));
        }
        grants.extend(config.executors.iter().map(|e| (Role::Executor, *e)));
        grants.extend(config.cancellers.iter().map(|c| (Role::Canceller, *c)));

        let state = &mut controller.state;
        for (role, account) in grants {
            if state.access.setup_role(role, &account) {
                state.events.push(TimelockEvent::RoleGranted { role, account, sender: address });
            }
        }
        state.events.push(TimelockEvent::MinDelayChange {
            old_delay: 0,
            new_delay: config.min_delay,
        });

        tracing::info!(%address, min_delay = config.min_delay, "timelock deployed");
        Ok(controller)
    }

    pub(crate) fn from_parts(
        address: Address,
        operations: OperationRegistry,
        access: AccessControl,
        delay: DelayPolicy,
    ) -> Self {
        TimelockController {
            address,
            state: TimelockState {
                operations,
                access,
                delay,
                events: EventLog::new(),
            },
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    // ═══════════════════════════════════════════════════════════════════
    // Scheduling
    // ═══════════════════════════════════════════════════════════════════

    /// Schedule a single-call operation. Mirrors `schedule()`.
    ///
    /// Requirements:
    ///   - caller holds the proposer role
    ///   - `delay >= get_min_delay()`
    ///   - the operation id is currently unset
    pub fn schedule(
        &mut self,
        ctx: &CallContext,
        operation: &Operation,
        delay: u64,
    ) -> Result<OperationId, TimelockError> {
        let id = operation.id();
        self.state.schedule_calls(
            ctx,
            id,
            std::slice::from_ref(&operation.call),
            &operation.predecessor,
            delay,
        )?;
        Ok(id)
    }

    /// Schedule a batch under one id. Mirrors `scheduleBatch()`.
    pub fn schedule_batch(
        &mut self,
        ctx: &CallContext,
        batch: &BatchOperation,
        delay: u64,
    ) -> Result<OperationId, TimelockError> {
        let id = batch.id();
        self.state
            .schedule_calls(ctx, id, &batch.calls, &batch.predecessor, delay)?;
        Ok(id)
    }

    /// Cancel a Pending or Ready operation. Mirrors `cancel()`.
    pub fn cancel(&mut self, ctx: &CallContext, id: &OperationId) -> Result<(), TimelockError> {
        self.state
            .access
            .check_any_role(&[Role::Admin, Role::Canceller], &ctx.sender)?;
        self.state.operations.cancel(id)?;
        tracing::info!(%id, canceller = %ctx.sender, "operation cancelled");
        self.state.events.push(TimelockEvent::Cancelled { id: *id });
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Execution
    // ═══════════════════════════════════════════════════════════════════

    /// Execute a Ready single-call operation. Mirrors `execute()`.
    ///
    /// The id is re-derived from the supplied parameters, so the caller
    /// must know the exact operation that was scheduled.
    pub fn execute<H: CallHandler>(
        &mut self,
        ctx: &CallContext,
        handler: &mut H,
        operation: &Operation,
    ) -> Result<OperationId, TimelockError> {
        let id = operation.id();
        self.execute_calls(
            ctx,
            handler,
            id,
            std::slice::from_ref(&operation.call),
            &operation.predecessor,
        )?;
        Ok(id)
    }

    /// Execute every entry of a Ready batch, all or nothing.
    /// Mirrors `executeBatch()`.
    pub fn execute_batch<H: CallHandler>(
        &mut self,
        ctx: &CallContext,
        handler: &mut H,
        batch: &BatchOperation,
    ) -> Result<OperationId, TimelockError> {
        let id = batch.id();
        self.execute_calls(ctx, handler, id, &batch.calls, &batch.predecessor)?;
        Ok(id)
    }

    fn execute_calls<H: CallHandler>(
        &mut self,
        ctx: &CallContext,
        handler: &mut H,
        id: OperationId,
        calls: &[Call],
        predecessor: &OperationId,
    ) -> Result<(), TimelockError> {
        self.state.access.check_role(Role::Executor, &ctx.sender)?;
        self.state.operations.before_call(&id, predecessor, ctx.timestamp)?;

        let mut journal = Journal::begin(&self.state);
        handler.begin();
        match self.run_calls(ctx, handler, &mut journal, id, calls, predecessor) {
            Ok(()) => {
                handler.commit();
                tracing::info!(%id, calls = calls.len(), executor = %ctx.sender, "operation executed");
                Ok(())
            }
            Err(err) => {
                journal.rollback(&mut self.state);
                handler.rollback();
                Err(err)
            }
        }
    }

    fn run_calls<H: CallHandler>(
        &mut self,
        ctx: &CallContext,
        handler: &mut H,
        journal: &mut Journal,
        id: OperationId,
        calls: &[Call],
        predecessor: &OperationId,
    ) -> Result<(), TimelockError> {
        for (index, call) in calls.iter().enumerate() {
            if let Err(reason) = dispatch(&self.address, &mut self.state, handler, journal, call) {
                tracing::warn!(%id, index, target = %call.target, %reason, "call failed, operation rolled back");
                return Err(TimelockError::CallFailed {
                    index,
                    target: call.target,
                    reason,
                });
            }
            self.state.events.push(TimelockEvent::CallExecuted {
                id,
                index,
                target: call.target,
                value: call.value,
                data: call.data.clone(),
                predecessor: *predecessor,
            });
        }
        self.state.operations.after_call(&id, ctx.timestamp)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Delay policy
    // ═══════════════════════════════════════════════════════════════════

    /// Mirrors `getMinDelay()`.
    pub fn get_min_delay(&self) -> u64 {
        self.state.delay.min_delay()
    }

    /// Mirrors `updateDelay()`. Only the timelock itself may call this,
    /// which in practice means through an executed [`TimelockCall::UpdateDelay`].
    pub fn update_delay(&mut self, ctx: &CallContext, new_delay: u64) -> Result<(), TimelockError> {
        self.state.update_delay(&self.address, &ctx.sender, new_delay)?;
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Roles
    // ═══════════════════════════════════════════════════════════════════

    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.state.access.has_role(role, account)
    }

    pub fn grant_role(&mut self, ctx: &CallContext, role: Role, account: &Address) -> Result<(), TimelockError> {
        self.state.grant_role(&ctx.sender, role, account)?;
        Ok(())
    }

    pub fn revoke_role(&mut self, ctx: &CallContext, role: Role, account: &Address) -> Result<(), TimelockError> {
        self.state.revoke_role(&ctx.sender, role, account)?;
        Ok(())
    }

    /// The caller drops its own `role`.
    pub fn renounce_role(&mut self, ctx: &CallContext, role: Role) {
        if self.state.access.renounce_role(&ctx.sender, role) {
            tracing::info!(%role, account = %ctx.sender, "role renounced");
            self.state.events.push(TimelockEvent::RoleRevoked {
                role,
                account: ctx.sender,
                sender: ctx.sender,
            });
        }
    }

    pub fn access(&self) -> &AccessControl {
        &self.state.access
    }

    // ═══════════════════════════════════════════════════════════════════
    // Queries
    // ═══════════════════════════════════════════════════════════════════

    pub fn operations(&self) -> &OperationRegistry {
        &self.state.operations
    }

    pub fn get_timestamp(&self, id: &OperationId) -> Timestamp {
        self.state.operations.get_timestamp(id)
    }

    pub fn operation_state(&self, id: &OperationId, now: Timestamp) -> OperationState {
        self.state.operations.state(id, now)
    }

    pub fn is_operation(&self, id: &OperationId) -> bool {
        self.state.operations.is_operation(id)
    }

    pub fn is_operation_pending(&self, id: &OperationId) -> bool {
        self.state.operations.is_operation_pending(id)
    }

    pub fn is_operation_ready(&self, id: &OperationId, now: Timestamp) -> bool {
        self.state.operations.is_operation_ready(id, now)
    }

    pub fn is_operation_done(&self, id: &OperationId) -> bool {
        self.state.operations.is_operation_done(id)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Events
    // ═══════════════════════════════════════════════════════════════════

    pub fn events(&self) -> &[TimelockEvent] {
        self.state.events.as_slice()
    }

    pub fn drain_events(&mut self) -> Vec<TimelockEvent> {
        self.state.events.drain()
    }
}

/// Route one entry: self-calls are applied to the live state with the
/// timelock as sender and journaled, everything else goes to the handler.
fn dispatch<H: CallHandler>(
    timelock: &Address,
    state: &mut TimelockState,
    handler: &mut H,
    journal: &mut Journal,
    call: &Call,
) -> Result<(), String> {
    if call.target != *timelock {
        return handler.call(timelock, call).map_err(|e| e.to_string());
    }
    apply_self_call(timelock, state, journal, call).map_err(|e| e.to_string())
}

fn apply_self_call(
    timelock: &Address,
    state: &mut TimelockState,
    journal: &mut Journal,
    call: &Call,
) -> Result<(), TimelockError> {
    if call.value != 0 {
        return Err(TimelockError::InvalidCallData(format!(
            "self-call carries value {}",
            call.value
        )));
    }
    match TimelockCall::decode(&call.data)? {
        TimelockCall::UpdateDelay { new_delay } => {
            let old = state.update_delay(timelock, timelock, new_delay)?;
            journal.record(Undo::Delay(old));
        }
        TimelockCall::GrantRole { role, account } => {
            if state.grant_role(timelock, role, &account)? {
                journal.record(Undo::Granted(role, account));
            }
        }
        TimelockCall::RevokeRole { role, account } => {
            if state.revoke_role(timelock, role, &account)? {
                journal.record(Undo::Revoked(role, account));
            }
        }
    }
    Ok(())
}
