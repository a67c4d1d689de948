//! Controller state snapshots in the key=value data format.
//!
//! ## Data Format
//!
//!   address=<timelock_hex>;min_delay=5;op_count=2;op_0=<id_hex>:<timestamp>;
//!   op_1=...;member_count=3;member_0=<role>:<address_hex>;member_1=...
//!
//! The event log is not part of a snapshot; events are delivered to
//! listeners as they happen.
//!
//! A snapshot only restores at the address it was taken from, and the
//! zero address is rejected both as the timelock and as a role member.

use thiserror::Error;

use crate::foundation::data::{build_indexed_key, find_value, malformed_entry, write_entry};
use crate::foundation::types::{Address, OperationId, Timestamp};
use crate::governance::access::{AccessControl, Role};
use crate::governance::delay::DelayPolicy;
use crate::timelock::controller::TimelockController;
use crate::timelock::operations::OperationRegistry;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("missing key '{0}'")]
    MissingKey(String),

    #[error("invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("malformed entry '{0}'")]
    MalformedEntry(String),

    #[error("zero address in '{0}'")]
    ZeroAddress(String),

    #[error("snapshot of timelock {stored} cannot be restored at {requested}")]
    AddressMismatch { stored: Address, requested: Address },
}

pub fn encode(controller: &TimelockController) -> String {
    let mut out = String::new();
    write_entry(&mut out, "address", &controller.address().to_string());
    write_entry(&mut out, "min_delay", &controller.get_min_delay().to_string());

    let operations = controller.operations();
    write_entry(&mut out, "op_count", &operations.len().to_string());
    for (index, (id, timestamp)) in operations.iter().enumerate() {
        let key = build_indexed_key("op_", index);
        write_entry(&mut out, &key, &format!("{id}:{timestamp}"));
    }

    let members: Vec<(Role, &Address)> = Role::ALL
        .into_iter()
        .flat_map(|role| controller.access().members(role).map(move |a| (role, a)))
        .collect();
    write_entry(&mut out, "member_count", &members.len().to_string());
    for (index, (role, account)) in members.into_iter().enumerate() {
        let key = build_indexed_key("member_", index);
        write_entry(&mut out, &key, &format!("{role}:{account}"));
    }
    out
}

/// Rebuild a controller at `address` from [`encode`] output.
pub fn restore(address: Address, data: &str) -> Result<TimelockController, SnapshotError> {
    if let Some(entry) = malformed_entry(data) {
        return Err(SnapshotError::MalformedEntry(entry.to_string()));
    }

    if address.is_zero() {
        return Err(SnapshotError::ZeroAddress("address".to_string()));
    }
    let stored = parse_address(required(data, "address")?, "address")?;
    if stored != address {
        return Err(SnapshotError::AddressMismatch { stored, requested: address });
    }

    let min_delay: u64 = parse_number(data, "min_delay")?;

    let mut operations = OperationRegistry::new();
    let op_count: usize = parse_number(data, "op_count")?;
    for index in 0..op_count {
        let key = build_indexed_key("op_", index);
        let (id, timestamp) = split_pair(data, &key)?;
        let id: OperationId = id.parse().map_err(|e: hex::FromHexError| invalid(&key, e))?;
        let timestamp: Timestamp = timestamp.parse().map_err(|e: std::num::ParseIntError| invalid(&key, e))?;
        operations.restore(id, timestamp);
    }

    let mut access = AccessControl::new();
    let member_count: usize = parse_number(data, "member_count")?;
    for index in 0..member_count {
        let key = build_indexed_key("member_", index);
        let (role, account) = split_pair(data, &key)?;
        let role: Role = role.parse().map_err(|e: String| invalid(&key, e))?;
        let account = parse_address(account, &key)?;
        access.setup_role(role, &account);
    }

    Ok(TimelockController::from_parts(
        address,
        operations,
        access,
        DelayPolicy::new(min_delay),
    ))
}

fn required<'a>(data: &'a str, key: &str) -> Result<&'a str, SnapshotError> {
    find_value(data, key).ok_or_else(|| SnapshotError::MissingKey(key.to_string()))
}

fn parse_number<T>(data: &str, key: &str) -> Result<T, SnapshotError>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    required(data, key)?.parse().map_err(|e| invalid(key, e))
}

/// Parse a non-zero address found under `key`.
fn parse_address(raw: &str, key: &str) -> Result<Address, SnapshotError> {
    let address: Address = raw.parse().map_err(|e: hex::FromHexError| invalid(key, e))?;
    if address.is_zero() {
        return Err(SnapshotError::ZeroAddress(key.to_string()));
    }
    Ok(address)
}

fn split_pair<'a>(data: &'a str, key: &str) -> Result<(&'a str, &'a str), SnapshotError> {
    required(data, key)?
        .split_once(':')
        .ok_or_else(|| invalid(key, "expected '<a>:<b>'"))
}

fn invalid(key: &str, reason: impl ToString) -> SnapshotError {
    SnapshotError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
