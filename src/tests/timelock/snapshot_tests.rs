use crate::foundation::config::DONE_TIMESTAMP;
use crate::foundation::data::find_value;
use crate::foundation::types::Address;
use crate::governance::access::Role;
use crate::timelock::dispatch::{NoopHandler, TimelockCall};
use crate::timelock::snapshot::{encode, restore, SnapshotError};
use crate::tests::*;

#[test]
fn test_encode_fresh_deployment() {
    let controller = deploy();
    let data = encode(&controller);
    assert_eq!(find_value(&data, "address"), Some(timelock_address().to_string().as_str()));
    assert_eq!(find_value(&data, "min_delay"), Some("5"));
    assert_eq!(find_value(&data, "op_count"), Some("0"));
    assert_eq!(find_value(&data, "member_count"), Some("6"));
    assert_eq!(
        find_value(&data, "member_0"),
        Some(format!("admin:{}", timelock_address()).as_str())
    );
}

#[test]
fn test_restore_preserves_state() {
    let mut controller = deploy();
    let done = transfer_op(1, 1);
    let pending = transfer_op(2, 2);
    let done_id = controller.schedule(&ctx(bob(), START), &done, MIN_DELAY).unwrap();
    let pending_id = controller.schedule(&ctx(bob(), START), &pending, 100).unwrap();
    controller.execute(&ctx(carol(), START + MIN_DELAY), &mut NoopHandler, &done).unwrap();

    let restored = restore(timelock_address(), &encode(&controller)).unwrap();

    assert_eq!(restored.get_min_delay(), MIN_DELAY);
    assert_eq!(restored.get_timestamp(&done_id), DONE_TIMESTAMP);
    assert_eq!(restored.get_timestamp(&pending_id), START + 100);
    assert_eq!(restored.operations(), controller.operations());
    assert_eq!(restored.access(), controller.access());
    assert!(restored.events().is_empty());
    assert!(restored.has_role(Role::Executor, &carol()));
}

#[test]
fn test_restored_controller_keeps_enforcing() {
    let mut controller = deploy();
    let op = transfer_op(1, 1);
    let id = controller.schedule(&ctx(bob(), START), &op, MIN_DELAY).unwrap();

    let mut restored = restore(timelock_address(), &encode(&controller)).unwrap();
    assert!(restored.execute(&ctx(carol(), START), &mut NoopHandler, &op).is_err());
    restored.execute(&ctx(carol(), START + MIN_DELAY), &mut NoopHandler, &op).unwrap();
    assert!(restored.is_operation_done(&id));
    assert!(restored.update_delay(&ctx(alice(), START), 0).is_err());
}

/// `address=` entry for the test timelock, prefixed to hand-written snapshots.
fn header() -> String {
    format!("address={};", timelock_address())
}

#[test]
fn test_restore_missing_key() {
    let result = restore(timelock_address(), "min_delay=5;op_count=0;member_count=0");
    assert_eq!(result.unwrap_err(), SnapshotError::MissingKey("address".to_string()));

    let result = restore(timelock_address(), &format!("{}op_count=0;member_count=0", header()));
    assert_eq!(result.unwrap_err(), SnapshotError::MissingKey("min_delay".to_string()));

    let data = format!("{}min_delay=5;op_count=1;member_count=0", header());
    assert_eq!(
        restore(timelock_address(), &data).unwrap_err(),
        SnapshotError::MissingKey("op_0".to_string())
    );
}

#[test]
fn test_restore_invalid_values() {
    let data = format!("{}min_delay=soon;op_count=0;member_count=0", header());
    let result = restore(timelock_address(), &data);
    assert!(matches!(result, Err(SnapshotError::InvalidValue { ref key, .. }) if key == "min_delay"));

    let data = format!("{}min_delay=5;op_count=0;member_count=1;member_0=owner:{}", header(), alice());
    assert!(matches!(
        restore(timelock_address(), &data),
        Err(SnapshotError::InvalidValue { ref key, .. }) if key == "member_0"
    ));

    let data = format!("{}min_delay=5;op_count=1;op_0=abcd:7;member_count=0", header());
    assert!(matches!(
        restore(timelock_address(), &data),
        Err(SnapshotError::InvalidValue { ref key, .. }) if key == "op_0"
    ));
}

#[test]
fn test_restore_malformed_entry() {
    let data = format!("{}min_delay=5;garbage;op_count=0;member_count=0", header());
    let result = restore(timelock_address(), &data);
    assert_eq!(result.unwrap_err(), SnapshotError::MalformedEntry("garbage".to_string()));
}

#[test]
fn test_restore_rejects_zero_addresses() {
    let snapshot = encode(&deploy());
    assert_eq!(
        restore(Address::ZERO, &snapshot).unwrap_err(),
        SnapshotError::ZeroAddress("address".to_string())
    );

    let data = format!("address={};min_delay=5;op_count=0;member_count=0", Address::ZERO);
    assert_eq!(
        restore(timelock_address(), &data).unwrap_err(),
        SnapshotError::ZeroAddress("address".to_string())
    );

    // A zero member would be an open role
    let data = format!(
        "{}min_delay=5;op_count=0;member_count=1;member_0=proposer:{}",
        header(),
        Address::ZERO
    );
    assert_eq!(
        restore(timelock_address(), &data).unwrap_err(),
        SnapshotError::ZeroAddress("member_0".to_string())
    );
}

#[test]
fn test_restore_at_other_address_rejected() {
    let snapshot = encode(&deploy());
    let elsewhere = mock_account(0x99);
    assert_eq!(
        restore(elsewhere, &snapshot).unwrap_err(),
        SnapshotError::AddressMismatch { stored: timelock_address(), requested: elsewhere }
    );
}

#[test]
fn test_restored_timelock_governs_itself() {
    let controller = deploy();
    let mut restored = restore(timelock_address(), &encode(&controller)).unwrap();
    assert_eq!(restored.address(), timelock_address());
    assert!(restored.has_role(Role::Admin, &timelock_address()));

    let op = self_op(&TimelockCall::GrantRole { role: Role::Proposer, account: eve() }, 1);
    restored.schedule(&ctx(bob(), START), &op, MIN_DELAY).unwrap();
    restored.execute(&ctx(carol(), START + MIN_DELAY), &mut NoopHandler, &op).unwrap();
    assert!(restored.has_role(Role::Proposer, &eve()));
}
