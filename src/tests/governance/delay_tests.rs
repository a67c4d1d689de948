use crate::foundation::error::TimelockError;
use crate::governance::delay::DelayPolicy;
use crate::tests::*;

#[test]
fn test_min_delay() {
    assert_eq!(DelayPolicy::new(MIN_DELAY).min_delay(), MIN_DELAY);
}

#[test]
fn test_check_accepts_min_and_above() {
    let policy = DelayPolicy::new(5);
    assert!(policy.check(5).is_ok());
    assert!(policy.check(6).is_ok());
}

#[test]
fn test_check_rejects_below_min() {
    let policy = DelayPolicy::new(5);
    assert_eq!(
        policy.check(4),
        Err(TimelockError::InsufficientDelay { requested: 4, minimum: 5 })
    );
}

#[test]
fn test_update_requires_timelock_identity() {
    let mut policy = DelayPolicy::new(5);
    for sender in [alice(), bob(), carol(), dave()] {
        assert_eq!(
            policy.update(&timelock_address(), &sender, 1),
            Err(TimelockError::UnauthorizedCaller(sender))
        );
    }
    assert_eq!(policy.min_delay(), 5);
}

#[test]
fn test_update_by_timelock_returns_old_delay() {
    let mut policy = DelayPolicy::new(5);
    assert_eq!(policy.update(&timelock_address(), &timelock_address(), 60), Ok(5));
    assert_eq!(policy.min_delay(), 60);
}
