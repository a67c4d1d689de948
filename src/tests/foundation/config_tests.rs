use crate::foundation::config::*;
use crate::foundation::types::Address;
use crate::governance::access::Role;
use crate::tests::*;

fn toml_config(extra: &str) -> String {
    format!(
        "address = \"{}\"\nproposers = [\"{}\"]\nexecutors = [\"{}\"]\n{}",
        timelock_address(),
        bob(),
        carol(),
        extra
    )
}

#[test]
fn test_config_from_toml() {
    let config = TimelockConfig::from_toml_str(&toml_config("min_delay = 5\n")).unwrap();
    assert_eq!(config.address, timelock_address());
    assert_eq!(config.min_delay, 5);
    assert_eq!(config.proposers, vec![bob()]);
    assert_eq!(config.executors, vec![carol()]);
    assert!(config.admin.is_none());
    assert!(config.cancellers.is_empty());
}

#[test]
fn test_config_default_min_delay() {
    let config = TimelockConfig::from_toml_str(&toml_config("")).unwrap();
    assert_eq!(config.min_delay, DEFAULT_MIN_DELAY);
}

#[test]
fn test_config_accepts_0x_prefix() {
    let raw = format!("address = \"0x{}\"\n", timelock_address());
    let config = TimelockConfig::from_toml_str(&raw).unwrap();
    assert_eq!(config.address, timelock_address());
}

#[test]
fn test_config_rejects_bad_hex() {
    let raw = "address = \"not-hex\"\n";
    assert!(matches!(TimelockConfig::from_toml_str(raw), Err(ConfigError::Parse(_))));
}

#[test]
fn test_config_rejects_zero_timelock_address() {
    let config = TimelockConfig::new(Address::ZERO, 5);
    assert!(matches!(config.validate(), Err(ConfigError::ZeroTimelockAddress)));
}

#[test]
fn test_config_rejects_open_roles() {
    let mut config = deploy_config();
    config.executors.push(Address::ZERO);
    assert!(matches!(config.validate(), Err(ConfigError::ZeroMember(Role::Executor))));

    let mut config = deploy_config();
    config.admin = Some(Address::ZERO);
    assert!(matches!(config.validate(), Err(ConfigError::ZeroMember(Role::Admin))));
}

#[test]
fn test_config_load_missing_file() {
    let result = TimelockConfig::load("/nonexistent/knowledger/timelock.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_done_timestamp_sentinel() {
    assert_eq!(UNSET_TIMESTAMP, 0);
    assert_eq!(DONE_TIMESTAMP, 1);
}
