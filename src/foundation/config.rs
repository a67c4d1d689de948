//! Constants and deployment configuration for the Knowledger timelock.
//!
//! Mirrors the TimelockController constructor arguments:
//!
//! | OpenZeppelin constructor | Knowledger config          |
//! |--------------------------|----------------------------|
//! | `minDelay`               | `TimelockConfig::min_delay` |
//! | `proposers`              | `TimelockConfig::proposers` |
//! | `executors`              | `TimelockConfig::executors` |
//! | `admin` (optional)       | `TimelockConfig::admin`     |

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::foundation::types::{Address, Timestamp};
use crate::governance::access::Role;

/// Size of an account identifier in bytes.
pub const ADDRESS_SIZE: usize = 20;

/// Size of an operation id / salt in bytes (SHA-256 output).
pub const ID_SIZE: usize = 32;

// ═══════════════════════════════════════════════════════════════════════
// TIMELOCK SETTINGS (mirrors TimelockController.sol)
// ═══════════════════════════════════════════════════════════════════════

/// Stored timestamp of an operation that was never scheduled (or was cancelled).
pub const UNSET_TIMESTAMP: Timestamp = 0;

/// Stored timestamp of an executed operation. Mirrors `_DONE_TIMESTAMP`.
pub const DONE_TIMESTAMP: Timestamp = 1;

/// Minimum delay used when a deployment config omits one.
/// Matches the production deployment (1000 * 60 seconds).
pub const DEFAULT_MIN_DELAY: u64 = 60_000;

// ═══════════════════════════════════════════════════════════════════════
// DEPLOYMENT CONFIG
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("timelock address must not be zero")]
    ZeroTimelockAddress,

    #[error("zero address cannot hold role {0}")]
    ZeroMember(Role),
}

/// Deployment-time configuration, supplied once at construction.
///
/// ```toml
/// address = "00000000000000000000000000000000000000aa"
/// min_delay = 5
/// proposers = ["...", "..."]
/// executors = ["..."]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelockConfig {
    /// Identity of the timelock itself. Self-calls are recognised by this address.
    pub address: Address,
    #[serde(default = "default_min_delay")]
    pub min_delay: u64,
    /// Optional bootstrap admin, expected to renounce once setup is done.
    #[serde(default)]
    pub admin: Option<Address>,
    #[serde(default)]
    pub proposers: Vec<Address>,
    #[serde(default)]
    pub executors: Vec<Address>,
    /// Extra cancellers on top of the proposers.
    #[serde(default)]
    pub cancellers: Vec<Address>,
}

fn default_min_delay() -> u64 {
    DEFAULT_MIN_DELAY
}

impl TimelockConfig {
    pub fn new(address: Address, min_delay: u64) -> Self {
        TimelockConfig {
            address,
            min_delay,
            admin: None,
            proposers: Vec::new(),
            executors: Vec::new(),
            cancellers: Vec::new(),
        }
    }

    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: TimelockConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Every role is restricted, so the zero address (the "open role"
    /// marker) is rejected wherever it appears.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.address.is_zero() {
            return Err(ConfigError::ZeroTimelockAddress);
        }
        if self.admin.is_some_and(|a| a.is_zero()) {
            return Err(ConfigError::ZeroMember(Role::Admin));
        }
        let groups = [
            (Role::Proposer, &self.proposers),
            (Role::Executor, &self.executors),
            (Role::Canceller, &self.cancellers),
        ];
        for (role, members) in groups {
            if members.iter().any(Address::is_zero) {
                return Err(ConfigError::ZeroMember(role));
            }
        }
        Ok(())
    }
}
