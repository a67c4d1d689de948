//! AccessControl — role membership for the timelock.
//!
//! Mirrors OpenZeppelin's AccessControl as configured by
//! TimelockController: four restricted roles, all administered by the
//! admin role. There is no open role; the zero address never gains
//! privileges implicitly.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::TimelockError;
use crate::foundation::types::Address;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Grants and revokes every role; may cancel.
    Admin,
    /// Schedules operations.
    Proposer,
    /// Executes ready operations.
    Executor,
    /// Cancels pending operations.
    Canceller,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Proposer, Role::Executor, Role::Canceller];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Proposer => "proposer",
            Role::Executor => "executor",
            Role::Canceller => "canceller",
        }
    }

    /// The role allowed to grant and revoke this one. Mirrors `getRoleAdmin()`.
    pub fn admin_role(&self) -> Role {
        Role::Admin
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("unknown role '{s}'"))
    }
}

/// Role → members store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccessControl {
    members: BTreeMap<Role, BTreeSet<Address>>,
}

impl AccessControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.members
            .get(&role)
            .is_some_and(|set| set.contains(account))
    }

    /// Fail with `MissingRole` unless `account` holds `role`.
    pub fn check_role(&self, role: Role, account: &Address) -> Result<(), TimelockError> {
        if self.has_role(role, account) {
            return Ok(());
        }
        tracing::debug!(%role, %account, "role check rejected");
        Err(TimelockError::MissingRole { role, account: *account })
    }

    /// Pass if `account` holds any of `roles`; otherwise report the last one.
    pub fn check_any_role(&self, roles: &[Role], account: &Address) -> Result<(), TimelockError> {
        let mut result = Ok(());
        for &role in roles {
            result = self.check_role(role, account);
            if result.is_ok() {
                break;
            }
        }
        result
    }

    /// Members of `role`, in address order.
    pub fn members(&self, role: Role) -> impl Iterator<Item = &Address> {
        self.members.get(&role).into_iter().flatten()
    }

    /// Grant `role` to `account` on behalf of `sender`. Returns whether
    /// membership changed.
    pub fn grant_role(
        &mut self,
        sender: &Address,
        role: Role,
        account: &Address,
    ) -> Result<bool, TimelockError> {
        self.check_role(role.admin_role(), sender)?;
        Ok(self.setup_role(role, account))
    }

    /// Revoke `role` from `account` on behalf of `sender`. Returns whether
    /// membership changed.
    pub fn revoke_role(
        &mut self,
        sender: &Address,
        role: Role,
        account: &Address,
    ) -> Result<bool, TimelockError> {
        self.check_role(role.admin_role(), sender)?;
        Ok(self.remove_role(role, account))
    }

    /// `sender` drops its own membership. Always allowed.
    pub fn renounce_role(&mut self, sender: &Address, role: Role) -> bool {
        self.remove_role(role, sender)
    }

    /// Unchecked grant, used at construction and restore. Mirrors `_setupRole()`.
    pub(crate) fn setup_role(&mut self, role: Role, account: &Address) -> bool {
        self.members.entry(role).or_default().insert(*account)
    }

    pub(crate) fn remove_role(&mut self, role: Role, account: &Address) -> bool {
        let Some(set) = self.members.get_mut(&role) else {
            return false;
        };
        let removed = set.remove(account);
        if set.is_empty() {
            self.members.remove(&role);
        }
        removed
    }
}
