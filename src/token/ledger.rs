//! Knowledger (KLD) payment token — the value-transfer collaborator.
//!
//! A minimal fungible balance ledger. As a [`CallHandler`] it moves each
//! executed entry's `value` from the timelock to the entry's `target`.
//! Call data is ignored: the content workflow that would interpret it
//! lives outside this crate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::foundation::types::{Address, Call};
use crate::timelock::dispatch::{CallError, CallHandler};

pub const TOKEN_NAME: &str = "Knowledger";
pub const TOKEN_SYMBOL: &str = "KLD";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("insufficient balance for {account}: has {balance}, needs {amount}")]
    InsufficientBalance {
        account: Address,
        balance: u64,
        amount: u64,
    },

    #[error("balance overflow for {0}")]
    Overflow(Address),
}

/// Mirrors the ERC20 `Transfer` event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: Address,
    pub to: Address,
    pub value: u64,
}

/// Prior balances touched since `begin`, so a rollback only revisits
/// those accounts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Checkpoint {
    transfers_len: usize,
    balances: Vec<(Address, Option<u64>)>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenLedger {
    balances: BTreeMap<Address, u64>,
    total_supply: u64,
    transfers: Vec<Transfer>,
    checkpoint: Option<Checkpoint>,
}

impl TokenLedger {
    /// Mint `initial_supply` to `owner`.
    pub fn new(owner: Address, initial_supply: u64) -> Self {
        let mut balances = BTreeMap::new();
        if initial_supply > 0 {
            balances.insert(owner, initial_supply);
        }
        TokenLedger {
            balances,
            total_supply: initial_supply,
            transfers: Vec::new(),
            checkpoint: None,
        }
    }

    pub fn name(&self) -> &'static str {
        TOKEN_NAME
    }

    pub fn symbol(&self) -> &'static str {
        TOKEN_SYMBOL
    }

    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    pub fn balance_of(&self, account: &Address) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    pub fn transfer(&mut self, from: &Address, to: &Address, amount: u64) -> Result<(), LedgerError> {
        let balance = self.balance_of(from);
        if balance < amount {
            return Err(LedgerError::InsufficientBalance {
                account: *from,
                balance,
                amount,
            });
        }
        if from != to {
            let credited = self
                .balance_of(to)
                .checked_add(amount)
                .ok_or(LedgerError::Overflow(*to))?;
            self.set_balance(*from, balance - amount);
            self.set_balance(*to, credited);
        }
        tracing::debug!(%from, %to, amount, "token transfer");
        self.transfers.push(Transfer { from: *from, to: *to, value: amount });
        Ok(())
    }

    fn set_balance(&mut self, account: Address, balance: u64) {
        let previous = self.balances.insert(account, balance);
        if let Some(checkpoint) = self.checkpoint.as_mut() {
            checkpoint.balances.push((account, previous));
        }
    }
}

impl CallHandler for TokenLedger {
    fn begin(&mut self) {
        self.checkpoint = Some(Checkpoint {
            transfers_len: self.transfers.len(),
            balances: Vec::new(),
        });
    }

    fn call(&mut self, sender: &Address, call: &Call) -> Result<(), CallError> {
        if call.value == 0 {
            return Ok(());
        }
        self.transfer(sender, &call.target, call.value)
            .map_err(|e| CallError::new(e.to_string()))
    }

    fn commit(&mut self) {
        self.checkpoint = None;
    }

    fn rollback(&mut self) {
        let Some(checkpoint) = self.checkpoint.take() else {
            return;
        };
        for (account, previous) in checkpoint.balances.into_iter().rev() {
            match previous {
                Some(balance) => self.balances.insert(account, balance),
                None => self.balances.remove(&account),
            };
        }
        self.transfers.truncate(checkpoint.transfers_len);
    }
}
