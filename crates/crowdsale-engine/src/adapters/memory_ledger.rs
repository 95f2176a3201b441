//! # In-Memory Ledger
//!
//! Reference implementation of the [`Ledger`] port backed by hash maps.
//! Used by the test suites and by hosts embedding the engine without a
//! chain underneath.
//!
//! Also carries the host-side facilities the engine itself never performs:
//! funding base accounts (`airdrop`), opening token accounts outside the
//! derivation scheme, and minting asset units (`mint_to`). Stocking a
//! sale's vault is `mint_to` against the vault address.

use crate::domain::config::ReservationSchedule;
use crate::domain::entities::{Address, TokenAccount};
use crate::domain::errors::LedgerError;
use crate::ports::outbound::{Ledger, LedgerOp};
use std::collections::HashMap;

/// Hash-map ledger with all-or-nothing commits.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    base: HashMap<Address, u64>,
    records: HashMap<Address, Vec<u8>>,
    tokens: HashMap<Address, TokenAccount>,
    reservation: ReservationSchedule,
}

impl InMemoryLedger {
    pub fn new(reservation: ReservationSchedule) -> Self {
        InMemoryLedger {
            base: HashMap::new(),
            records: HashMap::new(),
            tokens: HashMap::new(),
            reservation,
        }
    }

    /// Credit base currency out of thin air. Host faucet, used to fund
    /// creators and buyers. Returns the new balance.
    pub fn airdrop(&mut self, account: Address, amount: u64) -> Result<u64, LedgerError> {
        let balance = self.base.entry(account).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow { account })?;
        Ok(*balance)
    }

    /// Open a token account at an arbitrary address with an arbitrary
    /// binding. Hosts use this for wallets and mints that do not come out
    /// of the engine's derivation scheme.
    pub fn open_token_account(
        &mut self,
        address: Address,
        mint: Address,
        authority: Address,
    ) -> Result<(), LedgerError> {
        if self.tokens.contains_key(&address) {
            return Err(LedgerError::TokenAccountExists { address });
        }
        self.tokens.insert(address, TokenAccount::new(mint, authority));
        Ok(())
    }

    /// Mint asset units straight into a token account. Stands in for the
    /// mint authority stocking a vault before a sale goes live. Returns
    /// the new balance.
    pub fn mint_to(&mut self, account: Address, amount: u64) -> Result<u64, LedgerError> {
        let token = self
            .tokens
            .get_mut(&account)
            .ok_or(LedgerError::TokenAccountNotFound { address: account })?;
        token.amount = token
            .amount
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow { account })?;
        Ok(token.amount)
    }

    fn debit_base(&mut self, account: Address, amount: u64) -> Result<(), LedgerError> {
        let balance = self.base_balance(&account);
        let remaining = balance
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                account,
                required: amount,
                available: balance,
            })?;
        // Record accounts keep their reservation no matter who debits them.
        if let Some(record) = self.records.get(&account) {
            let reservation = self.reservation.minimum_balance(record.len());
            if remaining < reservation {
                return Err(LedgerError::BelowReservation {
                    account,
                    balance: remaining,
                    reservation,
                });
            }
        }
        self.base.insert(account, remaining);
        Ok(())
    }

    fn credit_base(&mut self, account: Address, amount: u64) -> Result<(), LedgerError> {
        let balance = self.base.entry(account).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow { account })?;
        Ok(())
    }

    fn apply(&mut self, op: &LedgerOp) -> Result<(), LedgerError> {
        match op {
            LedgerOp::CreateRecord {
                address,
                data,
                payer,
            } => {
                if self.records.contains_key(address) {
                    return Err(LedgerError::RecordExists { address: *address });
                }
                let reservation = self.reservation.minimum_balance(data.len());
                self.debit_base(*payer, reservation)?;
                self.credit_base(*address, reservation)?;
                self.records.insert(*address, data.clone());
                Ok(())
            }
            LedgerOp::WriteRecord { address, data } => {
                if !self.records.contains_key(address) {
                    return Err(LedgerError::RecordNotFound { address: *address });
                }
                let required = self.reservation.minimum_balance(data.len());
                let balance = self.base_balance(address);
                if balance < required {
                    return Err(LedgerError::BelowReservation {
                        account: *address,
                        balance,
                        reservation: required,
                    });
                }
                self.records.insert(*address, data.clone());
                Ok(())
            }
            LedgerOp::DebitBase { account, amount } => self.debit_base(*account, *amount),
            LedgerOp::CreditBase { account, amount } => self.credit_base(*account, *amount),
            LedgerOp::EnsureTokenAccount {
                address,
                mint,
                authority,
            } => match self.tokens.get(address) {
                Some(existing) => {
                    if existing.mint != *mint || existing.authority != *authority {
                        return Err(LedgerError::TokenBindingMismatch { address: *address });
                    }
                    Ok(())
                }
                None => {
                    self.tokens.insert(*address, TokenAccount::new(*mint, *authority));
                    Ok(())
                }
            },
            LedgerOp::DebitToken {
                account,
                amount,
                authority,
            } => {
                let token = self
                    .tokens
                    .get_mut(account)
                    .ok_or(LedgerError::TokenAccountNotFound { address: *account })?;
                if !authority.controls(token) {
                    return Err(LedgerError::AuthorityMismatch { vault: *account });
                }
                token.amount =
                    token
                        .amount
                        .checked_sub(*amount)
                        .ok_or(LedgerError::InsufficientTokens {
                            account: *account,
                            required: *amount,
                            available: token.amount,
                        })?;
                Ok(())
            }
            LedgerOp::CreditToken { account, amount } => {
                let token = self
                    .tokens
                    .get_mut(account)
                    .ok_or(LedgerError::TokenAccountNotFound { address: *account })?;
                token.amount = token
                    .amount
                    .checked_add(*amount)
                    .ok_or(LedgerError::BalanceOverflow { account: *account })?;
                Ok(())
            }
        }
    }
}

impl Ledger for InMemoryLedger {
    fn record(&self, address: &Address) -> Option<Vec<u8>> {
        self.records.get(address).cloned()
    }

    fn base_balance(&self, account: &Address) -> u64 {
        self.base.get(account).copied().unwrap_or(0)
    }

    fn token_account(&self, address: &Address) -> Option<TokenAccount> {
        self.tokens.get(address).cloned()
    }

    fn minimum_balance(&self, data_len: usize) -> u64 {
        self.reservation.minimum_balance(data_len)
    }

    fn commit(&mut self, ops: &[LedgerOp]) -> Result<(), LedgerError> {
        // Stage the whole batch on a copy; swap in only if every op lands.
        let mut staged = self.clone();
        for op in ops {
            staged.apply(op)?;
        }
        *self = staged;
        Ok(())
    }
}
