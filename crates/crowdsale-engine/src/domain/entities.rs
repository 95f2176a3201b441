//! # Core Domain Entities
//!
//! Shared data types for the crowdsale engine: ledger addresses, the sale
//! record, and token accounts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte ledger address.
///
/// Addresses identify base-currency accounts, token accounts, and state
/// record accounts alike. Derived addresses (records, vault authorities,
/// vaults, holdings) are produced by [`crate::domain::derivation`] and have
/// no corresponding secret.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Address(pub [u8; 32]);

impl Address {
    /// Byte length of an address.
    pub const LEN: usize = 32;

    pub fn new(bytes: [u8; 32]) -> Self {
        Address(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Abbreviated hex form for log lines.
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Address {
    fn from(bytes: [u8; 32]) -> Self {
        Address(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", hex::encode(self.0))
    }
}

/// A sale identifier (alias for `Address` in sale contexts).
///
/// The id is chosen by the creator and is the sole input to record and
/// authority derivation, so one id maps to exactly one sale.
pub type SaleId = Address;

/// Lifecycle status of a sale. Transitions are monotonic: `Open -> Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrowdsaleStatus {
    Open,
    Closed,
}

/// The on-ledger state record of one crowdsale.
///
/// Created by `initialize` at the derived record address and rewritten in
/// place on status changes. The record account doubles as the escrow for
/// buyer payments: purchases credit its base balance, and `withdraw_funds`
/// sweeps everything above the host reservation to the owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crowdsale {
    /// Creator-chosen identifier the record and authority derive from.
    pub id: SaleId,
    /// Price in base-currency units per asset unit. Always non-zero.
    pub cost: u64,
    /// The fungible asset being sold.
    pub mint: Address,
    /// The vault token account the sold asset is released from.
    pub vault: Address,
    /// Current lifecycle status.
    pub status: CrowdsaleStatus,
    /// Account allowed to close the sale and withdraw proceeds.
    pub owner: Address,
}

impl Crowdsale {
    /// Build a fresh record. Sales start open.
    pub fn new(id: SaleId, cost: u64, mint: Address, vault: Address, owner: Address) -> Self {
        Crowdsale {
            id,
            cost,
            mint,
            vault,
            status: CrowdsaleStatus::Open,
            owner,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == CrowdsaleStatus::Open
    }
}

/// A token account: units of one mint held under one authority.
///
/// The authority field is an ownership tag checked by the ledger, not a
/// signing key. Vault accounts carry the sale's derived authority; buyer
/// holding accounts carry the buyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAccount {
    /// The mint this account holds units of.
    pub mint: Address,
    /// Ownership tag honored by the ledger on debits.
    pub authority: Address,
    /// Current balance in asset units.
    pub amount: u64,
}

impl TokenAccount {
    pub fn new(mint: Address, authority: Address) -> Self {
        TokenAccount {
            mint,
            authority,
            amount: 0,
        }
    }
}
