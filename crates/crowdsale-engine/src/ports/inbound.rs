//! # Inbound Port (Driving Port)
//!
//! The API the crowdsale engine offers its host. Callers derive a sale's
//! addresses offline (see [`crate::domain::derivation`]) and route every
//! call by sale id; the engine resolves the id to its record internally.
//!
//! There is no ambient signer. Each call names the acting account
//! explicitly, and the engine checks that account against the record.

use crate::domain::derivation::SaleAddresses;
use crate::domain::entities::{Address, Crowdsale, SaleId};
use crate::domain::errors::CrowdsaleError;

/// Public interface of the crowdsale engine.
///
/// Mutating calls take `&mut self`: a handler holds exclusive ledger access
/// for its whole commit, and the host serializes calls touching the same
/// sale. Nothing here blocks or performs IO.
pub trait CrowdsaleApi: Send + Sync {
    /// Open a new sale.
    ///
    /// Creates the sale record at its derived address, funded to the host
    /// reservation by `caller`, and ensures the vault token account exists
    /// for `mint` under the sale's derived authority. The caller becomes
    /// the sale owner. The vault starts empty; stocking it is a host-side
    /// step.
    ///
    /// # Errors
    ///
    /// - [`CrowdsaleError::InvalidCost`] if `cost` is zero
    /// - [`CrowdsaleError::AccountExists`] if the id already has a record
    /// - [`CrowdsaleError::MintMismatch`] if the derived vault address is
    ///   occupied by a token account bound to another mint
    /// - [`CrowdsaleError::InsufficientFunds`] if `caller` cannot fund the
    ///   record reservation
    fn initialize(
        &mut self,
        caller: Address,
        id: SaleId,
        mint: Address,
        cost: u64,
    ) -> Result<SaleAddresses, CrowdsaleError>;

    /// Purchase `amount` asset units from an open sale.
    ///
    /// Settles atomically: the payment (`amount * cost`) moves from the
    /// buyer into the sale record's escrow, and `amount` units move from
    /// the vault into the buyer's holding account, which is created on
    /// first purchase. A failure leaves every balance untouched.
    ///
    /// # Errors
    ///
    /// - [`CrowdsaleError::SaleNotFound`] if no record exists for the id
    /// - [`CrowdsaleError::CrowdsaleClosed`] if the sale is closed
    /// - [`CrowdsaleError::InvalidAmount`] if `amount` is zero
    /// - [`CrowdsaleError::Overflow`] if `amount * cost` overflows
    /// - [`CrowdsaleError::InsufficientVaultBalance`] if the vault holds
    ///   fewer than `amount` units
    /// - [`CrowdsaleError::InsufficientFunds`] if the buyer cannot cover
    ///   the payment
    fn buy_tokens(
        &mut self,
        buyer: Address,
        id: SaleId,
        amount: u64,
    ) -> Result<(), CrowdsaleError>;

    /// Close a sale, permanently stopping purchases.
    ///
    /// Owner only. Closing an already-closed sale succeeds and changes
    /// nothing, so retried transactions stay safe.
    ///
    /// # Errors
    ///
    /// - [`CrowdsaleError::SaleNotFound`] if no record exists for the id
    /// - [`CrowdsaleError::Unauthorized`] if `caller` is not the owner
    fn close_crowdsale(&mut self, caller: Address, id: SaleId) -> Result<(), CrowdsaleError>;

    /// Sweep escrowed proceeds above the record's reservation to the owner.
    ///
    /// Owner only, but independent of sale status: proceeds can be drawn
    /// down while the sale is still open. Returns the amount moved.
    ///
    /// # Errors
    ///
    /// - [`CrowdsaleError::SaleNotFound`] if no record exists for the id
    /// - [`CrowdsaleError::Unauthorized`] if `caller` is not the owner
    /// - [`CrowdsaleError::NothingToWithdraw`] if nothing sits above the
    ///   reservation
    fn withdraw_funds(&mut self, caller: Address, id: SaleId) -> Result<u64, CrowdsaleError>;

    /// Read back a sale record.
    ///
    /// # Errors
    ///
    /// - [`CrowdsaleError::SaleNotFound`] if no record exists for the id
    fn get_crowdsale(&self, id: &SaleId) -> Result<Crowdsale, CrowdsaleError>;

    /// Asset units currently held by a sale's vault.
    ///
    /// # Errors
    ///
    /// - [`CrowdsaleError::SaleNotFound`] if no record exists for the id
    fn vault_balance(&self, id: &SaleId) -> Result<u64, CrowdsaleError>;
}
