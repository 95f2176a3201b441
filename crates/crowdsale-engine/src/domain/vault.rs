//! # Escrow Vault Custody
//!
//! The vault is a token account owned by a keyless derived authority: an
//! address with no corresponding secret, so nothing outside the engine can
//! ever sign for it. Control is expressed as a [`VaultAuthority`] capability
//! instead. The engine mints the capability internally when settling a
//! purchase, and the ledger honors a vault debit only when the presented
//! capability matches the token account's ownership tag.
//!
//! The capability's constructor is crate-private. Host code receives
//! capabilities embedded in commit batches and can check them, but cannot
//! forge one for an arbitrary vault.

use crate::domain::derivation;
use crate::domain::entities::{Address, Crowdsale, SaleId, TokenAccount};
use crate::domain::errors::{CrowdsaleError, LedgerError};

/// Proof of control over a sale's vault.
///
/// Stands in for the signature a keyed owner would provide. Mintable only
/// inside the engine; checked by the ledger against the vault's ownership
/// tag on every debit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultAuthority {
    address: Address,
}

impl VaultAuthority {
    /// Mint the capability for a sale's derived authority.
    pub(crate) fn for_sale(id: &SaleId) -> Self {
        VaultAuthority {
            address: derivation::authority_address(id),
        }
    }

    /// The derived authority address this capability stands for.
    pub fn address(&self) -> Address {
        self.address
    }

    /// True when this capability matches the account's ownership tag.
    pub fn controls(&self, account: &TokenAccount) -> bool {
        self.address == account.authority
    }
}

/// A sale's vault binding: the token account the sold asset is released
/// from, its controlling capability, and the mint it must hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscrowVault {
    address: Address,
    authority: VaultAuthority,
    mint: Address,
}

impl EscrowVault {
    /// Derive the vault binding for a sale that does not exist yet.
    pub(crate) fn for_new_sale(id: &SaleId, mint: &Address) -> Self {
        EscrowVault {
            address: derivation::vault_address(id, mint),
            authority: VaultAuthority::for_sale(id),
            mint: *mint,
        }
    }

    /// Rebuild the vault binding of an existing sale record.
    pub(crate) fn bind(sale: &Crowdsale) -> Self {
        Self::for_new_sale(&sale.id, &sale.mint)
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn authority(&self) -> &VaultAuthority {
        &self.authority
    }

    pub fn mint(&self) -> Address {
        self.mint
    }

    /// Check that an existing token account at the vault address carries
    /// this sale's mint and authority.
    ///
    /// Runs when `initialize` finds the derived vault address already
    /// occupied, so a sale can never adopt a foreign token account.
    pub fn verify_binding(&self, account: &TokenAccount) -> Result<(), CrowdsaleError> {
        if account.mint != self.mint {
            return Err(CrowdsaleError::MintMismatch {
                expected: self.mint,
                found: account.mint,
            });
        }
        if !self.authority.controls(account) {
            return Err(CrowdsaleError::Ledger(LedgerError::AuthorityMismatch {
                vault: self.address,
            }));
        }
        Ok(())
    }
}
