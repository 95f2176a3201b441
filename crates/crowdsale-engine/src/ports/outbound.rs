//! # Outbound Ports (Driven Ports)
//!
//! Dependencies the crowdsale engine requires the host to provide: the
//! ledger substrate holding accounts and records, and the codec for record
//! bytes.

use crate::domain::entities::{Address, Crowdsale, TokenAccount};
use crate::domain::errors::{CodecError, LedgerError};
use crate::domain::vault::VaultAuthority;

/// One balance or record movement inside a commit batch.
///
/// Handlers validate preconditions, build the full batch, and hand it to
/// [`Ledger::commit`] in one call, so a sale mutation is all-or-nothing.
#[derive(Debug, Clone)]
pub enum LedgerOp {
    /// Create a record account at `address` holding `data`.
    ///
    /// The reservation for `data.len()` bytes moves from `payer` onto the
    /// new account as its starting balance.
    CreateRecord {
        address: Address,
        data: Vec<u8>,
        payer: Address,
    },
    /// Overwrite an existing record's bytes. Balance is untouched.
    WriteRecord { address: Address, data: Vec<u8> },
    /// Debit base currency. Record accounts cannot cross their reservation.
    DebitBase { account: Address, amount: u64 },
    /// Credit base currency.
    CreditBase { account: Address, amount: u64 },
    /// Create a token account if absent; verify its binding if present.
    EnsureTokenAccount {
        address: Address,
        mint: Address,
        authority: Address,
    },
    /// Debit asset units under a vault-authority capability.
    DebitToken {
        account: Address,
        amount: u64,
        authority: VaultAuthority,
    },
    /// Credit asset units to an existing token account.
    CreditToken { account: Address, amount: u64 },
}

/// Abstract interface over the host ledger.
///
/// Production: the host chain's account store.
/// Testing: `InMemoryLedger` (adapters/memory_ledger.rs)
///
/// Reads are infallible; unknown base accounts read as zero balance.
pub trait Ledger: Send + Sync {
    /// Record bytes at an address, if a record account exists there.
    fn record(&self, address: &Address) -> Option<Vec<u8>>;

    /// Whether a record account exists at an address.
    fn record_exists(&self, address: &Address) -> bool {
        self.record(address).is_some()
    }

    /// Base-currency balance of an account.
    fn base_balance(&self, account: &Address) -> u64;

    /// Token account state at an address, if one exists.
    fn token_account(&self, address: &Address) -> Option<TokenAccount>;

    /// Minimum balance the host requires of a record holding `data_len`
    /// bytes.
    fn minimum_balance(&self, data_len: usize) -> u64;

    /// Apply a batch of operations atomically.
    ///
    /// Either ALL operations in the batch apply, or NONE do. Validation
    /// runs against the batch's own intermediate state, so two debits of
    /// one account must be jointly affordable.
    fn commit(&mut self, ops: &[LedgerOp]) -> Result<(), LedgerError>;
}

/// Abstract interface for sale record serialization.
///
/// Production and testing: `BincodeRecordCodec` (adapters/codec.rs)
pub trait RecordCodec: Send + Sync {
    /// Serialize a sale record to bytes.
    fn encode(&self, sale: &Crowdsale) -> Result<Vec<u8>, CodecError>;

    /// Deserialize bytes to a sale record.
    fn decode(&self, bytes: &[u8]) -> Result<Crowdsale, CodecError>;
}
