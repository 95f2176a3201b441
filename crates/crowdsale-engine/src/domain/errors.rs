//! # Domain Errors
//!
//! Error taxonomy for the crowdsale engine. `CrowdsaleError` is the kind
//! surfaced through the API; `LedgerError` covers substrate failures raised
//! by ledger commits and is wrapped rather than flattened, so callers can
//! tell a domain rejection from a custody fault.

use crate::domain::entities::Address;
use thiserror::Error;

/// Errors returned by the crowdsale API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CrowdsaleError {
    /// Sale initialization with a zero price.
    #[error("cost must be greater than zero")]
    InvalidCost,

    /// Purchase of zero asset units.
    #[error("amount must be greater than zero")]
    InvalidAmount,

    /// No sale record exists at the derived address.
    #[error("no sale record at {record}")]
    SaleNotFound { record: Address },

    /// Purchase attempted after the sale was closed.
    #[error("crowdsale {id} is closed")]
    CrowdsaleClosed { id: Address },

    /// Caller is not the recorded owner of the sale.
    #[error("caller {caller} is not the sale owner {owner}")]
    Unauthorized { caller: Address, owner: Address },

    /// A record already exists for this sale id.
    #[error("sale record already exists at {record}")]
    AccountExists { record: Address },

    /// A token account at the derived vault address is bound to another mint.
    #[error("vault mint mismatch: expected {expected}, found {found}")]
    MintMismatch { expected: Address, found: Address },

    /// The vault does not hold enough asset units for the purchase.
    #[error("insufficient vault balance: requested {requested}, available {available}")]
    InsufficientVaultBalance { requested: u64, available: u64 },

    /// The payer cannot cover the payment or reservation.
    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: u64, available: u64 },

    /// `amount * cost` exceeds the base-currency range.
    #[error("payment overflow: {amount} units at cost {cost}")]
    Overflow { amount: u64, cost: u64 },

    /// Withdrawal when the escrow holds nothing above the reservation.
    #[error("nothing to withdraw: balance {balance}, reservation {reservation}")]
    NothingToWithdraw { balance: u64, reservation: u64 },

    /// Substrate failure during a ledger commit.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Record bytes could not be encoded or decoded.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

/// Errors raised by the host ledger.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("no record account at {address}")]
    RecordNotFound { address: Address },

    #[error("record account already exists at {address}")]
    RecordExists { address: Address },

    #[error("no token account at {address}")]
    TokenAccountNotFound { address: Address },

    #[error("token account already exists at {address}")]
    TokenAccountExists { address: Address },

    /// An existing token account does not match the requested mint/authority.
    #[error("token account binding mismatch at {address}")]
    TokenBindingMismatch { address: Address },

    /// A vault debit was presented without a matching authority capability.
    #[error("authority mismatch for vault {vault}")]
    AuthorityMismatch { vault: Address },

    #[error("insufficient balance in {account}: required {required}, available {available}")]
    InsufficientBalance {
        account: Address,
        required: u64,
        available: u64,
    },

    #[error("insufficient tokens in {account}: required {required}, available {available}")]
    InsufficientTokens {
        account: Address,
        required: u64,
        available: u64,
    },

    /// A debit would take a record account below its rent reservation.
    #[error("balance of {account} would fall to {balance}, below reservation {reservation}")]
    BelowReservation {
        account: Address,
        balance: u64,
        reservation: u64,
    },

    #[error("balance overflow crediting {account}")]
    BalanceOverflow { account: Address },
}

/// Errors raised by the record codec.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("record encoding failed: {0}")]
    Encode(String),

    #[error("record decoding failed: {0}")]
    Decode(String),
}
