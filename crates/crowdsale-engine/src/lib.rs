//! # Crowdsale Engine
//!
//! A fixed-price token crowdsale engine with escrow custody. A creator opens
//! a sale backed by a program-controlled vault holding a fungible asset.
//! Buyers pay base currency at `cost` per unit and receive asset units
//! released from the vault. The creator closes the sale and withdraws the
//! escrowed proceeds.
//!
//! ## Custody Model
//!
//! ```text
//! buyer ───base currency───→ [sale record account]   (escrow, swept by withdraw)
//! vault ───asset units─────→ [buyer holding account]
//! ```
//!
//! The vault is owned by a keyless derived authority. No secret exists for
//! that address; the engine mints a [`VaultAuthority`] capability internally
//! and the ledger honors vault debits only under a matching capability.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Positive Pricing | `cost` is validated as non-zero at initialization |
//! | 2 | Monotonic Status | Open -> Closed, never back |
//! | 3 | Open Sales Only | Purchases are rejected once a sale is closed |
//! | 4 | Atomic Settlement | All four balance movements commit, or none do |
//! | 5 | Owner Privileges | Close and withdraw require the recorded owner |
//! | 6 | Reservation Floor | Record accounts never drop below the host minimum |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Pure domain logic (entities, derivation, custody, authorization)
//! - `ports/` - Port traits (inbound API, outbound ledger and codec)
//! - `adapters/` - In-memory ledger and bincode record codec
//! - `service/` - Application service implementing the API
//!
//! ## Usage
//!
//! ```ignore
//! use crowdsale_engine::{
//!     BincodeRecordCodec, CrowdsaleApi, CrowdsaleDependencies, CrowdsaleService,
//!     InMemoryLedger,
//! };
//!
//! let deps = CrowdsaleDependencies {
//!     ledger: InMemoryLedger::default(),
//!     codec: BincodeRecordCodec,
//! };
//! let mut service = CrowdsaleService::new(deps);
//!
//! // Open a sale at 5 base units per asset unit, then stock the vault.
//! let addresses = service.initialize(creator, id, mint, 5)?;
//! service.ledger_mut().mint_to(addresses.vault, 1_000_000)?;
//!
//! // Buyers purchase; the owner later closes and sweeps the proceeds.
//! service.buy_tokens(buyer, id, 200)?;
//! service.close_crowdsale(creator, id)?;
//! let swept = service.withdraw_funds(creator, id)?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export key types for convenience
pub use adapters::codec::BincodeRecordCodec;
pub use adapters::memory_ledger::InMemoryLedger;
pub use domain::config::ReservationSchedule;
pub use domain::derivation::{
    authority_address, holding_address, record_address, sale_addresses, vault_address,
    SaleAddresses,
};
pub use domain::entities::{Address, Crowdsale, CrowdsaleStatus, SaleId, TokenAccount};
pub use domain::errors::{CodecError, CrowdsaleError, LedgerError};
pub use domain::vault::{EscrowVault, VaultAuthority};
pub use ports::inbound::CrowdsaleApi;
pub use ports::outbound::{Ledger, LedgerOp, RecordCodec};
pub use service::{CrowdsaleDependencies, CrowdsaleService};
