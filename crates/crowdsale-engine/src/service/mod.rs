//! # Crowdsale Service
//!
//! The application service implementing [`crate::CrowdsaleApi`].
//!
//! Every handler follows one shape:
//! 1. Resolve the sale id to its record and decode it
//! 2. Validate every precondition against current ledger state
//! 3. Build the full batch of balance and record movements
//! 4. Commit once
//!
//! State changes only at the commit, so a rejected call leaves the ledger
//! exactly as it found it.

mod sale;

use crate::domain::entities::{Address, Crowdsale};
use crate::domain::errors::CrowdsaleError;
use crate::ports::outbound::{Ledger, RecordCodec};

/// The crowdsale application service.
///
/// Generic over its outbound ports; hosts inject the ledger and codec at
/// construction. There is no global handle: each workspace owns its own
/// service value and passes it where it is needed.
pub struct CrowdsaleService<L, C>
where
    L: Ledger,
    C: RecordCodec,
{
    /// Host ledger holding base accounts, records, and token accounts.
    pub(crate) ledger: L,
    /// Codec for sale record bytes.
    pub(crate) codec: C,
}

/// Dependencies for CrowdsaleService
pub struct CrowdsaleDependencies<L, C> {
    pub ledger: L,
    pub codec: C,
}

impl<L, C> CrowdsaleService<L, C>
where
    L: Ledger,
    C: RecordCodec,
{
    /// Create a new service with the given dependencies.
    pub fn new(deps: CrowdsaleDependencies<L, C>) -> Self {
        CrowdsaleService {
            ledger: deps.ledger,
            codec: deps.codec,
        }
    }

    /// Read-only view of the underlying ledger.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Host-side handle to the underlying ledger, for facilities outside
    /// the sale API such as funding accounts and stocking vaults.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// Load and decode the sale record at `record`. Returns the encoded
    /// length alongside, for reservation math.
    pub(crate) fn load_sale(
        &self,
        record: &Address,
    ) -> Result<(Crowdsale, usize), CrowdsaleError> {
        let bytes = self
            .ledger
            .record(record)
            .ok_or(CrowdsaleError::SaleNotFound { record: *record })?;
        let sale = self.codec.decode(&bytes)?;
        Ok((sale, bytes.len()))
    }
}
