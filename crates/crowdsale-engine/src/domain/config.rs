//! Host economics configuration.

use serde::{Deserialize, Serialize};

/// Minimum-balance schedule for record accounts.
///
/// The host requires any account holding record data to keep a base-currency
/// balance proportional to its data size, so state cannot be parked for
/// free. `withdraw_funds` sweeps only what sits above this floor, and the
/// ledger rejects debits that would cross it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationSchedule {
    /// Flat component charged for any record account.
    pub base: u64,
    /// Additional charge per byte of record data.
    pub per_byte: u64,
}

impl Default for ReservationSchedule {
    fn default() -> Self {
        ReservationSchedule {
            base: 890_880,    // floor for a zero-byte account
            per_byte: 6_960,  // per data byte on top of the floor
        }
    }
}

impl ReservationSchedule {
    /// Minimum balance an account holding `data_len` bytes of record data
    /// must keep.
    pub fn minimum_balance(&self, data_len: usize) -> u64 {
        self.base
            .saturating_add(self.per_byte.saturating_mul(data_len as u64))
    }
}
