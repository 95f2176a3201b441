//! Caller authorization for privileged sale operations.

use crate::domain::entities::{Address, Crowdsale};
use crate::domain::errors::CrowdsaleError;

/// Require that `caller` is the recorded owner of the sale.
///
/// Close and withdraw run this before touching any state. Purchases never
/// do: buying is open to any funded account while the sale is open.
pub fn require_owner(sale: &Crowdsale, caller: &Address) -> Result<(), CrowdsaleError> {
    if sale.owner != *caller {
        return Err(CrowdsaleError::Unauthorized {
            caller: *caller,
            owner: sale.owner,
        });
    }
    Ok(())
}
