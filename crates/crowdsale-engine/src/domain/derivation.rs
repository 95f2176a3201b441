//! # Address Derivation
//!
//! Deterministic mapping from a sale id to the addresses the engine works
//! with: the state record, the keyless vault authority, the vault token
//! account, and buyer holding accounts. Any party can recompute these
//! offline before calling in; the engine keeps no lookup table.
//!
//! Each derivation hashes its seeds with a fixed domain tag, so derived
//! addresses live off the identity address space and the roles cannot
//! collide with one another.

use crate::domain::entities::{Address, SaleId};
use sha2::{Digest, Sha256};

/// Seed marking the vault-authority derivation.
pub const AUTHORITY_SEED: &[u8] = b"authority";

/// Seed marking vault token accounts.
pub const VAULT_SEED: &[u8] = b"vault";

/// Seed marking buyer holding accounts.
pub const HOLDING_SEED: &[u8] = b"holding";

/// Domain tag mixed into every derivation.
const DERIVATION_DOMAIN: &[u8] = b"crowdsale:derived-address:v1";

fn derive(seeds: &[&[u8]]) -> Address {
    let mut hasher = Sha256::new();
    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update(DERIVATION_DOMAIN);
    Address::new(hasher.finalize().into())
}

/// State-record address of a sale. A pure function of the id alone, so one
/// id maps to exactly one record.
pub fn record_address(id: &SaleId) -> Address {
    derive(&[id.as_ref()])
}

/// Keyless authority that owns the sale's vault. No secret exists for this
/// address; the engine proves control of it with a [`crate::VaultAuthority`]
/// capability instead of a signature.
pub fn authority_address(id: &SaleId) -> Address {
    derive(&[id.as_ref(), AUTHORITY_SEED])
}

/// Vault token account of a sale: held by the derived authority, bound to
/// one mint.
pub fn vault_address(id: &SaleId, mint: &Address) -> Address {
    derive(&[authority_address(id).as_ref(), mint.as_ref(), VAULT_SEED])
}

/// Holding token account for one owner and one mint. Purchases of the same
/// mint by the same buyer accumulate here.
pub fn holding_address(owner: &Address, mint: &Address) -> Address {
    derive(&[owner.as_ref(), mint.as_ref(), HOLDING_SEED])
}

/// The full address set derived for one sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleAddresses {
    /// Where the sale record lives (and where payments escrow).
    pub record: Address,
    /// The keyless owner of the vault.
    pub authority: Address,
    /// The token account the sold asset is released from.
    pub vault: Address,
}

/// Compute every derived address for a sale in one pass.
pub fn sale_addresses(id: &SaleId, mint: &Address) -> SaleAddresses {
    SaleAddresses {
        record: record_address(id),
        authority: authority_address(id),
        vault: vault_address(id, mint),
    }
}
