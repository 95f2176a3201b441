pub mod codec;
pub mod memory_ledger;

pub use codec::*;
pub use memory_ledger::*;
