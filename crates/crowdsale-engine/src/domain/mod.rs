pub mod config;
pub mod derivation;
pub mod entities;
pub mod errors;
pub mod guard;
pub mod vault;

pub use config::*;
pub use derivation::*;
pub use entities::*;
pub use errors::*;
pub use guard::*;
pub use vault::*;
