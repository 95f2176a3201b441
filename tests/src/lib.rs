//! # Crowdsale Engine Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # End-to-end flows through the public API
//!     ├── sale_flows.rs # Lifecycle: initialize, stock, buy, close, withdraw
//!     └── custody.rs    # Escrow, authorization, and atomicity guarantees
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p crowdsale-tests
//!
//! # By category
//! cargo test -p crowdsale-tests integration::sale_flows::
//! cargo test -p crowdsale-tests integration::custody::
//! ```

pub mod integration;
