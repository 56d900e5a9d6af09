//! Account identity for the ledger
//!
//! This module provides:
//! - Fixed-width account addresses with hex rendering
//! - Hash-based derivation from seed material
//! - Random address generation for the CLI host

pub mod address;

pub use address::{Address, AddressParseError, ADDRESS_LEN};
