//! Command-line host for the ledger
//!
//! The host supplies everything the core treats as external: caller
//! identity, sequencing, and durability.

pub mod commands;

pub use commands::{
    cmd_account_new, cmd_allowance, cmd_approve, cmd_balance, cmd_deploy, cmd_events, cmd_export,
    cmd_import, cmd_info, cmd_transfer, cmd_transfer_from, cmd_verify, AppState, CliResult,
};
