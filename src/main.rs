//! Token-Ledger CLI Application
//!
//! A command-line host for deploying and operating the ledger.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use token_ledger::cli::{self, AppState};

#[derive(Parser)]
#[command(name = "ledger")]
#[command(version = "0.1.0")]
#[command(about = "A fixed-supply fungible token ledger", long_about = None)]
struct Cli {
    /// Data directory for ledger snapshots
    #[arg(short, long, default_value = ".ledger_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy a new ledger
    Deploy {
        /// Token name
        #[arg(long)]
        name: String,

        /// Token symbol
        #[arg(long)]
        symbol: String,

        /// Initial supply in whole tokens (scaled by 18 decimals)
        #[arg(long)]
        supply: u128,

        /// Address credited with the entire supply
        #[arg(long)]
        deployer: String,
    },

    /// Display ledger information
    Info,

    /// Account operations
    Account {
        #[command(subcommand)]
        action: AccountCommands,
    },

    /// Show the balance of an account
    Balance {
        /// Account address
        #[arg(short, long)]
        account: String,
    },

    /// Show the remaining allowance for an (owner, spender) pair
    Allowance {
        /// Owner address
        #[arg(long)]
        owner: String,

        /// Spender address
        #[arg(long)]
        spender: String,
    },

    /// Transfer base units to an address
    Transfer {
        /// Sender address
        #[arg(short, long)]
        from: String,

        /// Recipient address
        #[arg(short, long)]
        to: String,

        /// Amount in base units
        #[arg(short, long)]
        amount: u128,
    },

    /// Approve a spender for an exact limit
    Approve {
        /// Owner address (the caller authorizing the approval)
        #[arg(long)]
        owner: String,

        /// Spender address
        #[arg(long)]
        spender: String,

        /// Limit in base units (zero revokes)
        #[arg(short, long)]
        amount: u128,
    },

    /// Delegated transfer by an approved spender
    TransferFrom {
        /// Spender address (the caller)
        #[arg(long)]
        spender: String,

        /// Owner address whose balance is debited
        #[arg(long)]
        owner: String,

        /// Recipient address
        #[arg(long)]
        to: String,

        /// Amount in base units
        #[arg(short, long)]
        amount: u128,
    },

    /// Show recent ledger events
    Events {
        /// Number of events to show
        #[arg(short, long, default_value = "10")]
        count: usize,
    },

    /// Audit the conservation invariant
    Verify,

    /// Export the ledger snapshot to file
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Import a ledger snapshot from file
    Import {
        /// Input file path
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Subcommand)]
enum AccountCommands {
    /// Generate a fresh random address
    New,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // These commands don't need an existing ledger
    match &cli.command {
        Commands::Deploy {
            name,
            symbol,
            supply,
            deployer,
        } => {
            return cli::cmd_deploy(&cli.data_dir, name, symbol, *supply, deployer);
        }
        Commands::Account { action } => match action {
            AccountCommands::New => return cli::cmd_account_new(),
        },
        Commands::Import { input } => {
            return cli::cmd_import(&cli.data_dir, input);
        }
        _ => {}
    }

    // Everything else operates on the deployed ledger
    let mut state = AppState::load(cli.data_dir.clone())?;

    match cli.command {
        Commands::Deploy { .. } | Commands::Account { .. } | Commands::Import { .. } => {
            unreachable!()
        }

        Commands::Info => {
            cli::cmd_info(&state)?;
        }

        Commands::Balance { account } => {
            cli::cmd_balance(&state, &account)?;
        }

        Commands::Allowance { owner, spender } => {
            cli::cmd_allowance(&state, &owner, &spender)?;
        }

        Commands::Transfer { from, to, amount } => {
            cli::cmd_transfer(&mut state, &from, &to, amount)?;
        }

        Commands::Approve {
            owner,
            spender,
            amount,
        } => {
            cli::cmd_approve(&mut state, &owner, &spender, amount)?;
        }

        Commands::TransferFrom {
            spender,
            owner,
            to,
            amount,
        } => {
            cli::cmd_transfer_from(&mut state, &spender, &owner, &to, amount)?;
        }

        Commands::Events { count } => {
            cli::cmd_events(&state, count)?;
        }

        Commands::Verify => {
            cli::cmd_verify(&state)?;
        }

        Commands::Export { output } => {
            cli::cmd_export(&state, &output)?;
        }
    }

    Ok(())
}
