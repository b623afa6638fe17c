//! CLI definition using clap

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use weighbridge_types::{Kilograms, OutputFormat, ReportPeriod, TransactionType};

#[derive(Parser)]
#[command(name = "weighbridge")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Two-stage vehicle weighing: capture, store and report weighbridge transactions")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Transaction store directory (overrides config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a weighing from entered masses
    Weigh {
        /// Vehicle registration (e.g., "ABC123GP")
        #[arg(long)]
        vehicle: String,

        /// Customer id from master data (e.g., "acme")
        #[arg(long)]
        customer: String,

        /// Transaction type
        #[arg(long = "type", short = 't', value_enum, default_value_t = TransactionType::Receipt)]
        transaction_type: TransactionType,

        /// Driver name
        #[arg(long)]
        driver: Option<String>,

        /// Haulier name
        #[arg(long)]
        haulier: Option<String>,

        /// Free-text notes
        #[arg(long)]
        notes: Option<String>,

        /// Product code (e.g., "COAL-A")
        #[arg(long)]
        product: Option<String>,

        /// First mass in kg
        #[arg(long)]
        first: Kilograms,

        /// Second mass in kg; omit to leave the transaction pending
        #[arg(long)]
        second: Option<Kilograms>,
    },

    /// Capture the second mass of a pending transaction
    Complete {
        /// Transaction number (e.g., "000042")
        transaction_no: String,

        /// Second mass in kg
        #[arg(long)]
        second: Kilograms,
    },

    /// Watch the simulated scale
    Scale {
        /// How long to watch, in seconds
        #[arg(long, short = 's', default_value_t = 15)]
        seconds: u64,

        /// Random seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Weigh a vehicle against the simulated scale (virtual time)
    Simulate {
        /// Vehicle registration
        #[arg(long, default_value = "ABC123GP")]
        vehicle: String,

        /// Customer id
        #[arg(long, default_value = "acme")]
        customer: String,

        /// Random seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List stored transactions
    Transactions {
        /// Filter by transaction number, vehicle or customer
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Maximum number of entries to show
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// Show a stored transaction
    Show {
        /// Transaction number
        transaction_no: String,
    },

    /// Delete a stored transaction
    Delete {
        /// Transaction number
        transaction_no: String,
    },

    /// List customers
    Customers {
        /// Filter by id, name or contact details
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// List vehicles
    Vehicles {
        /// Filter by registration, make or owner
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// List products
    Products,

    /// Weighing statistics for a day, or for a date range with --from/--to
    Summary {
        /// Date (YYYY-MM-DD, UTC); today if not specified
        #[arg(long, conflicts_with_all = ["from", "to", "period", "by_customer"])]
        date: Option<NaiveDate>,

        /// Range start (YYYY-MM-DD, UTC); defaults to --to
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Range end (YYYY-MM-DD, UTC); today if not specified
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Group the range by day, week, month or year
        #[arg(long, short = 'p', value_enum)]
        period: Option<ReportPeriod>,

        /// Include per-customer totals
        #[arg(long)]
        by_customer: bool,
    },

    /// Export transactions to Excel (or CSV)
    Export {
        /// Output file path
        #[arg(long, short = 'o')]
        output: PathBuf,

        /// Write CSV instead of Excel
        #[arg(long)]
        csv: bool,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set transaction store directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Capture the first mass as soon as a session opens
        #[arg(long)]
        set_auto_capture: Option<bool>,

        /// Reject customers missing from master data
        #[arg(long)]
        set_validate_customers: Option<bool>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
