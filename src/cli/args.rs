use crate::cli::dashboard::DeskConfig;
use crate::core::circulation::{LoanPolicy, DEFAULT_LOAN_DAYS};
use clap::Parser;
use std::path::PathBuf;

/// Folder used when no data directory is configured
pub const DEFAULT_DATA_DIR: &str = "data";

/// Manage books, members and loans kept in CSV files
#[derive(Parser, Debug)]
#[command(name = "library-desk")]
#[command(about = "Manage books, members and loans kept in CSV files", long_about = None)]
pub struct CliArgs {
    /// Folder holding books.csv, members.csv and loans.csv
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        env = "LIBRARY_DATA_DIR",
        help = "Path to the CSV data folder (default: ./data)"
    )]
    pub data_dir: Option<String>,

    /// Shared password for the librarian dashboard
    #[arg(
        long = "librarian-password",
        value_name = "PASSWORD",
        env = "LIBRARY_LIBRARIAN_PASSWORD",
        default_value = "libpass",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub librarian_password: String,

    /// Loan period in days
    #[arg(
        long = "loan-days",
        value_name = "DAYS",
        env = "LIBRARY_LOAN_DAYS",
        default_value_t = DEFAULT_LOAN_DAYS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub loan_days: u32,

    /// Log filter used when RUST_LOG is not set
    #[arg(
        long = "log-level",
        value_name = "FILTER",
        env = "LIBRARY_LOG",
        default_value = "warn"
    )]
    pub log_level: String,

    /// Create missing data files (header row only) before starting
    #[arg(long = "init")]
    pub init: bool,
}

impl CliArgs {
    /// Effective data directory
    ///
    /// An empty value or the literal `none` (any case) counts as not given.
    pub fn data_dir(&self) -> PathBuf {
        match self.data_dir.as_deref().map(str::trim) {
            Some(dir) if !dir.is_empty() && !dir.eq_ignore_ascii_case("none") => PathBuf::from(dir),
            _ => PathBuf::from(DEFAULT_DATA_DIR),
        }
    }

    pub fn to_desk_config(&self) -> DeskConfig {
        DeskConfig {
            librarian_password: self.librarian_password.clone(),
            policy: LoanPolicy {
                loan_days: self.loan_days,
            },
        }
    }
}
