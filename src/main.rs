//! Library Desk CLI
//!
//! Interactive front desk over a folder of CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --data-dir /srv/library --init
//! LIBRARY_LOAN_DAYS=21 cargo run
//! printf 'librarian\nlibpass\n5\n7\n' | cargo run
//! ```
//!
//! On a terminal the dashboards use interactive prompts; piped input is read
//! one answer per line.
//!
//! # Exit Codes
//!
//! - 0: Session ended normally
//! - 1: Data files missing, unreadable or unwritable, or input ended early

use library_desk::cli;
use library_desk::core::{AuthService, Catalogue, Repository};
use library_desk::io::CsvStorage;
use library_desk::LibraryError;
use std::io::IsTerminal;
use std::process;

fn main() {
    let args = cli::parse_args();
    cli::init_logging(&args.log_level);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &cli::CliArgs) -> Result<(), LibraryError> {
    let storage = CsvStorage::new(args.data_dir());
    if args.init {
        storage.init()?;
    }

    let catalogue = Catalogue::open(storage)?;
    tracing::info!(
        books = catalogue.books().len(),
        loans = catalogue.loans().len(),
        "catalogue loaded"
    );

    let mut desk = cli::Desk::new(catalogue, AuthService::new(), args.to_desk_config());
    let mut prompt = cli::create_prompt(std::io::stdin().is_terminal());
    let mut output = std::io::stdout();
    desk.run(prompt.as_mut(), &mut output)
}
