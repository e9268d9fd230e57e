//! I/O module
//!
//! Handles the CSV data files.
//!
//! # Components
//!
//! - `csv_format` - Row layouts and strict row/record conversion
//! - `storage` - Whole-collection load and save against a data directory

pub mod csv_format;
pub mod storage;

pub use csv_format::{BookRow, LoanRow, MemberRow, DATE_FORMAT};
pub use storage::CsvStorage;
