//! Library Desk
//! # Overview
//!
//! A small library-management system: books, members and loans kept in three
//! CSV files, worked through a librarian dashboard and a member dashboard.
//!
//! # Architecture
//!
//! - [`types`] - Records (Book, Member, Loan) and the error type
//! - [`io`] - CSV row layouts and whole-file load/save
//! - [`core`] - Business logic:
//!   - [`core::catalogue`] - The three collections and their storage
//!   - [`core::auth`] - Password hashing, registration and login
//!   - [`core::circulation`] - Issuing, returning and overdue detection
//!   - [`core::inventory`] - Adding, removing and searching books
//! - [`cli`] - Configuration, prompts and the dashboards
//!
//! # Persistence
//!
//! Every change that succeeds is written back immediately by rewriting the
//! whole affected file. Issuing or returning a book rewrites `books.csv`
//! first, then `loans.csv`.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use crate::core::{AuthService, Catalogue, Circulation, LoanPolicy, Session};
pub use crate::io::CsvStorage;
pub use crate::types::{Book, LibraryError, Loan, LoanId, LoanStatus, Member, MemberId};
