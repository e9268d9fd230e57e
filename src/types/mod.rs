//! Types module
//!
//! Contains the records the library keeps and the error type.
//! - `book`: catalogue entries and copy accounting
//! - `member`: registered members
//! - `loan`: loans and their lifecycle state
//! - `error`: error types for the library desk

pub mod book;
pub mod error;
pub mod loan;
pub mod member;

pub use book::Book;
pub use error::LibraryError;
pub use loan::{Loan, LoanId, LoanStatus};
pub use member::{Member, MemberId, MEMBER_ID_BASE};
