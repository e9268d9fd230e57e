//! Error types for the library desk
//!
//! This module defines every error that can occur while loading, mutating or
//! saving the library's data. Messages are meant to be shown to the person at
//! the terminal as-is.
//!
//! # Error Categories
//!
//! - **Fatal**: file not found, I/O, CSV structure, field parsing, password
//!   hashing. These abort the session.
//! - **Input validation**: non-numeric or negative entries, empty fields.
//! - **Not found**: unknown ISBN or loan.
//! - **State conflict**: no copies left, loan already returned, duplicate
//!   ISBN or email.
//!
//! Everything that is not fatal is reported inline and leaves the stored data
//! unchanged.

use crate::types::LoanId;
use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for the library desk
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LibraryError {
    /// A data file does not exist
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error while reading, writing or prompting
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// Structural CSV error (wrong column count, bad quoting, ...)
    #[error("CSV error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    CsvError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the CSV error
        message: String,
    },

    /// A row was read but one of its fields is not valid
    #[error("{file} line {line}: {message}")]
    ParseError {
        /// Data file the row came from
        file: String,
        /// Line number of the offending row
        line: u64,
        /// Description of the field problem
        message: String,
    },

    /// Password hashing failed
    #[error("Password hashing failed: {message}")]
    HashError { message: String },

    /// A required text field was left empty
    #[error("{field} cannot be empty.")]
    EmptyField { field: String },

    /// A numeric field could not be parsed
    #[error("{field} must be a whole number (got '{value}').")]
    InvalidNumber { field: String, value: String },

    /// A copy count below zero
    #[error("Total copies cannot be negative (got {value}).")]
    NegativeCopies { value: i64 },

    /// No book with this ISBN in the catalogue
    #[error("ISBN {isbn} not found.")]
    BookNotFound { isbn: String },

    /// Adding a book whose ISBN is already catalogued
    #[error("ISBN {isbn} is already in the catalogue.")]
    DuplicateIsbn { isbn: String },

    /// Every copy of the book is on loan
    #[error("Book {isbn} has no available copies.")]
    NoCopiesAvailable { isbn: String },

    /// No loan with this id
    #[error("No loan found with ID {loan}.")]
    LoanNotFound { loan: LoanId },

    /// The loan has a return date already
    #[error("Loan {loan} has already been returned on {returned}.")]
    AlreadyReturned { loan: LoanId, returned: NaiveDate },

    /// Registering with an email another member already uses
    #[error("Email {email} is already registered.")]
    DuplicateEmail { email: String },

    /// Due date computation left the calendar range
    #[error("Cannot compute a due date {days} days after {issued}.")]
    DueDateOutOfRange { issued: NaiveDate, days: u32 },

    /// Sequential id allocation ran past the id space
    #[error("No {kind} ID left after {last}.")]
    IdSpaceExhausted { kind: String, last: u32 },
}

impl LibraryError {
    /// Whether this error must end the session
    ///
    /// Fatal errors mean the data on disk could not be read or written; all
    /// other errors are rejections of a single request.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LibraryError::FileNotFound { .. }
                | LibraryError::IoError { .. }
                | LibraryError::CsvError { .. }
                | LibraryError::ParseError { .. }
                | LibraryError::HashError { .. }
        )
    }
}

// Conversion from io::Error to LibraryError
impl From<std::io::Error> for LibraryError {
    fn from(error: std::io::Error) -> Self {
        LibraryError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to LibraryError
impl From<csv::Error> for LibraryError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LibraryError::CsvError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LibraryError {
    pub fn file_not_found(path: &std::path::Path) -> Self {
        LibraryError::FileNotFound {
            path: path.display().to_string(),
        }
    }

    pub fn parse_error(file: &str, line: u64, message: impl Into<String>) -> Self {
        LibraryError::ParseError {
            file: file.to_string(),
            line,
            message: message.into(),
        }
    }

    pub fn empty_field(field: &str) -> Self {
        LibraryError::EmptyField {
            field: field.to_string(),
        }
    }

    pub fn invalid_number(field: &str, value: &str) -> Self {
        LibraryError::InvalidNumber {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn book_not_found(isbn: &str) -> Self {
        LibraryError::BookNotFound {
            isbn: isbn.to_string(),
        }
    }

    pub fn duplicate_isbn(isbn: &str) -> Self {
        LibraryError::DuplicateIsbn {
            isbn: isbn.to_string(),
        }
    }

    pub fn no_copies_available(isbn: &str) -> Self {
        LibraryError::NoCopiesAvailable {
            isbn: isbn.to_string(),
        }
    }

    pub fn loan_not_found(loan: LoanId) -> Self {
        LibraryError::LoanNotFound { loan }
    }

    pub fn already_returned(loan: LoanId, returned: NaiveDate) -> Self {
        LibraryError::AlreadyReturned { loan, returned }
    }

    pub fn duplicate_email(email: &str) -> Self {
        LibraryError::DuplicateEmail {
            email: email.to_string(),
        }
    }
}
