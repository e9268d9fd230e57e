//! CSV format handling for the three data files
//!
//! This module centralizes all CSV format concerns, providing:
//! - Row structures mirroring each file's columns
//! - Strict conversion from rows to typed records
//! - Conversion from typed records back to rows
//!
//! Every field is read as text first so a bad value can be reported with the
//! column it came from. All functions are pure (no I/O) for easy testing.

use crate::types::{Book, Loan, Member};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Fixed-width date format used in every file
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const BOOK_HEADER: [&str; 5] = ["ISBN", "Title", "Author", "CopiesTotal", "CopiesAvailable"];

pub const MEMBER_HEADER: [&str; 5] = ["MemberID", "Name", "PasswordHash", "Email", "JoinDate"];

pub const LOAN_HEADER: [&str; 6] = [
    "LoanID",
    "MemberID",
    "ISBN",
    "IssueDate",
    "DueDate",
    "ReturnDate",
];

/// Row of `books.csv`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BookRow {
    #[serde(rename = "ISBN")]
    pub isbn: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Author")]
    pub author: String,
    #[serde(rename = "CopiesTotal")]
    pub copies_total: String,
    #[serde(rename = "CopiesAvailable")]
    pub copies_available: String,
}

/// Row of `members.csv`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MemberRow {
    #[serde(rename = "MemberID")]
    pub member_id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "PasswordHash")]
    pub password_hash: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "JoinDate")]
    pub join_date: String,
}

/// Row of `loans.csv`
///
/// `ReturnDate` is empty text while the loan is outstanding.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoanRow {
    #[serde(rename = "LoanID")]
    pub loan_id: String,
    #[serde(rename = "MemberID")]
    pub member_id: String,
    #[serde(rename = "ISBN")]
    pub isbn: String,
    #[serde(rename = "IssueDate")]
    pub issue_date: String,
    #[serde(rename = "DueDate")]
    pub due_date: String,
    #[serde(rename = "ReturnDate")]
    pub return_date: String,
}

fn parse_number<T: FromStr>(column: &str, value: &str) -> Result<T, String> {
    value
        .parse::<T>()
        .map_err(|_| format!("invalid {} '{}'", column, value))
}

fn parse_date(column: &str, value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| format!("invalid {} '{}' (expected YYYY-MM-DD)", column, value))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Convert a BookRow to a Book
///
/// Fails if either copy count is not a non-negative integer or if more
/// copies are available than owned.
pub fn convert_book_row(row: BookRow) -> Result<Book, String> {
    let copies_total: u32 = parse_number("CopiesTotal", &row.copies_total)?;
    let copies_available: u32 = parse_number("CopiesAvailable", &row.copies_available)?;

    if copies_available > copies_total {
        return Err(format!(
            "CopiesAvailable {} exceeds CopiesTotal {} for ISBN {}",
            copies_available, copies_total, row.isbn
        ));
    }

    Ok(Book {
        isbn: row.isbn,
        title: row.title,
        author: row.author,
        copies_total,
        copies_available,
    })
}

pub fn convert_member_row(row: MemberRow) -> Result<Member, String> {
    Ok(Member {
        member_id: parse_number("MemberID", &row.member_id)?,
        join_date: parse_date("JoinDate", &row.join_date)?,
        name: row.name,
        password_hash: row.password_hash,
        email: row.email,
    })
}

/// Convert a LoanRow to a Loan
///
/// An empty `ReturnDate` means the loan is still outstanding.
pub fn convert_loan_row(row: LoanRow) -> Result<Loan, String> {
    let return_date = if row.return_date.is_empty() {
        None
    } else {
        Some(parse_date("ReturnDate", &row.return_date)?)
    };

    Ok(Loan {
        loan_id: parse_number("LoanID", &row.loan_id)?,
        member_id: parse_number("MemberID", &row.member_id)?,
        issue_date: parse_date("IssueDate", &row.issue_date)?,
        due_date: parse_date("DueDate", &row.due_date)?,
        isbn: row.isbn,
        return_date,
    })
}

impl From<&Book> for BookRow {
    fn from(book: &Book) -> Self {
        BookRow {
            isbn: book.isbn.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
            copies_total: book.copies_total.to_string(),
            copies_available: book.copies_available.to_string(),
        }
    }
}

impl From<&Member> for MemberRow {
    fn from(member: &Member) -> Self {
        MemberRow {
            member_id: member.member_id.to_string(),
            name: member.name.clone(),
            password_hash: member.password_hash.clone(),
            email: member.email.clone(),
            join_date: format_date(member.join_date),
        }
    }
}

impl From<&Loan> for LoanRow {
    fn from(loan: &Loan) -> Self {
        LoanRow {
            loan_id: loan.loan_id.to_string(),
            member_id: loan.member_id.to_string(),
            isbn: loan.isbn.clone(),
            issue_date: format_date(loan.issue_date),
            due_date: format_date(loan.due_date),
            return_date: loan.return_date.map(format_date).unwrap_or_default(),
        }
    }
}
