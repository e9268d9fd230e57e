//! Loan lifecycle: issue, return and overdue detection
//!
//! This module provides `Circulation`, which applies the loan rules to a
//! [`Catalogue`]:
//! - Issue requires a known ISBN with a copy on the shelf
//! - Return requires a known, still outstanding loan
//! - Overdue is recomputed from the full loan list on every query
//!
//! A rejected request leaves both the in-memory tables and the files on
//! disk exactly as they were. An accepted one rewrites books and loans.

use crate::core::catalogue::Catalogue;
use crate::core::traits::Repository;
use crate::types::{LibraryError, Loan, LoanId, MemberId};
use chrono::{Days, NaiveDate};

/// Default loan period in days
pub const DEFAULT_LOAN_DAYS: u32 = 14;

/// How long a book may be kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanPolicy {
    pub loan_days: u32,
}

impl Default for LoanPolicy {
    fn default() -> Self {
        LoanPolicy {
            loan_days: DEFAULT_LOAN_DAYS,
        }
    }
}

impl LoanPolicy {
    pub fn due_date(&self, issued: NaiveDate) -> Result<NaiveDate, LibraryError> {
        issued
            .checked_add_days(Days::new(u64::from(self.loan_days)))
            .ok_or(LibraryError::DueDateOutOfRange {
                issued,
                days: self.loan_days,
            })
    }
}

/// Loan processing over a catalogue
#[derive(Debug, Clone, Copy, Default)]
pub struct Circulation {
    policy: LoanPolicy,
}

impl Circulation {
    pub fn new(policy: LoanPolicy) -> Self {
        Circulation { policy }
    }

    pub fn policy(&self) -> LoanPolicy {
        self.policy
    }

    /// Lend one copy of `isbn` to `member_id`
    ///
    /// The member id is recorded as given; it is not checked against the
    /// member list.
    ///
    /// # Errors
    ///
    /// - `BookNotFound` if no book has this ISBN
    /// - `NoCopiesAvailable` if every copy is on loan
    pub fn issue(
        &self,
        catalogue: &mut Catalogue,
        isbn: &str,
        member_id: MemberId,
        today: NaiveDate,
    ) -> Result<Loan, LibraryError> {
        let book = catalogue
            .books()
            .get(isbn)
            .ok_or_else(|| LibraryError::book_not_found(isbn))?;
        if !book.is_available() {
            return Err(LibraryError::no_copies_available(isbn));
        }

        let loan_id = catalogue
            .loans()
            .next_id(0)
            .ok_or_else(|| LibraryError::IdSpaceExhausted {
                kind: "loan".to_string(),
                last: LoanId::MAX,
            })?;

        let loan = Loan {
            loan_id,
            member_id,
            isbn: isbn.to_string(),
            issue_date: today,
            due_date: self.policy.due_date(today)?,
            return_date: None,
        };

        if let Some(book) = catalogue.books_mut().get_mut(isbn) {
            book.take_copy();
        }
        catalogue.loans_mut().upsert(loan.clone());

        catalogue.commit_books()?;
        catalogue.commit_loans()?;

        tracing::info!(loan_id, member_id, isbn, due = %loan.due_date, "loan issued");
        Ok(loan)
    }

    /// Record the return of loan `loan_id` today
    ///
    /// If the loan's book has since been removed from the catalogue, the loan
    /// is still closed; there is just no copy count to restore.
    ///
    /// # Errors
    ///
    /// - `LoanNotFound` if no loan has this id
    /// - `AlreadyReturned` if the loan already has a return date
    pub fn return_loan(
        &self,
        catalogue: &mut Catalogue,
        loan_id: LoanId,
        today: NaiveDate,
    ) -> Result<Loan, LibraryError> {
        let loan = catalogue
            .loans_mut()
            .get_mut(&loan_id)
            .ok_or_else(|| LibraryError::loan_not_found(loan_id))?;
        loan.mark_returned(today)
            .map_err(|returned| LibraryError::already_returned(loan_id, returned))?;
        let loan = loan.clone();

        match catalogue.books_mut().get_mut(loan.isbn.as_str()) {
            Some(book) => {
                if !book.restore_copy() {
                    tracing::warn!(loan_id, isbn = %loan.isbn, "all copies already on the shelf");
                }
            }
            None => tracing::warn!(loan_id, isbn = %loan.isbn, "returned book is no longer catalogued"),
        }

        catalogue.commit_books()?;
        catalogue.commit_loans()?;

        tracing::info!(loan_id, isbn = %loan.isbn, "loan returned");
        Ok(loan)
    }
}

/// Loans that are outstanding and past their due date
pub fn overdue_loans(loans: &[Loan], today: NaiveDate) -> Vec<&Loan> {
    loans.iter().filter(|loan| loan.is_overdue(today)).collect()
}

/// Loans whose issue date falls after their due date
pub fn loans_with_invalid_dates(loans: &[Loan]) -> Vec<&Loan> {
    loans.iter().filter(|loan| loan.has_invalid_dates()).collect()
}

/// Every loan taken out by `member_id`, in file order
pub fn loans_for_member(loans: &[Loan], member_id: MemberId) -> Vec<&Loan> {
    loans
        .iter()
        .filter(|loan| loan.member_id == member_id)
        .collect()
}
