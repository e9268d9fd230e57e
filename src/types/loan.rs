//! Loan records and their lifecycle state
//!
//! A loan starts out [`LoanStatus::Outstanding`] and moves to
//! [`LoanStatus::Returned`] exactly once. The transition is never reversed.

use super::member::MemberId;
use chrono::NaiveDate;

/// Loan identifier
///
/// Assigned sequentially as `max(existing, 0) + 1`.
pub type LoanId = u32;

/// A book lent to a member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loan {
    pub loan_id: LoanId,

    /// Borrowing member (not checked against the member list)
    pub member_id: MemberId,

    /// Borrowed book (not checked against the catalogue)
    pub isbn: String,

    pub issue_date: NaiveDate,

    pub due_date: NaiveDate,

    /// Set when the book comes back; `None` while the loan is outstanding
    pub return_date: Option<NaiveDate>,
}

/// Lifecycle state of a loan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanStatus {
    Outstanding,
    Returned(NaiveDate),
}

impl Loan {
    pub fn status(&self) -> LoanStatus {
        match self.return_date {
            Some(date) => LoanStatus::Returned(date),
            None => LoanStatus::Outstanding,
        }
    }

    pub fn is_outstanding(&self) -> bool {
        self.return_date.is_none()
    }

    /// Issue date falls after the due date, which only happens in corrupted records
    pub fn has_invalid_dates(&self) -> bool {
        self.issue_date > self.due_date
    }

    /// Outstanding, sane dates, and due strictly before `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_outstanding() && !self.has_invalid_dates() && self.due_date < today
    }

    /// Record the return of the book
    ///
    /// Returns the earlier return date, leaving the loan untouched, if the
    /// loan was already returned.
    pub fn mark_returned(&mut self, today: NaiveDate) -> Result<(), NaiveDate> {
        match self.return_date {
            Some(previous) => Err(previous),
            None => {
                self.return_date = Some(today);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn loan(issue: NaiveDate, due: NaiveDate, returned: Option<NaiveDate>) -> Loan {
        Loan {
            loan_id: 1,
            member_id: 1001,
            isbn: "978-0".to_string(),
            issue_date: issue,
            due_date: due,
            return_date: returned,
        }
    }

    #[rstest]
    #[case::past_due(date(2026, 1, 1), date(2026, 1, 15), None, date(2026, 1, 16), true)]
    #[case::due_today(date(2026, 1, 1), date(2026, 1, 15), None, date(2026, 1, 15), false)]
    #[case::not_yet_due(date(2026, 1, 1), date(2026, 1, 15), None, date(2026, 1, 10), false)]
    #[case::returned_late(
        date(2026, 1, 1),
        date(2026, 1, 15),
        Some(date(2026, 2, 1)),
        date(2026, 3, 1),
        false
    )]
    #[case::corrupted_dates(date(2026, 2, 1), date(2026, 1, 15), None, date(2026, 3, 1), false)]
    fn test_is_overdue(
        #[case] issue: NaiveDate,
        #[case] due: NaiveDate,
        #[case] returned: Option<NaiveDate>,
        #[case] today: NaiveDate,
        #[case] expected: bool,
    ) {
        assert_eq!(loan(issue, due, returned).is_overdue(today), expected);
    }

    #[test]
    fn test_mark_returned_is_one_way() {
        let mut loan = loan(date(2026, 1, 1), date(2026, 1, 15), None);
        assert_eq!(loan.status(), LoanStatus::Outstanding);

        assert!(loan.mark_returned(date(2026, 1, 10)).is_ok());
        assert_eq!(loan.status(), LoanStatus::Returned(date(2026, 1, 10)));

        assert_eq!(loan.mark_returned(date(2026, 1, 12)), Err(date(2026, 1, 10)));
        assert_eq!(loan.return_date, Some(date(2026, 1, 10)));
    }
}
