//! Role-gated menu sessions
//!
//! `Desk` runs one session per process: it asks for a role, checks the
//! role's credentials, then loops over the numbered menu for that role until
//! the user logs out. Every request is handled synchronously against the
//! [`Catalogue`]; rejected requests are reported inline and the loop goes on,
//! while fatal errors (unreadable or unwritable data) end the session.
//!
//! # Menus
//!
//! Librarian: add book, register member, issue book, return book, overdue
//! list, remove book, logout.
//!
//! Member: search catalogue, borrow book, my loans, logout.

use crate::cli::prompt::Prompt;
use crate::cli::render::{book_line, grid_table, loan_line};
use crate::core::circulation::{loans_for_member, loans_with_invalid_dates, overdue_loans};
use crate::core::inventory::{self, parse_copies};
use crate::core::{AuthService, Catalogue, Circulation, LoanPolicy, Repository, Session};
use crate::io::csv_format::format_date;
use crate::types::LibraryError;
use chrono::{Local, NaiveDate};
use std::io::Write;

const LIBRARIAN_MENU: &str = "
=== Librarian Dashboard ===
1. Add Book
2. Register Member
3. Issue Book
4. Return Book
5. Overdue List
6. Remove Book
7. Logout";

const MEMBER_MENU: &str = "
=== Member Dashboard ===
1. Search Catalogue
2. Borrow Book
3. My Loans
4. Logout";

const OVERDUE_HEADERS: [&str; 5] = ["LoanID", "MemberID", "ISBN", "Due", "Email"];

/// Settings for a desk session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeskConfig {
    /// Shared password gating the librarian dashboard
    pub librarian_password: String,
    pub policy: LoanPolicy,
}

impl Default for DeskConfig {
    fn default() -> Self {
        DeskConfig {
            librarian_password: "libpass".to_string(),
            policy: LoanPolicy::default(),
        }
    }
}

/// The library front desk: one interactive session over a catalogue
pub struct Desk {
    catalogue: Catalogue,
    auth: AuthService,
    circulation: Circulation,
    librarian_password: String,
    today: Option<NaiveDate>,
}

impl Desk {
    pub fn new(catalogue: Catalogue, auth: AuthService, config: DeskConfig) -> Self {
        Desk {
            catalogue,
            auth,
            circulation: Circulation::new(config.policy),
            librarian_password: config.librarian_password,
            today: None,
        }
    }

    /// Pin the session's notion of "today" instead of reading the clock
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Ask for a role, authenticate it and run that role's menu
    ///
    /// Failed authentication ends the session normally. Only fatal errors
    /// are returned.
    pub fn run(&mut self, prompt: &mut dyn Prompt, out: &mut dyn Write) -> Result<(), LibraryError> {
        let role = prompt.input("Login as (librarian/member)")?;

        match role.trim().to_lowercase().as_str() {
            "librarian" => {
                let password = prompt.password("Enter librarian password")?;
                if password != self.librarian_password {
                    tracing::warn!("librarian login rejected");
                    writeln!(out, "❌ Invalid password.")?;
                    return Ok(());
                }
                tracing::info!("librarian logged in");
                self.librarian_session(prompt, out)?;
            }
            "member" => {
                let member_id = match parse_id("Member ID", &prompt.input("Member ID")?) {
                    Ok(id) => id,
                    Err(e) => return report(e, out),
                };
                let password = prompt.password("Password")?;

                match self.auth.login(&self.catalogue, member_id, &password) {
                    Some(session) => self.member_session(&session, prompt, out)?,
                    None => writeln!(out, "❌ Member ID or password incorrect.")?,
                }
            }
            _ => writeln!(out, "❌ Invalid role.")?,
        }

        out.flush()?;
        Ok(())
    }

    fn librarian_session(
        &mut self,
        prompt: &mut dyn Prompt,
        out: &mut dyn Write,
    ) -> Result<(), LibraryError> {
        loop {
            writeln!(out, "{}", LIBRARIAN_MENU)?;
            let choice = prompt.input(">")?;

            let outcome = match choice.trim() {
                "1" => self.add_book(prompt, out),
                "2" => self.register_member(prompt, out),
                "3" => self.issue_book(prompt, out),
                "4" => self.return_book(prompt, out),
                "5" => self.overdue_list(out),
                "6" => self.remove_book(prompt, out),
                "7" => break,
                _ => {
                    writeln!(out, "❌ Invalid choice.")?;
                    continue;
                }
            };
            settle(outcome, out)?;
        }

        tracing::info!("librarian logged out");
        Ok(())
    }

    fn member_session(
        &mut self,
        session: &Session,
        prompt: &mut dyn Prompt,
        out: &mut dyn Write,
    ) -> Result<(), LibraryError> {
        writeln!(out, "Welcome, {}.", session.name)?;

        loop {
            writeln!(out, "{}", MEMBER_MENU)?;
            let choice = prompt.input(">")?;

            let outcome = match choice.trim() {
                "1" => self.search_catalogue(prompt, out),
                "2" => self.borrow_book(session, prompt, out),
                "3" => self.my_loans(session, out),
                "4" => break,
                _ => {
                    writeln!(out, "❌ Invalid choice.")?;
                    continue;
                }
            };
            settle(outcome, out)?;
        }

        tracing::info!(member_id = session.member_id, "member logged out");
        Ok(())
    }

    fn add_book(&mut self, prompt: &mut dyn Prompt, out: &mut dyn Write) -> Result<(), LibraryError> {
        let isbn = prompt.input("ISBN")?.trim().to_string();
        let title = prompt.input("Title")?.trim().to_string();
        let author = prompt.input("Author")?.trim().to_string();
        let copies = parse_copies(&prompt.input("Total copies")?)?;

        inventory::add_book(&mut self.catalogue, &isbn, &title, &author, copies)?;
        writeln!(out, "✓ Book added.")?;
        Ok(())
    }

    fn register_member(
        &mut self,
        prompt: &mut dyn Prompt,
        out: &mut dyn Write,
    ) -> Result<(), LibraryError> {
        let name = prompt.input("Name")?.trim().to_string();
        let email = prompt.input("Email")?.trim().to_string();
        let password = prompt.password("Password")?;

        let today = self.today();
        let member =
            self.auth
                .register_member(&mut self.catalogue, &name, &password, &email, today)?;
        writeln!(out, "✓ Member {} registered.", member.member_id)?;
        Ok(())
    }

    fn issue_book(&mut self, prompt: &mut dyn Prompt, out: &mut dyn Write) -> Result<(), LibraryError> {
        let isbn = prompt.input("ISBN to issue")?.trim().to_string();
        let member_id = parse_id("Member ID", &prompt.input("Member ID")?)?;

        let today = self.today();
        let loan = self
            .circulation
            .issue(&mut self.catalogue, &isbn, member_id, today)?;
        writeln!(out, "✓ Book issued. Due on {}.", format_date(loan.due_date))?;
        Ok(())
    }

    fn return_book(&mut self, prompt: &mut dyn Prompt, out: &mut dyn Write) -> Result<(), LibraryError> {
        let loan_id = parse_id("Loan ID", &prompt.input("Loan ID to return")?)?;

        let today = self.today();
        self.circulation
            .return_loan(&mut self.catalogue, loan_id, today)?;
        writeln!(out, "✓ Returned.")?;
        Ok(())
    }

    /// Report corrupted loans, then the overdue table, from freshly loaded data
    fn overdue_list(&mut self, out: &mut dyn Write) -> Result<(), LibraryError> {
        self.catalogue.reload()?;
        let loans = self.catalogue.loans().all();

        let invalid = loans_with_invalid_dates(loans);
        if !invalid.is_empty() {
            tracing::warn!(count = invalid.len(), "loans with issue date after due date");
            writeln!(out, "⚠️ Found loans with invalid dates:")?;
            for loan in invalid {
                writeln!(
                    out,
                    "  Loan {}: Issue {}, Due {}",
                    loan.loan_id,
                    format_date(loan.issue_date),
                    format_date(loan.due_date)
                )?;
            }
        }

        let overdue = overdue_loans(loans, self.today());
        if overdue.is_empty() {
            writeln!(out, "No overdue loans.")?;
            return Ok(());
        }

        let members = self.catalogue.members();
        let rows: Vec<Vec<String>> = overdue
            .iter()
            .map(|loan| {
                vec![
                    loan.loan_id.to_string(),
                    loan.member_id.to_string(),
                    loan.isbn.clone(),
                    format_date(loan.due_date),
                    members
                        .get(&loan.member_id)
                        .map(|m| m.email.clone())
                        .unwrap_or_default(),
                ]
            })
            .collect();
        writeln!(out, "{}", grid_table(&OVERDUE_HEADERS, &rows))?;
        Ok(())
    }

    fn remove_book(&mut self, prompt: &mut dyn Prompt, out: &mut dyn Write) -> Result<(), LibraryError> {
        let isbn = prompt.input("ISBN to remove")?.trim().to_string();

        if inventory::remove_book(&mut self.catalogue, &isbn)? {
            writeln!(out, "✓ Book {} removed.", isbn)?;
        } else {
            tracing::warn!(isbn = %isbn, "no book to remove");
            writeln!(out, "❌ No book found with ISBN {}.", isbn)?;
        }
        Ok(())
    }

    fn search_catalogue(
        &mut self,
        prompt: &mut dyn Prompt,
        out: &mut dyn Write,
    ) -> Result<(), LibraryError> {
        let term = prompt.input("Search keyword")?;

        let hits = inventory::search(self.catalogue.books().all(), &term);
        if hits.is_empty() {
            writeln!(out, "No matching books.")?;
        }
        for book in hits {
            writeln!(out, "{}", book_line(book))?;
        }
        Ok(())
    }

    fn borrow_book(
        &mut self,
        session: &Session,
        prompt: &mut dyn Prompt,
        out: &mut dyn Write,
    ) -> Result<(), LibraryError> {
        let isbn = prompt.input("ISBN to borrow")?.trim().to_string();

        let today = self.today();
        let loan = self
            .circulation
            .issue(&mut self.catalogue, &isbn, session.member_id, today)?;
        writeln!(out, "✓ Borrowed. Due {}.", format_date(loan.due_date))?;
        Ok(())
    }

    fn my_loans(&mut self, session: &Session, out: &mut dyn Write) -> Result<(), LibraryError> {
        let loans = loans_for_member(self.catalogue.loans().all(), session.member_id);
        if loans.is_empty() {
            writeln!(out, "You have no loans.")?;
        }
        for loan in loans {
            writeln!(out, "{}", loan_line(loan))?;
        }
        Ok(())
    }
}

fn parse_id(field: &str, input: &str) -> Result<u32, LibraryError> {
    let input = input.trim();
    input
        .parse()
        .map_err(|_| LibraryError::invalid_number(field, input))
}

/// Print a rejected request inline; hand fatal errors back to the caller
fn report(error: LibraryError, out: &mut dyn Write) -> Result<(), LibraryError> {
    if error.is_fatal() {
        return Err(error);
    }
    tracing::warn!(error = %error, "request rejected");
    writeln!(out, "❌ {}", error)?;
    Ok(())
}

fn settle(outcome: Result<(), LibraryError>, out: &mut dyn Write) -> Result<(), LibraryError> {
    match outcome {
        Ok(()) => Ok(()),
        Err(error) => report(error, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::prompt::ScriptedPrompt;
    use crate::core::auth::test_support::fast_auth;
    use crate::core::catalogue::test_support::catalogue;
    use std::io::Cursor;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    /// Run one session over the shared test catalogue and return its output
    fn run_script(script: &str) -> (Desk, String, tempfile::TempDir) {
        let (dir, catalogue) = catalogue();
        let mut desk = Desk::new(catalogue, fast_auth(), DeskConfig::default()).with_today(today());
        let mut prompt = ScriptedPrompt::new(Cursor::new(script.to_string()));
        let mut out = Vec::new();

        desk.run(&mut prompt, &mut out).unwrap();
        (desk, String::from_utf8(out).unwrap(), dir)
    }

    #[test]
    fn test_invalid_role() {
        let (_, out, _dir) = run_script("visitor\n");
        assert_eq!(out, "❌ Invalid role.\n");
    }

    #[test]
    fn test_wrong_librarian_password() {
        let (_, out, _dir) = run_script("librarian\nguess\n");
        assert_eq!(out, "❌ Invalid password.\n");
    }

    #[test]
    fn test_role_is_case_insensitive() {
        let (_, out, _dir) = run_script("  LIBRARIAN \nlibpass\n7\n");
        assert!(out.contains("=== Librarian Dashboard ==="));
    }

    #[test]
    fn test_unknown_menu_choice_keeps_looping() {
        let (_, out, _dir) = run_script("librarian\nlibpass\n9\n7\n");
        assert!(out.contains("❌ Invalid choice."));
        assert_eq!(out.matches("=== Librarian Dashboard ===").count(), 2);
    }

    #[test]
    fn test_validation_errors_are_reported_inline() {
        let script = "librarian\nlibpass\n\
            1\n978-1\nEmma\nJane Austen\nthree\n\
            1\n978-1\nEmma\nJane Austen\n-2\n\
            3\n978-0441172719\nabc\n\
            4\nxyz\n\
            7\n";
        let (desk, out, _dir) = run_script(script);

        assert!(out.contains("❌ Total copies must be a whole number (got 'three')."));
        assert!(out.contains("❌ Total copies cannot be negative (got -2)."));
        assert!(out.contains("❌ Member ID must be a whole number (got 'abc')."));
        assert!(out.contains("❌ Loan ID must be a whole number (got 'xyz')."));
        assert!(!desk.catalogue().books().contains("978-1"));
    }

    #[test]
    fn test_issue_and_return_messages() {
        let script = "librarian\nlibpass\n\
            3\n978-0441172719\n1001\n\
            3\n978-0547928227\n1001\n\
            4\n2\n\
            4\n2\n\
            4\n99\n\
            7\n";
        let (desk, out, _dir) = run_script(script);

        assert!(out.contains("✓ Book issued. Due on 2026-03-15."));
        assert!(out.contains("❌ Book 978-0547928227 has no available copies."));
        assert!(out.contains("✓ Returned."));
        assert!(out.contains("❌ Loan 2 has already been returned on 2026-03-01."));
        assert!(out.contains("❌ No loan found with ID 99."));
        assert_eq!(
            desk.catalogue().books().get("978-0441172719").unwrap().copies_available,
            3
        );
    }

    #[test]
    fn test_overdue_list_shows_table() {
        let (_, out, _dir) = run_script("librarian\nlibpass\n5\n7\n");

        assert!(out.contains("| LoanID | MemberID | ISBN"));
        assert!(out.contains("|      1 |     1001 | 978-0547928227 | 2026-01-15 |"));
    }

    #[test]
    fn test_remove_book_messages() {
        let script = "librarian\nlibpass\n6\n978-0441172719\n6\n978-0441172719\n7\n";
        let (_, out, _dir) = run_script(script);

        assert!(out.contains("✓ Book 978-0441172719 removed."));
        assert!(out.contains("❌ No book found with ISBN 978-0441172719."));
    }

    #[test]
    fn test_member_login_rejections() {
        let (_, out, _dir) = run_script("member\n1001\nwrong\n");
        assert_eq!(out, "❌ Member ID or password incorrect.\n");

        let (_, out, _dir) = run_script("member\nten\n");
        assert_eq!(out, "❌ Member ID must be a whole number (got 'ten').\n");
    }

    #[test]
    fn test_running_out_of_input_is_fatal() {
        let (_dir, catalogue) = catalogue();
        let mut desk = Desk::new(catalogue, fast_auth(), DeskConfig::default());
        let mut prompt = ScriptedPrompt::new(Cursor::new("librarian\nlibpass\n1\n"));
        let mut out = Vec::new();

        let error = desk.run(&mut prompt, &mut out).unwrap_err();
        assert!(error.is_fatal());
    }
}
