//! The library's data set and its persistence
//!
//! `Catalogue` owns one [`Table`] per collection together with the
//! [`CsvStorage`] they came from. Services mutate the tables through the
//! [`Repository`](crate::core::traits::Repository) API and then commit the
//! collections they touched; each commit rewrites the whole file.

use crate::core::table::Table;
use crate::core::traits::Repository;
use crate::io::CsvStorage;
use crate::types::{Book, LibraryError, Loan, Member};

pub struct Catalogue {
    storage: CsvStorage,
    books: Table<Book>,
    members: Table<Member>,
    loans: Table<Loan>,
}

impl Catalogue {
    /// Load all three collections from storage
    pub fn open(storage: CsvStorage) -> Result<Self, LibraryError> {
        let books = storage.load_books()?.into();
        let members = storage.load_members()?.into();
        let loans = storage.load_loans()?.into();

        tracing::debug!(data_dir = %storage.data_dir().display(), "catalogue opened");

        Ok(Catalogue {
            storage,
            books,
            members,
            loans,
        })
    }

    /// Re-read every collection from disk, dropping in-memory state
    pub fn reload(&mut self) -> Result<(), LibraryError> {
        self.books = self.storage.load_books()?.into();
        self.members = self.storage.load_members()?.into();
        self.loans = self.storage.load_loans()?.into();
        Ok(())
    }

    pub fn storage(&self) -> &CsvStorage {
        &self.storage
    }

    pub fn books(&self) -> &Table<Book> {
        &self.books
    }

    pub fn books_mut(&mut self) -> &mut Table<Book> {
        &mut self.books
    }

    pub fn members(&self) -> &Table<Member> {
        &self.members
    }

    pub fn members_mut(&mut self) -> &mut Table<Member> {
        &mut self.members
    }

    pub fn loans(&self) -> &Table<Loan> {
        &self.loans
    }

    pub fn loans_mut(&mut self) -> &mut Table<Loan> {
        &mut self.loans
    }

    pub fn commit_books(&self) -> Result<(), LibraryError> {
        self.storage.save_books(self.books.all())
    }

    pub fn commit_members(&self) -> Result<(), LibraryError> {
        self.storage.save_members(self.members.all())
    }

    pub fn commit_loans(&self) -> Result<(), LibraryError> {
        self.storage.save_loans(self.loans.all())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::catalogue;
    use super::*;

    #[test]
    fn test_open_loads_all_collections() {
        let (_dir, catalogue) = catalogue();
        assert_eq!(catalogue.books().len(), 3);
        assert!(catalogue.members().is_empty());
        assert_eq!(catalogue.loans().len(), 1);
    }

    #[test]
    fn test_commit_then_reload_keeps_changes() {
        let (_dir, mut catalogue) = catalogue();

        catalogue
            .books_mut()
            .upsert(Book::new("978-1", "Emma", "Jane Austen", 1));
        catalogue.commit_books().unwrap();
        catalogue.reload().unwrap();

        assert_eq!(catalogue.books().len(), 4);
        assert!(catalogue.books().contains("978-1"));
    }

    #[test]
    fn test_reload_drops_uncommitted_changes() {
        let (_dir, mut catalogue) = catalogue();

        catalogue.books_mut().delete("978-0441172719");
        catalogue.reload().unwrap();

        assert!(catalogue.books().contains("978-0441172719"));
    }
}
