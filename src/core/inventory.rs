//! Catalogue maintenance: adding, removing and searching books

use crate::core::catalogue::Catalogue;
use crate::core::traits::Repository;
use crate::types::{Book, LibraryError};

/// Parse a copy count typed at the prompt
///
/// Accepts a non-negative whole number, surrounding whitespace ignored.
pub fn parse_copies(input: &str) -> Result<u32, LibraryError> {
    let input = input.trim();
    let value: i64 = input
        .parse()
        .map_err(|_| LibraryError::invalid_number("Total copies", input))?;

    if value < 0 {
        return Err(LibraryError::NegativeCopies { value });
    }
    u32::try_from(value).map_err(|_| LibraryError::invalid_number("Total copies", input))
}

/// Add a new title with every copy available and persist the catalogue
///
/// # Errors
///
/// - `EmptyField` if the ISBN is empty
/// - `DuplicateIsbn` if the ISBN is already catalogued
pub fn add_book(
    catalogue: &mut Catalogue,
    isbn: &str,
    title: &str,
    author: &str,
    copies_total: u32,
) -> Result<Book, LibraryError> {
    if isbn.is_empty() {
        return Err(LibraryError::empty_field("ISBN"));
    }
    if catalogue.books().contains(isbn) {
        return Err(LibraryError::duplicate_isbn(isbn));
    }

    let book = Book::new(isbn, title, author, copies_total);
    catalogue.books_mut().upsert(book.clone());
    catalogue.commit_books()?;

    tracing::info!(isbn, copies_total, "book added");
    Ok(book)
}

/// Remove the book with this ISBN; reports whether one was found
///
/// The catalogue file is only rewritten when something was removed. Loans
/// that still reference the ISBN are kept.
pub fn remove_book(catalogue: &mut Catalogue, isbn: &str) -> Result<bool, LibraryError> {
    if !catalogue.books_mut().delete(isbn) {
        return Ok(false);
    }

    catalogue.commit_books()?;
    tracing::info!(isbn, "book removed");
    Ok(true)
}

/// Books whose title or author contains `term`, ignoring case
pub fn search<'a>(books: &'a [Book], term: &str) -> Vec<&'a Book> {
    books.iter().filter(|book| book.matches(term)).collect()
}
