//! Book records and copy accounting
//!
//! A book is keyed by its ISBN and tracks how many physical copies the
//! library owns versus how many are currently on the shelf.

/// Catalogue entry for a title held by the library
///
/// `copies_available` always stays within `0..=copies_total`; the only
/// ways to change it are [`Book::take_copy`] and [`Book::restore_copy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// ISBN, the unique key of the catalogue
    pub isbn: String,

    pub title: String,

    pub author: String,

    /// Number of copies owned
    pub copies_total: u32,

    /// Number of copies currently not on loan
    pub copies_available: u32,
}

impl Book {
    /// Create a book with every copy on the shelf
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        copies_total: u32,
    ) -> Self {
        Book {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            copies_total,
            copies_available: copies_total,
        }
    }

    /// Whether at least one copy can be lent out
    pub fn is_available(&self) -> bool {
        self.copies_available > 0
    }

    /// Case-insensitive substring match over title and author
    ///
    /// An empty term matches every book.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term) || self.author.to_lowercase().contains(&term)
    }

    /// Take one copy off the shelf
    ///
    /// Returns `false` and leaves the book untouched when no copy is available.
    pub fn take_copy(&mut self) -> bool {
        match self.copies_available.checked_sub(1) {
            Some(remaining) => {
                self.copies_available = remaining;
                true
            }
            None => false,
        }
    }

    /// Put one copy back on the shelf
    ///
    /// Returns `false` and leaves the book untouched when every copy is
    /// already accounted for.
    pub fn restore_copy(&mut self) -> bool {
        if self.copies_available >= self.copies_total {
            return false;
        }
        self.copies_available += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_new_book_has_all_copies_available() {
        let book = Book::new("978-0", "Dune", "Frank Herbert", 3);
        assert_eq!(book.copies_total, 3);
        assert_eq!(book.copies_available, 3);
        assert!(book.is_available());
    }

    #[test]
    fn test_take_and_restore_copy() {
        let mut book = Book::new("978-0", "Dune", "Frank Herbert", 1);

        assert!(book.take_copy());
        assert_eq!(book.copies_available, 0);
        assert!(!book.take_copy());
        assert_eq!(book.copies_available, 0);

        assert!(book.restore_copy());
        assert_eq!(book.copies_available, 1);
        assert!(!book.restore_copy());
        assert_eq!(book.copies_available, 1);
    }

    #[test]
    fn test_zero_copy_book_is_never_available() {
        let mut book = Book::new("978-0", "Dune", "Frank Herbert", 0);
        assert!(!book.is_available());
        assert!(!book.take_copy());
        assert!(!book.restore_copy());
    }

    #[rstest]
    #[case::title_lowercase("dune", true)]
    #[case::title_mixed_case("DuNe", true)]
    #[case::author("herbert", true)]
    #[case::partial_author("rank h", true)]
    #[case::empty_term("", true)]
    #[case::no_match("tolkien", false)]
    fn test_matches(#[case] term: &str, #[case] expected: bool) {
        let book = Book::new("978-0", "Dune", "Frank Herbert", 1);
        assert_eq!(book.matches(term), expected);
    }
}
