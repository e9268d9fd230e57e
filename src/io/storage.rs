//! Flat-file storage for books, members and loans
//!
//! `CsvStorage` loads and saves whole collections; there is no incremental
//! I/O. Each file starts with a fixed header row followed by one row per
//! record, in collection order.
//!
//! # Error Handling
//!
//! Loading is strict: a missing file, a header that does not match, a row
//! with the wrong number of columns or a field that does not parse all fail
//! the whole load with the file name and line number. Nothing is repaired.

use crate::io::csv_format::{
    convert_book_row, convert_loan_row, convert_member_row, BookRow, LoanRow, MemberRow,
    BOOK_HEADER, LOAN_HEADER, MEMBER_HEADER,
};
use crate::types::{Book, LibraryError, Loan, Member};
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};

pub const BOOKS_FILE: &str = "books.csv";
pub const MEMBERS_FILE: &str = "members.csv";
pub const LOANS_FILE: &str = "loans.csv";

/// CSV-backed storage rooted at a data directory
#[derive(Debug, Clone)]
pub struct CsvStorage {
    data_dir: PathBuf,
}

impl CsvStorage {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        CsvStorage {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Create the data directory and any missing file with only its header row
    ///
    /// Existing files are left untouched.
    pub fn init(&self) -> Result<(), LibraryError> {
        fs::create_dir_all(&self.data_dir)?;

        for (file, header) in [
            (BOOKS_FILE, &BOOK_HEADER[..]),
            (MEMBERS_FILE, &MEMBER_HEADER[..]),
            (LOANS_FILE, &LOAN_HEADER[..]),
        ] {
            let path = self.data_dir.join(file);
            if !path.exists() {
                self.save::<BookRow>(file, header, Vec::new())?;
                tracing::info!(path = %path.display(), "created empty data file");
            }
        }

        Ok(())
    }

    pub fn load_books(&self) -> Result<Vec<Book>, LibraryError> {
        self.load(BOOKS_FILE, &BOOK_HEADER, convert_book_row)
    }

    pub fn save_books(&self, books: &[Book]) -> Result<(), LibraryError> {
        self.save(BOOKS_FILE, &BOOK_HEADER, books.iter().map(BookRow::from))
    }

    pub fn load_members(&self) -> Result<Vec<Member>, LibraryError> {
        self.load(MEMBERS_FILE, &MEMBER_HEADER, convert_member_row)
    }

    pub fn save_members(&self, members: &[Member]) -> Result<(), LibraryError> {
        self.save(
            MEMBERS_FILE,
            &MEMBER_HEADER,
            members.iter().map(MemberRow::from),
        )
    }

    pub fn load_loans(&self) -> Result<Vec<Loan>, LibraryError> {
        self.load(LOANS_FILE, &LOAN_HEADER, convert_loan_row)
    }

    pub fn save_loans(&self, loans: &[Loan]) -> Result<(), LibraryError> {
        self.save(LOANS_FILE, &LOAN_HEADER, loans.iter().map(LoanRow::from))
    }

    /// Read every row of `file`, converting each with `convert`
    ///
    /// Line numbers in errors count the header as line 1.
    fn load<R, T>(
        &self,
        file: &str,
        header: &[&str],
        convert: fn(R) -> Result<T, String>,
    ) -> Result<Vec<T>, LibraryError>
    where
        R: DeserializeOwned,
    {
        let path = self.data_dir.join(file);
        let handle = File::open(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LibraryError::file_not_found(&path),
            _ => e.into(),
        })?;

        let mut reader = ReaderBuilder::new().from_reader(handle);

        let headers = reader.headers()?.clone();
        if headers.iter().ne(header.iter().copied()) {
            return Err(LibraryError::parse_error(
                file,
                1,
                format!(
                    "unexpected header '{}' (expected '{}')",
                    headers.iter().collect::<Vec<_>>().join(","),
                    header.join(",")
                ),
            ));
        }

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let line = record.position().map(|pos| pos.line()).unwrap_or_default();

            let row: R = record
                .deserialize(Some(&headers))
                .map_err(|e| LibraryError::parse_error(file, line, e.to_string()))?;
            let value = convert(row).map_err(|e| LibraryError::parse_error(file, line, e))?;
            records.push(value);
        }

        tracing::debug!(file, count = records.len(), "loaded records");
        Ok(records)
    }

    /// Rewrite `file` with the header row followed by `rows`
    ///
    /// An existing file keeps its line ending (`\r\n` or `\n`); new files
    /// use `\n`.
    fn save<R: Serialize>(
        &self,
        file: &str,
        header: &[&str],
        rows: impl IntoIterator<Item = R>,
    ) -> Result<(), LibraryError> {
        let path = self.data_dir.join(file);
        let terminator = line_ending(&path)?;
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .terminator(terminator)
            .from_path(&path)?;

        writer.write_record(header)?;

        let mut count = 0usize;
        for row in rows {
            writer.serialize(row)?;
            count += 1;
        }
        writer.flush()?;

        tracing::debug!(file, count, "saved records");
        Ok(())
    }
}

/// Line ending of the first line of an existing file
fn line_ending(path: &Path) -> Result<Terminator, LibraryError> {
    let handle = match File::open(path) {
        Ok(handle) => handle,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Terminator::Any(b'\n')),
        Err(e) => return Err(e.into()),
    };

    let mut first = Vec::new();
    BufReader::new(handle).read_until(b'\n', &mut first)?;
    if first.ends_with(b"\r\n") {
        Ok(Terminator::CRLF)
    } else {
        Ok(Terminator::Any(b'\n'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    const BOOKS: &str = "ISBN,Title,Author,CopiesTotal,CopiesAvailable\n\
        978-0441172719,Dune,Frank Herbert,3,2\n\
        978-0547928227,The Hobbit,J.R.R. Tolkien,1,1\n";

    const MEMBERS: &str = "MemberID,Name,PasswordHash,Email,JoinDate\n\
        1001,Ada Lovelace,$argon2id$stub,ada@example.org,2025-11-02\n";

    const LOANS: &str = "LoanID,MemberID,ISBN,IssueDate,DueDate,ReturnDate\n\
        1,1001,978-0441172719,2026-01-01,2026-01-15,\n\
        2,1001,978-0547928227,2026-01-02,2026-01-16,2026-01-10\n";

    /// Helper function to create a data directory holding the three files
    fn create_data_dir(books: &str, members: &str, loans: &str) -> TempDir {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(dir.path().join(BOOKS_FILE), books).expect("Failed to write books");
        fs::write(dir.path().join(MEMBERS_FILE), members).expect("Failed to write members");
        fs::write(dir.path().join(LOANS_FILE), loans).expect("Failed to write loans");
        dir
    }

    #[test]
    fn test_load_all_collections() {
        let dir = create_data_dir(BOOKS, MEMBERS, LOANS);
        let storage = CsvStorage::new(dir.path());

        let books = storage.load_books().unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].title, "Dune");
        assert_eq!(books[0].copies_available, 2);

        let members = storage.load_members().unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].email, "ada@example.org");

        let loans = storage.load_loans().unwrap();
        assert_eq!(loans.len(), 2);
        assert_eq!(loans[0].return_date, None);
        assert_eq!(loans[1].return_date, NaiveDate::from_ymd_opt(2026, 1, 10));
    }

    #[test]
    fn test_save_of_load_is_byte_identical() {
        let dir = create_data_dir(BOOKS, MEMBERS, LOANS);
        let storage = CsvStorage::new(dir.path());

        storage.save_books(&storage.load_books().unwrap()).unwrap();
        storage.save_members(&storage.load_members().unwrap()).unwrap();
        storage.save_loans(&storage.load_loans().unwrap()).unwrap();

        assert_eq!(fs::read_to_string(dir.path().join(BOOKS_FILE)).unwrap(), BOOKS);
        assert_eq!(fs::read_to_string(dir.path().join(MEMBERS_FILE)).unwrap(), MEMBERS);
        assert_eq!(fs::read_to_string(dir.path().join(LOANS_FILE)).unwrap(), LOANS);
    }

    #[test]
    fn test_save_of_load_keeps_crlf_line_endings() {
        let books = BOOKS.replace('\n', "\r\n");
        let loans = LOANS.replace('\n', "\r\n");
        let dir = create_data_dir(&books, MEMBERS, &loans);
        let storage = CsvStorage::new(dir.path());

        storage.save_books(&storage.load_books().unwrap()).unwrap();
        storage.save_members(&storage.load_members().unwrap()).unwrap();
        storage.save_loans(&storage.load_loans().unwrap()).unwrap();

        assert_eq!(fs::read_to_string(dir.path().join(BOOKS_FILE)).unwrap(), books);
        assert_eq!(fs::read_to_string(dir.path().join(MEMBERS_FILE)).unwrap(), MEMBERS);
        assert_eq!(fs::read_to_string(dir.path().join(LOANS_FILE)).unwrap(), loans);
    }

    #[test]
    fn test_crlf_file_keeps_crlf_after_change() {
        let books = BOOKS.replace('\n', "\r\n");
        let dir = create_data_dir(&books, MEMBERS, LOANS);
        let storage = CsvStorage::new(dir.path());

        let mut loaded = storage.load_books().unwrap();
        loaded.push(Book::new("978-1", "Emma", "Jane Austen", 1));
        storage.save_books(&loaded).unwrap();

        let expected = format!("{}978-1,Emma,Jane Austen,1,1\r\n", books);
        assert_eq!(fs::read_to_string(dir.path().join(BOOKS_FILE)).unwrap(), expected);
    }

    #[test]
    fn test_fields_with_commas_are_quoted_and_survive() {
        let dir = create_data_dir(BOOKS, MEMBERS, LOANS);
        let storage = CsvStorage::new(dir.path());

        let mut books = storage.load_books().unwrap();
        books.push(Book::new("978-1", "Cats, Dogs and Mice", "Doe, Jane", 2));
        storage.save_books(&books).unwrap();

        let reloaded = storage.load_books().unwrap();
        assert_eq!(reloaded, books);
    }

    #[test]
    fn test_empty_collection_keeps_header() {
        let dir = create_data_dir(BOOKS, MEMBERS, LOANS);
        let storage = CsvStorage::new(dir.path());

        storage.save_loans(&[]).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join(LOANS_FILE)).unwrap(),
            "LoanID,MemberID,ISBN,IssueDate,DueDate,ReturnDate\n"
        );
        assert!(storage.load_loans().unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let storage = CsvStorage::new(dir.path());

        let error = storage.load_books().unwrap_err();
        assert!(matches!(error, LibraryError::FileNotFound { .. }));
        assert!(error.is_fatal());
    }

    #[test]
    fn test_malformed_field_reports_file_and_line() {
        let loans = "LoanID,MemberID,ISBN,IssueDate,DueDate,ReturnDate\n\
            1,1001,978-0441172719,2026-01-01,2026-01-15,\n\
            2,abc,978-0547928227,2026-01-02,2026-01-16,\n";
        let dir = create_data_dir(BOOKS, MEMBERS, loans);
        let storage = CsvStorage::new(dir.path());

        match storage.load_loans().unwrap_err() {
            LibraryError::ParseError { file, line, message } => {
                assert_eq!(file, LOANS_FILE);
                assert_eq!(line, 3);
                assert!(message.contains("invalid MemberID"));
            }
            other => panic!("Expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_column_count_is_fatal() {
        let books = "ISBN,Title,Author,CopiesTotal,CopiesAvailable\n978-1,Dune,3,3\n";
        let dir = create_data_dir(books, MEMBERS, LOANS);
        let storage = CsvStorage::new(dir.path());

        let error = storage.load_books().unwrap_err();
        assert!(matches!(error, LibraryError::CsvError { .. }));
        assert!(error.is_fatal());
    }

    #[test]
    fn test_unexpected_header_is_rejected() {
        let books = "isbn,title,author,total,available\n";
        let dir = create_data_dir(books, MEMBERS, LOANS);
        let storage = CsvStorage::new(dir.path());

        let error = storage.load_books().unwrap_err();
        assert!(matches!(error, LibraryError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_init_creates_missing_files_only() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("data");
        fs::create_dir(&data_dir).unwrap();
        fs::write(data_dir.join(BOOKS_FILE), BOOKS).unwrap();

        let storage = CsvStorage::new(&data_dir);
        storage.init().unwrap();

        assert_eq!(storage.load_books().unwrap().len(), 2);
        assert!(storage.load_members().unwrap().is_empty());
        assert!(storage.load_loans().unwrap().is_empty());
        assert_eq!(
            fs::read_to_string(data_dir.join(MEMBERS_FILE)).unwrap(),
            "MemberID,Name,PasswordHash,Email,JoinDate\n"
        );
    }
}
