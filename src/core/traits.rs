//! Core traits for keyed record collections
//!
//! `Record` ties a record type to its natural key; `Repository` is the
//! get/upsert/delete-by-key view of a collection that the services work
//! against instead of raw vectors.

use crate::types::{Book, Loan, LoanId, Member, MemberId};

/// A record with a natural key
pub trait Record {
    /// Key type; unsized keys (like `str`) are allowed
    type Key: PartialEq + ?Sized;

    fn key(&self) -> &Self::Key;
}

impl Record for Book {
    type Key = str;

    fn key(&self) -> &str {
        &self.isbn
    }
}

impl Record for Member {
    type Key = MemberId;

    fn key(&self) -> &MemberId {
        &self.member_id
    }
}

impl Record for Loan {
    type Key = LoanId;

    fn key(&self) -> &LoanId {
        &self.loan_id
    }
}

/// Trait for keyed access to a collection of records
///
/// Iteration order is insertion order, which is also the order records are
/// persisted in.
pub trait Repository<T: Record> {
    /// Get a record by key
    fn get(&self, key: &T::Key) -> Option<&T>;

    /// Get a mutable record by key
    fn get_mut(&mut self, key: &T::Key) -> Option<&mut T>;

    /// All records in order
    fn all(&self) -> &[T];

    /// Replace the record with the same key in place, or append it
    ///
    /// Returns the replaced record, if any.
    fn upsert(&mut self, record: T) -> Option<T>;

    /// Remove every record with this key; reports whether any matched
    fn delete(&mut self, key: &T::Key) -> bool;

    fn contains(&self, key: &T::Key) -> bool {
        self.get(key).is_some()
    }

    fn len(&self) -> usize {
        self.all().len()
    }

    fn is_empty(&self) -> bool {
        self.all().is_empty()
    }
}
