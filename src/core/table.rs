//! In-memory table of records
//!
//! This module provides `Table`, the vector-backed [`Repository`] used for
//! each collection. Lookups are linear scans: the data set is a small
//! library, and keeping a plain vector preserves file order for saving.

use crate::core::traits::{Record, Repository};

/// Ordered collection of records addressed by key
#[derive(Debug, Clone, PartialEq)]
pub struct Table<T> {
    rows: Vec<T>,
}

impl<T> Table<T> {
    pub fn new() -> Self {
        Table { rows: Vec::new() }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    pub fn into_inner(self) -> Vec<T> {
        self.rows
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for Table<T> {
    fn from(rows: Vec<T>) -> Self {
        Table { rows }
    }
}

impl<T: Record<Key = u32>> Table<T> {
    /// Next sequential id: the highest existing key (or `base` when the
    /// table is empty) plus one
    ///
    /// Returns `None` once the id space is exhausted.
    pub fn next_id(&self, base: u32) -> Option<u32> {
        self.rows
            .iter()
            .map(|row| *row.key())
            .max()
            .unwrap_or(base)
            .checked_add(1)
    }
}

impl<T: Record> Repository<T> for Table<T> {
    fn get(&self, key: &T::Key) -> Option<&T> {
        self.rows.iter().find(|row| row.key() == key)
    }

    fn get_mut(&mut self, key: &T::Key) -> Option<&mut T> {
        self.rows.iter_mut().find(|row| row.key() == key)
    }

    fn all(&self) -> &[T] {
        &self.rows
    }

    fn upsert(&mut self, record: T) -> Option<T> {
        match self.get_mut(record.key()) {
            Some(existing) => Some(std::mem::replace(existing, record)),
            None => {
                self.rows.push(record);
                None
            }
        }
    }

    fn delete(&mut self, key: &T::Key) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.key() != key);
        self.rows.len() < before
    }
}
