//! Core business logic module
//!
//! This module contains the library's domain services:
//! - `traits` - Keyed record and repository abstractions
//! - `table` - Vector-backed repository used for every collection
//! - `catalogue` - The three collections plus their storage
//! - `auth` - Member registration and login
//! - `circulation` - Loan issue/return and overdue detection
//! - `inventory` - Adding, removing and searching books

pub mod auth;
pub mod catalogue;
pub mod circulation;
pub mod inventory;
pub mod table;
pub mod traits;

pub use auth::{AuthService, Session};
pub use catalogue::Catalogue;
pub use circulation::{Circulation, LoanPolicy};
pub use table::Table;
pub use traits::{Record, Repository};
