//! Library member records

use chrono::NaiveDate;

/// Member identifier
///
/// Assigned sequentially starting after [`MEMBER_ID_BASE`].
pub type MemberId = u32;

/// Member ids are allocated as `max(existing, MEMBER_ID_BASE) + 1`
pub const MEMBER_ID_BASE: MemberId = 1000;

/// A registered library member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub member_id: MemberId,

    pub name: String,

    /// Salted one-way hash of the member's password (PHC string format)
    pub password_hash: String,

    /// Contact address, unique among members (case-insensitive)
    pub email: String,

    pub join_date: NaiveDate,
}

impl Member {
    /// Case-insensitive email comparison used for the uniqueness check
    pub fn has_email(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }
}
