//! Member registration and login
//!
//! Passwords are stored as salted Argon2 hashes in PHC string format. A
//! successful login hands back a [`Session`] value that the member dashboard
//! carries for the rest of the process; nothing is kept in global state.

use crate::core::catalogue::Catalogue;
use crate::core::traits::Repository;
use crate::types::{LibraryError, Member, MemberId, MEMBER_ID_BASE};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use chrono::NaiveDate;
use std::sync::OnceLock;

/// Logged-in member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub member_id: MemberId,
    pub name: String,
}

/// Registration and credential checks
pub struct AuthService {
    hasher: Argon2<'static>,

    /// Hash checked when the member id is unknown, so both login failures
    /// cost one verification
    decoy_hash: OnceLock<Option<String>>,
}

impl AuthService {
    /// Argon2id with the crate's default cost parameters
    pub fn new() -> Self {
        AuthService {
            hasher: Argon2::default(),
            decoy_hash: OnceLock::new(),
        }
    }

    /// Argon2id with explicit cost parameters
    ///
    /// Only affects newly created hashes; verification always uses the
    /// parameters recorded in the stored hash.
    pub fn with_params(params: Params) -> Self {
        AuthService {
            hasher: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            decoy_hash: OnceLock::new(),
        }
    }

    /// Hash a password with a fresh random salt
    pub fn hash_password(&self, password: &str) -> Result<String, LibraryError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .hasher
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| LibraryError::HashError {
                message: e.to_string(),
            })?;
        Ok(hash.to_string())
    }

    /// Check a password against a stored hash
    ///
    /// A stored value that is not a PHC-format hash (bcrypt, plain text)
    /// never verifies; this is logged so the locked-out account shows up.
    pub fn verify_password(&self, password: &str, stored: &str) -> bool {
        match PasswordHash::new(stored) {
            Ok(parsed) => self
                .hasher
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!(error = %e, "stored password hash is not in PHC format");
                false
            }
        }
    }

    /// Register a new member and persist the member list
    ///
    /// The email must not belong to any existing member (compared
    /// case-insensitively). The new member gets the next sequential id.
    pub fn register_member(
        &self,
        catalogue: &mut Catalogue,
        name: &str,
        password: &str,
        email: &str,
        today: NaiveDate,
    ) -> Result<Member, LibraryError> {
        if name.is_empty() {
            return Err(LibraryError::empty_field("Name"));
        }
        if email.is_empty() {
            return Err(LibraryError::empty_field("Email"));
        }
        if catalogue.members().iter().any(|m| m.has_email(email)) {
            return Err(LibraryError::duplicate_email(email));
        }

        let member_id = catalogue.members().next_id(MEMBER_ID_BASE).ok_or_else(|| {
            LibraryError::IdSpaceExhausted {
                kind: "member".to_string(),
                last: MemberId::MAX,
            }
        })?;

        let member = Member {
            member_id,
            name: name.to_string(),
            password_hash: self.hash_password(password)?,
            email: email.to_string(),
            join_date: today,
        };

        catalogue.members_mut().upsert(member.clone());
        catalogue.commit_members()?;

        tracing::info!(member_id, "member registered");
        Ok(member)
    }

    /// Verify credentials and open a session
    ///
    /// Unknown id and wrong password both yield `None`; callers cannot tell
    /// which one failed.
    pub fn login(&self, catalogue: &Catalogue, member_id: MemberId, password: &str) -> Option<Session> {
        let member = match catalogue.members().get(&member_id) {
            Some(member) if self.verify_password(password, &member.password_hash) => Some(member),
            Some(_) => None,
            None => {
                self.verify_decoy(password);
                None
            }
        };

        match member {
            Some(member) => {
                tracing::info!(member_id, "member logged in");
                Some(Session {
                    member_id: member.member_id,
                    name: member.name.clone(),
                })
            }
            None => {
                tracing::warn!(member_id, "member login rejected");
                None
            }
        }
    }
}

impl AuthService {
    /// Spend the same verification work as a real login attempt
    fn verify_decoy(&self, password: &str) {
        let decoy = self
            .decoy_hash
            .get_or_init(|| self.hash_password("").ok());
        if let Some(decoy) = decoy {
            self.verify_password(password, decoy);
        }
    }
}

impl Default for AuthService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Cheap hashing parameters so tests stay fast
    pub fn fast_auth() -> AuthService {
        AuthService::with_params(Params::new(256, 1, 1, None).expect("valid argon2 params"))
    }
}
