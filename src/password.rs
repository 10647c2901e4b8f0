//! Password hashing with Argon2id.
//!
//! Hashes are stored as PHC strings (`$argon2id$v=19$...`), which carry
//! their own salt and parameters. Values that do not parse as a PHC string
//! are treated as legacy plaintext passwords.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{ExpenseError, Result};

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ExpenseError::Password(format!("hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// Whether a stored value is a hash rather than a legacy plaintext password.
pub fn is_hashed(stored: &str) -> bool {
    PasswordHash::new(stored).is_ok()
}

/// Check a candidate password against a stored value (hash or legacy plaintext).
pub fn verify_password(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => constant_time_eq(password.as_bytes(), stored.as_bytes()),
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
