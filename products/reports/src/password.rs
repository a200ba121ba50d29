use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use rand_core::OsRng;

use crate::{ReportsError, ReportsResult};

pub fn hash_password(password: &str) -> ReportsResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| ReportsError::PasswordHash(err.to_string()))
}

/// Returns `false` for a wrong password, an error only for an unparsable hash.
pub fn verify_password(password: &str, hash: &str) -> ReportsResult<bool> {
    let parsed =
        PasswordHash::new(hash).map_err(|err| ReportsError::PasswordHash(err.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_verify_and_are_salted() {
        let first = hash_password("password123").unwrap();
        let second = hash_password("password123").unwrap();
        assert_ne!(first, second);
        assert!(first.starts_with("$argon2"));
        assert!(verify_password("password123", &first).unwrap());
        assert!(!verify_password("password124", &first).unwrap());
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(verify_password("password123", "not-a-hash").is_err());
    }
}
