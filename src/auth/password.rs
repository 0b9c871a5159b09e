// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vagas Inclusivas

//! Password hashing, delegated to Argon2.
//!
//! The token engine never sees passwords; this is only used by the login
//! and registration handlers against the user directory.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a password with a fresh random salt.
pub fn hash(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

/// Verify a password against a stored hash.
///
/// An unparseable stored hash counts as a mismatch (fail closed).
pub fn verify(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hashed = hash("correto-cavalo-bateria").unwrap();
        assert!(verify("correto-cavalo-bateria", &hashed));
        assert!(!verify("senha-errada", &hashed));
    }

    #[test]
    fn salts_make_hashes_unique() {
        let first = hash("mesma-senha").unwrap();
        let second = hash("mesma-senha").unwrap();
        assert_ne!(first, second);
        assert!(verify("mesma-senha", &first));
        assert!(verify("mesma-senha", &second));
    }

    #[test]
    fn garbage_stored_hash_never_verifies() {
        assert!(!verify("qualquer", "not-a-phc-string"));
        assert!(!verify("qualquer", ""));
    }
}
