//! Argon2 password hashing.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use quill_core::ports::{AuthError, PasswordService};

/// Argon2id hasher producing PHC-format strings, which is what the
/// `users.password_hash` column stores.
#[derive(Default)]
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashingError(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| AuthError::HashingError(e.to_string()))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_password_verifies_and_wrong_one_does_not() {
        let service = Argon2PasswordService::new();

        let hash = service.hash("a blog author passphrase").unwrap();
        assert!(service.verify("a blog author passphrase", &hash).unwrap());
        assert!(!service.verify("someone else's guess", &hash).unwrap());
    }

    #[test]
    fn hashes_are_phc_strings_and_salted_per_call() {
        let service = Argon2PasswordService::new();

        let first = service.hash("same password").unwrap();
        let second = service.hash("same password").unwrap();

        // Stored form is a self-describing PHC string, never plaintext.
        assert!(first.starts_with("$argon2"));
        // Fresh salt every registration: equal passwords hash differently.
        assert_ne!(first, second);
    }

    #[test]
    fn stored_garbage_is_an_error_not_a_mismatch() {
        let service = Argon2PasswordService::new();

        let result = service.verify("whatever", "not-a-phc-hash");
        assert!(matches!(result.unwrap_err(), AuthError::HashingError(_)));
    }
}
