//! Password hashing with Argon2id.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::AppError;

/// A hashed password in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hashes `plain_text` with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if hashing fails.
    pub fn hash(plain_text: &str) -> Result<Self, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!(error = %e, "Password hashing failed");
                AppError::internal("Password hashing failed")
            })?;

        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Wraps a hash loaded from storage.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Checks `plain_text` against this hash.
    ///
    /// A malformed stored hash never verifies.
    pub fn verify(&self, plain_text: &str) -> bool {
        match PasswordHash::new(&self.hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is malformed");
                false
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    pub fn into_string(self) -> String {
        self.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = Password::hash("123456").unwrap();

        assert!(password.verify("123456"));
        assert!(!password.verify("654321"));
    }

    #[test]
    fn test_same_password_different_salts() {
        let a = Password::hash("secret-pass").unwrap();
        let b = Password::hash("secret-pass").unwrap();

        assert_ne!(a.as_str(), b.as_str());
        assert!(a.verify("secret-pass"));
        assert!(b.verify("secret-pass"));
    }

    #[test]
    fn test_from_hash_round_trip() {
        let stored = Password::hash("hunter22").unwrap().into_string();
        assert!(Password::from_hash(stored).verify("hunter22"));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        assert!(!Password::from_hash("not-a-phc-string").verify("anything"));
    }

    #[test]
    fn test_debug_is_redacted() {
        let password = Password::hash("123456").unwrap();
        assert!(!format!("{password:?}").contains("argon2"));
    }
}
