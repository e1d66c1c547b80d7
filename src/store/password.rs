use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

use crate::error::{AppError, AppResult};

/// Turns passwords into stored credentials and checks them later
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, password: &str) -> AppResult<String>;

    fn verify(&self, password: &str, stored: &str) -> bool;

    /// True when `stored` should be replaced by a fresh hash after a successful login
    fn needs_rehash(&self, stored: &str) -> bool;
}

/// Argon2id credentials in PHC string format
#[derive(Clone, Default)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Custom cost parameters; verification always uses those embedded in the hash
    pub fn with_params(params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        match PasswordHash::new(stored) {
            Ok(parsed) => self
                .argon2
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => {
                // legacy plaintext record
                tracing::warn!("Comparing against a plaintext credential");
                stored == password
            }
        }
    }

    fn needs_rehash(&self, stored: &str) -> bool {
        PasswordHash::new(stored).is_err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> Argon2Hasher {
        Argon2Hasher::with_params(Params::new(8, 1, 1, None).unwrap())
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let stored = hasher.hash("correct horse").unwrap();

        assert!(stored.starts_with("$argon2id$"));
        assert!(hasher.verify("correct horse", &stored));
        assert!(!hasher.verify("battery staple", &stored));
        assert!(!hasher.needs_rehash(&stored));
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = hasher();
        let first = hasher.hash("same").unwrap();
        let second = hasher.hash("same").unwrap();
        assert_ne!(first, second);

        let salt_of = |stored: &str| {
            PasswordHash::new(stored)
                .unwrap()
                .salt
                .map(|salt| salt.as_str().to_string())
                .unwrap()
        };
        // 16 random bytes, unpadded base64
        assert_eq!(salt_of(&first).len(), 22);
        assert_ne!(salt_of(&first), salt_of(&second));
    }

    #[test]
    fn test_plaintext_credentials() {
        let hasher = hasher();
        assert!(hasher.verify("hunter2", "hunter2"));
        assert!(!hasher.verify("hunter3", "hunter2"));
        assert!(hasher.needs_rehash("hunter2"));
    }

    #[test]
    fn test_default_params_verify_custom_hash() {
        let stored = hasher().hash("pw").unwrap();
        assert!(Argon2Hasher::new().verify("pw", &stored));
    }
}
