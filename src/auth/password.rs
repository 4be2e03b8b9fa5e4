use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use crate::error::{Error, Result};

// Paid once per protected request.
const ARGON2_MEMORY: u32 = 19 * 1024; // KiB
const ARGON2_ITERATIONS: u32 = 2;
const ARGON2_PARALLELISM: u32 = 1;
const ARGON2_OUTPUT_LEN: usize = 32;

/// Argon2id hasher keyed with a process-wide secret.
///
/// The secret is appended to the password before hashing, so registration
/// and verification must be built from the same secret.
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    secret: String,
    #[cfg(test)]
    verifications: std::sync::atomic::AtomicUsize,
}

impl PasswordHasher {
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        let params = Params::new(
            ARGON2_MEMORY,
            ARGON2_ITERATIONS,
            ARGON2_PARALLELISM,
            Some(ARGON2_OUTPUT_LEN),
        )
        .map_err(|e| Error::Config(format!("invalid argon2 params: {e}")))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            secret: secret.into(),
            #[cfg(test)]
            verifications: std::sync::atomic::AtomicUsize::new(0),
        })
    }

    fn keyed(&self, password: &str) -> Vec<u8> {
        let mut input = Vec::with_capacity(password.len() + self.secret.len());
        input.extend_from_slice(password.as_bytes());
        input.extend_from_slice(self.secret.as_bytes());
        input
    }

    /// Hashes a password into a PHC string with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(&self.keyed(password), &salt)
            .map_err(|e| Error::Hashing(format!("failed to hash password: {e}")))?;
        Ok(hash.to_string())
    }

    /// Verifies a password against a stored PHC string in constant time.
    /// The cost parameters embedded in the stored hash are honored.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        #[cfg(test)]
        self.verifications
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);

        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| Error::Hashing(format!("invalid hash format: {e}")))?;

        match self.argon2.verify_password(&self.keyed(password), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(Error::Hashing(format!("failed to verify password: {e}"))),
        }
    }
}

#[cfg(test)]
impl PasswordHasher {
    /// Number of `verify` calls made so far.
    pub(crate) fn verifications(&self) -> usize {
        self.verifications
            .load(std::sync::atomic::Ordering::Relaxed)
    }
}
