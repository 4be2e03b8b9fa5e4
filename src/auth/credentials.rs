use std::sync::Arc;

use super::PasswordHasher;
use crate::error::{Error, Result};
use crate::store::Store;
use crate::types::AccountId;

/// Registers accounts and resolves credentials to account identifiers.
pub struct Credentials {
    store: Arc<dyn Store>,
    hasher: PasswordHasher,
    /// Verified against when the username is unknown, so a miss costs the
    /// same Argon2 work as a wrong password.
    dummy_hash: String,
}

impl Credentials {
    pub fn new(store: Arc<dyn Store>, hasher: PasswordHasher) -> Result<Self> {
        let dummy_hash = hasher.hash("kosync-dummy-password")?;
        Ok(Self {
            store,
            hasher,
            dummy_hash,
        })
    }

    /// Creates an account. Relies on the store's uniqueness constraint, so two
    /// concurrent registrations of one name yield exactly one success.
    pub fn register(&self, username: &str, password: &str) -> Result<AccountId> {
        if username.is_empty() || password.is_empty() {
            return Err(Error::InvalidInput(
                "Username and password are required".to_string(),
            ));
        }

        let hash = self.hasher.hash(password)?;
        let id = self.store.create_account(username, &hash)?;

        tracing::info!(account_id = %id, username, "Account created");
        Ok(id)
    }

    /// Resolves a username/password pair. Every caller-attributable failure is
    /// `Error::Unauthenticated`; only storage and hash corruption surface
    /// as other errors.
    pub fn verify(&self, username: &str, password: &str) -> Result<AccountId> {
        if username.is_empty() || password.is_empty() {
            return Err(Error::Unauthenticated);
        }

        match self.store.get_account_by_username(username)? {
            Some(account) => {
                if self.hasher.verify(password, &account.password_hash)? {
                    Ok(account.id)
                } else {
                    Err(Error::Unauthenticated)
                }
            }
            None => {
                let _ = self.hasher.verify(password, &self.dummy_hash);
                Err(Error::Unauthenticated)
            }
        }
    }
}
