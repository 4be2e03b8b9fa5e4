mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::types::*;

/// Store defines the persistence interface.
///
/// Implementations own their concurrency control: callers hold no locks
/// and every method is a single atomic interaction with the backend.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    // Account operations

    /// Inserts a new account. Fails with `Error::AlreadyExists` when the
    /// username is taken, leaving existing rows untouched.
    fn create_account(&self, username: &str, password_hash: &str) -> Result<AccountId>;
    fn get_account_by_username(&self, username: &str) -> Result<Option<Account>>;

    // Progress operations

    /// Replaces the record for `(record.account_id, record.document)`
    /// unconditionally. No comparison against the previous row is made.
    fn upsert_progress(&self, record: &ProgressRecord) -> Result<()>;
    fn get_progress(&self, account_id: AccountId, document: &str) -> Result<Option<ProgressRecord>>;
}
