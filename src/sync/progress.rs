use chrono::Utc;

use crate::error::{Error, Result};
use crate::store::Store;
use crate::types::{AccountId, ProgressRecord};

/// A validated progress report from a client device.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    pub document: String,
    pub progress: String,
    /// Passed through unvalidated; range and meaning belong to the client.
    pub percentage: f64,
    pub device: String,
    pub device_id: String,
}

impl ProgressUpdate {
    fn into_record(self, account_id: AccountId, timestamp: i64) -> ProgressRecord {
        ProgressRecord {
            account_id,
            document: self.document,
            progress: self.progress,
            percentage: self.percentage,
            device: self.device,
            device_id: self.device_id,
            timestamp,
        }
    }
}

/// Stamps the update with the current server time and replaces the stored
/// record for `(account_id, update.document)`.
pub fn record_progress(
    store: &dyn Store,
    account_id: AccountId,
    update: ProgressUpdate,
) -> Result<ProgressRecord> {
    let record = update.into_record(account_id, Utc::now().timestamp());
    store.upsert_progress(&record)?;

    tracing::debug!(
        account_id = %account_id,
        document = %record.document,
        device = %record.device,
        "Progress recorded"
    );
    Ok(record)
}

/// Returns the current record for the caller's own document.
pub fn latest_progress(
    store: &dyn Store,
    account_id: AccountId,
    document: &str,
) -> Result<ProgressRecord> {
    store
        .get_progress(account_id, document)?
        .ok_or(Error::NotFound)
}
