//! Reading progress reconciliation.
//!
//! The policy is last-write-wins by server acceptance time: an accepted
//! update fully replaces whatever was stored for the same account and
//! document, even when it reports less progress than the record it replaces.
//! Two devices reading the same book concurrently will therefore overwrite
//! each other; the most recent request wins.

mod progress;

pub use progress::{ProgressUpdate, latest_progress, record_progress};
