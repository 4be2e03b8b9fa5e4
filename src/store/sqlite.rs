use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};

use super::Store;
use super::schema::SCHEMA;
use crate::error::{Error, Result};
use crate::types::*;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens a private in-memory database. Contents vanish on drop.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's CURRENT_TIMESTAMP format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    // Account operations

    fn create_account(&self, username: &str, password_hash: &str) -> Result<AccountId> {
        let conn = self.conn();
        let result = conn.execute(
            "INSERT INTO users (username, password, created_at) VALUES (?1, ?2, ?3)",
            params![username, password_hash, format_datetime(&Utc::now())],
        );

        match result {
            Ok(_) => Ok(AccountId(conn.last_insert_rowid())),
            Err(e) if is_unique_violation(&e) => Err(Error::AlreadyExists),
            Err(e) => Err(Error::from(e)),
        }
    }

    fn get_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, username, password, created_at FROM users WHERE username = ?1",
            params![username],
            |row| {
                Ok(Account {
                    id: AccountId(row.get(0)?),
                    username: row.get(1)?,
                    password_hash: row.get(2)?,
                    created_at: parse_datetime(&row.get::<_, String>(3)?),
                })
            },
        )
        .optional()
        .map_err(Error::from)
    }

    // Progress operations

    fn upsert_progress(&self, record: &ProgressRecord) -> Result<()> {
        self.conn().execute(
            "INSERT INTO progress (user_id, document, progress, percentage, device, device_id, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT (user_id, document) DO UPDATE SET
                progress = excluded.progress,
                percentage = excluded.percentage,
                device = excluded.device,
                device_id = excluded.device_id,
                timestamp = excluded.timestamp",
            params![
                record.account_id.0,
                record.document,
                record.progress,
                record.percentage,
                record.device,
                record.device_id,
                record.timestamp,
            ],
        )?;
        Ok(())
    }

    fn get_progress(&self, account_id: AccountId, document: &str) -> Result<Option<ProgressRecord>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT user_id, document, progress, percentage, device, device_id, timestamp
             FROM progress WHERE user_id = ?1 AND document = ?2",
            params![account_id.0, document],
            |row| {
                Ok(ProgressRecord {
                    account_id: AccountId(row.get(0)?),
                    document: row.get(1)?,
                    progress: row.get(2)?,
                    percentage: row.get(3)?,
                    device: row.get(4)?,
                    device_id: row.get(5)?,
                    timestamp: row.get(6)?,
                })
            },
        )
        .optional()
        .map_err(Error::from)
    }
}
