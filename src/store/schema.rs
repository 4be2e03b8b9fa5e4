pub const SCHEMA: &str = r#"
-- Accounts authenticate every request; usernames are case-sensitive
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL,
    password TEXT NOT NULL,           -- argon2id PHC string over password || salt
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
);

-- One current position per (user, document); rows are replaced, never appended
CREATE TABLE IF NOT EXISTS progress (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    document TEXT NOT NULL,
    progress TEXT NOT NULL,
    percentage REAL NOT NULL,
    device TEXT NOT NULL,
    device_id TEXT NOT NULL,
    timestamp INTEGER NOT NULL,       -- server acceptance time, unix seconds

    UNIQUE(user_id, document)
);

CREATE INDEX IF NOT EXISTS idx_progress_document ON progress(document);
CREATE INDEX IF NOT EXISTS idx_progress_user_id ON progress(user_id);
"#;
