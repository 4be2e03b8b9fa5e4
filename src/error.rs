use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Missing or wrong credentials. Carries no detail on purpose.
    #[error("unauthenticated")]
    Unauthenticated,

    #[error("already exists")]
    AlreadyExists,

    #[error("not found")]
    NotFound,
}

impl Error {
    /// Short machine-readable kind, used in the JSON error envelope.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) => "invalid_input",
            Error::Unauthenticated => "unauthenticated",
            Error::AlreadyExists => "already_exists",
            Error::NotFound => "not_found",
            Error::Database(_) | Error::Io(_) | Error::Config(_) | Error::Hashing(_) => "internal",
        }
    }

    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.kind() == "internal"
    }
}

pub type Result<T> = std::result::Result<T, Error>;
