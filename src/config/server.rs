use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

pub const DEFAULT_PASSWORD_SALT: &str = "default_salt_change_in_production";

/// Database file inside `data_dir`. Matches existing deployments.
pub const DB_FILE_NAME: &str = "koreader-sync.db";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    /// Keyed secret appended to every password before hashing.
    /// Changing it invalidates all stored credentials.
    pub password_salt: String,
}

impl ServerConfig {
    /// Builds the configuration from defaults, an optional TOML file and
    /// the process environment, in that order of precedence.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_env(|key| std::env::var(key).ok())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Applies `HOST`, `PORT`, `DATA_DIR` and `PASSWORD_SALT` overrides.
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.port = port
                .parse()
                .map_err(|_| Error::Config(format!("PORT is not a valid port: {port}")))?;
        }
        if let Some(data_dir) = lookup("DATA_DIR") {
            self.data_dir = PathBuf::from(data_dir);
        }
        if let Some(salt) = lookup("PASSWORD_SALT") {
            self.password_salt = salt;
        }
        Ok(self)
    }

    pub fn socket_addr(&self) -> std::result::Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    #[must_use]
    pub fn uses_default_salt(&self) -> bool {
        self.password_salt == DEFAULT_PASSWORD_SALT
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            data_dir: PathBuf::from("./data"),
            password_salt: DEFAULT_PASSWORD_SALT.to_string(),
        }
    }
}
