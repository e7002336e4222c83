use std::{env, path::PathBuf, time::Duration};

use localemgmt_core::storage::Result;

use crate::storage::SqlScripts;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection string (default: "localemgmt.db")
    pub database_url: String,
    /// Directory holding `sql/init.sql` and `sql/upsert.sql` (default: bundled scripts)
    pub sql_path: Option<PathBuf>,
    /// Per-request timeout in seconds (default: 10)
    pub request_timeout_secs: u64,
    /// Path to the SQLite session database (default: "sessions.db")
    /// Note: Only used when the `auth-sqlite` feature is enabled.
    #[allow(dead_code)]
    pub session_db_path: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DATABASE_URL` - SQLite database, `:memory:` or `sqlite://path` (default: "localemgmt.db")
    /// - `SQL_PATH` - Directory containing the `sql/` scripts (default: bundled scripts)
    /// - `REQUEST_TIMEOUT_SECS` - Per-request timeout (default: 10)
    /// - `SESSION_DB_PATH` - SQLite session database (default: "sessions.db")
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`Config::from_env`] with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| "localemgmt.db".to_string()),
            sql_path: lookup("SQL_PATH")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            request_timeout_secs: lookup("REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            session_db_path: lookup("SESSION_DB_PATH")
                .unwrap_or_else(|| "sessions.db".to_string()),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Scripts from `SQL_PATH`, or the bundled ones when it is unset.
    pub fn sql_scripts(&self) -> Result<SqlScripts> {
        match &self.sql_path {
            Some(path) => SqlScripts::load(path),
            None => Ok(SqlScripts::bundled()),
        }
    }
}
