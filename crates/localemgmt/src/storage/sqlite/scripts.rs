//! SQL scripts used by the SQLite repository.
//!
//! The schema and the upsert statement live in `.sql` files so they can be
//! replaced without rebuilding. The copies in `crates/localemgmt/sql/` are
//! compiled into the binary and used when no script directory is configured.

use std::path::Path;

use localemgmt_core::storage::{RepositoryError, Result};

const BUNDLED_INIT: &str = include_str!("../../../sql/init.sql");
const BUNDLED_UPSERT: &str = include_str!("../../../sql/upsert.sql");

/// Relative location of the scripts under a script directory.
pub const INIT_SCRIPT: &str = "sql/init.sql";
pub const UPSERT_SCRIPT: &str = "sql/upsert.sql";

/// Schema initialization and upsert statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlScripts {
    /// Idempotent DDL run when the repository connects.
    pub init: String,
    /// Upsert taking `?1` key, `?2` bundle, `?3` lang, `?4` content, returning `id`.
    pub upsert: String,
}

impl Default for SqlScripts {
    fn default() -> Self {
        Self::bundled()
    }
}

impl SqlScripts {
    /// The scripts compiled into the binary.
    pub fn bundled() -> Self {
        Self {
            init: BUNDLED_INIT.to_string(),
            upsert: BUNDLED_UPSERT.to_string(),
        }
    }

    /// Reads `sql/init.sql` and `sql/upsert.sql` under `sql_path`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Schema` if either file cannot be read.
    pub fn load(sql_path: &Path) -> Result<Self> {
        Ok(Self {
            init: read_script(&sql_path.join(INIT_SCRIPT))?,
            upsert: read_script(&sql_path.join(UPSERT_SCRIPT))?,
        })
    }
}

fn read_script(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| RepositoryError::Schema(format!("cannot read {}: {e}", path.display())))
}
