//! SQLite session storage implementation.

use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use localemgmt_core::auth::{
    AuthError, AuthFlowState, Profile, Result, Session, SessionId, SessionRepository,
    AUTH_FLOW_TTL_MINUTES,
};
use sqlx::SqlitePool;

const CREATE_SESSIONS: &str = r#"
    CREATE TABLE IF NOT EXISTS sessions (
        id TEXT PRIMARY KEY,
        profile TEXT NOT NULL,
        created_at TEXT NOT NULL,
        expires_at TEXT NOT NULL
    )
"#;

const CREATE_SESSIONS_EXPIRY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_sessions_expires_at ON sessions(expires_at)";

const CREATE_AUTH_FLOWS: &str = r#"
    CREATE TABLE IF NOT EXISTS auth_flows (
        state TEXT PRIMARY KEY,
        pkce_verifier TEXT NOT NULL,
        created_at TEXT NOT NULL,
        return_to TEXT
    )
"#;

fn storage_err(e: impl std::fmt::Display) -> AuthError {
    AuthError::Storage(e.to_string())
}

/// Fixed-width UTC timestamps, so text comparison in SQL orders them by time.
fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)
        .map_err(storage_err)?
        .with_timezone(&Utc))
}

/// SQLite-backed session storage. The profile is kept as a JSON column.
pub struct SqliteSessionStore {
    pool: SqlitePool,
}

impl SqliteSessionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the session database at `path` and migrate it.
    pub async fn open(path: &str) -> Result<Self> {
        let options = sqlx::sqlite::SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(storage_err)?;

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Creates the `sessions` and `auth_flows` tables.
    pub async fn migrate(&self) -> Result<()> {
        for statement in [CREATE_SESSIONS, CREATE_SESSIONS_EXPIRY_INDEX, CREATE_AUTH_FLOWS] {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(storage_err)?;
        }

        Ok(())
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionStore {
    async fn create_session(&self, session: &Session) -> Result<()> {
        let profile = serde_json::to_string(&session.profile).map_err(storage_err)?;

        sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(format_timestamp(Utc::now()))
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;

        sqlx::query(
            "INSERT INTO sessions (id, profile, created_at, expires_at) VALUES (?, ?, ?, ?)",
        )
        .bind(session.id.as_str())
        .bind(profile)
        .bind(format_timestamp(session.created_at))
        .bind(format_timestamp(session.expires_at))
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(())
    }

    async fn get_session(&self, id: &SessionId) -> Result<Option<Session>> {
        let row = sqlx::query_as::<_, (String, String, String, String)>(
            "SELECT id, profile, created_at, expires_at FROM sessions WHERE id = ?",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err)?;

        let Some((id, profile, created_at, expires_at)) = row else {
            return Ok(None);
        };

        let profile: Profile = serde_json::from_str(&profile).map_err(storage_err)?;

        Ok(Some(Session {
            id: SessionId::new(id),
            profile,
            created_at: parse_timestamp(&created_at)?,
            expires_at: parse_timestamp(&expires_at)?,
        }))
    }

    async fn delete_session(&self, id: &SessionId) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;

        Ok(())
    }

    async fn store_auth_flow(&self, state: &str, flow: &AuthFlowState) -> Result<()> {
        let stale_before = Utc::now() - Duration::minutes(AUTH_FLOW_TTL_MINUTES);
        sqlx::query("DELETE FROM auth_flows WHERE created_at <= ?")
            .bind(format_timestamp(stale_before))
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;

        sqlx::query(
            "INSERT OR REPLACE INTO auth_flows (state, pkce_verifier, created_at, return_to) VALUES (?, ?, ?, ?)",
        )
        .bind(state)
        .bind(&flow.pkce_verifier)
        .bind(format_timestamp(flow.created_at))
        .bind(&flow.return_to)
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(())
    }

    async fn take_auth_flow(&self, state: &str) -> Result<Option<AuthFlowState>> {
        // SELECT and DELETE in one transaction so a state is redeemed once.
        let mut tx = self.pool.begin().await.map_err(storage_err)?;

        let row = sqlx::query_as::<_, (String, String, Option<String>)>(
            "SELECT pkce_verifier, created_at, return_to FROM auth_flows WHERE state = ?",
        )
        .bind(state)
        .fetch_optional(&mut *tx)
        .await
        .map_err(storage_err)?;

        if row.is_some() {
            sqlx::query("DELETE FROM auth_flows WHERE state = ?")
                .bind(state)
                .execute(&mut *tx)
                .await
                .map_err(storage_err)?;
        }

        tx.commit().await.map_err(storage_err)?;

        row.map(|(pkce_verifier, created_at, return_to)| {
            Ok(AuthFlowState {
                pkce_verifier,
                created_at: parse_timestamp(&created_at)?,
                return_to,
            })
        })
        .transpose()
    }
}
