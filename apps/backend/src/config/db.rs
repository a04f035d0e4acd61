use std::env;
use std::str::FromStr;

use crate::error::AppError;

/// Which environment the process runs in; selects the database name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Prod,
    /// Enforces the `_test` suffix on the database name
    Test,
}

/// Storage engine behind the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    /// Private in-memory SQLite database, one per pool; migrated on connect
    SqliteMemory,
}

impl FromStr for DbKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "pg" => Ok(DbKind::Postgres),
            "sqlite-memory" | "sqlite_memory" | "sqlite" => Ok(DbKind::SqliteMemory),
            other => Err(AppError::config(format!(
                "Unsupported database kind '{other}' (expected postgres or sqlite-memory)"
            ))),
        }
    }
}

/// Database role used for the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbOwner {
    /// Application-level access (limited permissions)
    App,
    /// Owner-level access (full permissions for migrations)
    Owner,
}

/// Build a connection URL for the given environment, engine and role.
pub fn db_url(env: RuntimeEnv, kind: DbKind, owner: DbOwner) -> Result<String, AppError> {
    match kind {
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
        DbKind::Postgres => {
            let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
            let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
            let db_name = db_name(env)?;
            let (username, password) = credentials(owner)?;

            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
    }
}

fn db_name(env: RuntimeEnv) -> Result<String, AppError> {
    match env {
        RuntimeEnv::Prod => must_var("PROD_DB"),
        RuntimeEnv::Test => {
            let db_name = must_var("TEST_DB")?;
            if !db_name.ends_with("_test") {
                return Err(AppError::config(format!(
                    "Test environment requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
    }
}

fn credentials(owner: DbOwner) -> Result<(String, String), AppError> {
    match owner {
        DbOwner::App => Ok((must_var("APP_DB_USER")?, must_var("APP_DB_PASSWORD")?)),
        DbOwner::Owner => Ok((
            must_var("GAMESHELF_OWNER_USER")?,
            must_var("GAMESHELF_OWNER_PASSWORD")?,
        )),
    }
}

fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
