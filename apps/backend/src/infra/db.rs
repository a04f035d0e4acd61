use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use migration::MigrationCommand;
use sea_orm::{DatabaseConnection, SqlxPostgresConnector, SqlxSqliteConnector};
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{info, warn};

use crate::config::db::{db_url, DbKind, DbOwner, RuntimeEnv};
use crate::error::AppError;
use crate::logging::pii::Redacted;

const PG_POOL_MAX: u32 = 10;
const PG_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);
const SQLITE_BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_INTERVAL_MS: u64 = 500;

/// Retry a connection attempt with fixed interval delays.
/// Returns the error of the last attempt once retries are exhausted.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(conn) => {
                if attempt > 1 {
                    info!(attempts = attempt, interval_ms, "connection_retry=success");
                }
                return Ok(conn);
            }
            Err(e) if attempt < max_attempts => {
                warn!(attempt, max_attempts, interval_ms, error = %e, "connection_retry=failed");
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Open a pool for the given role. Does NOT run migrations.
///
/// `SqliteMemory` yields a single-connection pool: every SQLite connection
/// opened on `sqlite::memory:` is its own database, so the pool must never
/// open a second one or recycle the first.
pub async fn connect_db(
    env: RuntimeEnv,
    kind: DbKind,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let url = db_url(env, kind, owner)?;

    match kind {
        DbKind::SqliteMemory => {
            let opts = SqliteConnectOptions::from_str(&url)
                .map_err(|e| AppError::config(format!("invalid SQLite options: {e}")))?
                .foreign_keys(true)
                .busy_timeout(SQLITE_BUSY_TIMEOUT);

            let pool = SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(opts)
                .await
                .map_err(|e| AppError::config(format!("failed to open SQLite database: {e}")))?;

            info!(engine = "sqlite", path = "sqlite::memory:", "pool=create");
            Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
        }
        DbKind::Postgres => {
            let pool = retry_connection(
                || {
                    let url = url.clone();
                    async move {
                        PgPoolOptions::new()
                            .max_connections(PG_POOL_MAX)
                            .acquire_timeout(PG_ACQUIRE_TIMEOUT)
                            .idle_timeout(Duration::from_secs(30))
                            .connect(&url)
                            .await
                            .map_err(|e| {
                                let msg = e.to_string();
                                AppError::config(format!(
                                    "failed to connect to Postgres: {}",
                                    Redacted(&msg)
                                ))
                            })
                    }
                },
                CONNECT_ATTEMPTS,
                CONNECT_INTERVAL_MS,
            )
            .await?;

            info!(
                engine = "postgresql",
                ?owner,
                max = PG_POOL_MAX,
                "pool=create"
            );
            Ok(SqlxPostgresConnector::from_sqlx_postgres_pool(pool))
        }
    }
}

/// Connect and bring the schema up to date; the single entrypoint used by
/// `main` and by tests.
///
/// Postgres migrates through a short-lived owner connection and then hands
/// back an app-role pool. SQLite in-memory migrates the very pool it returns.
pub async fn bootstrap_db(env: RuntimeEnv, kind: DbKind) -> Result<DatabaseConnection, AppError> {
    info!(?env, ?kind, pid = std::process::id(), "bootstrap=start");

    let conn = match kind {
        DbKind::SqliteMemory => {
            let conn = connect_db(env, kind, DbOwner::App).await?;
            migration::migrate(&conn, MigrationCommand::Up).await?;
            conn
        }
        DbKind::Postgres => {
            let owner = connect_db(env, kind, DbOwner::Owner).await?;
            migration::migrate(&owner, MigrationCommand::Up).await?;
            if let Err(e) = owner.close().await {
                warn!(error = %e, "failed to close owner pool after migration");
            }
            connect_db(env, kind, DbOwner::App).await?
        }
    };

    info!("bootstrap=ready");
    Ok(conn)
}
