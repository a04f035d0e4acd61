//! SeaORM -> DomainError translation.
//!
//! Adapters return `sea_orm::DbErr`; repos and services convert here, and
//! `From<DomainError> for AppError` takes it the rest of the way to HTTP.

use sea_orm::{DbErr, RuntimeErr};
use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Prefix of the `DbErr::Custom` payload emitted by version-checked updates.
pub const OPTIMISTIC_LOCK_PREFIX: &str = "OPTIMISTIC_LOCK:";

/// Unique indexes we know by name (Postgres) or by column list (SQLite).
const UNIQUE_TARGETS: &[(&str, &str, ConflictKind, &str)] = &[
    (
        "ux_reviews_user_game",
        "reviews.user_id, reviews.game_id",
        ConflictKind::DuplicateReview,
        "You have already reviewed this game",
    ),
    (
        "ux_game_list_entries_user_game",
        "game_list_entries.user_id, game_list_entries.game_id",
        ConflictKind::AlreadyInList,
        "Game is already in one of your lists",
    ),
    (
        "ux_games_title_platform",
        "games.title, games.platform",
        ConflictKind::DuplicateGame,
        "Game already exists on this platform",
    ),
    (
        "ux_users_email",
        "users.email",
        ConflictKind::UniqueEmail,
        "Email already registered",
    ),
    (
        "ux_users_username",
        "users.username",
        ConflictKind::UniqueUsername,
        "Username already taken",
    ),
];

/// SQLSTATE (Postgres) or extended result code (SQLite) when the driver reports one.
fn driver_code(e: &DbErr) -> Option<String> {
    let runtime = match e {
        DbErr::Exec(r) | DbErr::Query(r) | DbErr::Conn(r) => r,
        _ => return None,
    };
    match runtime {
        RuntimeErr::SqlxError(sqlx::Error::Database(db)) => db.code().map(|c| c.into_owned()),
        _ => None,
    }
}

/// Code embedded in the error text as `SQLSTATE(..)` or `(code: ..)`.
fn code_in_message(msg: &str) -> Option<&str> {
    ["SQLSTATE(", "(code: "].iter().find_map(|open| {
        let start = msg.find(open)? + open.len();
        let len = msg[start..].find(')')?;
        Some(msg[start..start + len].trim())
    })
}

fn has_code(code: Option<&str>, msg: &str, wanted: &[&str]) -> bool {
    let in_msg = code_in_message(msg);
    wanted.iter().any(|w| code == Some(*w) || in_msg == Some(*w))
}

fn is_unique_violation(code: Option<&str>, msg: &str) -> bool {
    // 2067 / 1555: SQLITE_CONSTRAINT_UNIQUE / _PRIMARYKEY
    has_code(code, msg, &["23505", "2067", "1555"])
        || msg.contains("duplicate key value violates unique constraint")
        || msg.contains("UNIQUE constraint failed")
}

fn is_serialization_failure(code: Option<&str>, msg: &str) -> bool {
    // 5 / 6 / 517: SQLITE_BUSY / SQLITE_LOCKED / SQLITE_BUSY_SNAPSHOT
    has_code(code, msg, &["40001", "40P01", "5", "6", "517"])
        || msg.contains("could not serialize access")
        || msg.contains("deadlock detected")
        || msg.contains("database is locked")
        || msg.contains("database table is locked")
}

fn unique_conflict(msg: &str) -> DomainError {
    for (pg_name, sqlite_cols, kind, detail) in UNIQUE_TARGETS {
        if msg.contains(pg_name) || msg.contains(sqlite_cols) {
            return DomainError::conflict(kind.clone(), *detail);
        }
    }
    DomainError::conflict(
        ConflictKind::Other("Unique".into()),
        "Unique constraint violation",
    )
}

fn optimistic_lock(payload: &str) -> DomainError {
    #[derive(serde::Deserialize)]
    struct LockInfo {
        expected: i32,
        actual: i32,
    }

    match serde_json::from_str::<LockInfo>(payload) {
        Ok(info) => {
            warn!(
                trace_id = %trace_ctx::trace_id(),
                expected = info.expected,
                actual = info.actual,
                "Optimistic lock conflict"
            );
            DomainError::conflict(
                ConflictKind::OptimisticLock,
                format!(
                    "Resource was modified concurrently (expected version {}, actual version {})",
                    info.expected, info.actual
                ),
            )
        }
        Err(_) => DomainError::conflict(
            ConflictKind::OptimisticLock,
            "Resource was modified concurrently",
        ),
    }
}

/// Translate a `DbErr` into a `DomainError` with sanitized, PII-safe detail.
pub fn map_db_err(e: DbErr) -> DomainError {
    let msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        DbErr::RecordNotFound(what) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), what.clone());
        }
        DbErr::Custom(custom) if custom.starts_with(OPTIMISTIC_LOCK_PREFIX) => {
            return optimistic_lock(&custom[OPTIMISTIC_LOCK_PREFIX.len()..]);
        }
        DbErr::ConnectionAcquire(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&msg), "Database pool exhausted or closed");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    let code = driver_code(&e);
    let code = code.as_deref();

    if is_unique_violation(code, &msg) {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&msg), "Unique constraint violation");
        return unique_conflict(&msg);
    }

    if is_serialization_failure(code, &msg) {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&msg), "Serialization failure");
        return DomainError::conflict(
            ConflictKind::Serialization,
            "Concurrent update detected; please retry",
        );
    }

    // 787: SQLITE_CONSTRAINT_FOREIGNKEY
    if has_code(code, &msg, &["23503", "787"]) || msg.contains("FOREIGN KEY constraint failed") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&msg), "Foreign key violation");
        return DomainError::validation("Referenced record does not exist");
    }

    // 275: SQLITE_CONSTRAINT_CHECK
    if has_code(code, &msg, &["23514", "275"]) || msg.contains("CHECK constraint failed") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&msg), "Check constraint violation");
        return DomainError::validation("Check constraint violation");
    }

    if let DbErr::Conn(_) = &e {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&msg), "Database unavailable");
        return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
    }

    if has_code(code, &msg, &["57014"]) || msg.contains("statement timeout") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&msg), "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}
