use std::env;
use std::env::VarError;
use std::str::FromStr;

use gameshelf_backend::config::db::{DbKind, RuntimeEnv};
use gameshelf_backend::infra::state::{build_state, StateBuilder};
use gameshelf_backend::state::app_state::AppState;
use gameshelf_backend::state::security_config::SecurityConfig;
use gameshelf_backend::AppError;

fn read_env_db_kind() -> Result<Option<String>, AppError> {
    match env::var("GAMESHELF_TEST_DB_KIND") {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(err) => Err(AppError::config(format!(
            "failed to read GAMESHELF_TEST_DB_KIND: {err}"
        ))),
    }
}

/// In-memory SQLite unless `GAMESHELF_TEST_DB_KIND` says otherwise. Each
/// SQLite state is a private database, so tests never see each other's rows.
pub fn resolve_test_db_kind() -> Result<DbKind, AppError> {
    match read_env_db_kind()? {
        Some(raw) => DbKind::from_str(&raw),
        None => Ok(DbKind::SqliteMemory),
    }
}

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new("integration-test-secret")
}

pub fn test_state_builder() -> Result<StateBuilder, AppError> {
    let db_kind = resolve_test_db_kind()?;
    Ok(build_state()
        .with_env(RuntimeEnv::Test)
        .with_db(db_kind)
        .with_security(test_security()))
}

pub async fn build_test_state() -> Result<AppState, AppError> {
    test_state_builder()?.build().await
}

/// Connected, migrated state; panics on setup failure.
pub async fn test_state() -> AppState {
    build_test_state()
        .await
        .expect("test state should build")
}
