#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod trace_ctx;
pub mod utils;


pub use auth::{mint_access_token, verify_access_token, BackendClaims};
pub use config::db::{db_url, DbKind, DbOwner, RuntimeEnv};
pub use error::AppError;
pub use errors::ErrorCode;
pub use extractors::{CurrentUser, ValidatedJson};
pub use infra::db::{bootstrap_db, connect_db};
pub use infra::state::build_state;
pub use middleware::{cors_middleware, JwtExtract, RequestTrace, StructuredLogger, TraceSpan};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Unit tests get the same quiet subscriber as the integration binaries
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
