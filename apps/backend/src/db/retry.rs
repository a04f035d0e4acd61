use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, warn};

use crate::error::AppError;

/// Attempts made before a storage conflict is surfaced to the caller.
pub const MAX_ATTEMPTS: u32 = 3;
const BASE_BACKOFF_MS: u64 = 10;

/// Run `op` until it succeeds, fails with something other than a storage
/// conflict, or `MAX_ATTEMPTS` is reached.
///
/// Each attempt must be a complete unit of work (typically one `with_txn`)
/// so a retried attempt starts from committed state.
pub async fn retry_on_conflict<R, F, Fut>(op_name: &'static str, mut op: F) -> Result<R, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<R, AppError>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Err(e) if e.is_storage_conflict() && attempt < MAX_ATTEMPTS => {
                let backoff = backoff_ms(attempt);
                debug!(op = op_name, attempt, backoff_ms = backoff, "storage conflict, retrying");
                tokio::time::sleep(Duration::from_millis(backoff)).await;
                attempt += 1;
            }
            Err(e) if e.is_storage_conflict() => {
                warn!(op = op_name, attempts = attempt, "storage conflict persisted after retries");
                return Err(e);
            }
            other => return other,
        }
    }
}

/// Exponential backoff with full jitter on top.
fn backoff_ms(attempt: u32) -> u64 {
    let base = BASE_BACKOFF_MS << (attempt - 1);
    base + rand::rng().random_range(0..=base)
}
