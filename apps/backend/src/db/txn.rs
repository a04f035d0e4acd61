use std::future::Future;
use std::pin::Pin;

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::warn;

use super::txn_policy::{self, TxnPolicy};
use crate::error::AppError;

/// Boxed future borrowing the transaction it runs in.
pub type TxnFuture<'c, R> = Pin<Box<dyn Future<Output = Result<R, AppError>> + 'c>>;

/// Run `f` inside a fresh transaction on `db`.
///
/// On `Ok` the transaction is committed (or rolled back under
/// `TxnPolicy::RollbackOnOk`); on `Err` it is rolled back and the original
/// error is returned. `f` must only use the transaction it is handed: the
/// SQLite test pool holds a single connection.
pub async fn with_txn<R, F>(db: &DatabaseConnection, f: F) -> Result<R, AppError>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> TxnFuture<'c, R>,
{
    let txn = db.begin().await?;

    match f(&txn).await {
        Ok(val) => {
            match txn_policy::current() {
                TxnPolicy::CommitOnOk => txn.commit().await?,
                TxnPolicy::RollbackOnOk => txn.rollback().await?,
            }
            Ok(val)
        }
        Err(err) => {
            // best-effort; keep the original error
            if let Err(rollback_err) = txn.rollback().await {
                warn!(error = %rollback_err, "rollback failed");
            }
            Err(err)
        }
    }
}
