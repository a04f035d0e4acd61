use std::sync::OnceLock;

/// What `with_txn` does with a transaction whose closure returned `Ok`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnPolicy {
    /// Commit the transaction when the operation succeeds (default behavior)
    CommitOnOk,
    /// Rollback the transaction when the operation succeeds (for testing)
    RollbackOnOk,
}

static POLICY: OnceLock<TxnPolicy> = OnceLock::new();

/// Current policy; `CommitOnOk` unless a test binary set otherwise.
pub fn current() -> TxnPolicy {
    POLICY.get().copied().unwrap_or(TxnPolicy::CommitOnOk)
}

/// Set the policy for the process. Only the first call has any effect.
pub fn set_txn_policy(policy: TxnPolicy) {
    let _ = POLICY.set(policy);
}
