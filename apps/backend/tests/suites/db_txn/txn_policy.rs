use gameshelf_backend::db::txn_policy::{current, set_txn_policy, TxnPolicy};

#[test]
fn binary_runs_with_rollback_policy() {
    assert_eq!(current(), TxnPolicy::RollbackOnOk);
}

#[test]
fn policy_is_set_once() {
    set_txn_policy(TxnPolicy::CommitOnOk);
    assert_eq!(current(), TxnPolicy::RollbackOnOk);
}
