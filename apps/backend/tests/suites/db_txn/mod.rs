mod txn_policy;
mod with_txn;
