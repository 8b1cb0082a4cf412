//! Durability seam: transaction ids and the optional write-ahead log.
//!
//! Every mutating operation produces a [`Transaction`](crate::proto::Transaction)
//! record whether or not a log is attached, so a future replicated build can
//! intercept the same objects without touching the request path.

mod txn_log;
mod zxid;

pub use txn_log::*;
pub use zxid::*;

#[cfg(test)]
mod txn_log_test;
