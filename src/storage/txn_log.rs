//! Write-ahead log: one file per transaction.
//!
//! Each applied mutation is written to its own file in the configured
//! directory, named `log_<zxid>` in decimal. The file body is the
//! prost-encoded [`Transaction`]. Snapshot files would share the directory
//! under the `snapshot_` prefix.

use std::path::PathBuf;

use parking_lot::Mutex;
use prost::Message;
use tracing::debug;

use crate::proto::Transaction;
use crate::Result;
use crate::StorageError;
use crate::TXN_LOG_FILE_PREFIX;

/// Sink for transaction records. The dispatcher hands every applied
/// mutation's record to the configured sink; with none configured the
/// record is dropped.
pub trait TxnSink: Send + Sync {
    /// Persist one record. Appends must observe a zxid strictly greater
    /// than everything already written.
    fn append(
        &self,
        txn: &Transaction,
    ) -> Result<()>;
}

/// File-per-transaction log over a local directory.
#[derive(Debug)]
pub struct FileTxnLog {
    // Guards last_zxid and orders the file writes behind it.
    inner: Mutex<FileTxnLogInner>,
    dir: PathBuf,
}

#[derive(Debug)]
struct FileTxnLogInner {
    last_zxid: i64,
}

impl FileTxnLog {
    /// Open a log over `dir`. The directory must already exist.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        let meta = std::fs::metadata(&dir).map_err(|e| StorageError::PathError {
            path: dir.clone(),
            source: e,
        })?;
        if !meta.is_dir() {
            return Err(StorageError::NotADirectory(dir).into());
        }
        Ok(Self {
            inner: Mutex::new(FileTxnLogInner { last_zxid: 0 }),
            dir,
        })
    }
}

impl TxnSink for FileTxnLog {
    fn append(
        &self,
        txn: &Transaction,
    ) -> Result<()> {
        let mut inner = self.inner.lock();
        if txn.zxid <= inner.last_zxid {
            return Err(StorageError::StaleZxid {
                zxid: txn.zxid,
                last: inner.last_zxid,
            }
            .into());
        }

        let path = self
            .dir
            .join(format!("{}_{}", TXN_LOG_FILE_PREFIX, txn.zxid));
        std::fs::write(&path, txn.encode_to_vec()).map_err(|e| StorageError::PathError {
            path: path.clone(),
            source: e,
        })?;

        // Advance only after the bytes are on disk.
        inner.last_zxid = txn.zxid;
        debug!(zxid = txn.zxid, path = %path.display(), "appended transaction");
        Ok(())
    }
}
