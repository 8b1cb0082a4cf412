use prost::Message;
use tempfile::tempdir;

use crate::proto::transaction;
use crate::proto::Transaction;
use crate::storage::FileTxnLog;
use crate::storage::TxnSink;
use crate::Error;
use crate::StorageError;

fn sample_txn(zxid: i64) -> Transaction {
    Transaction::create("client-1", zxid, "/zoo", b"data".to_vec(), false, false)
}

#[test]
fn test_append_writes_one_file_per_txn() {
    let dir = tempdir().unwrap();
    let log = FileTxnLog::open(dir.path()).unwrap();

    log.append(&sample_txn(1)).unwrap();
    log.append(&sample_txn(2)).unwrap();

    assert!(dir.path().join("log_1").exists());
    assert!(dir.path().join("log_2").exists());
}

#[test]
fn test_append_body_round_trips() {
    let dir = tempdir().unwrap();
    let log = FileTxnLog::open(dir.path()).unwrap();
    let txn = sample_txn(1);
    log.append(&txn).unwrap();

    let bytes = std::fs::read(dir.path().join("log_1")).unwrap();
    let decoded = Transaction::decode(bytes.as_slice()).unwrap();
    assert_eq!(decoded, txn);
    assert!(matches!(
        decoded.txn,
        Some(transaction::Txn::Create(_))
    ));
}

#[test]
fn test_append_refuses_stale_zxid() {
    let dir = tempdir().unwrap();
    let log = FileTxnLog::open(dir.path()).unwrap();
    log.append(&sample_txn(5)).unwrap();

    for stale in [5, 4, 0, -1] {
        let err = log.append(&sample_txn(stale)).unwrap_err();
        assert!(
            matches!(
                err,
                Error::Storage(StorageError::StaleZxid { zxid, last: 5 }) if zxid == stale
            ),
            "zxid {stale} must be refused"
        );
    }

    // A fresh id is accepted again afterwards.
    log.append(&sample_txn(6)).unwrap();
}

#[test]
fn test_open_rejects_missing_directory() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");
    assert!(FileTxnLog::open(missing).is_err());
}

#[test]
fn test_open_rejects_plain_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("file");
    std::fs::write(&file, b"x").unwrap();
    let err = FileTxnLog::open(&file).unwrap_err();
    assert!(matches!(
        err,
        Error::Storage(StorageError::NotADirectory(_))
    ));
}
