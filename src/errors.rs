//! Coordination Service Error Hierarchy
//!
//! Errors are split by blast radius: [`RequestError`] answers a single
//! request and leaves the stream alive, [`SessionError`] is fatal to the
//! stream, and [`StorageError`]/[`NetworkError`] cover the infrastructure
//! layers underneath.

use std::path::PathBuf;
use std::time::Duration;

use config::ConfigError;
use tokio::task::JoinError;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failures scoped to one request; reported to the client in-band.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Failures that terminate the stream and close the session.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Transaction log and file-system failures.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Transport-level failures (gRPC channel, stream plumbing).
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Configuration validation failures.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Unrecoverable failures requiring process termination.
    #[error("Fatal error: {0}")]
    Fatal(String),
}

/// Per-request failures. Every variant maps onto a wire error code and is
/// returned to the client in the matching response slot; the stream stays up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// Path failed validation (missing leading `/`, bare root, trailing `/`,
    /// empty name component, or excessive depth).
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// At least one ancestor of the target path is absent.
    #[error("at least one of the ancestors of [{0}] is missing")]
    ParentMissing(String),

    /// Ephemeral nodes are always leaves.
    #[error("ephemeral nodes cannot have children")]
    EphemeralParent,

    /// `Create` of a child name that is already taken.
    #[error("node [{name}] already exists at path [{path}]")]
    AlreadyExists { path: String, name: String },

    /// `SetData` on a node that does not exist.
    #[error("node [{0}] does not exist")]
    NoNode(String),

    /// Conditional version check failed.
    #[error("invalid version: expected [{expected}], actual [{actual}]")]
    BadVersion { expected: i64, actual: i64 },

    /// `Delete` of an internal node; only leaves can be deleted.
    #[error("node [{0}] has children; only leaf nodes can be deleted")]
    HasChildren(String),

    /// Node payload exceeds the configured limit.
    #[error("data of {got} bytes exceeds the {limit} byte limit")]
    DataTooLarge { got: usize, limit: usize },

    /// The session that issued an ephemeral create vanished before the node
    /// could be tied to it; the create is rolled back.
    #[error("session for client [{0}] is gone")]
    SessionExpired(String),

    /// Placeholder contract for `Sync`.
    #[error("method Sync is not implemented")]
    Unimplemented,
}

/// Failures fatal to a client stream. The session is closed cleanly
/// (ephemerals reaped, watches dropped) and the stream terminated with a
/// gRPC status.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Stream opened without the client id metadata header.
    #[error("missing client id in the stream metadata")]
    MissingClientId,

    /// Another live session already holds this client id.
    #[error("a session already exists for client [{0}]")]
    DuplicateSession(String),

    /// No event observed within the idle window.
    #[error("stream idle for {0:?}; closing session")]
    StreamIdle(Duration),

    /// Request frame carried no recognizable message variant.
    #[error("invalid message format")]
    InvalidMessage,
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Disk I/O failures during log operations.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// I/O failure annotated with the offending path.
    #[error("Error occurred at path: {path}")]
    PathError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Transaction log directory is missing or not a directory.
    #[error("transaction log path is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Append observed a transaction id that is not strictly newer than the
    /// last one written.
    #[error("transaction [{zxid}] has already been added to the log (last: [{last}])")]
    StaleZxid { zxid: i64, last: i64 },
}

#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// gRPC transport layer errors.
    #[error(transparent)]
    Transport(#[from] Box<tonic::transport::Error>),

    /// gRPC status errors surfaced by the peer.
    #[error(transparent)]
    Status(#[from] Box<tonic::Status>),

    /// The client observed no server traffic within its idle window.
    #[error("no server response within {0:?}")]
    IdleTimeout(Duration),

    /// Stream plumbing closed underneath a worker.
    #[error("connection closed")]
    ConnectionClosed,

    /// Background task failed.
    #[error("background task failed: {0}")]
    TaskFailed(#[from] JoinError),
}

// ============== Conversion Implementations ============== //
impl From<tonic::transport::Error> for Error {
    fn from(err: tonic::transport::Error) -> Self {
        NetworkError::Transport(Box::new(err)).into()
    }
}

impl From<tonic::Status> for Error {
    fn from(err: tonic::Status) -> Self {
        NetworkError::Status(Box::new(err)).into()
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e).into()
    }
}

impl From<JoinError> for Error {
    fn from(e: JoinError) -> Self {
        NetworkError::TaskFailed(e).into()
    }
}

impl From<SessionError> for tonic::Status {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::MissingClientId => tonic::Status::invalid_argument(e.to_string()),
            SessionError::DuplicateSession(_) => tonic::Status::already_exists(e.to_string()),
            SessionError::StreamIdle(_) => tonic::Status::deadline_exceeded(e.to_string()),
            SessionError::InvalidMessage => tonic::Status::invalid_argument(e.to_string()),
        }
    }
}
