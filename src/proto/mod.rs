//! Wire types and RPC bindings for the `roost.v1.Roost` service.
//!
//! The message structs and the client/server glue are hand-maintained in the
//! shape `tonic-build` emits, so the crate builds without a protoc
//! toolchain. Field tags are part of the wire contract; change them only
//! with a protocol revision.

mod messages;
mod service;

pub use messages::*;
pub use service::roost_client;
pub use service::roost_server;

use crate::utils::now_unix_ms;
use crate::RequestError;

impl CreateRequest {
    pub fn has_flag(
        &self,
        flag: create_request::Flag,
    ) -> bool {
        self.flags.contains(&(flag as i32))
    }
}

impl WatchEvent {
    pub fn of(event_type: watch_event::EventType) -> Self {
        Self {
            event_type: event_type as i32,
        }
    }
}

impl RoostRequest {
    /// Wrap a request message variant into the stream frame.
    pub fn from_message(message: roost_request::Message) -> Self {
        Self {
            message: Some(message),
        }
    }

    pub fn heartbeat(sent_ts_ms: i64) -> Self {
        Self::from_message(roost_request::Message::Heartbeat(HeartbeatRequest {
            sent_ts_ms,
        }))
    }

    pub fn create(
        path: impl Into<String>,
        data: impl AsRef<[u8]>,
        flags: &[create_request::Flag],
    ) -> Self {
        Self::from_message(roost_request::Message::Create(CreateRequest {
            path: path.into(),
            data: data.as_ref().to_vec(),
            flags: flags.iter().map(|f| *f as i32).collect(),
        }))
    }

    pub fn delete(
        path: impl Into<String>,
        version: i64,
    ) -> Self {
        Self::from_message(roost_request::Message::Delete(DeleteRequest {
            path: path.into(),
            version,
        }))
    }

    pub fn exists(
        path: impl Into<String>,
        watch: bool,
    ) -> Self {
        Self::from_message(roost_request::Message::Exists(ExistsRequest {
            path: path.into(),
            watch,
        }))
    }

    pub fn get_data(
        path: impl Into<String>,
        watch: bool,
    ) -> Self {
        Self::from_message(roost_request::Message::GetData(GetDataRequest {
            path: path.into(),
            watch,
        }))
    }

    pub fn set_data(
        path: impl Into<String>,
        data: impl AsRef<[u8]>,
        version: i64,
    ) -> Self {
        Self::from_message(roost_request::Message::SetData(SetDataRequest {
            path: path.into(),
            data: data.as_ref().to_vec(),
            version,
        }))
    }

    pub fn get_children(
        path: impl Into<String>,
        watch: bool,
    ) -> Self {
        Self::from_message(roost_request::Message::GetChildren(GetChildrenRequest {
            path: path.into(),
            watch,
        }))
    }

    pub fn sync(path: impl Into<String>) -> Self {
        Self::from_message(roost_request::Message::Sync(SyncRequest {
            path: path.into(),
        }))
    }
}

impl RoostResponse {
    pub fn from_message(message: roost_response::Message) -> Self {
        Self {
            message: Some(message),
        }
    }

    pub fn watch_event(event: WatchEvent) -> Self {
        Self::from_message(roost_response::Message::WatchEvent(event))
    }

    /// True for keepalive frames, which the client library filters out.
    pub fn is_heartbeat(&self) -> bool {
        matches!(
            self.message,
            Some(roost_response::Message::Heartbeat(_))
        )
    }
}

impl Transaction {
    pub fn create(
        client_id: impl Into<String>,
        zxid: i64,
        path: impl Into<String>,
        data: Vec<u8>,
        ephemeral: bool,
        sequential: bool,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            zxid,
            timestamp_ms: now_unix_ms(),
            txn: Some(transaction::Txn::Create(CreateTxn {
                path: path.into(),
                data,
                ephemeral,
                sequential,
            })),
        }
    }

    pub fn delete(
        client_id: impl Into<String>,
        zxid: i64,
        path: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            zxid,
            timestamp_ms: now_unix_ms(),
            txn: Some(transaction::Txn::Delete(DeleteTxn { path: path.into() })),
        }
    }

    pub fn set_data(
        client_id: impl Into<String>,
        zxid: i64,
        path: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            zxid,
            timestamp_ms: now_unix_ms(),
            txn: Some(transaction::Txn::SetData(SetDataTxn {
                path: path.into(),
                data,
            })),
        }
    }
}

impl From<&RequestError> for ErrorResponse {
    fn from(e: &RequestError) -> Self {
        use error_response::Code;
        let code = match e {
            RequestError::InvalidPath(_) => Code::InvalidPath,
            RequestError::ParentMissing(_) => Code::ParentMissing,
            RequestError::EphemeralParent => Code::EphemeralParent,
            RequestError::AlreadyExists { .. } => Code::AlreadyExists,
            RequestError::NoNode(_) => Code::NoNode,
            RequestError::BadVersion { .. } => Code::BadVersion,
            RequestError::HasChildren(_) => Code::HasChildren,
            RequestError::DataTooLarge { .. } => Code::DataTooLarge,
            RequestError::SessionExpired(_) => Code::SessionExpired,
            RequestError::Unimplemented => Code::Unimplemented,
        };
        Self {
            code: code as i32,
            message: e.to_string(),
        }
    }
}
