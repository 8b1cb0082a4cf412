//! Message structs for the `roost.v1` protocol package.

/// Minimal keepalive probe; carries the sender's wall clock.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct HeartbeatRequest {
    #[prost(int64, tag = "1")]
    pub sent_ts_ms: i64,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct HeartbeatResponse {
    /// Server wall clock at the moment the heartbeat was answered.
    #[prost(int64, tag = "1")]
    pub received_ts_ms: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateRequest {
    #[prost(string, tag = "1")]
    pub path: ::prost::alloc::string::String,
    #[prost(bytes = "vec", tag = "2")]
    pub data: ::prost::alloc::vec::Vec<u8>,
    #[prost(enumeration = "create_request::Flag", repeated, tag = "3")]
    pub flags: ::prost::alloc::vec::Vec<i32>,
}

pub mod create_request {
    #[derive(
        Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration,
    )]
    #[repr(i32)]
    pub enum Flag {
        Unspecified = 0,
        /// The node is destroyed when its creator's session ends.
        Ephemeral = 1,
        /// A parent-scoped monotonically increasing counter is appended to
        /// the node name.
        Sequential = 2,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateResponse {
    /// Full path of the created node, including any sequential suffix.
    #[prost(string, tag = "1")]
    pub z_node_name: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteRequest {
    #[prost(string, tag = "1")]
    pub path: ::prost::alloc::string::String,
    /// Expected version, or -1 to skip the conditional check.
    #[prost(int64, tag = "2")]
    pub version: i64,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct DeleteResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExistsRequest {
    #[prost(string, tag = "1")]
    pub path: ::prost::alloc::string::String,
    #[prost(bool, tag = "2")]
    pub watch: bool,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct ExistsResponse {
    #[prost(bool, tag = "1")]
    pub exists: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetDataRequest {
    #[prost(string, tag = "1")]
    pub path: ::prost::alloc::string::String,
    #[prost(bool, tag = "2")]
    pub watch: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetDataResponse {
    #[prost(bytes = "vec", tag = "1")]
    pub data: ::prost::alloc::vec::Vec<u8>,
    #[prost(int64, tag = "2")]
    pub version: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SetDataRequest {
    #[prost(string, tag = "1")]
    pub path: ::prost::alloc::string::String,
    #[prost(bytes = "vec", tag = "2")]
    pub data: ::prost::alloc::vec::Vec<u8>,
    /// Expected version, or -1 to skip the conditional check.
    #[prost(int64, tag = "3")]
    pub version: i64,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct SetDataResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetChildrenRequest {
    #[prost(string, tag = "1")]
    pub path: ::prost::alloc::string::String,
    #[prost(bool, tag = "2")]
    pub watch: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetChildrenResponse {
    #[prost(string, repeated, tag = "1")]
    pub children: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SyncRequest {
    #[prost(string, tag = "1")]
    pub path: ::prost::alloc::string::String,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct SyncResponse {}

/// One-shot change notification pushed to a watching session.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct WatchEvent {
    #[prost(enumeration = "watch_event::EventType", tag = "1")]
    pub event_type: i32,
}

pub mod watch_event {
    #[derive(
        Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration,
    )]
    #[repr(i32)]
    pub enum EventType {
        Unspecified = 0,
        Created = 1,
        Deleted = 2,
        DataChanged = 3,
        ChildrenChanged = 4,
    }
}

/// In-band failure answer for a single request; the stream stays alive.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ErrorResponse {
    #[prost(enumeration = "error_response::Code", tag = "1")]
    pub code: i32,
    #[prost(string, tag = "2")]
    pub message: ::prost::alloc::string::String,
}

pub mod error_response {
    #[derive(
        Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration,
    )]
    #[repr(i32)]
    pub enum Code {
        Unspecified = 0,
        InvalidPath = 1,
        ParentMissing = 2,
        EphemeralParent = 3,
        AlreadyExists = 4,
        NoNode = 5,
        BadVersion = 6,
        HasChildren = 7,
        DataTooLarge = 8,
        SessionExpired = 9,
        Unimplemented = 10,
    }
}

/// One frame of the client-to-server stream.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RoostRequest {
    #[prost(oneof = "roost_request::Message", tags = "1, 2, 3, 4, 5, 6, 7, 8")]
    pub message: ::core::option::Option<roost_request::Message>,
}

pub mod roost_request {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Message {
        #[prost(message, tag = "1")]
        Heartbeat(super::HeartbeatRequest),
        #[prost(message, tag = "2")]
        Create(super::CreateRequest),
        #[prost(message, tag = "3")]
        Delete(super::DeleteRequest),
        #[prost(message, tag = "4")]
        Exists(super::ExistsRequest),
        #[prost(message, tag = "5")]
        GetData(super::GetDataRequest),
        #[prost(message, tag = "6")]
        SetData(super::SetDataRequest),
        #[prost(message, tag = "7")]
        GetChildren(super::GetChildrenRequest),
        #[prost(message, tag = "8")]
        Sync(super::SyncRequest),
    }
}

/// One frame of the server-to-client stream. Mirrors the request variants,
/// plus unsolicited watch events and in-band request errors.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RoostResponse {
    #[prost(oneof = "roost_response::Message", tags = "1, 2, 3, 4, 5, 6, 7, 8, 9, 10")]
    pub message: ::core::option::Option<roost_response::Message>,
}

pub mod roost_response {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Message {
        #[prost(message, tag = "1")]
        Heartbeat(super::HeartbeatResponse),
        #[prost(message, tag = "2")]
        Create(super::CreateResponse),
        #[prost(message, tag = "3")]
        Delete(super::DeleteResponse),
        #[prost(message, tag = "4")]
        Exists(super::ExistsResponse),
        #[prost(message, tag = "5")]
        GetData(super::GetDataResponse),
        #[prost(message, tag = "6")]
        SetData(super::SetDataResponse),
        #[prost(message, tag = "7")]
        GetChildren(super::GetChildrenResponse),
        #[prost(message, tag = "8")]
        Sync(super::SyncResponse),
        #[prost(message, tag = "9")]
        WatchEvent(super::WatchEvent),
        #[prost(message, tag = "10")]
        Error(super::ErrorResponse),
    }
}

/// Record of one applied mutation, ready for a write-ahead log. Read
/// operations never produce one.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Transaction {
    /// Client that issued the mutation, taken from the stream metadata.
    #[prost(string, tag = "1")]
    pub client_id: ::prost::alloc::string::String,
    /// Order id: (epoch << 32) | counter.
    #[prost(int64, tag = "2")]
    pub zxid: i64,
    #[prost(int64, tag = "3")]
    pub timestamp_ms: i64,
    #[prost(oneof = "transaction::Txn", tags = "4, 5, 6")]
    pub txn: ::core::option::Option<transaction::Txn>,
}

pub mod transaction {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Txn {
        #[prost(message, tag = "4")]
        Create(super::CreateTxn),
        #[prost(message, tag = "5")]
        Delete(super::DeleteTxn),
        #[prost(message, tag = "6")]
        SetData(super::SetDataTxn),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateTxn {
    #[prost(string, tag = "1")]
    pub path: ::prost::alloc::string::String,
    #[prost(bytes = "vec", tag = "2")]
    pub data: ::prost::alloc::vec::Vec<u8>,
    #[prost(bool, tag = "3")]
    pub ephemeral: bool,
    #[prost(bool, tag = "4")]
    pub sequential: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteTxn {
    #[prost(string, tag = "1")]
    pub path: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SetDataTxn {
    #[prost(string, tag = "1")]
    pub path: ::prost::alloc::string::String,
    #[prost(bytes = "vec", tag = "2")]
    pub data: ::prost::alloc::vec::Vec<u8>,
}
