//! # roost
//!
//! A single-node coordination service. Clients keep one long-lived
//! bidirectional stream to the server and manipulate a hierarchical
//! namespace of small, versioned data nodes (ZNodes).
//!
//! ## Features
//! - **Versioned tree**: conditional updates and deletes over a single
//!   in-memory namespace
//! - **One-shot watches**: change notifications on creation, data change,
//!   deletion, and child-set change
//! - **Ephemeral nodes**: automatically reaped when the owning session ends
//! - **Sequential nodes**: parent-scoped monotonically numbered siblings
//! - **Heartbeats**: idle streams stay alive on both sides
//!
//! ## Quick Start
//! ```no_run
//! use roost::config::RoostConfig;
//! use roost::server::{start_rpc_server, Node};
//! use tokio::sync::watch;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), roost::Error> {
//!     let config = RoostConfig::new()?;
//!     let listen_addr = config.server.listen_addr();
//!     let (_graceful_tx, graceful_rx) = watch::channel(());
//!
//!     let node = Node::new(config)?;
//!     start_rpc_server(node, listen_addr, graceful_rx).await
//! }
//! ```
//!
//! Durability is a seam, not a feature: every mutation produces a
//! transaction record (`zxid`-ordered) that an optional write-ahead log
//! consumes; replication and recovery are future work layered on the same
//! records.

pub mod client;
pub mod config;
pub mod proto;
pub mod server;
pub mod session;
pub mod storage;
pub mod tree;
pub mod watch;

mod constants;
mod errors;
mod utils;

pub use constants::*;
pub use errors::*;
