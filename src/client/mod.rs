//! Client library for the coordination service.
//!
//! A [`Client`] holds one long-lived stream to the server and mirrors the
//! server's session loop: an outbound worker that keeps the stream warm with
//! heartbeats, an inbound worker draining the wire, and a filter worker that
//! hides the heartbeat traffic and enforces the receive idle timeout.
//!
//! # Basic Usage
//! ```no_run
//! use roost::client::Client;
//! use roost::proto::RoostRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), roost::Error> {
//!     let mut client = Client::builder("http://127.0.0.1:8080").build().await?;
//!
//!     client.send(RoostRequest::create("/zoo", b"hello", &[])).await?;
//!     client.send(RoostRequest::get_data("/zoo", false)).await?;
//!     client.close();
//!
//!     while let Some(response) = client.recv().await? {
//!         println!("{response:?}");
//!     }
//!     Ok(())
//! }
//! ```

mod builder;
#[allow(clippy::module_inception)]
mod client;

pub use builder::*;
pub use client::*;
