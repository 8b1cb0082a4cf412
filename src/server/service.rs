//! The per-stream state machine.
//!
//! Each accepted stream runs two tasks: a reader pumping decoded requests
//! onto the session's event queue, and the connection loop consuming that
//! queue, writing responses, and enforcing the idle timeout. The loop is the
//! only consumer; the reader and watch-delivery tasks are the producers.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_stream::wrappers::ReceiverStream;
use tonic::metadata::MetadataMap;
use tonic::Request;
use tonic::Response;
use tonic::Status;
use tonic::Streaming;
use tracing::info;
use tracing::warn;

use super::Node;
use crate::proto::roost_server::Roost;
use crate::proto::RoostRequest;
use crate::proto::RoostResponse;
use crate::session::Event;
use crate::SessionError;
use crate::CLIENT_ID_HEADER;
use crate::STREAM_OUTBOUND_BUFFER;

#[tonic::async_trait]
impl Roost for Node {
    type MessageStream = ReceiverStream<Result<RoostResponse, Status>>;

    async fn message(
        &self,
        request: Request<Streaming<RoostRequest>>,
    ) -> Result<Response<Self::MessageStream>, Status> {
        let client_id = extract_client_id(request.metadata()).map_err(Status::from)?;
        let (session, events_rx) = self
            .sessions
            .start_session(&client_id)
            .map_err(Status::from)?;
        info!(%client_id, "stream opened");

        tokio::spawn(pump_requests(request.into_inner(), session.events()));

        let (out_tx, out_rx) = mpsc::channel(STREAM_OUTBOUND_BUFFER);
        let node = self.clone();
        tokio::spawn(async move {
            let outcome = node.run_session(&client_id, events_rx, &out_tx).await;

            // The session closes on every exit path: ephemerals reaped,
            // client id released, pending watches left to be dropped at
            // delivery time.
            node.close_session(&client_id);

            match outcome {
                Ok(()) => info!(%client_id, "stream closed"),
                Err(e) => {
                    warn!(%client_id, error = %e, "stream terminated");
                    let _ = out_tx.send(Err(Status::from(e))).await;
                }
            }
        });

        Ok(Response::new(ReceiverStream::new(out_rx)))
    }
}

impl Node {
    /// The connection loop: one event per iteration, re-arming the idle
    /// timer each time. Responses go out in the order their events were
    /// dequeued, which serializes one session's requests in arrival order.
    async fn run_session(
        &self,
        client_id: &str,
        mut events: mpsc::Receiver<Event>,
        out: &mpsc::Sender<Result<RoostResponse, Status>>,
    ) -> Result<(), SessionError> {
        let idle = Duration::from_millis(self.config.server.stream_idle_timeout_ms);

        loop {
            match timeout(idle, events.recv()).await {
                Err(_elapsed) => return Err(SessionError::StreamIdle(idle)),
                // All senders gone without an EOF marker; nothing more can
                // arrive, so treat it as a clean end of stream.
                Ok(None) => return Ok(()),
                Ok(Some(Event::Eof)) => return Ok(()),
                Ok(Some(Event::Request(request))) => {
                    let response = self.handle_client_request(client_id, request)?;
                    if out.send(Ok(response)).await.is_err() {
                        // Transport hung up; the reader will push EOF soon,
                        // but there is nobody left to answer.
                        return Ok(());
                    }
                }
                Ok(Some(Event::Watch(event))) => {
                    if out
                        .send(Ok(RoostResponse::watch_event(event)))
                        .await
                        .is_err()
                    {
                        return Ok(());
                    }
                }
            }
        }
    }
}

/// Reader task: decode frames off the wire into the session's event queue.
/// Whatever the exit reason, an EOF marker goes out last so the connection
/// loop is guaranteed to observe termination.
async fn pump_requests(
    mut inbound: Streaming<RoostRequest>,
    events: mpsc::Sender<Event>,
) {
    loop {
        match inbound.message().await {
            Ok(Some(request)) => {
                if events.send(Event::Request(request)).await.is_err() {
                    // Loop side already gone.
                    break;
                }
            }
            Ok(None) => break,
            Err(status) => {
                warn!(error = %status, "error receiving from client stream");
                break;
            }
        }
    }
    let _ = events.send(Event::Eof).await;
}

/// The client id rides in the stream's initial metadata and is required:
/// without it there is no session to open.
fn extract_client_id(metadata: &MetadataMap) -> Result<String, SessionError> {
    metadata
        .get(CLIENT_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or(SessionError::MissingClientId)
}
