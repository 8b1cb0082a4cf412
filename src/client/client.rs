use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_stream::wrappers::ReceiverStream;
use tonic::Request;
use tonic::Status;
use tonic::Streaming;
use tracing::debug;
use tracing::warn;

use super::ClientBuilder;
use crate::config::ClientConfig;
use crate::proto::roost_client::RoostClient;
use crate::proto::RoostRequest;
use crate::proto::RoostResponse;
use crate::utils::now_unix_ms;
use crate::Error;
use crate::NetworkError;
use crate::Result;
use crate::CLIENT_ID_HEADER;

/// Queue depth for each of the three client-side queues.
const QUEUE_CAPACITY: usize = 32;

/// What the inbound worker saw on the wire: a response, a clean EOF, or a
/// stream error.
pub(super) type RawInbound = std::result::Result<Option<RoostResponse>, Status>;

/// What `recv` hands to the application once heartbeats are filtered out.
pub(super) type FilteredResponse = Result<Option<RoostResponse>>;

/// One session with the coordination server.
///
/// Dropping the client (or calling [`close`](Client::close)) half-closes the
/// stream; the server then reaps any ephemeral nodes this session created.
pub struct Client {
    client_id: String,
    /// `None` once closed; dropping the sender ends the outbound worker,
    /// which in turn half-closes the stream.
    outbound: Option<mpsc::Sender<RoostRequest>>,
    responses: mpsc::Receiver<FilteredResponse>,
}

impl Client {
    pub fn builder(endpoint: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(endpoint)
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub(crate) async fn connect(
        config: ClientConfig,
        client_id: String,
    ) -> Result<Self> {
        let mut grpc = RoostClient::connect(config.endpoint.clone()).await?;

        // The request stream the transport consumes. The outbound worker is
        // the only writer, so it alone decides when the half-close happens.
        let (to_stream_tx, to_stream_rx) = mpsc::channel(QUEUE_CAPACITY);
        let mut request = Request::new(ReceiverStream::new(to_stream_rx));
        let header_value = client_id
            .parse()
            .map_err(|_| Error::Fatal(format!("client id [{client_id}] is not valid metadata")))?;
        request.metadata_mut().insert(CLIENT_ID_HEADER, header_value);

        let inbound = grpc.message(request).await.map_err(Error::from)?.into_inner();

        let (outbound_tx, outbound_rx) = mpsc::channel(QUEUE_CAPACITY);
        let (raw_tx, raw_rx) = mpsc::channel(QUEUE_CAPACITY);
        let (responses_tx, responses_rx) = mpsc::channel(QUEUE_CAPACITY);

        tokio::spawn(outbound_worker(
            outbound_rx,
            to_stream_tx,
            config.heartbeat_period(),
        ));
        tokio::spawn(inbound_worker(inbound, raw_tx));
        tokio::spawn(filter_worker(raw_rx, responses_tx, config.idle_timeout()));

        debug!(%client_id, endpoint = %config.endpoint, "session stream opened");
        Ok(Self {
            client_id,
            outbound: Some(outbound_tx),
            responses: responses_rx,
        })
    }

    /// Queue one request for the stream.
    pub async fn send(
        &self,
        request: RoostRequest,
    ) -> Result<()> {
        let Some(outbound) = &self.outbound else {
            return Err(NetworkError::ConnectionClosed.into());
        };
        outbound
            .send(request)
            .await
            .map_err(|_| NetworkError::ConnectionClosed.into())
    }

    /// Next non-heartbeat response. `Ok(None)` marks end of stream once the
    /// buffered responses are drained; an idle timeout or stream error
    /// surfaces as `Err`.
    pub async fn recv(&mut self) -> Result<Option<RoostResponse>> {
        match self.responses.recv().await {
            Some(item) => item,
            // Workers are gone and everything buffered has been handed out.
            None => Ok(None),
        }
    }

    /// Half-close the stream. The server finishes answering what it already
    /// received; keep calling [`recv`](Client::recv) to drain.
    pub fn close(&mut self) {
        self.outbound.take();
    }
}

/// Forwards application requests to the wire and injects a heartbeat after
/// a third of the idle window with nothing to send. Exiting drops the
/// stream sender, which is the half-close.
pub(super) async fn outbound_worker(
    mut outbound: mpsc::Receiver<RoostRequest>,
    to_stream: mpsc::Sender<RoostRequest>,
    heartbeat_period: Duration,
) {
    loop {
        match timeout(heartbeat_period, outbound.recv()).await {
            Ok(Some(request)) => {
                if to_stream.send(request).await.is_err() {
                    warn!("request stream closed under the outbound worker");
                    return;
                }
            }
            // Closed by Client::close or drop.
            Ok(None) => return,
            Err(_quiet) => {
                debug!("outbound idle; sending heartbeat");
                if to_stream
                    .send(RoostRequest::heartbeat(now_unix_ms()))
                    .await
                    .is_err()
                {
                    return;
                }
            }
        }
    }
}

/// Drains the wire into the raw-inbound queue, terminal marker last.
async fn inbound_worker(
    mut inbound: Streaming<RoostResponse>,
    raw: mpsc::Sender<RawInbound>,
) {
    loop {
        match inbound.message().await {
            Ok(Some(response)) => {
                if raw.send(Ok(Some(response))).await.is_err() {
                    return;
                }
            }
            Ok(None) => {
                let _ = raw.send(Ok(None)).await;
                return;
            }
            Err(status) => {
                let _ = raw.send(Err(status)).await;
                return;
            }
        }
    }
}

/// Consumes raw-inbound, drops heartbeat responses, forwards the rest, and
/// surfaces an idle-timeout error when the server has been silent for the
/// whole window. Heartbeat responses count as server traffic, so a healthy
/// idle stream never times out here.
pub(super) async fn filter_worker(
    mut raw: mpsc::Receiver<RawInbound>,
    responses: mpsc::Sender<FilteredResponse>,
    idle_timeout: Duration,
) {
    loop {
        match timeout(idle_timeout, raw.recv()).await {
            Err(_elapsed) => {
                warn!(?idle_timeout, "server silent past the idle window");
                let _ = responses
                    .send(Err(NetworkError::IdleTimeout(idle_timeout).into()))
                    .await;
                return;
            }
            Ok(None) => return,
            Ok(Some(Ok(Some(response)))) => {
                if response.is_heartbeat() {
                    continue;
                }
                if responses.send(Ok(Some(response))).await.is_err() {
                    return;
                }
            }
            Ok(Some(Ok(None))) => {
                let _ = responses.send(Ok(None)).await;
                return;
            }
            Ok(Some(Err(status))) => {
                let _ = responses.send(Err(status.into())).await;
                return;
            }
        }
    }
}
