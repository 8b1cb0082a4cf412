//! The coordination server: shared state wiring and the RPC listener.

mod dispatcher;
mod service;


use std::net::SocketAddr;
use std::sync::Arc;

use futures::FutureExt;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio_stream::wrappers::TcpListenerStream;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::config::RoostConfig;
use crate::proto::roost_server::RoostServer;
use crate::session::SessionRegistry;
use crate::storage::FileTxnLog;
use crate::storage::TxnSink;
use crate::storage::ZxidGenerator;
use crate::tree::ZNodeDb;
use crate::watch::WatchTable;
use crate::Result;

/// Single-node engine epoch; a replicated build would derive this from
/// leadership changes.
const STANDALONE_EPOCH: i32 = 0;

/// All shared state behind one coordination listener. Cheap to clone; every
/// stream task carries one.
#[derive(Clone)]
pub struct Node {
    pub(crate) config: Arc<RoostConfig>,
    pub(crate) db: Arc<ZNodeDb>,
    pub(crate) sessions: Arc<SessionRegistry>,
    pub(crate) watches: Arc<WatchTable>,
    pub(crate) zxids: Arc<ZxidGenerator>,
    pub(crate) txn_sink: Option<Arc<dyn TxnSink>>,
}

impl Node {
    /// Wire up a node from validated configuration. Opens the transaction
    /// log when one is configured.
    pub fn new(config: RoostConfig) -> Result<Self> {
        let txn_sink = match &config.storage.txn_log_dir {
            Some(dir) => {
                info!(dir = %dir.display(), "write-ahead log enabled");
                Some(Arc::new(FileTxnLog::open(dir)?) as Arc<dyn TxnSink>)
            }
            None => None,
        };

        Ok(Self {
            db: Arc::new(ZNodeDb::new(config.limits.clone())),
            sessions: Arc::new(SessionRegistry::new()),
            watches: Arc::new(WatchTable::new()),
            zxids: Arc::new(ZxidGenerator::new(STANDALONE_EPOCH)),
            config: Arc::new(config),
            txn_sink,
        })
    }

    /// Live session count, for observability.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

/// Bind `listen_addr` and serve the coordination service until the shutdown
/// signal fires.
pub async fn start_rpc_server(
    node: Node,
    listen_addr: SocketAddr,
    shutdown_signal: watch::Receiver<()>,
) -> Result<()> {
    let listener = TcpListener::bind(listen_addr).await?;
    serve_with_listener(node, listener, shutdown_signal).await
}

/// Serve on an already-bound listener. Tests bind port 0 themselves and pass
/// the listener in to learn the ephemeral port.
pub async fn serve_with_listener(
    node: Node,
    listener: TcpListener,
    mut shutdown_signal: watch::Receiver<()>,
) -> Result<()> {
    let listen_addr = listener.local_addr()?;
    info!("coordination service listening on {}", listen_addr);

    if let Err(e) = tonic::transport::Server::builder()
        .tcp_nodelay(true)
        .add_service(RoostServer::new(node))
        .serve_with_incoming_shutdown(
            TcpListenerStream::new(listener),
            shutdown_signal.changed().map(move |_s| {
                warn!("Stopping RPC server. {}", listen_addr);
            }),
        )
        .await
    {
        error!("error running the rpc server: {:?}.", e);
        return Err(e.into());
    }
    info!("rpc service finished");
    Ok(())
}
