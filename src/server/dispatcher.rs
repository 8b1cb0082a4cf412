//! Request dispatch: one decoded request variant in, one response variant
//! out, with the post-operation glue (transaction records, ephemeral-index
//! bookkeeping, watch firing) around the store calls.

use std::sync::Arc;

use tracing::debug;
use tracing::error;
use tracing::warn;

use super::Node;
use crate::proto::create_request::Flag;
use crate::proto::roost_request;
use crate::proto::roost_response;
use crate::proto::watch_event::EventType;
use crate::proto::CreateRequest;
use crate::proto::CreateResponse;
use crate::proto::DeleteRequest;
use crate::proto::DeleteResponse;
use crate::proto::ErrorResponse;
use crate::proto::ExistsRequest;
use crate::proto::ExistsResponse;
use crate::proto::GetChildrenRequest;
use crate::proto::GetChildrenResponse;
use crate::proto::GetDataRequest;
use crate::proto::GetDataResponse;
use crate::proto::HeartbeatRequest;
use crate::proto::HeartbeatResponse;
use crate::proto::RoostRequest;
use crate::proto::RoostResponse;
use crate::proto::SetDataRequest;
use crate::proto::SetDataResponse;
use crate::proto::SyncRequest;
use crate::proto::SyncResponse;
use crate::proto::Transaction;
use crate::proto::WatchEvent;
use crate::session::Event;
use crate::utils::now_unix_ms;
use crate::watch::Watch;
use crate::RequestError;
use crate::SessionError;

impl Node {
    /// Route one request to the matching operation. Per-request failures are
    /// folded into the `Error` response variant and the stream stays alive;
    /// an unrecognizable frame is fatal.
    pub(crate) fn handle_client_request(
        &self,
        client_id: &str,
        request: RoostRequest,
    ) -> Result<RoostResponse, SessionError> {
        use roost_request::Message;

        let Some(message) = request.message else {
            return Err(SessionError::InvalidMessage);
        };

        let reply = match message {
            Message::Heartbeat(req) => Ok(roost_response::Message::Heartbeat(self.heartbeat(req))),
            Message::Create(req) => self
                .create(client_id, req)
                .map(roost_response::Message::Create),
            Message::Delete(req) => self
                .delete(client_id, req)
                .map(roost_response::Message::Delete),
            Message::Exists(req) => self
                .exists(client_id, req)
                .map(roost_response::Message::Exists),
            Message::GetData(req) => self
                .get_data(client_id, req)
                .map(roost_response::Message::GetData),
            Message::SetData(req) => self
                .set_data(client_id, req)
                .map(roost_response::Message::SetData),
            Message::GetChildren(req) => self
                .get_children(client_id, req)
                .map(roost_response::Message::GetChildren),
            Message::Sync(req) => self.sync(req).map(roost_response::Message::Sync),
        };

        Ok(match reply {
            Ok(message) => RoostResponse::from_message(message),
            Err(e) => {
                debug!(client_id, error = %e, "request failed");
                RoostResponse::from_message(roost_response::Message::Error(ErrorResponse::from(
                    &e,
                )))
            }
        })
    }

    /// Heartbeats never touch the store; answering them is what defeats the
    /// idle timer on both sides.
    fn heartbeat(
        &self,
        _req: HeartbeatRequest,
    ) -> HeartbeatResponse {
        HeartbeatResponse {
            received_ts_ms: now_unix_ms(),
        }
    }

    fn create(
        &self,
        client_id: &str,
        req: CreateRequest,
    ) -> Result<CreateResponse, RequestError> {
        let ephemeral = req.has_flag(Flag::Ephemeral);
        let sequential = req.has_flag(Flag::Sequential);
        let txn = Transaction::create(
            client_id,
            self.zxids.next().as_i64(),
            &req.path,
            req.data.clone(),
            ephemeral,
            sequential,
        );

        let view = self
            .db
            .create(client_id, &req.path, req.data, ephemeral, sequential)?;

        // An ephemeral node must be tied to its owning session before the
        // create is acknowledged. The node is already in the tree, so a
        // vanished session means rolling the create back rather than leaking
        // an orphan nothing will ever reap.
        if ephemeral {
            match self.sessions.get(client_id) {
                Some(session) => session.track_ephemeral(&view.path),
                None => {
                    warn!(client_id, path = %view.path, "session gone mid-create; rolling back");
                    if let Err(e) = self.db.delete(&view.path, -1) {
                        error!(path = %view.path, error = %e, "rollback of orphaned ephemeral failed");
                    }
                    return Err(RequestError::SessionExpired(client_id.to_string()));
                }
            }
        }

        self.log_txn(txn);
        self.fire_watches(&view.path, EventType::Created);
        Ok(CreateResponse {
            z_node_name: view.path,
        })
    }

    fn delete(
        &self,
        client_id: &str,
        req: DeleteRequest,
    ) -> Result<DeleteResponse, RequestError> {
        let txn = Transaction::delete(client_id, self.zxids.next().as_i64(), &req.path);

        let removed = self.db.delete(&req.path, req.version)?;
        if let Some(view) = removed {
            if view.is_ephemeral() {
                // The creator may already be mid-teardown; its index entry is
                // simply gone by then.
                if let Some(owner) = self.sessions.get(&view.creator) {
                    owner.untrack_ephemeral(&view.path);
                }
            }
            self.log_txn(txn);
            self.fire_watches(&req.path, EventType::Deleted);
        }
        // Deleting an absent node succeeds without firing anything.
        Ok(DeleteResponse {})
    }

    fn exists(
        &self,
        client_id: &str,
        req: ExistsRequest,
    ) -> Result<ExistsResponse, RequestError> {
        let node = self.db.get(&req.path)?;

        // Registration on an absent node is the point: the watch fires on
        // creation.
        if req.watch {
            self.watches
                .register(Watch::on_exists(client_id, &req.path));
        }
        Ok(ExistsResponse {
            exists: node.is_some(),
        })
    }

    fn get_data(
        &self,
        client_id: &str,
        req: GetDataRequest,
    ) -> Result<GetDataResponse, RequestError> {
        let Some(view) = self.db.get(&req.path)? else {
            // Unlike Exists, no watch is set on an absent node.
            return Ok(GetDataResponse::default());
        };

        if req.watch {
            self.watches
                .register(Watch::on_get_data(client_id, &req.path));
        }
        Ok(GetDataResponse {
            data: view.data,
            version: view.version,
        })
    }

    fn set_data(
        &self,
        client_id: &str,
        req: SetDataRequest,
    ) -> Result<SetDataResponse, RequestError> {
        let txn = Transaction::set_data(
            client_id,
            self.zxids.next().as_i64(),
            &req.path,
            req.data.clone(),
        );

        self.db.set_data(&req.path, req.data, req.version)?;

        self.log_txn(txn);
        self.fire_watches(&req.path, EventType::DataChanged);
        Ok(SetDataResponse {})
    }

    fn get_children(
        &self,
        client_id: &str,
        req: GetChildrenRequest,
    ) -> Result<GetChildrenResponse, RequestError> {
        let Some(children) = self.db.get_children(&req.path)? else {
            return Ok(GetChildrenResponse::default());
        };

        if req.watch {
            self.watches
                .register(Watch::on_get_children(client_id, &req.path));
        }
        Ok(GetChildrenResponse { children })
    }

    /// Placeholder contract: no pending-update pipeline exists on a single
    /// node, so there is nothing to wait for.
    fn sync(
        &self,
        _req: SyncRequest,
    ) -> Result<SyncResponse, RequestError> {
        Err(RequestError::Unimplemented)
    }

    /// Close a session: reap its ephemerals through the regular delete path
    /// (so delete-watches fire exactly as for a client delete), then release
    /// the client id. The index snapshot tolerates the deletes mutating the
    /// live index underneath.
    pub(crate) fn close_session(
        &self,
        client_id: &str,
    ) {
        if let Some(session) = self.sessions.get(client_id) {
            for path in session.ephemeral_paths() {
                let version = match self.db.get(&path) {
                    Ok(Some(view)) => view.version,
                    // Already deleted out from under us; nothing to reap.
                    _ => continue,
                };
                let req = DeleteRequest {
                    path: path.clone(),
                    version,
                };
                if let Err(e) = self.delete(client_id, req) {
                    error!(client_id, %path, error = %e, "failed to reap ephemeral node");
                }
            }
        }
        self.sessions.remove(client_id);
    }

    fn log_txn(
        &self,
        txn: Transaction,
    ) {
        if let Some(sink) = &self.txn_sink {
            if let Err(e) = sink.append(&txn) {
                error!(zxid = txn.zxid, error = %e, "failed to append transaction");
            }
        }
    }

    /// Collect every watch this event fires, then deliver each from its own
    /// task. The watch-table lock is released before any enqueue, and a slow
    /// session only stalls its own delivery task. Delivery is best-effort:
    /// a session that is gone simply drops its notification.
    fn fire_watches(
        &self,
        path: &str,
        event_type: EventType,
    ) {
        for (watch, deliver_type) in self.watches.collect(path, event_type) {
            let sessions = Arc::clone(&self.sessions);
            tokio::spawn(async move {
                let Some(session) = sessions.get(&watch.client_id) else {
                    debug!(
                        client_id = %watch.client_id,
                        path = %watch.path,
                        "watch owner gone; dropping notification"
                    );
                    return;
                };
                if session
                    .events()
                    .send(Event::Watch(WatchEvent::of(deliver_type)))
                    .await
                    .is_err()
                {
                    debug!(
                        client_id = %watch.client_id,
                        path = %watch.path,
                        "watch owner closed its queue; dropping notification"
                    );
                }
            });
        }
    }
}
