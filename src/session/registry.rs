use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::debug;

use super::Event;
use super::Session;
use crate::SessionError;

/// All currently connected sessions, keyed by client id.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, Arc<Session>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session. Fails when another live session already holds
    /// the client id; the id is released only when that session closes.
    pub fn start_session(
        &self,
        client_id: &str,
    ) -> Result<(Arc<Session>, mpsc::Receiver<Event>), SessionError> {
        match self.sessions.entry(client_id.to_string()) {
            Entry::Occupied(_) => Err(SessionError::DuplicateSession(client_id.to_string())),
            Entry::Vacant(entry) => {
                let (session, events_rx) = Session::new(client_id);
                let session = Arc::new(session);
                entry.insert(Arc::clone(&session));
                debug!(client_id, "session started");
                Ok((session, events_rx))
            }
        }
    }

    pub fn get(
        &self,
        client_id: &str,
    ) -> Option<Arc<Session>> {
        self.sessions
            .get(client_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Drop the registry entry, releasing the client id. Ephemeral reaping
    /// happens before this, on the dispatcher's close path.
    pub fn remove(
        &self,
        client_id: &str,
    ) -> Option<Arc<Session>> {
        let removed = self.sessions.remove(client_id).map(|(_, session)| session);
        if removed.is_some() {
            debug!(client_id, "session removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
