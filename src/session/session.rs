use std::collections::HashSet;

use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::proto::RoostRequest;
use crate::proto::WatchEvent;
use crate::SESSION_EVENT_QUEUE_CAPACITY;

/// One unit of work for a session's connection loop.
#[derive(Debug)]
pub enum Event {
    /// A decoded client request pushed by the reader task.
    Request(RoostRequest),
    /// A watch notification targeted at this session.
    Watch(WatchEvent),
    /// The reader observed end of stream. Sent as a value rather than by
    /// closing the queue because watch tasks hold senders too.
    Eof,
}

/// A live client context. Created when the stream opens, destroyed on EOF,
/// idle timeout, or a fatal stream error.
#[derive(Debug)]
pub struct Session {
    client_id: String,
    events: mpsc::Sender<Event>,
    /// Full paths of the ephemeral nodes this session created and has not
    /// yet deleted; the single source of truth for what to reap on close.
    /// Only the owning connection loop and the close path touch it.
    ephemeral_index: Mutex<HashSet<String>>,
}

impl Session {
    pub(crate) fn new(client_id: impl Into<String>) -> (Self, mpsc::Receiver<Event>) {
        let (events, events_rx) = mpsc::channel(SESSION_EVENT_QUEUE_CAPACITY);
        let session = Self {
            client_id: client_id.into(),
            events,
            ephemeral_index: Mutex::new(HashSet::new()),
        };
        (session, events_rx)
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Sender side of the event queue. Cloned by the reader task and by
    /// watch-delivery tasks; safe for concurrent writers.
    pub fn events(&self) -> mpsc::Sender<Event> {
        self.events.clone()
    }

    /// Tie a freshly created ephemeral node to this session.
    pub fn track_ephemeral(
        &self,
        path: impl Into<String>,
    ) {
        self.ephemeral_index.lock().insert(path.into());
    }

    /// Drop the back-reference after an explicit delete. Tolerates absence:
    /// the session may already be mid-teardown.
    pub fn untrack_ephemeral(
        &self,
        path: &str,
    ) {
        self.ephemeral_index.lock().remove(path);
    }

    /// Snapshot of the ephemeral paths to reap. The close path deletes
    /// through the dispatcher, which untracks entries from the live index
    /// while this snapshot is being walked.
    pub fn ephemeral_paths(&self) -> Vec<String> {
        self.ephemeral_index.lock().iter().cloned().collect()
    }
}
