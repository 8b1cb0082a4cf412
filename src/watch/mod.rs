//! One-shot watch registrations.
//!
//! A watch is registered by a read operation and fires at most once, on the
//! first matching change to its path. Firing removes the record; clients
//! that want continuous observation re-register on each notification. The
//! one-shot rule bounds server memory.
//!
//! Extraction happens under the table's own lock and never under the store
//! lock; delivery is pushed onto per-watch tasks by the dispatcher so a slow
//! consumer cannot block its siblings.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::debug;

use crate::proto::watch_event::EventType;
use crate::tree::path;


/// A pending registration: who to notify, where, and on what.
#[derive(Debug, Clone)]
pub struct Watch {
    pub client_id: String,
    pub path: String,
    pub event_types: Vec<EventType>,
}

impl Watch {
    /// `Exists` watches observe the full lifecycle, including creation of a
    /// node that is still absent at registration time.
    pub fn on_exists(
        client_id: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            path: path.into(),
            event_types: vec![
                EventType::Created,
                EventType::DataChanged,
                EventType::Deleted,
            ],
        }
    }

    /// `GetData` watches observe updates and deletion of an existing node.
    pub fn on_get_data(
        client_id: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            path: path.into(),
            event_types: vec![EventType::DataChanged, EventType::Deleted],
        }
    }

    /// `GetChildren` watches observe the child set, plus deletion of the
    /// watched node itself since that empties the child set for good.
    pub fn on_get_children(
        client_id: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            path: path.into(),
            event_types: vec![EventType::ChildrenChanged, EventType::Deleted],
        }
    }

    fn fires_on(
        &self,
        event_type: EventType,
    ) -> bool {
        self.event_types.contains(&event_type)
    }
}

/// Path-keyed table of pending watches, in registration order.
#[derive(Default)]
pub struct WatchTable {
    watches: Mutex<HashMap<String, Vec<Watch>>>,
}

impl WatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &self,
        watch: Watch,
    ) {
        debug!(client_id = %watch.client_id, path = %watch.path, "registered watch");
        self.watches
            .lock()
            .entry(watch.path.clone())
            .or_default()
            .push(watch);
    }

    /// Remove and return every watch that `event_type` on `path` fires:
    /// matching watches on the node itself, and for CREATED/DELETED also the
    /// CHILDREN_CHANGED watches on the parent. Each entry is paired with the
    /// event type to deliver. The lock is released before the caller
    /// enqueues anything.
    pub fn collect(
        &self,
        path: &str,
        event_type: EventType,
    ) -> Vec<(Watch, EventType)> {
        let mut table = self.watches.lock();

        let mut fired: Vec<(Watch, EventType)> = extract(&mut table, path, event_type)
            .into_iter()
            .map(|watch| (watch, event_type))
            .collect();

        if matches!(event_type, EventType::Created | EventType::Deleted) {
            let parent = path::parent(path);
            fired.extend(
                extract(&mut table, parent, EventType::ChildrenChanged)
                    .into_iter()
                    .map(|watch| (watch, EventType::ChildrenChanged)),
            );
        }

        fired
    }

    /// Number of pending registrations on `path`.
    pub fn pending(
        &self,
        path: &str,
    ) -> usize {
        self.watches.lock().get(path).map_or(0, Vec::len)
    }
}

/// Drain the records on `path` that fire on `event_type`, preserving
/// registration order among the extracted and the remaining alike.
fn extract(
    table: &mut HashMap<String, Vec<Watch>>,
    path: &str,
    event_type: EventType,
) -> Vec<Watch> {
    let Some(registered) = table.get_mut(path) else {
        return Vec::new();
    };

    let mut fired = Vec::new();
    registered.retain(|watch| {
        if watch.fires_on(event_type) {
            fired.push(watch.clone());
            false
        } else {
            true
        }
    });
    if registered.is_empty() {
        table.remove(path);
    }
    fired
}
