//! The tree store: sole owner of the namespace.
//!
//! A single readers-writer lock protects the whole tree. Reads take the
//! shared side and return snapshots; mutators take the exclusive side. Every
//! acquisition is scoped to one operation and no lock is ever held across an
//! await point.

use parking_lot::RwLock;
use tracing::debug;

use super::path;
use super::NodeType;
use super::NodeView;
use super::ZNode;
use crate::config::LimitsConfig;
use crate::RequestError;

pub struct ZNodeDb {
    root: RwLock<ZNode>,
    limits: LimitsConfig,
}

impl ZNodeDb {
    pub fn new(limits: LimitsConfig) -> Self {
        Self {
            root: RwLock::new(ZNode::root()),
            limits,
        }
    }

    /// Snapshot of the node at `path`, or `None` if absent.
    pub fn get(
        &self,
        path: &str,
    ) -> Result<Option<NodeView>, RequestError> {
        let names = self.checked_names(path)?;

        let root = self.root.read();
        Ok(find(&root, &names).map(|node| NodeView::snapshot(node, path.to_string())))
    }

    /// Direct-child names of the node at `path`; `None` if the node is
    /// absent. Order is unspecified but stable within one snapshot.
    pub fn get_children(
        &self,
        path: &str,
    ) -> Result<Option<Vec<String>>, RequestError> {
        let names = self.checked_names(path)?;

        let root = self.root.read();
        Ok(find(&root, &names).map(|node| node.children.keys().cloned().collect()))
    }

    /// Insert a new node under its parent. Synthesizes the `<name>_<n>`
    /// suffix for sequential creates and advances the parent's counter only
    /// on success.
    pub fn create(
        &self,
        client_id: &str,
        path: &str,
        data: Vec<u8>,
        ephemeral: bool,
        sequential: bool,
    ) -> Result<NodeView, RequestError> {
        let names = self.checked_names(path)?;
        if data.len() > self.limits.max_data_bytes {
            return Err(RequestError::DataTooLarge {
                got: data.len(),
                limit: self.limits.max_data_bytes,
            });
        }

        let (ancestors, last) = split_target(&names);

        let mut root = self.root.write();
        let parent = find_mut(&mut root, ancestors)
            .ok_or_else(|| RequestError::ParentMissing(path.to_string()))?;
        if parent.node_type == NodeType::Ephemeral {
            return Err(RequestError::EphemeralParent);
        }

        let new_name = if sequential {
            format!("{}_{}", last, parent.next_sequential)
        } else {
            last.to_string()
        };
        if parent.children.contains_key(&new_name) {
            return Err(RequestError::AlreadyExists {
                path: path.to_string(),
                name: new_name,
            });
        }

        let node_type = if ephemeral {
            NodeType::Ephemeral
        } else {
            NodeType::Standard
        };
        let node = ZNode::new(new_name.clone(), node_type, client_id, data);
        let full_path = path::join(ancestors, &new_name);
        let view = NodeView::snapshot(&node, full_path);

        parent.children.insert(new_name, node);
        if sequential {
            parent.next_sequential += 1;
        }

        debug!(path = %view.path, ephemeral, sequential, "created node");
        Ok(view)
    }

    /// Remove the leaf at `path` if its version matches. A missing target is
    /// an idempotent success (`Ok(None)`); missing ancestors are an error.
    /// Returns a snapshot of the removed node so the caller can route
    /// ephemeral cleanup.
    pub fn delete(
        &self,
        path: &str,
        expected_version: i64,
    ) -> Result<Option<NodeView>, RequestError> {
        let names = self.checked_names(path)?;
        let (ancestors, last) = split_target(&names);

        let mut root = self.root.write();
        let parent = find_mut(&mut root, ancestors)
            .ok_or_else(|| RequestError::ParentMissing(path.to_string()))?;

        let Some(node) = parent.children.get(last) else {
            // Deleting what is not there succeeds without side effects.
            return Ok(None);
        };
        if !path::version_matches(expected_version, node.version) {
            return Err(RequestError::BadVersion {
                expected: expected_version,
                actual: node.version,
            });
        }
        if !node.children.is_empty() {
            return Err(RequestError::HasChildren(path.to_string()));
        }

        let removed = parent.children.remove(last).map(|node| {
            let view = NodeView::snapshot(&node, path.to_string());
            debug!(path = %view.path, "deleted node");
            view
        });
        Ok(removed)
    }

    /// Replace the payload of the node at `path` if its version matches, and
    /// bump the version. Returns the new version.
    pub fn set_data(
        &self,
        path: &str,
        data: Vec<u8>,
        expected_version: i64,
    ) -> Result<i64, RequestError> {
        let names = self.checked_names(path)?;
        if data.len() > self.limits.max_data_bytes {
            return Err(RequestError::DataTooLarge {
                got: data.len(),
                limit: self.limits.max_data_bytes,
            });
        }

        let mut root = self.root.write();
        let node = find_mut(&mut root, &names)
            .ok_or_else(|| RequestError::NoNode(path.to_string()))?;
        if !path::version_matches(expected_version, node.version) {
            return Err(RequestError::BadVersion {
                expected: expected_version,
                actual: node.version,
            });
        }

        node.data = data;
        node.version += 1;
        debug!(path, version = node.version, "replaced node data");
        Ok(node.version)
    }

    fn checked_names<'a>(
        &self,
        path: &'a str,
    ) -> Result<Vec<&'a str>, RequestError> {
        let names = path::validate(path)?;
        if names.len() > self.limits.max_path_depth {
            return Err(RequestError::InvalidPath(format!(
                "path depth {} exceeds the limit of {}",
                names.len(),
                self.limits.max_path_depth
            )));
        }
        Ok(names)
    }
}

/// Walk down from `start` following `names`; `None` as soon as a link is
/// missing.
fn find<'a>(
    start: &'a ZNode,
    names: &[&str],
) -> Option<&'a ZNode> {
    let mut node = start;
    for name in names {
        node = node.children.get(*name)?;
    }
    Some(node)
}

fn find_mut<'a>(
    start: &'a mut ZNode,
    names: &[&str],
) -> Option<&'a mut ZNode> {
    let mut node = start;
    for name in names {
        node = node.children.get_mut(*name)?;
    }
    Some(node)
}

/// Split validated names into (ancestors, target name).
fn split_target<'a, 'b>(names: &'a [&'b str]) -> (&'a [&'b str], &'b str) {
    let (last, ancestors) = names.split_last().expect("validated paths are non-empty");
    (ancestors, last)
}
