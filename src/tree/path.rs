//! Path syntax for the namespace: POSIX-like, `/`-separated, absolute.
//!
//! A valid path starts with `/`, is not the bare root, does not end with
//! `/`, and contains no empty name component. The bare root stays invalid on
//! purpose: the root is not addressable by clients.

use crate::RequestError;

/// Verify `path` and split it into its ordered name components.
pub fn validate(path: &str) -> Result<Vec<&str>, RequestError> {
    if !path.starts_with('/') {
        return Err(RequestError::InvalidPath(format!(
            "path [{path}] does not start at the root"
        )));
    }

    if path == "/" {
        return Err(RequestError::InvalidPath(
            "path cannot be the root".to_string(),
        ));
    }

    if path.ends_with('/') {
        return Err(RequestError::InvalidPath(format!(
            "path [{path}] should end in a node name, not '/'"
        )));
    }

    // The leading '/' yields an empty first element; skip it.
    let names: Vec<&str> = path.split('/').skip(1).collect();
    if names.iter().any(|name| name.is_empty()) {
        return Err(RequestError::InvalidPath(format!(
            "path [{path}] contains an empty node name"
        )));
    }

    Ok(names)
}

/// Parent path of `path`; `"/zoo"` maps to `""`, which never carries watches
/// because the validator rejects the bare root.
pub fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(i) => &path[..i],
        None => "",
    }
}

/// Join ancestor names and a final node name back into a full path.
pub fn join(
    ancestors: &[&str],
    name: &str,
) -> String {
    if ancestors.is_empty() {
        format!("/{name}")
    } else {
        format!("/{}/{name}", ancestors.join("/"))
    }
}

/// Conditional check used by `Delete` and `SetData`: -1 skips the check,
/// anything else must equal the node's current version.
pub fn version_matches(
    expected: i64,
    actual: i64,
) -> bool {
    expected == -1 || expected == actual
}
