use crate::config::LimitsConfig;
use crate::tree::NodeType;
use crate::tree::ZNodeDb;
use crate::RequestError;

fn db() -> ZNodeDb {
    ZNodeDb::new(LimitsConfig::default())
}

#[test]
fn test_create_then_get() {
    let db = db();
    let view = db
        .create("client-1", "/zoo", b"Secrets hahahahaha!!".to_vec(), false, false)
        .unwrap();
    assert_eq!(view.path, "/zoo");
    assert_eq!(view.name, "zoo");
    assert_eq!(view.version, 0);
    assert_eq!(view.node_type, NodeType::Standard);

    let got = db.get("/zoo").unwrap().unwrap();
    assert_eq!(got.data, b"Secrets hahahahaha!!".to_vec());
    assert_eq!(got.version, 0);
}

#[test]
fn test_create_nested_under_existing_parent() {
    let db = db();
    db.create("client-1", "/zoo", vec![], false, false).unwrap();
    let view = db
        .create("client-1", "/zoo/giraffe", b"More secrets".to_vec(), false, false)
        .unwrap();
    assert_eq!(view.path, "/zoo/giraffe");
    assert_eq!(view.name, "giraffe");

    let parent = db.get("/zoo").unwrap().unwrap();
    assert_eq!(parent.children, vec!["giraffe".to_string()]);
}

#[test]
fn test_create_fails_when_ancestor_missing() {
    let db = db();
    let err = db
        .create("client-1", "/zoo/giraffe", vec![], false, false)
        .unwrap_err();
    assert!(matches!(err, RequestError::ParentMissing(_)));
}

#[test]
fn test_create_fails_under_ephemeral_parent() {
    let db = db();
    db.create("client-1", "/zoo", vec![], true, false).unwrap();
    let err = db
        .create("client-1", "/zoo/giraffe", vec![], false, false)
        .unwrap_err();
    assert_eq!(err, RequestError::EphemeralParent);
}

#[test]
fn test_create_fails_on_existing_name() {
    let db = db();
    db.create("client-1", "/zoo", vec![], false, false).unwrap();
    let err = db.create("client-2", "/zoo", vec![], false, false).unwrap_err();
    assert!(matches!(err, RequestError::AlreadyExists { .. }));
}

#[test]
fn test_sequential_names_skip_plain_creates() {
    let db = db();
    db.create("c", "/p", vec![], false, false).unwrap();

    let first = db.create("c", "/p/x", vec![], false, true).unwrap();
    assert_eq!(first.path, "/p/x_0");

    let plain = db.create("c", "/p/y", vec![], false, false).unwrap();
    assert_eq!(plain.path, "/p/y");

    let second = db.create("c", "/p/z", vec![], false, true).unwrap();
    assert_eq!(second.path, "/p/z_1");
}

#[test]
fn test_sequential_counter_survives_failed_create() {
    let db = db();
    db.create("c", "/p", vec![], false, false).unwrap();
    db.create("c", "/p/x", vec![], false, true).unwrap();

    // A failed plain create must not disturb the counter.
    db.create("c", "/p/x_0", vec![], false, false).unwrap_err();

    let next = db.create("c", "/p/x", vec![], false, true).unwrap();
    assert_eq!(next.path, "/p/x_1");
}

#[test]
fn test_set_data_bumps_version() {
    let db = db();
    db.create("c", "/zoo", b"one".to_vec(), false, false).unwrap();

    let version = db.set_data("/zoo", b"two".to_vec(), 0).unwrap();
    assert_eq!(version, 1);

    let view = db.get("/zoo").unwrap().unwrap();
    assert_eq!(view.data, b"two".to_vec());
    assert_eq!(view.version, 1);
}

#[test]
fn test_set_data_rejects_wrong_version() {
    let db = db();
    db.create("c", "/zoo", vec![], false, false).unwrap();
    let err = db.set_data("/zoo", vec![], 7).unwrap_err();
    assert_eq!(
        err,
        RequestError::BadVersion {
            expected: 7,
            actual: 0
        }
    );
}

#[test]
fn test_set_data_skips_check_with_minus_one() {
    let db = db();
    db.create("c", "/zoo", vec![], false, false).unwrap();
    db.set_data("/zoo", b"a".to_vec(), -1).unwrap();
    db.set_data("/zoo", b"b".to_vec(), -1).unwrap();
    assert_eq!(db.get("/zoo").unwrap().unwrap().version, 2);
}

#[test]
fn test_set_data_on_missing_node() {
    let db = db();
    let err = db.set_data("/ghost", vec![], -1).unwrap_err();
    assert!(matches!(err, RequestError::NoNode(_)));
}

#[test]
fn test_delete_is_idempotent_on_missing_target() {
    let db = db();
    db.create("c", "/zoo", vec![], false, false).unwrap();
    assert!(db.delete("/zoo/ghost", -1).unwrap().is_none());
}

#[test]
fn test_delete_fails_when_ancestor_missing() {
    let db = db();
    let err = db.delete("/zoo/ghost", -1).unwrap_err();
    assert!(matches!(err, RequestError::ParentMissing(_)));
}

#[test]
fn test_delete_rejects_internal_node() {
    let db = db();
    db.create("c", "/zoo", vec![], false, false).unwrap();
    db.create("c", "/zoo/giraffe", vec![], false, false).unwrap();
    let err = db.delete("/zoo", -1).unwrap_err();
    assert!(matches!(err, RequestError::HasChildren(_)));
}

#[test]
fn test_delete_checks_version() {
    let db = db();
    db.create("c", "/zoo", vec![], false, false).unwrap();
    db.set_data("/zoo", b"x".to_vec(), 0).unwrap();

    let err = db.delete("/zoo", 0).unwrap_err();
    assert!(matches!(err, RequestError::BadVersion { .. }));

    let removed = db.delete("/zoo", 1).unwrap().unwrap();
    assert_eq!(removed.path, "/zoo");
    assert!(db.get("/zoo").unwrap().is_none());
}

#[test]
fn test_delete_returns_creator_for_ephemeral_cleanup() {
    let db = db();
    db.create("c", "/zoo", vec![], false, false).unwrap();
    db.create("owner-42", "/zoo/giraffe", vec![], true, false).unwrap();

    let removed = db.delete("/zoo/giraffe", 0).unwrap().unwrap();
    assert!(removed.is_ephemeral());
    assert_eq!(removed.creator, "owner-42");
}

#[test]
fn test_get_children_snapshot() {
    let db = db();
    db.create("c", "/zoo", vec![], false, false).unwrap();
    db.create("c", "/zoo/a", vec![], false, false).unwrap();
    db.create("c", "/zoo/b", vec![], false, false).unwrap();

    let mut children = db.get_children("/zoo").unwrap().unwrap();
    children.sort();
    assert_eq!(children, vec!["a".to_string(), "b".to_string()]);

    assert!(db.get_children("/ghost").unwrap().is_none());
}

#[test]
fn test_create_rejects_oversized_data() {
    let limits = LimitsConfig {
        max_data_bytes: 8,
        ..LimitsConfig::default()
    };
    let db = ZNodeDb::new(limits);
    let err = db
        .create("c", "/zoo", vec![0; 9], false, false)
        .unwrap_err();
    assert!(matches!(err, RequestError::DataTooLarge { .. }));
}

#[test]
fn test_depth_limit_enforced() {
    let limits = LimitsConfig {
        max_path_depth: 2,
        ..LimitsConfig::default()
    };
    let db = ZNodeDb::new(limits);
    let err = db.get("/a/b/c").unwrap_err();
    assert!(matches!(err, RequestError::InvalidPath(_)));
}
