//! Storage and diagnostics reached through the facade crate.

use std::path::Path;

use nfs4xdr_acl::acl::inherit::trivial_acl;
use nfs4xdr_acl::logging::VerbosityConfig;
use nfs4xdr_acl::metadata::{MemoryStore, StoreConfig, get_acl, set_acl, sync_acl};

#[test]
fn memory_store_sync_through_facade() {
    let store = MemoryStore::new();
    store.add_directory("/parent", 0o755);
    store.add_directory("/copy", 0o700);
    let config = StoreConfig::default();

    let acl = trivial_acl(0o751, true).unwrap();
    set_acl(&store, &config, Path::new("/parent"), &acl).unwrap();
    sync_acl(&store, &config, Path::new("/parent"), Path::new("/copy")).unwrap();
    assert_eq!(get_acl(&store, &config, Path::new("/copy")).unwrap(), Some(acl));
}

#[test]
fn verbosity_directives_name_store_target() {
    let config = VerbosityConfig::from_verbose_level(1);
    assert_eq!(config.filter_directives(), "nfs4acl::store=debug");
}

#[cfg(all(unix, feature = "xattr"))]
#[test]
fn host_directory_synthesizes_through_facade() {
    use nfs4xdr_acl::metadata::XattrStore;
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o750)).unwrap();

    let config = StoreConfig {
        synthesize_from_mode: true,
        ..StoreConfig::default()
    };
    let acl = get_acl(&XattrStore::default(), &config, dir.path())
        .unwrap()
        .unwrap();
    assert!(acl.is_directory());
    assert_eq!(
        nfs4xdr_acl::acl::inherit::sync_mode_from_acl(&acl, 0),
        0o750
    );
}

#[cfg(feature = "tracing")]
#[test]
fn store_events_are_captured() {
    use nfs4xdr_acl::logging::{CaptureLayer, DebugFlag, drain_events};
    use tracing_subscriber::layer::SubscriberExt;

    let store = MemoryStore::new();
    store.add_file("/f", 0o640);
    let config = StoreConfig {
        synthesize_from_mode: true,
        ..StoreConfig::default()
    };

    drain_events();
    let subscriber = tracing_subscriber::registry()
        .with(CaptureLayer::new(VerbosityConfig::from_verbose_level(1)));
    tracing::subscriber::with_default(subscriber, || {
        get_acl(&store, &config, Path::new("/f")).unwrap();
    });

    let events = drain_events();
    let messages: Vec<&str> = events
        .iter()
        .filter(|event| event.flag == DebugFlag::Store)
        .map(|event| event.message.as_str())
        .collect();
    assert_eq!(messages, ["attribute_read", "acl_synthesized"]);
    assert_eq!(events[1].field("mode"), Some("640"));
}
