//! Integration tests combining the codecs with attribute stores.

use std::path::Path;

use acl::{AclError, NumericIdMapper, StaticIdMapper};
use codec::text::{format_acl, parse_acl};
use codec::TextOptions;
use metadata::{
    AttributeStore, MemoryStore, StoreConfig, get_acl, is_trivial, set_acl, sync_acl,
};

#[test]
fn text_spec_survives_storage() {
    let mapper = StaticIdMapper::new().with_user("alice", 1000).with_group("staff", 50);
    let spec = "user:alice:rwpDxaAcs:fd:allow\ngroup:staff:w::deny\neveryone@:rac::allow\n";
    let acl = parse_acl(spec, true, &mapper).unwrap();

    let store = MemoryStore::new();
    store.add_directory("/share", 0o770);
    let config = StoreConfig::default();
    set_acl(&store, &config, Path::new("/share"), &acl).unwrap();

    let back = get_acl(&store, &config, Path::new("/share")).unwrap().unwrap();
    assert_eq!(back, acl);
    assert_eq!(
        format_acl(&back, TextOptions::empty(), &mapper),
        format_acl(&acl, TextOptions::empty(), &mapper)
    );
    assert!(!is_trivial(&store, &config, Path::new("/share")).unwrap());
}

#[test]
fn synthesized_acl_matches_mode_and_is_trivial() {
    let store = MemoryStore::new();
    store.add_file("/etc/motd", 0o644);
    let config = StoreConfig {
        synthesize_from_mode: true,
        ..StoreConfig::default()
    };

    let acl = get_acl(&store, &config, Path::new("/etc/motd")).unwrap().unwrap();
    assert_eq!(acl::inherit::sync_mode_from_acl(&acl, 0), 0o644);
    assert!(is_trivial(&store, &config, Path::new("/etc/motd")).unwrap());
    assert_eq!(store.attribute_count(Path::new("/etc/motd")), Some(0));
}

#[test]
fn oversized_acl_is_not_written() {
    let mut acl = acl::Acl::new(false);
    let entries: String = (0..129).map(|id| format!("user:{id}:r::allow\n")).collect();
    for ace in codec::text::parse_aces(&entries, false, &NumericIdMapper).unwrap() {
        acl.append(ace).unwrap();
    }

    let store = MemoryStore::new();
    store.add_file("/big", 0o600);
    let err = set_acl(&store, &StoreConfig::default(), Path::new("/big"), &acl).unwrap_err();
    assert_eq!(err.context(), "encode NFSv4 ACL");
    assert!(matches!(
        err.acl_error(),
        Some(AclError::TooLarge { count: 129, max: 128 })
    ));
    assert_eq!(store.attribute_count(Path::new("/big")), Some(0));
}

#[test]
fn sync_reports_missing_destination() {
    let store = MemoryStore::new();
    store.add_file("/src", 0o600);
    let config = StoreConfig {
        synthesize_from_mode: true,
        ..StoreConfig::default()
    };
    let err = sync_acl(&store, &config, Path::new("/src"), Path::new("/dst")).unwrap_err();
    assert_eq!(err.path(), Path::new("/dst"));
    assert!(store.read_attribute(Path::new("/src"), config.attribute_name()).unwrap().is_none());
}

#[cfg(all(unix, feature = "xattr"))]
mod host {
    use super::*;
    use metadata::XattrStore;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn host_file_without_payload_synthesizes() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain");
        fs::write(&file, b"x").unwrap();
        fs::set_permissions(&file, fs::Permissions::from_mode(0o640)).unwrap();

        let store = XattrStore::default();
        let config = StoreConfig {
            synthesize_from_mode: true,
            ..StoreConfig::default()
        };
        let acl = get_acl(&store, &config, &file).unwrap().unwrap();
        assert!(!acl.is_directory());
        assert_eq!(acl::inherit::sync_mode_from_acl(&acl, 0), 0o640);

        let plain = StoreConfig::default();
        assert_eq!(get_acl(&store, &plain, &file).unwrap(), None);
    }

    #[test]
    fn host_write_either_round_trips_or_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let store = XattrStore::default();
        let config = StoreConfig::default();
        let acl = acl::inherit::trivial_acl(0o755, true).unwrap();

        match set_acl(&store, &config, dir.path(), &acl) {
            Ok(()) => {
                assert_eq!(get_acl(&store, &config, dir.path()).unwrap(), Some(acl));
            }
            Err(err) => {
                assert_eq!(err.context(), "write NFSv4 ACL");
                assert_eq!(err.path(), dir.path());
                assert!(err.acl_error().is_none());
            }
        }
    }
}
