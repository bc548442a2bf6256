//! Integration tests for recording `nfs4acl::*` events through the capture layer.
#![cfg(feature = "tracing")]

use logging::{CaptureLayer, DebugFlag, VerbosityConfig, drain_events};
use tracing_subscriber::layer::SubscriberExt;

fn capture<F: FnOnce()>(config: VerbosityConfig, body: F) -> Vec<logging::DiagnosticEvent> {
    drain_events();
    let subscriber = tracing_subscriber::registry().with(CaptureLayer::new(config));
    tracing::subscriber::with_default(subscriber, body);
    drain_events()
}

#[test]
fn records_event_when_level_sufficient() {
    let mut config = VerbosityConfig::default();
    config.debug.xdr = 2;

    let events = capture(config, || {
        tracing::debug!(target: "nfs4acl::xdr", len = 28_usize, count = 1_usize, "xdr_decoded");
    });

    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.flag, DebugFlag::Xdr);
    assert_eq!(event.level, 2);
    assert_eq!(event.message, "xdr_decoded");
    assert_eq!(event.field("len"), Some("28"));
    assert_eq!(event.field("count"), Some("1"));
    assert_eq!(event.field("missing"), None);
}

#[test]
fn suppresses_event_when_level_insufficient() {
    let mut config = VerbosityConfig::default();
    config.debug.json = 2;

    let events = capture(config, || {
        tracing::trace!(target: "nfs4acl::json", "json_encoded");
    });

    assert!(events.is_empty());
}

#[test]
fn ignores_foreign_targets() {
    let mut config = VerbosityConfig::default();
    config.debug.set_all(3);

    let events = capture(config, || {
        tracing::error!(target: "hyper::proto", "unrelated");
        tracing::error!(target: "other_crate::acl", "same suffix, different crate");
        tracing::info!(target: "nfs4acl::store", path = "/tmp/x", "attribute_read");
    });

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].flag, DebugFlag::Store);
    assert_eq!(events[0].level, 1);
    assert_eq!(events[0].field("path"), Some("/tmp/x"));
}

#[test]
fn verbose_level_drives_capture() {
    let events = capture(VerbosityConfig::from_verbose_level(1), || {
        tracing::debug!(target: "nfs4acl::store", "attribute_written");
        tracing::debug!(target: "nfs4acl::acl", "entry_inserted");
    });

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].flag, DebugFlag::Store);
}

#[test]
fn events_are_drained_once() {
    let mut config = VerbosityConfig::default();
    config.debug.text = 1;

    let events = capture(config, || {
        tracing::warn!(target: "nfs4acl::text", "spec_parsed");
    });
    assert_eq!(events.len(), 1);
    assert!(drain_events().is_empty());
}
