//! crates/metadata/src/debug_store.rs
//!
//! Tracing for attribute reads, writes and mode synthesis on the
//! `nfs4acl::store` target. Without the `tracing` feature every function is
//! an inline no-op.

use std::path::Path;

#[cfg(feature = "tracing")]
const STORE_TARGET: &str = "nfs4acl::store";

// ============================================================================
// Attribute I/O
// ============================================================================

/// Traces an attribute read; `len` is `None` when no payload exists.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_attribute_read(path: &Path, name: &str, len: Option<usize>) {
    tracing::debug!(
        target: STORE_TARGET,
        path = %path.display(),
        name = name,
        len = ?len,
        "attribute_read"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_attribute_read(_path: &Path, _name: &str, _len: Option<usize>) {}

/// Traces a payload being written.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_attribute_written(path: &Path, name: &str, len: usize) {
    tracing::debug!(
        target: STORE_TARGET,
        path = %path.display(),
        name = name,
        len = len,
        "attribute_written"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_attribute_written(_path: &Path, _name: &str, _len: usize) {}

/// Traces a payload being removed.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_attribute_removed(path: &Path, name: &str) {
    tracing::debug!(
        target: STORE_TARGET,
        path = %path.display(),
        name = name,
        "attribute_removed"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_attribute_removed(_path: &Path, _name: &str) {}

// ============================================================================
// Synthesis
// ============================================================================

/// Traces a trivial ACL built from `mode` because no payload was stored.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_acl_synthesized(path: &Path, mode: u32, is_directory: bool) {
    tracing::debug!(
        target: STORE_TARGET,
        path = %path.display(),
        mode = %format_args!("{mode:o}"),
        is_directory = is_directory,
        "acl_synthesized"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_acl_synthesized(_path: &Path, _mode: u32, _is_directory: bool) {}
