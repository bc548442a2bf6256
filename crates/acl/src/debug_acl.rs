//! Tracing for ACL list mutation and inheritance.
//!
//! Every function here is compiled behind the `tracing` feature flag and
//! collapses to an inline no-op when the feature is disabled, so callers can
//! trace unconditionally.
//!
//! # Examples
//!
//! ```rust,ignore
//! use acl::debug_acl::{trace_ace_inserted, trace_mode_synced};
//!
//! trace_ace_inserted(0, &ace, 1);
//! trace_mode_synced(0o754);
//! ```

use crate::Ace;

/// Target for list mutation and comparison events.
#[cfg(feature = "tracing")]
const ACL_TARGET: &str = "nfs4acl::acl";

/// Target for inheritance and mode synthesis events.
#[cfg(feature = "tracing")]
const INHERIT_TARGET: &str = "nfs4acl::inherit";

// ============================================================================
// List operations
// ============================================================================

/// Traces an entry being placed at `index`; `count` is the new length.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_ace_inserted(index: usize, ace: &Ace, count: usize) {
    tracing::trace!(
        target: ACL_TARGET,
        index = index,
        ace_type = ?ace.ace_type(),
        flags = ace.flags().as_raw(),
        mask = ace.mask().as_raw(),
        principal = %ace.principal(),
        count = count,
        "ace_inserted"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_ace_inserted(_index: usize, _ace: &Ace, _count: usize) {}

/// Traces an entry being removed from `index`; `count` is the new length.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_ace_removed(index: usize, ace: &Ace, count: usize) {
    tracing::trace!(
        target: ACL_TARGET,
        index = index,
        ace_type = ?ace.ace_type(),
        principal = %ace.principal(),
        count = count,
        "ace_removed"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_ace_removed(_index: usize, _ace: &Ace, _count: usize) {}

/// Traces the first differing entry found while comparing two ACLs.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_ace_mismatch(index: usize, left: &Ace, right: &Ace) {
    tracing::debug!(
        target: ACL_TARGET,
        index = index,
        left_type = ?left.ace_type(),
        right_type = ?right.ace_type(),
        left_flags = left.flags().as_raw(),
        right_flags = right.flags().as_raw(),
        left_mask = left.mask().as_raw(),
        right_mask = right.mask().as_raw(),
        left_principal = %left.principal(),
        right_principal = %right.principal(),
        "ace_mismatch"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_ace_mismatch(_index: usize, _left: &Ace, _right: &Ace) {}

/// Traces two ACLs differing in length.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_count_mismatch(left: usize, right: usize) {
    tracing::debug!(target: ACL_TARGET, left = left, right = right, "count_mismatch");
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_count_mismatch(_left: usize, _right: usize) {}

// ============================================================================
// Inheritance
// ============================================================================

/// Traces a parent entry that does not propagate to the child.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_inherit_skipped(index: usize, flags: u32, reason: &'static str) {
    tracing::trace!(
        target: INHERIT_TARGET,
        index = index,
        flags = flags,
        reason = reason,
        "inherit_skipped"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_inherit_skipped(_index: usize, _flags: u32, _reason: &'static str) {}

/// Traces a parent entry propagating with rewritten flags.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_inherit_entry(index: usize, parent_flags: u32, child_flags: u32, is_dir: bool) {
    tracing::trace!(
        target: INHERIT_TARGET,
        index = index,
        parent_flags = parent_flags,
        child_flags = child_flags,
        is_dir = is_dir,
        "inherit_entry"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_inherit_entry(_index: usize, _parent_flags: u32, _child_flags: u32, _is_dir: bool) {}

/// Traces the result of computing an inherited or mode-derived ACL.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_inherited_acl(mode: u32, skip_mode: bool, is_dir: bool, count: usize) {
    tracing::debug!(
        target: INHERIT_TARGET,
        mode = %format_args!("{mode:o}"),
        skip_mode = skip_mode,
        is_dir = is_dir,
        count = count,
        "inherited_acl"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_inherited_acl(_mode: u32, _skip_mode: bool, _is_dir: bool, _count: usize) {}

/// Traces the POSIX mode folded out of an ACL.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_mode_synced(mode: u32) {
    tracing::debug!(target: INHERIT_TARGET, mode = %format_args!("{mode:o}"), "mode_synced");
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_mode_synced(_mode: u32) {}
