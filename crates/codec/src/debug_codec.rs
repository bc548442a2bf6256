//! Tracing for the XDR, text and JSON codecs.
//!
//! Each function emits a `tracing` event when the `tracing` feature is on and
//! compiles to an empty inline body otherwise.

#[cfg(feature = "tracing")]
const XDR_TARGET: &str = "nfs4acl::xdr";

#[cfg(feature = "tracing")]
const TEXT_TARGET: &str = "nfs4acl::text";

#[cfg(feature = "tracing")]
const JSON_TARGET: &str = "nfs4acl::json";

// ============================================================================
// XDR
// ============================================================================

/// Traces a successfully decoded payload.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_xdr_decoded(len: usize, count: usize, is_directory: bool) {
    tracing::debug!(
        target: XDR_TARGET,
        len = len,
        count = count,
        is_directory = is_directory,
        "xdr_decoded"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_xdr_decoded(_len: usize, _count: usize, _is_directory: bool) {}

/// Traces an encoded payload.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_xdr_encoded(count: usize, len: usize) {
    tracing::debug!(target: XDR_TARGET, count = count, len = len, "xdr_encoded");
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_xdr_encoded(_count: usize, _len: usize) {}

/// Traces a payload rejected before any entry was decoded.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_xdr_rejected(len: usize, reason: &'static str) {
    tracing::debug!(target: XDR_TARGET, len = len, reason = reason, "xdr_rejected");
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_xdr_rejected(_len: usize, _reason: &'static str) {}

// ============================================================================
// Text
// ============================================================================

/// Traces a parsed ACE line.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_text_parsed(line: &str, compact_perms: bool, compact_flags: bool) {
    tracing::trace!(
        target: TEXT_TARGET,
        line = line,
        compact_perms = compact_perms,
        compact_flags = compact_flags,
        "ace_parsed"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_text_parsed(_line: &str, _compact_perms: bool, _compact_flags: bool) {}

/// Traces the outcome of a multi-entry specification.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_text_spec(tokens: usize, aces: usize) {
    tracing::debug!(target: TEXT_TARGET, tokens = tokens, aces = aces, "spec_parsed");
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_text_spec(_tokens: usize, _aces: usize) {}

// ============================================================================
// JSON
// ============================================================================

/// Traces a JSON decode; `errors` is the number of validation failures.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_json_decoded(aces: usize, errors: usize) {
    tracing::debug!(target: JSON_TARGET, aces = aces, errors = errors, "json_decoded");
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_json_decoded(_aces: usize, _errors: usize) {}

/// Traces a JSON encode.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_json_encoded(aces: usize, verbose: bool) {
    tracing::trace!(target: JSON_TARGET, aces = aces, verbose = verbose, "json_encoded");
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_json_encoded(_aces: usize, _verbose: bool) {}
