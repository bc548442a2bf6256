//! crates/metadata/src/error.rs
//!
//! Every failure from this crate is a [`MetadataError`]: the operation that
//! failed, the path it touched, and an [`ErrorSource`] telling store and
//! filesystem faults ([`ErrorSource::Io`]) apart from payloads or ACLs the
//! model refused ([`ErrorSource::Acl`]).

use std::io;
use std::path::{Path, PathBuf};

use acl::AclError;
use thiserror::Error;

/// Error produced when reading or applying a stored ACL fails.
#[derive(Debug, Error)]
#[error("failed to {context} '{}': {source}", path.display())]
pub struct MetadataError {
    context: &'static str,
    path: PathBuf,
    #[source]
    source: ErrorSource,
}

/// Underlying cause of a [`MetadataError`].
#[derive(Debug, Error)]
pub enum ErrorSource {
    /// The attribute store or the filesystem failed.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The stored payload or the supplied ACL was rejected.
    #[error(transparent)]
    Acl(#[from] AclError),
}

impl MetadataError {
    /// Creates a new [`MetadataError`] from the supplied context, path, and source error.
    pub(crate) fn new(context: &'static str, path: &Path, source: impl Into<ErrorSource>) -> Self {
        Self {
            context,
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    /// Returns the operation being performed when the error occurred.
    #[must_use]
    pub const fn context(&self) -> &'static str {
        self.context
    }

    /// Returns the path involved in the failing operation.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the underlying cause.
    #[must_use]
    pub const fn source_error(&self) -> &ErrorSource {
        &self.source
    }

    /// Returns the ACL error, if the failure came from the codec or model.
    #[must_use]
    pub const fn acl_error(&self) -> Option<&AclError> {
        match &self.source {
            ErrorSource::Acl(error) => Some(error),
            ErrorSource::Io(_) => None,
        }
    }

    /// Consumes the error and returns its constituent parts.
    #[must_use]
    pub fn into_parts(self) -> (&'static str, PathBuf, ErrorSource) {
        (self.context, self.path, self.source)
    }
}
