//! crates/acl/src/error.rs
//!
//! Error types shared by the ACL model, codecs and inheritance engine.

use std::fmt;
use std::io;

use thiserror::Error;

/// Result type for ACL operations.
pub type AclResult<T> = Result<T, AclError>;

/// Errors produced while building, mutating, encoding or decoding ACLs.
#[derive(Debug, Error)]
pub enum AclError {
    /// Structurally malformed input, such as directory-only flags on a file ACE.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Positional access outside the ACL.
    #[error("index {index} out of range for ACL with {count} entries")]
    OutOfRange {
        /// Requested position.
        index: usize,
        /// Number of entries in the ACL at the time of the request.
        count: usize,
    },
    /// The referenced ACE is not part of the ACL.
    #[error("ACE not found in ACL")]
    NotFound,
    /// Wire payload length does not match `8 + 20 * n`.
    #[error("invalid ACL payload size: {len} bytes")]
    InvalidSize {
        /// Length of the rejected payload.
        len: usize,
    },
    /// Wire payload or ACL exceeds the maximum ACE count.
    #[error("ACL holds {count} entries, maximum is {max}")]
    TooLarge {
        /// Number of entries found or requested.
        count: usize,
        /// Largest accepted number of entries.
        max: usize,
    },
    /// Unknown special-who sentinel or an unresolvable user/group name.
    #[error("invalid principal: {0}")]
    InvalidPrincipal(String),
    /// Text or JSON grammar violation.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Aggregated JSON validation failures.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    /// I/O error while reading an ACL specification.
    #[error("I/O error: {0}")]
    Io(
        #[from]
        #[source]
        io::Error,
    ),
}

impl AclError {
    /// Convenience constructor for [`AclError::InvalidArgument`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

/// Grammar violation with an optional field location.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub struct ParseError {
    field: Option<String>,
    message: String,
}

impl ParseError {
    /// Creates a parse error without a field location.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a parse error located at `field`.
    pub fn at(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Returns the field the error is attached to, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Returns the human readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "malformed ACL: {field}: {}", self.message),
            None => write!(f, "malformed ACL: {}", self.message),
        }
    }
}

/// One JSON validation failure, keyed by a dotted field path such as `acl.1.perms`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending member.
    pub field: String,
    /// Description of the problem.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Ordered collection of [`ValidationError`] values gathered in one decode pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Error)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Records a failure for `field`.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationError::new(field, message));
    }

    /// Returns the number of recorded failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterates over the failures in the order they were recorded.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Converts into `Ok(())` when empty and `Err(self)` otherwise.
    pub fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ACL validation failed with {} error(s)", self.errors.len())?;
        for error in &self.errors {
            write!(f, "; {error}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
