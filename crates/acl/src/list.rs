//! crates/acl/src/list.rs
//!
//! The ordered ACE list and its positional operations.

use crate::Ace;
use crate::debug_acl::{
    trace_ace_inserted, trace_ace_mismatch, trace_ace_removed, trace_count_mismatch,
};
use crate::error::{AclError, AclResult};
use crate::types::AclFlags;

/// Largest number of entries the wire format can carry.
pub const ACL_MAX_ACES: usize = 128;

/// An NFSv4 Access Control List.
///
/// Entries are kept in evaluation order. The directory/file kind is fixed at
/// construction and every inserted entry must [`fit`](Ace::fits) it.
///
/// Equality compares the entry sequence only; ACL flags and the kind are not
/// part of it.
///
/// ```
/// use acl::{AccessMask, Ace, AceFlags, AceType, Acl, Principal};
///
/// let mut acl = Acl::new(false);
/// let ace = Ace::new(
///     false,
///     AceType::Allow,
///     AceFlags::default(),
///     AccessMask::from_raw(AccessMask::READ_SET),
///     Principal::Everyone,
/// )?;
/// acl.append(ace)?;
/// assert_eq!(acl.len(), 1);
/// assert_eq!(acl.get_at(0)?, &ace);
/// # Ok::<(), acl::AclError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Acl {
    aces: Vec<Ace>,
    flags: AclFlags,
    is_directory: bool,
}

impl Acl {
    /// Creates an empty ACL for a directory or a file.
    #[must_use]
    pub const fn new(is_directory: bool) -> Self {
        Self {
            aces: Vec::new(),
            flags: AclFlags::from_raw(0),
            is_directory,
        }
    }

    /// Returns true if the ACL belongs to a directory.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        self.is_directory
    }

    /// ACL-wide flags.
    #[must_use]
    pub const fn flags(&self) -> AclFlags {
        self.flags
    }

    /// Replaces the ACL-wide flags.
    pub fn set_flags(&mut self, flags: AclFlags) {
        self.flags = flags;
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.aces.len()
    }

    /// Returns true if the ACL has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aces.is_empty()
    }

    /// Iterates over the entries in evaluation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Ace> {
        self.aces.iter()
    }

    /// Entries as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Ace] {
        &self.aces
    }

    /// Returns the entry at `index`.
    pub fn get_at(&self, index: usize) -> AclResult<&Ace> {
        self.aces.get(index).ok_or(AclError::OutOfRange {
            index,
            count: self.aces.len(),
        })
    }

    /// Inserts `ace` so that it ends up at `index`, shifting later entries.
    ///
    /// # Errors
    ///
    /// - [`AclError::OutOfRange`] if `index > len()`.
    /// - [`AclError::InvalidArgument`] if a file ACL is given an entry with
    ///   directory-only flags or `DELETE_CHILD`.
    pub fn insert_at(&mut self, ace: Ace, index: usize) -> AclResult<()> {
        if index > self.aces.len() {
            return Err(AclError::OutOfRange {
                index,
                count: self.aces.len(),
            });
        }
        self.check_fits(&ace)?;
        self.aces.insert(index, ace);
        trace_ace_inserted(index, &ace, self.aces.len());
        Ok(())
    }

    /// Appends `ace` after the last entry.
    pub fn append(&mut self, ace: Ace) -> AclResult<()> {
        self.insert_at(ace, self.aces.len())
    }

    /// Inserts `ace` before the first entry.
    pub fn prepend(&mut self, ace: Ace) -> AclResult<()> {
        self.insert_at(ace, 0)
    }

    /// Removes and returns the entry at `index`.
    pub fn remove_at(&mut self, index: usize) -> AclResult<Ace> {
        if index >= self.aces.len() {
            return Err(AclError::OutOfRange {
                index,
                count: self.aces.len(),
            });
        }
        let ace = self.aces.remove(index);
        trace_ace_removed(index, &ace, self.aces.len());
        Ok(ace)
    }

    /// Removes the first entry equal to `ace`.
    pub fn remove(&mut self, ace: &Ace) -> AclResult<Ace> {
        let index = self.position(ace).ok_or(AclError::NotFound)?;
        self.remove_at(index)
    }

    /// Replaces the first entry equal to `old` with `new`, keeping its position.
    ///
    /// `new` is inserted directly after `old` before `old` is removed, so
    /// every other entry keeps its relative order.
    pub fn replace(&mut self, old: &Ace, new: Ace) -> AclResult<()> {
        let index = self.position(old).ok_or(AclError::NotFound)?;
        self.insert_at(new, index + 1)?;
        self.remove_at(index)?;
        Ok(())
    }

    /// Replaces every entry equal to `from` with `to`; returns how many changed.
    pub fn replace_matching(&mut self, from: &Ace, to: &Ace) -> AclResult<usize> {
        self.check_fits(to)?;
        let mut replaced = 0;
        for slot in self.aces.iter_mut().filter(|slot| *slot == from) {
            *slot = *to;
            replaced += 1;
        }
        Ok(replaced)
    }

    /// Removes every entry equal to any of `targets`; returns how many went.
    pub fn remove_matching(&mut self, targets: &[Ace]) -> usize {
        let before = self.aces.len();
        self.aces.retain(|ace| !targets.contains(ace));
        before - self.aces.len()
    }

    /// Returns the position of the first entry equal to `ace`.
    #[must_use]
    pub fn position(&self, ace: &Ace) -> Option<usize> {
        self.aces.iter().position(|candidate| candidate == ace)
    }

    /// Compares entry sequences, reporting the first difference to tracing.
    #[must_use]
    pub fn aces_eq(&self, other: &Self) -> bool {
        if self.aces.len() != other.aces.len() {
            trace_count_mismatch(self.aces.len(), other.aces.len());
            return false;
        }
        for (index, (left, right)) in self.aces.iter().zip(&other.aces).enumerate() {
            if left != right {
                trace_ace_mismatch(index, left, right);
                return false;
            }
        }
        true
    }

    fn check_fits(&self, ace: &Ace) -> AclResult<()> {
        if ace.fits(self.is_directory) {
            Ok(())
        } else {
            Err(AclError::InvalidArgument(format!(
                "ACE with flags 0x{:08x} and mask 0x{:08x} is only valid on directories",
                ace.flags().as_raw(),
                ace.mask().as_raw()
            )))
        }
    }
}

impl PartialEq for Acl {
    fn eq(&self, other: &Self) -> bool {
        self.aces_eq(other)
    }
}

impl Eq for Acl {}

impl<'a> IntoIterator for &'a Acl {
    type Item = &'a Ace;
    type IntoIter = std::slice::Iter<'a, Ace>;

    fn into_iter(self) -> Self::IntoIter {
        self.aces.iter()
    }
}
