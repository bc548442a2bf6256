//! crates/acl/src/ace.rs
//!
//! Access control entries and the principals they apply to.

use std::fmt;

use crate::error::{AclError, AclResult};
use crate::types::{AccessMask, AceFlags, AceType};

/// Who an ACE applies to.
///
/// Well-known principals carry no id; [`Principal::id`] reports `-1` for them.
/// Whether a [`Principal::Named`] id is a uid or a gid is decided by the
/// owning ACE's [`AceFlags::IDENTIFIER_GROUP`] bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Principal {
    /// The file owner (`owner@`).
    Owner,
    /// The owning group (`group@`).
    Group,
    /// Everybody (`everyone@`).
    Everyone,
    /// A specific user or group id.
    Named(i32),
}

impl Principal {
    /// Id reported for well-known principals.
    pub const SPECIAL_ID: i32 = -1;

    /// Returns the numeric id, or `-1` for well-known principals.
    #[must_use]
    pub const fn id(self) -> i32 {
        match self {
            Self::Named(id) => id,
            Self::Owner | Self::Group | Self::Everyone => Self::SPECIAL_ID,
        }
    }

    /// Returns true for `owner@`, `group@` and `everyone@`.
    #[must_use]
    pub const fn is_special(self) -> bool {
        !matches!(self, Self::Named(_))
    }

    /// Returns the canonical tag for well-known principals.
    #[must_use]
    pub const fn special_tag(self) -> Option<&'static str> {
        match self {
            Self::Owner => Some("owner@"),
            Self::Group => Some("group@"),
            Self::Everyone => Some("everyone@"),
            Self::Named(_) => None,
        }
    }

    const fn marker(self) -> u32 {
        match self {
            Self::Owner => AceFlags::OWNER,
            Self::Group => AceFlags::GROUP,
            Self::Everyone => AceFlags::EVERYONE,
            Self::Named(_) => 0,
        }
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.special_tag() {
            Some(tag) => f.write_str(tag),
            None => write!(f, "{}", self.id()),
        }
    }
}

/// A single NFSv4 Access Control Entry.
///
/// Entries are only built through [`Ace::new`], so every value upholds the
/// construction invariants: mask and flags are reduced to
/// [`AccessMask::MASK_ALL`] and [`AceFlags::ALL`],
/// file entries never carry `DELETE_CHILD` or directory-only flags, and the
/// principal marker bits agree with the principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ace {
    ace_type: AceType,
    flags: AceFlags,
    mask: AccessMask,
    principal: Principal,
}

impl Ace {
    /// Builds an entry for a directory (`is_directory`) or file ACL.
    ///
    /// # Errors
    ///
    /// - [`AclError::InvalidArgument`] if `is_directory` is false and `flags`
    ///   carries any of [`AceFlags::DIRECTORY_FLAGS`].
    /// - [`AclError::InvalidPrincipal`] for a negative named id.
    pub fn new(
        is_directory: bool,
        ace_type: AceType,
        flags: AceFlags,
        mask: AccessMask,
        principal: Principal,
    ) -> AclResult<Self> {
        if !is_directory && flags.contains(AceFlags::DIRECTORY_FLAGS) {
            return Err(AclError::InvalidArgument(format!(
                "flags 0x{:08x} are only valid on directories",
                flags.as_raw()
            )));
        }
        if let Principal::Named(id) = principal
            && id < 0
        {
            return Err(AclError::InvalidPrincipal(format!(
                "named principal requires a non-negative id, got {id}"
            )));
        }

        let mut mask = mask.as_raw() & AccessMask::MASK_ALL;
        if !is_directory {
            mask &= !AccessMask::DELETE_CHILD;
        }

        let mut flags = AceFlags::from_raw(flags.as_raw() & AceFlags::ALL)
            .without(AceFlags::PRINCIPAL_MARKERS);
        flags = match principal {
            Principal::Owner | Principal::Everyone => flags.without(AceFlags::IDENTIFIER_GROUP),
            Principal::Group => flags.with(AceFlags::IDENTIFIER_GROUP),
            Principal::Named(_) => flags,
        };
        flags = flags.with(principal.marker());

        Ok(Self {
            ace_type,
            flags,
            mask: AccessMask::from_raw(mask),
            principal,
        })
    }

    /// Type of ACE (allow/deny/audit/alarm).
    #[must_use]
    pub const fn ace_type(&self) -> AceType {
        self.ace_type
    }

    /// ACE flags (inheritance, audit, principal markers).
    #[must_use]
    pub const fn flags(&self) -> AceFlags {
        self.flags
    }

    /// Access mask (permissions).
    #[must_use]
    pub const fn mask(&self) -> AccessMask {
        self.mask
    }

    /// Principal the entry applies to.
    #[must_use]
    pub const fn principal(&self) -> Principal {
        self.principal
    }

    /// Returns true if a named principal is a group id.
    #[must_use]
    pub const fn is_group(&self) -> bool {
        self.flags.contains(AceFlags::IDENTIFIER_GROUP)
    }

    /// Returns true if the entry may live in an ACL of the given kind.
    #[must_use]
    pub const fn fits(&self, is_directory: bool) -> bool {
        is_directory
            || !(self.flags.contains(AceFlags::DIRECTORY_FLAGS)
                || self.mask.contains(AccessMask::DELETE_CHILD))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allow(is_dir: bool, flags: u32, mask: u32, who: Principal) -> AclResult<Ace> {
        Ace::new(
            is_dir,
            AceType::Allow,
            AceFlags::from_raw(flags),
            AccessMask::from_raw(mask),
            who,
        )
    }

    #[test]
    fn mask_is_reduced_to_defined_bits() {
        let ace = allow(true, 0, 0xFFFF_FFFF, Principal::Everyone).unwrap();
        assert_eq!(ace.mask().as_raw(), AccessMask::MASK_ALL);
    }

    #[test]
    fn file_entries_drop_delete_child() {
        let ace = allow(
            false,
            0,
            AccessMask::DELETE_CHILD | AccessMask::READ_DATA,
            Principal::Owner,
        )
        .unwrap();
        assert_eq!(ace.mask().as_raw(), AccessMask::READ_DATA);
        assert!(ace.fits(false));
    }

    #[test]
    fn file_entries_reject_directory_flags() {
        for flag in [
            AceFlags::FILE_INHERIT,
            AceFlags::DIRECTORY_INHERIT,
            AceFlags::NO_PROPAGATE_INHERIT,
            AceFlags::INHERIT_ONLY,
        ] {
            let err = allow(false, flag, AccessMask::READ_DATA, Principal::Owner).unwrap_err();
            assert!(matches!(err, AclError::InvalidArgument(_)), "{flag:#x}");
        }
    }

    #[test]
    fn directory_entries_keep_inheritance() {
        let ace = allow(
            true,
            AceFlags::FILE_INHERIT | AceFlags::DIRECTORY_INHERIT,
            AccessMask::DELETE_CHILD,
            Principal::Named(1000),
        )
        .unwrap();
        assert!(ace.flags().contains(AceFlags::FILE_INHERIT));
        assert!(ace.mask().contains(AccessMask::DELETE_CHILD));
        assert!(!ace.fits(false));
    }

    #[test]
    fn undefined_flag_bits_are_dropped() {
        let ace = allow(true, 0x8000_0100 | AceFlags::INHERITED, 0, Principal::Everyone).unwrap();
        assert_eq!(
            ace.flags().as_raw(),
            AceFlags::INHERITED | AceFlags::EVERYONE
        );
    }

    #[test]
    fn negative_named_id_is_rejected() {
        let err = allow(true, 0, AccessMask::READ_DATA, Principal::Named(-5)).unwrap_err();
        assert!(matches!(err, AclError::InvalidPrincipal(_)));
    }

    #[test]
    fn principal_markers_follow_principal() {
        let owner = allow(true, AceFlags::EVERYONE | AceFlags::IDENTIFIER_GROUP, 0, Principal::Owner)
            .unwrap();
        assert_eq!(owner.flags().as_raw(), AceFlags::OWNER);

        let group = allow(true, 0, 0, Principal::Group).unwrap();
        assert_eq!(
            group.flags().as_raw(),
            AceFlags::GROUP | AceFlags::IDENTIFIER_GROUP
        );
        assert!(group.is_group());

        let named = allow(true, AceFlags::IDENTIFIER_GROUP | AceFlags::OWNER, 0, Principal::Named(7))
            .unwrap();
        assert_eq!(named.flags().as_raw(), AceFlags::IDENTIFIER_GROUP);
    }

    #[test]
    fn principal_ids() {
        assert_eq!(Principal::Owner.id(), -1);
        assert_eq!(Principal::Everyone.id(), -1);
        assert_eq!(Principal::Named(42).id(), 42);
        assert!(Principal::Group.is_special());
        assert_eq!(Principal::Group.to_string(), "group@");
        assert_eq!(Principal::Named(3).to_string(), "3");
    }
}
