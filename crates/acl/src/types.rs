//! crates/acl/src/types.rs
//!
//! ACE type, ACE flag, access mask and ACL flag values.
//!
//! All bitsets are thin newtypes over `u32` whose associated constants are the
//! raw NFSv4 values, so they can be combined with `|` before being wrapped:
//!
//! ```
//! use acl::{AccessMask, AceFlags};
//!
//! let flags = AceFlags::from_raw(AceFlags::FILE_INHERIT | AceFlags::DIRECTORY_INHERIT);
//! assert!(flags.contains(AceFlags::FILE_INHERIT));
//! assert!(!AccessMask::from_raw(AccessMask::READ_SET).contains(AccessMask::WRITE_DATA));
//! ```

use std::fmt;

use crate::error::AclError;

/// NFSv4 ACE type values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum AceType {
    /// Access allowed.
    Allow = 0,
    /// Access denied.
    Deny = 1,
    /// Audit (log access attempts).
    Audit = 2,
    /// Alarm (trigger alarm on access).
    Alarm = 3,
}

impl AceType {
    /// All ACE types in wire order.
    pub const ALL: [Self; 4] = [Self::Allow, Self::Deny, Self::Audit, Self::Alarm];

    /// Returns the wire value.
    #[must_use]
    pub const fn as_raw(self) -> u32 {
        self as u32
    }

    /// Returns true for the access-controlling types (allow and deny).
    #[must_use]
    pub const fn is_access(self) -> bool {
        matches!(self, Self::Allow | Self::Deny)
    }
}

impl TryFrom<u32> for AceType {
    type Error = AclError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Allow),
            1 => Ok(Self::Deny),
            2 => Ok(Self::Audit),
            3 => Ok(Self::Alarm),
            _ => Err(AclError::InvalidArgument(format!(
                "invalid NFSv4 ACE type: {value}"
            ))),
        }
    }
}

/// NFSv4 ACE flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AceFlags(u32);

impl AceFlags {
    /// ACE applies to files in this directory.
    pub const FILE_INHERIT: u32 = 0x0001;
    /// ACE applies to subdirectories.
    pub const DIRECTORY_INHERIT: u32 = 0x0002;
    /// Don't propagate inheritance to children of children.
    pub const NO_PROPAGATE_INHERIT: u32 = 0x0004;
    /// ACE is for inheritance only, doesn't apply to this object.
    pub const INHERIT_ONLY: u32 = 0x0008;
    /// Audit successful accesses.
    pub const SUCCESSFUL_ACCESS: u32 = 0x0010;
    /// Audit failed accesses.
    pub const FAILED_ACCESS: u32 = 0x0020;
    /// Principal is a group.
    pub const IDENTIFIER_GROUP: u32 = 0x0040;
    /// ACE was inherited from parent.
    pub const INHERITED: u32 = 0x0080;
    /// Marker for the `owner@` principal.
    pub const OWNER: u32 = 0x1000;
    /// Marker for the `group@` principal.
    pub const GROUP: u32 = 0x2000;
    /// Marker for the `everyone@` principal.
    pub const EVERYONE: u32 = 0x4000;

    /// Flags that only make sense on directory ACEs.
    pub const DIRECTORY_FLAGS: u32 = Self::FILE_INHERIT
        | Self::DIRECTORY_INHERIT
        | Self::NO_PROPAGATE_INHERIT
        | Self::INHERIT_ONLY;
    /// Well-known principal markers.
    pub const PRINCIPAL_MARKERS: u32 = Self::OWNER | Self::GROUP | Self::EVERYONE;
    /// Flags shown in the text and JSON grammars.
    pub const DISPLAYED: u32 = Self::DIRECTORY_FLAGS
        | Self::SUCCESSFUL_ACCESS
        | Self::FAILED_ACCESS
        | Self::INHERITED;
    /// Every defined ACE flag.
    pub const ALL: u32 = Self::DISPLAYED | Self::IDENTIFIER_GROUP | Self::PRINCIPAL_MARKERS;

    /// Creates flags from raw value.
    #[must_use]
    pub const fn from_raw(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw flags value.
    #[must_use]
    pub const fn as_raw(self) -> u32 {
        self.0
    }

    /// Checks if any bit of `flag` is set.
    #[must_use]
    pub const fn contains(self, flag: u32) -> bool {
        (self.0 & flag) != 0
    }

    /// Returns a copy with `flag` set.
    #[must_use]
    pub const fn with(self, flag: u32) -> Self {
        Self(self.0 | flag)
    }

    /// Returns a copy with `flag` cleared.
    #[must_use]
    pub const fn without(self, flag: u32) -> Self {
        Self(self.0 & !flag)
    }
}

impl fmt::LowerHex for AceFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

/// NFSv4 access mask (permission bits).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AccessMask(u32);

impl AccessMask {
    /// Read data from file / list directory.
    pub const READ_DATA: u32 = 0x0001;
    /// Write data to file / create file in directory.
    pub const WRITE_DATA: u32 = 0x0002;
    /// Append data to file / create subdirectory.
    pub const APPEND_DATA: u32 = 0x0004;
    /// Read named attributes.
    pub const READ_NAMED_ATTRS: u32 = 0x0008;
    /// Write named attributes.
    pub const WRITE_NAMED_ATTRS: u32 = 0x0010;
    /// Execute file / search directory.
    pub const EXECUTE: u32 = 0x0020;
    /// Delete a file within a directory.
    pub const DELETE_CHILD: u32 = 0x0040;
    /// Read file attributes.
    pub const READ_ATTRIBUTES: u32 = 0x0080;
    /// Write file attributes.
    pub const WRITE_ATTRIBUTES: u32 = 0x0100;
    /// Delete the file itself.
    pub const DELETE: u32 = 0x10000;
    /// Read the ACL.
    pub const READ_ACL: u32 = 0x20000;
    /// Write the ACL.
    pub const WRITE_ACL: u32 = 0x40000;
    /// Change owner.
    pub const WRITE_OWNER: u32 = 0x80000;
    /// Synchronize (Windows semantics).
    pub const SYNCHRONIZE: u32 = 0x100000;

    /// Generic read rights.
    pub const GENERIC_READ: u32 = Self::READ_DATA
        | Self::READ_ATTRIBUTES
        | Self::READ_NAMED_ATTRS
        | Self::READ_ACL
        | Self::SYNCHRONIZE;
    /// Generic write rights.
    pub const GENERIC_WRITE: u32 = Self::WRITE_DATA
        | Self::APPEND_DATA
        | Self::READ_ATTRIBUTES
        | Self::WRITE_ATTRIBUTES
        | Self::WRITE_NAMED_ATTRS
        | Self::READ_ACL
        | Self::WRITE_ACL
        | Self::DELETE_CHILD
        | Self::SYNCHRONIZE;
    /// Generic execute rights.
    pub const GENERIC_EXECUTE: u32 =
        Self::EXECUTE | Self::READ_ATTRIBUTES | Self::READ_ACL | Self::SYNCHRONIZE;
    /// Every defined permission bit.
    pub const MASK_ALL: u32 = Self::GENERIC_READ
        | Self::GENERIC_WRITE
        | Self::GENERIC_EXECUTE
        | Self::DELETE
        | Self::WRITE_OWNER;
    /// Alias of [`Self::MASK_ALL`] used by the text grammar.
    pub const FULL_SET: u32 = Self::MASK_ALL;
    /// Everything except changing the ACL or the owner.
    pub const MODIFY_SET: u32 = Self::FULL_SET & !(Self::WRITE_ACL | Self::WRITE_OWNER);
    /// Read-only rights.
    pub const READ_SET: u32 =
        Self::READ_DATA | Self::READ_ATTRIBUTES | Self::READ_NAMED_ATTRS | Self::READ_ACL;
    /// Data and attribute write rights.
    pub const WRITE_SET: u32 = Self::WRITE_DATA
        | Self::APPEND_DATA
        | Self::WRITE_ATTRIBUTES
        | Self::WRITE_NAMED_ATTRS;
    /// Bits granted by a POSIX `w`.
    pub const POSIX_WRITE: u32 = Self::WRITE_DATA | Self::APPEND_DATA;
    /// Rights every class receives in a mode-derived ACL.
    pub const BASE_ALLOW_PSARC: u32 =
        Self::READ_ACL | Self::READ_ATTRIBUTES | Self::SYNCHRONIZE | Self::READ_NAMED_ATTRS;
    /// Extra rights the owner receives in a mode-derived ACL.
    pub const USER_ALLOW_PSARC: u32 = Self::WRITE_ACL
        | Self::APPEND_DATA
        | Self::WRITE_OWNER
        | Self::WRITE_ATTRIBUTES
        | Self::WRITE_NAMED_ATTRS;

    /// Creates a mask from raw value.
    #[must_use]
    pub const fn from_raw(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw mask value.
    #[must_use]
    pub const fn as_raw(self) -> u32 {
        self.0
    }

    /// Checks if any bit of `bits` is set.
    #[must_use]
    pub const fn contains(self, bits: u32) -> bool {
        (self.0 & bits) != 0
    }

    /// Returns a copy with `bits` cleared.
    #[must_use]
    pub const fn without(self, bits: u32) -> Self {
        Self(self.0 & !bits)
    }

    /// Returns true if no permission bit is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::LowerHex for AccessMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

/// ACL-wide flags carried in the wire header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AclFlags(u32);

impl AclFlags {
    /// ACEs are automatically inherited.
    pub const AUTO_INHERIT: u32 = 0x0001;
    /// ACL is protected from inheritance.
    pub const PROTECTED: u32 = 0x0002;
    /// ACL was produced by a default mechanism.
    pub const DEFAULTED: u32 = 0x0004;
    /// Every defined ACL flag.
    pub const ALL: u32 = Self::AUTO_INHERIT | Self::PROTECTED | Self::DEFAULTED;

    /// Creates flags from raw value.
    #[must_use]
    pub const fn from_raw(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw flags value.
    #[must_use]
    pub const fn as_raw(self) -> u32 {
        self.0
    }

    /// Checks if any bit of `flag` is set.
    #[must_use]
    pub const fn contains(self, flag: u32) -> bool {
        (self.0 & flag) != 0
    }
}
