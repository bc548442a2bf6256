//! crates/acl/src/inherit.rs
//!
//! Inheritance propagation, POSIX mode synthesis and trivial-ACL detection.
//!
//! Mode-derived ACLs follow the PSARC/2010/029 layout: every class starts from
//! [`AccessMask::BASE_ALLOW_PSARC`], the owner additionally gets
//! [`AccessMask::USER_ALLOW_PSARC`], and deny entries are emitted ahead of the
//! allow entries whenever a less privileged class would otherwise grant the
//! owner or group something the mode withholds. NFSv4 evaluation is first
//! match, so the order of emitted entries matters:
//!
//! 1. `owner@` allow-first (rights the group deny would otherwise block)
//! 2. `owner@` deny
//! 3. `group@` deny
//! 4. entries inherited from the parent
//! 5. `owner@`, `group@`, `everyone@` allow
//!
//! An ACL is trivial when it is exactly what [`strip`] produces for it.

use crate::debug_acl::{
    trace_inherit_entry, trace_inherit_skipped, trace_inherited_acl, trace_mode_synced,
};
use crate::error::{AclError, AclResult};
use crate::{AccessMask, Ace, AceFlags, AceType, Acl, Principal};

/// POSIX permission bits consumed and produced by the engine.
pub mod mode {
    /// Owner read.
    pub const S_IRUSR: u32 = 0o400;
    /// Owner write.
    pub const S_IWUSR: u32 = 0o200;
    /// Owner execute.
    pub const S_IXUSR: u32 = 0o100;
    /// Group read.
    pub const S_IRGRP: u32 = 0o040;
    /// Group write.
    pub const S_IWGRP: u32 = 0o020;
    /// Group execute.
    pub const S_IXGRP: u32 = 0o010;
    /// Others read.
    pub const S_IROTH: u32 = 0o004;
    /// Others write.
    pub const S_IWOTH: u32 = 0o002;
    /// Others execute.
    pub const S_IXOTH: u32 = 0o001;
}

use mode::{S_IRGRP, S_IROTH, S_IRUSR, S_IWGRP, S_IWOTH, S_IWUSR, S_IXGRP, S_IXOTH, S_IXUSR};

const INHERIT_BITS: u32 = AceFlags::FILE_INHERIT | AceFlags::DIRECTORY_INHERIT;

/// Appends to `child` the entries of `parent` that propagate to a new object.
///
/// `is_dir` describes the object being created. Only allow and deny entries
/// propagate; each one gets [`AceFlags::INHERITED`] and has its inheritance
/// flags rewritten for the new object. `child` is left untouched on error.
pub fn inherit_entries(parent: &Acl, child: &mut Acl, is_dir: bool) -> AclResult<()> {
    let mut work = child.clone();
    for (index, ace) in parent.iter().enumerate() {
        let flags = ace.flags();

        if !flags.contains(INHERIT_BITS) {
            trace_inherit_skipped(index, flags.as_raw(), "not inheritable");
            continue;
        }
        if !is_dir && !flags.contains(AceFlags::FILE_INHERIT) {
            trace_inherit_skipped(index, flags.as_raw(), "no file inherit");
            continue;
        }
        if is_dir
            && !flags.contains(AceFlags::DIRECTORY_INHERIT)
            && flags.contains(AceFlags::NO_PROPAGATE_INHERIT)
        {
            trace_inherit_skipped(index, flags.as_raw(), "file inherit without propagation");
            continue;
        }
        if !ace.ace_type().is_access() {
            trace_inherit_skipped(index, flags.as_raw(), "audit or alarm");
            continue;
        }

        let mut inherited = flags
            .without(AceFlags::INHERIT_ONLY)
            .with(AceFlags::INHERITED);
        if inherited.contains(AceFlags::NO_PROPAGATE_INHERIT) || !is_dir {
            inherited = inherited.without(AceFlags::DIRECTORY_FLAGS);
        } else if inherited.contains(AceFlags::FILE_INHERIT)
            && !inherited.contains(AceFlags::DIRECTORY_INHERIT)
        {
            inherited = inherited.with(AceFlags::INHERIT_ONLY);
        }

        let entry = Ace::new(is_dir, ace.ace_type(), inherited, ace.mask(), ace.principal())?;
        trace_inherit_entry(index, flags.as_raw(), entry.flags().as_raw(), is_dir);
        work.append(entry)?;
    }

    *child = work;
    Ok(())
}

/// Per-class masks derived from a POSIX mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ModeMasks {
    user_allow_first: u32,
    user_deny: u32,
    group_deny: u32,
    user_allow: u32,
    group_allow: u32,
    everyone_allow: u32,
}

impl ModeMasks {
    fn from_mode(mode: u32) -> Self {
        let class = |read: u32, write: u32, execute: u32| {
            let mut mask = 0;
            if mode & read != 0 {
                mask |= AccessMask::READ_DATA;
            }
            if mode & write != 0 {
                mask |= AccessMask::POSIX_WRITE;
            }
            if mode & execute != 0 {
                mask |= AccessMask::EXECUTE;
            }
            mask
        };

        let user_allow = AccessMask::BASE_ALLOW_PSARC
            | AccessMask::USER_ALLOW_PSARC
            | class(S_IRUSR, S_IWUSR, S_IXUSR);
        let group_allow = AccessMask::BASE_ALLOW_PSARC | class(S_IRGRP, S_IWGRP, S_IXGRP);
        let everyone_allow = AccessMask::BASE_ALLOW_PSARC | class(S_IROTH, S_IWOTH, S_IXOTH);

        let user_deny = (group_allow | everyone_allow) & !user_allow;
        let group_deny = everyone_allow & !group_allow;
        let user_allow_first = group_deny & !user_deny;

        Self {
            user_allow_first,
            user_deny,
            group_deny,
            user_allow,
            group_allow,
            everyone_allow,
        }
    }
}

fn push_mode_entry(
    acl: &mut Acl,
    is_dir: bool,
    ace_type: AceType,
    mask: u32,
    principal: Principal,
) -> AclResult<()> {
    let flags = if principal == Principal::Group {
        AceFlags::from_raw(AceFlags::IDENTIFIER_GROUP)
    } else {
        AceFlags::default()
    };
    let ace = Ace::new(is_dir, ace_type, flags, AccessMask::from_raw(mask), principal)?;
    acl.append(ace)
}

/// Appends a mode-derived ACL to `acl`, with `parent`'s inheritable entries
/// placed between the deny and the allow block.
///
/// With `skip_mode` set only the inherited entries are appended. `acl` is left
/// untouched on error.
///
/// # Errors
///
/// [`AclError::InvalidArgument`] if `parent` is `None` while `skip_mode` is
/// set, since there is nothing to compute from.
pub fn calculate_inherited_acl(
    parent: Option<&Acl>,
    acl: &mut Acl,
    mode: u32,
    skip_mode: bool,
    is_dir: bool,
) -> AclResult<()> {
    if parent.is_none() && skip_mode {
        return Err(AclError::invalid(
            "no parent ACL and mode skipped: nothing to inherit",
        ));
    }

    let masks = ModeMasks::from_mode(mode);
    let mut work = acl.clone();

    if !skip_mode {
        if masks.user_allow_first != 0 {
            push_mode_entry(&mut work, is_dir, AceType::Allow, masks.user_allow_first, Principal::Owner)?;
        }
        if masks.user_deny != 0 {
            push_mode_entry(&mut work, is_dir, AceType::Deny, masks.user_deny, Principal::Owner)?;
        }
        if masks.group_deny != 0 {
            push_mode_entry(&mut work, is_dir, AceType::Deny, masks.group_deny, Principal::Group)?;
        }
    }

    if let Some(parent) = parent {
        inherit_entries(parent, &mut work, is_dir)?;
    }

    if !skip_mode {
        push_mode_entry(&mut work, is_dir, AceType::Allow, masks.user_allow, Principal::Owner)?;
        push_mode_entry(&mut work, is_dir, AceType::Allow, masks.group_allow, Principal::Group)?;
        push_mode_entry(&mut work, is_dir, AceType::Allow, masks.everyone_allow, Principal::Everyone)?;
    }

    trace_inherited_acl(mode, skip_mode, is_dir, work.len());
    *acl = work;
    Ok(())
}

/// Builds the trivial ACL for `mode`.
pub fn trivial_acl(mode: u32, is_dir: bool) -> AclResult<Acl> {
    let mut acl = Acl::new(is_dir);
    calculate_inherited_acl(None, &mut acl, mode, false, is_dir)?;
    Ok(acl)
}

/// Folds the `owner@`, `group@` and `everyone@` allow/deny entries of `acl`
/// into POSIX rwx bits and ORs them with `existing_mode`.
///
/// Denied bits win over allowed bits within the ACL; `everyone@` applies to
/// all three classes. Other principals and audit/alarm entries are ignored.
#[must_use]
pub fn sync_mode_from_acl(acl: &Acl, existing_mode: u32) -> u32 {
    let mut allowed = 0;
    let mut denied = 0;

    for ace in acl {
        let (read, write, execute) = match ace.principal() {
            Principal::Owner => (S_IRUSR, S_IWUSR, S_IXUSR),
            Principal::Group => (S_IRGRP, S_IWGRP, S_IXGRP),
            Principal::Everyone => (
                S_IRUSR | S_IRGRP | S_IROTH,
                S_IWUSR | S_IWGRP | S_IWOTH,
                S_IXUSR | S_IXGRP | S_IXOTH,
            ),
            Principal::Named(_) => continue,
        };
        let target = match ace.ace_type() {
            AceType::Allow => &mut allowed,
            AceType::Deny => &mut denied,
            AceType::Audit | AceType::Alarm => continue,
        };

        let mask = ace.mask();
        if mask.contains(AccessMask::READ_DATA) {
            *target |= read;
        }
        if mask.contains(AccessMask::WRITE_DATA) {
            *target |= write;
        }
        if mask.contains(AccessMask::EXECUTE) {
            *target |= execute;
        }
    }

    let mode = (allowed & !denied) | existing_mode;
    trace_mode_synced(mode);
    mode
}

/// Returns the trivial ACL equivalent to `acl`'s POSIX mode.
pub fn strip(acl: &Acl) -> AclResult<Acl> {
    let mode = sync_mode_from_acl(acl, 0);
    trivial_acl(mode, acl.is_directory())
}

/// Returns true if `acl` can be expressed as a POSIX mode without loss.
#[must_use]
pub fn is_trivial(acl: &Acl) -> bool {
    strip(acl).is_ok_and(|stripped| acl.aces_eq(&stripped))
}
