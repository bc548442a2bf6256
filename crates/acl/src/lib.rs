#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `acl` is the in-memory model of NFSv4 Access Control Lists shared by the
//! codecs and storage helpers of the workspace. An [`Acl`] is an ordered list
//! of [`Ace`] values; each entry grants, denies, audits or alarms a set of
//! [`AccessMask`] rights for a [`Principal`], and carries [`AceFlags`] that
//! drive inheritance to newly created children.
//!
//! # Design
//!
//! - [`Ace`] is a small `Copy` value. Principals are numeric ids or one of the
//!   three well-known tags; user and group names never live inside an entry
//!   and are resolved through an [`IdMapper`] by the text and JSON codecs.
//! - [`Acl`] owns a `Vec<Ace>` plus the ACL-wide [`AclFlags`] and the
//!   directory/file kind chosen at construction. Positional operations mirror
//!   the list operations used by `setfacl`: insert, remove and replace at an
//!   index or by value.
//! - The [`inherit`] module computes child ACLs from a parent ACL and a POSIX
//!   mode, folds an ACL back into a mode, and classifies trivial ACLs.
//!
//! # Invariants
//!
//! - Access masks never carry bits outside [`AccessMask::MASK_ALL`].
//! - File entries never carry `DELETE_CHILD` or any of
//!   [`AceFlags::DIRECTORY_FLAGS`]; file ACLs refuse entries that do.
//! - The `OWNER`/`GROUP`/`EVERYONE` marker flags agree with the principal,
//!   `group@` entries always carry `IDENTIFIER_GROUP` and `owner@`/`everyone@`
//!   entries never do.
//! - Failed operations leave the ACL exactly as it was.
//!
//! # Errors
//!
//! Every fallible operation returns [`AclResult`]. [`AclError`] distinguishes
//! structural problems ([`AclError::InvalidArgument`]), positional misses
//! ([`AclError::OutOfRange`], [`AclError::NotFound`]), wire size violations,
//! principal resolution failures, and grammar errors raised by the codecs.
//!
//! # Examples
//!
//! Derive the trivial ACL for mode `0o754` and fold it back:
//!
//! ```
//! use acl::inherit::{is_trivial, sync_mode_from_acl, trivial_acl};
//!
//! let acl = trivial_acl(0o754, true)?;
//! assert_eq!(acl.len(), 3);
//! assert_eq!(sync_mode_from_acl(&acl, 0), 0o754);
//! assert!(is_trivial(&acl));
//! # Ok::<(), acl::AclError>(())
//! ```
//!
//! # See also
//!
//! - `codec` for the XDR, text and JSON representations.
//! - `metadata` for reading and writing ACLs through extended attributes.

mod ace;
pub mod debug_acl;
mod error;
mod idmap;
pub mod inherit;
mod list;
mod types;

pub use ace::{Ace, Principal};
pub use error::{AclError, AclResult, ParseError, ValidationError, ValidationErrors};
pub use idmap::{IdMapper, NumericIdMapper, StaticIdMapper};
pub use list::{ACL_MAX_ACES, Acl};
pub use types::{AccessMask, AceFlags, AceType, AclFlags};
