#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `codec` converts [`acl::Acl`] values to and from their three external
//! representations:
//!
//! - [`xdr`]: the big-endian binary payload stored in the
//!   `nfs4_acl_xdr` extended attribute,
//! - [`text`]: the `tag:perms:flags:type` line grammar used by
//!   getfacl/setfacl style tools, plus ACL-flag words,
//! - [`json`]: the document exchanged with management front ends.
//!
//! # Design
//!
//! Every codec is a set of free functions over borrowed ACLs. Name lookups
//! for the text and JSON forms go through a caller supplied
//! [`acl::IdMapper`]; nothing here touches the host user database. The JSON
//! codec works on [`serde_json::Value`] so that it can report every
//! validation failure in a document instead of stopping at the first one.
//!
//! # Invariants
//!
//! - [`xdr::encode`] output is exactly `8 + 20 * n` bytes and always decodes
//!   back to an equal ACL with the same ACL flags.
//! - [`text::format_ace`] output parses back to the same entry for every
//!   combination of [`TextOptions`].
//! - [`json::ace_to_json`] output decodes back to the same entry.
//!
//! # Errors
//!
//! All functions return [`acl::AclResult`]. Grammar problems surface as
//! [`acl::AclError::Parse`], JSON content problems as
//! [`acl::AclError::Validation`], and wire size problems as
//! [`acl::AclError::InvalidSize`] or [`acl::AclError::TooLarge`].
//!
//! # Examples
//!
//! ```
//! use acl::NumericIdMapper;
//! use codec::{TextOptions, text, xdr};
//!
//! let acl = text::parse_acl("owner@:rwx::allow,everyone@:r::allow", false, &NumericIdMapper)?;
//! let bytes = xdr::encode(&acl)?;
//! assert_eq!(bytes.len(), xdr::encoded_len(2));
//!
//! let back = xdr::decode(&bytes, false)?;
//! assert_eq!(
//!     text::format_acl(&back, TextOptions::empty(), &NumericIdMapper),
//!     "            owner@:rwx-----------:-------:allow\n         everyone@:r-------------:-------:allow\n"
//! );
//! # Ok::<(), acl::AclError>(())
//! ```
//!
//! # See also
//!
//! - `acl` for the data model these codecs serialise.
//! - `metadata` for persisting the XDR payload.

pub mod debug_codec;
pub mod json;
pub mod text;
pub mod xdr;

pub use text::TextOptions;
