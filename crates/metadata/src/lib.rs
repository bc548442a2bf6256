#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `metadata` stores NFSv4 ACLs on filesystem objects. An ACL travels as the
//! XDR payload of an extended attribute (`system.nfs4_acl_xdr` by default);
//! this crate reads that payload, decodes it for the object's kind, writes
//! it back, and copies it between objects.
//!
//! # Design
//!
//! - [`AttributeStore`] abstracts "named binary attributes plus object
//!   kind and mode". [`MemoryStore`] keeps everything in memory;
//!   `XattrStore` (feature `xattr`, Unix only) talks to the host through the
//!   `xattr` crate.
//! - [`get_acl`], [`set_acl`], [`remove_acl`], [`sync_acl`] and
//!   [`is_trivial`] operate on any store and take a [`StoreConfig`] naming
//!   the attribute namespace and whether a missing payload should be
//!   synthesised from the mode bits.
//! - [`SystemIdMapper`] resolves principal names through NSS for the text
//!   and JSON codecs.
//!
//! # Invariants
//!
//! - Payloads are decoded against the kind of the object they belong to.
//! - A missing or unsupported attribute is "no ACL", never an error.
//! - Nothing is written when encoding or kind validation fails.
//!
//! # Errors
//!
//! All helpers return [`MetadataError`], which records the failed action,
//! the path, and the underlying [`std::io::Error`] or [`acl::AclError`].
//!
//! # See also
//!
//! - `codec::xdr` for the payload layout.
//! - `acl::inherit` for trivial ACLs and mode folding.

mod config;
pub mod debug_store;
mod error;
mod nfsv4_acl;
mod store;

#[cfg(unix)]
mod id_lookup;
#[cfg(not(unix))]
#[path = "id_lookup_stub.rs"]
mod id_lookup;

#[cfg(all(unix, feature = "xattr"))]
mod xattr_store;

pub use config::{StoreConfig, XattrNamespace};
pub use error::{ErrorSource, MetadataError};
pub use id_lookup::SystemIdMapper;
pub use nfsv4_acl::{get_acl, has_acl, is_trivial, remove_acl, set_acl, sync_acl};
pub use store::{AttributeStore, MemoryStore, ObjectInfo};
#[cfg(all(unix, feature = "xattr"))]
pub use xattr_store::XattrStore;
