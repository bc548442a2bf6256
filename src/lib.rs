#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `nfs4xdr_acl` bundles the workspace crates that model, encode and store
//! NFSv4 Access Control Lists:
//!
//! - [`acl`]: entries, ordered lists, inheritance and trivial-ACL logic.
//! - [`codec`]: the XDR payload, the `tag:perms[:flags]:type[:id]` text
//!   grammar, and the JSON document form.
//! - [`metadata`]: reading and writing payloads through attribute stores.
//! - [`logging`]: verbosity flags and tracing setup for the `nfs4acl::*`
//!   targets.
//!
//! # Examples
//!
//! Parse a text spec, store it, and read it back as JSON:
//!
//! ```
//! use nfs4xdr_acl::acl::StaticIdMapper;
//! use nfs4xdr_acl::codec::{TextOptions, json, text};
//! use nfs4xdr_acl::metadata::{MemoryStore, StoreConfig, get_acl, set_acl};
//! use std::path::Path;
//!
//! let mapper = StaticIdMapper::new().with_user("alice", 1000);
//! let acl = text::parse_acl("user:alice:rw::allow owner@:rwx::allow", false, &mapper)?;
//!
//! let store = MemoryStore::new();
//! store.add_file("/notes", 0o600);
//! set_acl(&store, &StoreConfig::default(), Path::new("/notes"), &acl)?;
//!
//! let stored = get_acl(&store, &StoreConfig::default(), Path::new("/notes"))?.unwrap();
//! let doc = json::acl_to_json(&stored, TextOptions::empty(), &mapper);
//! assert_eq!(doc["acl"][0]["who"], "alice");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use acl;
pub use codec;
pub use logging;
pub use metadata;
