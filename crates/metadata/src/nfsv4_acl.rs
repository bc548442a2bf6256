//! crates/metadata/src/nfsv4_acl.rs
//!
//! Reading, writing and copying NFSv4 ACLs held in an [`AttributeStore`].
//!
//! The payload is the XDR form produced by [`codec::xdr::encode`]. Whether
//! it decodes as a file or directory ACL is decided by the object the
//! payload is attached to, never by the payload itself.
//!
//! # Examples
//!
//! ```
//! use metadata::{MemoryStore, StoreConfig, get_acl, set_acl};
//! use acl::inherit::trivial_acl;
//! use std::path::Path;
//!
//! let store = MemoryStore::new();
//! store.add_directory("/srv", 0o755);
//! let config = StoreConfig::default();
//!
//! let acl = trivial_acl(0o750, true)?;
//! set_acl(&store, &config, Path::new("/srv"), &acl)?;
//! assert_eq!(get_acl(&store, &config, Path::new("/srv"))?, Some(acl));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::path::Path;

use acl::inherit::trivial_acl;
use acl::{Acl, AclError};
use codec::xdr;

use crate::config::StoreConfig;
use crate::debug_store::{
    trace_acl_synthesized, trace_attribute_read, trace_attribute_removed,
    trace_attribute_written,
};
use crate::error::MetadataError;
use crate::store::AttributeStore;

/// Reads the ACL of `target`.
///
/// Returns `None` when no payload is stored, unless
/// [`StoreConfig::synthesize_from_mode`] is set, in which case the trivial
/// ACL for the object's mode is returned.
///
/// # Errors
///
/// Fails when the object cannot be inspected, the read fails, or the stored
/// payload does not decode for the object's kind.
pub fn get_acl<S: AttributeStore + ?Sized>(
    store: &S,
    config: &StoreConfig,
    target: &Path,
) -> Result<Option<Acl>, MetadataError> {
    let info = store
        .object_info(target)
        .map_err(|e| MetadataError::new("inspect", target, e))?;
    let name = config.attribute_name();
    let payload = store
        .read_attribute(target, name)
        .map_err(|e| MetadataError::new("read NFSv4 ACL", target, e))?;
    trace_attribute_read(target, name, payload.as_ref().map(Vec::len));

    match payload {
        Some(bytes) => xdr::decode(&bytes, info.is_directory)
            .map(Some)
            .map_err(|e| MetadataError::new("decode NFSv4 ACL", target, e)),
        None if config.synthesize_from_mode => {
            trace_acl_synthesized(target, info.mode, info.is_directory);
            trivial_acl(info.mode, info.is_directory)
                .map(Some)
                .map_err(|e| MetadataError::new("synthesize NFSv4 ACL", target, e))
        }
        None => Ok(None),
    }
}

/// Writes `acl` as the ACL of `target`, replacing any previous payload.
///
/// # Errors
///
/// Fails with [`AclError::InvalidArgument`] when the ACL kind (file or
/// directory) differs from the object's, with the encoder's error for
/// oversized ACLs, or with the store's I/O error.
pub fn set_acl<S: AttributeStore + ?Sized>(
    store: &S,
    config: &StoreConfig,
    target: &Path,
    acl: &Acl,
) -> Result<(), MetadataError> {
    let info = store
        .object_info(target)
        .map_err(|e| MetadataError::new("inspect", target, e))?;
    if acl.is_directory() != info.is_directory {
        let expected = if info.is_directory { "directory" } else { "file" };
        return Err(MetadataError::new(
            "write NFSv4 ACL",
            target,
            AclError::invalid(format!("target is a {expected}; ACL kind does not match")),
        ));
    }
    write_payload(store, config, target, acl)
}

fn write_payload<S: AttributeStore + ?Sized>(
    store: &S,
    config: &StoreConfig,
    target: &Path,
    acl: &Acl,
) -> Result<(), MetadataError> {
    let bytes = xdr::encode(acl).map_err(|e| MetadataError::new("encode NFSv4 ACL", target, e))?;
    let name = config.attribute_name();
    store
        .write_attribute(target, name, &bytes)
        .map_err(|e| MetadataError::new("write NFSv4 ACL", target, e))?;
    trace_attribute_written(target, name, bytes.len());
    Ok(())
}

/// Removes the stored ACL of `target`; a missing payload is not an error.
///
/// # Errors
///
/// Propagates the store's I/O error.
pub fn remove_acl<S: AttributeStore + ?Sized>(
    store: &S,
    config: &StoreConfig,
    target: &Path,
) -> Result<(), MetadataError> {
    let name = config.attribute_name();
    store
        .remove_attribute(target, name)
        .map_err(|e| MetadataError::new("remove NFSv4 ACL", target, e))?;
    trace_attribute_removed(target, name);
    Ok(())
}

/// Copies the ACL of `source` onto `destination`.
///
/// The ACL is rebuilt for the destination's kind, so copying a directory ACL
/// carrying inheritance flags onto a file fails instead of storing a payload
/// the file could never decode. `DELETE_CHILD` is dropped silently when the
/// destination is a file. When the source has no ACL (and synthesis is off)
/// the destination's payload is removed.
///
/// # Errors
///
/// Any failure from [`get_acl`], the rebuild, or the destination write.
pub fn sync_acl<S: AttributeStore + ?Sized>(
    store: &S,
    config: &StoreConfig,
    source: &Path,
    destination: &Path,
) -> Result<(), MetadataError> {
    let Some(acl) = get_acl(store, config, source)? else {
        return remove_acl(store, config, destination);
    };

    let info = store
        .object_info(destination)
        .map_err(|e| MetadataError::new("inspect", destination, e))?;
    let rebuilt = if acl.is_directory() == info.is_directory {
        acl
    } else {
        let bytes =
            xdr::encode(&acl).map_err(|e| MetadataError::new("encode NFSv4 ACL", source, e))?;
        xdr::decode(&bytes, info.is_directory)
            .map_err(|e| MetadataError::new("convert NFSv4 ACL", destination, e))?
    };
    write_payload(store, config, destination, &rebuilt)
}

/// Returns true when the ACL of `target` is equivalent to its mode bits.
///
/// Objects without a stored ACL count as trivial.
///
/// # Errors
///
/// Any failure from [`get_acl`].
pub fn is_trivial<S: AttributeStore + ?Sized>(
    store: &S,
    config: &StoreConfig,
    target: &Path,
) -> Result<bool, MetadataError> {
    Ok(get_acl(store, config, target)?.is_none_or(|acl| acl::inherit::is_trivial(&acl)))
}

/// Returns true if a payload is stored for `target`.
///
/// Read failures count as "no ACL".
pub fn has_acl<S: AttributeStore + ?Sized>(store: &S, config: &StoreConfig, target: &Path) -> bool {
    store
        .read_attribute(target, config.attribute_name())
        .is_ok_and(|payload| payload.is_some())
}
