//! crates/metadata/src/xattr_store.rs
//!
//! [`AttributeStore`] backed by host extended attributes.
//!
//! Filesystems without NFSv4 ACL support either lack the attribute
//! (`ENODATA`) or reject the namespace outright (`EOPNOTSUPP`); both read
//! as "no payload" so callers can fall back to mode synthesis.

use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use crate::store::{AttributeStore, ObjectInfo};

/// Extended-attribute store for local paths.
#[derive(Clone, Copy, Debug)]
pub struct XattrStore {
    follow_symlinks: bool,
}

impl Default for XattrStore {
    fn default() -> Self {
        Self::new(true)
    }
}

impl XattrStore {
    /// Creates a store; with `follow_symlinks` unset, symlinks themselves
    /// are inspected.
    #[must_use]
    pub const fn new(follow_symlinks: bool) -> Self {
        Self { follow_symlinks }
    }

    /// Whether symlinks are dereferenced.
    #[must_use]
    pub const fn follows_symlinks(&self) -> bool {
        self.follow_symlinks
    }
}

fn is_absent(error: &io::Error) -> bool {
    error.kind() == io::ErrorKind::Unsupported
        || error.raw_os_error() == Some(libc::ENODATA)
        || error.raw_os_error() == Some(libc::EOPNOTSUPP)
}

impl AttributeStore for XattrStore {
    fn read_attribute(&self, target: &Path, name: &str) -> io::Result<Option<Vec<u8>>> {
        let result = if self.follow_symlinks {
            xattr::get_deref(target, name)
        } else {
            xattr::get(target, name)
        };
        match result {
            Err(error) if is_absent(&error) => Ok(None),
            other => other,
        }
    }

    fn write_attribute(&self, target: &Path, name: &str, value: &[u8]) -> io::Result<()> {
        if self.follow_symlinks {
            xattr::set_deref(target, name, value)
        } else {
            xattr::set(target, name, value)
        }
    }

    fn remove_attribute(&self, target: &Path, name: &str) -> io::Result<()> {
        let result = if self.follow_symlinks {
            xattr::remove_deref(target, name)
        } else {
            xattr::remove(target, name)
        };
        match result {
            Err(error) if is_absent(&error) => Ok(()),
            other => other,
        }
    }

    fn object_info(&self, target: &Path) -> io::Result<ObjectInfo> {
        let metadata = if self.follow_symlinks {
            fs::metadata(target)
        } else {
            fs::symlink_metadata(target)
        }?;
        Ok(ObjectInfo {
            is_directory: metadata.is_dir(),
            mode: metadata.permissions().mode() & 0o7777,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absence_errors_are_recognised() {
        assert!(is_absent(&io::Error::from_raw_os_error(libc::ENODATA)));
        assert!(is_absent(&io::Error::from_raw_os_error(libc::EOPNOTSUPP)));
        assert!(is_absent(&io::Error::from(io::ErrorKind::Unsupported)));
        assert!(!is_absent(&io::Error::from_raw_os_error(libc::EACCES)));
        assert!(!is_absent(&io::Error::from(io::ErrorKind::NotFound)));
    }

    #[test]
    fn object_info_for_temp_entries() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f");
        fs::write(&file, b"data").unwrap();
        fs::set_permissions(&file, fs::Permissions::from_mode(0o640)).unwrap();

        let store = XattrStore::default();
        assert!(store.follows_symlinks());
        assert_eq!(store.object_info(&file).unwrap(), ObjectInfo::file(0o640));
        assert!(store.object_info(dir.path()).unwrap().is_directory);

        let missing = store.object_info(&dir.path().join("missing")).unwrap_err();
        assert_eq!(missing.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn missing_user_attribute_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f");
        fs::write(&file, b"").unwrap();

        let store = XattrStore::new(false);
        assert_eq!(
            store.read_attribute(&file, "user.nfs4acl_test").unwrap(),
            None
        );
        store.remove_attribute(&file, "user.nfs4acl_test").unwrap();
    }
}
