//! crates/metadata/src/store.rs
//! Attribute storage abstraction and an in-memory implementation.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Kind and permission bits of a stored object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObjectInfo {
    /// True for directories.
    pub is_directory: bool,
    /// Permission bits (`0o7777` at most).
    pub mode: u32,
}

impl ObjectInfo {
    /// Info for a regular file with the given mode.
    #[must_use]
    pub const fn file(mode: u32) -> Self {
        Self {
            is_directory: false,
            mode,
        }
    }

    /// Info for a directory with the given mode.
    #[must_use]
    pub const fn directory(mode: u32) -> Self {
        Self {
            is_directory: true,
            mode,
        }
    }
}

/// Named binary attributes attached to filesystem objects.
///
/// A missing attribute is `Ok(None)`, never an error. Writes replace any
/// previous value.
pub trait AttributeStore {
    /// Reads attribute `name` of `target`.
    fn read_attribute(&self, target: &Path, name: &str) -> io::Result<Option<Vec<u8>>>;

    /// Stores `value` as attribute `name` of `target`.
    fn write_attribute(&self, target: &Path, name: &str, value: &[u8]) -> io::Result<()>;

    /// Removes attribute `name`; removing an absent attribute succeeds.
    fn remove_attribute(&self, target: &Path, name: &str) -> io::Result<()>;

    /// Reports whether `target` is a directory and its permission bits.
    fn object_info(&self, target: &Path) -> io::Result<ObjectInfo>;
}

impl<T: AttributeStore + ?Sized> AttributeStore for &T {
    fn read_attribute(&self, target: &Path, name: &str) -> io::Result<Option<Vec<u8>>> {
        (**self).read_attribute(target, name)
    }

    fn write_attribute(&self, target: &Path, name: &str, value: &[u8]) -> io::Result<()> {
        (**self).write_attribute(target, name, value)
    }

    fn remove_attribute(&self, target: &Path, name: &str) -> io::Result<()> {
        (**self).remove_attribute(target, name)
    }

    fn object_info(&self, target: &Path) -> io::Result<ObjectInfo> {
        (**self).object_info(target)
    }
}

#[derive(Debug)]
struct MemoryObject {
    info: ObjectInfo,
    attributes: HashMap<String, Vec<u8>>,
}

/// Store keeping objects and their attributes in memory.
///
/// Objects must be registered with [`MemoryStore::add_file`] or
/// [`MemoryStore::add_directory`]; any operation on an unknown path fails
/// with [`io::ErrorKind::NotFound`].
///
/// ```
/// use metadata::{AttributeStore, MemoryStore};
/// use std::path::Path;
///
/// let store = MemoryStore::new();
/// store.add_file("/a", 0o644);
/// store.write_attribute(Path::new("/a"), "user.x", b"1").unwrap();
/// assert_eq!(store.read_attribute(Path::new("/a"), "user.x").unwrap(), Some(b"1".to_vec()));
/// assert_eq!(store.read_attribute(Path::new("/a"), "user.y").unwrap(), None);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RefCell<HashMap<PathBuf, MemoryObject>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a regular file, replacing any object at `path`.
    pub fn add_file(&self, path: impl Into<PathBuf>, mode: u32) {
        self.insert_object(path, ObjectInfo::file(mode));
    }

    /// Registers a directory, replacing any object at `path`.
    pub fn add_directory(&self, path: impl Into<PathBuf>, mode: u32) {
        self.insert_object(path, ObjectInfo::directory(mode));
    }

    /// Registers an object with no attributes.
    pub fn insert_object(&self, path: impl Into<PathBuf>, info: ObjectInfo) {
        self.objects.borrow_mut().insert(
            path.into(),
            MemoryObject {
                info,
                attributes: HashMap::new(),
            },
        );
    }

    /// Number of attributes held by `path`, or `None` for unknown paths.
    #[must_use]
    pub fn attribute_count(&self, path: &Path) -> Option<usize> {
        self.objects
            .borrow()
            .get(path)
            .map(|object| object.attributes.len())
    }

    fn with_object<R>(
        &self,
        target: &Path,
        f: impl FnOnce(&mut MemoryObject) -> R,
    ) -> io::Result<R> {
        let mut objects = self.objects.borrow_mut();
        let object = objects
            .get_mut(target)
            .ok_or_else(|| missing_object(target))?;
        Ok(f(object))
    }
}

fn missing_object(target: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such object: {}", target.display()),
    )
}

impl AttributeStore for MemoryStore {
    fn read_attribute(&self, target: &Path, name: &str) -> io::Result<Option<Vec<u8>>> {
        self.with_object(target, |object| object.attributes.get(name).cloned())
    }

    fn write_attribute(&self, target: &Path, name: &str, value: &[u8]) -> io::Result<()> {
        self.with_object(target, |object| {
            object.attributes.insert(name.to_owned(), value.to_vec());
        })
    }

    fn remove_attribute(&self, target: &Path, name: &str) -> io::Result<()> {
        self.with_object(target, |object| {
            object.attributes.remove(name);
        })
    }

    fn object_info(&self, target: &Path) -> io::Result<ObjectInfo> {
        self.with_object(target, |object| object.info)
    }
}
