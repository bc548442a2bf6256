//! Principal name resolution.
//!
//! ACEs only ever hold numeric ids. Codecs that accept or print user and group
//! names go through an [`IdMapper`] supplied by the caller.

use std::collections::HashMap;

/// Resolves user/group names to ids and back.
pub trait IdMapper {
    /// Returns the id for `name`, looked up as a group when `is_group` is set.
    fn name_to_id(&self, name: &str, is_group: bool) -> Option<i32>;

    /// Returns the name for `id`, looked up as a group when `is_group` is set.
    fn id_to_name(&self, id: i32, is_group: bool) -> Option<String>;
}

impl<T: IdMapper + ?Sized> IdMapper for &T {
    fn name_to_id(&self, name: &str, is_group: bool) -> Option<i32> {
        (**self).name_to_id(name, is_group)
    }

    fn id_to_name(&self, id: i32, is_group: bool) -> Option<String> {
        (**self).id_to_name(id, is_group)
    }
}

/// Mapper that knows no names; principals are always printed numerically.
#[derive(Clone, Copy, Debug, Default)]
pub struct NumericIdMapper;

impl IdMapper for NumericIdMapper {
    fn name_to_id(&self, _name: &str, _is_group: bool) -> Option<i32> {
        None
    }

    fn id_to_name(&self, _id: i32, _is_group: bool) -> Option<String> {
        None
    }
}

/// In-memory name tables.
///
/// ```
/// use acl::{IdMapper, StaticIdMapper};
///
/// let mapper = StaticIdMapper::new()
///     .with_user("alice", 1000)
///     .with_group("staff", 50);
/// assert_eq!(mapper.name_to_id("alice", false), Some(1000));
/// assert_eq!(mapper.id_to_name(50, true).as_deref(), Some("staff"));
/// assert_eq!(mapper.name_to_id("alice", true), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct StaticIdMapper {
    users: HashMap<String, i32>,
    groups: HashMap<String, i32>,
}

impl StaticIdMapper {
    /// Creates a mapper with empty tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a user entry.
    pub fn with_user(mut self, name: impl Into<String>, uid: i32) -> Self {
        self.users.insert(name.into(), uid);
        self
    }

    /// Adds a group entry.
    pub fn with_group(mut self, name: impl Into<String>, gid: i32) -> Self {
        self.groups.insert(name.into(), gid);
        self
    }

    fn table(&self, is_group: bool) -> &HashMap<String, i32> {
        if is_group { &self.groups } else { &self.users }
    }
}

impl IdMapper for StaticIdMapper {
    fn name_to_id(&self, name: &str, is_group: bool) -> Option<i32> {
        self.table(is_group).get(name).copied()
    }

    fn id_to_name(&self, id: i32, is_group: bool) -> Option<String> {
        self.table(is_group)
            .iter()
            .filter(|(_, candidate)| **candidate == id)
            .map(|(name, _)| name)
            .min()
            .cloned()
    }
}
