//! crates/metadata/src/id_lookup.rs
//! Principal name resolution through the system user and group databases.

use acl::IdMapper;
use uzers::{Groups, Users, UsersCache};

/// [`IdMapper`] consulting NSS (`/etc/passwd`, `/etc/group`, LDAP, ...).
///
/// Lookups are cached for the lifetime of the mapper. Ids outside the
/// non-negative `i32` range are treated as unknown.
#[derive(Default)]
pub struct SystemIdMapper {
    cache: UsersCache,
}

impl SystemIdMapper {
    /// Creates a mapper with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for SystemIdMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemIdMapper").finish_non_exhaustive()
    }
}

impl IdMapper for SystemIdMapper {
    fn name_to_id(&self, name: &str, is_group: bool) -> Option<i32> {
        let raw = if is_group {
            self.cache.get_group_by_name(name)?.gid()
        } else {
            self.cache.get_user_by_name(name)?.uid()
        };
        i32::try_from(raw).ok()
    }

    fn id_to_name(&self, id: i32, is_group: bool) -> Option<String> {
        let raw = u32::try_from(id).ok()?;
        let name = if is_group {
            self.cache
                .get_group_by_gid(raw)?
                .name()
                .to_string_lossy()
                .into_owned()
        } else {
            self.cache
                .get_user_by_uid(raw)?
                .name()
                .to_string_lossy()
                .into_owned()
        };
        Some(name)
    }
}
