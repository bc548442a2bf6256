//! No-op principal lookup for non-Unix platforms.
//!
//! Without a Unix-style user/group database every lookup misses, so the
//! codecs fall back to numeric ids. Callers use the same type on every
//! platform without cfg-gating their own code.

use acl::IdMapper;

/// [`IdMapper`] that resolves nothing on this platform.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemIdMapper;

impl SystemIdMapper {
    /// Creates the mapper.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl IdMapper for SystemIdMapper {
    fn name_to_id(&self, _name: &str, _is_group: bool) -> Option<i32> {
        None
    }

    fn id_to_name(&self, _id: i32, _is_group: bool) -> Option<String> {
        None
    }
}
