//! crates/logging/src/levels.rs
//! Debug flag categories and their per-flag levels.

/// Diagnostic categories, one per `nfs4acl::*` tracing target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DebugFlag {
    /// ACL list edits and comparisons (`nfs4acl::acl`).
    Acl,
    /// Inheritance and mode synthesis (`nfs4acl::inherit`).
    Inherit,
    /// Binary XDR encoding and decoding (`nfs4acl::xdr`).
    Xdr,
    /// Text grammar parsing and formatting (`nfs4acl::text`).
    Text,
    /// JSON document decoding and encoding (`nfs4acl::json`).
    Json,
    /// Extended attribute reads and writes (`nfs4acl::store`).
    Store,
}

impl DebugFlag {
    /// Every flag, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Acl,
        Self::Inherit,
        Self::Xdr,
        Self::Text,
        Self::Json,
        Self::Store,
    ];

    /// Name accepted by `--debug=NAME[N]` style tokens.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Acl => "acl",
            Self::Inherit => "inherit",
            Self::Xdr => "xdr",
            Self::Text => "text",
            Self::Json => "json",
            Self::Store => "store",
        }
    }

    /// Tracing target the workspace emits this category on.
    #[must_use]
    pub const fn target(self) -> &'static str {
        match self {
            Self::Acl => "nfs4acl::acl",
            Self::Inherit => "nfs4acl::inherit",
            Self::Xdr => "nfs4acl::xdr",
            Self::Text => "nfs4acl::text",
            Self::Json => "nfs4acl::json",
            Self::Store => "nfs4acl::store",
        }
    }

    /// Looks a flag up by its token name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.name() == name)
    }
}

/// Debug levels for each flag (0 = off).
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DebugLevels {
    /// ACL list level.
    pub acl: u8,
    /// Inheritance level.
    pub inherit: u8,
    /// XDR codec level.
    pub xdr: u8,
    /// Text codec level.
    pub text: u8,
    /// JSON codec level.
    pub json: u8,
    /// Attribute store level.
    pub store: u8,
}

impl DebugLevels {
    /// Get the level for a specific debug flag.
    #[must_use]
    pub const fn get(&self, flag: DebugFlag) -> u8 {
        match flag {
            DebugFlag::Acl => self.acl,
            DebugFlag::Inherit => self.inherit,
            DebugFlag::Xdr => self.xdr,
            DebugFlag::Text => self.text,
            DebugFlag::Json => self.json,
            DebugFlag::Store => self.store,
        }
    }

    /// Set the level for a specific debug flag.
    pub const fn set(&mut self, flag: DebugFlag, level: u8) {
        match flag {
            DebugFlag::Acl => self.acl = level,
            DebugFlag::Inherit => self.inherit = level,
            DebugFlag::Xdr => self.xdr = level,
            DebugFlag::Text => self.text = level,
            DebugFlag::Json => self.json = level,
            DebugFlag::Store => self.store = level,
        }
    }

    /// Set all debug flags to the same level.
    pub const fn set_all(&mut self, level: u8) {
        self.acl = level;
        self.inherit = level;
        self.xdr = level;
        self.text = level;
        self.json = level;
        self.store = level;
    }

    /// Returns true when every flag is off.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        DebugFlag::ALL.into_iter().all(|flag| self.get(flag) == 0)
    }
}
