//! crates/metadata/src/config.rs
//! Where ACL payloads live and what to do when one is missing.

/// Extended-attribute namespace holding the XDR payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum XattrNamespace {
    /// `system.nfs4_acl_xdr`, the name used by the kernel NFS client.
    #[default]
    System,
    /// `security.nfs4acl_xdr`.
    Security,
}

impl XattrNamespace {
    /// Full attribute name for this namespace.
    #[must_use]
    pub const fn attribute_name(self) -> &'static str {
        match self {
            Self::System => "system.nfs4_acl_xdr",
            Self::Security => "security.nfs4acl_xdr",
        }
    }
}

/// Settings shared by the get/set/sync helpers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StoreConfig {
    /// Namespace the payload is read from and written to.
    pub namespace: XattrNamespace,
    /// Return the trivial ACL for the object's mode when no payload exists.
    pub synthesize_from_mode: bool,
}

impl StoreConfig {
    /// Attribute name selected by [`Self::namespace`].
    #[must_use]
    pub const fn attribute_name(&self) -> &'static str {
        self.namespace.attribute_name()
    }

    /// Loads a configuration from JSON; absent fields keep their defaults.
    ///
    /// ```
    /// use metadata::{StoreConfig, XattrNamespace};
    ///
    /// let config = StoreConfig::from_json_str(r#"{"namespace":"security"}"#).unwrap();
    /// assert_eq!(config.namespace, XattrNamespace::Security);
    /// assert!(!config.synthesize_from_mode);
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_system_namespace_without_synthesis() {
        let config = StoreConfig::default();
        assert_eq!(config.attribute_name(), "system.nfs4_acl_xdr");
        assert!(!config.synthesize_from_mode);
    }

    #[test]
    fn security_namespace_name() {
        assert_eq!(
            XattrNamespace::Security.attribute_name(),
            "security.nfs4acl_xdr"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_configuration() {
        let config =
            StoreConfig::from_json_str(r#"{"synthesize_from_mode":true}"#).unwrap();
        assert_eq!(config.namespace, XattrNamespace::System);
        assert!(config.synthesize_from_mode);

        assert!(StoreConfig::from_json_str(r#"{"namespace":"trusted"}"#).is_err());
        assert!(StoreConfig::from_json_str("[]").is_err());
    }
}
