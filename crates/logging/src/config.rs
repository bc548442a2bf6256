//! crates/logging/src/config.rs
//! Verbosity configuration and its mapping onto tracing filter directives.

use super::levels::{DebugFlag, DebugLevels};

/// Per-category debug verbosity.
///
/// A flag at level `N` admits events whose tracing level maps to `N` or
/// lower: `INFO` and above are level 1, `DEBUG` is level 2 and `TRACE` is 3.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VerbosityConfig {
    /// Debug flag levels.
    pub debug: DebugLevels,
}

impl VerbosityConfig {
    /// Create a configuration from a `-v` count (0-4).
    ///
    /// Levels above 4 behave like 4.
    #[must_use]
    pub fn from_verbose_level(level: u8) -> Self {
        let mut config = Self::default();

        match level {
            0 => {}
            1 => {
                config.debug.store = 2;
            }
            2 => {
                config.debug.store = 2;
                config.debug.acl = 2;
                config.debug.inherit = 2;
            }
            3 => {
                config.debug.set_all(2);
            }
            _ => {
                config.debug.set_all(3);
            }
        }

        config
    }

    /// Apply a single debug flag token (e.g., "xdr2", "store", "all3", "none").
    ///
    /// # Errors
    ///
    /// Returns a message naming the token when the flag name is unknown or
    /// the level is not a number in `0..=255`.
    pub fn apply_debug_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = parse_flag_token(token)?;

        match name {
            "all" => self.debug.set_all(level),
            "none" => self.debug.set_all(0),
            _ => {
                let flag = DebugFlag::from_name(name)
                    .ok_or_else(|| format!("unknown debug flag: {name}"))?;
                self.debug.set(flag, level);
            }
        }
        Ok(())
    }

    /// Apply a comma separated list of tokens, as found in `NFS4ACL_DEBUG`.
    ///
    /// Empty items are skipped. Tokens are applied in order, so later tokens
    /// override earlier ones.
    ///
    /// # Errors
    ///
    /// Stops at the first token [`Self::apply_debug_flag`] rejects.
    pub fn apply_debug_list(&mut self, list: &str) -> Result<(), String> {
        list.split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .try_for_each(|token| self.apply_debug_flag(token))
    }

    /// Filter directives equivalent to this configuration.
    ///
    /// Every flag contributes a `target=level` directive; the result is
    /// `"off"` when all flags are silent.
    #[must_use]
    pub fn filter_directives(&self) -> String {
        let directives: Vec<String> = DebugFlag::ALL
            .into_iter()
            .filter_map(|flag| {
                level_directive(self.debug.get(flag))
                    .map(|level| format!("{}={level}", flag.target()))
            })
            .collect();

        if directives.is_empty() {
            "off".to_owned()
        } else {
            directives.join(",")
        }
    }
}

const fn level_directive(level: u8) -> Option<&'static str> {
    match level {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Parse a flag token like "xdr2" into ("xdr", 2) or "acl" into ("acl", 1).
fn parse_flag_token(token: &str) -> Result<(&str, u8), String> {
    if token.is_empty() {
        return Err("empty flag token".to_string());
    }

    match token.find(|c: char| c.is_ascii_digit()) {
        Some(pos) => {
            let (name, level_str) = token.split_at(pos);
            let level = level_str
                .parse::<u8>()
                .map_err(|_| format!("invalid level in flag: {token}"))?;
            Ok((name, level))
        }
        None => Ok((token, 1)),
    }
}
