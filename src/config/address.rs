//! Address configuration
//!
//! Values resolve in order: environment variable, TOML file, built-in default.
//!
//! ```toml
//! [address]
//! chain_alias = "chain"
//! hrp = "cryft"
//!
//! [bech32]
//! max_length = 90
//! max_hrp_length = 83
//! permissive_padding = false
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

use crate::address::bech32::{DEFAULT_MAX_HRP_LEN, DEFAULT_MAX_LEN};
use crate::address::{AddressCodec, Bech32Limits, Padding};

pub const DEFAULT_CHAIN_ALIAS: &str = "chain";
pub const DEFAULT_HRP: &str = "cryft";

pub const ENV_CHAIN_ALIAS: &str = "CRYFT_CHAIN_ALIAS";
pub const ENV_HRP: &str = "CRYFT_HRP";
pub const ENV_MAX_LEN: &str = "CRYFT_BECH32_MAX_LEN";
pub const ENV_MAX_HRP_LEN: &str = "CRYFT_BECH32_MAX_HRP_LEN";
pub const ENV_PERMISSIVE: &str = "CRYFT_BECH32_PERMISSIVE";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AddressSection {
    pub chain_alias: Option<String>,
    pub hrp: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Bech32Section {
    pub max_length: Option<usize>,
    pub max_hrp_length: Option<usize>,
    /// Zero-fill trailing bits on 5->8 regrouping instead of rejecting them
    pub permissive_padding: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    pub address: Option<AddressSection>,
    pub bech32: Option<Bech32Section>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub chain_alias: String,
    pub hrp: String,
    pub max_length: usize,
    pub max_hrp_length: usize,
    pub permissive_padding: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        AppConfig::default().resolved_with(|_| None)
    }
}

impl ResolvedConfig {
    pub fn codec(&self) -> AddressCodec {
        let padding = if self.permissive_padding {
            Padding::Permissive
        } else {
            Padding::Strict
        };
        AddressCodec::new(
            Bech32Limits::new(self.max_length, self.max_hrp_length),
            padding,
        )
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    let s = s.trim();
    if s == "1" || s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s == "0" || s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

impl AppConfig {
    /// Load from `path`; a missing file yields an empty config.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        if path.as_ref().exists() {
            let s = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.as_ref().display()))?;
            let cfg: AppConfig = toml::from_str(&s)
                .with_context(|| format!("parsing {}", path.as_ref().display()))?;
            Ok(cfg)
        } else {
            Ok(Default::default())
        }
    }

    /// Resolve against the process environment.
    pub fn resolved(&self) -> ResolvedConfig {
        self.resolved_with(|key| std::env::var(key).ok())
    }

    /// Resolve against an arbitrary variable lookup.
    pub fn resolved_with<F>(&self, env: F) -> ResolvedConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let address = self.address.as_ref();
        let bech32 = self.bech32.as_ref();

        // blank string overrides count as unset
        let text = |key: &str| {
            env(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let chain_alias = text(ENV_CHAIN_ALIAS)
            .or_else(|| address.and_then(|a| a.chain_alias.clone()))
            .unwrap_or_else(|| DEFAULT_CHAIN_ALIAS.to_string());
        let hrp = text(ENV_HRP)
            .or_else(|| address.and_then(|a| a.hrp.clone()))
            .unwrap_or_else(|| DEFAULT_HRP.to_string());

        let max_length = env(ENV_MAX_LEN)
            .and_then(|s| s.trim().parse().ok())
            .or_else(|| bech32.and_then(|b| b.max_length))
            .unwrap_or(DEFAULT_MAX_LEN);
        let max_hrp_length = env(ENV_MAX_HRP_LEN)
            .and_then(|s| s.trim().parse().ok())
            .or_else(|| bech32.and_then(|b| b.max_hrp_length))
            .unwrap_or(DEFAULT_MAX_HRP_LEN);
        let permissive_padding = env(ENV_PERMISSIVE)
            .and_then(|s| parse_flag(&s))
            .or_else(|| bech32.and_then(|b| b.permissive_padding))
            .unwrap_or(false);

        ResolvedConfig {
            chain_alias,
            hrp,
            max_length,
            max_hrp_length,
            permissive_padding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let cfg = ResolvedConfig::default();
        assert_eq!(cfg.chain_alias, "chain");
        assert_eq!(cfg.hrp, "cryft");
        assert_eq!(cfg.max_length, 90);
        assert_eq!(cfg.max_hrp_length, 83);
        assert!(!cfg.permissive_padding);
        assert_eq!(cfg.codec(), AddressCodec::default());
    }

    #[test]
    fn test_env_beats_file() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [address]
            hrp = "filehrp"
            [bech32]
            permissive_padding = true
            max_length = 120
            "#,
        )
        .unwrap();
        let env: HashMap<&str, &str> = [
            (ENV_HRP, "envhrp"),
            (ENV_PERMISSIVE, "0"),
            (ENV_MAX_LEN, "not-a-number"),
        ]
        .into_iter()
        .collect();

        let resolved = cfg.resolved_with(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(resolved.hrp, "envhrp");
        assert_eq!(resolved.chain_alias, "chain");
        assert!(!resolved.permissive_padding);
        // unparsable override falls through to the file value
        assert_eq!(resolved.max_length, 120);
    }

    #[test]
    fn test_blank_env_values_fall_through() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [address]
            chain_alias = "X"
            hrp = "filehrp"
            "#,
        )
        .unwrap();
        let env: HashMap<&str, &str> = [(ENV_HRP, "   "), (ENV_CHAIN_ALIAS, "")]
            .into_iter()
            .collect();
        let resolved = cfg.resolved_with(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(resolved.hrp, "filehrp");
        assert_eq!(resolved.chain_alias, "X");

        let padded: HashMap<&str, &str> = [(ENV_CHAIN_ALIAS, " P \n")].into_iter().collect();
        let resolved = cfg.resolved_with(|k| padded.get(k).map(|v| v.to_string()));
        assert_eq!(resolved.chain_alias, "P");
    }

    #[test]
    fn test_permissive_codec() {
        let cfg = ResolvedConfig {
            permissive_padding: true,
            ..Default::default()
        };
        assert_eq!(cfg.codec().padding, Padding::Permissive);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag(" TRUE "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("yes"), None);
    }
}
