//! Compiler and coordinator configuration.
//!
//! Configuration is plain data with defaults for every field, so a TOML file
//! only needs to name what it changes:
//!
//! ```toml
//! [compiler]
//! use_important = true
//!
//! [coordinator]
//! debounce_ms = 250
//!
//! [aliases.elements]
//! "评论区" = ".comments"
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VernacularConfig {
    /// Compiler pipeline settings.
    pub compiler: CompilerConfig,
    /// Coordinator timing settings.
    pub coordinator: CoordinatorConfig,
    /// Additional user aliases appended after the built-in dictionary.
    pub aliases: AliasConfig,
}

impl VernacularConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Serialize the configuration back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Settings for parsing, layout expansion and generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Append `!important` to every generated canonical declaration.
    pub use_important: bool,
    /// Number of parse results kept by the result cache.
    pub cache_capacity: usize,
    /// Regex identifying anchor selectors that may carry layout intents.
    pub anchor_pattern: String,
    /// Suffix appended to an anchor selector to address its visual content.
    pub content_suffix: String,
    /// Lowest `z-index` an overlay anchor is given.
    pub z_index_floor: i32,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            use_important: false,
            cache_capacity: 32,
            anchor_pattern: r"\.[A-Za-z0-9_-]+-anchor$".to_string(),
            content_suffix: " > .anchor-content".to_string(),
            z_index_floor: 10,
        }
    }
}

/// Timing for the idle/active coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Quiet period before an edit triggers a full compile.
    pub debounce_ms: u64,
    /// Inactivity window after which the coordinator goes idle.
    pub idle_timeout_ms: u64,
}

impl CoordinatorConfig {
    /// Debounce window as a duration.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Idle timeout as a duration.
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            idle_timeout_ms: 5000,
        }
    }
}

/// User-supplied alias tables, each mapping a localized alias to its canonical form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AliasConfig {
    /// Element alias → selector.
    pub elements: BTreeMap<String, String>,
    /// Property alias → canonical property.
    pub properties: BTreeMap<String, String>,
    /// Keyword alias → canonical keyword.
    pub keywords: BTreeMap<String, String>,
    /// Unit alias → canonical unit.
    pub units: BTreeMap<String, String>,
}

impl AliasConfig {
    /// Whether no user aliases are configured.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
            && self.properties.is_empty()
            && self.keywords.is_empty()
            && self.units.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_sections() {
        let config = VernacularConfig::from_toml_str("[compiler]\nuse_important = true\n").unwrap();

        assert!(config.compiler.use_important);
        assert_eq!(config.compiler.cache_capacity, 32);
        assert_eq!(config.coordinator.debounce(), Duration::from_millis(300));
        assert!(config.aliases.is_empty());
    }

    #[test]
    fn aliases_section_parses() {
        let text = r#"
            [aliases.elements]
            "评论区" = ".comments"

            [aliases.units]
            "行" = "lh"
        "#;
        let config = VernacularConfig::from_toml_str(text).unwrap();

        assert_eq!(config.aliases.elements["评论区"], ".comments");
        assert_eq!(config.aliases.units["行"], "lh");
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let err = VernacularConfig::from_toml_str("[compiler\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = VernacularConfig::default();
        config.coordinator.idle_timeout_ms = 1200;
        let text = config.to_toml_string().unwrap();

        assert_eq!(VernacularConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vernacular.toml");
        std::fs::write(&path, "[coordinator]\nidle_timeout_ms = 900\n").unwrap();

        let config = VernacularConfig::from_file(&path).unwrap();
        assert_eq!(config.coordinator.idle_timeout(), Duration::from_millis(900));

        let missing = VernacularConfig::from_file(dir.path().join("absent.toml"));
        assert!(matches!(missing, Err(Error::Io { .. })));
    }
}
