//! Config loading and validation.

use super::model::MergeConfig;
use crate::error::{IniError, Result};
use std::path::Path;

impl MergeConfig {
    /// Load an entries file, choosing JSON or YAML by extension.
    ///
    /// # Returns
    ///
    /// * `Ok(MergeConfig)` - Successfully loaded and validated config
    /// * `Err(IniError::Io)` - The file could not be read
    /// * `Err(IniError::Config)` - Parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| IniError::io(path, e))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }?;

        log::debug!(
            "loaded {} entries from '{}'",
            config.entries.len(),
            path.display()
        );
        Ok(config)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to `()`, not a mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: MergeConfig = serde_yaml::from_str(yaml)
            .map_err(|e| IniError::Config(format!("failed to parse entries YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Parse config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: MergeConfig = serde_json::from_str(json)
            .map_err(|e| IniError::Config(format!("failed to parse entries JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate every entry, reporting the first bad one by position.
    pub fn validate(&self) -> Result<()> {
        for (i, entry) in self.entries.iter().enumerate() {
            entry.validate().map_err(|e| {
                IniError::Config(format!("config validation failed: entries[{}]: {}", i, e))
            })?;
        }
        Ok(())
    }
}
