use ring_core::InspectionConfig;

use crate::builder::ClassifierBuilder;
use crate::classifier::validate_threshold;
use crate::contours::ChainApproximation;
use crate::error::DefectResult;

#[cfg(feature = "serde")]
use crate::error::DefectError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Complete classifier configuration with all settings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClassifierConfig {
    /// Boundary chain reduction
    #[cfg_attr(feature = "serde", serde(default))]
    pub approximation: ChainApproximation,
    /// Metadata
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub version: Option<String>,
    /// Flash/cut thresholds
    pub core: InspectionConfig,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassifierConfig {
    /// Create new configuration with default settings
    pub fn new() -> Self {
        Self {
            core: InspectionConfig::default(),
            approximation: ChainApproximation::default(),
            name: None,
            description: None,
            version: None,
        }
    }

    /// Add metadata to configuration
    pub fn with_metadata(mut self, name: &str, description: &str) -> Self {
        self.name = Some(name.to_string());
        self.description = Some(description.to_string());
        self.version = Some("1.0".to_string());
        self
    }

    /// Convert to ClassifierBuilder for further customization
    pub fn to_builder(self) -> ClassifierBuilder {
        ClassifierBuilder::from_config(self)
    }

    /// Generate human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "ClassifierConfig: flash_threshold={}, cut_threshold={}, approximation={:?}",
            self.core.flash_threshold, self.core.cut_threshold, self.approximation
        )
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> DefectResult<()> {
        validate_threshold("flash", self.core.flash_threshold)?;
        validate_threshold("cut", self.core.cut_threshold)?;
        Ok(())
    }

    /// Save configuration to JSON file
    #[cfg(feature = "serde")]
    pub fn save_json<P: AsRef<std::path::Path>>(&self, path: P) -> DefectResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load configuration from JSON file
    #[cfg(feature = "serde")]
    pub fn load_json<P: AsRef<std::path::Path>>(path: P) -> DefectResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Save configuration to TOML file
    #[cfg(feature = "serde")]
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> DefectResult<()> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Load configuration from TOML file
    #[cfg(feature = "serde")]
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> DefectResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load from a `.json` or `.toml` file, chosen by extension
    #[cfg(feature = "serde")]
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> DefectResult<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::load_json(path),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::load_toml(path),
            _ => Err(DefectError::ConfigParse(format!(
                "unsupported configuration file {} (expected .json or .toml)",
                path.display()
            ))),
        }
    }

    /// Serialize to JSON string
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> DefectResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| DefectError::ConfigParse(e.to_string()))
    }

    /// Deserialize from JSON string
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> DefectResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| DefectError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML string
    #[cfg(feature = "serde")]
    pub fn to_toml(&self) -> DefectResult<String> {
        toml::to_string_pretty(self).map_err(|e| DefectError::ConfigParse(e.to_string()))
    }

    /// Deserialize from TOML string
    #[cfg(feature = "serde")]
    pub fn from_toml(toml_str: &str) -> DefectResult<Self> {
        let config: Self = toml::from_str(toml_str).map_err(|e| DefectError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
