//! Parsing and retention configuration.
//!
//! [`PlotterConfig`] can only be obtained in a validated state: through
//! [`PlotterConfig::default`], the [`PlotterConfigBuilder`], or deserialization,
//! all of which run [`PlotterConfig::validate`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, LoadError};

/// Smallest accepted visible window, in samples.
pub const MIN_WINDOW_SIZE: usize = 10;
/// Smallest accepted retention ceiling, in samples.
pub const MIN_MAX_CACHE: usize = 100;

const DEFAULT_ITEM_SEPARATOR: &str = ",";
const DEFAULT_NAME_SEPARATOR: &str = ":";
const DEFAULT_WINDOW_SIZE: usize = 20;
const DEFAULT_MAX_CACHE: usize = 2000;

/// Validated plotter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPlotterConfig")]
pub struct PlotterConfig {
    item_separator: String,
    name_separator: String,
    window_size: usize,
    max_cache: usize,
    smooth_line: bool,
}

impl PlotterConfig {
    /// Start building a configuration from the defaults.
    pub fn builder() -> PlotterConfigBuilder {
        PlotterConfigBuilder::default()
    }

    /// Parse a configuration from TOML text.
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Separator between `name:value` items.
    pub fn item_separator(&self) -> &str {
        &self.item_separator
    }

    /// Separator between a name and its value.
    pub fn name_separator(&self) -> &str {
        &self.name_separator
    }

    /// Default number of samples visible in the X window.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Maximum number of samples retained per series.
    pub fn max_cache(&self) -> usize {
        self.max_cache
    }

    /// Whether series are presented through spline smoothing.
    pub fn smooth_line(&self) -> bool {
        self.smooth_line
    }

    /// Check every invariant of the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.item_separator.is_empty() {
            return Err(ConfigError::EmptySeparator("item"));
        }
        if self.name_separator.is_empty() {
            return Err(ConfigError::EmptySeparator("name"));
        }
        if self.item_separator == self.name_separator {
            return Err(ConfigError::SameSeparators(self.item_separator.clone()));
        }
        if self.window_size < MIN_WINDOW_SIZE {
            return Err(ConfigError::WindowTooSmall(self.window_size));
        }
        if self.max_cache < MIN_MAX_CACHE {
            return Err(ConfigError::CacheTooSmall(self.max_cache));
        }
        Ok(())
    }
}

impl Default for PlotterConfig {
    fn default() -> Self {
        Self {
            item_separator: DEFAULT_ITEM_SEPARATOR.to_string(),
            name_separator: DEFAULT_NAME_SEPARATOR.to_string(),
            window_size: DEFAULT_WINDOW_SIZE,
            max_cache: DEFAULT_MAX_CACHE,
            smooth_line: false,
        }
    }
}

/// Unvalidated on-disk shape of [`PlotterConfig`].
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawPlotterConfig {
    item_separator: String,
    name_separator: String,
    window_size: usize,
    max_cache: usize,
    smooth_line: bool,
}

impl Default for RawPlotterConfig {
    fn default() -> Self {
        let defaults = PlotterConfig::default();
        Self {
            item_separator: defaults.item_separator,
            name_separator: defaults.name_separator,
            window_size: defaults.window_size,
            max_cache: defaults.max_cache,
            smooth_line: defaults.smooth_line,
        }
    }
}

impl TryFrom<RawPlotterConfig> for PlotterConfig {
    type Error = ConfigError;

    fn try_from(raw: RawPlotterConfig) -> Result<Self, Self::Error> {
        let config = Self {
            item_separator: raw.item_separator,
            name_separator: raw.name_separator,
            window_size: raw.window_size,
            max_cache: raw.max_cache,
            smooth_line: raw.smooth_line,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Builder for a validated [`PlotterConfig`].
#[derive(Debug, Clone, Default)]
pub struct PlotterConfigBuilder {
    config: PlotterConfig,
}

impl PlotterConfigBuilder {
    /// Set the separator between items.
    pub fn item_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.item_separator = separator.into();
        self
    }

    /// Set the separator between a name and its value.
    pub fn name_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.name_separator = separator.into();
        self
    }

    /// Set the default visible window size.
    pub fn window_size(mut self, size: usize) -> Self {
        self.config.window_size = size;
        self
    }

    /// Set the retention ceiling.
    pub fn max_cache(mut self, max_cache: usize) -> Self {
        self.config.max_cache = max_cache;
        self
    }

    /// Enable or disable spline smoothing.
    pub fn smooth_line(mut self, smooth: bool) -> Self {
        self.config.smooth_line = smooth;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<PlotterConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = PlotterConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.item_separator(), ",");
        assert_eq!(config.name_separator(), ":");
        assert_eq!(config.window_size(), 20);
        assert_eq!(config.max_cache(), 2000);
        assert!(!config.smooth_line());
    }

    #[test]
    fn builder_rejects_invalid_values() {
        assert_eq!(
            PlotterConfig::builder().item_separator("").build(),
            Err(ConfigError::EmptySeparator("item"))
        );
        assert_eq!(
            PlotterConfig::builder().name_separator(",").build(),
            Err(ConfigError::SameSeparators(",".to_string()))
        );
        assert_eq!(
            PlotterConfig::builder().window_size(9).build(),
            Err(ConfigError::WindowTooSmall(9))
        );
        assert_eq!(
            PlotterConfig::builder().max_cache(99).build(),
            Err(ConfigError::CacheTooSmall(99))
        );
    }

    #[test]
    fn builder_accepts_boundary_values() {
        let config = PlotterConfig::builder()
            .item_separator(";")
            .name_separator("=")
            .window_size(10)
            .max_cache(100)
            .smooth_line(true)
            .build()
            .unwrap();
        assert_eq!(config.item_separator(), ";");
        assert_eq!(config.window_size(), 10);
        assert_eq!(config.max_cache(), 100);
        assert!(config.smooth_line());
    }

    #[test]
    fn toml_fills_missing_keys_with_defaults() {
        let config = PlotterConfig::from_toml_str("max_cache = 500\nsmooth_line = true\n").unwrap();
        assert_eq!(config.max_cache(), 500);
        assert!(config.smooth_line());
        assert_eq!(config.window_size(), 20);
        assert_eq!(config.item_separator(), ",");
    }

    #[test]
    fn toml_runs_validation() {
        let err = PlotterConfig::from_toml_str("window_size = 3\n").unwrap_err();
        assert!(err.to_string().contains("window size 3"));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plotter.toml");
        std::fs::write(&path, "item_separator = \";\"\nname_separator = \"=\"\n").unwrap();
        let config = PlotterConfig::load(&path).unwrap();
        assert_eq!(config.item_separator(), ";");
        assert_eq!(config.name_separator(), "=");
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = PlotterConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
