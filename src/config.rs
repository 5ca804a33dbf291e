//! Decoder configuration and validation.
//!
//! Settings come from three layers, later ones winning: built-in defaults,
//! an optional TOML file, and command-line overrides.

use crate::constants::{
    APP_NAME, CONFIG_FILE_NAME, DEFAULT_IMPERIAL_UNLIMITED_VISIBILITY_SM, DEFAULT_MATCH_BUDGET_MS,
    DEFAULT_METRIC_UNLIMITED_VISIBILITY_M,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Settings used to build a decoder chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Strictness for `decode`; `None` defers to the process-wide default
    pub strict: Option<bool>,

    /// Upper bound for a single chunk pattern match, in milliseconds
    pub match_budget_ms: u64,

    /// Metric prevailing visibility reported as unlimited (meters)
    pub metric_unlimited_visibility_m: f64,

    /// Imperial prevailing visibility reported as unlimited (statute miles)
    pub imperial_unlimited_visibility_sm: f64,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            strict: None,
            match_budget_ms: DEFAULT_MATCH_BUDGET_MS,
            metric_unlimited_visibility_m: DEFAULT_METRIC_UNLIMITED_VISIBILITY_M,
            imperial_unlimited_visibility_sm: DEFAULT_IMPERIAL_UNLIMITED_VISIBILITY_SM,
        }
    }
}

/// Command-line values that override file settings
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub strict: Option<bool>,
    pub match_budget_ms: Option<u64>,
}

impl DecoderConfig {
    /// Set the strictness used by `decode`
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }

    /// Set the per-chunk match budget
    pub fn with_match_budget(mut self, budget: Duration) -> Self {
        self.match_budget_ms = u64::try_from(budget.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the metric and imperial unlimited visibility cutoffs
    pub fn with_unlimited_visibility(mut self, metric_m: f64, imperial_sm: f64) -> Self {
        self.metric_unlimited_visibility_m = metric_m;
        self.imperial_unlimited_visibility_sm = imperial_sm;
        self
    }

    pub fn match_budget(&self) -> Duration {
        Duration::from_millis(self.match_budget_ms)
    }

    /// Check settings for consistency
    pub fn validate(&self) -> Result<()> {
        if self.match_budget_ms == 0 {
            return Err(Error::configuration(
                "Match budget must be greater than 0 ms".to_string(),
            ));
        }

        if !(self.metric_unlimited_visibility_m.is_finite()
            && self.metric_unlimited_visibility_m > 0.0)
        {
            return Err(Error::configuration(format!(
                "Metric unlimited visibility must be a positive distance, got {}",
                self.metric_unlimited_visibility_m
            )));
        }

        if !(self.imperial_unlimited_visibility_sm.is_finite()
            && self.imperial_unlimited_visibility_sm > 0.0)
        {
            return Err(Error::configuration(format!(
                "Imperial unlimited visibility must be a positive distance, got {}",
                self.imperial_unlimited_visibility_sm
            )));
        }

        Ok(())
    }

    /// Read and validate a TOML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file {}", path.display()),
                e,
            )
        })?;

        let config: Self =
            toml::from_str(&contents).map_err(|e| Error::config_file(path, e))?;
        config.validate()?;

        debug!("Loaded decoder configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML settings held in memory
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Per-user configuration file location, e.g. `~/.config/metar-decoder/config.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE_NAME))
    }

    /// Combine defaults, a configuration file and command-line overrides
    ///
    /// An explicit `file` must exist. Without one, the per-user file is used
    /// when present.
    pub fn load_layered(file: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        let mut config = match file {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::configuration(format!(
                        "Config file does not exist: {}",
                        path.display()
                    )));
                }
                Self::load(path)?
            }
            None => match Self::default_config_path().filter(|path| path.is_file()) {
                Some(path) => Self::load(&path)?,
                None => Self::default(),
            },
        };

        if let Some(strict) = overrides.strict {
            config.strict = Some(strict);
        }
        if let Some(budget_ms) = overrides.match_budget_ms {
            config.match_budget_ms = budget_ms;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = DecoderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.match_budget(), Duration::from_millis(500));
        assert_eq!(config.strict, None);
    }

    #[test]
    fn test_builder_methods() {
        let config = DecoderConfig::default()
            .with_strict(true)
            .with_match_budget(Duration::from_millis(50))
            .with_unlimited_visibility(8000.0, 6.0);

        assert_eq!(config.strict, Some(true));
        assert_eq!(config.match_budget_ms, 50);
        assert_eq!(config.metric_unlimited_visibility_m, 8000.0);
        assert_eq!(config.imperial_unlimited_visibility_sm, 6.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = DecoderConfig {
            match_budget_ms: 0,
            ..DecoderConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Configuration { .. })));

        let config = DecoderConfig::default().with_unlimited_visibility(-1.0, 10.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_toml_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "strict = true").unwrap();
        writeln!(file, "match_budget_ms = 250").unwrap();

        let config = DecoderConfig::load(file.path()).unwrap();
        assert_eq!(config.strict, Some(true));
        assert_eq!(config.match_budget_ms, 250);
        assert_eq!(config.metric_unlimited_visibility_m, 9999.0);
    }

    #[test]
    fn test_load_invalid_toml_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "match_budget_ms = \"fast\"").unwrap();

        let result = DecoderConfig::load(file.path());
        assert!(matches!(result, Err(Error::ConfigFile { .. })));
    }

    #[test]
    fn test_from_toml() {
        let config = DecoderConfig::from_toml("imperial_unlimited_visibility_sm = 6.0").unwrap();
        assert_eq!(config.imperial_unlimited_visibility_sm, 6.0);
        assert_eq!(config.match_budget_ms, 500);

        assert!(matches!(
            DecoderConfig::from_toml("strict = 1"),
            Err(Error::ConfigFile { .. })
        ));
        assert!(DecoderConfig::from_toml("match_budget_ms = 0").is_err());
    }

    #[test]
    fn test_load_layered_overrides_win() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "strict = false").unwrap();

        let overrides = ConfigOverrides {
            strict: Some(true),
            match_budget_ms: Some(100),
        };
        let config = DecoderConfig::load_layered(Some(file.path()), &overrides).unwrap();

        assert_eq!(config.strict, Some(true));
        assert_eq!(config.match_budget_ms, 100);
    }

    #[test]
    fn test_load_layered_missing_file() {
        let result = DecoderConfig::load_layered(
            Some(Path::new("/nonexistent/metar-decoder.toml")),
            &ConfigOverrides::default(),
        );
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }
}
