//! CLI configuration file
//!
//! Optional TOML file providing defaults for the command-line tool;
//! flags given on the command line always win. Looked up at
//! `<config dir>/image-splitter/config.toml` unless an explicit path is
//! given.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SplitError};
use crate::options::SplitOptions;

/// Values a config file may provide
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Per-channel color tolerance
    pub tolerance: Option<u8>,
    /// Trim padding in pixels
    pub padding: Option<u32>,
    /// Minimum band length as percent of the dimension (0-90)
    pub min_section_percent: Option<f32>,
    /// Write sections into a per-image subdirectory
    pub create_subdir: Option<bool>,
}

/// Command-line values that override the config file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub tolerance: Option<u8>,
    pub padding: Option<u32>,
    pub min_section_percent: Option<f32>,
}

impl Config {
    /// Default config file location
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("image-splitter").join("config.toml"))
    }

    /// Load from the default location; absent file means defaults.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from an explicit path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| SplitError::InvalidConfig(e.to_string()))
    }

    /// Resolve final options: CLI > config file > built-in defaults
    pub fn split_options(&self, cli: &CliOverrides) -> SplitOptions {
        let defaults = SplitOptions::default();
        let mut builder = SplitOptions::builder()
            .tolerance(cli.tolerance.or(self.tolerance).unwrap_or(defaults.tolerance))
            .padding(cli.padding.or(self.padding).unwrap_or(defaults.padding));
        if let Some(percent) = cli.min_section_percent.or(self.min_section_percent) {
            builder = builder.min_band_fraction(percent / 100.0);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        let opts = config.split_options(&CliOverrides::default());
        assert_eq!(opts.tolerance, 25);
        assert_eq!(opts.padding, 0);
    }

    #[test]
    fn test_file_values_parsed() {
        let config: Config = toml::from_str(
            r#"
            tolerance = 40
            padding = 3
            min_section_percent = 5.0
            create_subdir = true
            "#,
        )
        .unwrap();
        let opts = config.split_options(&CliOverrides::default());
        assert_eq!(opts.tolerance, 40);
        assert_eq!(opts.padding, 3);
        assert!((opts.min_band_fraction - 0.05).abs() < 1e-6);
        assert_eq!(config.create_subdir, Some(true));
    }

    #[test]
    fn test_cli_overrides_file() {
        let config: Config = toml::from_str("tolerance = 40").unwrap();
        let cli = CliOverrides {
            tolerance: Some(10),
            ..Default::default()
        };
        assert_eq!(config.split_options(&cli).tolerance, 10);
    }

    #[test]
    fn test_load_from_path_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "tolerance = \"lots\"").unwrap();
        let result = Config::load_from_path(&path);
        assert!(matches!(result, Err(SplitError::InvalidConfig(_))));
    }

    #[test]
    fn test_load_missing_path_is_io_error() {
        let result = Config::load_from_path(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(SplitError::Io(_))));
    }
}
