//! Loader configuration.
//!
//! Settings loaded from an INI configuration file. Defaults are usable as-is;
//! the file only overrides what it names.
//!
//! # Configuration File Format
//!
//! ```ini
//! [assets]
//! dir = ./assets/sprites
//!
//! [scale]
//! factor = 2
//! filter = nearest
//! ```

use std::path::PathBuf;

use configparser::ini::Ini;
use log::info;

use crate::error::{AssetError, Result};
use crate::geometry::ScaleFactor;
use crate::surface::ResizeFilter;

/// Default safe values for startup
const DEFAULT_ASSET_DIR: &str = "./assets/sprites";
const DEFAULT_SCALE: f64 = 1.0;
const DEFAULT_CONFIG_PATH: &str = "./spritetools.ini";

/// Where sheets are looked up and how they are scaled.
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    /// Directory holding `<name>.data` / `<name>.png` pairs.
    pub asset_dir: PathBuf,
    /// Scale applied to images, frames and positions.
    pub scale: ScaleFactor,
    /// Resampling used when scaling images.
    pub filter: ResizeFilter,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LoaderConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            asset_dir: PathBuf::from(DEFAULT_ASSET_DIR),
            scale: ScaleFactor::new(DEFAULT_SCALE),
            filter: ResizeFilter::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values.
    pub fn load_from_file(&mut self) -> Result<()> {
        let mut config = Ini::new();
        config.load(&self.config_path).map_err(|e| {
            AssetError::Config(format!(
                "failed to load {}: {}",
                self.config_path.display(),
                e
            ))
        })?;
        self.apply(&config)?;
        info!(
            "Loaded config from {}: dir={}, scale={}, filter={}",
            self.config_path.display(),
            self.asset_dir.display(),
            self.scale.value(),
            self.filter.as_str()
        );
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<()> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| AssetError::Config(format!("failed to parse config: {}", e)))?;
        self.apply(&config)
    }

    fn apply(&mut self, config: &Ini) -> Result<()> {
        // [assets] section
        if let Some(dir) = config.get("assets", "dir") {
            self.asset_dir = PathBuf::from(dir);
        }

        // [scale] section
        let factor = config
            .getfloat("scale", "factor")
            .map_err(|e| AssetError::Config(format!("[scale] factor: {}", e)))?;
        if let Some(factor) = factor {
            self.scale = ScaleFactor::new(factor);
        }
        if let Some(filter) = config.get("scale", "filter") {
            self.filter = filter.parse()?;
        }
        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<()> {
        let mut config = Ini::new();

        // [assets] section
        config.set(
            "assets",
            "dir",
            Some(self.asset_dir.to_string_lossy().into_owned()),
        );

        // [scale] section
        config.set("scale", "factor", Some(self.scale.value().to_string()));
        config.set("scale", "filter", Some(self.filter.as_str().to_string()));

        config.write(&self.config_path).map_err(|source| AssetError::Io {
            path: self.config_path.clone(),
            source,
        })?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoaderConfig::new();
        assert_eq!(config.asset_dir, PathBuf::from("./assets/sprites"));
        assert_eq!(config.scale, ScaleFactor::IDENTITY);
        assert_eq!(config.filter, ResizeFilter::Nearest);
    }

    #[test]
    fn test_load_from_str_overrides_named_values() {
        let mut config = LoaderConfig::new();
        config
            .load_from_str("[assets]\ndir = sprites/hd\n\n[scale]\nfactor = 3\nfilter = smooth\n")
            .unwrap();
        assert_eq!(config.asset_dir, PathBuf::from("sprites/hd"));
        assert_eq!(config.scale, ScaleFactor::from(3));
        assert_eq!(config.filter, ResizeFilter::Smooth);
    }

    #[test]
    fn test_load_from_str_keeps_missing_values() {
        let mut config = LoaderConfig::new();
        config.load_from_str("[scale]\nfactor = 2.5\n").unwrap();
        assert_eq!(config.asset_dir, PathBuf::from("./assets/sprites"));
        assert_eq!(config.scale, ScaleFactor::new(2.5));
        assert_eq!(config.filter, ResizeFilter::Nearest);
    }

    #[test]
    fn test_load_from_str_rejects_bad_values() {
        let mut config = LoaderConfig::new();
        assert!(config.load_from_str("[scale]\nfactor = big\n").is_err());
        assert!(config.load_from_str("[scale]\nfilter = lanczos\n").is_err());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let path = std::env::temp_dir().join(format!("spritetools-{}.ini", std::process::id()));
        let saved = LoaderConfig {
            asset_dir: PathBuf::from("sprites/hd"),
            scale: ScaleFactor::new(2.5),
            filter: ResizeFilter::Smooth,
            config_path: path.clone(),
        };
        saved.save_to_file().unwrap();

        let mut loaded = LoaderConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, saved);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let mut config = LoaderConfig::with_path("does/not/exist.ini");
        assert!(matches!(config.load_from_file(), Err(AssetError::Config(_))));
    }
}
