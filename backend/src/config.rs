//! # Money Config Store
//!
//! File-based storage for the money input configuration, kept as a single
//! YAML file `money_config.yaml` in the configuration directory.
//!
//! ## YAML Format
//!
//! ```yaml
//! min_amount_cents: 1
//! max_amount_cents: 1000000000
//! rounding_mode: half_up
//! ```
//!
//! A missing file is created with the defaults. Writes go through a temp
//! file and a rename so a crash never leaves a half-written config behind.

use anyhow::{bail, Context, Result};
use log::{debug, info};
use shared::MoneyConfig;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "money_config.yaml";

#[derive(Debug, Clone)]
pub struct MoneyConfigStore {
    base_directory: PathBuf,
}

impl MoneyConfigStore {
    pub fn new(base_directory: impl Into<PathBuf>) -> Self {
        Self {
            base_directory: base_directory.into(),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.base_directory.join(CONFIG_FILE_NAME)
    }

    /// Load the config from disk, creating the default file if it doesn't exist
    pub fn load_or_create(&self) -> Result<MoneyConfig> {
        let config_path = self.config_path();

        if config_path.exists() {
            let yaml_content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {:?}", config_path))?;
            let config: MoneyConfig = serde_yaml::from_str(&yaml_content)
                .with_context(|| format!("Failed to parse {:?}", config_path))?;
            validate_config(&config)?;
            debug!("Loaded money config from {:?}", config_path);
            Ok(config)
        } else {
            let config = MoneyConfig::default();
            self.save(&config)?;
            info!("Created default money config at {:?}", config_path);
            Ok(config)
        }
    }

    /// Validate and write the config atomically
    pub fn save(&self, config: &MoneyConfig) -> Result<()> {
        validate_config(config)?;

        if !self.base_directory.exists() {
            fs::create_dir_all(&self.base_directory)
                .with_context(|| format!("Failed to create {:?}", self.base_directory))?;
        }

        let config_path = self.config_path();
        let temp_path = config_path.with_extension("yaml.tmp");
        let yaml_content = serde_yaml::to_string(config)?;
        fs::write(&temp_path, yaml_content)
            .with_context(|| format!("Failed to write {:?}", temp_path))?;
        if let Err(e) = fs::rename(&temp_path, &config_path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e).with_context(|| format!("Failed to replace {:?}", config_path));
        }

        debug!("Saved money config to {:?}", config_path);
        Ok(())
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }
}

fn validate_config(config: &MoneyConfig) -> Result<()> {
    if config.min_amount_cents.value() < 1 {
        bail!(
            "min_amount_cents must be at least 1, got {}",
            config.min_amount_cents.value()
        );
    }
    if config.max_amount_cents < config.min_amount_cents {
        bail!(
            "max_amount_cents ({}) must not be below min_amount_cents ({})",
            config.max_amount_cents.value(),
            config.min_amount_cents.value()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Cents, RoundingMode};
    use tempfile::TempDir;

    #[test]
    fn test_load_or_create_writes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let store = MoneyConfigStore::new(temp_dir.path());

        let config = store.load_or_create().unwrap();

        assert_eq!(config, MoneyConfig::default());
        assert!(store.config_path().exists());
        assert!(!store.config_path().with_extension("yaml.tmp").exists());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let store = MoneyConfigStore::new(temp_dir.path().join("nested"));
        let config = MoneyConfig {
            min_amount_cents: Cents(100),
            max_amount_cents: Cents(50_000),
            rounding_mode: RoundingMode::HalfEven,
        };

        store.save(&config).unwrap();
        let loaded = store.load_or_create().unwrap();

        assert_eq!(loaded, config);
        assert_eq!(store.base_directory(), temp_dir.path().join("nested").as_path());
    }

    #[test]
    fn test_load_hand_written_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let store = MoneyConfigStore::new(temp_dir.path());
        fs::write(
            store.config_path(),
            "min_amount_cents: 50\nmax_amount_cents: 200000\n",
        )
        .unwrap();

        let config = store.load_or_create().unwrap();

        assert_eq!(config.min_amount_cents, Cents(50));
        assert_eq!(config.max_amount_cents, Cents(200_000));
        assert_eq!(config.rounding_mode, RoundingMode::HalfUp);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = MoneyConfigStore::new(temp_dir.path());

        let inverted = MoneyConfig {
            min_amount_cents: Cents(500),
            max_amount_cents: Cents(100),
            rounding_mode: RoundingMode::HalfUp,
        };
        assert!(store.save(&inverted).is_err());

        fs::write(store.config_path(), "min_amount_cents: 0\nmax_amount_cents: 100\n").unwrap();
        assert!(store.load_or_create().is_err());

        fs::write(store.config_path(), "not: [valid").unwrap();
        assert!(store.load_or_create().is_err());
    }

    #[test]
    fn test_failed_replace_cleans_up_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = MoneyConfigStore::new(temp_dir.path());
        // A non-empty directory where the config file belongs makes the rename fail
        fs::create_dir_all(store.config_path().join("occupied")).unwrap();

        let err = store.save(&MoneyConfig::default()).unwrap_err();

        assert!(format!("{:#}", err).contains("Failed to replace"));
        assert!(!store.config_path().with_extension("yaml.tmp").exists());
        assert!(store.config_path().is_dir());
    }
}
