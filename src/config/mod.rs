use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::{Result, WizardError};
use crate::reference::{self, Country};
use crate::services::{
    AddressLookup, DirectorySubmitter, LoggingSubmitter, StaticCatalogue, Submitter,
};
use crate::utils::app_data_dir;

const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Where the finished aggregate is handed off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum SubmissionTarget {
    #[default]
    Log,
    Directory(PathBuf),
}

impl SubmissionTarget {
    pub fn submitter(&self) -> Box<dyn Submitter> {
        match self {
            SubmissionTarget::Log => Box::new(LoggingSubmitter),
            SubmissionTarget::Directory(dir) => Box::new(DirectorySubmitter::new(dir.clone())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
    #[serde(default)]
    pub submission: SubmissionTarget,
    /// Country id pre-selected for address suggestions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_country: Option<String>,
    /// JSON address catalogue backing address suggestions; none disables them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_catalogue: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-GB".into(),
            log_filter: None,
            submission: SubmissionTarget::Log,
            address_country: None,
            address_catalogue: None,
        }
    }
}

impl Config {
    /// Country restriction for address suggestions, when configured and known.
    pub fn address_country(&self) -> Option<&'static Country> {
        self.address_country
            .as_deref()
            .and_then(reference::find_country)
    }

    /// Address collaborators for the CLI, backed by the configured catalogue.
    pub fn address_lookup(&self) -> Result<AddressLookup> {
        match &self.address_catalogue {
            Some(path) => {
                let catalogue = StaticCatalogue::from_path(path)?;
                Ok(AddressLookup::new(Box::new(catalogue.clone()), Box::new(catalogue)))
            }
            None => Ok(AddressLookup::disabled()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        let config_dir = base.join(CONFIG_DIR);
        fs::create_dir_all(&config_dir)?;
        Ok(Self {
            path: config_dir.join(CONFIG_FILE),
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data)
                .map_err(|err| WizardError::Config(format!("{}: {}", self.path.display(), err)))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = Config {
            log_filter: Some("setup_wizard=debug".into()),
            submission: SubmissionTarget::Directory(temp.path().join("out")),
            address_country: Some("hk".into()),
            address_catalogue: Some(temp.path().join("addresses.json")),
            ..Config::default()
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
        assert!(!manager.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), "{ not json").unwrap();
        assert!(matches!(
            manager.load().unwrap_err(),
            WizardError::Config(_)
        ));
    }

    #[test]
    fn address_country_resolves_by_id_or_name() {
        let mut config = Config::default();
        assert!(config.address_country().is_none());
        config.address_country = Some("hk".into());
        assert_eq!(config.address_country().map(|c| c.name), Some("Hong Kong"));
        config.address_country = Some("Atlantis".into());
        assert!(config.address_country().is_none());
    }

    #[test]
    fn address_lookup_follows_configured_catalogue() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        let uk = reference::default_country();
        let disabled = config.address_lookup().unwrap();
        assert!(disabled.suggestions("Downing", uk).is_empty());

        let path = temp.path().join("addresses.json");
        fs::write(
            &path,
            r#"[{ "country": "us", "description": "10 Downing Street" }]"#,
        )
        .unwrap();
        config.address_catalogue = Some(path);
        let lookup = config.address_lookup().unwrap();
        assert_eq!(lookup.suggestions("Downing", uk).len(), 1);

        config.address_catalogue = Some(temp.path().join("missing.json"));
        assert!(config.address_lookup().is_err());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{ "locale": "en-US" }"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.locale, "en-US");
        assert_eq!(config.submission, SubmissionTarget::Log);
    }
}
