use crate::error::{DatasnapError, Result};
use crate::utils::fs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "datasnap.toml";
pub const DEFAULT_DATASET: &str = "arshkon/linkedin-job-postings";
pub const DEFAULT_PREVIEW_ROWS: usize = 3;
pub const DEFAULT_KAGGLE_API_BASE: &str = "https://www.kaggle.com/api/v1";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Root of the data layout; the raw/interim/processed/external
    /// directories are resolved relative to it.
    pub data_dir: PathBuf,
    pub raw: PathBuf,
    pub interim: PathBuf,
    pub processed: PathBuf,
    pub external: PathBuf,
    pub dataset: String,
    /// File previewed by `preview_before`, relative to the external dir.
    pub external_input: PathBuf,
    /// File previewed by `preview_after`, relative to the processed dir.
    pub output_file: Option<String>,
    pub preview_rows: usize,
    pub kaggle_api_base: String,
    pub http_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from("data"),
            raw: PathBuf::from("raw"),
            interim: PathBuf::from("interim"),
            processed: PathBuf::from("processed"),
            external: PathBuf::from("external"),
            dataset: DEFAULT_DATASET.to_string(),
            external_input: PathBuf::from("postings.csv"),
            output_file: None,
            preview_rows: DEFAULT_PREVIEW_ROWS,
            kaggle_api_base: DEFAULT_KAGGLE_API_BASE.to_string(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load configuration from `explicit` if given, otherwise from
    /// `./datasnap.toml` if present, otherwise use defaults. Environment
    /// overrides are applied last.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(DatasnapError::config_error(format!(
                        "config file {} does not exist",
                        path.display()
                    )));
                }
                Self::load_from(path)?
            }
            None => {
                let default_path = Path::new(CONFIG_FILE_NAME);
                if default_path.exists() {
                    Self::load_from(default_path)?
                } else {
                    tracing::debug!("no {CONFIG_FILE_NAME} found, using defaults");
                    Config::default()
                }
            }
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| DatasnapError::config_error(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| DatasnapError::config_error(e.to_string()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::ensure_dir_exists(parent)?;
            }
        }

        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.dataset.trim().is_empty() {
            return Err(DatasnapError::config_error("dataset must not be empty"));
        }
        if self.kaggle_api_base.trim().is_empty() {
            return Err(DatasnapError::config_error("kaggle_api_base must not be empty"));
        }
        if self.http_timeout_secs == 0 {
            return Err(DatasnapError::config_error(
                "http_timeout_secs must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Apply `DATASNAP_*` overrides read through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("DATASNAP_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dataset) = lookup("DATASNAP_DATASET") {
            self.dataset = dataset;
        }
        if let Some(rows) = lookup("DATASNAP_PREVIEW_ROWS") {
            self.preview_rows = rows.trim().parse().map_err(|_| {
                DatasnapError::config_error(format!(
                    "DATASNAP_PREVIEW_ROWS must be a non-negative integer, got '{rows}'"
                ))
            })?;
        }
        self.validate()
    }

    pub fn get_raw_dir(&self) -> PathBuf {
        self.data_dir.join(&self.raw)
    }

    pub fn get_interim_dir(&self) -> PathBuf {
        self.data_dir.join(&self.interim)
    }

    pub fn get_processed_dir(&self) -> PathBuf {
        self.data_dir.join(&self.processed)
    }

    pub fn get_external_dir(&self) -> PathBuf {
        self.data_dir.join(&self.external)
    }

    pub fn get_external_input(&self) -> PathBuf {
        self.get_external_dir().join(&self.external_input)
    }

    pub fn data_dirs(&self) -> [PathBuf; 4] {
        [
            self.get_raw_dir(),
            self.get_interim_dir(),
            self.get_processed_dir(),
            self.get_external_dir(),
        ]
    }

    /// Create every data directory of the layout.
    pub fn ensure_layout(&self) -> Result<()> {
        for dir in self.data_dirs() {
            fs::ensure_dir_exists(&dir)?;
        }
        Ok(())
    }
}
