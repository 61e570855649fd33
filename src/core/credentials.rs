use crate::error::{DatasnapError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const CREDENTIALS_FILE: &str = "kaggle.json";

/// Kaggle API credentials, as stored in `kaggle.json`.
#[derive(Clone, Deserialize, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub key: String,
}

// Keep the key out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("key", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CredentialSource {
    Environment,
    File(PathBuf),
}

impl Credentials {
    pub fn new<U: Into<String>, K: Into<String>>(username: U, key: K) -> Self {
        Self {
            username: username.into(),
            key: key.into(),
        }
    }

    /// Resolve credentials from the process environment and home directory.
    pub fn discover() -> Result<(Self, CredentialSource)> {
        Self::discover_with(|key| std::env::var(key).ok(), dirs::home_dir())
    }

    /// Resolution order: `KAGGLE_USERNAME` + `KAGGLE_KEY`, then
    /// `$KAGGLE_CONFIG_DIR/kaggle.json`, then `<home>/.kaggle/kaggle.json`.
    pub fn discover_with<F>(lookup: F, home: Option<PathBuf>) -> Result<(Self, CredentialSource)>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let (Some(username), Some(key)) = (lookup("KAGGLE_USERNAME"), lookup("KAGGLE_KEY")) {
            if !username.is_empty() && !key.is_empty() {
                return Ok((Self::new(username, key), CredentialSource::Environment));
            }
        }

        let mut candidates = Vec::new();
        if let Some(dir) = lookup("KAGGLE_CONFIG_DIR") {
            candidates.push(PathBuf::from(dir).join(CREDENTIALS_FILE));
        }
        if let Some(home) = home {
            candidates.push(home.join(".kaggle").join(CREDENTIALS_FILE));
        }

        for path in &candidates {
            if path.exists() {
                let credentials = Self::load_from(path)?;
                return Ok((credentials, CredentialSource::File(path.clone())));
            }
        }

        let searched = candidates
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(DatasnapError::MissingCredentials {
            message: format!(
                "set KAGGLE_USERNAME and KAGGLE_KEY or create one of: {}",
                if searched.is_empty() { "~/.kaggle/kaggle.json" } else { searched.as_str() }
            ),
        })
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let credentials: Credentials = serde_json::from_str(&content)?;
        if credentials.username.is_empty() || credentials.key.is_empty() {
            return Err(DatasnapError::MissingCredentials {
                message: format!("{} has an empty username or key", path.display()),
            });
        }
        Ok(credentials)
    }
}
