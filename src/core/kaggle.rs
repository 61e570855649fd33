use crate::core::credentials::Credentials;
use crate::core::dataset::DatasetRef;
use crate::core::download::DatasetSource;
use crate::error::{DatasnapError, Result};
use crate::utils::fs;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

const USER_AGENT: &str = concat!("datasnap/", env!("CARGO_PKG_VERSION"));

/// Blocking client for the Kaggle dataset download API.
pub struct KaggleClient {
    api_base: String,
    credentials: Credentials,
    http: Client,
}

impl KaggleClient {
    pub fn new(api_base: &str, credentials: Credentials, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            credentials,
            http,
        })
    }

    pub fn download_url(&self, dataset: &DatasetRef) -> String {
        let mut url = format!("{}/datasets/download/{}", self.api_base, dataset.path());
        if let Some(version) = dataset.version() {
            url.push_str(&format!("?datasetVersionNumber={version}"));
        }
        url
    }

    /// Stream `url` into `destination`, creating parent directories as needed.
    /// Returns the number of bytes written.
    pub fn download_file(&self, dataset: &DatasetRef, url: &str, destination: &Path) -> Result<u64> {
        if let Some(parent) = destination.parent() {
            fs::ensure_dir_exists(parent)?;
        }

        debug!(url, "requesting dataset archive");
        let mut response = self
            .http
            .get(url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.key))
            .send()?;

        if let Some(err) = status_error(dataset, url, response.status()) {
            return Err(err);
        }

        let mut file = File::create(destination)?;
        let bytes = response.copy_to(&mut file)?;
        info!(bytes, destination = %destination.display(), "archive downloaded");
        Ok(bytes)
    }
}

impl DatasetSource for KaggleClient {
    fn fetch(&self, dataset: &DatasetRef, staging_dir: &Path) -> Result<PathBuf> {
        let url = self.download_url(dataset);
        let archive_path = staging_dir.join(format!("{}.zip", dataset.slug()));
        self.download_file(dataset, &url, &archive_path)?;
        Ok(archive_path)
    }
}

/// Map a non-success HTTP status to the matching error.
fn status_error(dataset: &DatasetRef, url: &str, status: StatusCode) -> Option<DatasnapError> {
    if status.is_success() {
        return None;
    }

    Some(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => DatasnapError::AuthenticationFailed {
            dataset: dataset.to_string(),
            status: status.as_u16(),
        },
        StatusCode::NOT_FOUND => DatasnapError::DatasetNotFound {
            dataset: dataset.to_string(),
        },
        _ => DatasnapError::DownloadError {
            url: url.to_string(),
            status: status.as_u16(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> KaggleClient {
        KaggleClient::new(base, Credentials::new("user", "key"), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_download_url() {
        let client = client("https://www.kaggle.com/api/v1/");
        let dataset = DatasetRef::parse("arshkon/linkedin-job-postings").unwrap();
        assert_eq!(
            client.download_url(&dataset),
            "https://www.kaggle.com/api/v1/datasets/download/arshkon/linkedin-job-postings"
        );
    }

    #[test]
    fn test_download_url_with_version() {
        let client = client("https://example.test/api/v1");
        let dataset = DatasetRef::parse("owner/data@4").unwrap();
        assert_eq!(
            client.download_url(&dataset),
            "https://example.test/api/v1/datasets/download/owner/data?datasetVersionNumber=4"
        );
    }

    #[test]
    fn test_status_mapping() {
        let dataset = DatasetRef::parse("owner/data").unwrap();
        let url = "https://example.test/x";

        assert!(status_error(&dataset, url, StatusCode::OK).is_none());
        assert!(matches!(
            status_error(&dataset, url, StatusCode::UNAUTHORIZED),
            Some(DatasnapError::AuthenticationFailed { status: 401, .. })
        ));
        assert!(matches!(
            status_error(&dataset, url, StatusCode::FORBIDDEN),
            Some(DatasnapError::AuthenticationFailed { status: 403, .. })
        ));
        assert!(matches!(
            status_error(&dataset, url, StatusCode::NOT_FOUND),
            Some(DatasnapError::DatasetNotFound { .. })
        ));
        assert!(matches!(
            status_error(&dataset, url, StatusCode::INTERNAL_SERVER_ERROR),
            Some(DatasnapError::DownloadError { status: 500, .. })
        ));
    }

    #[test]
    fn test_unreachable_host_is_an_error() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let client = client("http://127.0.0.1:9/api/v1");
        let dataset = DatasetRef::parse("owner/data").unwrap();
        let temp = tempfile::TempDir::new().unwrap();

        let result = client.fetch(&dataset, temp.path());
        assert!(matches!(result, Err(DatasnapError::Http(_))));
    }
}
