use crate::core::config::Config;
use crate::core::credentials::{CredentialSource, Credentials};
use crate::core::dataset::DatasetRef;
use crate::core::download::{DatasetSource, DownloadReport, Downloader};
use crate::core::kaggle::KaggleClient;
use crate::error::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub fn kaggle_source(config: &Config) -> Result<KaggleClient> {
    let (credentials, source) = Credentials::discover()?;
    match &source {
        CredentialSource::Environment => debug!("using Kaggle credentials from environment"),
        CredentialSource::File(path) => {
            debug!(path = %path.display(), "using Kaggle credentials file")
        }
    }

    KaggleClient::new(
        &config.kaggle_api_base,
        credentials,
        Duration::from_secs(config.http_timeout_secs),
    )
}

/// Resolve the dataset and target directory, falling back to config.
pub fn resolve_request(
    config: &Config,
    dataset: Option<&str>,
    dir: Option<&Path>,
) -> Result<(DatasetRef, PathBuf)> {
    let dataset = DatasetRef::parse(dataset.unwrap_or(&config.dataset))?;
    let target = dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.get_raw_dir());
    Ok((dataset, target))
}

pub fn download_with<S: DatasetSource>(
    source: S,
    dataset: &DatasetRef,
    target: &Path,
) -> Result<DownloadReport> {
    let report = Downloader::new(source).download(dataset, target)?;
    print_report(&report);
    Ok(report)
}

pub fn download_dataset(
    config: &Config,
    dataset: Option<&str>,
    dir: Option<&Path>,
) -> Result<DownloadReport> {
    let (dataset, target) = resolve_request(config, dataset, dir)?;
    println!("Downloading dataset '{dataset}'...");
    download_with(kaggle_source(config)?, &dataset, &target)
}

fn print_report(report: &DownloadReport) {
    println!(
        "✅ Dataset downloaded and extracted to: {}",
        report.target_dir.display()
    );
    println!(
        "   {} file(s), {} archive bytes",
        report.files.len(),
        report.archive_bytes
    );
    for file in report.csv_files() {
        let shown = file.strip_prefix(&report.target_dir).unwrap_or(file);
        println!("   • {}", shown.display());
    }
}
