use crate::core::dataset::DatasetRef;
use crate::error::{DatasnapError, Result};
use crate::utils::fs;
use chrono::{DateTime, Utc};
use flate2::read::GzDecoder;
use std::fs::File;
use std::path::{Path, PathBuf};
use tar::Archive;
use tracing::{debug, info, warn};
use zip::ZipArchive;

/// Something that can place a dataset archive on local disk.
pub trait DatasetSource {
    /// Fetch the archive for `dataset` into `staging_dir` and return its path.
    fn fetch(&self, dataset: &DatasetRef, staging_dir: &Path) -> Result<PathBuf>;
}

#[derive(Debug, Clone)]
pub struct DownloadReport {
    pub dataset: DatasetRef,
    pub target_dir: PathBuf,
    pub files: Vec<PathBuf>,
    pub archive_bytes: u64,
    pub completed_at: DateTime<Utc>,
}

impl DownloadReport {
    pub fn csv_files(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.iter().filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("csv"))
                .unwrap_or(false)
        })
    }
}

pub struct Downloader<S> {
    source: S,
    staging_root: PathBuf,
}

impl<S: DatasetSource> Downloader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            staging_root: std::env::temp_dir(),
        }
    }

    /// Use `root` instead of the system temp dir for staging archives.
    pub fn with_staging_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.staging_root = root.into();
        self
    }

    /// Fetch `dataset` and extract it into `target_dir`, creating the
    /// directory first. The staging directory is removed either way.
    pub fn download(&self, dataset: &DatasetRef, target_dir: &Path) -> Result<DownloadReport> {
        info!(%dataset, target = %target_dir.display(), "starting dataset download");

        fs::ensure_dir_exists(target_dir)?;

        let staging_dir = self.staging_root.join(format!(
            "datasnap-{}-{}-{}",
            dataset.owner(),
            dataset.slug(),
            Utc::now().format("%Y%m%d-%H%M%S-%f"),
        ));
        fs::ensure_dir_exists(&staging_dir)?;

        let result = self.fetch_and_extract(dataset, &staging_dir, target_dir);

        if let Err(e) = fs::remove_dir_recursive(&staging_dir) {
            warn!(path = %staging_dir.display(), "failed to remove staging directory: {e}");
        }

        let report = result?;
        info!(
            %dataset,
            files = report.files.len(),
            target = %target_dir.display(),
            "dataset downloaded and extracted"
        );
        Ok(report)
    }

    fn fetch_and_extract(
        &self,
        dataset: &DatasetRef,
        staging_dir: &Path,
        target_dir: &Path,
    ) -> Result<DownloadReport> {
        let archive_path = self.source.fetch(dataset, staging_dir)?;
        let archive_bytes = std::fs::metadata(&archive_path)?.len();
        let files = extract_archive(&archive_path, target_dir)?;

        Ok(DownloadReport {
            dataset: dataset.clone(),
            target_dir: target_dir.to_path_buf(),
            files,
            archive_bytes,
            completed_at: Utc::now(),
        })
    }
}

/// Unpack `archive_path` into `destination` and return the files written.
/// Zip and gzipped tar archives are extracted; a bare `.csv` is copied.
pub fn extract_archive(archive_path: &Path, destination: &Path) -> Result<Vec<PathBuf>> {
    info!(archive = %archive_path.display(), destination = %destination.display(), "extracting");

    fs::ensure_dir_exists(destination)?;

    let file_name = archive_path
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_ascii_lowercase())
        .ok_or_else(|| DatasnapError::extraction_error(archive_path, "invalid archive file name"))?;

    let files = if file_name.ends_with(".tar.gz") || file_name.ends_with(".tgz") {
        extract_tar_gz(archive_path, destination)?
    } else if file_name.ends_with(".zip") {
        extract_zip(archive_path, destination)?
    } else if file_name.ends_with(".csv") {
        copy_plain(archive_path, destination)?
    } else {
        return Err(DatasnapError::extraction_error(
            archive_path,
            format!("unsupported archive format: {file_name}"),
        ));
    };

    debug!(count = files.len(), "extraction completed");
    Ok(files)
}

fn extract_tar_gz(archive_path: &Path, destination: &Path) -> Result<Vec<PathBuf>> {
    let file = File::open(archive_path)?;
    let mut archive = Archive::new(GzDecoder::new(file));
    let mut written = Vec::new();

    let entries = archive
        .entries()
        .map_err(|e| DatasnapError::extraction_error(archive_path, e.to_string()))?;

    for entry in entries {
        let mut entry =
            entry.map_err(|e| DatasnapError::extraction_error(archive_path, e.to_string()))?;
        let relative = entry.path()?.into_owned();
        let is_file = entry.header().entry_type().is_file();

        if entry.unpack_in(destination)? {
            if is_file {
                written.push(destination.join(&relative));
            }
        } else {
            warn!(entry = %relative.display(), "skipping archive entry outside destination");
        }
    }

    Ok(written)
}

fn extract_zip(archive_path: &Path, destination: &Path) -> Result<Vec<PathBuf>> {
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file)
        .map_err(|e| DatasnapError::extraction_error(archive_path, e.to_string()))?;
    let mut written = Vec::new();

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let outpath = match file.enclosed_name() {
            Some(path) => destination.join(path),
            None => {
                warn!(entry = file.name(), "skipping archive entry outside destination");
                continue;
            }
        };

        if file.is_dir() {
            fs::ensure_dir_exists(&outpath)?;
        } else {
            if let Some(parent) = outpath.parent() {
                fs::ensure_dir_exists(parent)?;
            }
            let mut outfile = File::create(&outpath)?;
            std::io::copy(&mut file, &mut outfile)?;
            debug!(path = %outpath.display(), "extracted");
            written.push(outpath);
        }
    }

    Ok(written)
}

fn copy_plain(path: &Path, destination: &Path) -> Result<Vec<PathBuf>> {
    let name = path
        .file_name()
        .ok_or_else(|| DatasnapError::extraction_error(path, "invalid file name"))?;
    let target = destination.join(name);
    std::fs::copy(path, &target)?;
    Ok(vec![target])
}
