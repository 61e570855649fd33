use datasnap::core::config::Config;
use datasnap::core::dataset::DatasetRef;
use datasnap::core::download::{DatasetSource, Downloader};
use datasnap::core::preview::Previewer;
use datasnap::error::{DatasnapError, Result};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const POSTINGS: &str = "\
job_id,company_name,title
1,Acme,Engineer
2,Globex,Analyst
3,Initech,Manager
4,Umbrella,Intern
";

/// Hands back a plain CSV, which extraction copies as-is.
struct CsvSource {
    content: &'static str,
}

impl DatasetSource for CsvSource {
    fn fetch(&self, _dataset: &DatasetRef, staging_dir: &Path) -> Result<PathBuf> {
        let path = staging_dir.join("postings.csv");
        std::fs::write(&path, self.content)?;
        Ok(path)
    }
}

fn config_in(temp: &TempDir) -> Config {
    Config {
        data_dir: temp.path().join("data"),
        ..Config::default()
    }
}

#[test]
fn test_preview_before_defaults_to_three_rows() {
    let temp = TempDir::new().unwrap();
    let config = config_in(&temp);
    config.ensure_layout().unwrap();
    std::fs::write(config.get_external_input(), POSTINGS).unwrap();

    let previewer = Previewer::new(config.get_external_input(), config.get_processed_dir());
    let mut out = Vec::new();
    let preview = previewer
        .preview_before_to(config.preview_rows, &mut out)
        .unwrap();

    let expected = "\
   job_id  company_name     title
0       1          Acme  Engineer
1       2        Globex   Analyst
2       3       Initech   Manager
";
    assert_eq!(String::from_utf8(out).unwrap(), expected);
    assert_eq!(preview.rows.len(), 3);
    assert_eq!(preview.total_rows, 4);
}

#[test]
fn test_preview_after_missing_output_prints_nothing() {
    let temp = TempDir::new().unwrap();
    let config = config_in(&temp);

    let previewer = Previewer::new(config.get_external_input(), config.get_processed_dir());
    let mut out = Vec::new();
    let err = previewer
        .preview_after_to("postings_clean.csv", 3, &mut out)
        .unwrap_err();

    assert!(matches!(err, DatasnapError::InputNotFound { .. }));
    assert!(out.is_empty());
}

#[test]
fn test_download_then_preview() {
    let temp = TempDir::new().unwrap();
    let config = config_in(&temp);
    let dataset = DatasetRef::parse(&config.dataset).unwrap();

    let report = Downloader::new(CsvSource { content: POSTINGS })
        .with_staging_root(temp.path())
        .download(&dataset, &config.get_raw_dir())
        .unwrap();
    let downloaded = report.csv_files().next().unwrap().clone();

    // the downloaded file becomes the external input
    std::fs::create_dir_all(config.get_external_dir()).unwrap();
    std::fs::copy(&downloaded, config.get_external_input()).unwrap();

    let previewer = Previewer::new(config.get_external_input(), config.get_processed_dir());
    let mut out = Vec::new();
    previewer
        .preview_before_to(config.preview_rows, &mut out)
        .unwrap();

    let printed = String::from_utf8(out).unwrap();
    assert_eq!(printed.lines().count(), 4);
    assert!(printed.lines().next().unwrap().contains("company_name"));
    assert!(!printed.contains("Umbrella"));
}
