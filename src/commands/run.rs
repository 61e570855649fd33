use crate::commands::download::kaggle_source;
use crate::commands::preview::previewer_for;
use crate::core::config::Config;
use crate::core::dataset::DatasetRef;
use crate::core::download::{DatasetSource, Downloader};
use crate::error::Result;
use std::fmt;
use std::io::Write;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Download,
    PreviewInput,
    PreviewOutput,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Download => "download",
            Step::PreviewInput => "preview input",
            Step::PreviewOutput => "preview output",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepStatus {
    Succeeded,
    Failed(String),
    Skipped(String),
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub steps: Vec<(Step, StepStatus)>,
}

impl RunSummary {
    pub fn status(&self, step: Step) -> Option<&StepStatus> {
        self.steps.iter().find(|(s, _)| *s == step).map(|(_, status)| status)
    }

    pub fn failures(&self) -> usize {
        self.steps
            .iter()
            .filter(|(_, status)| matches!(status, StepStatus::Failed(_)))
            .count()
    }

    /// Record the outcome of a step, logging failures at this boundary.
    fn record<T>(&mut self, step: Step, result: Result<T>) {
        let status = match result {
            Ok(_) => StepStatus::Succeeded,
            Err(e) => {
                error!(%step, "step failed: {e}");
                StepStatus::Failed(e.to_string())
            }
        };
        self.steps.push((step, status));
    }

    fn skip(&mut self, step: Step, reason: &str) {
        warn!(%step, "step skipped: {reason}");
        self.steps.push((step, StepStatus::Skipped(reason.to_string())));
    }
}

/// Run the full workflow against Kaggle, printing previews to stdout.
pub fn run_pipeline(config: &Config) -> RunSummary {
    run_with(config, || kaggle_source(config), &mut std::io::stdout().lock())
}

/// Download, preview the external input, then preview the processed
/// output. Every step runs even if an earlier one failed.
pub fn run_with<S, F, W>(config: &Config, make_source: F, out: &mut W) -> RunSummary
where
    S: DatasetSource,
    F: FnOnce() -> Result<S>,
    W: Write,
{
    let mut summary = RunSummary::default();

    info!(dataset = %config.dataset, "starting run");
    let downloaded = DatasetRef::parse(&config.dataset).and_then(|dataset| {
        let source = make_source()?;
        Downloader::new(source).download(&dataset, &config.get_raw_dir())
    });
    summary.record(Step::Download, downloaded);

    let previewer = previewer_for(config);
    debug!(input = %previewer.external_input().display(), "previewing external input");
    summary.record(
        Step::PreviewInput,
        previewer.preview_before_to(config.preview_rows, out),
    );

    match config.output_file.as_deref() {
        Some(filename) => summary.record(
            Step::PreviewOutput,
            previewer.preview_after_to(filename, config.preview_rows, out),
        ),
        None => summary.skip(Step::PreviewOutput, "no output_file configured"),
    }

    info!(failures = summary.failures(), "run finished");
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DatasnapError;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    struct FailingSource;

    impl DatasetSource for FailingSource {
        fn fetch(&self, dataset: &DatasetRef, _staging_dir: &Path) -> Result<PathBuf> {
            Err(DatasnapError::DatasetNotFound {
                dataset: dataset.to_string(),
            })
        }
    }

    fn config_in(temp: &TempDir) -> Config {
        Config {
            data_dir: temp.path().join("data"),
            ..Config::default()
        }
    }

    #[test]
    fn test_run_continues_after_failures() {
        let temp = TempDir::new().unwrap();
        let config = config_in(&temp);

        let mut out = Vec::new();
        let summary = run_with(&config, || Ok(FailingSource), &mut out);

        assert!(matches!(summary.status(Step::Download), Some(StepStatus::Failed(_))));
        assert!(matches!(summary.status(Step::PreviewInput), Some(StepStatus::Failed(_))));
        assert!(matches!(summary.status(Step::PreviewOutput), Some(StepStatus::Skipped(_))));
        assert_eq!(summary.failures(), 2);
        assert!(out.is_empty());
    }

    #[test]
    fn test_run_reports_missing_source() {
        let temp = TempDir::new().unwrap();
        let config = config_in(&temp);

        let mut out = Vec::new();
        let summary = run_with::<FailingSource, _, _>(
            &config,
            || {
                Err(DatasnapError::MissingCredentials {
                    message: "none".to_string(),
                })
            },
            &mut out,
        );

        match summary.status(Step::Download) {
            Some(StepStatus::Failed(message)) => assert!(message.contains("credentials")),
            other => panic!("unexpected status: {other:?}"),
        }
    }

    #[test]
    fn test_run_previews_existing_files() {
        let temp = TempDir::new().unwrap();
        let mut config = config_in(&temp);
        config.output_file = Some("clean.csv".to_string());
        config.ensure_layout().unwrap();
        std::fs::write(config.get_external_input(), "id,title\n1,Engineer\n").unwrap();
        std::fs::write(config.get_processed_dir().join("clean.csv"), "id\n1\n").unwrap();

        let mut out = Vec::new();
        let summary = run_with(&config, || Ok(FailingSource), &mut out);

        assert_eq!(summary.status(Step::PreviewInput), Some(&StepStatus::Succeeded));
        assert_eq!(summary.status(Step::PreviewOutput), Some(&StepStatus::Succeeded));
        assert_eq!(summary.failures(), 1);
        assert!(String::from_utf8(out).unwrap().contains("Engineer"));
    }
}
