use crate::core::config::Config;
use crate::core::preview::{self, Previewer, TabularPreview};
use crate::error::Result;
use std::path::Path;

pub fn previewer_for(config: &Config) -> Previewer {
    Previewer::new(config.get_external_input(), config.get_processed_dir())
}

/// Preview any CSV file on disk.
pub fn preview_file(path: &Path, rows: usize) -> Result<TabularPreview> {
    preview::show(path, rows, &mut std::io::stdout().lock())
}

/// Preview the configured external input.
pub fn preview_input(config: &Config, rows: usize) -> Result<TabularPreview> {
    previewer_for(config).preview_before(rows)
}

/// Preview `filename` inside the processed-data directory.
pub fn preview_output(config: &Config, filename: &str, rows: usize) -> Result<TabularPreview> {
    previewer_for(config).preview_after(filename, rows)
}
