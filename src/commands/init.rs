use crate::core::config::{Config, CONFIG_FILE_NAME};
use crate::error::{DatasnapError, Result};
use std::path::Path;

/// Write a default `datasnap.toml` into `project_dir` and create the data
/// directories it describes.
pub fn init_project(project_dir: &Path, force: bool) -> Result<Config> {
    let config_path = project_dir.join(CONFIG_FILE_NAME);
    if config_path.exists() && !force {
        return Err(DatasnapError::config_error(format!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        )));
    }

    let config = Config::default();
    config.save(&config_path)?;

    let layout = Config {
        data_dir: project_dir.join(&config.data_dir),
        ..config.clone()
    };
    layout.ensure_layout()?;

    println!("🔧 Initialized datasnap project");
    println!("  - Configuration: {}", config_path.display());
    for dir in layout.data_dirs() {
        println!("  - {}", dir.display());
    }
    println!();
    println!("Place the file to inspect at {}", layout.get_external_input().display());
    println!("Then run 'datasnap run' to download and preview.");

    Ok(config)
}
