use crate::core::config::Config;
use crate::core::credentials::{CredentialSource, Credentials};
use crate::core::dataset::DatasetRef;
use crate::error::Result;
use crate::utils::fs;

/// Print the state of the data layout and credentials. Returns the number
/// of issues found.
pub fn check_environment(config: &Config) -> Result<usize> {
    println!("🔍 datasnap - Environment Check");
    println!();

    let mut issues_found = 0;

    println!("📁 Data Directories:");
    for dir in config.data_dirs() {
        println!("  {}", dir.display());
        if dir.is_dir() {
            println!("    ✅ exists");
        } else {
            println!("    ❌ missing (created on first use, or run 'datasnap init')");
            issues_found += 1;
        }
    }
    println!();

    println!("📦 Dataset:");
    match DatasetRef::parse(&config.dataset) {
        Ok(dataset) => println!("  ✅ {dataset}"),
        Err(e) => {
            println!("  ❌ {e}");
            issues_found += 1;
        }
    }

    let raw_dir = config.get_raw_dir();
    if fs::is_dir_empty(&raw_dir)? {
        println!("  ⚠️  {} is empty, run 'datasnap download'", raw_dir.display());
    } else {
        let total = fs::list_files_recursive(&raw_dir)?.len();
        println!("  {total} file(s) in {}", raw_dir.display());
    }

    let csvs = fs::find_files_with_extension(&raw_dir, "csv")?;
    if csvs.is_empty() {
        println!("  ⚠️  No CSV files in {} yet", raw_dir.display());
    } else {
        println!("  {} CSV file(s) downloaded:", csvs.len());
        for csv in &csvs {
            let shown = csv.strip_prefix(&raw_dir).unwrap_or(csv);
            println!("    • {}", shown.display());
        }
    }
    println!();

    println!("🔑 Kaggle Credentials:");
    match Credentials::discover() {
        Ok((credentials, CredentialSource::Environment)) => {
            println!("  ✅ {} (from environment)", credentials.username)
        }
        Ok((credentials, CredentialSource::File(path))) => {
            println!("  ✅ {} (from {})", credentials.username, path.display())
        }
        Err(e) => {
            println!("  ❌ {e}");
            issues_found += 1;
        }
    }
    println!();

    println!("📝 Preview Input:");
    let input = config.get_external_input();
    if input.is_file() {
        println!("  ✅ {}", input.display());
    } else {
        println!("  ⚠️  {} not found", input.display());
    }
    match &config.output_file {
        Some(name) => println!("  output file: {}", config.get_processed_dir().join(name).display()),
        None => println!("  output file: not configured"),
    }
    println!();

    if issues_found == 0 {
        println!("✅ No issues found");
    } else {
        println!("⚠️  {issues_found} issue(s) found");
    }

    Ok(issues_found)
}
