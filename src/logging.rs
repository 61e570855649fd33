use tracing_subscriber::EnvFilter;

/// Filter directive for a verbosity level when `RUST_LOG` is unset.
pub fn default_directive(verbose: u8, quiet: bool) -> String {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    if quiet || verbose >= 2 {
        level.to_string()
    } else {
        format!("warn,datasnap={level}")
    }
}

/// Install the global subscriber. Logs go to stderr so previews on stdout
/// stay clean.
pub fn init(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
