use dirs::home_dir;
use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".setup_wizard";
const DEFAULT_DIRECTIVE: &str = "setup_wizard=info";

/// Installs the global tracing subscriber. `RUST_LOG` wins over the
/// configured filter, which wins over the crate default. Logs go to stderr.
pub fn init_tracing(filter: Option<&str>) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter.unwrap_or(DEFAULT_DIRECTIVE)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Returns the application data directory, defaulting to `~/.setup_wizard`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("SETUP_WIZARD_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}
