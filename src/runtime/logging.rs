use std::error::Error;
use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// Environment variable holding filter directives; wins over the config file.
pub const LOG_ENV: &str = "ACCELERANDO_LOG";

const DEFAULT_FILTER: &str = "info";

/// Pick the filter directives: environment first, then config, then `info`.
pub(super) fn filter_directives(from_env: Option<String>, configured: Option<&str>) -> String {
    from_env
        .filter(|s| !s.trim().is_empty())
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Install a file-backed subscriber. The terminal belongs to the UI, so
/// without a configured file nothing is installed and `false` is returned.
pub fn init(settings: &LoggingSettings) -> Result<bool, Box<dyn Error>> {
    let Some(path) = &settings.file else {
        return Ok(false);
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let directives = filter_directives(std::env::var(LOG_ENV).ok(), settings.filter.as_deref());
    let filter = EnvFilter::try_new(directives)?;

    let subscriber = tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_target(true)
        .with_ansi(false)
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(true)
}
