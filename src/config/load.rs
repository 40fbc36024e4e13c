use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then layers environment
/// variables (prefix `ACCELERANDO__`) on top and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("ACCELERANDO")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    ///
    /// An empty track list is not checked here; the catalog rejects it at startup.
    pub fn validate(&self) -> Result<(), String> {
        let seek = self.controls.seek_seconds;
        if !seek.is_finite() || seek <= 0.0 {
            return Err("controls.seek_seconds must be a positive number".to_string());
        }
        if self.controls.tick_ms == 0 {
            return Err("controls.tick_ms must be >= 1".to_string());
        }
        let increase = self.ramp.rate_increase_per_track;
        if !increase.is_finite() || increase < 0.0 {
            return Err("ramp.rate_increase_per_track must be >= 0".to_string());
        }
        Ok(())
    }

    /// Render the settings as a TOML document, suitable as a starting `config.toml`.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Resolve the config path from `ACCELERANDO_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("ACCELERANDO_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/accelerando/config.toml`
/// or `~/.config/accelerando/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("accelerando").join("config.toml"))
}
