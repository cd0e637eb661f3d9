use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "SITEBOARD_DATA_DIR";

/// Get the config file path, respecting XDG_CONFIG_HOME
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".config"));
    config_dir.join("siteboard").join("config.toml")
}

/// Default data directory, respecting XDG_DATA_HOME
pub fn default_data_dir() -> PathBuf {
    let data_dir = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".local").join("share"));
    data_dir.join("siteboard")
}

/// Get the user's home directory
fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// Expand a leading `~/` to the home directory
pub fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs_home().join(rest),
        None => PathBuf::from(path),
    }
}

/// Read the config from a specific path.
/// If the file doesn't exist, returns the defaults.
/// If the file is corrupted, backs it up as .bak and returns the defaults.
pub fn read_config_from(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }

    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str::<Config>(&content) {
            Ok(config) => config,
            Err(e) => {
                let bak = path.with_extension("toml.bak");
                let _ = fs::copy(path, &bak);
                // Logging is not set up yet (its filter comes from this file)
                eprintln!(
                    "warning: could not parse {} (backed up as {}): {}",
                    path.display(),
                    bak.display(),
                    e
                );
                Config::default()
            }
        },
        Err(_) => Config::default(),
    }
}

/// Read the config from the default location.
pub fn read_config() -> Config {
    read_config_from(&config_path())
}

/// Pick the data directory: explicit flag, then environment, then config,
/// then the XDG default.
pub fn resolve_data_dir(flag: Option<&str>, config: &Config) -> PathBuf {
    if let Some(dir) = flag {
        return expand_home(dir);
    }
    if let Ok(dir) = std::env::var(DATA_DIR_ENV)
        && !dir.is_empty()
    {
        return expand_home(&dir);
    }
    if let Some(dir) = &config.storage.data_dir {
        return expand_home(dir);
    }
    default_data_dir()
}
