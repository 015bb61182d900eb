use std::env;
use std::path::PathBuf;

use dirs_next::{config_dir, home_dir};

/// Directory name used under the platform configuration directory.
pub const APP_DIR_NAME: &str = "rubrics";

/// Environment variable allowing callers to override the log file path.
pub const LOG_PATH_ENV: &str = "RUBRICS_LOG_PATH";

/// Default filename for the TUI log file.
pub const LOG_FILE_NAME: &str = "rubrics.log";

/// Expands a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    if p == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = p.strip_prefix("~/") {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    if let Some(rest) = p.strip_prefix("~\\") {
        // Windows-style
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(p)
}

/// `<config dir>/rubrics`, falling back to the working directory when the
/// platform has no config directory.
pub fn app_config_dir() -> PathBuf {
    config_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR_NAME)
}

/// Resolves a path from `env_var` when set and non-empty, otherwise
/// `<config dir>/rubrics/<file_name>`.
pub fn path_from_env_or_config(env_var: &str, file_name: &str) -> PathBuf {
    if let Ok(path) = env::var(env_var) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }
    app_config_dir().join(file_name)
}

/// Location of the log file written while the TUI owns the terminal.
pub fn default_log_path() -> PathBuf {
    path_from_env_or_config(LOG_PATH_ENV, LOG_FILE_NAME)
}
