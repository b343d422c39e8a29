mod config;

pub use config::{ApiConfig, ColorPalette, Config, TimelineConfig, API_URL_ENV, TOKEN_ENV};

use std::path::PathBuf;

/// Environment variable pointing at an explicit config directory.
pub const CONFIG_DIR_ENV: &str = "TASKLINE_CONFIG_DIR";

/// Resolves the configuration directory without touching the filesystem.
///
/// `TASKLINE_CONFIG_DIR` wins when set. Otherwise `~/.config/taskline[-dev]/`
/// based on `TASKLINE_ENV` (set `TASKLINE_ENV=dev` for the development dir).
pub fn config_dir() -> PathBuf {
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(explicit) if !explicit.is_empty() => PathBuf::from(explicit),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("TASKLINE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("taskline-dev")
            } else {
                base_dir.join("taskline")
            }
        }
    }
}

/// Returns the configuration directory, creating it if needed.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> crate::error::Result<PathBuf> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
