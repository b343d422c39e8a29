//! `config` subcommands over `config.toml`.
//!
//! Keys are dot paths into the file, e.g. `api.base_url`, `api.token`,
//! `api.timeout_secs`, `timeline.strategy` (`pairwise` or `sweep_line`) and
//! `timeline.colors.overlap`.

use clap::Subcommand;
use taskline_core::{Config, ConfigError};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value, e.g. `timeline.strategy`
    Get {
        /// Dot-separated key such as "api.base_url" or "timeline.colors.blocked"
        key: String,
    },
    /// Change one value and save the file
    Set {
        /// Dot-separated key; must already exist in `config list`
        key: String,
        /// New value, checked against the key's type (number, text, strategy name)
        value: String,
    },
    /// Print the whole config as JSON
    List,
    /// Overwrite the file with defaults (localhost API, pairwise detection)
    Reset,
    /// Print where config.toml lives
    Path,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config
                .get(&key)
                .ok_or_else(|| ConfigError::UnknownKey(key.clone()))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            // Echo the stored form, which is what `get` will print.
            let stored = config.get(&key).unwrap_or(value);
            println!("{key} = {stored}");
        }
        ConfigAction::List => {
            let config = Config::load()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Reset => {
            let path = Config::path()?;
            Config::default().save_to(&path)?;
            println!("Reset {} to defaults", path.display());
        }
        ConfigAction::Path => {
            println!("{}", Config::path()?.display());
        }
    }
    Ok(())
}
