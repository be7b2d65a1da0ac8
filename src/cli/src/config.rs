use std::{fs, path::Path};

use color_eyre::eyre::WrapErr;
use log::info;
use serde::{Deserialize, Serialize};

/// Settings read from the optional TOML configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Number of turns used by `scramble` when no count is given.
    pub scramble_length: usize,
    /// Whether the cube net is drawn with ANSI colors.
    pub colored: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            scramble_length: 50,
            colored: true,
        }
    }
}

impl CliConfig {
    /// Loads the configuration at `path`, falling back to the defaults if
    /// the file does not exist.
    pub fn load(path: &Path) -> color_eyre::Result<CliConfig> {
        if !path.exists() {
            info!("No configuration at {}, using defaults", path.display());
            return Ok(CliConfig::default());
        }
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read configuration file {}", path.display()))?;
        toml::from_str(&text)
            .wrap_err_with(|| format!("Failed to parse configuration file {}", path.display()))
    }
}
