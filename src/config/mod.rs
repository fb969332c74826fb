#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};

use crate::core::format::FormatSettings;
use crate::utils::error::Result;
use crate::utils::validation::{validate_url, Validate};
use toml_config::TomlConfig;

/// Effective settings after merging the config file with command-line overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub base_url: Option<String>,
    pub format: FormatSettings,
}

impl Settings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        Self {
            base_url: config.api.base_url.clone(),
            format: config.format_settings(),
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.base_url {
            validate_url("base_url", base_url)?;
        }
        self.format.validate()
    }
}
