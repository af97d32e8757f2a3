// crates/cli/src/settings.rs

use query::ExprFlavour;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::cli::Result;
use crate::error::CliError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QuerySettings {
    /// Flavour used by `compile` when `--flavour` is not given.
    pub default_flavour: ExprFlavour,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            default_flavour: ExprFlavour::SearchEngine,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub default_page_size: Option<u32>,
}

/// Contents of `settings.toml`. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub query: QuerySettings,
    pub search: SearchSettings,
}

impl Settings {
    /// Load settings from `path`, or defaults when no path is given.
    /// A path that does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            debug!("no settings file given, using defaults");
            return Ok(Self::default());
        };

        if !path.is_file() {
            return Err(CliError::Config(format!(
                "settings file not found at {}",
                path.display()
            )));
        }

        let text = std::fs::read_to_string(path)?;
        let settings = Self::parse(&text)?;
        debug!(path = %path.display(), ?settings, "settings loaded");
        Ok(settings)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
