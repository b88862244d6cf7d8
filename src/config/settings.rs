//! Viewer settings.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{config_path, ConfigError, Result};
use crate::modules::HiddenFields;
use crate::ui::components::table::DEFAULT_ROWS_PER_PAGE_OPTIONS;
use crate::ui::components::table::DEFAULT_DOUBLE_CLICK_MS;
use crate::ui::components::SpinnerStyle;

/// Settings read from `config.toml`.
///
/// ```toml
/// rows_per_page_options = [10, 20, 50]
/// spinner = "braille"
/// double_click_ms = 400
/// theme = "dark"
///
/// [hidden_fields]
/// claim = ["internalCode"]
///
/// [labels.claim]
/// amount = "Amount"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Page sizes offered by the pagination footer.
    pub rows_per_page_options: Vec<usize>,
    /// Loading spinner animation.
    pub spinner: SpinnerStyle,
    /// Maximum delay between the two clicks of a double click.
    pub double_click_ms: u64,
    /// The UI theme to use ("dark" or "light").
    pub theme: String,
    /// Field keys hidden per module.
    pub hidden_fields: HashMap<String, Vec<String>>,
    /// Label overrides per module.
    pub labels: HashMap<String, HashMap<String, String>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rows_per_page_options: DEFAULT_ROWS_PER_PAGE_OPTIONS.to_vec(),
            spinner: SpinnerStyle::default(),
            double_click_ms: DEFAULT_DOUBLE_CLICK_MS,
            theme: "dark".to_string(),
            hidden_fields: HashMap::new(),
            labels: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load settings from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Load settings from a file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let settings: Settings = toml::from_str(&content)?;
        settings.validate()?;
        info!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Save settings to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path()?)
    }

    /// Save settings to a file, creating its directory.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::CreateDirError)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Check the settings for values the viewer cannot use.
    pub fn validate(&self) -> Result<()> {
        if self.rows_per_page_options.is_empty() {
            return Err(ConfigError::ValidationError(
                "rows_per_page_options must not be empty".to_string(),
            ));
        }
        if self.rows_per_page_options.contains(&0) {
            return Err(ConfigError::ValidationError(
                "rows_per_page_options must be positive".to_string(),
            ));
        }
        if self.double_click_ms == 0 {
            return Err(ConfigError::ValidationError(
                "double_click_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// The field visibility policy described by `hidden_fields`.
    pub fn hidden_fields(&self) -> HiddenFields {
        HiddenFields::from(&self.hidden_fields)
    }
}
