//! Configuration management for unfold.
//!
//! Parses `unfold.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [outline]
//! min_level = 2
//! max_level = 4
//! number_headings = true
//! anchor_prefix = "heading_"
//!
//! [disclosure]
//! collapsible = false
//! accordion_class = "accordion"
//! tabs_class = "tabs"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override heading numbering.
    pub number_headings: Option<bool>,
    /// Override accordion collapsibility.
    pub collapsible: Option<bool>,
}

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "unfold.toml";

/// Deepest HTML heading level.
const MAX_HEADING_LEVEL: u8 = 6;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Outline indexing configuration.
    pub outline: OutlineConfig,
    /// Accordion and tab set configuration.
    pub disclosure: DisclosureConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Outline indexing configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Shallowest heading level indexed.
    pub min_level: u8,
    /// Deepest heading level indexed.
    pub max_level: u8,
    /// Whether headings get a number label.
    pub number_headings: bool,
    /// Prefix of assigned heading anchors.
    pub anchor_prefix: String,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            min_level: 1,
            max_level: MAX_HEADING_LEVEL,
            number_headings: true,
            anchor_prefix: "heading_".to_owned(),
        }
    }
}

/// Accordion and tab set configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DisclosureConfig {
    /// Whether an accordion may have all sections closed.
    pub collapsible: bool,
    /// Class of accordion wrappers.
    pub accordion_class: String,
    /// Class of tab set wrappers.
    pub tabs_class: String,
}

impl Default for DisclosureConfig {
    fn default() -> Self {
        Self {
            collapsible: true,
            accordion_class: "accordion".to_owned(),
            tabs_class: "tabs".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a string field to be free of whitespace (usable as a class or id).
fn require_no_whitespace(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "{field} cannot contain whitespace"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `unfold.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if parsing
    /// or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(number_headings) = settings.number_headings {
            self.outline.number_headings = number_headings;
        }
        if let Some(collapsible) = settings.collapsible {
            self.disclosure.collapsible = collapsible;
        }
    }

    /// Search for config file in `start` and its parents.
    #[must_use]
    pub fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_outline()?;
        self.validate_disclosure()?;
        Ok(())
    }

    /// Validate outline configuration.
    fn validate_outline(&self) -> Result<(), ConfigError> {
        let OutlineConfig {
            min_level,
            max_level,
            ..
        } = self.outline;

        for (level, field) in [(min_level, "outline.min_level"), (max_level, "outline.max_level")] {
            if !(1..=MAX_HEADING_LEVEL).contains(&level) {
                return Err(ConfigError::Validation(format!(
                    "{field} must be between 1 and {MAX_HEADING_LEVEL}"
                )));
            }
        }
        if min_level > max_level {
            return Err(ConfigError::Validation(
                "outline.min_level cannot exceed outline.max_level".to_owned(),
            ));
        }
        require_no_whitespace(&self.outline.anchor_prefix, "outline.anchor_prefix")?;

        Ok(())
    }

    /// Validate disclosure configuration.
    fn validate_disclosure(&self) -> Result<(), ConfigError> {
        let disclosure = &self.disclosure;
        require_non_empty(&disclosure.accordion_class, "disclosure.accordion_class")?;
        require_no_whitespace(&disclosure.accordion_class, "disclosure.accordion_class")?;
        require_non_empty(&disclosure.tabs_class, "disclosure.tabs_class")?;
        require_no_whitespace(&disclosure.tabs_class, "disclosure.tabs_class")?;

        if disclosure.accordion_class == disclosure.tabs_class {
            return Err(ConfigError::Validation(
                "disclosure.accordion_class and disclosure.tabs_class must differ".to_owned(),
            ));
        }

        Ok(())
    }
}
