//! Site configuration management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for notesite.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    #[serde(default)]
    pub site: SiteConfig,

    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,

    /// Index page settings.
    #[serde(default)]
    pub index: IndexConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title, shown in the page header and the index heading.
    #[serde(default = "default_site_title")]
    pub title: String,

    /// Site description for meta tags.
    #[serde(default)]
    pub description: Option<String>,
}

/// Build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Directory containing the markdown notes.
    #[serde(default = "default_input_dir")]
    pub input_dir: String,

    /// Output directory for generated pages.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

/// Index page configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Sort order for index entries.
    #[serde(default)]
    pub order: IndexOrder,
}

/// Sort order for notes on the index page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexOrder {
    /// By title, case-insensitive, with identity as tie-break.
    #[default]
    Title,
    /// By note identity.
    Name,
    /// By modification time, newest first, with identity as tie-break.
    Modified,
}

// Default value functions
fn default_site_title() -> String {
    "Notes".to_string()
}

fn default_input_dir() -> String {
    "notes".to_string()
}

fn default_output_dir() -> String {
    "output".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_site_title(),
            description: None,
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| CoreError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults when
    /// the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            let config = Self::default();
            config.validate()?;
            Ok(config)
        }
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::invalid("site.title cannot be empty"));
        }

        if self.build.input_dir.is_empty() {
            return Err(CoreError::invalid("build.input_dir cannot be empty"));
        }

        if self.build.output_dir.is_empty() {
            return Err(CoreError::invalid("build.output_dir cannot be empty"));
        }

        if self.build.input_dir == self.build.output_dir {
            tracing::warn!("build.output_dir equals build.input_dir; generated pages will sit next to the notes");
        }

        Ok(())
    }
}
