//! Configuration to acknowledge site preferences as well as set defaults.
//!
//! Specifically, we try to find a folio.toml, and if present we load settings from there.
//! This provides the content location, site identity, and drawer gesture tuning.

use crate::error::{Error, Result};
use facet::Facet;
use std::fs;
use std::path::Path;

/// File looked up in the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "folio.toml";

#[derive(Facet, Clone, Debug)]
/// Site preferences loaded from folio.toml or falling back to defaults.
pub struct Config {
    #[facet(default = "content/articles".to_string())]
    /// Directory scanned for article markdown files.
    pub content_dir: String,
    #[facet(default = "content/case-studies".to_string())]
    /// Directory scanned for case study markdown files; may be absent.
    pub case_studies_dir: String,
    #[facet(default = "content/experience.yaml".to_string())]
    /// YAML list of past roles shown on the home page; may be absent.
    pub experience_file: String,
    #[facet(default = "http://localhost:3000".to_string())]
    /// Absolute origin used for canonical URLs and the sitemap.
    pub base_url: String,
    #[facet(default = "folio".to_string())]
    /// Name shown in the floating bar.
    pub site_title: String,
    #[facet(default = String::new())]
    /// Paragraph shown at the top of the home page.
    pub bio: String,
    #[facet(default = "/".to_string())]
    /// Route pushed when the drawer closes without navigable history.
    pub close_href: String,
    #[facet(default = false)]
    /// Skip drawer animations and settle state changes instantly.
    pub reduced_motion: bool,
    #[facet(default = 80.0)]
    /// Swipe distance in pixels past which releasing a drag closes the drawer.
    pub swipe_threshold: f32,
    #[facet(default = 48.0)]
    /// Width in pixels of the strip along the drawer edge where a drag may start.
    pub edge_zone: f32,
    #[facet(default = 8.0)]
    /// Pixels represented by one terminal column when translating pointer drags.
    pub cell_width_px: f32,
    #[facet(default = ".folio-preferences.json".to_string())]
    /// File holding the persisted theme choice.
    pub preference_file: String,
    #[facet(default = String::new())]
    /// Log destination for the interactive reader; empty disables reader logging.
    pub log_file: String,
    #[facet(default = 200)]
    /// Reading speed used for the "min read" estimate.
    pub words_per_minute: usize,
    #[facet(default = 2)]
    /// Rows kept above a section heading when jumping to it.
    pub nav_offset: usize,
}

impl Config {
    /// Load configuration from `path`, or from folio.toml in the working directory.
    ///
    /// A missing default file yields the defaults; a missing explicit file is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file cannot be read or if the TOML is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let contents = match path {
            Some(path) => fs::read_to_string(path)?,
            None => fs::read_to_string(DEFAULT_CONFIG_FILE).unwrap_or_default(),
        };
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text, filling omitted fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML does not describe a valid configuration.
    pub fn from_toml(contents: &str) -> Result<Self> {
        facet_toml::from_str::<Self>(contents).map_err(|e| Error::config(e.to_string()))
    }

    /// Default configuration, as produced by an empty folio.toml.
    ///
    /// # Errors
    ///
    /// Returns an error only if the declared defaults fail to deserialize.
    pub fn defaults() -> Result<Self> {
        Self::from_toml("")
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
