//! Build configuration for matdoc.
//!
//! Project config lives at `<site-root>/matdoc.toml`.
//! CLI flags override config file values, which override defaults.
//! Every filename, placeholder, width and sidebar label the builders use is a
//! field here; nothing is read from module-level constants.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MatdocError, Result};

/// Default configuration file name, looked up in the site root.
pub const CONFIG_FILE_NAME: &str = "matdoc.toml";

// ---------------------------------------------------------------------------
// Config structs (matching matdoc.toml schema)
// ---------------------------------------------------------------------------

/// Top-level build config, deserialized from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Input file names and the image extension set.
    #[serde(default)]
    pub inputs: InputsConfig,

    /// Output locations.
    #[serde(default)]
    pub output: OutputConfig,

    /// Fixed placeholder texts.
    #[serde(default)]
    pub placeholders: PlaceholdersConfig,

    /// Page template settings.
    #[serde(default)]
    pub page: PageConfig,

    /// Table widths.
    #[serde(default)]
    pub tables: TablesConfig,

    /// Sidebar document fields.
    #[serde(default)]
    pub sidebar: SidebarConfig,

    /// How raw text is embedded into generated markup.
    #[serde(default)]
    pub text: TextConfig,
}

/// `[inputs]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputsConfig {
    /// Summary text file inside each material folder.
    #[serde(default = "default_summary_file")]
    pub summary_file: String,

    /// Comma-separated properties file inside each material folder.
    #[serde(default = "default_properties_file")]
    pub properties_file: String,

    /// Recognized image extensions (case-sensitive, without the dot).
    #[serde(default = "default_image_extensions")]
    pub image_extensions: Vec<String>,

    /// Extension of top-level page documents listed in the global sidebar.
    #[serde(default = "default_page_extension")]
    pub page_extension: String,
}

impl Default for InputsConfig {
    fn default() -> Self {
        Self {
            summary_file: default_summary_file(),
            properties_file: default_properties_file(),
            image_extensions: default_image_extensions(),
            page_extension: default_page_extension(),
        }
    }
}

fn default_summary_file() -> String {
    "summary.txt".into()
}
fn default_properties_file() -> String {
    "properties.csv".into()
}
fn default_image_extensions() -> Vec<String> {
    ["png", "jpg", "jpeg", "tif", "tiff"]
        .into_iter()
        .map(String::from)
        .collect()
}
fn default_page_extension() -> String {
    "qmd".into()
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Database root, relative to the site root.
    #[serde(default = "default_database_dir")]
    pub database_dir: String,

    /// Generated page file name inside each material folder.
    #[serde(default = "default_page_file")]
    pub page_file: String,

    /// Sidebar config file name, relative to the site root.
    #[serde(default = "default_sidebar_file")]
    pub sidebar_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database_dir: default_database_dir(),
            page_file: default_page_file(),
            sidebar_file: default_sidebar_file(),
        }
    }
}

fn default_database_dir() -> String {
    "database".into()
}
fn default_page_file() -> String {
    "index.qmd".into()
}
fn default_sidebar_file() -> String {
    "_sidebar.yml".into()
}

/// `[placeholders]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceholdersConfig {
    /// Overview text when the summary file is absent.
    pub no_summary: String,
    /// Key Properties text when the properties file is absent.
    pub no_properties: String,
    /// Key Properties text when the properties file cannot be parsed.
    pub properties_error: String,
    /// Characterization text when the folder has no images.
    pub no_images: String,
}

impl Default for PlaceholdersConfig {
    fn default() -> Self {
        Self {
            no_summary: "No summary provided.".into(),
            no_properties: "No properties data available.".into(),
            properties_error: "Error reading properties file.".into(),
            no_images: "No characterization images available.".into(),
        }
    }
}

/// `[page]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub overview_heading: String,
    pub properties_heading: String,
    pub characterization_heading: String,
    /// Front matter `toc` flag.
    pub toc: bool,
    /// Front matter `page-layout` value.
    pub page_layout: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            overview_heading: "Overview".into(),
            properties_heading: "Key Properties".into(),
            characterization_heading: "Characterization".into(),
            toc: false,
            page_layout: "article".into(),
        }
    }
}

/// `[tables]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TablesConfig {
    /// Total width (percent) shared equally between properties columns.
    pub total_width_percent: f64,
    /// Characterization table: label column width (CSS value).
    pub label_column_width: String,
    /// Characterization table: image column width (CSS value).
    pub image_column_width: String,
    /// Width applied to each `<img>` (CSS value).
    pub image_width: String,
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            total_width_percent: 100.0,
            label_column_width: "30%".into(),
            image_column_width: "70%".into(),
            image_width: "100%".into(),
        }
    }
}

/// Ordering applied to the global (top-level pages) sidebar tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GlobalOrder {
    /// Keep the directory-listing order.
    #[default]
    ScanOrder,
    /// Sort by link path.
    Alphabetical,
}

/// `[sidebar]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarConfig {
    pub database_id: String,
    pub database_title: String,
    pub database_style: String,
    pub database_background: String,
    /// Link of the fixed first entry of the database tree.
    pub overview_href: String,
    pub overview_text: String,
    pub global_id: String,
    pub global_title: String,
    pub global_style: String,
    pub global_background: String,
    pub global_order: GlobalOrder,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            database_id: "database".into(),
            database_title: "Materials Database".into(),
            database_style: "docked".into(),
            database_background: "light".into(),
            overview_href: "database.qmd".into(),
            overview_text: "Database Overview".into(),
            global_id: "global".into(),
            global_title: String::new(),
            global_style: "floating".into(),
            global_background: "light".into(),
            global_order: GlobalOrder::ScanOrder,
        }
    }
}

/// Escaping contract for summaries, property values and image labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextPolicy {
    /// Insert text exactly as read.
    #[default]
    Raw,
    /// Escape `& < > " '` before insertion.
    EscapeHtml,
}

/// `[text]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextConfig {
    #[serde(default)]
    pub policy: TextPolicy,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

impl BuildConfig {
    /// Reject values the builders cannot work with.
    pub fn validate(&self) -> Result<()> {
        for (field, name) in [
            ("inputs.summary_file", &self.inputs.summary_file),
            ("inputs.properties_file", &self.inputs.properties_file),
            ("output.page_file", &self.output.page_file),
        ] {
            if name.is_empty() || name.contains(['/', '\\']) {
                return Err(MatdocError::validation(format!(
                    "{field} must be a plain file name, got {name:?}"
                )));
            }
        }

        if self.output.database_dir.is_empty() {
            return Err(MatdocError::validation("output.database_dir is empty"));
        }
        if self.output.sidebar_file.is_empty() {
            return Err(MatdocError::validation("output.sidebar_file is empty"));
        }

        if self.inputs.image_extensions.iter().any(|ext| ext.is_empty() || ext.starts_with('.')) {
            return Err(MatdocError::validation(
                "inputs.image_extensions entries must be non-empty and given without a leading dot",
            ));
        }

        let width = self.tables.total_width_percent;
        if !width.is_finite() || width <= 0.0 {
            return Err(MatdocError::validation(format!(
                "tables.total_width_percent must be positive, got {width}"
            )));
        }

        Ok(())
    }

    /// Link prefix for material pages in the sidebar (`database/`).
    pub fn link_prefix(&self) -> String {
        format!("{}/", self.output.database_dir.trim_end_matches('/'))
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Path of the config file for a given site root.
pub fn config_file_path(site_root: &Path) -> PathBuf {
    site_root.join(CONFIG_FILE_NAME)
}

/// Load the build config for a site root. Returns defaults if the file does not exist.
pub fn load_config(site_root: &Path) -> Result<BuildConfig> {
    let path = config_file_path(site_root);

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(BuildConfig::default());
    }

    load_config_from(&path)
}

/// Load and validate the build config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<BuildConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| MatdocError::io(path, e))?;

    let config: BuildConfig = toml::from_str(&content).map_err(|e| {
        MatdocError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    config.validate()?;

    tracing::debug!(?path, "loaded config file");
    Ok(config)
}

/// Write a default config file at `path`. Refuses to overwrite an existing file.
pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(MatdocError::config(format!(
            "{} already exists",
            path.display()
        )));
    }

    let content = toml::to_string_pretty(&BuildConfig::default())
        .map_err(|e| MatdocError::config(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| MatdocError::io(path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(())
}
