//! Shared types, error model, and configuration for matdoc.
//!
//! This crate is the foundation depended on by all other matdoc crates.
//! It provides:
//! - [`MatdocError`]: the unified error type
//! - Domain types ([`MaterialFolder`], [`PropertiesTable`], [`ImageEntry`], [`SidebarTree`])
//! - Configuration ([`BuildConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    BuildConfig, CONFIG_FILE_NAME, GlobalOrder, InputsConfig, OutputConfig, PageConfig,
    PlaceholdersConfig, SidebarConfig, TablesConfig, TextConfig, TextPolicy, config_file_path,
    init_config, load_config, load_config_from,
};
pub use error::{MatdocError, Result};
pub use types::{
    BuildReport, ImageEntry, MaterialFolder, PageSummary, PropertiesLoad, PropertiesStatus,
    PropertiesTable, PropertyColumn, Scalar, SidebarLink, SidebarTree,
};
