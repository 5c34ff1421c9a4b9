//! Filesystem side of matdoc: scanning the database, loading each material's
//! inputs, writing pages and the sidebar.
//!
//! Rendering itself lives in `matdoc-render`; this crate decides what to read
//! and where the results go.

pub mod builder;
pub mod images;
pub mod pipeline;
pub mod properties;
pub mod scanner;
pub mod sidebar;

pub use builder::{MaterialInputs, MaterialInventory, build_material_page};
pub use pipeline::{BuildOptions, ProgressReporter, SilentProgress, build_database, inspect_database};
