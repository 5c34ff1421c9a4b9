//! Pure rendering for matdoc: HTML table fragments, the material page
//! template, and the sidebar config document.
//!
//! Nothing here touches the filesystem; `matdoc-core` gathers inputs and
//! writes the returned strings.

pub mod escape;
pub mod page;
pub mod sidebar;
pub mod table;

pub use page::{PageInput, render_page};
pub use sidebar::{GENERATED_HEADER, render_sidebar};
pub use table::{column_widths, render_characterization_table, render_properties_table};
