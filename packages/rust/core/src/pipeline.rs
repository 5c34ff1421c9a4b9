//! End-to-end build: scan → one page per material → sidebar.
//!
//! Strictly sequential. The only state carried between folders is the list of
//! material names handed to the sidebar builder.

use std::path::PathBuf;
use std::time::Instant;

use tracing::{info, instrument};

use matdoc_shared::{BuildConfig, BuildReport, PageSummary, Result};

use crate::builder::{MaterialInputs, MaterialInventory, build_material_page};
use crate::scanner::scan_materials;
use crate::sidebar::write_sidebar;

/// Inputs for a database build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Directory holding the database root, top-level pages and the sidebar file.
    pub site_root: PathBuf,
    pub config: BuildConfig,
}

impl BuildOptions {
    /// The database root (`<site_root>/<database_dir>`).
    pub fn database_root(&self) -> PathBuf {
        self.site_root.join(&self.config.output.database_dir)
    }
}

/// Progress callback for reporting build status.
pub trait ProgressReporter {
    /// Called once the materials have been scanned.
    fn started(&self, material_count: usize);
    /// Called after each material page is written.
    fn material_built(&self, page: &PageSummary, current: usize, total: usize);
    /// Called when the build completes.
    fn done(&self, report: &BuildReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn started(&self, _material_count: usize) {}
    fn material_built(&self, _page: &PageSummary, _current: usize, _total: usize) {}
    fn done(&self, _report: &BuildReport) {}
}

/// Run the full build.
///
/// 1. Scan the database root for material folders
/// 2. Build and write one page per folder, in scan order
/// 3. Write the sidebar config
#[instrument(skip_all, fields(site_root = %options.site_root.display()))]
pub fn build_database(
    options: &BuildOptions,
    progress: &dyn ProgressReporter,
) -> Result<BuildReport> {
    let start = Instant::now();
    options.config.validate()?;

    let folders = scan_materials(&options.database_root())?;
    let total = folders.len();
    info!(materials = total, "starting build");
    progress.started(total);

    let mut pages = Vec::with_capacity(total);
    for (i, folder) in folders.iter().enumerate() {
        info!(material = %folder.name, "processing material");
        let page = build_material_page(folder, &options.config)?;
        progress.material_built(&page, i + 1, total);
        pages.push(page);
    }

    let names: Vec<String> = folders.into_iter().map(|f| f.name).collect();
    let sidebar = write_sidebar(&options.site_root, &names, &options.config)?;

    let report = BuildReport {
        pages,
        sidebar_path: sidebar.path,
        global_page_count: sidebar.global_page_count,
    };

    info!(
        pages = report.pages.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "build complete"
    );
    progress.done(&report);

    Ok(report)
}

/// Scan the database and report each material's inputs without writing anything.
/// Materials are returned sorted by name.
#[instrument(skip_all, fields(site_root = %options.site_root.display()))]
pub fn inspect_database(options: &BuildOptions) -> Result<Vec<MaterialInventory>> {
    options.config.validate()?;

    let mut folders = scan_materials(&options.database_root())?;
    folders.sort_by(|a, b| a.name.cmp(&b.name));

    folders
        .iter()
        .map(|folder| {
            let inputs = MaterialInputs::load(&folder.path, &options.config)?;
            Ok(MaterialInventory::new(folder, &inputs))
        })
        .collect()
}
