//! Folder scanning: material directories and top-level page documents.

use std::path::Path;

use tracing::{debug, instrument};

use matdoc_shared::{MaterialFolder, MatdocError, Result};

/// List the material folders directly under `root`.
///
/// Only directories whose names do not start with `.` are returned. No
/// recursion, and no ordering guarantee: callers sort where they need to.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn scan_materials(root: &Path) -> Result<Vec<MaterialFolder>> {
    if !root.is_dir() {
        return Err(MatdocError::config(format!(
            "database root {} does not exist or is not a directory",
            root.display()
        )));
    }

    let entries = std::fs::read_dir(root).map_err(|e| MatdocError::io(root, e))?;

    let mut folders = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| MatdocError::io(root, e))?;
        let path = entry.path();
        let Some(name) = entry.file_name().to_str().map(String::from) else {
            debug!(path = %path.display(), "skipping non UTF-8 folder name");
            continue;
        };

        if name.starts_with('.') || !path.is_dir() {
            continue;
        }

        folders.push(MaterialFolder { name, path });
    }

    debug!(count = folders.len(), "material folders found");
    Ok(folders)
}

/// List top-level page documents in `site_root` with the given extension,
/// in directory-listing order. Hidden files are skipped.
#[instrument(skip_all, fields(site_root = %site_root.display(), extension = %extension))]
pub fn scan_top_level_pages(site_root: &Path, extension: &str) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(site_root).map_err(|e| MatdocError::io(site_root, e))?;

    let mut pages = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| MatdocError::io(site_root, e))?;
        let path = entry.path();

        let Some(name) = entry.file_name().to_str().map(String::from) else {
            continue;
        };
        let matches_ext = path.extension().and_then(|e| e.to_str()) == Some(extension);

        if matches_ext && !name.starts_with('.') && path.is_file() {
            pages.push(name);
        }
    }

    debug!(count = pages.len(), "top-level pages found");
    Ok(pages)
}
