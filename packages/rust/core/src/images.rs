//! Characterization image discovery.

use std::path::Path;

use tracing::debug;

use matdoc_shared::{ImageEntry, MatdocError, Result};

/// Find the images directly inside `folder`.
///
/// A file matches when its extension is in `extensions` (case-sensitive).
/// Hidden files are skipped. Matches are sorted lexicographically by file name,
/// which within one folder is the order of their full paths.
pub fn discover_images(folder: &Path, extensions: &[String]) -> Result<Vec<ImageEntry>> {
    let entries = std::fs::read_dir(folder).map_err(|e| MatdocError::io(folder, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| MatdocError::io(folder, e))?;
        let path = entry.path();

        let Some(name) = entry.file_name().to_str().map(String::from) else {
            debug!(path = %path.display(), "skipping non UTF-8 file name");
            continue;
        };
        if name.starts_with('.') || !path.is_file() {
            continue;
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        if extensions.iter().any(|allowed| allowed == ext) {
            names.push(name);
        }
    }

    names.sort();

    Ok(names
        .into_iter()
        .map(|file_name| ImageEntry {
            label: image_label(&file_name),
            file_name,
        })
        .collect())
}

/// Display label for an image file: extension removed, `_` and `-` become spaces.
pub fn image_label(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    stem.replace(['_', '-'], " ")
}
