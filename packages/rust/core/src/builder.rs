//! Material page builder: gather a folder's inputs, render, write the page.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, instrument};

use matdoc_render::{PageInput, render_page};
use matdoc_shared::{
    BuildConfig, ImageEntry, MaterialFolder, MatdocError, PageSummary, PropertiesLoad,
    PropertiesStatus, Result,
};

use crate::images::discover_images;
use crate::properties::load_properties;

/// The optional inputs found in one material folder.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialInputs {
    pub summary: Option<String>,
    pub properties: PropertiesLoad,
    pub images: Vec<ImageEntry>,
}

impl MaterialInputs {
    /// Read summary, properties and images from `folder`.
    ///
    /// Absent inputs are not errors; only a folder that cannot be listed is.
    pub fn load(folder: &Path, config: &BuildConfig) -> Result<Self> {
        Ok(Self {
            summary: load_summary(folder, &config.inputs.summary_file)?,
            properties: load_properties(folder, &config.inputs.properties_file),
            images: discover_images(folder, &config.inputs.image_extensions)?,
        })
    }
}

/// Scan-only view of a material, as printed by `matdoc list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialInventory {
    pub name: String,
    pub has_summary: bool,
    pub properties: PropertiesStatus,
    pub image_count: usize,
}

impl MaterialInventory {
    pub fn new(folder: &MaterialFolder, inputs: &MaterialInputs) -> Self {
        Self {
            name: folder.name.clone(),
            has_summary: inputs.summary.is_some(),
            properties: inputs.properties.status(),
            image_count: inputs.images.len(),
        }
    }
}

/// Build and write the page for one material folder.
///
/// The page is written to `<folder>/<page_file>`, replacing any previous file.
#[instrument(skip_all, fields(material = %folder.name))]
pub fn build_material_page(folder: &MaterialFolder, config: &BuildConfig) -> Result<PageSummary> {
    let inputs = MaterialInputs::load(&folder.path, config)?;

    let page = render_page(
        &PageInput {
            title: &folder.name,
            summary: inputs.summary.as_deref(),
            properties: &inputs.properties,
            images: &inputs.images,
        },
        config,
    );

    let page_path = folder.path.join(&config.output.page_file);
    std::fs::write(&page_path, page).map_err(|e| MatdocError::io(&page_path, e))?;

    info!(
        images = inputs.images.len(),
        properties = %inputs.properties.status(),
        "page written"
    );
    debug!(path = %page_path.display(), "wrote page");

    Ok(PageSummary {
        name: folder.name.clone(),
        page_path,
        has_summary: inputs.summary.is_some(),
        properties: inputs.properties.status(),
        image_count: inputs.images.len(),
    })
}

/// Read `<folder>/<summary_file>` in full, or `None` if it does not exist.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn load_summary(folder: &Path, summary_file: &str) -> Result<Option<String>> {
    let path = folder.join(summary_file);
    if !path.is_file() {
        return Ok(None);
    }

    let bytes = std::fs::read(&path).map_err(|e| MatdocError::io(&path, e))?;
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use matdoc_render::page::sections;
    use scraper::{Html, Selector};

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("matdoc-builder-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn material(root: &Path, name: &str) -> MaterialFolder {
        let path = root.join(name);
        std::fs::create_dir_all(&path).unwrap();
        MaterialFolder {
            name: name.into(),
            path,
        }
    }

    fn read_page(summary: &PageSummary) -> String {
        std::fs::read_to_string(&summary.page_path).unwrap()
    }

    fn section_body(page: &str, heading: &str) -> String {
        sections(page, &BuildConfig::default())
            .into_iter()
            .find(|(h, _)| *h == heading)
            .map(|(_, body)| body.to_string())
            .unwrap_or_else(|| panic!("no {heading} section"))
    }

    #[test]
    fn empty_folder_gets_all_placeholders() {
        let tmp = temp_dir();
        let folder = material(&tmp, "Bi2Se3");
        let config = BuildConfig::default();

        let summary = build_material_page(&folder, &config).unwrap();
        assert_eq!(summary.page_path, folder.path.join("index.qmd"));
        assert!(!summary.has_summary);
        assert_eq!(summary.properties, PropertiesStatus::Missing);

        let page = read_page(&summary);
        assert!(page.contains("title: \"Bi2Se3\""));
        assert_eq!(section_body(&page, "Overview"), config.placeholders.no_summary);
        assert_eq!(section_body(&page, "Key Properties"), config.placeholders.no_properties);
        assert_eq!(section_body(&page, "Characterization"), config.placeholders.no_images);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn full_folder_renders_tables() {
        let tmp = temp_dir();
        let folder = material(&tmp, "WTe2");
        std::fs::write(folder.path.join("summary.txt"), "Type-II Weyl semimetal.").unwrap();
        std::fs::write(
            folder.path.join("properties.csv"),
            "property,value,unit\nband_gap,0.0,eV\nlattice_a,3.48,A\nlattice_c,14.07,A\n",
        )
        .unwrap();
        std::fs::write(folder.path.join("b.png"), b"").unwrap();
        std::fs::write(folder.path.join("a.jpg"), b"").unwrap();

        let summary = build_material_page(&folder, &BuildConfig::default()).unwrap();
        assert_eq!(summary.image_count, 2);
        assert_eq!(summary.properties, PropertiesStatus::Loaded);

        let page = read_page(&summary);
        assert_eq!(section_body(&page, "Overview"), "Type-II Weyl semimetal.");

        let doc = Html::parse_fragment(&section_body(&page, "Key Properties"));
        let th = Selector::parse("th").unwrap();
        let tr = Selector::parse("tbody tr").unwrap();
        let td = Selector::parse("td").unwrap();
        assert_eq!(doc.select(&th).count(), 3);
        let rows: Vec<usize> = doc.select(&tr).map(|r| r.select(&td).count()).collect();
        assert_eq!(rows, vec![3, 3, 3]);

        let chars = section_body(&page, "Characterization");
        let a = chars.find("src=\"a.jpg\"").unwrap();
        let b = chars.find("src=\"b.png\"").unwrap();
        assert!(a < b, "a.jpg must come before b.png");

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn malformed_properties_do_not_abort() {
        let tmp = temp_dir();
        let folder = material(&tmp, "broken");
        std::fs::write(
            folder.path.join("properties.csv"),
            "a,b\n1,2\n3,4,5,6\n",
        )
        .unwrap();

        let config = BuildConfig::default();
        let summary = build_material_page(&folder, &config).unwrap();
        assert_eq!(summary.properties, PropertiesStatus::Malformed);
        assert_eq!(
            section_body(&read_page(&summary), "Key Properties"),
            config.placeholders.properties_error
        );

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn existing_page_is_overwritten() {
        let tmp = temp_dir();
        let folder = material(&tmp, "MoS2");
        std::fs::write(folder.path.join("index.qmd"), "stale content that is much longer than nothing")
            .unwrap();

        let summary = build_material_page(&folder, &BuildConfig::default()).unwrap();
        let page = read_page(&summary);
        assert!(!page.contains("stale content"));
        assert!(page.starts_with("---\n"));

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn inventory_reflects_inputs() {
        let tmp = temp_dir();
        let folder = material(&tmp, "graphene");
        std::fs::write(folder.path.join("summary.txt"), "2D carbon.").unwrap();
        std::fs::write(folder.path.join("raman.png"), b"").unwrap();

        let inputs = MaterialInputs::load(&folder.path, &BuildConfig::default()).unwrap();
        let inventory = MaterialInventory::new(&folder, &inputs);
        assert!(inventory.has_summary);
        assert_eq!(inventory.properties, PropertiesStatus::Missing);
        assert_eq!(inventory.image_count, 1);

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
