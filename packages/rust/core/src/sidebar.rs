//! Sidebar builder.
//!
//! Two trees with different ordering rules:
//! - database: overview entry, then materials sorted by link path
//! - global: top-level pages in the order the directory listing returned them
//!   (unless [`GlobalOrder::Alphabetical`] is configured)

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use matdoc_render::render_sidebar;
use matdoc_shared::{BuildConfig, GlobalOrder, MatdocError, Result, SidebarLink, SidebarTree};

use crate::scanner::scan_top_level_pages;

/// Where the sidebar went and how many global pages it lists.
#[derive(Debug, Clone)]
pub struct SidebarOutcome {
    pub path: PathBuf,
    pub global_page_count: usize,
}

/// Link path of a material page, e.g. `database/WTe2/index`.
///
/// Links name the page without its extension; the site generator resolves it.
pub fn material_href(name: &str, config: &BuildConfig) -> String {
    let page_file = &config.output.page_file;
    let stem = Path::new(page_file)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(page_file);
    format!("{}{name}/{stem}", config.link_prefix())
}

/// Database tree entries after the overview: one per material, sorted by link path.
pub fn material_links(names: &[String], config: &BuildConfig) -> Vec<SidebarLink> {
    let mut links: Vec<SidebarLink> = names
        .iter()
        .map(|name| SidebarLink {
            href: material_href(name, config),
            text: name.clone(),
        })
        .collect();
    links.sort_by(|a, b| a.href.cmp(&b.href));
    links
}

/// Global tree entries with blank labels, ordered per `order`.
pub fn global_links(pages: &[String], order: GlobalOrder) -> Vec<SidebarLink> {
    let mut links: Vec<SidebarLink> = pages
        .iter()
        .map(|page| SidebarLink {
            href: page.clone(),
            text: String::new(),
        })
        .collect();
    if order == GlobalOrder::Alphabetical {
        links.sort_by(|a, b| a.href.cmp(&b.href));
    }
    links
}

/// Assemble both navigation trees.
pub fn build_sidebar(
    material_names: &[String],
    global_pages: &[String],
    config: &BuildConfig,
) -> Vec<SidebarTree> {
    let sidebar = &config.sidebar;

    let mut database_contents = vec![SidebarLink {
        href: sidebar.overview_href.clone(),
        text: sidebar.overview_text.clone(),
    }];
    database_contents.extend(material_links(material_names, config));

    vec![
        SidebarTree {
            id: sidebar.database_id.clone(),
            title: sidebar.database_title.clone(),
            style: sidebar.database_style.clone(),
            background: sidebar.database_background.clone(),
            contents: database_contents,
        },
        SidebarTree {
            id: sidebar.global_id.clone(),
            title: sidebar.global_title.clone(),
            style: sidebar.global_style.clone(),
            background: sidebar.global_background.clone(),
            contents: global_links(global_pages, sidebar.global_order),
        },
    ]
}

/// Scan top-level pages, build the sidebar and write it to
/// `<site_root>/<sidebar_file>`, replacing any previous file.
#[instrument(skip_all, fields(materials = material_names.len()))]
pub fn write_sidebar(
    site_root: &Path,
    material_names: &[String],
    config: &BuildConfig,
) -> Result<SidebarOutcome> {
    let global_pages = scan_top_level_pages(site_root, &config.inputs.page_extension)?;
    let trees = build_sidebar(material_names, &global_pages, config);
    let yaml = render_sidebar(&trees);

    let path = site_root.join(&config.output.sidebar_file);
    std::fs::write(&path, yaml).map_err(|e| MatdocError::io(&path, e))?;

    debug!(path = %path.display(), "wrote sidebar");
    info!(global_pages = global_pages.len(), "sidebar written");

    Ok(SidebarOutcome {
        path,
        global_page_count: global_pages.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    fn hrefs(links: &[SidebarLink]) -> Vec<&str> {
        links.iter().map(|l| l.href.as_str()).collect()
    }

    #[test]
    fn materials_sorted_regardless_of_scan_order() {
        let config = BuildConfig::default();
        let links = material_links(&names(&["WTe2", "Bi2Se3", "MoS2"]), &config);
        assert_eq!(
            hrefs(&links),
            vec![
                "database/Bi2Se3/index",
                "database/MoS2/index",
                "database/WTe2/index",
            ]
        );
        assert_eq!(links[0].text, "Bi2Se3");
    }

    #[test]
    fn material_sort_key_is_link_path() {
        // '-' sorts before '/', so "a-b" precedes "a" by link path.
        let links = material_links(&names(&["a", "a-b"]), &BuildConfig::default());
        assert_eq!(hrefs(&links), vec!["database/a-b/index", "database/a/index"]);
    }

    #[test]
    fn global_keeps_scan_order_while_materials_sort() {
        let config = BuildConfig::default();
        let scan = names(&["zeta.qmd", "about.qmd", "index.qmd"]);
        let materials = names(&["zeta", "alpha"]);

        let trees = build_sidebar(&materials, &scan, &config);
        let database = &trees[0];
        let global = &trees[1];

        assert_eq!(
            hrefs(&database.contents),
            vec!["database.qmd", "database/alpha/index", "database/zeta/index"]
        );
        assert_eq!(hrefs(&global.contents), vec!["zeta.qmd", "about.qmd", "index.qmd"]);
        assert!(global.contents.iter().all(|l| l.text.is_empty()));
    }

    #[test]
    fn material_href_drops_page_extension() {
        let mut config = BuildConfig::default();
        assert_eq!(material_href("WTe2", &config), "database/WTe2/index");

        config.output.database_dir = "catalog".into();
        config.output.page_file = "page.md".into();
        assert_eq!(material_href("WTe2", &config), "catalog/WTe2/page");
    }

    #[test]
    fn global_alphabetical_when_configured() {
        let links = global_links(&names(&["zeta.qmd", "about.qmd"]), GlobalOrder::Alphabetical);
        assert_eq!(hrefs(&links), vec!["about.qmd", "zeta.qmd"]);
    }

    #[test]
    fn overview_entry_comes_first() {
        let config = BuildConfig::default();
        let trees = build_sidebar(&[], &[], &config);
        assert_eq!(trees.len(), 2);
        assert_eq!(trees[0].id, "database");
        assert_eq!(trees[0].contents.len(), 1);
        assert_eq!(trees[0].contents[0].text, "Database Overview");
        assert!(trees[1].contents.is_empty());
    }

    #[test]
    fn write_sidebar_fails_when_unwritable() {
        let tmp = std::env::temp_dir().join(format!("matdoc-sidebar-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&tmp).unwrap();

        let mut config = BuildConfig::default();
        config.output.sidebar_file = "missing-dir/_sidebar.yml".into();

        let err = write_sidebar(&tmp, &[], &config).unwrap_err();
        assert!(matches!(err, MatdocError::Io { .. }));

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
