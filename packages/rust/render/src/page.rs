//! Material page template.
//!
//! A page is YAML front matter followed by three fixed sections:
//! Overview, Key Properties and Characterization. HTML fragments are embedded
//! as raw `{=html}` blocks; placeholders are plain text.

use tracing::debug;

use matdoc_shared::{BuildConfig, ImageEntry, PropertiesLoad};

use crate::escape::{apply_policy, escape_yaml_string};
use crate::table::{render_characterization_table, render_properties_table};

/// Everything the template needs for one material.
#[derive(Debug, Clone, Copy)]
pub struct PageInput<'a> {
    /// Folder name, used as the page title.
    pub title: &'a str,
    /// Summary text, `None` when the folder has no summary file.
    pub summary: Option<&'a str>,
    pub properties: &'a PropertiesLoad,
    /// Images in display order.
    pub images: &'a [ImageEntry],
}

/// Compose the full page document.
pub fn render_page(input: &PageInput<'_>, config: &BuildConfig) -> String {
    let page = &config.page;
    let mut doc = build_frontmatter(input.title, config);

    for (heading, body) in [
        (&page.overview_heading, overview_section(input.summary, config)),
        (
            &page.properties_heading,
            properties_section(input.properties, config),
        ),
        (
            &page.characterization_heading,
            characterization_section(input.images, config),
        ),
    ] {
        doc.push_str(&format!("\n## {heading}\n\n{body}\n"));
    }

    debug!(title = input.title, len = doc.len(), "page rendered");
    doc
}

/// Body of the Overview section.
pub fn overview_section(summary: Option<&str>, config: &BuildConfig) -> String {
    match summary {
        Some(text) => apply_policy(text, config.text.policy),
        None => config.placeholders.no_summary.clone(),
    }
}

/// Body of the Key Properties section.
pub fn properties_section(properties: &PropertiesLoad, config: &BuildConfig) -> String {
    match properties {
        PropertiesLoad::Missing => config.placeholders.no_properties.clone(),
        PropertiesLoad::Malformed { .. } => config.placeholders.properties_error.clone(),
        PropertiesLoad::Loaded(table) => raw_html_block(&render_properties_table(
            table,
            &config.tables,
            config.text.policy,
        )),
    }
}

/// Body of the Characterization section.
pub fn characterization_section(images: &[ImageEntry], config: &BuildConfig) -> String {
    if images.is_empty() {
        return config.placeholders.no_images.clone();
    }
    raw_html_block(&render_characterization_table(
        images,
        &config.tables,
        config.text.policy,
    ))
}

/// Split a rendered page into its section bodies, keyed by heading.
///
/// Splits on the configured headings in page order, so `## ` lines inside a
/// raw summary stay in the Overview body. A summary that repeats a later
/// configured heading line verbatim still splits early.
#[cfg(any(test, feature = "test-util"))]
pub fn sections<'a>(page: &'a str, config: &'a BuildConfig) -> Vec<(&'a str, &'a str)> {
    let headings = [
        config.page.overview_heading.as_str(),
        config.page.properties_heading.as_str(),
        config.page.characterization_heading.as_str(),
    ];

    let mut starts = Vec::new();
    let mut from = 0;
    for heading in headings {
        let marker = format!("\n## {heading}\n\n");
        let Some(pos) = page[from..].find(&marker) else {
            break;
        };
        let start = from + pos;
        starts.push((heading, start, start + marker.len()));
        from = start + marker.len();
    }

    let end = page.trim_end_matches('\n').len();
    starts
        .iter()
        .enumerate()
        .map(|(i, &(heading, _, body_start))| {
            let body_end = starts.get(i + 1).map_or(end, |&(_, next, _)| next);
            (heading, &page[body_start..body_end])
        })
        .collect()
}

fn build_frontmatter(title: &str, config: &BuildConfig) -> String {
    let mut fm = String::from("---\n");
    fm.push_str(&format!("title: \"{}\"\n", escape_yaml_string(title)));
    fm.push_str("format:\n  html:\n");
    fm.push_str(&format!("    toc: {}\n", config.page.toc));
    fm.push_str(&format!("    page-layout: {}\n", config.page.page_layout));
    fm.push_str("---\n");
    fm
}

fn raw_html_block(html: &str) -> String {
    format!("```{{=html}}\n{html}\n```")
}
