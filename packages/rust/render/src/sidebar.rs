//! Sidebar config document (`website.sidebar` YAML).

use std::fmt::Write as _;

use matdoc_shared::SidebarTree;

use crate::escape::escape_yaml_string;

/// First line of every generated sidebar document.
pub const GENERATED_HEADER: &str =
    "# Generated by matdoc from the database folders. Do not edit by hand.";

/// Render the sidebar document for the given navigation trees, in order.
pub fn render_sidebar(trees: &[SidebarTree]) -> String {
    let mut yaml = String::new();
    let _ = writeln!(yaml, "{GENERATED_HEADER}");
    yaml.push_str("website:\n  sidebar:\n");

    for tree in trees {
        let _ = writeln!(yaml, "    - id: {}", quoted(&tree.id));
        let _ = writeln!(yaml, "      title: {}", quoted(&tree.title));
        let _ = writeln!(yaml, "      style: {}", quoted(&tree.style));
        let _ = writeln!(yaml, "      background: {}", quoted(&tree.background));

        if tree.contents.is_empty() {
            yaml.push_str("      contents: []\n");
            continue;
        }

        yaml.push_str("      contents:\n");
        for link in &tree.contents {
            let _ = writeln!(yaml, "        - href: {}", quoted(&link.href));
            let _ = writeln!(yaml, "          text: {}", quoted(&link.text));
        }
    }

    yaml
}

fn quoted(value: &str) -> String {
    format!("\"{}\"", escape_yaml_string(value))
}
