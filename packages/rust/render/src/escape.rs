//! Text escaping for generated markup.

use matdoc_shared::TextPolicy;

/// Apply the configured text policy to content inserted between tags.
pub fn apply_policy(text: &str, policy: TextPolicy) -> String {
    match policy {
        TextPolicy::Raw => text.to_string(),
        TextPolicy::EscapeHtml => escape_html(text),
    }
}

/// Escape HTML special characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape special characters in a double-quoted YAML string value.
///
/// Control characters without a short escape are written as `\xNN`; every
/// `char::is_control` code point is below U+0100.
pub fn escape_yaml_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\x{:02X}", u32::from(c))),
            _ => out.push(c),
        }
    }
    out
}
