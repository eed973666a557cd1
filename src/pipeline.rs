//! Pipeline – ties together parsing, the dialect-specific rewrite passes and
//! document assembly into a single function call.

use crate::config::{Dialect, EmailTemplateConfig};
use crate::document::assemble;
use crate::dom::parse_fragment;
use crate::inline::inline_styles;
use crate::legacy::to_legacy;
use crate::rows::to_rows;

/// Full pipeline: body fragment + config → complete email document.
///
/// - Responsive: parse → inline styles → table rows → `<div>` document.
/// - Legacy: parse → legacy hints/attribute promotion → table document with
///   MSO conditional regions.
///
/// Never fails and performs no I/O. Each call parses its own tree.
pub fn generate_email(body_html: &str, config: &EmailTemplateConfig) -> String {
    log::debug!(
        "generating {:?} email ({} bytes of body, max width {}px)",
        config.dialect,
        body_html.len(),
        config.max_width
    );
    let body = match config.dialect {
        Dialect::Responsive => responsive_body(body_html, &config.font_family),
        Dialect::Legacy => legacy_body(body_html),
    };
    assemble(config, &body)
}

/// The transpiler entry point with the editor's flat argument list.
///
/// Absent (or empty) header/footer images omit that region.
pub fn generate_full_email_html(
    body_html: &str,
    header_image: Option<&str>,
    footer_image: Option<&str>,
    legacy_mode: bool,
    max_width: u32,
    font_family: &str,
) -> String {
    let config = EmailTemplateConfig {
        max_width,
        font_family: font_family.to_string(),
        dialect: Dialect::from_legacy_flag(legacy_mode),
        header_image: header_image.map(str::to_string),
        footer_image: footer_image.map(str::to_string),
    };
    generate_email(body_html, &config)
}

/// Inline-styled body reshaped into table rows.
pub fn responsive_body(body_html: &str, font_family: &str) -> String {
    let mut tree = parse_fragment(body_html);
    inline_styles(&mut tree, font_family);
    to_rows(&tree, font_family)
}

/// Body rewritten with legacy hints, still block-structured.
pub fn legacy_body(body_html: &str) -> String {
    let mut tree = parse_fragment(body_html);
    to_legacy(&mut tree);
    tree.inner_html()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_basic() {
        let html = generate_full_email_html("<h1>Hello</h1><p>World</p>", None, None, false, 600, "Arial");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert_eq!(html.matches("<tr>").count(), 2);
        assert!(html.contains("<strong>Hello</strong>"));
    }

    #[test]
    fn legacy_flag_selects_dialect() {
        let html = generate_full_email_html("<p>Hi</p>", None, None, true, 600, "Arial");
        assert!(html.contains("<!--[if mso]>"));
        assert!(html.contains("mso-line-height-rule: exactly"));
    }

    #[test]
    fn empty_body_still_produces_a_document() {
        let html = generate_full_email_html("", None, None, false, 600, "Arial");
        assert!(html.contains(r#"<div class="email-content">"#));
        assert_eq!(html.matches("<tr>").count(), 0);
    }
}
