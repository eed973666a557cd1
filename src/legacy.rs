//! Legacy-dialect rewriter – hints for Word-engine mail clients (Outlook
//! 2007–2019).
//!
//! Unlike the responsive path this pass keeps the block structure as is. It
//! appends engine-specific declarations for every property the author left
//! unset and copies the CSS values the engine ignores onto HTML attributes:
//! - pixel `width` / `height` on `img`, `table`, `td`, `th` → attributes
//! - `text-align` on `div` / `p` → `align`

use crate::css::{self, property_value, px_value, Declaration};
use crate::dom::{walk_mut, Attributes, ElementNode, Tag};
use crate::image_ref::Alignment;

const LINE_HEIGHT_RULE: (&str, &str) = ("mso-line-height-rule", "exactly");

/// Declarations appended per tag.
pub fn legacy_hints(tag: &Tag) -> Vec<Declaration> {
    let pairs: &[(&str, &str)] = match tag {
        Tag::P => &[
            ("margin", "0 0 12px 0"),
            LINE_HEIGHT_RULE,
            ("line-height", "150%"),
        ],
        Tag::H1 | Tag::H2 | Tag::H3 => &[
            ("margin", "0 0 10px 0"),
            LINE_HEIGHT_RULE,
            ("line-height", "120%"),
        ],
        Tag::Ul | Tag::Ol => &[("margin-top", "0"), ("margin-bottom", "12px")],
        Tag::Li => &[
            ("margin", "0 0 4px 0"),
            LINE_HEIGHT_RULE,
            ("line-height", "150%"),
        ],
        Tag::A => &[("color", "#0066cc"), ("text-decoration", "underline")],
        Tag::Img => &[
            ("border", "0"),
            ("outline", "none"),
            ("text-decoration", "none"),
            ("-ms-interpolation-mode", "bicubic"),
        ],
        Tag::Table => &[
            ("border-collapse", "collapse"),
            ("mso-table-lspace", "0pt"),
            ("mso-table-rspace", "0pt"),
        ],
        Tag::Td | Tag::Th => &[LINE_HEIGHT_RULE],
        _ => &[],
    };
    pairs
        .iter()
        .map(|(p, v)| Declaration::new(*p, *v))
        .collect()
}

/// Rewrite the tree in place for the legacy template.
pub fn to_legacy(root: &mut ElementNode) {
    let mut promoted = 0usize;
    walk_mut(root, &mut |tag, attrs| {
        let hints = missing_hints(legacy_hints(tag), attrs.style());
        if let Some(merged) = css::append(attrs.style(), &hints) {
            attrs.set("style", merged);
        }
        promoted += promote_attributes(tag, attrs);
    });
    log::debug!("legacy pass promoted {promoted} attributes");
}

/// Drop hints for properties the author already set, so a styled button
/// keeps its own colour and decoration.
fn missing_hints(hints: Vec<Declaration>, author: Option<&str>) -> Vec<Declaration> {
    let Some(author) = author else {
        return hints;
    };
    hints
        .into_iter()
        .filter(|hint| property_value(author, &hint.property).is_none())
        .collect()
}

/// Copy CSS values onto HTML attributes; returns how many were written.
fn promote_attributes(tag: &Tag, attrs: &mut Attributes) -> usize {
    let Some(style) = attrs.style().map(str::to_string) else {
        return 0;
    };
    let mut written = 0;
    match tag {
        Tag::Img | Tag::Table | Tag::Td | Tag::Th => {
            for dimension in ["width", "height"] {
                if let Some(px) = property_value(&style, dimension).and_then(|v| px_value(&v)) {
                    attrs.set(dimension, px.to_string());
                    written += 1;
                }
            }
        }
        Tag::Div | Tag::P => {
            if let Some(align) =
                property_value(&style, "text-align").and_then(|a| Alignment::parse(&a))
            {
                attrs.set("align", align.as_str());
                written += 1;
            }
        }
        _ => {}
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_fragment;

    fn legacy(html: &str) -> String {
        let mut root = parse_fragment(html);
        to_legacy(&mut root);
        root.inner_html()
    }

    #[test]
    fn paragraph_gets_exact_line_height() {
        assert_eq!(
            legacy("<p>Hi</p>"),
            r#"<p style="margin: 0 0 12px 0; mso-line-height-rule: exactly; line-height: 150%">Hi</p>"#
        );
    }

    #[test]
    fn hints_follow_author_style() {
        assert_eq!(
            legacy(r#"<p style="color: red;">Hi</p>"#),
            r#"<p style="color: red; margin: 0 0 12px 0; mso-line-height-rule: exactly; line-height: 150%">Hi</p>"#
        );
    }

    #[test]
    fn styled_button_keeps_author_colours() {
        let out = legacy(
            r#"<a href="https://example.com" style="background-color:#ff6600;color:#ffffff;text-decoration:none;padding:10px 20px">Buy</a>"#,
        );
        assert_eq!(
            out,
            r#"<a href="https://example.com" style="background-color:#ff6600;color:#ffffff;text-decoration:none;padding:10px 20px">Buy</a>"#
        );
        let mut root = parse_fragment(r#"<a style="color: #fff">x</a>"#);
        to_legacy(&mut root);
        let a = root.element_children().next().expect("a");
        let style = a.inline_style().expect("style");
        assert_eq!(property_value(style, "color").as_deref(), Some("#fff"));
        assert_eq!(property_value(style, "text-decoration").as_deref(), Some("underline"));
    }

    #[test]
    fn author_spacing_is_not_overridden() {
        assert_eq!(
            legacy(r#"<p style="margin: 0; line-height: 20px">Hi</p>"#),
            r#"<p style="margin: 0; line-height: 20px; mso-line-height-rule: exactly">Hi</p>"#
        );
    }

    #[test]
    fn image_dimensions_are_promoted() {
        let out = legacy(r#"<img src="a.png" style="width: 240px; height: 120.4px">"#);
        assert_eq!(
            out,
            r#"<img src="a.png" style="width: 240px; height: 120.4px; border: 0; outline: none; text-decoration: none; -ms-interpolation-mode: bicubic" width="240" height="120">"#
        );
    }

    #[test]
    fn promotion_overrides_stale_attribute_and_skips_percent() {
        let out = legacy(r#"<img src="a.png" width="10" style="width: 50%">"#);
        assert!(out.contains(r#"width="10""#));
        let out = legacy(r#"<img src="a.png" width="10" style="width: 90px">"#);
        assert!(out.contains(r#"width="90""#));
        assert!(!out.contains(r#"width="10""#));
    }

    #[test]
    fn image_wrapper_alignment_is_promoted() {
        let out = legacy(r#"<div style="text-align: right;"><img src="a.png"></div>"#);
        assert!(out.starts_with(r#"<div style="text-align: right;" align="right">"#));
    }

    #[test]
    fn block_structure_is_preserved() {
        let out = legacy("<h1>T</h1><ul><li>a</li></ul><section>s</section>");
        assert!(out.starts_with("<h1 style="));
        assert!(out.contains("<ul style=\"margin-top: 0; margin-bottom: 12px\"><li style="));
        assert!(out.ends_with("<section>s</section>"));
    }

    #[test]
    fn unknown_tags_get_no_hints() {
        assert!(legacy_hints(&Tag::Unknown("blink".into())).is_empty());
        assert!(legacy_hints(&Tag::Span).is_empty());
    }
}
