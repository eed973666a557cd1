//! Style policy – the declarations injected per tag for the responsive
//! template.
//!
//! The list is prepended to whatever the author already wrote, so every entry
//! here is a default, not an override.

use crate::css::Declaration;
use crate::dom::Tag;

pub const TEXT_COLOR: &str = "#333333";
pub const LINK_COLOR: &str = "#0066cc";
pub const BODY_FONT_SIZE: &str = "11pt";

/// `font-family`, `font-size` and `color` shared by all text blocks.
pub fn font_rule(font_family: &str) -> [Declaration; 3] {
    [
        Declaration::new("font-family", font_family),
        Declaration::new("font-size", BODY_FONT_SIZE),
        Declaration::new("color", TEXT_COLOR),
    ]
}

/// Heading size in pixels for h1–h3.
pub fn heading_size(tag: &Tag) -> Option<&'static str> {
    match tag {
        Tag::H1 => Some("24px"),
        Tag::H2 => Some("20px"),
        Tag::H3 => Some("16px"),
        _ => None,
    }
}

/// Ordered declarations for one element.
///
/// `text_align` is the element's current `text-align`; only `div` consults
/// it (aligned image wrappers). Unrecognised tags get an empty list.
pub fn styles_for(tag: &Tag, font_family: &str, text_align: Option<&str>) -> Vec<Declaration> {
    let mut decls = Vec::new();
    match tag {
        Tag::P => {
            decls.extend(font_rule(font_family));
            decls.push(Declaration::new("text-align", "justify"));
            decls.push(Declaration::new("padding", "10px 0"));
            decls.push(Declaration::new("margin", "0"));
        }
        Tag::H1 | Tag::H2 | Tag::H3 => {
            decls.extend(font_rule(font_family));
            if let Some(size) = heading_size(tag) {
                decls.push(Declaration::new("font-size", size));
            }
            decls.push(Declaration::new("font-weight", "bold"));
            decls.push(Declaration::new("padding", "10px 0"));
            decls.push(Declaration::new("margin", "0"));
        }
        Tag::Strong | Tag::B => decls.push(Declaration::new("font-weight", "bold")),
        Tag::Em | Tag::I => decls.push(Declaration::new("font-style", "italic")),
        Tag::U => decls.push(Declaration::new("text-decoration", "underline")),
        Tag::A => {
            decls.push(Declaration::new("color", LINK_COLOR));
            decls.push(Declaration::new("text-decoration", "underline"));
        }
        Tag::Ul | Tag::Ol => {
            decls.push(Declaration::new("margin", "0"));
            decls.push(Declaration::new("padding", "0 0 0 20px"));
        }
        Tag::Li => {
            decls.extend(font_rule(font_family));
            decls.push(Declaration::new("padding", "5px 0"));
            decls.push(Declaration::new("margin", "0"));
        }
        Tag::Img => {
            decls.push(Declaration::new("max-width", "100%"));
            decls.push(Declaration::new("height", "auto"));
            decls.push(Declaration::new("display", "block"));
        }
        Tag::Div => {
            if let Some(align) = text_align.filter(|a| !a.is_empty()) {
                decls.push(Declaration::new("text-align", align));
                decls.push(Declaration::new("margin", "10px 0"));
            }
        }
        Tag::Span
        | Tag::Br
        | Tag::Table
        | Tag::Tbody
        | Tag::Tr
        | Tag::Td
        | Tag::Th
        | Tag::Body
        | Tag::Html
        | Tag::Head
        | Tag::Script
        | Tag::Style
        | Tag::Unknown(_) => {}
    }
    decls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::join;

    fn policy(tag: &str, font: &str) -> String {
        join(&styles_for(&Tag::from_name(tag), font, None))
    }

    #[test]
    fn paragraph_policy() {
        assert_eq!(
            policy("p", "Arial"),
            "font-family: Arial; font-size: 11pt; color: #333333; text-align: justify; padding: 10px 0; margin: 0"
        );
    }

    #[test]
    fn heading_policies() {
        for (tag, size) in [("h1", "24px"), ("h2", "20px"), ("h3", "16px")] {
            assert_eq!(
                policy(tag, "Georgia, Times, serif"),
                format!(
                    "font-family: Georgia, Times, serif; font-size: 11pt; color: #333333; \
                     font-size: {size}; font-weight: bold; padding: 10px 0; margin: 0"
                )
            );
        }
    }

    #[test]
    fn inline_policies() {
        assert_eq!(policy("strong", "x"), "font-weight: bold");
        assert_eq!(policy("b", "x"), "font-weight: bold");
        assert_eq!(policy("em", "x"), "font-style: italic");
        assert_eq!(policy("i", "x"), "font-style: italic");
        assert_eq!(policy("u", "x"), "text-decoration: underline");
        assert_eq!(policy("a", "x"), "color: #0066cc; text-decoration: underline");
    }

    #[test]
    fn list_policies() {
        assert_eq!(policy("ul", "x"), "margin: 0; padding: 0 0 0 20px");
        assert_eq!(policy("ol", "x"), "margin: 0; padding: 0 0 0 20px");
        assert_eq!(
            policy("li", "Tahoma"),
            "font-family: Tahoma; font-size: 11pt; color: #333333; padding: 5px 0; margin: 0"
        );
    }

    #[test]
    fn image_policy() {
        assert_eq!(policy("img", "x"), "max-width: 100%; height: auto; display: block");
    }

    #[test]
    fn div_only_styled_when_aligned() {
        assert!(styles_for(&Tag::Div, "x", None).is_empty());
        assert!(styles_for(&Tag::Div, "x", Some("")).is_empty());
        assert_eq!(
            join(&styles_for(&Tag::Div, "x", Some("right"))),
            "text-align: right; margin: 10px 0"
        );
    }

    #[test]
    fn unrecognised_tags_are_empty() {
        for tag in ["span", "table", "section", "h4", "blink"] {
            assert!(policy(tag, "Arial").is_empty(), "{tag} should have no policy");
        }
    }

    #[test]
    fn font_family_is_opaque() {
        let odd = "'Segoe UI', \"Noto Sans\", -apple-system";
        let decls = styles_for(&Tag::Li, odd, None);
        assert_eq!(decls[0], Declaration::new("font-family", odd));
    }
}
