//! Table-row reshaper – re-emits each top-level block of a styled tree as
//! one `<tr>` of a presentation table.

use std::fmt::Write as _;

use crate::dom::{escape_attr, escape_text, DomNode, ElementNode, Tag};
use crate::image_ref::ImageRef;
use crate::policy::{heading_size, BODY_FONT_SIZE, TEXT_COLOR};

/// Cell style and content for one row.
struct Row {
    cell_style: String,
    content: String,
}

/// Turn every immediate child of `root` into a table row, in order.
///
/// Elements always produce a row (unknown tags use the generic cell).
/// Non-blank top-level text gets a generic row too; blank text and comments
/// produce none.
pub fn to_rows(root: &ElementNode, font_family: &str) -> String {
    let mut out = String::new();
    let mut count = 0usize;
    for child in &root.children {
        let row = match child {
            DomNode::Element(e) => element_row(e, font_family),
            DomNode::Text(t) if !t.trim().is_empty() => Row {
                cell_style: generic_cell(font_family),
                content: escape_text(t.trim()),
            },
            DomNode::Text(_) | DomNode::Comment(_) => continue,
        };
        write_row(&mut out, &row);
        count += 1;
    }
    log::debug!("reshaped {count} top-level blocks into table rows");
    out
}

fn element_row(elem: &ElementNode, font_family: &str) -> Row {
    if let Some(size) = heading_size(&elem.tag) {
        return Row {
            cell_style: format!(
                "font-family: {font_family}; font-size: {size}; font-weight: bold; color: {TEXT_COLOR}; padding: 10px 0;"
            ),
            content: format!("<strong>{}</strong>", elem.inner_html()),
        };
    }
    match &elem.tag {
        Tag::Ul | Tag::Ol => Row {
            cell_style: format!(
                "font-family: {font_family}; font-size: {BODY_FONT_SIZE}; color: {TEXT_COLOR}; padding: 5px 0 5px 20px;"
            ),
            content: elem.outer_html(),
        },
        Tag::Div => match ImageRef::from_container(elem) {
            Some(image) => image_row(&image),
            None => generic_row(elem, font_family),
        },
        _ => generic_row(elem, font_family),
    }
}

fn image_row(image: &ImageRef) -> Row {
    let width_attr = if image.width > 0 {
        format!(" width=\"{}\"", image.width)
    } else {
        String::new()
    };
    Row {
        cell_style: format!("padding: 10px 0; text-align: {};", image.alignment.as_str()),
        content: format!(
            "<img src=\"{}\"{width_attr} style=\"display: block; max-width: 100%; height: auto;\" alt=\"{}\" />",
            escape_attr(&image.src),
            escape_attr(&image.alt),
        ),
    }
}

fn generic_row(elem: &ElementNode, font_family: &str) -> Row {
    Row {
        cell_style: generic_cell(font_family),
        content: elem.outer_html(),
    }
}

fn generic_cell(font_family: &str) -> String {
    format!(
        "font-family: {font_family}; font-size: {BODY_FONT_SIZE}; color: {TEXT_COLOR}; text-align: justify; padding: 10px 0;"
    )
}

fn write_row(out: &mut String, row: &Row) {
    let _ = write!(
        out,
        "
                <tr>
                    <td style=\"{}\">
                        {}
                    </td>
                </tr>",
        escape_attr(&row.cell_style),
        row.content
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_fragment;
    use crate::inline::inline_styles;

    fn rows(html: &str) -> String {
        let mut root = parse_fragment(html);
        inline_styles(&mut root, "Arial");
        to_rows(&root, "Arial")
    }

    #[test]
    fn row_count_matches_top_level_children() {
        for n in 0..6 {
            let html: String = (0..n).map(|i| format!("<p>{i}</p>")).collect();
            assert_eq!(rows(&html).matches("<tr>").count(), n);
        }
    }

    #[test]
    fn heading_row_is_bold_and_sized() {
        let out = rows("<h2>Title</h2>");
        assert!(out.contains(
            r#"<td style="font-family: Arial; font-size: 20px; font-weight: bold; color: #333333; padding: 10px 0;">"#
        ));
        assert!(out.contains("<strong>Title</strong>"));
        assert!(!out.contains("<h2"));
    }

    #[test]
    fn every_heading_level_gets_its_size() {
        for (tag, size) in [("h1", "24px"), ("h2", "20px"), ("h3", "16px")] {
            let out = rows(&format!("<{tag}>T</{tag}>"));
            assert!(out.contains(&format!("font-size: {size}; font-weight: bold;")), "{tag}");
        }
    }

    #[test]
    fn leading_style_block_gets_a_row() {
        let out = rows("<style>.note{color:red}</style><title>Subject</title><p>Hi</p>");
        assert_eq!(out.matches("<tr>").count(), 3);
        assert!(out.contains("<style>.note{color:red}</style>"));
        assert!(out.contains("<title>Subject</title>"));
    }

    #[test]
    fn list_row_keeps_markup() {
        let out = rows("<ul><li>A<ol><li>nested</li></ol></li></ul>");
        assert!(out.contains("padding: 5px 0 5px 20px;"));
        assert!(out.contains(r#"<ul style="margin: 0; padding: 0 0 0 20px"><li"#));
        assert!(out.contains("nested</li></ol></li></ul>"));
    }

    #[test]
    fn image_wrapper_becomes_bare_img() {
        let out = rows(
            r#"<div style="text-align: left;" data-width="180"><img src="pic.png" style="width: 180px; height: auto"></div>"#,
        );
        assert!(out.contains(r#"<td style="padding: 10px 0; text-align: left;">"#));
        assert!(out.contains(
            r#"<img src="pic.png" width="180" style="display: block; max-width: 100%; height: auto;" alt="Image" />"#
        ));
        assert!(!out.contains("<div"));
    }

    #[test]
    fn image_without_width_has_no_width_attribute() {
        let out = rows(r#"<div><img src="pic.png"></div>"#);
        assert!(out.contains("text-align: center;"));
        assert!(out.contains(r#"<img src="pic.png" style="#));
    }

    #[test]
    fn plain_div_and_unknown_tags_fall_back() {
        let out = rows("<div>Just text</div><section>S</section>");
        assert_eq!(out.matches("text-align: justify; padding: 10px 0;").count(), 2);
        assert!(out.contains("<div>Just text</div>"));
        assert!(out.contains("<section>S</section>"));
    }

    #[test]
    fn paragraph_markup_is_kept_verbatim() {
        let out = rows("<p>Hi <em>there</em></p>");
        assert!(out.contains(r#"<p style="font-family: Arial; font-size: 11pt;"#));
        assert!(out.contains(r#"<em style="font-style: italic">there</em></p>"#));
    }

    #[test]
    fn blank_text_is_skipped_but_loose_text_kept() {
        let out = rows("\n  <p>a</p>\n  tail text");
        assert_eq!(out.matches("<tr>").count(), 2);
        assert!(out.contains("tail text"));
    }

    #[test]
    fn quotes_in_font_family_are_escaped() {
        let root = parse_fragment("<p>x</p>");
        let out = to_rows(&root, "\"Segoe UI\", sans-serif");
        assert!(out.contains("font-family: &quot;Segoe UI&quot;, sans-serif;"));
    }
}
