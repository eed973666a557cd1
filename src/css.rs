//! Inline `style` attribute helpers.
//!
//! A style attribute is treated as an ordered list of `property: value`
//! declarations. Duplicates are kept; lookups return the last occurrence,
//! which is what a CSS engine applies. Nothing here deduplicates.

use std::fmt;

/// One `property: value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.value)
    }
}

/// Join declarations with `"; "`, no trailing semicolon.
pub fn join(decls: &[Declaration]) -> String {
    decls
        .iter()
        .map(Declaration::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Split a style attribute into declarations.
///
/// Semicolons inside parentheses or quotes do not split, so values such as
/// `url(data:image/png;base64,...)` stay intact. Entries without a colon are
/// dropped; property names are lower-cased.
pub fn parse_declarations(style: &str) -> Vec<Declaration> {
    split_top_level(style)
        .into_iter()
        .filter_map(|chunk| {
            let (prop, value) = chunk.split_once(':')?;
            let prop = prop.trim();
            if prop.is_empty() {
                return None;
            }
            Some(Declaration::new(prop.to_ascii_lowercase(), value.trim()))
        })
        .collect()
}

fn split_top_level(style: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in style.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                parts.push(&style[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&style[start..]);
    parts.retain(|p| !p.trim().is_empty());
    parts
}

/// Value of the last declaration for `property`, if any.
pub fn property_value(style: &str, property: &str) -> Option<String> {
    parse_declarations(style)
        .into_iter()
        .rev()
        .find(|d| d.property.eq_ignore_ascii_case(property))
        .map(|d| d.value)
}

/// Prepend computed declarations to an author style.
///
/// Returns `None` when there is nothing to write. Author declarations come
/// last, so they win under last-declaration-wins.
pub fn prepend(computed: &[Declaration], existing: Option<&str>) -> Option<String> {
    if computed.is_empty() {
        return None;
    }
    let computed = join(computed);
    Some(match existing {
        Some(author) if !author.trim().is_empty() => format!("{computed}; {author}"),
        _ => computed,
    })
}

/// Append hint declarations after an author style.
pub fn append(existing: Option<&str>, hints: &[Declaration]) -> Option<String> {
    if hints.is_empty() {
        return None;
    }
    let hints = join(hints);
    Some(match existing {
        Some(author) if !author.trim().is_empty() => {
            let author = author.trim().trim_end_matches(';').trim_end();
            format!("{author}; {hints}")
        }
        _ => hints,
    })
}

/// Parse a CSS pixel length (`"120px"`, `"120.4px"`, or a bare number) and
/// round it to whole pixels. Other units yield `None`.
pub fn px_value(value: &str) -> Option<u32> {
    let v = value.trim().to_ascii_lowercase();
    let number = v.strip_suffix("px").unwrap_or(&v).trim();
    let parsed: f32 = number.parse().ok()?;
    if !parsed.is_finite() || parsed < 0.0 {
        return None;
    }
    Some(parsed.round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_order_and_duplicates() {
        let decls = parse_declarations("color: red; Font-Size:12px;color:blue;");
        assert_eq!(
            decls,
            vec![
                Declaration::new("color", "red"),
                Declaration::new("font-size", "12px"),
                Declaration::new("color", "blue"),
            ]
        );
    }

    #[test]
    fn data_uri_is_not_split() {
        let style = "background-image: url(data:image/png;base64,AAAA); width: 10px";
        let decls = parse_declarations(style);
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].value, "url(data:image/png;base64,AAAA)");
    }

    #[test]
    fn quoted_semicolons_are_not_split() {
        let decls = parse_declarations(r#"font-family: "A;B", serif; color: red"#);
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].value, r#""A;B", serif"#);
    }

    #[test]
    fn property_value_is_last_wins() {
        assert_eq!(
            property_value("width: 10px; WIDTH: 20px", "width").as_deref(),
            Some("20px")
        );
        assert_eq!(property_value("color: red", "width"), None);
    }

    #[test]
    fn prepend_puts_author_last() {
        let computed = [Declaration::new("color", "blue")];
        assert_eq!(
            prepend(&computed, Some("color:red")).as_deref(),
            Some("color: blue; color:red")
        );
        assert_eq!(prepend(&computed, Some("  ")).as_deref(), Some("color: blue"));
        assert_eq!(prepend(&[], Some("color:red")), None);
    }

    #[test]
    fn append_puts_hints_last() {
        let hints = [Declaration::new("border", "0")];
        assert_eq!(
            append(Some("width: 10px;"), &hints).as_deref(),
            Some("width: 10px; border: 0")
        );
        assert_eq!(append(None, &hints).as_deref(), Some("border: 0"));
    }

    #[test]
    fn px_values() {
        assert_eq!(px_value("120px"), Some(120));
        assert_eq!(px_value(" 99.6PX "), Some(100));
        assert_eq!(px_value("48"), Some(48));
        assert_eq!(px_value("50%"), None);
        assert_eq!(px_value("auto"), None);
        assert_eq!(px_value("-4px"), None);
    }
}
