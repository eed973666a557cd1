//! Image references embedded in the content tree.
//!
//! The editor serializes an image as a wrapper `<div>` whose `text-align`
//! carries the alignment (mirrored in `data-alignment`) and whose
//! `data-width` records the chosen width, around an `<img>` whose inline
//! `width` holds the same value in pixels. Imported documents only carry a
//! bare `<img>` with its natural attributes.

use crate::css::{property_value, px_value};
use crate::dom::{ElementNode, Tag};

pub const DEFAULT_ALT: &str = "Image";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

impl Alignment {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" | "start" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" | "end" => Some(Alignment::Right),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// What the transpiler needs to know about one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub src: String,
    pub alt: String,
    pub alignment: Alignment,
    /// Width in pixels; `0` means "scale to the container".
    pub width: u32,
}

impl ImageRef {
    /// Read the image held by a wrapper element, if it contains one.
    pub fn from_container(container: &ElementNode) -> Option<Self> {
        let img = container.find_descendant(&Tag::Img)?;
        let mut image = Self::from_img(img);

        let container_align = container
            .inline_style()
            .and_then(|s| property_value(s, "text-align"))
            .and_then(|a| Alignment::parse(&a))
            .or_else(|| container.attr("data-alignment").and_then(Alignment::parse));
        if let Some(align) = container_align {
            image.alignment = align;
        }

        if image.width == 0 {
            image.width = container
                .attr("data-width")
                .and_then(px_value)
                .unwrap_or(0);
        }
        Some(image)
    }

    /// Reconstruct from a bare `<img>`: inline pixel width first, then the
    /// `width` attribute. Alignment defaults to centre.
    pub fn from_img(img: &ElementNode) -> Self {
        let width = img
            .inline_style()
            .and_then(|s| property_value(s, "width"))
            .and_then(|w| px_value(&w))
            .or_else(|| img.attr("width").and_then(px_value))
            .unwrap_or(0);

        Self {
            src: img.src().unwrap_or_default().to_string(),
            alt: img
                .attr("alt")
                .filter(|a| !a.trim().is_empty())
                .unwrap_or(DEFAULT_ALT)
                .to_string(),
            alignment: Alignment::default(),
            width,
        }
    }
}
