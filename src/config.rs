//! Template configuration – everything besides the body that shapes the
//! generated email.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::ForgeError;

pub const DEFAULT_MAX_WIDTH: u32 = 600;
pub const MIN_MAX_WIDTH: u32 = 100;
/// Widths the editor accepts; anything else is clamped by the caller.
pub const RECOMMENDED_WIDTH_RANGE: RangeInclusive<u32> = 300..=1200;
pub const DEFAULT_FONT_FAMILY: &str = "Arial, sans-serif";

/// Email-safe font stacks offered by the editor, as `(css value, label)`.
/// All of them ship proper bold weights and Vietnamese glyphs.
pub const FONT_PRESETS: &[(&str, &str)] = &[
    ("Arial, Helvetica, sans-serif", "Arial"),
    ("Times New Roman, Times, serif", "Times New Roman"),
    ("Tahoma, Geneva, sans-serif", "Tahoma"),
    ("Verdana, Geneva, sans-serif", "Verdana"),
    ("Georgia, Times, serif", "Georgia"),
    ("Trebuchet MS, Helvetica, sans-serif", "Trebuchet MS"),
    ("Segoe UI, Tahoma, sans-serif", "Segoe UI"),
    ("Calibri, Arial, sans-serif", "Calibri"),
];

/// Output encoding of the email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// `<div>` + `<style>` document for standards-compliant clients.
    #[default]
    Responsive,
    /// Nested tables + MSO conditional comments for Word-engine Outlook.
    Legacy,
}

impl Dialect {
    pub fn from_legacy_flag(legacy: bool) -> Self {
        if legacy {
            Dialect::Legacy
        } else {
            Dialect::Responsive
        }
    }

    pub fn is_legacy(self) -> bool {
        self == Dialect::Legacy
    }

    /// Appended to the export file stem.
    pub fn file_suffix(self) -> &'static str {
        match self {
            Dialect::Responsive => "",
            Dialect::Legacy => "-outlook",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailTemplateConfig {
    /// Maximum content width in pixels.
    pub max_width: u32,
    /// CSS `font-family` value, used verbatim.
    pub font_family: String,
    pub dialect: Dialect,
    /// Header image as a data URI or URL.
    pub header_image: Option<String>,
    /// Footer image as a data URI or URL.
    pub footer_image: Option<String>,
}

impl Default for EmailTemplateConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            dialect: Dialect::Responsive,
            header_image: None,
            footer_image: None,
        }
    }
}

impl EmailTemplateConfig {
    pub fn legacy() -> Self {
        Self {
            dialect: Dialect::Legacy,
            ..Self::default()
        }
    }

    pub fn to_json(&self) -> Result<String, ForgeError> {
        serde_json::to_string_pretty(self).map_err(|e| ForgeError::InvalidConfig(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, ForgeError> {
        serde_json::from_str(json).map_err(|e| ForgeError::InvalidConfig(e.to_string()))
    }

    /// Header image, treating an empty string as absent.
    pub fn header(&self) -> Option<&str> {
        self.header_image.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Footer image, treating an empty string as absent.
    pub fn footer(&self) -> Option<&str> {
        self.footer_image.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Clamp a requested width into the recommended range, logging when the
/// value had to move. The transpiler itself trusts whatever it is given.
pub fn clamp_max_width(requested: u32) -> u32 {
    let clamped = requested.clamp(
        *RECOMMENDED_WIDTH_RANGE.start(),
        *RECOMMENDED_WIDTH_RANGE.end(),
    );
    if clamped != requested {
        log::warn!("max width {requested}px out of range, using {clamped}px");
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = EmailTemplateConfig::default();
        assert_eq!(cfg.max_width, 600);
        assert_eq!(cfg.font_family, "Arial, sans-serif");
        assert_eq!(cfg.dialect, Dialect::Responsive);
        assert!(cfg.header().is_none());
    }

    #[test]
    fn json_roundtrip() {
        let cfg = EmailTemplateConfig {
            max_width: 720,
            header_image: Some("data:image/png;base64,AA".into()),
            ..EmailTemplateConfig::legacy()
        };
        let json = cfg.to_json().unwrap();
        assert!(json.contains(r#""max_width": 720"#));
        let parsed = EmailTemplateConfig::from_json(&json).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let cfg = EmailTemplateConfig::from_json(r#"{"dialect": "legacy"}"#).unwrap();
        assert_eq!(cfg.dialect, Dialect::Legacy);
        assert_eq!(cfg.max_width, DEFAULT_MAX_WIDTH);
    }

    #[test]
    fn invalid_json_is_reported() {
        let err = EmailTemplateConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, ForgeError::InvalidConfig(_)));
    }

    #[test]
    fn empty_images_count_as_absent() {
        let cfg = EmailTemplateConfig {
            footer_image: Some("  ".into()),
            ..EmailTemplateConfig::default()
        };
        assert!(cfg.footer().is_none());
    }

    #[test]
    fn clamping() {
        assert_eq!(clamp_max_width(600), 600);
        assert_eq!(clamp_max_width(50), 300);
        assert_eq!(clamp_max_width(5000), 1200);
    }

    #[test]
    fn legacy_suffix() {
        assert_eq!(Dialect::Legacy.file_suffix(), "-outlook");
        assert_eq!(Dialect::from_legacy_flag(false).file_suffix(), "");
    }
}
