//! Document import – turns an uploaded file into the HTML body the
//! transpiler consumes.
//!
//! Word documents need an external converter; this crate ships the importer
//! for HTML sources and the seam ([`Importer`]) such a converter plugs into.

use std::path::Path;

use crate::dom::parse_document_body;
use crate::error::ForgeError;

/// Converted HTML plus any diagnostics produced on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportResult {
    pub html: String,
    pub messages: Vec<String>,
}

pub trait Importer {
    /// Convert a document payload. Fails with
    /// [`ForgeError::ConversionFailed`] and no partial output.
    fn import(&self, bytes: &[u8]) -> Result<ImportResult, ForgeError>;
}

/// Accepts HTML fragments or full HTML documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlImporter;

impl Importer for HtmlImporter {
    fn import(&self, bytes: &[u8]) -> Result<ImportResult, ForgeError> {
        let mut messages = Vec::new();

        let text = match std::str::from_utf8(bytes) {
            Ok(s) => s.to_string(),
            Err(e) => {
                let msg = format!("input is not valid UTF-8 ({e}); invalid bytes were replaced");
                log::warn!("{msg}");
                messages.push(msg);
                String::from_utf8_lossy(bytes).into_owned()
            }
        };
        let text = text.trim_start_matches('\u{FEFF}');

        if text.trim().is_empty() {
            return Err(ForgeError::ConversionFailed("document is empty".to_string()));
        }

        let lower = text.to_ascii_lowercase();
        let html = if lower.contains("<html") || lower.contains("<body") {
            messages.push("full HTML document detected; only the body was kept".to_string());
            parse_document_body(text).inner_html().trim().to_string()
        } else {
            text.trim().to_string()
        };

        Ok(ImportResult { html, messages })
    }
}

/// Import a file from disk with the importer matching its extension.
pub fn import_file(path: &Path) -> Result<ImportResult, ForgeError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "docx" | "doc" => Err(ForgeError::ConversionFailed(format!(
            "{}: Word documents must be converted to HTML first",
            path.display()
        ))),
        _ => {
            let bytes = std::fs::read(path).map_err(|e| {
                ForgeError::ConversionFailed(format!("{}: {e}", path.display()))
            })?;
            HtmlImporter.import(&bytes)
        }
    }
}
