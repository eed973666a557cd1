//! Image payloads – header/footer images travel through the template as
//! self-describing `data:` URIs.

use std::io::Cursor;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD as BASE64_STD, Engine as _};
use image::{ImageFormat, ImageReader};

use crate::error::ForgeError;

/// An image encoded as a data URI, with its intrinsic size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub data_uri: String,
    pub mime: &'static str,
    pub width: u32,
    pub height: u32,
}

/// Sniff, measure and encode raw image bytes.
///
/// Fails with [`ForgeError::UnreadableFile`] when the bytes are not an image
/// format we can decode.
pub fn encode_image(bytes: &[u8]) -> Result<ImagePayload, ForgeError> {
    let (format, width, height) = sniff(bytes)?;
    let mime = format.to_mime_type();
    Ok(ImagePayload {
        data_uri: format!("data:{mime};base64,{}", BASE64_STD.encode(bytes)),
        mime,
        width,
        height,
    })
}

/// Read and encode an image file.
pub fn encode_image_file(path: &Path) -> Result<ImagePayload, ForgeError> {
    let bytes = std::fs::read(path)
        .map_err(|e| ForgeError::UnreadableFile(format!("{}: {e}", path.display())))?;
    encode_image(&bytes).map_err(|e| {
        log::warn!("skipping image {}: {e}", path.display());
        match e {
            ForgeError::UnreadableFile(msg) => {
                ForgeError::UnreadableFile(format!("{}: {msg}", path.display()))
            }
            other => other,
        }
    })
}

/// Validate an existing data URI and measure the image it carries.
pub fn inspect_data_uri(src: &str) -> Result<ImagePayload, ForgeError> {
    let (_, bytes) = decode_data_uri(src)?;
    let (format, width, height) = sniff(&bytes)?;
    Ok(ImagePayload {
        data_uri: src.trim().to_string(),
        mime: format.to_mime_type(),
        width,
        height,
    })
}

/// Split a base64 data URI into its declared media type and decoded bytes.
pub fn decode_data_uri(src: &str) -> Result<(String, Vec<u8>), ForgeError> {
    let unreadable = |msg: String| ForgeError::UnreadableFile(msg);
    let rest = src.trim().strip_prefix("data:").ok_or_else(|| {
        let preview: String = src.chars().take(40).collect();
        unreadable(format!("expected a data URI, got {preview:?}"))
    })?;
    let (header, data) = rest
        .split_once(',')
        .ok_or_else(|| unreadable("data URI has no `,` separator".to_string()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| unreadable("only base64 data URIs are supported".to_string()))?;
    let bytes = BASE64_STD
        .decode(data.trim())
        .map_err(|e| unreadable(format!("base64 decode error: {e}")))?;
    Ok((mime.to_string(), bytes))
}

fn sniff(bytes: &[u8]) -> Result<(ImageFormat, u32, u32), ForgeError> {
    if bytes.is_empty() {
        return Err(ForgeError::UnreadableFile("file is empty".to_string()));
    }
    let format = image::guess_format(bytes)
        .map_err(|e| ForgeError::UnreadableFile(format!("not a recognised image: {e}")))?;
    let (width, height) = ImageReader::with_format(Cursor::new(bytes), format)
        .into_dimensions()
        .map_err(|e| ForgeError::UnreadableFile(format!("cannot decode {format:?}: {e}")))?;
    Ok((format, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1×1 transparent PNG.
    pub(crate) const PIXEL_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    fn pixel_bytes() -> Vec<u8> {
        BASE64_STD.decode(PIXEL_PNG).unwrap()
    }

    #[test]
    fn encodes_png_as_data_uri() {
        let payload = encode_image(&pixel_bytes()).unwrap();
        assert_eq!(payload.mime, "image/png");
        assert_eq!((payload.width, payload.height), (1, 1));
        assert_eq!(payload.data_uri, format!("data:image/png;base64,{PIXEL_PNG}"));
    }

    #[test]
    fn rejects_non_images() {
        let err = encode_image(b"%PDF-1.7 not an image").unwrap_err();
        assert!(matches!(err, ForgeError::UnreadableFile(_)));
        assert!(err.to_string().starts_with("unreadable file"));
        assert!(matches!(encode_image(&[]), Err(ForgeError::UnreadableFile(_))));
    }

    #[test]
    fn decode_round_trip() {
        let (mime, bytes) = decode_data_uri(&format!("data:image/png;base64,{PIXEL_PNG}")).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, pixel_bytes());
    }

    #[test]
    fn decode_rejects_urls_and_plain_data() {
        assert!(decode_data_uri("https://example.com/a.png").is_err());
        assert!(decode_data_uri("data:text/plain,hello").is_err());
        assert!(decode_data_uri("data:image/png;base64").is_err());
    }

    #[test]
    fn inspect_measures_existing_uri() {
        let payload = inspect_data_uri(&format!("data:image/png;base64,{PIXEL_PNG}")).unwrap();
        assert_eq!(payload.width, 1);
    }

    #[test]
    fn missing_file_is_unreadable() {
        let err = encode_image_file(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, ForgeError::UnreadableFile(_)));
    }
}
