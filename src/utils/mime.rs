//! MIME type and inline-data utilities

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::error::Result;

/// Subtype of a MIME string with any parameters removed
/// (`"image/png; q=1"` -> `"png"`)
pub fn mime_subtype(content_type: &str) -> Option<&str> {
    let essence = content_type.split(';').next()?.trim();
    let (_, subtype) = essence.split_once('/')?;
    let subtype = subtype.trim();
    if subtype.is_empty() {
        None
    } else {
        Some(subtype)
    }
}

/// Top-level type of a MIME string (`"image/png"` -> `"image"`)
pub fn mime_top_level(content_type: &str) -> Option<&str> {
    let (top, _) = content_type.trim().split_once('/')?;
    if top.is_empty() { None } else { Some(top) }
}

/// `data:` URL for inline bytes
pub fn data_url(content_type: &str, data: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, base64_encode(data))
}

pub fn base64_encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

pub fn base64_decode(data: &str) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(data.trim())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtype_strips_parameters() {
        assert_eq!(mime_subtype("image/png"), Some("png"));
        assert_eq!(mime_subtype("audio/mpeg; rate=44100"), Some("mpeg"));
        assert_eq!(mime_subtype("application/pdf"), Some("pdf"));
        assert_eq!(mime_subtype("png"), None);
        assert_eq!(mime_subtype(""), None);
    }

    #[test]
    fn top_level_type() {
        assert_eq!(mime_top_level("video/mp4"), Some("video"));
        assert_eq!(mime_top_level("/mp4"), None);
    }

    #[test]
    fn data_url_encodes_bytes() {
        assert_eq!(
            data_url("application/pdf", b"some pdf data"),
            "data:application/pdf;base64,c29tZSBwZGYgZGF0YQ=="
        );
    }

    #[test]
    fn decode_rejects_garbage() {
        assert_eq!(base64_decode("c29tZSBpbWFnZSBkYXRh").unwrap(), b"some image data");
        assert!(base64_decode("not base64!").is_err());
    }
}
