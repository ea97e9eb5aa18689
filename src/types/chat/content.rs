use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PromptError;
use crate::utils::mime_top_level;

/// Kind of media a slot or content part carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Audio,
    File,
    Video,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Audio => "audio",
            Self::File => "file",
            Self::Video => "video",
        }
    }

    /// Best-effort media type for a MIME string; anything that is not
    /// image, audio or video is treated as a file.
    pub fn from_mime(content_type: &str) -> Self {
        match mime_top_level(content_type) {
            Some("image") => Self::Image,
            Some("audio") => Self::Audio,
            Some("video") => Self::Video,
            _ => Self::File,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = PromptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "image" => Ok(Self::Image),
            "audio" => Ok(Self::Audio),
            "file" => Ok(Self::File),
            "video" => Ok(Self::Video),
            other => Err(PromptError::InvalidInput(format!(
                "Unknown media type '{other}'"
            ))),
        }
    }
}

/// Content part - one atomic unit of structured message content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentPart {
    /// Text content
    Text { text: String },

    /// Media referenced by URL
    Url {
        slot_name: String,
        #[serde(rename = "slot_type")]
        media_type: MediaType,
        url: String,
    },

    /// Inline media; raw bytes, base64-encoded on the wire
    Base64 {
        slot_name: String,
        #[serde(rename = "slot_type")]
        media_type: MediaType,
        content_type: String,
        #[serde(with = "crate::utils::base64_serde")]
        data: Vec<u8>,
    },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn url(slot_name: impl Into<String>, media_type: MediaType, url: impl Into<String>) -> Self {
        Self::Url {
            slot_name: slot_name.into(),
            media_type,
            url: url.into(),
        }
    }

    pub fn base64(
        slot_name: impl Into<String>,
        media_type: MediaType,
        content_type: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self::Base64 {
            slot_name: slot_name.into(),
            media_type,
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Media type for media parts, `None` for text
    pub fn media_type(&self) -> Option<MediaType> {
        match self {
            Self::Text { .. } => None,
            Self::Url { media_type, .. } | Self::Base64 { media_type, .. } => Some(*media_type),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            _ => None,
        }
    }
}

/// Part of a message that already has the Gemini wire shape, typically
/// taken from a previous Gemini response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum GeminiPart {
    Text { text: String },
    InlineData { inline_data: GeminiInlineData },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeminiInlineData {
    pub mime_type: String,
    /// Base64-encoded payload
    pub data: String,
}

impl GeminiPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self::InlineData {
            inline_data: GeminiInlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn base64_part_serializes_bytes_as_base64() {
        let part = ContentPart::base64("doc", MediaType::File, "application/pdf", b"some pdf data".to_vec());
        assert_eq!(
            serde_json::to_value(&part).unwrap(),
            json!({
                "type": "base64",
                "slot_name": "doc",
                "slot_type": "file",
                "content_type": "application/pdf",
                "data": "c29tZSBwZGYgZGF0YQ=="
            })
        );
    }

    #[test]
    fn url_part_deserializes_from_tagged_object() {
        let part: ContentPart = serde_json::from_value(json!({
            "type": "url",
            "slot_name": "img",
            "slot_type": "image",
            "url": "http://localhost/image"
        }))
        .unwrap();
        assert_eq!(part, ContentPart::url("img", MediaType::Image, "http://localhost/image"));
        assert_eq!(part.media_type(), Some(MediaType::Image));
    }

    #[test]
    fn media_type_from_mime() {
        assert_eq!(MediaType::from_mime("image/png"), MediaType::Image);
        assert_eq!(MediaType::from_mime("audio/mpeg"), MediaType::Audio);
        assert_eq!(MediaType::from_mime("video/mp4"), MediaType::Video);
        assert_eq!(MediaType::from_mime("application/pdf"), MediaType::File);
        assert!("sticker".parse::<MediaType>().is_err());
        assert_eq!("IMAGE".parse::<MediaType>().unwrap(), MediaType::Image);
    }

    #[test]
    fn gemini_parts_use_wire_shape() {
        assert_eq!(
            serde_json::to_value(GeminiPart::inline_data("image/png", "aGk=")).unwrap(),
            json!({"inline_data": {"mime_type": "image/png", "data": "aGk="}})
        );
        let part: GeminiPart = serde_json::from_value(json!({"text": "hello"})).unwrap();
        assert_eq!(part, GeminiPart::text("hello"));
    }
}
