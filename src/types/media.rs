use serde::{Deserialize, Serialize};

use super::chat::{ContentPart, MediaType};

/// Media placeholder declared on a template message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaSlot {
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub placeholder_name: String,
}

impl MediaSlot {
    pub fn new(media_type: MediaType, placeholder_name: impl Into<String>) -> Self {
        Self {
            media_type,
            placeholder_name: placeholder_name.into(),
        }
    }
}

/// Caller-supplied media for one placeholder
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MediaInput {
    /// Media referenced by URL
    Url { url: String },
    /// Inline media bytes with their MIME type
    Base64 {
        #[serde(with = "crate::utils::base64_serde")]
        data: Vec<u8>,
        content_type: String,
    },
}

impl MediaInput {
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url { url: url.into() }
    }

    pub fn base64(data: impl Into<Vec<u8>>, content_type: impl Into<String>) -> Self {
        Self::Base64 {
            data: data.into(),
            content_type: content_type.into(),
        }
    }

    /// Content part filling `slot`
    pub fn to_content_part(&self, slot: &MediaSlot) -> ContentPart {
        match self {
            Self::Url { url } => ContentPart::url(&slot.placeholder_name, slot.media_type, url),
            Self::Base64 { data, content_type } => ContentPart::base64(
                &slot.placeholder_name,
                slot.media_type,
                content_type,
                data.clone(),
            ),
        }
    }
}

/// Media inputs keyed by placeholder name, in insertion order.
/// Inserting an existing name replaces its input in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct MediaInputCollection {
    entries: Vec<(String, MediaInput)>,
}

impl MediaInputCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, input: MediaInput) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = input,
            None => self.entries.push((name, input)),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, input: MediaInput) -> Self {
        self.insert(name, input);
        self
    }

    pub fn get(&self, name: &str) -> Option<&MediaInput> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, input)| input)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MediaInput)> {
        self.entries.iter().map(|(name, input)| (name.as_str(), input))
    }
}
