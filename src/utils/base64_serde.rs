//! Serde adapter storing raw bytes as a base64 string

use serde::{Deserialize, Deserializer, Serializer};

use super::mime::{base64_decode, base64_encode};

pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&base64_encode(data))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let encoded = String::deserialize(deserializer)?;
    base64_decode(&encoded).map_err(serde::de::Error::custom)
}
