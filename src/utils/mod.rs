//! Utility modules for promptwire
//!
//! Small helpers shared by the message model and the provider adapters.

pub mod base64_serde;
pub mod mime;

pub use mime::*;
