//! Data types shared by the binder, the adapters and the resolvers

pub mod chat;
pub mod media;
pub mod prompt_info;
pub mod tools;

pub use chat::*;
pub use media::{MediaInput, MediaInputCollection, MediaSlot};
pub use prompt_info::{PromptInfo, PromptVersionInfo};
pub use tools::ToolSchema;
