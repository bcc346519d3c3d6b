pub mod error;
pub mod types;

pub use error::PromptVariablesNotFoundError;
pub use types::{ChatContent, ChatMessage, ChatRole, ContentItem, Inputs, Template};
