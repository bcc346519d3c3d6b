//! # promptfill
//!
//! Populate prompt templates with named inputs. Every unresolved variable is
//! reported at once, before anything is sent to a model.
//!
//! ## Quick Start
//!
//! ```rust
//! use promptfill::{
//!     ChatMessage, ContentItem, Inputs, populate_chat_template, populate_string_template,
//! };
//! use serde_json::json;
//!
//! let mut inputs = Inputs::new();
//! inputs.insert("name".to_string(), json!("Alice"));
//!
//! let greeting = populate_string_template("Hello {{name}}!", &inputs)?;
//! assert_eq!(greeting, "Hello Alice!");
//!
//! let chat = populate_chat_template(
//!     &[ChatMessage::user(vec![ContentItem::text("Hi {{ name }}")])],
//!     &inputs,
//! )?;
//! assert_eq!(chat[0], ChatMessage::user(vec![ContentItem::text("Hi Alice")]));
//!
//! let err =
//!     populate_string_template("{{greeting}}, {{name}} from {{city}}", &inputs).unwrap_err();
//! assert_eq!(err.missing_variables, vec!["city", "greeting"]);
//! # Ok::<(), promptfill::PromptVariablesNotFoundError>(())
//! ```
//!
//! ## Placeholders
//!
//! - `{{ name }}`: keys made of letters, digits, `_`, `.`, `[` and `]`
//! - `{{ tool("a", "b") }}`: call expressions, looked up by their full text
//!
//! Non-string inputs are converted to text (`42` becomes `"42"`) and
//! backslashes in substituted values are doubled.

pub mod core;
pub mod prompt;
pub mod signature;

pub use crate::core::{
    error::PromptVariablesNotFoundError,
    types::{
        ChatContent, ChatMessage, ChatRole, ContentItem, FunctionCall, ImageDetail, ImageUrl,
        Inputs, Template, ToolCall, ToolCallKind,
    },
};
pub use prompt::{
    PopulateConfig, Populator, populate_chat_template, populate_json_template,
    populate_string_template, populate_template, scan_placeholders, template_variables,
};
pub use promptfill_macros::prompt_inputs;
pub use signature::{FnSignature, ParameterNames, args_to_inputs, compute_parameter_names};
