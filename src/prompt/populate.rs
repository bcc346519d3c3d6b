//! Template population: substitute named inputs into string and chat templates.

use std::collections::{BTreeSet, HashMap};

use serde_json::Value;
use tracing::{debug, info};

use super::placeholder::{scan_placeholders, substitute};
use crate::core::error::PromptVariablesNotFoundError;
use crate::core::types::{ChatContent, ChatMessage, ContentItem, Inputs, Template};

/// Configuration for template population
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulateConfig {
    /// Double every backslash in substituted values (default: true)
    pub escape_backslashes: bool,
    /// Emit an info event whenever a non-string input is converted (default: true)
    pub log_coercions: bool,
}

impl Default for PopulateConfig {
    fn default() -> Self {
        Self {
            escape_backslashes: true,
            log_coercions: true,
        }
    }
}

impl PopulateConfig {
    pub fn new(escape_backslashes: bool, log_coercions: bool) -> Self {
        Self {
            escape_backslashes,
            log_coercions,
        }
    }
}

/// Fills `{{ ... }}` placeholders in templates.
///
/// Population never mutates its arguments. Every call returns a new template
/// or a [`PromptVariablesNotFoundError`] naming all unresolved placeholders.
#[derive(Debug, Clone, Default)]
pub struct Populator {
    config: PopulateConfig,
}

impl Populator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PopulateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PopulateConfig {
        &self.config
    }

    /// Populate a plain string template.
    pub fn populate_string_template(
        &self,
        template: &str,
        inputs: &Inputs,
    ) -> Result<String, PromptVariablesNotFoundError> {
        let mut resolved: HashMap<String, String> = HashMap::new();
        let mut missing: BTreeSet<String> = BTreeSet::new();

        for key in scan_placeholders(template) {
            if resolved.contains_key(&key) || missing.contains(&key) {
                continue;
            }

            match inputs.get(&key) {
                None | Some(Value::Null) => {
                    missing.insert(key);
                }
                Some(value) => {
                    let rendered = self.render_value(&key, value);
                    resolved.insert(key, rendered);
                }
            }
        }

        if !missing.is_empty() {
            debug!(
                missing = missing.len(),
                resolved = resolved.len(),
                "Template has unresolved variables"
            );
            return Err(PromptVariablesNotFoundError::new(missing.into_iter().collect()));
        }

        let populated = substitute(template, |key| resolved.get(key).cloned());
        Ok(populated.into_owned())
    }

    /// Populate every message of a chat template.
    ///
    /// Stops at the first message with missing variables.
    #[tracing::instrument(skip_all, fields(messages = messages.len()))]
    pub fn populate_chat_template(
        &self,
        messages: &[ChatMessage],
        inputs: &Inputs,
    ) -> Result<Vec<ChatMessage>, PromptVariablesNotFoundError> {
        messages
            .iter()
            .map(|message| self.populate_message(message, inputs))
            .collect()
    }

    /// Populate a template of either shape.
    ///
    /// A [`Template::Other`] holding an array is populated as raw chat JSON;
    /// any other [`Template::Other`] is returned as is.
    pub fn populate_template(
        &self,
        template: &Template,
        inputs: &Inputs,
    ) -> Result<Template, PromptVariablesNotFoundError> {
        match template {
            Template::String(text) => self
                .populate_string_template(text, inputs)
                .map(Template::String),
            Template::Chat(messages) => self
                .populate_chat_template(messages, inputs)
                .map(Template::Chat),
            Template::Other(value) => self
                .populate_json_template(value, inputs)
                .map(Template::Other),
        }
    }

    /// Populate a template given as raw JSON.
    ///
    /// Strings are populated as string templates. Arrays are treated as chat
    /// messages: only the `content` of each object is rewritten, every other
    /// key and every non-text item is kept exactly as given. Any other JSON
    /// value is returned unchanged.
    pub fn populate_json_template(
        &self,
        template: &Value,
        inputs: &Inputs,
    ) -> Result<Value, PromptVariablesNotFoundError> {
        match template {
            Value::String(text) => self
                .populate_string_template(text, inputs)
                .map(Value::String),
            Value::Array(messages) => messages
                .iter()
                .map(|message| self.populate_json_message(message, inputs))
                .collect::<Result<_, _>>()
                .map(Value::Array),
            other => Ok(other.clone()),
        }
    }

    fn populate_json_message(
        &self,
        message: &Value,
        inputs: &Inputs,
    ) -> Result<Value, PromptVariablesNotFoundError> {
        let Some(content) = message.get("content") else {
            return Ok(message.clone());
        };

        let content = match content {
            Value::String(text) => Value::String(self.populate_string_template(text, inputs)?),
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.populate_json_item(item, inputs))
                    .collect::<Result<_, _>>()?,
            ),
            other => other.clone(),
        };

        let mut message = message.clone();
        message["content"] = content;
        Ok(message)
    }

    fn populate_json_item(
        &self,
        item: &Value,
        inputs: &Inputs,
    ) -> Result<Value, PromptVariablesNotFoundError> {
        match (item.get("type").and_then(Value::as_str), item.get("text")) {
            (Some("text"), Some(Value::String(text))) => {
                let mut item = item.clone();
                item["text"] = Value::String(self.populate_string_template(text, inputs)?);
                Ok(item)
            }
            _ => Ok(item.clone()),
        }
    }

    fn populate_message(
        &self,
        message: &ChatMessage,
        inputs: &Inputs,
    ) -> Result<ChatMessage, PromptVariablesNotFoundError> {
        let Some(content) = &message.content else {
            return Ok(message.clone());
        };

        let content = match content {
            ChatContent::Text(text) => {
                ChatContent::Text(self.populate_string_template(text, inputs)?)
            }
            ChatContent::Items(items) => ChatContent::Items(
                items
                    .iter()
                    .map(|item| match item {
                        ContentItem::Text { text } => self
                            .populate_string_template(text, inputs)
                            .map(|text| ContentItem::Text { text }),
                        ContentItem::ImageUrl { .. } | ContentItem::Other(_) => Ok(item.clone()),
                    })
                    .collect::<Result<_, _>>()?,
            ),
        };

        Ok(ChatMessage {
            content: Some(content),
            ..message.clone()
        })
    }

    fn render_value(&self, key: &str, value: &Value) -> String {
        let text = match value {
            Value::String(text) => text.clone(),
            other => {
                let text = stringify_value(other);
                if self.config.log_coercions {
                    info!(
                        variable = key,
                        value = %text,
                        "Converting input value to string for prompt template"
                    );
                }
                text
            }
        };

        if self.config.escape_backslashes {
            text.replace('\\', "\\\\")
        } else {
            text
        }
    }
}

/// Default string form of an input value.
///
/// Numbers and booleans use their literal text. Arrays and objects are
/// rendered as compact JSON and `null` as an empty string. Population never
/// renders `null`: a null input counts as missing.
pub fn stringify_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Populate a string template with the default configuration.
pub fn populate_string_template(
    template: &str,
    inputs: &Inputs,
) -> Result<String, PromptVariablesNotFoundError> {
    Populator::default().populate_string_template(template, inputs)
}

/// Populate a chat template with the default configuration.
pub fn populate_chat_template(
    messages: &[ChatMessage],
    inputs: &Inputs,
) -> Result<Vec<ChatMessage>, PromptVariablesNotFoundError> {
    Populator::default().populate_chat_template(messages, inputs)
}

/// Populate a template of either shape with the default configuration.
pub fn populate_template(
    template: &Template,
    inputs: &Inputs,
) -> Result<Template, PromptVariablesNotFoundError> {
    Populator::default().populate_template(template, inputs)
}

/// Populate a raw JSON template with the default configuration.
pub fn populate_json_template(
    template: &Value,
    inputs: &Inputs,
) -> Result<Value, PromptVariablesNotFoundError> {
    Populator::default().populate_json_template(template, inputs)
}
