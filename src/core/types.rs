use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Map, Value};

/// Named inputs used to fill template placeholders.
///
/// A key mapped to `null` is treated the same as a missing key.
pub type Inputs = serde_json::Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    System,
    Tool,
    Developer,
    /// A role this crate does not model, kept verbatim
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ChatContent>,

    /// Optional participant name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Set on `tool` messages, references the call being answered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,

    /// Fields not modelled above, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatMessage {
    /// Create a message without content.
    pub fn new(role: ChatRole) -> Self {
        Self {
            role,
            content: None,
            name: None,
            tool_call_id: None,
            tool_calls: None,
            extra: Map::new(),
        }
    }

    pub fn user(content: impl Into<ChatContent>) -> Self {
        Self::new(ChatRole::User).with_content(content)
    }

    pub fn assistant(content: impl Into<ChatContent>) -> Self {
        Self::new(ChatRole::Assistant).with_content(content)
    }

    pub fn system(content: impl Into<ChatContent>) -> Self {
        Self::new(ChatRole::System).with_content(content)
    }

    pub fn developer(content: impl Into<ChatContent>) -> Self {
        Self::new(ChatRole::Developer).with_content(content)
    }

    pub fn tool(tool_call_id: impl Into<String>, content: impl Into<ChatContent>) -> Self {
        Self {
            tool_call_id: Some(tool_call_id.into()),
            ..Self::new(ChatRole::Tool).with_content(content)
        }
    }

    pub fn with_content(mut self, content: impl Into<ChatContent>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Message content: either a plain string or a list of typed items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatContent {
    Text(String),
    Items(Vec<ContentItem>),
}

impl From<&str> for ChatContent {
    fn from(text: &str) -> Self {
        ChatContent::Text(text.to_string())
    }
}

impl From<String> for ChatContent {
    fn from(text: String) -> Self {
        ChatContent::Text(text)
    }
}

impl From<Vec<ContentItem>> for ChatContent {
    fn from(items: Vec<ContentItem>) -> Self {
        ChatContent::Items(items)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItem {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
    /// Any other item type (audio, files, ...). Never interpolated.
    #[serde(untagged)]
    Other(Value),
}

impl ContentItem {
    pub fn text(text: impl Into<String>) -> Self {
        ContentItem::Text { text: text.into() }
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        ContentItem::ImageUrl {
            image_url: ImageUrl {
                url: url.into(),
                detail: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    /// Either a URL or a base64 data URI
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<ImageDetail>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageDetail {
    High,
    Low,
    Auto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ToolCallKind,
    pub function: FunctionCall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolCallKind {
    Function,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// JSON-encoded arguments, kept as the raw string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<String>,
}

/// A prompt template in one of the shapes a prompt can carry.
///
/// On deserialization every JSON array is read as a chat template and an
/// array that is not a list of messages is an error. Strings become
/// [`Template::String`] and anything else [`Template::Other`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Template {
    String(String),
    Chat(Vec<ChatMessage>),
    /// Any other shape. Population leaves it untouched unless it is an array.
    Other(Value),
}

impl<'de> Deserialize<'de> for Template {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(text) => Ok(Template::String(text)),
            messages @ Value::Array(_) => serde_json::from_value(messages)
                .map(Template::Chat)
                .map_err(de::Error::custom),
            other => Ok(Template::Other(other)),
        }
    }
}

impl From<&str> for Template {
    fn from(template: &str) -> Self {
        Template::String(template.to_string())
    }
}

impl From<String> for Template {
    fn from(template: String) -> Self {
        Template::String(template)
    }
}

impl From<Vec<ChatMessage>> for Template {
    fn from(messages: Vec<ChatMessage>) -> Self {
        Template::Chat(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_without_content_omits_key() {
        let message = ChatMessage::new(ChatRole::Assistant);
        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(value, json!({ "role": "assistant" }));
    }

    #[test]
    fn test_content_items_deserialize_by_type() {
        let message: ChatMessage = serde_json::from_value(json!({
            "role": "user",
            "content": [
                { "type": "text", "text": "Describe {{thing}}" },
                {
                    "type": "image_url",
                    "image_url": { "url": "https://example.com/a.png", "detail": "low" }
                }
            ]
        }))
        .unwrap();

        let Some(ChatContent::Items(items)) = &message.content else {
            panic!("expected content items, got {:?}", message.content);
        };
        assert_eq!(items[0], ContentItem::text("Describe {{thing}}"));
        assert!(matches!(
            &items[1],
            ContentItem::ImageUrl { image_url } if image_url.detail == Some(ImageDetail::Low)
        ));
    }

    #[test]
    fn test_template_shapes() {
        let string: Template = serde_json::from_value(json!("Hi {{name}}")).unwrap();
        assert_eq!(string, Template::from("Hi {{name}}"));

        let chat: Template =
            serde_json::from_value(json!([{ "role": "system", "content": "Be brief" }])).unwrap();
        assert_eq!(chat, Template::Chat(vec![ChatMessage::system("Be brief")]));

        let other: Template = serde_json::from_value(json!({ "unexpected": true })).unwrap();
        assert!(matches!(other, Template::Other(_)));
    }

    #[test]
    fn test_array_template_never_falls_back_to_other() {
        let chat: Template = serde_json::from_value(json!([
            { "role": "function", "content": "ok" },
            {
                "role": "user",
                "content": [{ "type": "input_audio", "input_audio": { "data": "..." } }]
            }
        ]))
        .unwrap();
        assert!(matches!(chat, Template::Chat(ref messages) if messages.len() == 2));

        let err = serde_json::from_value::<Template>(json!(["not a message"])).unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_unknown_role_item_and_fields_round_trip() {
        let raw = json!({
            "role": "function",
            "metadata": { "k": 1 },
            "content": [
                { "type": "text", "text": "Hi" },
                { "type": "input_audio", "input_audio": { "data": "abc", "format": "wav" } }
            ]
        });

        let message: ChatMessage = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(message.role, ChatRole::Other("function".to_string()));
        assert_eq!(message.extra["metadata"], json!({ "k": 1 }));

        let Some(ChatContent::Items(items)) = &message.content else {
            panic!("expected content items, got {:?}", message.content);
        };
        assert_eq!(items[0], ContentItem::text("Hi"));
        assert!(matches!(&items[1], ContentItem::Other(value) if value["type"] == "input_audio"));

        assert_eq!(serde_json::to_value(&message).unwrap(), raw);
    }

    #[test]
    fn test_tool_message_round_trip() {
        let message = ChatMessage {
            tool_calls: Some(vec![ToolCall {
                id: "call_1".to_string(),
                kind: ToolCallKind::Function,
                function: FunctionCall {
                    name: "get_weather".to_string(),
                    arguments: Some(r#"{"city":"Lisbon"}"#.to_string()),
                },
            }]),
            ..ChatMessage::new(ChatRole::Assistant)
        };

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["tool_calls"][0]["type"], "function");

        let decoded: ChatMessage = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, message);
    }
}
