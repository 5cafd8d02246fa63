use serde::{Deserialize, Serialize};

/// Role of a chat message
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A single role-tagged message
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Chat-completion request body: `{ model, messages }`
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Model identifier understood by the provider
    pub model: String,
    /// Exactly one system message followed by one user message
    pub messages: Vec<ChatMessage>,
}

/// Chat-completion response. Only `choices[0].message.content` is read;
/// every other field the provider returns is ignored.
#[derive(Clone, Deserialize, Debug)]
pub struct CompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Clone, Deserialize, Debug)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Clone, Deserialize, Debug)]
pub struct ResponseMessage {
    /// Null when the model returned no text (tool calls, refusals)
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Text of the first choice, untouched
    pub fn into_first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
    }
}
