//! Conversation message model shared by the native and textual forms

use serde::{Deserialize, Serialize};

use crate::types::tool::ToolCall;

/// Unified message structure
///
/// In native form an assistant message may carry `tool_calls` and a tool
/// result is a [`MessageRole::Tool`] message with `tool_call_id` and `name`
/// set. The textual form uses none of these fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: MessageContent,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    /// Name of the tool that produced a tool result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Message {
    pub fn system(text: impl Into<String>) -> Self {
        Self::with_content(MessageRole::System, MessageContent::Text(text.into()))
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::with_content(MessageRole::User, MessageContent::Text(text.into()))
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::with_content(MessageRole::Assistant, MessageContent::Text(text.into()))
    }

    /// Tool result correlated to the invocation with `call_id`.
    pub fn tool_result(call_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Tool,
            content: MessageContent::Text(text.into()),
            tool_calls: Vec::new(),
            tool_call_id: Some(call_id.into()),
            name: None,
        }
    }

    pub fn with_content(role: MessageRole, content: MessageContent) -> Self {
        Self {
            role,
            content,
            tool_calls: Vec::new(),
            tool_call_id: None,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_tool_calls(mut self, tool_calls: Vec<ToolCall>) -> Self {
        self.tool_calls = tool_calls;
        self
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
    Tool,
}

/// Message content (can be string or array of content blocks)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

impl MessageContent {
    pub fn text(text: impl Into<String>) -> Self {
        MessageContent::Text(text.into())
    }

    pub fn blocks(blocks: Vec<ContentBlock>) -> Self {
        MessageContent::Blocks(blocks)
    }

    /// Text of a plain-string content, or of the final block when it is text.
    pub fn last_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(s) => Some(s),
            MessageContent::Blocks(bs) => match bs.last() {
                Some(ContentBlock::Text { text, .. }) => Some(text),
                _ => None,
            },
        }
    }

    pub fn last_text_mut(&mut self) -> Option<&mut String> {
        match self {
            MessageContent::Text(s) => Some(s),
            MessageContent::Blocks(bs) => match bs.last_mut() {
                Some(ContentBlock::Text { text, .. }) => Some(text),
                _ => None,
            },
        }
    }

    /// Text of a plain-string content, or of the first block when it is text.
    pub fn first_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(s) => Some(s),
            MessageContent::Blocks(bs) => match bs.first() {
                Some(ContentBlock::Text { text, .. }) => Some(text),
                _ => None,
            },
        }
    }

    pub fn first_text_mut(&mut self) -> Option<&mut String> {
        match self {
            MessageContent::Text(s) => Some(s),
            MessageContent::Blocks(bs) => match bs.first_mut() {
                Some(ContentBlock::Text { text, .. }) => Some(text),
                _ => None,
            },
        }
    }

    /// Append to the trailing text, or push a new text block when the
    /// content ends with a non-text block (or has no blocks at all).
    pub fn append_text(&mut self, suffix: &str) {
        if let Some(text) = self.last_text_mut() {
            text.push_str(suffix);
        } else if let MessageContent::Blocks(bs) = self {
            bs.push(ContentBlock::text(suffix));
        }
    }

    /// Prepend to the leading text, or insert a new first text block.
    pub fn prepend_text(&mut self, prefix: &str) {
        if let Some(text) = self.first_text_mut() {
            text.insert_str(0, prefix);
        } else if let MessageContent::Blocks(bs) = self {
            bs.insert(0, ContentBlock::text(prefix));
        }
    }

    /// Drop the final block if it is an empty, unannotated text block that
    /// was pushed by [`append_text`](Self::append_text) rather than edited in
    /// place (i.e. it is alone or follows a non-text block).
    pub(crate) fn drop_empty_trailing_block(&mut self) {
        if let MessageContent::Blocks(bs) = self {
            let n = bs.len();
            let pushed = n == 1 || (n > 1 && !bs[n - 2].is_text());
            if pushed && bs.last().is_some_and(ContentBlock::is_bare_empty_text) {
                bs.pop();
            }
        }
    }

    /// Counterpart of [`drop_empty_trailing_block`](Self::drop_empty_trailing_block)
    /// for blocks inserted by [`prepend_text`](Self::prepend_text).
    pub(crate) fn drop_empty_leading_block(&mut self) {
        if let MessageContent::Blocks(bs) = self {
            let inserted = bs.len() == 1 || (bs.len() > 1 && !bs[1].is_text());
            if inserted && bs.first().is_some_and(ContentBlock::is_bare_empty_text) {
                bs.remove(0);
            }
        }
    }
}

/// Content block
///
/// `cache_control` is an opaque provider caching hint; it is carried through
/// every conversion untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cache_control: Option<serde_json::Value>,
    },
    #[serde(rename = "image")]
    Image { source: ImageSource },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSource {
    #[serde(rename = "type")]
    pub source_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    pub data: String, // base64 encoded or URL
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text {
            text: text.into(),
            cache_control: None,
        }
    }

    /// Text block carrying a caching hint, e.g. `{"type": "ephemeral"}`.
    pub fn cached_text(text: impl Into<String>, cache_control: serde_json::Value) -> Self {
        ContentBlock::Text {
            text: text.into(),
            cache_control: Some(cache_control),
        }
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        ContentBlock::Image {
            source: ImageSource {
                source_type: "url".to_string(),
                media_type: None,
                data: url.into(),
            },
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, ContentBlock::Text { .. })
    }

    fn is_bare_empty_text(&self) -> bool {
        matches!(self, ContentBlock::Text { text, cache_control: None } if text.is_empty())
    }
}
