//! 类型系统模块：对话消息与工具调用的核心数据类型。
//!
//! # Types Module
//!
//! Core data types shared by both conversation forms handled by this crate.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Message`] | Chat message with role, content and (native form) tool calls |
//! | [`MessageRole`] | Message role (system, user, assistant, tool) |
//! | [`ContentBlock`] | Text block (with optional caching hint) or image |
//! | [`ToolDefinition`] | Tool definition for the model's catalog |
//! | [`ToolCall`] | Structured tool invocation |
//! | [`ArgValue`] | Typed argument value |
//!
//! ## Example
//!
//! ```rust
//! use ai_lib_fncall::types::{Arguments, Message, ToolCall, ToolDefinition};
//! use serde_json::json;
//!
//! let tool = ToolDefinition::function(
//!     "execute_bash",
//!     "Execute a bash command in the terminal.",
//!     Some(json!({
//!         "type": "object",
//!         "properties": {"command": {"type": "string"}},
//!         "required": ["command"]
//!     })),
//! );
//!
//! let call = ToolCall::new(
//!     "toolu_01",
//!     tool.name(),
//!     Arguments::new().with("command", "ls -la /tmp"),
//! );
//! let reply = Message::assistant("Listing files:").with_tool_calls(vec![call]);
//! assert!(reply.has_tool_calls());
//! ```

pub mod message;
pub mod tool;

pub use message::{ContentBlock, ImageSource, Message, MessageContent, MessageRole};
pub use tool::{ArgValue, Arguments, FunctionDefinition, ToolCall, ToolDefinition};
