//! # ai-lib-fncall
//!
//! 函数调用转换层：让不支持原生工具调用的模型也能通过文本协议使用工具。
//!
//! Function-calling translation for AI-Protocol conversations - converts
//! between structured (native) tool calls and a textual tag protocol that any
//! text-only model can follow.
//!
//! ## Overview
//!
//! Some models accept tool definitions and emit structured tool calls; others
//! only produce text. This library lets an agent keep a single native
//! conversation history and talk to either kind of model:
//!
//! - **Native → textual**: the tool catalog is appended to the system prompt,
//!   every structured call becomes a `<function=NAME>` tag block in assistant
//!   text, and tool results become user messages.
//! - **Textual → native**: tag blocks are parsed back into structured calls,
//!   with parameter values coerced to the types the tool schema declares.
//!
//! ## Key Features
//!
//! - **Exact wire format**: catalog and call blocks are byte-stable, so a
//!   conversation survives any number of round trips unchanged
//! - **Schema-driven coercion**: `"10"` becomes `10` when the schema says
//!   `integer`, `"[1, 2]"` becomes an array when it says `array`
//! - **Strict or permissive parsing**: fail fast, or keep a best-effort call
//!   and collect diagnostics (see [`config::TranslatorConfig`])
//! - **Content passthrough**: image blocks and provider caching hints are
//!   carried through untouched
//!
//! ## Quick Start
//!
//! ```rust
//! use ai_lib_fncall::{to_native, to_textual, Message, ToolDefinition};
//! use serde_json::json;
//!
//! let tools = vec![ToolDefinition::function(
//!     "execute_bash",
//!     "Execute a bash command in the terminal.",
//!     Some(json!({
//!         "type": "object",
//!         "properties": {"command": {"type": "string"}},
//!         "required": ["command"]
//!     })),
//! )];
//!
//! // What a text-only model answered
//! let reply = vec![
//!     Message::system("You are a helpful assistant."),
//!     Message::assistant(
//!         "Let me look.\n\n<function=execute_bash>\n<parameter=command>ls</parameter>\n</function>",
//!     ),
//! ];
//!
//! let native = to_native(&reply, &tools)?;
//! assert_eq!(native[1].tool_calls[0].name, "execute_bash");
//! assert_eq!(native[1].content.last_text(), Some("Let me look."));
//!
//! // And back again
//! let textual = to_textual(&native, &tools)?;
//! assert_eq!(textual[1], reply[1]);
//! # Ok::<(), ai_lib_fncall::Error>(())
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`types`] | Messages, content blocks, tool definitions and calls |
//! | [`schema`] | Read-only view over a tool's JSON Schema parameters |
//! | [`catalog`] | Tool catalog text and the system prompt suffix |
//! | [`codec`] | Tag block serializer and parser |
//! | [`translate`] | Whole-conversation conversion in both directions |
//! | [`config`] | Parse mode and call id settings |

pub mod catalog;
pub mod codec;
pub mod config;
pub mod schema;
pub mod translate;
pub mod types;

// Re-export main types for convenience
pub use config::{CallIdStyle, ParseMode, TranslatorConfig};
pub use translate::{to_native, to_textual, MessageTranslator, NativeConversion};
pub use types::{
    message::{ContentBlock, Message, MessageContent, MessageRole},
    tool::{ArgValue, Arguments, ToolCall, ToolDefinition},
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{CallError, Error, ErrorContext};
