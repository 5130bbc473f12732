//! 消息转换模块：在原生工具调用与文本工具调用两种对话形式之间互相转换。
//!
//! # Message Translator
//!
//! Converts whole conversations between the two forms:
//!
//! | Native | Textual |
//! |--------|---------|
//! | system message | system message + preamble + tool catalog |
//! | assistant message with N tool calls | N assistant turns, one tag block each |
//! | tool message (`tool_call_id`) | user message prefixed `EXECUTION RESULT of [NAME]:` |
//! | anything else | unchanged |
//!
//! Both directions borrow the input and build a new conversation; the input
//! is never modified. For conversations this crate produced,
//! `to_native(to_textual(m))` restores `m` and vice versa, provided native
//! call ids follow the configured [`CallIdStyle::Sequential`](crate::config::CallIdStyle)
//! scheme (`toolu_01`, `toolu_02`, ...).
//!
//! ## Example
//!
//! ```rust
//! use ai_lib_fncall::translate::MessageTranslator;
//! use ai_lib_fncall::types::{Arguments, Message, ToolCall, ToolDefinition};
//!
//! let tools = vec![ToolDefinition::function("finish", "Finish the task.", None)];
//! let conversation = vec![
//!     Message::system("You are a helpful assistant."),
//!     Message::user("We're done."),
//!     Message::assistant("Wrapping up.")
//!         .with_tool_calls(vec![ToolCall::new("toolu_01", "finish", Arguments::new())]),
//! ];
//!
//! let translator = MessageTranslator::default();
//! let textual = translator.to_textual(&conversation, &tools)?;
//! assert_eq!(
//!     textual[2].content.last_text(),
//!     Some("Wrapping up.\n\n<function=finish>\n</function>")
//! );
//!
//! let native = translator.to_native(&textual, &tools)?;
//! assert_eq!(native, conversation);
//! # Ok::<(), ai_lib_fncall::Error>(())
//! ```

mod ledger;
mod native;
mod textual;

use tracing::debug;

use crate::catalog::ToolCatalog;
use crate::config::TranslatorConfig;
use crate::error::CallError;
use crate::types::message::Message;
use crate::types::tool::ToolDefinition;
use crate::Result;

/// Fixed opening of a demoted tool result.
pub const RESULT_MARKER_PREFIX: &str = "EXECUTION RESULT of [";

/// `EXECUTION RESULT of [NAME]:` plus the newline that starts the result.
pub fn result_marker(tool_name: &str) -> String {
    format!("{RESULT_MARKER_PREFIX}{tool_name}]:\n")
}

/// Output of [`MessageTranslator::to_native_with_diagnostics`].
#[derive(Debug, Clone, PartialEq)]
pub struct NativeConversion {
    pub messages: Vec<Message>,
    /// Every fault recovered from while reading assistant turns, in order.
    pub diagnostics: Vec<CallError>,
}

/// Converts conversations in both directions under one configuration.
#[derive(Debug, Clone, Default)]
pub struct MessageTranslator {
    config: TranslatorConfig,
}

impl MessageTranslator {
    pub fn new(config: TranslatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Native → textual.
    ///
    /// Fails with [`Error::MissingSystemMessage`](crate::Error::MissingSystemMessage)
    /// when there is no system message and with
    /// [`Error::OrphanToolResult`](crate::Error::OrphanToolResult) when a tool
    /// result's call id matches no earlier invocation. Nothing is returned on
    /// failure.
    pub fn to_textual(&self, messages: &[Message], tools: &[ToolDefinition]) -> Result<Vec<Message>> {
        let catalog = ToolCatalog::new(tools)?;
        let out = textual::to_textual(messages, catalog)?;
        debug!(input = messages.len(), output = out.len(), tools = tools.len(), "converted conversation to textual form");
        Ok(out)
    }

    /// Textual → native.
    pub fn to_native(&self, messages: &[Message], tools: &[ToolDefinition]) -> Result<Vec<Message>> {
        Ok(self.to_native_with_diagnostics(messages, tools)?.messages)
    }

    /// Textual → native, also returning the faults recovered from.
    ///
    /// In strict mode any unrecoverable fault in an assistant turn fails the
    /// whole conversion; in permissive mode the turn is kept as plain text (or
    /// the call is kept with its best-effort arguments) and the fault is
    /// reported here.
    pub fn to_native_with_diagnostics(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<NativeConversion> {
        let catalog = ToolCatalog::new(tools)?;
        let conversion = native::to_native(messages, catalog, &self.config)?;
        debug!(
            input = messages.len(),
            output = conversion.messages.len(),
            diagnostics = conversion.diagnostics.len(),
            "converted conversation to native form"
        );
        Ok(conversion)
    }
}

/// [`MessageTranslator::to_textual`] with the default configuration.
pub fn to_textual(messages: &[Message], tools: &[ToolDefinition]) -> Result<Vec<Message>> {
    MessageTranslator::default().to_textual(messages, tools)
}

/// [`MessageTranslator::to_native`] with the default configuration.
pub fn to_native(messages: &[Message], tools: &[ToolDefinition]) -> Result<Vec<Message>> {
    MessageTranslator::default().to_native(messages, tools)
}
