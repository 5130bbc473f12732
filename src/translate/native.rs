use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};
use uuid::Uuid;

use super::ledger::CallLedger;
use super::NativeConversion;
use crate::catalog::{strip_system_suffix, ToolCatalog};
use crate::codec::{CallParser, ParseMode};
use crate::config::{CallIdStyle, TranslatorConfig};
use crate::types::message::{Message, MessageContent, MessageRole};
use crate::{Error, Result};

static RESULT_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^EXECUTION RESULT of \[([^\]\n]*)\]:\n").expect("valid regex"));

/// Mints ids for calls parsed out of assistant text.
///
/// Sequential ids skip any id already carried by a native message in the
/// same conversation.
struct CallIds<'c> {
    config: &'c TranslatorConfig,
    next: usize,
    used: HashSet<&'c str>,
}

impl<'c> CallIds<'c> {
    fn new(config: &'c TranslatorConfig, messages: &'c [Message]) -> Self {
        let used = messages
            .iter()
            .flat_map(|m| {
                m.tool_calls
                    .iter()
                    .map(|c| c.id.as_str())
                    .chain(m.tool_call_id.as_deref())
            })
            .collect();
        Self {
            config,
            next: 1,
            used,
        }
    }

    fn mint(&mut self) -> String {
        let prefix = &self.config.call_id_prefix;
        match self.config.call_ids {
            CallIdStyle::Sequential => loop {
                let id = format!("{prefix}{:02}", self.next);
                self.next += 1;
                if !self.used.contains(id.as_str()) {
                    break id;
                }
                debug!(%id, "call id already taken by a native message");
            },
            CallIdStyle::Uuid => format!("{prefix}{}", Uuid::new_v4().simple()),
        }
    }
}

pub(super) fn to_native<'m>(
    messages: &'m [Message],
    catalog: ToolCatalog<'_>,
    config: &'m TranslatorConfig,
) -> Result<NativeConversion> {
    let suffix = catalog.system_suffix();
    let parser = CallParser::new(catalog, config.mode);
    let mut ids = CallIds::new(config, messages);
    let mut ledger = CallLedger::default();
    let mut out: Vec<Message> = Vec::with_capacity(messages.len());
    let mut diagnostics = Vec::new();

    for message in messages {
        match message.role {
            MessageRole::System => out.push(strip_catalog(message, &suffix)),
            MessageRole::Assistant if message.has_tool_calls() => {
                ledger.open_turn();
                for call in &message.tool_calls {
                    ledger.record(&call.id, &call.name);
                }
                out.push(message.clone());
            }
            MessageRole::Assistant => {
                let Some(text) = message.content.last_text() else {
                    out.push(message.clone());
                    continue;
                };
                let parsed = match parser.parse(text) {
                    Ok(Some(parsed)) => parsed,
                    Ok(None) => {
                        out.push(message.clone());
                        continue;
                    }
                    Err(fault) if config.mode == ParseMode::Strict => return Err(fault.into()),
                    Err(fault) => {
                        warn!(error = %fault, "keeping assistant turn as plain text");
                        diagnostics.push(fault);
                        out.push(message.clone());
                        continue;
                    }
                };
                if !parsed.prose_after.trim().is_empty() {
                    warn!(tool = %parsed.name, "text after the function call block kept as prose");
                }

                let mut content = message.content.clone();
                if let Some(text) = content.last_text_mut() {
                    *text = parsed.prose();
                }
                content.drop_empty_trailing_block();
                diagnostics.extend(parsed.diagnostics.iter().cloned());
                let call = parsed.into_tool_call(ids.mint());

                // continuation of a turn that was split one call per message
                let continues_turn = is_empty_content(&content)
                    && out
                        .last()
                        .is_some_and(|prev| prev.role == MessageRole::Assistant && prev.has_tool_calls());
                if !continues_turn {
                    ledger.open_turn();
                }
                ledger.record(&call.id, &call.name);
                if continues_turn {
                    debug!(tool = %call.name, "re-fusing split assistant turn");
                    if let Some(prev) = out.last_mut() {
                        prev.tool_calls.push(call);
                    }
                } else {
                    out.push(
                        Message::with_content(MessageRole::Assistant, content)
                            .with_tool_calls(vec![call]),
                    );
                }
            }
            MessageRole::User => match result_marker_of(&message.content) {
                Some((tool_name, marker_len)) => {
                    let call_id = ledger
                        .resolve(tool_name)
                        .ok_or_else(|| Error::UnresolvableToolResult {
                            tool_name: tool_name.to_string(),
                        })?;
                    let mut content = message.content.clone();
                    if let Some(text) = content.first_text_mut() {
                        text.drain(..marker_len);
                    }
                    content.drop_empty_leading_block();
                    out.push(Message {
                        role: MessageRole::Tool,
                        content,
                        tool_calls: Vec::new(),
                        tool_call_id: Some(call_id),
                        name: Some(tool_name.to_string()),
                    });
                }
                None => out.push(message.clone()),
            },
            MessageRole::Tool => {
                if let Some(id) = message.tool_call_id.as_deref() {
                    ledger.mark_answered(id);
                }
                out.push(message.clone());
            }
        }
    }

    Ok(NativeConversion {
        messages: out,
        diagnostics,
    })
}

/// Restore a system message to its text before the catalog was appended.
fn strip_catalog(message: &Message, suffix: &str) -> Message {
    let mut system = message.clone();
    let Some(text) = system.content.last_text_mut() else {
        return system;
    };
    match strip_system_suffix(text, suffix).map(str::len) {
        Some(len) => {
            text.truncate(len);
            system.content.drop_empty_trailing_block();
        }
        None => debug!("system message carries no tool catalog"),
    }
    system
}

/// Tool name and marker length when the content opens with a result marker.
fn result_marker_of(content: &MessageContent) -> Option<(&str, usize)> {
    let text = content.first_text()?;
    let caps = RESULT_MARKER.captures(text)?;
    Some((caps.get(1)?.as_str(), caps.get(0)?.end()))
}

fn is_empty_content(content: &MessageContent) -> bool {
    match content {
        MessageContent::Text(s) => s.is_empty(),
        MessageContent::Blocks(bs) => bs.is_empty(),
    }
}
