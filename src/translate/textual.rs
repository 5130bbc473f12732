use std::collections::HashMap;

use tracing::{debug, warn};

use super::result_marker;
use crate::catalog::ToolCatalog;
use crate::codec::serializer;
use crate::error::CallError;
use crate::types::message::{Message, MessageContent, MessageRole};
use crate::{Error, Result};

pub(super) fn to_textual(messages: &[Message], catalog: ToolCatalog<'_>) -> Result<Vec<Message>> {
    let system_index = messages
        .iter()
        .position(|m| m.role == MessageRole::System)
        .ok_or(Error::MissingSystemMessage)?;
    let suffix = catalog.system_suffix();

    // call id -> tool name, latest invocation wins
    let mut invoked: HashMap<&str, &str> = HashMap::new();
    let mut out = Vec::with_capacity(messages.len());

    for (index, message) in messages.iter().enumerate() {
        match message.role {
            MessageRole::System if index == system_index => {
                let mut system = message.clone();
                system.content.append_text(&suffix);
                out.push(system);
            }
            MessageRole::Assistant if message.has_tool_calls() => {
                if message.tool_calls.len() > 1 {
                    debug!(calls = message.tool_calls.len(), "splitting assistant turn, one call per turn");
                }
                for (i, call) in message.tool_calls.iter().enumerate() {
                    if catalog.get(&call.name).is_none() {
                        return Err(CallError::UnknownTool {
                            name: call.name.clone(),
                        }
                        .into());
                    }
                    invoked.insert(&call.id, &call.name);
                    let block = serializer::serialize(call);
                    if i == 0 {
                        let mut content = message.content.clone();
                        attach_block(&mut content, &block);
                        out.push(Message::with_content(MessageRole::Assistant, content));
                    } else {
                        out.push(Message::assistant(block));
                    }
                }
            }
            MessageRole::Tool => {
                let call_id = message.tool_call_id.as_deref().unwrap_or_default();
                let invoked_name = invoked
                    .get(call_id)
                    .ok_or_else(|| Error::OrphanToolResult {
                        call_id: call_id.to_string(),
                    })?;
                let tool_name = match message.name.as_deref() {
                    Some(name) if name != *invoked_name => {
                        warn!(call_id, name, invoked = *invoked_name, "tool result names a different tool than its call");
                        name
                    }
                    Some(name) => name,
                    None => *invoked_name,
                };
                let mut content = message.content.clone();
                content.prepend_text(&result_marker(tool_name));
                out.push(Message::with_content(MessageRole::User, content));
            }
            MessageRole::System => {
                warn!(index, "additional system message left without tool catalog");
                out.push(message.clone());
            }
            _ => out.push(message.clone()),
        }
    }
    Ok(out)
}

/// Place the block after the trailing prose, separated by a blank line.
fn attach_block(content: &mut MessageContent, block: &str) {
    match content.last_text_mut() {
        Some(text) if !text.is_empty() => {
            text.push_str("\n\n");
            text.push_str(block);
        }
        Some(text) => text.push_str(block),
        None => content.append_text(block),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::message::ContentBlock;
    use crate::types::tool::{Arguments, ToolCall, ToolDefinition};

    fn tools() -> Vec<ToolDefinition> {
        vec![
            ToolDefinition::function("finish", "Finish.", None),
            ToolDefinition::function("think", "Think.", None),
        ]
    }

    #[test]
    fn test_missing_system_message() {
        let tools = tools();
        let catalog = ToolCatalog::new(&tools).unwrap();
        let err = to_textual(&[Message::user("hi")], catalog).unwrap_err();
        assert!(matches!(err, Error::MissingSystemMessage));
    }

    #[test]
    fn test_split_keeps_order() {
        let tools = tools();
        let catalog = ToolCatalog::new(&tools).unwrap();
        let messages = vec![
            Message::system("sys"),
            Message::assistant("Two steps.").with_tool_calls(vec![
                ToolCall::new("toolu_01", "think", Arguments::new()),
                ToolCall::new("toolu_02", "finish", Arguments::new()),
            ]),
            Message::tool_result("toolu_02", "ok"),
        ];
        let out = to_textual(&messages, catalog).unwrap();
        assert_eq!(out.len(), 4);
        assert_eq!(
            out[1].content,
            MessageContent::text("Two steps.\n\n<function=think>\n</function>")
        );
        assert_eq!(out[2].content, MessageContent::text("<function=finish>\n</function>"));
        assert!(out[1].tool_calls.is_empty() && out[2].tool_calls.is_empty());
        assert_eq!(out[3].role, MessageRole::User);
        assert_eq!(
            out[3].content,
            MessageContent::text("EXECUTION RESULT of [finish]:\nok")
        );
        assert_eq!(out[3].tool_call_id, None);
    }

    #[test]
    fn test_block_after_image_gets_own_text_block() {
        let mut content = MessageContent::blocks(vec![ContentBlock::image_url("u")]);
        attach_block(&mut content, "<function=finish>\n</function>");
        assert_eq!(
            content,
            MessageContent::blocks(vec![
                ContentBlock::image_url("u"),
                ContentBlock::text("<function=finish>\n</function>"),
            ])
        );
    }

    #[test]
    fn test_orphan_tool_result() {
        let tools = tools();
        let catalog = ToolCatalog::new(&tools).unwrap();
        let messages = vec![Message::system("sys"), Message::tool_result("toolu_09", "??")];
        let err = to_textual(&messages, catalog).unwrap_err();
        assert!(matches!(err, Error::OrphanToolResult { ref call_id } if call_id == "toolu_09"));
    }

    #[test]
    fn test_result_marker_uses_message_name() {
        let tools = tools();
        let catalog = ToolCatalog::new(&tools).unwrap();
        let messages = vec![
            Message::system("sys"),
            Message::assistant("")
                .with_tool_calls(vec![ToolCall::new("toolu_01", "think", Arguments::new())]),
            Message::tool_result("toolu_01", "ok").with_name("finish"),
        ];
        let out = to_textual(&messages, catalog).unwrap();
        assert_eq!(
            out[2].content,
            MessageContent::text("EXECUTION RESULT of [finish]:\nok")
        );
        assert_eq!(out[2].name, None);
    }

    #[test]
    fn test_only_first_system_message_is_augmented() {
        let tools = tools();
        let catalog = ToolCatalog::new(&tools).unwrap();
        let messages = vec![
            Message::system("sys"),
            Message::user("hi"),
            Message::system("Be brief."),
        ];
        let out = to_textual(&messages, catalog).unwrap();
        assert_eq!(out.len(), 3);
        let first = out[0].content.last_text().unwrap();
        assert!(first.starts_with("sys") && first.len() > "sys".len());
        assert_eq!(out[2], messages[2]);
    }

    #[test]
    fn test_call_to_tool_outside_catalog() {
        let tools = tools();
        let catalog = ToolCatalog::new(&tools).unwrap();
        let messages = vec![
            Message::system("sys"),
            Message::assistant("")
                .with_tool_calls(vec![ToolCall::new("toolu_01", "browse", Arguments::new())]),
        ];
        let err = to_textual(&messages, catalog).unwrap_err();
        assert!(matches!(err, Error::Call(CallError::UnknownTool { .. })));
    }
}
