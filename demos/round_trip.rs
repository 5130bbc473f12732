//! Round Trip Example
//!
//! Shows how an agent that keeps its history in native form can talk to a
//! text-only model:
//! 1. Convert the history to textual form and inspect the prompt
//! 2. Append a text reply, as the model would produce it
//! 3. Convert everything back and read the structured call
//!
//! Run with `RUST_LOG=ai_lib_fncall=debug` to see conversion events.

use ai_lib_fncall::types::{Arguments, ToolCall, ToolDefinition};
use ai_lib_fncall::{Message, MessageTranslator, TranslatorConfig};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[allow(dead_code)]
struct ViewFile {
    /// Absolute path of the file to show.
    path: String,
    /// First and last line to show.
    view_range: Option<Vec<i64>>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ai_lib_fncall=info")),
        )
        .init();

    let tools = vec![
        ToolDefinition::from_schema_type::<ViewFile>("view_file", "Show the contents of a file."),
        ToolDefinition::function(
            "finish",
            "Finish the interaction when the task is complete.",
            None,
        ),
    ];

    let history = vec![
        Message::system("You are a careful code reviewer."),
        Message::user("What does src/lib.rs export?"),
        Message::assistant("Let me read it first.").with_tool_calls(vec![ToolCall::new(
            "toolu_01",
            "view_file",
            Arguments::new().with("path", "/repo/src/lib.rs"),
        )]),
        Message::tool_result("toolu_01", "pub mod catalog;\npub mod codec;").with_name("view_file"),
    ];

    let translator = MessageTranslator::new(TranslatorConfig::default().with_env_overrides()?);

    let mut prompt = translator.to_textual(&history, &tools)?;
    println!("=== system prompt sent to the model ===");
    println!("{}", prompt[0].content.last_text().unwrap_or_default());
    println!("=== last turn ===");
    println!("{}", prompt[3].content.last_text().unwrap_or_default());

    // What a text-only model might answer
    prompt.push(Message::assistant(
        "Two modules. Let me double check the range.\n\n<function=view_file>\n<parameter=path>/repo/src/lib.rs</parameter>\n<parameter=view_range>[1, 2]</parameter>\n</function>",
    ));

    let conversion = translator.to_native_with_diagnostics(&prompt, &tools)?;
    let reply = conversion
        .messages
        .last()
        .ok_or_else(|| anyhow::anyhow!("empty conversation"))?;
    for call in &reply.tool_calls {
        println!(
            "\n=== parsed call {} ===\n{}",
            call.id,
            serde_json::to_string_pretty(call)?
        );
    }
    for fault in &conversion.diagnostics {
        println!("diagnostic: {fault}");
    }
    Ok(())
}
