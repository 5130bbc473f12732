//! 工具目录模块：将工具定义渲染为注入系统提示词的文本。
//!
//! # Tool Catalog
//!
//! Renders tool definitions into the deterministic prose block that is
//! appended to the system message for models without native tool calling.
//!
//! Each tool becomes one block:
//!
//! ```text
//! ---- BEGIN FUNCTION #1: execute_bash ----
//! Description: Execute a bash command in the terminal.
//! Parameters: {
//!   "type": "object",
//!   ...
//! }
//! ---- END FUNCTION #1 ----
//! ```
//!
//! Tools without a parameter schema get the line
//! `No parameters are required for this function.` instead. Blocks are
//! separated by one blank line, and the parameter schema keeps its declared
//! property order with a 2-space indent.

pub mod prompt;

use std::collections::HashSet;

use crate::schema::SchemaWalker;
use crate::types::tool::ToolDefinition;
use crate::{Error, Result};

pub use prompt::{strip_system_suffix, system_suffix};

/// Render the catalog text for `tools`, in input order.
pub fn render(tools: &[ToolDefinition]) -> String {
    let mut out = String::new();
    for (i, tool) in tools.iter().enumerate() {
        let index = i + 1;
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("---- BEGIN FUNCTION #{index}: {} ----\n", tool.name()));
        out.push_str(&format!("Description: {}\n", tool.description()));
        match tool.parameters() {
            Some(params) => {
                let pretty =
                    serde_json::to_string_pretty(params).unwrap_or_else(|_| params.to_string());
                out.push_str(&format!("Parameters: {pretty}\n"));
            }
            None => out.push_str("No parameters are required for this function.\n"),
        }
        out.push_str(&format!("---- END FUNCTION #{index} ----\n"));
    }
    out
}

/// Tools offered for one conversation, indexed by name.
#[derive(Debug, Clone, Copy)]
pub struct ToolCatalog<'a> {
    tools: &'a [ToolDefinition],
}

impl<'a> ToolCatalog<'a> {
    /// Fails with [`Error::DuplicateTool`] if two tools share a name.
    pub fn new(tools: &'a [ToolDefinition]) -> Result<Self> {
        let mut seen = HashSet::new();
        for tool in tools {
            if !seen.insert(tool.name()) {
                return Err(Error::DuplicateTool {
                    name: tool.name().to_string(),
                });
            }
        }
        Ok(Self { tools })
    }

    pub fn tools(&self) -> &'a [ToolDefinition] {
        self.tools
    }

    pub fn get(&self, name: &str) -> Option<&'a ToolDefinition> {
        self.tools.iter().find(|t| t.name() == name)
    }

    pub fn walker(&self, name: &str) -> Option<SchemaWalker<'a>> {
        self.get(name).map(|t| SchemaWalker::new(t.parameters()))
    }

    pub fn render(&self) -> String {
        render(self.tools)
    }

    /// Preamble plus rendered catalog, as appended to the system message.
    pub fn system_suffix(&self) -> String {
        system_suffix(&self.render())
    }
}
