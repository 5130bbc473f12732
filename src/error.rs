use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "messages[3].tool_call_id", "mode")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected value, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "config_loader", "to_textual")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Faults rooted in model output: a tag block that cannot be read, or read
/// only partially.
///
/// In permissive mode these are collected as diagnostics next to a best-effort
/// result; in strict mode `MalformedCallSyntax`, `UnknownTool`,
/// `MissingRequiredParameter` and `InvalidEnumValue` abort the parse.
/// `TypeCoercion` never aborts: the raw text is kept as a string argument.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    #[error("Malformed function call syntax: {detail}")]
    MalformedCallSyntax { detail: String },

    #[error("Unknown tool '{name}': not present in the active catalog")]
    UnknownTool { name: String },

    #[error("Parameter '{parameter}' expected {expected}, got {raw:?}; kept as raw string")]
    TypeCoercion {
        parameter: String,
        expected: String,
        raw: String,
    },

    #[error("Missing required parameter '{parameter}' for tool '{tool}'")]
    MissingRequiredParameter { tool: String, parameter: String },

    #[error("Parameter '{parameter}' has value {value:?}, allowed values: {}", .allowed.join(", "))]
    InvalidEnumValue {
        parameter: String,
        value: String,
        allowed: Vec<String>,
    },
}

impl CallError {
    /// Whether the parser recovers from this fault in every parse mode.
    pub fn is_recoverable(&self) -> bool {
        match self {
            CallError::TypeCoercion { .. } => true,
            CallError::MalformedCallSyntax { .. }
            | CallError::UnknownTool { .. }
            | CallError::MissingRequiredParameter { .. }
            | CallError::InvalidEnumValue { .. } => false,
        }
    }
}

/// Unified error type for the function-calling bridge.
///
/// Conversation-shape errors (`MissingSystemMessage`, `OrphanToolResult`,
/// `UnresolvableToolResult`) are caller contract violations and always fatal.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Function call error: {0}")]
    Call(#[from] CallError),

    #[error("Conversation has no system message to anchor the tool catalog")]
    MissingSystemMessage,

    #[error("Tool result references call id '{call_id}' with no preceding invocation")]
    OrphanToolResult { call_id: String },

    #[error("Execution result for tool '{tool_name}' has no preceding invocation to attach to")]
    UnresolvableToolResult { tool_name: String },

    #[error("Duplicate tool name '{name}' in catalog")]
    DuplicateTool { name: String },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }
}
