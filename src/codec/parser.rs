//! Tag block → structured invocation.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::FUNCTION_OPEN;
use crate::catalog::ToolCatalog;
use crate::error::CallError;
use crate::schema::{ParamKind, ParamSchema};
use crate::types::tool::{ArgValue, Arguments, ToolCall};

static FUNCTION_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<function=([^>]+)>(.*?)</function>").expect("valid regex"));

static PARAMETER_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<parameter=([^>]+)>(.*?)</parameter>").expect("valid regex"));

/// How parameter-level faults in model output are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Missing required parameters and enum violations fail the parse.
    Strict,
    /// Such faults are kept as diagnostics beside a best-effort call.
    #[default]
    Permissive,
}

/// A call read from assistant text, not yet assigned a call id.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCall {
    pub name: String,
    pub arguments: Arguments,
    /// Text preceding the tag block, untouched.
    pub prose_before: String,
    /// Text following the tag block, untouched.
    pub prose_after: String,
    /// Faults recovered from while reading the block.
    pub diagnostics: Vec<CallError>,
}

impl ParsedCall {
    /// Plain-text portion of the message once the block is removed.
    ///
    /// The blank line that separates prose from the block is dropped (or,
    /// when absent, trailing whitespace). Text after the block is trimmed and
    /// kept after a blank line.
    pub fn prose(&self) -> String {
        let before = self
            .prose_before
            .strip_suffix("\n\n")
            .unwrap_or_else(|| self.prose_before.trim_end());
        let after = self.prose_after.trim();
        match (before.is_empty(), after.is_empty()) {
            (_, true) => before.to_string(),
            (true, false) => after.to_string(),
            (false, false) => format!("{before}\n\n{after}"),
        }
    }

    pub fn into_tool_call(self, id: impl Into<String>) -> ToolCall {
        ToolCall::new(id, self.name, self.arguments)
    }
}

/// Reads tag blocks against one catalog.
#[derive(Debug, Clone, Copy)]
pub struct CallParser<'a> {
    catalog: ToolCatalog<'a>,
    mode: ParseMode,
}

impl<'a> CallParser<'a> {
    pub fn new(catalog: ToolCatalog<'a>, mode: ParseMode) -> Self {
        Self { catalog, mode }
    }

    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Parse the first tag block in `text`.
    ///
    /// Returns `Ok(None)` when the text holds no `<function=` opener at all.
    /// An opener without a closer is [`CallError::MalformedCallSyntax`]; a
    /// name missing from the catalog is [`CallError::UnknownTool`]. Both are
    /// returned as errors in either mode, since no call can be produced.
    pub fn parse(&self, text: &str) -> Result<Option<ParsedCall>, CallError> {
        let Some(caps) = FUNCTION_BLOCK.captures(text) else {
            if text.contains(FUNCTION_OPEN) {
                return Err(CallError::MalformedCallSyntax {
                    detail: "<function=...> opener has no matching </function>".to_string(),
                });
            }
            return Ok(None);
        };
        let (Some(block), Some(name), Some(body)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            return Ok(None);
        };
        let name = name.as_str();
        let walker = self
            .catalog
            .walker(name)
            .ok_or_else(|| CallError::UnknownTool {
                name: name.to_string(),
            })?;

        let mut arguments = Arguments::new();
        let mut diagnostics = Vec::new();
        for param in PARAMETER_BLOCK.captures_iter(body.as_str()) {
            let (Some(param_name), Some(raw)) = (param.get(1), param.get(2)) else {
                continue;
            };
            let param_name = param_name.as_str();
            let raw = strip_adjacent_newlines(raw.as_str());
            let value = match walker.property(param_name) {
                Some(schema) => {
                    let (value, fault) = coerce(param_name, raw, schema);
                    if let Some(fault) = fault {
                        self.record(fault, &mut diagnostics)?;
                    }
                    value
                }
                None => {
                    debug!(tool = name, parameter = param_name, "keeping undeclared parameter as string");
                    ArgValue::String(raw.to_string())
                }
            };
            arguments.insert(param_name, value);
        }

        for required in walker.required() {
            if !arguments.contains_key(required) {
                self.record(
                    CallError::MissingRequiredParameter {
                        tool: name.to_string(),
                        parameter: required.to_string(),
                    },
                    &mut diagnostics,
                )?;
            }
        }

        Ok(Some(ParsedCall {
            name: name.to_string(),
            arguments,
            prose_before: text[..block.start()].to_string(),
            prose_after: text[block.end()..].to_string(),
            diagnostics,
        }))
    }

    fn record(&self, fault: CallError, diagnostics: &mut Vec<CallError>) -> Result<(), CallError> {
        if self.mode == ParseMode::Strict && !fault.is_recoverable() {
            return Err(fault);
        }
        warn!(error = %fault, "recovered from function call fault");
        diagnostics.push(fault);
        Ok(())
    }
}

/// Drop one newline directly after the opening tag and one directly before
/// the closing tag; interior whitespace is preserved.
fn strip_adjacent_newlines(raw: &str) -> &str {
    let raw = raw.strip_prefix('\n').unwrap_or(raw);
    raw.strip_suffix('\n').unwrap_or(raw)
}

/// Coerce raw text to the declared kind. On failure the raw text is kept as
/// a string and the fault is returned beside it.
fn coerce(name: &str, raw: &str, schema: ParamSchema<'_>) -> (ArgValue, Option<CallError>) {
    let kind = schema.kind();
    let fallback = |expected: ParamKind| {
        (
            ArgValue::String(raw.to_string()),
            Some(CallError::TypeCoercion {
                parameter: name.to_string(),
                expected: expected.to_string(),
                raw: raw.to_string(),
            }),
        )
    };
    match kind {
        ParamKind::String => {
            let fault = schema.enum_values().and_then(|allowed| {
                (!allowed.iter().any(|v| v == raw)).then(|| CallError::InvalidEnumValue {
                    parameter: name.to_string(),
                    value: raw.to_string(),
                    allowed,
                })
            });
            (ArgValue::String(raw.to_string()), fault)
        }
        ParamKind::Integer | ParamKind::Number | ParamKind::Boolean => {
            match coerce_scalar(kind, raw) {
                Some(value) => (value, None),
                None => fallback(kind),
            }
        }
        ParamKind::Array | ParamKind::Object => {
            let parsed = serde_json::from_str::<serde_json::Value>(raw.trim());
            match (kind, parsed) {
                (ParamKind::Array, Ok(serde_json::Value::Array(items))) => {
                    let item_kind = schema.item_kind();
                    let items = items
                        .into_iter()
                        .map(|item| coerce_item(ArgValue::from(item), item_kind))
                        .collect();
                    (ArgValue::Array(items), None)
                }
                (ParamKind::Object, Ok(value @ serde_json::Value::Object(_))) => {
                    (ArgValue::from(value), None)
                }
                _ => fallback(kind),
            }
        }
    }
}

fn coerce_scalar(kind: ParamKind, raw: &str) -> Option<ArgValue> {
    let text = raw.trim();
    match kind {
        ParamKind::Integer => text.parse::<i64>().ok().map(ArgValue::Integer),
        ParamKind::Number => match text.parse::<i64>() {
            Ok(i) => Some(ArgValue::Integer(i)),
            Err(_) => text
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(ArgValue::Float),
        },
        ParamKind::Boolean => {
            if text.eq_ignore_ascii_case("true") {
                Some(ArgValue::Boolean(true))
            } else if text.eq_ignore_ascii_case("false") {
                Some(ArgValue::Boolean(false))
            } else {
                None
            }
        }
        ParamKind::String | ParamKind::Array | ParamKind::Object => None,
    }
}

/// Array items written as strings (`["1", "2"]`) take the declared item kind
/// when they can; anything else is left as parsed.
fn coerce_item(item: ArgValue, item_kind: Option<ParamKind>) -> ArgValue {
    match (item, item_kind) {
        (ArgValue::String(s), Some(kind)) => coerce_scalar(kind, &s).unwrap_or(ArgValue::String(s)),
        (item, _) => item,
    }
}
