//! Structured invocation → tag block.

use tracing::warn;

use super::json::to_spaced_string;
use super::{FUNCTION_CLOSE, FUNCTION_OPEN, PARAMETER_CLOSE, PARAMETER_OPEN};
use crate::types::tool::{ArgValue, ToolCall};

/// Serialize one invocation into its tag block:
///
/// ```text
/// <function=NAME>
/// <parameter=P1>V1</parameter>
/// </function>
/// ```
///
/// Parameters are written in the invocation's argument order. A string value
/// that spans lines is placed on its own lines between the tags. Values must
/// not contain the literal `</parameter>`: there is no escaping in this
/// protocol, so such a value cannot be read back intact.
pub fn serialize(call: &ToolCall) -> String {
    let mut out = format!("{FUNCTION_OPEN}{}>\n", call.name);
    for (name, value) in call.arguments.iter() {
        let rendered = render_value(value);
        if rendered.contains(PARAMETER_CLOSE) {
            warn!(
                tool = %call.name,
                parameter = name,
                "argument contains a literal closing parameter tag and will not parse back intact"
            );
        }
        let multiline = value.is_string() && rendered.contains('\n');
        out.push_str(PARAMETER_OPEN);
        out.push_str(name);
        out.push('>');
        if multiline {
            out.push('\n');
        }
        out.push_str(&rendered);
        if multiline {
            out.push('\n');
        }
        out.push_str(PARAMETER_CLOSE);
        out.push('\n');
    }
    out.push_str(FUNCTION_CLOSE);
    out
}

/// Strings verbatim; everything else as a JSON literal.
pub fn render_value(value: &ArgValue) -> String {
    match value {
        ArgValue::String(s) => s.clone(),
        ArgValue::Null => "null".to_string(),
        ArgValue::Boolean(b) => b.to_string(),
        ArgValue::Integer(i) => i.to_string(),
        ArgValue::Float(_) | ArgValue::Array(_) | ArgValue::Object(_) => {
            let json = serde_json::Value::from(value.clone());
            to_spaced_string(&json).unwrap_or_else(|_| json.to_string())
        }
    }
}
