//! Read-only traversal of tool parameter schemas.
//!
//! Classifies JSON-Schema property definitions into the primitive kinds the
//! textual protocol distinguishes. Nothing here fails: missing or unknown type
//! information is treated as an opaque string.

use serde_json::Value;
use std::fmt;

/// Primitive kind of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

impl ParamKind {
    /// Map a JSON-Schema `type` name; unknown names (and `"null"`) yield `None`.
    pub fn from_type_name(type_name: &str) -> Option<Self> {
        match type_name {
            "string" => Some(ParamKind::String),
            "integer" => Some(ParamKind::Integer),
            "number" => Some(ParamKind::Number),
            "boolean" => Some(ParamKind::Boolean),
            "array" => Some(ParamKind::Array),
            "object" => Some(ParamKind::Object),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Integer => "integer",
            ParamKind::Number => "number",
            ParamKind::Boolean => "boolean",
            ParamKind::Array => "array",
            ParamKind::Object => "object",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One property definition inside a parameter schema.
#[derive(Debug, Clone, Copy)]
pub struct ParamSchema<'a> {
    schema: &'a Value,
}

impl<'a> ParamSchema<'a> {
    pub fn new(schema: &'a Value) -> Self {
        Self { schema }
    }

    /// Declared kind. A `type` array such as `["integer", "null"]` resolves to
    /// its first recognised entry.
    pub fn kind(&self) -> ParamKind {
        match self.schema.get("type") {
            Some(Value::String(name)) => ParamKind::from_type_name(name),
            Some(Value::Array(names)) => names
                .iter()
                .filter_map(Value::as_str)
                .find_map(ParamKind::from_type_name),
            _ => None,
        }
        .unwrap_or(ParamKind::String)
    }

    /// `enum` values rendered as the text a model would write for them.
    pub fn enum_values(&self) -> Option<Vec<String>> {
        let values = self.schema.get("enum")?.as_array()?;
        Some(
            values
                .iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
        )
    }

    /// Kind of the `items` schema, for arrays that declare one.
    pub fn item_kind(&self) -> Option<ParamKind> {
        if self.kind() != ParamKind::Array {
            return None;
        }
        self.schema.get("items").map(|items| ParamSchema::new(items).kind())
    }

    pub fn description(&self) -> Option<&'a str> {
        self.schema.get("description").and_then(Value::as_str)
    }
}

/// Walker over a tool's parameter object schema.
#[derive(Debug, Clone, Copy)]
pub struct SchemaWalker<'a> {
    schema: Option<&'a Value>,
}

impl<'a> SchemaWalker<'a> {
    pub fn new(schema: Option<&'a Value>) -> Self {
        Self { schema }
    }

    /// Properties in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = (&'a str, ParamSchema<'a>)> {
        self.schema
            .and_then(|s| s.get("properties"))
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(|props| props.iter().map(|(k, v)| (k.as_str(), ParamSchema::new(v))))
    }

    pub fn property(&self, name: &str) -> Option<ParamSchema<'a>> {
        self.schema?
            .get("properties")?
            .get(name)
            .map(ParamSchema::new)
    }

    /// Required parameter names, in the order the schema lists them.
    pub fn required(&self) -> Vec<&'a str> {
        self.schema
            .and_then(|s| s.get("required"))
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}
