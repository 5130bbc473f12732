//! # Tag Block Codec
//!
//! Converts a single [`ToolCall`](crate::types::ToolCall) to and from the
//! inline tag block used by the textual protocol:
//!
//! ```text
//! <function=NAME>
//! <parameter=NAME>VALUE</parameter>
//! </function>
//! ```
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`serializer`] | Structured invocation → tag block |
//! | [`parser`] | Tag block → structured invocation, with schema-driven coercion |
//! | [`json`] | JSON text for non-string argument values |
//!
//! A value may span lines but may not contain the literal `</parameter>`.

pub mod json;
pub mod parser;
pub mod serializer;

pub use parser::{CallParser, ParseMode, ParsedCall};
pub use serializer::serialize;

pub const FUNCTION_OPEN: &str = "<function=";
pub const FUNCTION_CLOSE: &str = "</function>";
pub const PARAMETER_OPEN: &str = "<parameter=";
pub const PARAMETER_CLOSE: &str = "</parameter>";
