//! Fixed prompt text wrapped around the rendered catalog.
//!
//! This text is consumed by the target model verbatim; spacing and spelling
//! are part of the protocol.

/// Opens the suffix appended to the system message.
pub const CATALOG_HEADER: &str = "\nYou have access to the following functions:\n\n";

/// Follows the rendered catalog and closes the suffix.
pub const CALL_FORMAT_INSTRUCTIONS: &str = concat!(
    "\n\nIf you choose to call a function ONLY reply in the following format with NO suffix:\n\n",
    "<function=example_function_name>\n",
    "<parameter=example_parameter_1>value_1</parameter>\n",
    "<parameter=example_parameter_2>\n",
    "This is the value for the second parameter\n",
    "that can span\n",
    "multiple lines\n",
    "</parameter>\n",
    "</function>\n",
    "\n",
    "<IMPORTANT>\n",
    "Reminder:\n",
    "- Function calls MUST follow the specified format, start with <function= and end with </function>\n",
    "- Required parameters MUST be specified\n",
    "- Only call one function at a time\n",
    "- You may provide optional reasoning for your function call in natural language BEFORE the function call, but NOT after.\n",
    "- If there is no function call available, answer the question like normal with your current knowledge and do not tell the user about function calls\n",
);

const FIRST_BLOCK_MARKER: &str = "---- BEGIN FUNCTION #1: ";

/// Build the full suffix for an already rendered catalog.
pub fn system_suffix(catalog_text: &str) -> String {
    format!("{CATALOG_HEADER}{catalog_text}{CALL_FORMAT_INSTRUCTIONS}")
}

/// Remove a catalog suffix from the end of `text`.
///
/// `expected` is the suffix for the active catalog. When the text carries a
/// suffix rendered from some other catalog, it is still located by its fixed
/// header and footer. Returns `None` if no suffix is present.
pub fn strip_system_suffix<'t>(text: &'t str, expected: &str) -> Option<&'t str> {
    if let Some(original) = text.strip_suffix(expected) {
        return Some(original);
    }
    let body = text.strip_suffix(CALL_FORMAT_INSTRUCTIONS)?;
    let anchor = format!("{CATALOG_HEADER}{FIRST_BLOCK_MARKER}");
    body.rfind(&anchor).map(|start| &text[..start])
}
