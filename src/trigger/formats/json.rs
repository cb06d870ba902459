//! JSON output

use super::registry::{FormatError, Formatter};
use crate::trigger::ast::ParseResult;

/// Pretty-printed JSON with the front end's field names
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, result: &ParseResult) -> Result<String, FormatError> {
        serde_json::to_string_pretty(result)
            .map(|mut out| {
                out.push('\n');
                out
            })
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Parse result as JSON"
    }
}
