//! YAML output

use super::registry::{FormatError, Formatter};
use crate::trigger::ast::ParseResult;

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, result: &ParseResult) -> Result<String, FormatError> {
        serde_yaml::to_string(result).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Parse result as YAML"
    }
}
