//! Parse results for trigger expressions
//!
//! A [`ParseResult`] is produced fresh by every parse and is never mutated
//! afterwards. Field names on the wire follow the names used by the monitoring
//! front end that consumes them (`pos`, `functionName`, `usermacros`, ...).

use serde::Serialize;

/// One `{host:item.function(params)}` occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionReference {
    /// Verbatim source text, braces included.
    pub expression: String,
    /// Byte offset of the opening `{`.
    #[serde(rename = "pos")]
    pub position: usize,
    pub host: String,
    pub item: String,
    /// Function call text, e.g. `last(0)`.
    pub function: String,
    pub function_name: String,
    /// Raw text between the parentheses.
    pub function_param: String,
    /// Parameters split on commas, quoted ones unquoted.
    pub function_param_list: Vec<String>,
}

/// One occurrence of a built-in, user or low-level discovery macro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MacroRef {
    pub expression: String,
}

impl MacroRef {
    pub fn new(expression: impl Into<String>) -> Self {
        MacroRef {
            expression: expression.into(),
        }
    }
}

/// Outcome of parsing one expression
///
/// `error` is empty exactly when `is_valid` is true. The extraction lists keep
/// source order and duplicates, and are only populated for valid expressions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub is_valid: bool,
    pub error: String,
    /// Byte offset where the quoted tail in `error` starts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_position: Option<usize>,
    pub expressions: Vec<FunctionReference>,
    pub macros: Vec<MacroRef>,
    #[serde(rename = "usermacros")]
    pub user_macros: Vec<MacroRef>,
    #[serde(rename = "lldmacros")]
    pub lld_macros: Vec<MacroRef>,
}

impl ParseResult {
    /// An invalid result carrying `error`.
    pub fn invalid(error: impl Into<String>, error_position: Option<usize>) -> Self {
        ParseResult {
            is_valid: false,
            error: error.into(),
            error_position,
            ..Default::default()
        }
    }

    /// Unique hosts referenced by the function macros, in first-occurrence order.
    ///
    /// Empty for invalid results.
    pub fn hosts(&self) -> Vec<&str> {
        let mut hosts: Vec<&str> = Vec::new();
        if !self.is_valid {
            return hosts;
        }
        for reference in &self.expressions {
            if !hosts.contains(&reference.host.as_str()) {
                hosts.push(&reference.host);
            }
        }
        hosts
    }

    /// Total number of extracted references of every kind.
    pub fn reference_count(&self) -> usize {
        self.expressions.len() + self.macros.len() + self.user_macros.len() + self.lld_macros.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(host: &str, position: usize) -> FunctionReference {
        FunctionReference {
            expression: format!("{{{host}:i.last(0)}}"),
            position,
            host: host.to_string(),
            item: "i".to_string(),
            function: "last(0)".to_string(),
            function_name: "last".to_string(),
            function_param: "0".to_string(),
            function_param_list: vec!["0".to_string()],
        }
    }

    #[test]
    fn test_hosts_are_deduplicated_in_order() {
        let result = ParseResult {
            is_valid: true,
            expressions: vec![reference("b", 0), reference("a", 20), reference("b", 40)],
            ..Default::default()
        };
        assert_eq!(result.hosts(), vec!["b", "a"]);
    }

    #[test]
    fn test_invalid_result_has_no_hosts() {
        let mut result = ParseResult::invalid("Incorrect trigger expression", None);
        result.expressions.push(reference("h", 0));
        assert!(result.hosts().is_empty());
        assert!(!result.is_valid);
    }

    #[test]
    fn test_wire_names() {
        let result = ParseResult {
            is_valid: true,
            expressions: vec![reference("h", 3)],
            user_macros: vec![MacroRef::new("{$M}")],
            ..Default::default()
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["isValid"], true);
        assert_eq!(value["expressions"][0]["pos"], 3);
        assert_eq!(value["expressions"][0]["functionName"], "last");
        assert_eq!(value["expressions"][0]["functionParamList"][0], "0");
        assert_eq!(value["usermacros"][0]["expression"], "{$M}");
        assert!(value["lldmacros"].as_array().unwrap().is_empty());
        assert!(value.get("errorPosition").is_none());
    }

    #[test]
    fn test_reference_count() {
        let result = ParseResult {
            is_valid: true,
            expressions: vec![reference("h", 0)],
            macros: vec![MacroRef::new("{TRIGGER.VALUE}")],
            lld_macros: vec![MacroRef::new("{#A}"), MacroRef::new("{#B}")],
            ..Default::default()
        };
        assert_eq!(result.reference_count(), 4);
    }
}
