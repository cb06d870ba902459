//! Plain text output
//!
//! ```text
//! valid
//! function pos=0 host="Zabbix server" item="agent.ping" function="last(0)"
//! macro {TRIGGER.VALUE}
//! ```

use super::registry::{FormatError, Formatter};
use crate::trigger::ast::ParseResult;

pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn serialize(&self, result: &ParseResult) -> Result<String, FormatError> {
        Ok(to_text(result))
    }

    fn description(&self) -> &str {
        "Validity line followed by one line per reference"
    }
}

/// Render a result as text, one line per extracted reference.
pub fn to_text(result: &ParseResult) -> String {
    let mut out = String::new();
    if !result.is_valid {
        out.push_str("invalid: ");
        out.push_str(&result.error);
        out.push('\n');
        return out;
    }

    out.push_str("valid\n");
    for reference in &result.expressions {
        out.push_str(&format!(
            "function pos={} host={:?} item={:?} function={:?}\n",
            reference.position, reference.host, reference.item, reference.function
        ));
    }
    let groups = [
        ("macro", &result.macros),
        ("usermacro", &result.user_macros),
        ("lldmacro", &result.lld_macros),
    ];
    for (label, macros) in groups {
        for reference in macros {
            out.push_str(&format!("{label} {}\n", reference.expression));
        }
    }
    out
}
