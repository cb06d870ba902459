//! `{HOST:ITEM.FUNCTION(PARAMS)}` references

use super::params::{scan_function_params, scan_key_params};
use crate::trigger::ast::FunctionReference;
use crate::trigger::lexing::{is_function_char, is_host_char, is_key_char, Scanner};

/// Parse a function macro whose `{` is under the cursor.
///
/// Returns the offset just past the closing `}` and the extracted reference.
pub fn parse_function_macro(scanner: &Scanner<'_>) -> Option<(usize, FunctionReference)> {
    let start = scanner.pos();
    if scanner.peek() != Some(b'{') {
        return None;
    }

    let host_start = start + 1;
    let host_end = scanner.skip_while(host_start, is_host_char);
    if host_end == host_start || scanner.byte_at(host_end) != Some(b':') {
        return None;
    }

    let item_start = host_end + 1;
    let key_end = scanner.skip_while(item_start, is_key_char);
    let (item_end, function_start) = match scanner.byte_at(key_end) {
        // `agent.ping.last(` : the function is whatever follows the last dot
        Some(b'(') => {
            let dot = scanner.slice(item_start, key_end).rfind('.')?;
            (item_start + dot, item_start + dot + 1)
        }
        Some(b'[') if key_end > item_start => {
            let params_end = scan_key_params(&Scanner::at(scanner.source(), key_end))?;
            if scanner.byte_at(params_end) != Some(b'.') {
                return None;
            }
            (params_end, params_end + 1)
        }
        _ => return None,
    };
    if item_end == item_start {
        return None;
    }

    let name_end = scanner.skip_while(function_start, is_function_char);
    if name_end == function_start || scanner.byte_at(name_end) != Some(b'(') {
        return None;
    }

    let (params_end, function_param_list) =
        scan_function_params(&Scanner::at(scanner.source(), name_end))?;
    if scanner.byte_at(params_end) != Some(b'}') {
        return None;
    }
    let end = params_end + 1;

    let reference = FunctionReference {
        expression: scanner.slice(start, end).to_string(),
        position: start,
        host: scanner.slice(host_start, host_end).to_string(),
        item: scanner.slice(item_start, item_end).to_string(),
        function: scanner.slice(function_start, params_end).to_string(),
        function_name: scanner.slice(function_start, name_end).to_string(),
        function_param: scanner.slice(name_end + 1, params_end - 1).to_string(),
        function_param_list,
    };
    Some((end, reference))
}
