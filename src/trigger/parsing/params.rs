//! Quote-aware parameter lists
//!
//! Two lists share one state machine: the bracketed item key parameters
//! `key[a,"b",[c,d]]` and the function parameters `count(1,"b",3)`. The
//! differences are kept inside each scanner: item keys nest on `[` and keep
//! their text verbatim, function parameters never nest and are unquoted.

use crate::trigger::lexing::Scanner;

/// Position inside a parameter list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamState {
    /// Before a parameter; leading spaces are skipped.
    New,
    /// After a quoted parameter or nested list; only spaces, `,` or a close may follow.
    End,
    /// Inside an unquoted parameter.
    Unquoted,
    /// Inside a quoted parameter; `\"` is an escaped quote.
    Quoted,
}

/// True when the bytes at `index` are an escaped quote `\"`.
fn is_escaped_quote(scanner: &Scanner<'_>, index: usize) -> bool {
    scanner.byte_at(index) == Some(b'\\') && scanner.byte_at(index + 1) == Some(b'"')
}

/// Scan an item key parameter list whose `[` is under the cursor.
///
/// Returns the offset just past the matching `]`, or `None` when the brackets
/// never balance or a quoted parameter is followed by anything but a separator.
pub fn scan_key_params(scanner: &Scanner<'_>) -> Option<usize> {
    if scanner.peek() != Some(b'[') {
        return None;
    }

    let mut level = 1usize;
    let mut state = ParamState::New;
    let mut i = scanner.pos() + 1;

    while let Some(c) = scanner.byte_at(i) {
        match state {
            ParamState::New => match c {
                b' ' | b',' => {}
                b'[' => level += 1,
                b']' => {
                    level -= 1;
                    if level == 0 {
                        return Some(i + 1);
                    }
                    state = ParamState::End;
                }
                b'"' => state = ParamState::Quoted,
                _ => state = ParamState::Unquoted,
            },
            ParamState::End => match c {
                b' ' => {}
                b',' => state = ParamState::New,
                b']' => {
                    level -= 1;
                    if level == 0 {
                        return Some(i + 1);
                    }
                }
                _ => return None,
            },
            ParamState::Unquoted => match c {
                b',' => state = ParamState::New,
                b']' => {
                    level -= 1;
                    if level == 0 {
                        return Some(i + 1);
                    }
                    state = ParamState::End;
                }
                _ => {}
            },
            ParamState::Quoted => {
                if is_escaped_quote(scanner, i) {
                    i += 1;
                } else if c == b'"' {
                    state = ParamState::End;
                }
            }
        }
        i += 1;
    }

    None
}

/// Scan a function parameter list whose `(` is under the cursor.
///
/// Returns the offset just past the closing `)` together with the split
/// parameters. An empty list yields one empty parameter, as does a trailing
/// comma.
pub fn scan_function_params(scanner: &Scanner<'_>) -> Option<(usize, Vec<String>)> {
    if scanner.peek() != Some(b'(') {
        return None;
    }

    let mut params = Vec::new();
    let mut state = ParamState::New;
    // Unquoted: start of the parameter. Quoted: start of the pending segment.
    let mut start = 0usize;
    let mut quoted = String::new();
    let mut i = scanner.pos() + 1;

    while let Some(c) = scanner.byte_at(i) {
        match state {
            ParamState::New => match c {
                b' ' => {}
                b',' => params.push(String::new()),
                b')' => {
                    params.push(String::new());
                    return Some((i + 1, params));
                }
                b'"' => {
                    state = ParamState::Quoted;
                    start = i + 1;
                    quoted.clear();
                }
                _ => {
                    state = ParamState::Unquoted;
                    start = i;
                }
            },
            ParamState::Unquoted => match c {
                b',' => {
                    params.push(scanner.slice(start, i).to_string());
                    state = ParamState::New;
                }
                b')' => {
                    params.push(scanner.slice(start, i).to_string());
                    return Some((i + 1, params));
                }
                _ => {}
            },
            ParamState::Quoted => {
                if is_escaped_quote(scanner, i) {
                    quoted.push_str(scanner.slice(start, i));
                    quoted.push('"');
                    i += 1;
                    start = i + 1;
                } else if c == b'"' {
                    quoted.push_str(scanner.slice(start, i));
                    params.push(std::mem::take(&mut quoted));
                    state = ParamState::End;
                }
            }
            ParamState::End => match c {
                b' ' => {}
                b',' => state = ParamState::New,
                b')' => return Some((i + 1, params)),
                _ => return None,
            },
        }
        i += 1;
    }

    None
}
