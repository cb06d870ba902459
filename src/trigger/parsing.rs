//! Trigger expression parser
//!
//! A single pass over the expression drives a small state machine. Operands
//! are handed to the constant sub-parsers in [`constant`], which consume a
//! whole token at a time; the top level only ever looks at spaces, operators
//! and grouping parentheses.
//!
//! ```text
//!     {Zabbix server:agent.ping.last(0)}=1
//!     ^--------- function macro --------^^^-- number
//!                                        `-- operator
//! ```
//!
//! Parsing never fails with an error value. Malformed input produces an
//! invalid [`ParseResult`] whose `error` points at the offending tail.
//!
//! ```rust,ignore
//! use trigex::{ExpressionParser, ParserOptions};
//!
//! let mut parser = ExpressionParser::new(ParserOptions::default());
//! let result = parser.parse("{h1:i.last(0)}>0 & {h2:i.last(0)}>0");
//! assert!(result.is_valid);
//! assert_eq!(parser.hosts(), vec!["h1", "h2"]);
//! ```

pub mod constant;
pub mod function_macro;
pub mod params;
pub mod state;

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::trigger::ast::ParseResult;
use crate::trigger::lexing::{is_operator, scan_word_operator, tail_start, Scanner};
use constant::{parse_constant, Constant};
pub use state::ParserState;

/// Message for input where nothing could be consumed.
pub const INCORRECT_EXPRESSION: &str = "Incorrect trigger expression";

/// Built-in macros recognised when no list is configured.
pub const DEFAULT_BUILTIN_MACROS: &[&str] = &["{TRIGGER.VALUE}"];

/// Options shared by every parse of one parser instance
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Accept `{#MACRO}` low-level discovery macros as operands.
    pub allow_lld_macros: bool,
    /// Exact built-in macro names, braces included.
    pub builtin_macros: Vec<String>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            allow_lld_macros: true,
            builtin_macros: DEFAULT_BUILTIN_MACROS
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

pub static DEFAULT_OPTIONS: Lazy<ParserOptions> = Lazy::new(ParserOptions::default);

/// Parse one expression with the given options.
pub fn parse_expression(expression: &str, options: &ParserOptions) -> ParseResult {
    let scanner = Scanner::new(expression);
    let bytes = scanner.bytes();
    let mut state = ParserState::Init;
    let mut level = 0usize;
    let mut pos = 0usize;
    let mut result = ParseResult::default();

    while pos < bytes.len() {
        let c = bytes[pos];

        if state.expects_operand() {
            match c {
                b' ' => {}
                b'-' if state.accepts_minus() => state = ParserState::AfterMinus,
                b'(' => {
                    state = ParserState::AfterOpenBrace;
                    level += 1;
                }
                _ => match parse_constant(&Scanner::at(expression, pos), options) {
                    Some(matched) => {
                        tracing::trace!(
                            kind = matched.constant.kind_name(),
                            start = pos,
                            end = matched.end,
                            "operand"
                        );
                        collect(&mut result, matched.constant);
                        state = ParserState::AfterConstant;
                        pos = matched.end;
                        continue;
                    }
                    None => break,
                },
            }
        } else {
            match c {
                b' ' => {}
                b')' => {
                    state = ParserState::AfterCloseBrace;
                    if level == 0 {
                        break;
                    }
                    level -= 1;
                }
                c if is_operator(c) => state = ParserState::AfterOperator,
                _ if pos > 0 && matches!(bytes[pos - 1], b' ' | b')') => {
                    match scan_word_operator(&Scanner::at(expression, pos)) {
                        Some(end) => {
                            state = ParserState::AfterOperator;
                            pos = end;
                            continue;
                        }
                        None => break,
                    }
                }
                _ => break,
            }
        }

        pos += 1;
    }

    tracing::trace!(pos, level, ?state, "scan stopped");

    if pos == 0 {
        return ParseResult::invalid(INCORRECT_EXPRESSION, None);
    }

    if level != 0 || pos != bytes.len() || !state.is_complete() {
        let start = tail_start(expression, pos);
        return ParseResult::invalid(
            format!(
                "{INCORRECT_EXPRESSION}. Check expression part starting from \"{}\"",
                &expression[start..]
            ),
            Some(start),
        );
    }

    result.is_valid = true;
    result
}

fn collect(result: &mut ParseResult, constant: Constant) {
    match constant {
        Constant::Function(reference) => result.expressions.push(reference),
        Constant::Number => {}
        Constant::Macro(reference) => result.macros.push(reference),
        Constant::UserMacro(reference) => result.user_macros.push(reference),
        Constant::LldMacro(reference) => result.lld_macros.push(reference),
    }
}

/// A reusable parser that remembers its last result
///
/// Each call to [`ExpressionParser::parse`] replaces the previous result.
#[derive(Debug, Clone, Default)]
pub struct ExpressionParser {
    options: ParserOptions,
    last: Option<ParseResult>,
}

impl ExpressionParser {
    pub fn new(options: ParserOptions) -> Self {
        ExpressionParser {
            options,
            last: None,
        }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn parse(&mut self, expression: &str) -> &ParseResult {
        let result = parse_expression(expression, &self.options);
        tracing::debug!(
            valid = result.is_valid,
            functions = result.expressions.len(),
            macros = result.macros.len(),
            user_macros = result.user_macros.len(),
            lld_macros = result.lld_macros.len(),
            "parsed trigger expression"
        );
        self.last.insert(result)
    }

    pub fn last_result(&self) -> Option<&ParseResult> {
        self.last.as_ref()
    }

    /// Unique hosts of the last parse; empty before any parse or after an invalid one.
    pub fn hosts(&self) -> Vec<&str> {
        self.last
            .as_ref()
            .map(ParseResult::hosts)
            .unwrap_or_default()
    }
}
