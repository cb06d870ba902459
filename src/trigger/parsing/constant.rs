//! Operand recognition
//!
//! An operand ("constant") is one of five token kinds. Candidates are tried in
//! a fixed order and the first match wins.

use super::function_macro::parse_function_macro;
use super::ParserOptions;
use crate::trigger::ast::{FunctionReference, MacroRef};
use crate::trigger::lexing::{scan_macro, scan_number, MacroToken, Scanner};

/// A recognised operand
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constant {
    Function(FunctionReference),
    Number,
    Macro(MacroRef),
    UserMacro(MacroRef),
    LldMacro(MacroRef),
}

impl Constant {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Constant::Function(_) => "function",
            Constant::Number => "number",
            Constant::Macro(_) => "macro",
            Constant::UserMacro(_) => "usermacro",
            Constant::LldMacro(_) => "lldmacro",
        }
    }
}

/// An operand plus the offset just past it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matched {
    pub end: usize,
    pub constant: Constant,
}

type Candidate = fn(&Scanner<'_>, &ParserOptions) -> Option<Matched>;

const CANDIDATES: [Candidate; 5] = [
    function_candidate,
    number_candidate,
    builtin_macro_candidate,
    user_macro_candidate,
    lld_macro_candidate,
];

/// Try every operand kind at the cursor.
pub fn parse_constant(scanner: &Scanner<'_>, options: &ParserOptions) -> Option<Matched> {
    CANDIDATES
        .iter()
        .find_map(|candidate| candidate(scanner, options))
}

fn function_candidate(scanner: &Scanner<'_>, _options: &ParserOptions) -> Option<Matched> {
    parse_function_macro(scanner).map(|(end, reference)| Matched {
        end,
        constant: Constant::Function(reference),
    })
}

fn number_candidate(scanner: &Scanner<'_>, _options: &ParserOptions) -> Option<Matched> {
    scan_number(scanner).map(|end| Matched {
        end,
        constant: Constant::Number,
    })
}

fn builtin_macro_candidate(scanner: &Scanner<'_>, options: &ParserOptions) -> Option<Matched> {
    let rest = scanner.rest();
    options
        .builtin_macros
        .iter()
        .find(|name| !name.is_empty() && rest.starts_with(name.as_str()))
        .map(|name| Matched {
            end: scanner.pos() + name.len(),
            constant: Constant::Macro(MacroRef::new(name.as_str())),
        })
}

fn user_macro_candidate(scanner: &Scanner<'_>, _options: &ParserOptions) -> Option<Matched> {
    match scan_macro(scanner)? {
        (MacroToken::UserMacro, end) => Some(Matched {
            end,
            constant: Constant::UserMacro(MacroRef::new(scanner.slice(scanner.pos(), end))),
        }),
        _ => None,
    }
}

fn lld_macro_candidate(scanner: &Scanner<'_>, options: &ParserOptions) -> Option<Matched> {
    if !options.allow_lld_macros {
        return None;
    }
    match scan_macro(scanner)? {
        (MacroToken::LldMacro, end) => Some(Matched {
            end,
            constant: Constant::LldMacro(MacroRef::new(scanner.slice(scanner.pos(), end))),
        }),
        _ => None,
    }
}
