//! # trigex
//!
//! A parser and validator for monitoring trigger expressions such as
//! `{Zabbix server:agent.ping.last(0)}=1`.
//!
//! The parser only lexes, validates and extracts. It never evaluates an
//! expression, resolves macros or looks items up. See [`trigger::parsing`] for
//! the grammar and [`trigger::ast`] for the extracted references.

pub mod trigger;

pub use trigger::ast::{FunctionReference, MacroRef, ParseResult};
pub use trigger::parsing::{parse_expression, ExpressionParser, ParserOptions};
