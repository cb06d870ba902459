//! Error types for the fallible surfaces around the parser.
//!
//! Parsing itself never fails; malformed expressions are reported through
//! [`ParseResult`](crate::trigger::ast::ParseResult).

use crate::trigger::formats::FormatError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

pub type Result<T> = std::result::Result<T, Error>;
