//! Character-level scanning for trigger expressions
//!
//! Everything here works on byte offsets into the UTF-8 source. All grammar
//! delimiters are ASCII, so a scan that stops on a delimiter always stops on a
//! character boundary; non-ASCII text can only ever appear inside a token.
//!
//! The regular macro tokens (`{$USER}` and `{#LLD}`) are recognised by a
//! logos lexer. Numbers and function macros are scanned by hand.

use logos::Logos;

/// Suffixes accepted after a number: byte units then time units.
pub const NUMBER_SUFFIXES: &[u8] = b"KMGTsmhdw";

pub fn is_host_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'.' | b' ' | b'_' | b'-')
}

pub fn is_key_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'.' | b'_' | b'-')
}

pub fn is_function_char(c: u8) -> bool {
    c.is_ascii_lowercase()
}

pub fn is_macro_char(c: u8) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, b'.' | b'_')
}

/// Binary operators accepted between operands.
pub fn is_operator(c: u8) -> bool {
    matches!(
        c,
        b'=' | b'#' | b'<' | b'>' | b'&' | b'|' | b'+' | b'-' | b'/' | b'*'
    )
}

/// Word operators; they must be followed by a space or `(`.
pub const WORD_OPERATORS: &[&str] = &["and", "or"];

/// Scan a word operator at the cursor. Returns its end offset.
pub fn scan_word_operator(scanner: &Scanner<'_>) -> Option<usize> {
    let rest = scanner.rest();
    WORD_OPERATORS.iter().find_map(|word| {
        let after = rest.strip_prefix(word)?;
        match after.as_bytes().first() {
            Some(b' ') | Some(b'(') => Some(scanner.pos() + word.len()),
            _ => None,
        }
    })
}

/// A read-only cursor: the source plus one byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scanner<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Scanner { source, pos: 0 }
    }

    pub fn at(source: &'a str, pos: usize) -> Self {
        Scanner { source, pos }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.source.as_bytes()
    }

    /// Byte under the cursor
    pub fn peek(&self) -> Option<u8> {
        self.byte_at(self.pos)
    }

    pub fn byte_at(&self, index: usize) -> Option<u8> {
        self.source.as_bytes().get(index).copied()
    }

    /// Source from the cursor on. Empty if the cursor is not on a character boundary.
    pub fn rest(&self) -> &'a str {
        self.source.get(self.pos..).unwrap_or("")
    }

    /// Offset of the first byte at or after `from` that fails `pred`.
    pub fn skip_while(&self, from: usize, pred: impl Fn(u8) -> bool) -> usize {
        let bytes = self.source.as_bytes();
        let mut end = from;
        while end < bytes.len() && pred(bytes[end]) {
            end += 1;
        }
        end
    }

    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.source[start..end]
    }
}

/// Start of the error tail for a scan that stopped at `pos`.
///
/// One character of context before `pos` is included. The offset is moved back
/// to a character boundary when `pos - 1` falls inside a multi-byte character.
pub fn tail_start(source: &str, pos: usize) -> usize {
    let mut start = pos.saturating_sub(1).min(source.len());
    while !source.is_char_boundary(start) {
        start -= 1;
    }
    start
}

/// Scan a number literal at the cursor: `[0-9]+(\.[0-9]+)?` plus an
/// optional unit suffix. Returns the end offset (exclusive).
pub fn scan_number(scanner: &Scanner<'_>) -> Option<usize> {
    let start = scanner.pos();
    let int_end = scanner.skip_while(start, |c| c.is_ascii_digit());
    if int_end == start {
        return None;
    }

    let mut end = int_end;
    if scanner.byte_at(end) == Some(b'.') {
        let frac_end = scanner.skip_while(end + 1, |c| c.is_ascii_digit());
        if frac_end > end + 1 {
            end = frac_end;
        }
    }

    if let Some(suffix) = scanner.byte_at(end) {
        if NUMBER_SUFFIXES.contains(&suffix) {
            end += 1;
        }
    }

    Some(end)
}

/// Macro tokens with a regular shape
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum MacroToken {
    /// `{$NAME}`
    #[regex(r"\{\$[A-Z0-9._]+\}")]
    UserMacro,

    /// `{#NAME}`
    #[regex(r"\{#[A-Z0-9._]+\}")]
    LldMacro,
}

/// Lex a single macro token at the cursor. Returns the token and its end offset.
pub fn scan_macro(scanner: &Scanner<'_>) -> Option<(MacroToken, usize)> {
    if scanner.peek() != Some(b'{') {
        return None;
    }

    let mut lexer = MacroToken::lexer(scanner.rest());
    match lexer.next() {
        Some(Ok(token)) if lexer.span().start == 0 => {
            Some((token, scanner.pos() + lexer.span().end))
        }
        _ => None,
    }
}
