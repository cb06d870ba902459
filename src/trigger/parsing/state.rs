//! Top-level scanner states

/// What the top-level scan has just consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    Init,
    AfterOpenBrace,
    AfterOperator,
    AfterMinus,
    AfterCloseBrace,
    AfterConstant,
}

impl ParserState {
    /// States that expect an operand next.
    pub fn expects_operand(self) -> bool {
        matches!(
            self,
            ParserState::Init
                | ParserState::AfterOpenBrace
                | ParserState::AfterOperator
                | ParserState::AfterMinus
        )
    }

    /// Whether unary minus may appear in this state.
    pub fn accepts_minus(self) -> bool {
        matches!(
            self,
            ParserState::Init | ParserState::AfterOpenBrace | ParserState::AfterOperator
        )
    }

    /// Whether an expression may end in this state.
    pub fn is_complete(self) -> bool {
        matches!(self, ParserState::AfterConstant | ParserState::AfterCloseBrace)
    }
}
