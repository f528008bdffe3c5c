use thiserror::Error;
use crate::lexer::Position;

/// Parser error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    #[error("Unexpected token '{0}' at {1}")]
    UnexpectedToken(String, Position),

    #[error("Expected '{0}' but found '{1}' at {2}")]
    ExpectedToken(String, String, Position),

    #[error("Redefinition of instruction '{0}' at {1}")]
    DuplicateInstruction(String, Position),

    #[error("Instruction '{0}' at {1} shadows a primitive instruction")]
    PrimitiveRedefinition(String, Position),

    #[error("Blocks nested deeper than {0} levels at {1}")]
    NestingTooDeep(usize, Position),

    #[error("Unexpected end of input")]
    UnexpectedEof,

    #[error("Lexer error: {0}")]
    LexerError(#[from] crate::lexer::LexerError),
}

impl ParserError {
    /// Source position of the offending token, when known
    pub fn position(&self) -> Option<Position> {
        use crate::lexer::LexerError;

        match self {
            ParserError::UnexpectedToken(_, pos)
            | ParserError::ExpectedToken(_, _, pos)
            | ParserError::DuplicateInstruction(_, pos)
            | ParserError::PrimitiveRedefinition(_, pos)
            | ParserError::NestingTooDeep(_, pos) => Some(*pos),
            ParserError::LexerError(LexerError::UnexpectedChar(_, pos))
            | ParserError::LexerError(LexerError::InvalidIdentifier(_, pos)) => Some(*pos),
            ParserError::UnexpectedEof => None,
        }
    }
}
