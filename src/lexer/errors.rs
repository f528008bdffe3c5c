use thiserror::Error;

/// 1-based line and column of a token's first character
///
/// Tokens built from a word list have no source text; they sit on line 1 and
/// the column is the word's 1-based index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Position of the word at `index` in a word stream
    pub fn of_word(index: usize) -> Self {
        Self::new(1, index + 1)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Lexer error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexerError {
    #[error("Unexpected character '{0}' at {1}")]
    UnexpectedChar(char, Position),

    #[error("Invalid identifier '{0}' at {1}")]
    InvalidIdentifier(String, Position),
}
