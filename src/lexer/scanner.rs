use crate::lexer::{LexerError, Position, Token, TokenKind, END_OF_INPUT};

pub struct Scanner {
    input: Vec<char>,
    current: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl Scanner {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            current: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    pub fn scan_all(mut self) -> Result<Vec<Token>, LexerError> {
        while !self.is_at_end() {
            self.skip_whitespace();
            if self.is_at_end() {
                break;
            }

            let token = self.scan_token()?;
            self.tokens.push(token);
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            self.current_position(),
            END_OF_INPUT.to_string(),
        ));

        Ok(self.tokens)
    }

    fn current_position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.current).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.current += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(ch) if ch.is_whitespace()) {
            self.advance();
        }
    }

    fn scan_token(&mut self) -> Result<Token, LexerError> {
        let start_pos = self.current_position();
        let start_idx = self.current;

        while matches!(self.peek(), Some(ch) if is_word_char(ch)) {
            self.advance();
        }

        if self.current == start_idx {
            // Not whitespace and not part of a word
            let ch = self.peek().unwrap_or('\0');
            return Err(LexerError::UnexpectedChar(ch, start_pos));
        }

        let word: String = self.input[start_idx..self.current].iter().collect();

        if !word.starts_with(|ch: char| ch.is_ascii_alphabetic()) {
            return Err(LexerError::InvalidIdentifier(word, start_pos));
        }

        Ok(Token::new(TokenKind::classify(&word), start_pos, word))
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-'
}

/// Convenience function for tokenizing input
#[tracing::instrument(skip_all, fields(source_len = input.len()))]
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexerError> {
    let tokens = Scanner::new(input).scan_all()?;
    tracing::trace!(token_count = tokens.len(), "tokenized source");
    Ok(tokens)
}
