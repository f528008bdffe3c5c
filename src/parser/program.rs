use crate::lexer::{tokenize, Keyword, Position, Token, TokenKind, END_OF_INPUT};
use crate::parser::{Block, ParserConfig, ParserError, Program};
use crate::symbol::InstructionTable;
use std::str::FromStr;

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    /// Open IF/WHILE blocks around the cursor
    depth: usize,
    config: ParserConfig,
}

impl Parser {
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_config(tokens, ParserConfig::default())
    }

    #[must_use]
    pub fn with_config(tokens: Vec<Token>, config: ParserConfig) -> Self {
        Self {
            tokens,
            current: 0,
            depth: 0,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Tokens not yet consumed
    #[must_use]
    pub fn remaining(&self) -> &[Token] {
        self.tokens.get(self.current..).unwrap_or(&[])
    }

    /// Peek at current token without consuming it
    pub(crate) fn peek(&self) -> Result<&Token, ParserError> {
        self.tokens.get(self.current).ok_or(ParserError::UnexpectedEof)
    }

    /// Consume and return the current token
    pub(crate) fn advance(&mut self) -> Result<Token, ParserError> {
        let token = self.peek()?.clone();
        self.current += 1;
        Ok(token)
    }

    /// Check if current token is a keyword
    pub(crate) fn check_keyword(&self, keyword: Keyword) -> bool {
        matches!(self.peek(), Ok(token) if token.is_keyword(keyword))
    }

    /// Consume a token and require it to be the given keyword
    pub(crate) fn expect_keyword(&mut self, keyword: Keyword) -> Result<Token, ParserError> {
        let token = self.advance()?;
        if token.is_keyword(keyword) {
            Ok(token)
        } else {
            Err(ParserError::ExpectedToken(keyword.to_string(), token.lexeme, token.pos))
        }
    }

    /// Enter an IF/WHILE block, failing once the configured depth is exceeded
    pub(crate) fn enter_nested(&mut self, pos: Position) -> Result<(), ParserError> {
        if self.depth >= self.config.max_nesting_depth {
            return Err(ParserError::NestingTooDeep(self.config.max_nesting_depth, pos));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn exit_nested(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Consume a declared program or instruction name
    fn advance_name(&mut self) -> Result<Token, ParserError> {
        let token = self.advance()?;
        let is_identifier = matches!(&token.kind, TokenKind::Identifier(name) if !name.is_empty());
        if token.lexeme.is_empty() || (self.config.require_identifier_names && !is_identifier) {
            return Err(ParserError::ExpectedToken(
                "identifier".to_string(),
                token.lexeme,
                token.pos,
            ));
        }
        Ok(token)
    }

    /// Consume a closing name and require it to match the opening one
    fn expect_name(&mut self, name: &str) -> Result<Token, ParserError> {
        let token = self.advance()?;
        if token.lexeme == name {
            Ok(token)
        } else {
            Err(ParserError::ExpectedToken(name.to_string(), token.lexeme, token.pos))
        }
    }

    /// Parse a complete `PROGRAM name IS ... END name` unit
    #[tracing::instrument(skip_all, fields(token_count = self.tokens.len()))]
    pub fn parse_program(&mut self) -> Result<Program, ParserError> {
        let header = self.peek()?;
        if !header.is_keyword(Keyword::Program) {
            return Err(ParserError::ExpectedToken(
                Keyword::Program.to_string(),
                header.lexeme.clone(),
                header.pos,
            ));
        }
        self.advance()?;
        let name = self.advance_name()?.lexeme;
        self.expect_keyword(Keyword::Is)?;
        tracing::debug!(program = %name, "parsed program header");

        let mut instructions = InstructionTable::new(&self.config);
        loop {
            let token = self.peek()?;
            if token.is_keyword(Keyword::Begin) || token.is_eof() {
                break;
            }
            if !token.is_keyword(Keyword::Instruction) {
                return Err(ParserError::UnexpectedToken(token.lexeme.clone(), token.pos));
            }
            let pos = token.pos;
            let (instruction, body) = self.parse_instruction()?;
            tracing::debug!(instruction = %instruction, calls = body.len(), "parsed instruction");
            instructions.define(instruction, body, pos)?;
        }

        let body = if self.check_keyword(Keyword::Begin) {
            self.advance()?;
            self.parse_block()?
        } else {
            Block::new()
        };

        self.expect_keyword(Keyword::End)?;
        self.expect_name(&name)?;
        let trailer = self.advance()?;
        if !trailer.is_eof() {
            return Err(ParserError::ExpectedToken(
                END_OF_INPUT.to_string(),
                trailer.lexeme,
                trailer.pos,
            ));
        }

        tracing::debug!(
            program = %name,
            instructions = instructions.len(),
            statements = body.len(),
            "parsed program"
        );

        Ok(Program {
            name,
            body,
            instructions: instructions.into_map(),
        })
    }

    /// Parse one `INSTRUCTION name IS ... END name` definition, returning
    /// the instruction name and its body.
    ///
    /// With [`BodyGrammar::CallsOnly`](crate::parser::BodyGrammar::CallsOnly)
    /// a nested IF or WHILE ends the scan early and the closing `END name`
    /// is left in the stream.
    pub fn parse_instruction(&mut self) -> Result<(String, Block), ParserError> {
        let marker = self.advance()?;
        if !marker.is_keyword(Keyword::Instruction) {
            return Err(ParserError::ExpectedToken(
                Keyword::Instruction.to_string(),
                marker.lexeme,
                marker.pos,
            ));
        }

        let name = self.advance_name()?.lexeme;

        let is_token = self.advance()?;
        if self.config.check_instruction_is && !is_token.is_keyword(Keyword::Is) {
            return Err(ParserError::ExpectedToken(
                Keyword::Is.to_string(),
                is_token.lexeme,
                is_token.pos,
            ));
        }

        let body = self.parse_block()?;

        if self.check_keyword(Keyword::End) {
            self.advance()?;
            self.expect_name(&name)?;
        } else {
            let stopped_at = self.peek()?.lexeme.clone();
            tracing::debug!(
                instruction = %name,
                stopped_at = %stopped_at,
                "instruction body ended before END"
            );
        }

        Ok((name, body))
    }
}

/// Parse a token sequence ending in the end-of-input sentinel
pub fn parse_tokens(tokens: Vec<Token>, config: &ParserConfig) -> Result<Program, ParserError> {
    Parser::with_config(tokens, config.clone()).parse_program()
}

/// Tokenize BL source text and parse it
pub fn parse_source(source: &str, config: &ParserConfig) -> Result<Program, ParserError> {
    let tokens = tokenize(source)?;
    parse_tokens(tokens, config)
}

impl FromStr for Program {
    type Err = ParserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_source(s, &ParserConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{from_words, Position};
    use crate::parser::DuplicatePolicy;

    fn parse_words(words: &[&str]) -> Result<Program, ParserError> {
        parse_tokens(from_words(words), &ParserConfig::default())
    }

    #[test]
    fn test_empty_program() {
        let program = parse_words(&["PROGRAM", "p", "IS", "BEGIN", "END", "p", END_OF_INPUT]).unwrap();
        assert_eq!(program.name, "p");
        assert!(program.body.is_empty());
        assert!(program.instructions.is_empty());
    }

    #[test]
    fn test_single_call_body() {
        let program =
            parse_words(&["PROGRAM", "foo", "IS", "BEGIN", "move", "END", "foo", END_OF_INPUT]).unwrap();
        let mut expected = Program::new("foo");
        expected.body.add_call("move");
        assert_eq!(program, expected);
    }

    #[test]
    fn test_closing_name_mismatch() {
        let err = parse_words(&["PROGRAM", "foo", "IS", "BEGIN", "move", "END", "bar", END_OF_INPUT])
            .unwrap_err();
        assert_eq!(
            err,
            ParserError::ExpectedToken("foo".to_string(), "bar".to_string(), Position::new(1, 7))
        );
    }

    #[test]
    fn test_missing_program_keyword() {
        let err = parse_words(&["BEGIN", "END", END_OF_INPUT]).unwrap_err();
        assert!(matches!(err, ParserError::ExpectedToken(expected, found, _)
            if expected == "PROGRAM" && found == "BEGIN"));
    }

    #[test]
    fn test_missing_is_after_program_name() {
        let err = parse_words(&["PROGRAM", "p", "BEGIN", "END", "p", END_OF_INPUT]).unwrap_err();
        assert!(matches!(err, ParserError::ExpectedToken(expected, _, _) if expected == "IS"));
    }

    #[test]
    fn test_program_without_begin() {
        let err = parse_words(&["PROGRAM", "p", "IS", "END", "p", END_OF_INPUT]).unwrap_err();
        assert!(matches!(err, ParserError::UnexpectedToken(found, _) if found == "END"));
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        let err = parse_words(&["PROGRAM", "p", "IS", "BEGIN", "END", "p", "move", END_OF_INPUT])
            .unwrap_err();
        assert!(matches!(err, ParserError::ExpectedToken(expected, found, _)
            if expected == END_OF_INPUT && found == "move"));
    }

    #[test]
    fn test_missing_sentinel_is_eof_error() {
        let err = parse_words(&["PROGRAM", "p", "IS", "BEGIN", "END", "p"]).unwrap_err();
        assert_eq!(err, ParserError::UnexpectedEof);
    }

    #[test]
    fn test_empty_stream_is_eof_error() {
        assert_eq!(parse_words(&[]).unwrap_err(), ParserError::UnexpectedEof);
    }

    #[test]
    fn test_empty_program_name_rejected() {
        let err = parse_words(&["PROGRAM", "", "IS", "BEGIN", "END", "", END_OF_INPUT]).unwrap_err();
        assert_eq!(
            err,
            ParserError::ExpectedToken("identifier".to_string(), String::new(), Position::new(1, 2))
        );
    }

    #[test]
    fn test_empty_instruction_name_rejected() {
        let err = parse_words(&[
            "PROGRAM", "p", "IS", "INSTRUCTION", "", "IS", "move", "END", "", "BEGIN", "END", "p",
            END_OF_INPUT,
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ParserError::ExpectedToken("identifier".to_string(), String::new(), Position::new(1, 5))
        );
    }

    #[test]
    fn test_strict_rejects_primitive_instruction_name() {
        let words = [
            "PROGRAM", "p", "IS",
            "INSTRUCTION", "move", "IS", "turnleft", "END", "move",
            "BEGIN", "move", "END", "p", END_OF_INPUT,
        ];
        let err = parse_tokens(from_words(words), &ParserConfig::strict()).unwrap_err();
        assert_eq!(
            err,
            ParserError::PrimitiveRedefinition("move".to_string(), Position::new(1, 4))
        );

        let program = parse_words(&words).unwrap();
        assert_eq!(program.instruction("move").unwrap().calls(), vec!["turnleft"]);
    }

    #[test]
    fn test_instruction_calls_in_order() {
        let mut parser = Parser::new(from_words([
            "INSTRUCTION", "inc", "IS", "move", "turn-right", "END", "inc", END_OF_INPUT,
        ]));
        let (name, body) = parser.parse_instruction().unwrap();
        assert_eq!(name, "inc");
        assert_eq!(body.calls(), vec!["move", "turn-right"]);
        assert_eq!(parser.remaining().len(), 1);
    }

    #[test]
    fn test_instruction_stops_at_if() {
        let mut parser = Parser::new(from_words([
            "INSTRUCTION", "a", "IS", "move", "IF", "random", "THEN", "skip", "END", "IF", "END", "a",
            END_OF_INPUT,
        ]));
        let (name, body) = parser.parse_instruction().unwrap();
        assert_eq!(name, "a");
        assert_eq!(body.calls(), vec!["move"]);
        assert_eq!(parser.remaining()[0].lexeme, "IF");
    }

    #[test]
    fn test_instruction_is_unchecked_by_default() {
        let mut parser = Parser::new(from_words(["INSTRUCTION", "a", "ARE", "move", "END", "a", END_OF_INPUT]));
        let (_, body) = parser.parse_instruction().unwrap();
        assert_eq!(body.calls(), vec!["move"]);

        let config = ParserConfig::new().with_check_instruction_is(true);
        let mut parser = Parser::with_config(
            from_words(["INSTRUCTION", "a", "ARE", "move", "END", "a", END_OF_INPUT]),
            config,
        );
        let err = parser.parse_instruction().unwrap_err();
        assert!(matches!(err, ParserError::ExpectedToken(expected, found, _)
            if expected == "IS" && found == "ARE"));
    }

    #[test]
    fn test_instruction_closing_name_mismatch() {
        let err = parse_words(&[
            "PROGRAM", "p", "IS", "INSTRUCTION", "a", "IS", "move", "END", "b", "BEGIN", "END", "p",
            END_OF_INPUT,
        ])
        .unwrap_err();
        assert!(matches!(err, ParserError::ExpectedToken(expected, found, _)
            if expected == "a" && found == "b"));
    }

    #[test]
    fn test_instructions_are_collected() {
        let program = parse_words(&[
            "PROGRAM", "p", "IS",
            "INSTRUCTION", "one", "IS", "move", "END", "one",
            "INSTRUCTION", "two", "IS", "one", "one", "END", "two",
            "BEGIN", "two", "END", "p", END_OF_INPUT,
        ])
        .unwrap();
        assert_eq!(program.instructions.len(), 2);
        assert_eq!(program.instruction("two").unwrap().calls(), vec!["one", "one"]);
        assert_eq!(program.body.calls(), vec!["two"]);
    }

    #[test]
    fn test_duplicate_instruction_overwrites_by_default() {
        let words = [
            "PROGRAM", "p", "IS",
            "INSTRUCTION", "a", "IS", "move", "END", "a",
            "INSTRUCTION", "a", "IS", "skip", "END", "a",
            "BEGIN", "END", "p", END_OF_INPUT,
        ];
        let program = parse_words(&words).unwrap();
        assert_eq!(program.instructions.len(), 1);
        assert_eq!(program.instruction("a").unwrap().calls(), vec!["skip"]);

        let config = ParserConfig::new().with_duplicates(DuplicatePolicy::Reject);
        let err = parse_tokens(from_words(words), &config).unwrap_err();
        assert!(matches!(err, ParserError::DuplicateInstruction(name, _) if name == "a"));
    }

    #[test]
    fn test_unexpected_top_level_token() {
        let err = parse_words(&["PROGRAM", "p", "IS", "move", "BEGIN", "END", "p", END_OF_INPUT])
            .unwrap_err();
        assert_eq!(err, ParserError::UnexpectedToken("move".to_string(), Position::new(1, 4)));
    }

    #[test]
    fn test_if_in_instruction_surfaces_at_top_level() {
        let err = parse_words(&[
            "PROGRAM", "p", "IS",
            "INSTRUCTION", "a", "IS", "IF", "true", "THEN", "move", "END", "IF", "END", "a",
            "BEGIN", "END", "p", END_OF_INPUT,
        ])
        .unwrap_err();
        assert!(matches!(err, ParserError::UnexpectedToken(found, _) if found == "IF"));
    }

    #[test]
    fn test_strict_requires_identifier_names() {
        let err = parse_tokens(
            from_words(["PROGRAM", "IS", "IS", "BEGIN", "END", "IS", END_OF_INPUT]),
            &ParserConfig::strict(),
        )
        .unwrap_err();
        assert!(matches!(err, ParserError::ExpectedToken(expected, _, _) if expected == "identifier"));
    }

    #[test]
    fn test_from_str() {
        let program: Program = "PROGRAM Hop IS BEGIN move move END Hop".parse().unwrap();
        assert_eq!(program.name, "Hop");
        assert_eq!(program.body.calls(), vec!["move", "move"]);
    }

    #[test]
    fn test_lexer_error_is_wrapped() {
        let err = "PROGRAM p IS BEGIN move! END p".parse::<Program>().unwrap_err();
        assert!(matches!(err, ParserError::LexerError(_)));
        assert_eq!(err.position(), Some(Position::new(1, 24)));
    }
}
