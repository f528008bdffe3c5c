use crate::lexer::{Condition, Keyword, TokenKind};
use crate::parser::program::Parser;
use crate::parser::{Block, BodyGrammar, ParserError, Statement};

impl Parser {
    /// Parse a statement block using the configured body grammar
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParserError> {
        match self.config().body_grammar {
            BodyGrammar::CallsOnly => self.parse_call_run(),
            BodyGrammar::Full => self.parse_nested_block(),
        }
    }

    /// Collect consecutive calls, stopping at IF, WHILE, END, ELSE or the sentinel
    fn parse_call_run(&mut self) -> Result<Block, ParserError> {
        let mut body = Block::new();

        loop {
            let token = self.peek()?.clone();
            match token.kind {
                TokenKind::Identifier(name) => {
                    self.advance()?;
                    body.add_call(name);
                }
                TokenKind::Keyword(Keyword::If | Keyword::While) => {
                    tracing::trace!(at = %token.pos, "call run stopped at {}", token.lexeme);
                    break;
                }
                TokenKind::Keyword(Keyword::End | Keyword::Else) | TokenKind::Eof => break,
                _ => return Err(ParserError::UnexpectedToken(token.lexeme, token.pos)),
            }
        }

        Ok(body)
    }

    /// Parse statements until END, ELSE or the sentinel
    fn parse_nested_block(&mut self) -> Result<Block, ParserError> {
        let mut block = Block::new();

        loop {
            let token = self.peek()?;
            if token.is_eof() || token.is_keyword(Keyword::End) || token.is_keyword(Keyword::Else) {
                break;
            }
            let stmt = self.parse_statement()?;
            block.push(stmt);
        }

        Ok(block)
    }

    /// Parse a statement
    fn parse_statement(&mut self) -> Result<Statement, ParserError> {
        let token = self.peek()?.clone();

        match token.kind {
            TokenKind::Identifier(name) => {
                self.advance()?;
                Ok(Statement::Call(name))
            }

            TokenKind::Keyword(Keyword::If) => self.parse_if_statement(),

            TokenKind::Keyword(Keyword::While) => self.parse_while_statement(),

            _ => Err(ParserError::UnexpectedToken(token.lexeme, token.pos)),
        }
    }

    /// Parse `IF c THEN ... [ELSE ...] END IF`
    fn parse_if_statement(&mut self) -> Result<Statement, ParserError> {
        let opener = self.expect_keyword(Keyword::If)?;
        self.enter_nested(opener.pos)?;
        let condition = self.expect_condition()?;
        self.expect_keyword(Keyword::Then)?;

        let then_block = self.parse_nested_block()?;

        let stmt = if self.check_keyword(Keyword::Else) {
            self.advance()?;
            let else_block = self.parse_nested_block()?;
            Statement::IfElse {
                condition,
                then_block,
                else_block,
            }
        } else {
            Statement::If {
                condition,
                body: then_block,
            }
        };

        self.expect_keyword(Keyword::End)?;
        self.expect_keyword(Keyword::If)?;
        self.exit_nested();

        Ok(stmt)
    }

    /// Parse `WHILE c DO ... END WHILE`
    fn parse_while_statement(&mut self) -> Result<Statement, ParserError> {
        let opener = self.expect_keyword(Keyword::While)?;
        self.enter_nested(opener.pos)?;
        let condition = self.expect_condition()?;
        self.expect_keyword(Keyword::Do)?;

        let body = self.parse_nested_block()?;

        self.expect_keyword(Keyword::End)?;
        self.expect_keyword(Keyword::While)?;
        self.exit_nested();

        Ok(Statement::While { condition, body })
    }

    fn expect_condition(&mut self) -> Result<Condition, ParserError> {
        let token = self.advance()?;
        match token.kind {
            TokenKind::Condition(condition) => Ok(condition),
            _ => Err(ParserError::ExpectedToken(
                "condition".to_string(),
                token.lexeme,
                token.pos,
            )),
        }
    }
}
