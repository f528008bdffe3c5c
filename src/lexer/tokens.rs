use crate::lexer::Position;
use std::fmt;

/// Lexeme carried by the end-of-input token
pub const END_OF_INPUT: &str = "### END OF INPUT ###";

/// Language keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Program,
    Instruction,
    Is,
    Begin,
    End,
    If,
    Then,
    Else,
    While,
    Do,
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Keyword::Program => "PROGRAM",
            Keyword::Instruction => "INSTRUCTION",
            Keyword::Is => "IS",
            Keyword::Begin => "BEGIN",
            Keyword::End => "END",
            Keyword::If => "IF",
            Keyword::Then => "THEN",
            Keyword::Else => "ELSE",
            Keyword::While => "WHILE",
            Keyword::Do => "DO",
        };
        write!(f, "{}", s)
    }
}

impl Keyword {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "PROGRAM" => Some(Keyword::Program),
            "INSTRUCTION" => Some(Keyword::Instruction),
            "IS" => Some(Keyword::Is),
            "BEGIN" => Some(Keyword::Begin),
            "END" => Some(Keyword::End),
            "IF" => Some(Keyword::If),
            "THEN" => Some(Keyword::Then),
            "ELSE" => Some(Keyword::Else),
            "WHILE" => Some(Keyword::While),
            "DO" => Some(Keyword::Do),
            _ => None,
        }
    }
}

/// Built-in tests usable by IF and WHILE
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    NextIsEmpty,
    NextIsNotEmpty,
    NextIsWall,
    NextIsNotWall,
    NextIsFriend,
    NextIsNotFriend,
    NextIsEnemy,
    NextIsNotEnemy,
    Random,
    True,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Condition::NextIsEmpty => "next-is-empty",
            Condition::NextIsNotEmpty => "next-is-not-empty",
            Condition::NextIsWall => "next-is-wall",
            Condition::NextIsNotWall => "next-is-not-wall",
            Condition::NextIsFriend => "next-is-friend",
            Condition::NextIsNotFriend => "next-is-not-friend",
            Condition::NextIsEnemy => "next-is-enemy",
            Condition::NextIsNotEnemy => "next-is-not-enemy",
            Condition::Random => "random",
            Condition::True => "true",
        };
        write!(f, "{}", s)
    }
}

impl Condition {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "next-is-empty" => Some(Condition::NextIsEmpty),
            "next-is-not-empty" => Some(Condition::NextIsNotEmpty),
            "next-is-wall" => Some(Condition::NextIsWall),
            "next-is-not-wall" => Some(Condition::NextIsNotWall),
            "next-is-friend" => Some(Condition::NextIsFriend),
            "next-is-not-friend" => Some(Condition::NextIsNotFriend),
            "next-is-enemy" => Some(Condition::NextIsEnemy),
            "next-is-not-enemy" => Some(Condition::NextIsNotEnemy),
            "random" => Some(Condition::Random),
            "true" => Some(Condition::True),
            _ => None,
        }
    }
}

/// Token kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Keyword(Keyword),
    Condition(Condition),
    Identifier(String),
    Eof,
}

impl TokenKind {
    /// Classify a single word the way the scanner would
    pub fn classify(word: &str) -> Self {
        if word == END_OF_INPUT {
            TokenKind::Eof
        } else if let Some(keyword) = Keyword::from_str(word) {
            TokenKind::Keyword(keyword)
        } else if let Some(condition) = Condition::from_str(word) {
            TokenKind::Condition(condition)
        } else {
            TokenKind::Identifier(word.to_string())
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenKind::Keyword(kw) => write!(f, "{}", kw),
            TokenKind::Condition(cond) => write!(f, "{}", cond),
            TokenKind::Identifier(s) => write!(f, "{}", s),
            TokenKind::Eof => write!(f, "{}", END_OF_INPUT),
        }
    }
}

/// A token with position information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: Position,
    pub lexeme: String,
}

impl Token {
    pub fn new(kind: TokenKind, pos: Position, lexeme: String) -> Self {
        Self { kind, pos, lexeme }
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self.kind, TokenKind::Keyword(k) if k == keyword)
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

/// Build a token sequence from pre-split words.
///
/// Positions are word indices on line 1. No sentinel is appended; pass
/// [`END_OF_INPUT`] as the last word for a well-formed stream.
pub fn from_words<I, S>(words: I) -> Vec<Token>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .enumerate()
        .map(|(i, word)| {
            let word = word.as_ref();
            Token::new(TokenKind::classify(word), Position::of_word(i), word.to_string())
        })
        .collect()
}
