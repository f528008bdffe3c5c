use crate::lexer::Condition;
use std::collections::BTreeMap;

/// Statement variants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    If {
        condition: Condition,
        body: Block,
    },
    IfElse {
        condition: Condition,
        then_block: Block,
        else_block: Block,
    },
    While {
        condition: Condition,
        body: Block,
    },
    Call(String),
}

impl Statement {
    pub fn call(name: impl Into<String>) -> Self {
        Statement::Call(name.into())
    }
}

/// An ordered sequence of statements: the body of a program, an
/// instruction, or a nested IF/WHILE
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub statements: Vec<Statement>,
}

impl Block {
    /// An empty block
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a call
    pub fn add_call(&mut self, name: impl Into<String>) {
        self.push(Statement::call(name));
    }

    /// Append a child statement
    pub fn push(&mut self, stmt: Statement) {
        self.statements.push(stmt);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }

    /// Names of the calls directly inside this block, in order
    pub fn calls(&self) -> Vec<&str> {
        self.statements
            .iter()
            .filter_map(|s| match s {
                Statement::Call(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl From<Vec<Statement>> for Block {
    fn from(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

impl FromIterator<Statement> for Block {
    fn from_iter<I: IntoIterator<Item = Statement>>(iter: I) -> Self {
        Self {
            statements: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Block {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

/// Complete program AST
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub name: String,
    pub body: Block,
    pub instructions: BTreeMap<String, Block>,
}

impl Program {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: Block::new(),
            instructions: BTreeMap::new(),
        }
    }

    /// Body of a user-defined instruction
    pub fn instruction(&self, name: &str) -> Option<&Block> {
        self.instructions.get(name)
    }
}
