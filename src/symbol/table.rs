use crate::lexer::Position;
use crate::parser::{Block, DuplicatePolicy, ParserConfig, ParserError};
use std::collections::{BTreeMap, HashMap};

/// Instructions built into the BL language
pub const PRIMITIVES: [&str; 5] = ["move", "turnleft", "turnright", "infect", "skip"];

pub fn is_primitive(name: &str) -> bool {
    PRIMITIVES.contains(&name)
}

/// Instruction definitions collected while parsing a program
#[derive(Debug)]
pub struct InstructionTable {
    instructions: BTreeMap<String, Block>,
    /// Where each name was most recently defined
    defined_at: HashMap<String, Position>,
    duplicates: DuplicatePolicy,
    reject_primitive_names: bool,
}

impl Default for InstructionTable {
    fn default() -> Self {
        Self::new(&ParserConfig::default())
    }
}

impl InstructionTable {
    #[must_use]
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            instructions: BTreeMap::new(),
            defined_at: HashMap::new(),
            duplicates: config.duplicates,
            reject_primitive_names: config.reject_primitive_names,
        }
    }

    /// Add a definition, applying the configured naming policies
    pub fn define(&mut self, name: String, body: Block, pos: Position) -> Result<(), ParserError> {
        if self.reject_primitive_names && is_primitive(&name) {
            return Err(ParserError::PrimitiveRedefinition(name, pos));
        }

        if let Some(previous) = self.defined_at.get(&name) {
            match self.duplicates {
                DuplicatePolicy::Reject => {
                    return Err(ParserError::DuplicateInstruction(name, pos));
                }
                DuplicatePolicy::Overwrite => {
                    tracing::warn!(
                        instruction = %name,
                        first = %previous,
                        again = %pos,
                        "instruction redefined, keeping the later body"
                    );
                }
            }
        }

        self.defined_at.insert(name.clone(), pos);
        self.instructions.insert(name, body);
        Ok(())
    }

    /// Look up a definition by name
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Block> {
        self.instructions.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn into_map(self) -> BTreeMap<String, Block> {
        self.instructions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(calls: &[&str]) -> Block {
        let mut body = Block::new();
        for call in calls {
            body.add_call(*call);
        }
        body
    }

    #[test]
    fn test_overwrite_keeps_later_definition() {
        let mut table = InstructionTable::default();
        table.define("a".to_string(), body(&["move"]), Position::new(1, 1)).unwrap();
        table.define("a".to_string(), body(&["skip"]), Position::new(5, 1)).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("a"), Some(&body(&["skip"])));
    }

    #[test]
    fn test_reject_duplicate() {
        let config = ParserConfig::new().with_duplicates(DuplicatePolicy::Reject);
        let mut table = InstructionTable::new(&config);
        table.define("a".to_string(), body(&[]), Position::new(1, 1)).unwrap();
        let err = table.define("a".to_string(), body(&[]), Position::new(3, 1)).unwrap_err();
        assert_eq!(err, ParserError::DuplicateInstruction("a".to_string(), Position::new(3, 1)));
    }

    #[test]
    fn test_primitive_names() {
        assert!(is_primitive("turnright"));
        assert!(!is_primitive("turn-right"));

        let config = ParserConfig::new().with_reject_primitive_names(true);
        let mut table = InstructionTable::new(&config);
        let err = table.define("move".to_string(), body(&[]), Position::new(2, 3)).unwrap_err();
        assert!(matches!(err, ParserError::PrimitiveRedefinition(name, _) if name == "move"));
        assert!(table.is_empty());
    }
}
