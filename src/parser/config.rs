//! Parser configuration
//!
//! The defaults reproduce the permissive behavior of the classic BL parser.
//! [`ParserConfig::strict`] switches every check on.

/// How instruction and program bodies are scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyGrammar {
    /// A flat run of calls; scanning stops at the first IF or WHILE
    CallsOnly,
    /// Calls plus nested IF, IF/ELSE and WHILE blocks
    Full,
}

/// What happens when an instruction name is defined twice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// The later definition replaces the earlier one
    Overwrite,
    /// Redefinition is a parse error
    Reject,
}

/// Parser configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    pub body_grammar: BodyGrammar,
    pub duplicates: DuplicatePolicy,
    /// Verify the token following an instruction name is `IS`
    pub check_instruction_is: bool,
    /// Refuse instruction names that collide with BL primitives
    pub reject_primitive_names: bool,
    /// Program and instruction names must be plain identifiers
    pub require_identifier_names: bool,
    /// Deepest IF/WHILE nesting accepted by the full grammar
    pub max_nesting_depth: usize,
}

/// Default for [`ParserConfig::max_nesting_depth`]
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 128;

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            body_grammar: BodyGrammar::CallsOnly,
            duplicates: DuplicatePolicy::Overwrite,
            check_instruction_is: false,
            reject_primitive_names: false,
            require_identifier_names: false,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full grammar with every validation enabled
    pub fn strict() -> Self {
        Self {
            body_grammar: BodyGrammar::Full,
            duplicates: DuplicatePolicy::Reject,
            check_instruction_is: true,
            reject_primitive_names: true,
            require_identifier_names: true,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }

    pub fn with_body_grammar(mut self, grammar: BodyGrammar) -> Self {
        self.body_grammar = grammar;
        self
    }

    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    pub fn with_check_instruction_is(mut self, check: bool) -> Self {
        self.check_instruction_is = check;
        self
    }

    pub fn with_reject_primitive_names(mut self, reject: bool) -> Self {
        self.reject_primitive_names = reject;
        self
    }

    pub fn with_require_identifier_names(mut self, require: bool) -> Self {
        self.require_identifier_names = require;
        self
    }

    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }
}
