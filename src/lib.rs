//! BL Language Parser
//!
//! A parser for BL, a small block-structured teaching language made of
//! a `PROGRAM` with user-defined `INSTRUCTION`s and a main body of calls,
//! conditionals and loops.

pub mod lexer;
pub mod parser;
pub mod printer;
pub mod symbol;

pub use lexer::*;
pub use parser::*;
pub use printer::*;
pub use symbol::*;
