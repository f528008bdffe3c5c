pub mod ast;
pub mod config;
pub mod errors;
pub mod program;
pub mod statements;

pub use ast::*;
pub use config::*;
pub use errors::*;
pub use program::{parse_source, parse_tokens, Parser};
