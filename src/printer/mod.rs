pub mod pretty;

pub use pretty::*;

/// Layout settings for the pretty-printer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterConfig {
    /// Number of spaces per indentation level
    pub indent_width: usize,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self { indent_width: 2 }
    }
}

impl PrinterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }
}
