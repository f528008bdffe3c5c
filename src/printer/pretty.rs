use std::fmt;

use crate::parser::{Block, Program, Statement};
use crate::printer::PrinterConfig;

/// Renders parsed programs back to canonical BL source
pub struct PrettyPrinter {
    output: String,
    indent_level: usize,
    config: PrinterConfig,
}

impl PrettyPrinter {
    pub fn new(config: PrinterConfig) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            config,
        }
    }

    /// Take the rendered text
    pub fn finish(self) -> String {
        self.output
    }

    fn indent(&mut self) {
        self.indent_level += 1;
    }

    fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    fn line(&mut self, text: &str) {
        let width = self.indent_level * self.config.indent_width;
        self.output.extend(std::iter::repeat(' ').take(width));
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn blank_line(&mut self) {
        self.output.push('\n');
    }

    /// Render a whole program
    pub fn print_program(&mut self, program: &Program) {
        self.line(&format!("PROGRAM {} IS", program.name));
        self.blank_line();

        self.indent();
        for (name, body) in &program.instructions {
            self.line(&format!("INSTRUCTION {} IS", name));
            self.print_nested(body);
            self.line(&format!("END {}", name));
            self.blank_line();
        }
        self.dedent();

        self.line("BEGIN");
        self.print_nested(&program.body);
        self.line(&format!("END {}", program.name));
    }

    /// Render each statement of a block at the current indentation
    pub fn print_block(&mut self, block: &Block) {
        for stmt in block {
            self.print_statement(stmt);
        }
    }

    /// Render a statement at the current indentation
    pub fn print_statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Call(name) => self.line(name),
            Statement::If { condition, body } => {
                self.line(&format!("IF {} THEN", condition));
                self.print_nested(body);
                self.line("END IF");
            }
            Statement::IfElse {
                condition,
                then_block,
                else_block,
            } => {
                self.line(&format!("IF {} THEN", condition));
                self.print_nested(then_block);
                self.line("ELSE");
                self.print_nested(else_block);
                self.line("END IF");
            }
            Statement::While { condition, body } => {
                self.line(&format!("WHILE {} DO", condition));
                self.print_nested(body);
                self.line("END WHILE");
            }
        }
    }

    fn print_nested(&mut self, block: &Block) {
        self.indent();
        self.print_block(block);
        self.dedent();
    }
}

/// Render a program with the given layout settings
#[tracing::instrument(skip_all, fields(program = %program.name))]
pub fn pretty_print(program: &Program, config: &PrinterConfig) -> String {
    let mut printer = PrettyPrinter::new(config.clone());
    printer.print_program(program);
    printer.finish()
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&pretty_print(self, &PrinterConfig::default()))
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut printer = PrettyPrinter::new(PrinterConfig::default());
        printer.print_statement(self);
        f.write_str(&printer.finish())
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut printer = PrettyPrinter::new(PrinterConfig::default());
        printer.print_block(self);
        f.write_str(&printer.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Condition;

    #[test]
    fn test_empty_program_layout() {
        let program = Program::new("p");
        assert_eq!(program.to_string(), "PROGRAM p IS\n\nBEGIN\nEND p\n");
    }

    #[test]
    fn test_instruction_layout() {
        let mut program = Program::new("Walk");
        let mut step = Block::new();
        step.add_call("move");
        step.add_call("turnleft");
        program.instructions.insert("step".to_string(), step);
        program.body.add_call("step");

        let expected = "\
PROGRAM Walk IS

  INSTRUCTION step IS
    move
    turnleft
  END step

BEGIN
  step
END Walk
";
        assert_eq!(program.to_string(), expected);
    }

    #[test]
    fn test_nested_statement_layout() {
        let stmt = Statement::While {
            condition: Condition::True,
            body: Block::from(vec![Statement::IfElse {
                condition: Condition::NextIsEnemy,
                then_block: Block::from(vec![Statement::call("infect")]),
                else_block: Block::from(vec![Statement::call("move")]),
            }]),
        };

        let expected = "\
WHILE true DO
  IF next-is-enemy THEN
    infect
  ELSE
    move
  END IF
END WHILE
";
        assert_eq!(stmt.to_string(), expected);
    }

    #[test]
    fn test_indent_width_is_configurable() {
        let mut program = Program::new("p");
        program.body.add_call("skip");
        let text = pretty_print(&program, &PrinterConfig::new().with_indent_width(4));
        assert!(text.contains("\n    skip\n"));
    }
}
