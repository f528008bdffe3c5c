use anyhow::{Context, Result};
use bl_rust::lexer::tokenize;
use bl_rust::parser::{Parser, ParserConfig, Program};
use bl_rust::printer::{pretty_print, PrinterConfig};
use clap::{Parser as ClapParser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(ClapParser)]
#[command(name = "bl-rust")]
#[command(about = "Parser for the BL teaching language", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize the input file and print tokens
    Lex {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Parse the input file and pretty-print the program
    Parse {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Parse nested IF/WHILE blocks and enable every validation
        #[arg(short, long)]
        strict: bool,

        /// Spaces per indentation level
        #[arg(short, long, value_name = "N", default_value = "2")]
        indent: usize,
    },
    /// Parse the input file and print a one-line summary
    Check {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Parse nested IF/WHILE blocks and enable every validation
        #[arg(short, long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Lex { file } => lex_file(&file)?,
        Commands::Parse { file, strict, indent } => {
            let program = parse_file(&file, strict)?;
            print!("{}", pretty_print(&program, &PrinterConfig::new().with_indent_width(indent)));
        }
        Commands::Check { file, strict } => {
            let program = parse_file(&file, strict)?;
            println!(
                "{}: program '{}' with {} instruction(s) and {} body statement(s)",
                file.display(),
                program.name,
                program.instructions.len(),
                program.body.len()
            );
        }
    }

    Ok(())
}

fn lex_file(path: &Path) -> Result<()> {
    let input = fs::read_to_string(path)
        .with_context(|| format!("failed to read file '{}'", path.display()))?;

    let tokens = tokenize(&input)
        .with_context(|| format!("failed to tokenize '{}'", path.display()))?;

    for token in &tokens {
        println!(
            "{}:{}:{} {:?} {}",
            path.display(),
            token.pos.line,
            token.pos.column,
            token.kind,
            token.lexeme
        );
    }

    println!("\nTotal tokens: {}", tokens.len());

    Ok(())
}

fn parse_file(path: &Path, strict: bool) -> Result<Program> {
    let input = fs::read_to_string(path)
        .with_context(|| format!("failed to read file '{}'", path.display()))?;

    let tokens = tokenize(&input)
        .with_context(|| format!("failed to tokenize '{}'", path.display()))?;

    let config = if strict {
        ParserConfig::strict()
    } else {
        ParserConfig::default()
    };

    let mut parser = Parser::with_config(tokens, config);
    parser
        .parse_program()
        .with_context(|| format!("failed to parse '{}'", path.display()))
}
