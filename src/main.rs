//! Lox front end
//!
//! Scans Lox source into tokens and parses expressions.

mod driver;
mod frontend;
mod utils;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process;

use frontend::lexer::Scanner;

/// Lox scanner and expression parser
#[derive(Parser, Debug)]
#[command(name = "lox")]
#[command(version)]
#[command(about = "Scan and parse Lox source files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the tokens of a source file
    Tokenize {
        /// Input source file
        input: PathBuf,

        /// Print one JSON object per token
        #[arg(long)]
        json: bool,
    },
    /// Parse a source file and print each expression
    Parse {
        /// Input source file
        input: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(status) => process::exit(status),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<i32> {
    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();

    match &cli.command {
        Commands::Tokenize { input, json } => {
            let scanner = open(input)?;
            driver::tokenize(scanner, *json, &mut out, &mut err)
        }
        Commands::Parse { input } => {
            let scanner = open(input)?;
            driver::parse(scanner, &mut out, &mut err)
        }
    }
}

fn open(input: &PathBuf) -> Result<Scanner> {
    Scanner::open(input).with_context(|| format!("cannot scan {}", input.display()))
}
