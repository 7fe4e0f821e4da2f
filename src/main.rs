//! Yatay — a small Spanish-keyword scripting language for teaching.
//!
//! This binary is the CLI entry point only (`spec.md` §1, §6.2): argument
//! handling, file reading, and exit codes. The language core — scanner,
//! parser, interpreter — lives in `src/scanner.rs`, `src/parser.rs`, and
//! `src/interpreter.rs` and never touches the filesystem or process state
//! directly.

mod ast;
mod diagnostics;
mod driver;
mod environment;
mod error;
mod interpreter;
mod parser;
mod scanner;
mod token;
mod value;

use std::env;
use std::process;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let exit_code = match args.as_slice() {
        [] => {
            println!("interactive shell not yet implemented");
            driver::EXIT_OK
        }
        [path] => driver::run_file(path),
        _ => {
            eprintln!("Uso: yatay [script]");
            driver::EXIT_USAGE
        }
    };

    process::exit(exit_code);
}
