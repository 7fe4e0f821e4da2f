//! CLI driver (`spec.md` §6.2). Explicitly out of scope for the language
//! core per §1 — this module is the thin shell around
//! `Scanner`/`Parser`/`Interpreter` that the core is never responsible
//! for: argument handling, `.yatay` extension canonicalisation, file
//! reading, and exit codes.

use crate::diagnostics::Diagnostics;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::scanner::Scanner;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const EXIT_OK: i32 = 0;
pub const EXIT_USAGE: i32 = 64;
pub const EXIT_STATIC_ERROR: i32 = 65;
pub const EXIT_RUNTIME_ERROR: i32 = 70;

/// Appends the `.yatay` extension if the path is missing it.
pub fn canonicalize_script_path(path: &str) -> PathBuf {
    let candidate = Path::new(path);
    if candidate.extension().and_then(|ext| ext.to_str()) == Some("yatay") {
        candidate.to_path_buf()
    } else {
        PathBuf::from(format!("{}.yatay", path))
    }
}

/// Scans, parses, and (if static analysis succeeded) interprets `source`,
/// writing trace output to `output`. Returns the diagnostics sink so the
/// caller can decide on an exit code.
pub fn run(source: &str, output: &mut impl io::Write) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();

    let tokens = Scanner::new(source).scan_tokens(&mut diagnostics);
    let statements = Parser::new(tokens).parse(&mut diagnostics);

    if !diagnostics.had_static_error() {
        let mut interpreter = Interpreter::new(output, true);
        interpreter.interpret(&statements, &mut diagnostics);
    }

    diagnostics
}

/// Runs the file at `path` (after extension canonicalisation) and returns
/// the process exit code per §6.2/§6.3. File-not-found is reported as a
/// Spanish diagnostic on stdout and exits 0, matching the spec's explicit
/// carve-out for that case.
pub fn run_file(path: &str) -> i32 {
    let script_path = canonicalize_script_path(path);

    let source = match fs::read_to_string(&script_path) {
        Ok(source) => source,
        Err(_) => {
            println!("No se pudo encontrar el archivo: {}", script_path.display());
            return EXIT_OK;
        }
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let diagnostics = run(&source, &mut handle);

    for message in diagnostics.messages() {
        eprintln!("{}", message);
    }

    if diagnostics.had_runtime_error() {
        EXIT_RUNTIME_ERROR
    } else if diagnostics.had_static_error() {
        EXIT_STATIC_ERROR
    } else {
        EXIT_OK
    }
}
