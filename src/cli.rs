//! Command-line front end: argument list in, exit status out.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::lexer::lex;

/// Crate version, shown by `--version` and the banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit status for a successful run.
pub const EXIT_OK: u8 = 0;
/// Exit status when the lexer rejects the input.
pub const EXIT_SYNTAX: u8 = 1;
/// Exit status for invalid invocation or file access problems.
pub const EXIT_COMMAND: u8 = 2;

/// Invocation or file access problem, distinct from lexer errors.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("[ErrCmd]: File not found: {0}")]
    FileNotFound(String),
    #[error("[ErrCmd]: Not a file: {0}")]
    NotAFile(String),
    #[error("[ErrCmd]: File cannot be read: {path}")]
    Unreadable {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("[ErrCmd]: Unknown command {0}")]
    UnknownCommand(String),
}

/// Run the CLI. `args[0]` is the program name.
///
/// Writes regular output to `out` and diagnostics to `err`, and returns
/// the process exit status. Usage text accompanies only unknown flags;
/// a path that cannot be read reports just its [`CommandError`].
pub fn run<W: Write, E: Write>(args: &[String], out: &mut W, err: &mut E) -> u8 {
    let program = args.first().map_or("qql", String::as_str);

    let result = match args.get(1).map(String::as_str) {
        None => banner(out).and_then(|()| usage(out, program)),
        Some("-h" | "--help") => usage(out, program),
        Some("-v" | "--version") => writeln!(out, "QQL - Version {VERSION}"),
        Some(flag) if flag.starts_with('-') => {
            if let Err(e) = usage(err, program) {
                log::error!("failed to write usage: {e}");
            }
            return report(err, &CommandError::UnknownCommand(flag.to_string()));
        }
        Some(path) => return lex_file(path, out, err),
    };

    match result {
        Ok(()) => EXIT_OK,
        Err(e) => {
            log::error!("failed to write output: {e}");
            EXIT_COMMAND
        }
    }
}

fn banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "QQL - Version {VERSION}")?;
    writeln!(out, "A quick query language for databases, similar to SQL.")
}

fn usage<W: Write>(out: &mut W, program: &str) -> io::Result<()> {
    writeln!(out, "Usage:")?;
    writeln!(out, "{program} [commands] <filename> [args]")?;
    writeln!(out, "Commands:")?;
    writeln!(out, "-h | --help: Show this help message")?;
    writeln!(out, "-v | --version: Show the version of the compiler")
}

fn report<E: Write>(err: &mut E, e: &CommandError) -> u8 {
    log::debug!("command error: {e:?}");
    if let Err(io) = writeln!(err, "{e}") {
        log::error!("failed to write diagnostic: {io}");
    }
    EXIT_COMMAND
}

/// Read a source file, checking that it exists and is a regular file.
///
/// # Errors
///
/// Returns the matching `CommandError` for a missing path, a directory
/// or other non-file, and for I/O or UTF-8 failures while reading.
pub fn read_source(path: &str) -> Result<String, CommandError> {
    let p = Path::new(path);
    if !p.exists() {
        return Err(CommandError::FileNotFound(path.to_string()));
    }
    if !p.is_file() {
        return Err(CommandError::NotAFile(path.to_string()));
    }
    fs::read_to_string(p).map_err(|source| CommandError::Unreadable {
        path: path.to_string(),
        source,
    })
}

fn lex_file<W: Write, E: Write>(path: &str, out: &mut W, err: &mut E) -> u8 {
    let contents = match read_source(path) {
        Ok(c) => c,
        Err(e) => return report(err, &e),
    };

    if contents.is_empty() {
        log::debug!("'{path}' is empty, nothing to lex");
        return EXIT_OK;
    }

    match lex(&contents, path) {
        Ok(tokens) => {
            for token in &tokens {
                if let Err(e) = writeln!(out, "{token}") {
                    log::error!("failed to write output: {e}");
                    return EXIT_COMMAND;
                }
            }
            EXIT_OK
        }
        Err(e) => {
            if let Err(io) = writeln!(err, "{e}") {
                log::error!("failed to write diagnostic: {io}");
            }
            EXIT_SYNTAX
        }
    }
}
