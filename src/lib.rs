//! Lexer and command-line front end for QQL, a quick query language
//! for databases with SQL-like semantics.
//!
//! # Quick start
//!
//! ```
//! use qql::{Keyword, Punctuation, TokenKind, lex};
//!
//! let tokens = lex("generate database.users (id int)", "schema.qql").unwrap();
//! assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::Generate));
//! assert_eq!(tokens[2].kind, TokenKind::Punctuation(Punctuation::Dot));
//! assert!(tokens.last().unwrap().is_eof());
//! ```
//!
//! Errors carry the file name, position, and the rest of the source:
//!
//! ```
//! use qql::{LexErrorKind, lex};
//!
//! let err = lex("id @ 1", "query.qql").unwrap_err();
//! assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter('@'));
//! assert_eq!(err.span.line, 1);
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod cli;
pub mod lexer;
pub mod token;

pub use cli::{CommandError, run};
pub use lexer::{LexError, LexErrorKind, LexOptions, lex, lex_with};
pub use token::{Keyword, KeywordCategory, Operator, Punctuation, Span, Token, TokenKind};

/// Unified error type covering lexing and command failures.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A syntax error from the lexer.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// An invocation or file access error.
    #[error("{0}")]
    Command(#[from] CommandError),
}

/// Read `path` and lex its contents with the given options.
pub fn lex_file(path: &str, options: &LexOptions) -> Result<Vec<Token>, Error> {
    let source = cli::read_source(path)?;
    Ok(lex_with(&source, path, options)?)
}
