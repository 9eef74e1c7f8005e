use std::fmt;

use crate::token::{Keyword, Operator, Punctuation, Span, Token, TokenKind};

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Character that cannot start any token.
    UnexpectedCharacter(char),
    /// Double-quoted string with no closing quote on the same line.
    UnterminatedString,
    /// Number followed by a dangling `.` (`1.`) or by a letter or `_`.
    ///
    /// A digit run never splits into a number and a word, so `10and`
    /// and `12abc` are rejected here instead of lexing as two tokens.
    MalformedNumber,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter(ch) => {
                write!(f, "unknown character '{ch}'")
            }
            Self::UnterminatedString => {
                write!(f, "unterminated string literal")
            }
            Self::MalformedNumber => {
                write!(f, "malformed number literal")
            }
        }
    }
}

/// Error produced during lexing.
///
/// `remainder` is the unscanned source starting at the offending
/// position, kept for display.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "file '{file}', at line {line}:\n{remainder}\n[ErrSyntax]: {kind} at line {line}",
    line = span.line
)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
    pub file: String,
    pub remainder: String,
}

/// Switches for the decisions the QQL keyword table leaves open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexOptions {
    /// Lex `then` as [`Keyword::Then`] instead of an identifier.
    pub reserve_then: bool,
    /// Match keywords ignoring ASCII case. Lexemes keep their spelling.
    pub case_insensitive_keywords: bool,
}

/// Lex QQL source into tokens ending with [`TokenKind::EndOfInput`],
/// using the default [`LexOptions`].
///
/// `filename` is only used in diagnostics.
///
/// # Errors
///
/// Returns `LexError` for the first character that cannot start a
/// token, an unterminated string, or a malformed number. No tokens are
/// returned in that case.
pub fn lex(source: &str, filename: &str) -> Result<Vec<Token>, LexError> {
    lex_with(source, filename, &LexOptions::default())
}

/// Like [`lex`] with explicit options.
pub fn lex_with(
    source: &str,
    filename: &str,
    options: &LexOptions,
) -> Result<Vec<Token>, LexError> {
    Lexer::new(source, filename, *options).tokenize()
}

struct Lexer<'a> {
    source: &'a str,
    input: &'a [u8],
    file: &'a str,
    options: LexOptions,
    pos: usize,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str, file: &'a str, options: LexOptions) -> Self {
        let bytes = source.as_bytes();
        let start = if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
            3
        } else {
            0
        };
        Self {
            source,
            input: bytes,
            file,
            options,
            pos: start,
            line: 1,
            col: 1,
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        log::debug!("lexing '{}' ({} bytes)", self.file, self.input.len());
        let mut tokens = Vec::new();

        loop {
            self.skip_trivia();

            let Some(ch) = self.peek() else {
                tokens.push(Token {
                    kind: TokenKind::EndOfInput,
                    lexeme: String::new(),
                    span: self.span_from(self.pos),
                });
                break;
            };

            let token = match ch {
                b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.read_word(),
                b'0'..=b'9' => self.read_number()?,
                b'"' => self.read_string()?,
                b'=' | b'<' | b'>' | b'!' | b'+' | b'-' | b'*' | b'/' | b'%' => {
                    self.read_operator(ch)
                }
                _ => match Punctuation::from_byte(ch) {
                    Some(p) => self.single(TokenKind::Punctuation(p)),
                    None => {
                        let unexpected = self.source[self.pos..]
                            .chars()
                            .next()
                            .unwrap_or(char::REPLACEMENT_CHARACTER);
                        let mut span = self.span_from(self.pos);
                        span.end += unexpected.len_utf8();
                        return Err(self.error(LexErrorKind::UnexpectedCharacter(unexpected), span));
                    }
                },
            };

            log::trace!("{token}");
            tokens.push(token);
        }

        log::debug!("lexed '{}' into {} tokens", self.file, tokens.len());
        Ok(tokens)
    }

    fn error(&self, kind: LexErrorKind, span: Span) -> LexError {
        log::debug!("syntax error in '{}' at line {}: {kind}", self.file, span.line);
        LexError {
            kind,
            span,
            file: self.file.to_string(),
            remainder: self.source[span.start..].to_string(),
        }
    }

    /// Span beginning at `start` on the current line and column and
    /// ending at the current position.
    const fn span_from(&self, start: usize) -> Span {
        Span {
            line: self.line,
            column: self.col,
            start,
            end: self.pos,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    fn advance(&mut self) {
        if let Some(&b) = self.input.get(self.pos) {
            if b == b'\n' {
                self.line += 1;
                self.col = 1;
            } else if (b & 0xC0) != 0x80 {
                // continuation bytes belong to the previous character
                self.col += 1;
            }
            self.pos += 1;
        }
    }

    fn skip_trivia(&mut self) {
        while let Some(ch) = self.peek() {
            match ch {
                b' ' | b'\t' | b'\r' | b'\n' | 0x0C => self.advance(),
                b'#' => {
                    while self.peek().is_some_and(|c| c != b'\n') {
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// Consume one byte as a token of `kind`.
    fn single(&mut self, kind: TokenKind) -> Token {
        let (line, column, start) = (self.line, self.col, self.pos);
        self.advance();
        self.finish(kind, line, column, start)
    }

    fn finish(&self, kind: TokenKind, line: usize, column: usize, start: usize) -> Token {
        Token {
            kind,
            lexeme: self.source[start..self.pos].to_string(),
            span: Span {
                line,
                column,
                start,
                end: self.pos,
            },
        }
    }

    fn read_word(&mut self) -> Token {
        let (line, column, start) = (self.line, self.col, self.pos);

        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == b'_')
        {
            self.advance();
        }

        let text = &self.source[start..self.pos];
        let kind = match self.keyword(text) {
            Some(kw) => TokenKind::Keyword(kw),
            None => TokenKind::Identifier,
        };
        self.finish(kind, line, column, start)
    }

    fn keyword(&self, text: &str) -> Option<Keyword> {
        let kw = if self.options.case_insensitive_keywords {
            Keyword::from_lexeme(&text.to_ascii_lowercase())
        } else {
            Keyword::from_lexeme(text)
        }?;

        if kw == Keyword::Then && !self.options.reserve_then {
            return None;
        }
        Some(kw)
    }

    fn read_number(&mut self) -> Result<Token, LexError> {
        let (line, column, start) = (self.line, self.col, self.pos);
        self.skip_digits();

        let mut kind = TokenKind::IntLiteral;
        if self.peek() == Some(b'.') {
            if !self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
                return Err(self.malformed_number(line, column, start));
            }
            self.advance(); // skip dot
            self.skip_digits();
            kind = TokenKind::FloatLiteral;
        }

        if self
            .peek()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == b'_')
        {
            self.advance();
            return Err(self.malformed_number(line, column, start));
        }

        Ok(self.finish(kind, line, column, start))
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn malformed_number(&self, line: usize, column: usize, start: usize) -> LexError {
        self.error(
            LexErrorKind::MalformedNumber,
            Span {
                line,
                column,
                start,
                end: self.pos,
            },
        )
    }

    fn read_string(&mut self) -> Result<Token, LexError> {
        let (line, column, start) = (self.line, self.col, self.pos);
        self.advance(); // skip opening quote
        let body_start = self.pos;

        loop {
            match self.peek() {
                None | Some(b'\n') => {
                    return Err(self.error(
                        LexErrorKind::UnterminatedString,
                        Span {
                            line,
                            column,
                            start,
                            end: self.pos,
                        },
                    ));
                }
                Some(b'\\') => {
                    self.advance();
                    // a backslash does not escape a line break
                    if self.peek().is_some_and(|c| c != b'\n') {
                        self.advance();
                    }
                }
                Some(b'"') => break,
                Some(_) => self.advance(),
            }
        }

        let raw = &self.source[body_start..self.pos];
        self.advance(); // skip closing quote

        Ok(Token {
            kind: TokenKind::StringLiteral {
                value: unescape(raw),
            },
            lexeme: raw.to_string(),
            span: Span {
                line,
                column,
                start,
                end: self.pos,
            },
        })
    }

    fn read_operator(&mut self, first: u8) -> Token {
        let (line, column, start) = (self.line, self.col, self.pos);

        let double = match (first, self.peek_at(1)) {
            (b'<', Some(b'=')) => Some(Operator::LtEq),
            (b'>', Some(b'=')) => Some(Operator::GtEq),
            (b'!', Some(b'=')) => Some(Operator::NotEq),
            (b'-', Some(b'>')) => Some(Operator::Arrow),
            _ => None,
        };

        let op = if let Some(op) = double {
            self.advance();
            self.advance();
            op
        } else {
            self.advance();
            match first {
                b'=' => Operator::Eq,
                b'<' => Operator::Lt,
                b'>' => Operator::Gt,
                b'!' => Operator::Bang,
                b'+' => Operator::Plus,
                b'-' => Operator::Minus,
                b'*' => Operator::Star,
                b'/' => Operator::Slash,
                _ => Operator::Percent,
            }
        };

        self.finish(TokenKind::Operator(op), line, column, start)
    }
}

/// Decode the escapes of a raw string literal body. Unknown escapes are
/// kept verbatim, backslash included.
fn unescape(raw: &str) -> String {
    let mut value = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => value.push('\n'),
            Some('t') => value.push('\t'),
            Some('r') => value.push('\r'),
            Some('"') => value.push('"'),
            Some('\\') => value.push('\\'),
            Some(other) => {
                value.push('\\');
                value.push(other);
            }
            None => value.push('\\'),
        }
    }
    value
}
