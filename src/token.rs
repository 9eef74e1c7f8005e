use std::fmt;

/// Source location for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// 1-based line the token starts on.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
    /// Byte offset of the first byte of the token text.
    pub start: usize,
    /// Byte offset one past the last byte of the token text.
    pub end: usize,
}

/// Which part of the grammar a keyword belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Statement,
    Datatype,
    Function,
    WordOperator,
}

/// Reserved words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // statements
    If,
    Elsif,
    Else,
    While,
    For,
    Do,
    Stop,
    Pass,
    Return,
    Quit,
    Generate,
    Append,
    Delete,
    Change,
    Help,
    Regexp,
    /// Only reserved when `LexOptions::reserve_then` is set.
    Then,

    // datatypes
    Int,
    Float,
    String,
    Boolean,
    Date,
    Time,
    Datetime,
    Timestamp,
    Blob,
    Empty,
    Array,
    Object,
    Table,
    Database,
    Func,
    Proc,
    Class,
    Enum,
    Union,

    // builtin functions
    Count,
    Total,
    Avrg,
    Min,
    Max,
    Group,
    Sort,
    Asc,
    Desc,
    Limit,

    // word operators
    And,
    Or,
}

impl Keyword {
    /// Every keyword, in declaration order.
    pub const ALL: [Self; 48] = [
        Self::If,
        Self::Elsif,
        Self::Else,
        Self::While,
        Self::For,
        Self::Do,
        Self::Stop,
        Self::Pass,
        Self::Return,
        Self::Quit,
        Self::Generate,
        Self::Append,
        Self::Delete,
        Self::Change,
        Self::Help,
        Self::Regexp,
        Self::Then,
        Self::Int,
        Self::Float,
        Self::String,
        Self::Boolean,
        Self::Date,
        Self::Time,
        Self::Datetime,
        Self::Timestamp,
        Self::Blob,
        Self::Empty,
        Self::Array,
        Self::Object,
        Self::Table,
        Self::Database,
        Self::Func,
        Self::Proc,
        Self::Class,
        Self::Enum,
        Self::Union,
        Self::Count,
        Self::Total,
        Self::Avrg,
        Self::Min,
        Self::Max,
        Self::Group,
        Self::Sort,
        Self::Asc,
        Self::Desc,
        Self::Limit,
        Self::And,
        Self::Or,
    ];

    /// The canonical spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::If => "if",
            Self::Elsif => "elsif",
            Self::Else => "else",
            Self::While => "while",
            Self::For => "for",
            Self::Do => "do",
            Self::Stop => "stop",
            Self::Pass => "pass",
            Self::Return => "return",
            Self::Quit => "quit",
            Self::Generate => "generate",
            Self::Append => "append",
            Self::Delete => "delete",
            Self::Change => "change",
            Self::Help => "help",
            Self::Regexp => "regexp",
            Self::Then => "then",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Time => "time",
            Self::Datetime => "datetime",
            Self::Timestamp => "timestamp",
            Self::Blob => "blob",
            Self::Empty => "empty",
            Self::Array => "array",
            Self::Object => "object",
            Self::Table => "table",
            Self::Database => "database",
            Self::Func => "func",
            Self::Proc => "proc",
            Self::Class => "class",
            Self::Enum => "enum",
            Self::Union => "union",
            Self::Count => "count",
            Self::Total => "total",
            Self::Avrg => "avrg",
            Self::Min => "min",
            Self::Max => "max",
            Self::Group => "group",
            Self::Sort => "sort",
            Self::Asc => "asc",
            Self::Desc => "desc",
            Self::Limit => "limit",
            Self::And => "and",
            Self::Or => "or",
        }
    }

    /// Exact, case-sensitive lookup. Returns `None` for anything that is
    /// not a keyword spelling, including prefixes of one.
    #[must_use]
    pub fn from_lexeme(text: &str) -> Option<Self> {
        let kw = match text {
            "if" => Self::If,
            "elsif" => Self::Elsif,
            "else" => Self::Else,
            "while" => Self::While,
            "for" => Self::For,
            "do" => Self::Do,
            "stop" => Self::Stop,
            "pass" => Self::Pass,
            "return" => Self::Return,
            "quit" => Self::Quit,
            "generate" => Self::Generate,
            "append" => Self::Append,
            "delete" => Self::Delete,
            "change" => Self::Change,
            "help" => Self::Help,
            "regexp" => Self::Regexp,
            "then" => Self::Then,
            "int" => Self::Int,
            "float" => Self::Float,
            "string" => Self::String,
            "boolean" => Self::Boolean,
            "date" => Self::Date,
            "time" => Self::Time,
            "datetime" => Self::Datetime,
            "timestamp" => Self::Timestamp,
            "blob" => Self::Blob,
            "empty" => Self::Empty,
            "array" => Self::Array,
            "object" => Self::Object,
            "table" => Self::Table,
            "database" => Self::Database,
            "func" => Self::Func,
            "proc" => Self::Proc,
            "class" => Self::Class,
            "enum" => Self::Enum,
            "union" => Self::Union,
            "count" => Self::Count,
            "total" => Self::Total,
            "avrg" => Self::Avrg,
            "min" => Self::Min,
            "max" => Self::Max,
            "group" => Self::Group,
            "sort" => Self::Sort,
            "asc" => Self::Asc,
            "desc" => Self::Desc,
            "limit" => Self::Limit,
            "and" => Self::And,
            "or" => Self::Or,
            _ => return None,
        };
        Some(kw)
    }

    #[must_use]
    pub const fn category(self) -> KeywordCategory {
        match self {
            Self::If
            | Self::Elsif
            | Self::Else
            | Self::While
            | Self::For
            | Self::Do
            | Self::Stop
            | Self::Pass
            | Self::Return
            | Self::Quit
            | Self::Generate
            | Self::Append
            | Self::Delete
            | Self::Change
            | Self::Help
            | Self::Regexp
            | Self::Then => KeywordCategory::Statement,
            Self::Int
            | Self::Float
            | Self::String
            | Self::Boolean
            | Self::Date
            | Self::Time
            | Self::Datetime
            | Self::Timestamp
            | Self::Blob
            | Self::Empty
            | Self::Array
            | Self::Object
            | Self::Table
            | Self::Database
            | Self::Func
            | Self::Proc
            | Self::Class
            | Self::Enum
            | Self::Union => KeywordCategory::Datatype,
            Self::Count
            | Self::Total
            | Self::Avrg
            | Self::Min
            | Self::Max
            | Self::Group
            | Self::Sort
            | Self::Asc
            | Self::Desc
            | Self::Limit => KeywordCategory::Function,
            Self::And | Self::Or => KeywordCategory::WordOperator,
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Symbolic operators. `and`/`or` are keywords, not operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `=`
    Eq,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    LtEq,
    /// `>=`
    GtEq,
    /// `!=`
    NotEq,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `!`
    Bang,
    /// `->`
    Arrow,
}

impl Operator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::NotEq => "!=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Bang => "!",
            Self::Arrow => "->",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single-character punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Punctuation {
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
    Comma,
    Semicolon,
    Colon,
    Dot,
}

impl Punctuation {
    #[must_use]
    pub const fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'(' => Some(Self::OpenParen),
            b')' => Some(Self::CloseParen),
            b'[' => Some(Self::OpenBracket),
            b']' => Some(Self::CloseBracket),
            b'{' => Some(Self::OpenBrace),
            b'}' => Some(Self::CloseBrace),
            b',' => Some(Self::Comma),
            b';' => Some(Self::Semicolon),
            b':' => Some(Self::Colon),
            b'.' => Some(Self::Dot),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenParen => "(",
            Self::CloseParen => ")",
            Self::OpenBracket => "[",
            Self::CloseBracket => "]",
            Self::OpenBrace => "{",
            Self::CloseBrace => "}",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Colon => ":",
            Self::Dot => ".",
        }
    }
}

impl fmt::Display for Punctuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Reserved word, see [`Keyword`].
    Keyword(Keyword),
    /// Any other word.
    Identifier,
    /// Digits only (`42`).
    IntLiteral,
    /// Digits, a dot, digits (`3.14`).
    FloatLiteral,
    /// Double-quoted string. `value` has escapes decoded.
    StringLiteral { value: String },
    Operator(Operator),
    Punctuation(Punctuation),
    /// Always the last token of a successful pass.
    EndOfInput,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(kw) => write!(f, "Keyword({kw:?})"),
            Self::Identifier => f.write_str("Identifier"),
            Self::IntLiteral => f.write_str("IntLiteral"),
            Self::FloatLiteral => f.write_str("FloatLiteral"),
            Self::StringLiteral { .. } => f.write_str("StringLiteral"),
            Self::Operator(_) => f.write_str("Operator"),
            Self::Punctuation(_) => f.write_str("Punctuation"),
            Self::EndOfInput => f.write_str("EndOfInput"),
        }
    }
}

/// A single token with its kind, source text, and location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source text. For string literals this is the raw text
    /// between the quotes.
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub const fn line(&self) -> usize {
        self.span.line
    }

    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::EndOfInput)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {}", self.span.line, self.span.column, self.kind)?;
        match self.kind {
            TokenKind::EndOfInput => Ok(()),
            TokenKind::StringLiteral { .. } => write!(f, " \"{}\"", self.lexeme),
            _ => write!(f, " {}", self.lexeme),
        }
    }
}
