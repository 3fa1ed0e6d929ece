use std::fmt;

/// What went wrong while reading `.mkml` markup.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    UnexpectedChar(char),
    UnterminatedString,
    InvalidNumber(String),
    /// A number followed by a suffix other than `px`, `dp`, `dip` or `sp`.
    UnknownUnit(String),
    /// The parser wanted `expected` and found the described token.
    Expected { expected: &'static str, found: String },
    UnclosedBlock,
    /// Blocks nested deeper than the parser's limit.
    TooDeep { limit: usize },
    /// Tokens left over after the root widget.
    TrailingInput(String),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::UnexpectedChar(c) => write!(f, "unexpected character {c:?}"),
            ErrorKind::UnterminatedString => f.write_str("unterminated string literal"),
            ErrorKind::InvalidNumber(n) => write!(f, "invalid number {n:?}"),
            ErrorKind::UnknownUnit(u) => write!(f, "unknown dimension unit {u:?} (expected px, dp or sp)"),
            ErrorKind::Expected { expected, found } => write!(f, "expected {expected}, found {found}"),
            ErrorKind::UnclosedBlock => f.write_str("unclosed '{' block"),
            ErrorKind::TooDeep { limit } => write!(f, "widgets nested more than {limit} levels deep"),
            ErrorKind::TrailingInput(found) => write!(f, "unexpected {found} after the root widget"),
        }
    }
}

/// A markup error with the 1-based position it was detected at.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ErrorKind,
    pub line: usize,
    pub col: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mkml parse error at {}:{}: {}", self.line, self.col, self.kind)
    }
}

impl std::error::Error for ParseError {}
