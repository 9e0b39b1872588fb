//! Error types for xmlmap
//!
//! Every failure is fatal: parsing stops at the first error, which is recorded
//! with the offending tag text and the line the tag starts on.

use std::fmt;
use thiserror::Error;

/// Broad error category, printed as the leading word of a formatted error
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Parse,
    Serialize,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse => write!(f, "Parse"),
            Self::Serialize => write!(f, "Serialize"),
        }
    }
}

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedTag,
    MalformedSpecialTag,
    MalformedProcessingInstruction,
    MalformedDoctype,
    MismatchedClosingTag,
    MissingClosingTag,
    UnclosedComment,
    UnclosedCData,
    UnclosedDtd,
    MultipleTopLevelNodes,
    MaxDepthExceeded { max: u16 },
    MissingRootName,
    InvalidName { name: String },
}

impl ErrorKind {
    pub const fn category(&self) -> Category {
        match self {
            Self::MissingRootName | Self::InvalidName { .. } => Category::Serialize,
            _ => Category::Parse,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedTag => write!(f, "malformed tag"),
            Self::MalformedSpecialTag => write!(f, "malformed special tag"),
            Self::MalformedProcessingInstruction => {
                write!(f, "malformed processor instruction")
            }
            Self::MalformedDoctype => write!(f, "malformed DOCTYPE"),
            Self::MismatchedClosingTag => write!(f, "mismatched closing tag"),
            Self::MissingClosingTag => write!(f, "missing closing tag"),
            Self::UnclosedComment => write!(f, "unclosed comment"),
            Self::UnclosedCData => write!(f, "unclosed CDATA"),
            Self::UnclosedDtd => write!(f, "unclosed DTD"),
            Self::MultipleTopLevelNodes => write!(f, "only one top-level node allowed"),
            Self::MaxDepthExceeded { max } => write!(f, "max depth exceeded: {max}"),
            Self::MissingRootName => {
                write!(f, "no root name given and tree has no single top-level key")
            }
            Self::InvalidName { name } => write!(f, "invalid tag name: {name}"),
        }
    }
}

/// Main error type for xmlmap
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    tag: String,
    line: Option<usize>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            tag: String::new(),
            line: None,
        }
    }

    /// Create a parse error for `tag`, locating it in `source`.
    ///
    /// `consumed` is the byte offset the scanner had reached when the error was
    /// raised. Newlines inside the offending tag text are subtracted so the line
    /// points at the start of a multi-line tag, not its end.
    pub fn at(kind: ErrorKind, source: &str, consumed: usize, tag: &str) -> Self {
        let line = line_number(source, consumed, tag);
        Self {
            message: kind.to_string(),
            kind,
            tag: tag.to_string(),
            line: Some(line),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Text of the tag that triggered the error, without the angle brackets
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Error: {}", self.kind.category(), self.message)?;
        if let Some(line) = self.line {
            write!(f, " on line {line}")?;
        }
        if !self.tag.is_empty() {
            write!(f, ": {}", self.tag)?;
        }
        Ok(())
    }
}

/// Result type alias for xmlmap
pub type Result<T> = std::result::Result<T, Error>;

/// One-based line number of a tag, given how far the scan had progressed.
pub fn line_number(source: &str, consumed: usize, tag: &str) -> usize {
    let consumed = source.get(..consumed).unwrap_or(source);
    let seen = memchr::memchr_iter(b'\n', consumed.as_bytes()).count();
    let inside = memchr::memchr_iter(b'\n', tag.as_bytes()).count();
    (seen + 1).saturating_sub(inside).max(1)
}

/// Accumulates the errors of a parse pass
#[derive(Clone, Debug, Default)]
pub struct ErrorLog {
    errors: Vec<Error>,
}

impl ErrorLog {
    /// Record an error and hand it back so the caller can raise it
    pub fn record(&mut self, error: Error) -> Error {
        tracing::warn!(line = ?error.line(), "{error}");
        self.errors.push(error.clone());
        error
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn last(&self) -> Option<&Error> {
        self.errors.last()
    }

    /// Formatted message of the most recent error
    pub fn last_message(&self) -> Option<String> {
        self.last().map(ToString::to_string)
    }
}
