//! Tag lexer
//!
//! Splits the source into `(preceding text, tag)` tokens. A tag is the region
//! between a `<` and the next `>`; comments, CDATA sections and inline DOCTYPEs
//! may contain `>` themselves and are extended by the sub-scanners in
//! [`special`] until their real terminator.
//!
//! Text after the last tag is never yielded.

pub mod cursor;
pub mod special;
pub mod token;

pub use cursor::Cursor;
pub use token::{Token, TokenKind};

use crate::error::{Error, ErrorKind, Result};

/// Stateful lexer producing [`Token`]s
#[derive(Clone, Debug)]
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Lexer<'a> {
    pub const fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Offset up to which the source has been consumed
    pub const fn position(&self) -> usize {
        self.cursor.pos()
    }

    /// Scan the next tag, or `None` once no further `<...>` region exists.
    pub fn next_token(&mut self) -> Result<Option<Token<'a>>> {
        let start = self.cursor.pos();
        let Some(open) = self.cursor.find(b'<') else {
            return Ok(None);
        };
        let Some(close) = self.cursor.find_from(open + 1, b'>') else {
            return Ok(None);
        };

        let text = self.cursor.slice(start, open);
        let body = self.cursor.slice(open + 1, close);
        self.cursor.advance_to(close + 1);

        let (raw, kind) = if special::is_special(body) {
            special::scan(&mut self.cursor, open, body)?
        } else {
            (body, self.standard(body)?)
        };

        Ok(Some(Token {
            text,
            raw,
            kind,
            start: open,
            end: self.cursor.pos(),
        }))
    }

    /// Build an error located at the current scan position
    pub fn error(&self, kind: ErrorKind, tag: &str) -> Error {
        Error::at(kind, self.cursor.source(), self.cursor.pos(), tag)
    }

    fn standard(&self, body: &'a str) -> Result<TokenKind<'a>> {
        let trimmed = body.trim_start();
        let (closing, rest) = match trimmed.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let name_end = rest
            .find(|c: char| c.is_whitespace() || c == '/')
            .unwrap_or(rest.len());
        let (name, remainder) = rest.split_at(name_end);
        if !is_valid_name(name) {
            return Err(self.error(ErrorKind::MalformedTag, body));
        }

        if closing {
            if !remainder.trim().is_empty() {
                return Err(self.error(ErrorKind::MalformedTag, body));
            }
            return Ok(TokenKind::Close { name });
        }

        let remainder = remainder.trim_end();
        let (attributes, self_closing) = match remainder.strip_suffix('/') {
            Some(attributes) => (attributes.trim_end(), true),
            None => (remainder, false),
        };

        Ok(TokenKind::Open {
            name,
            attributes,
            self_closing,
        })
    }
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || matches!(c, '_' | ':')
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.')
}

/// Whether `name` can be used as a tag or attribute name
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_name_start(first) => chars.all(is_name_char),
        _ => false,
    }
}
