//! Sub-scanners for processing instructions, comments, DOCTYPEs and CDATA
//!
//! A comment, CDATA payload or inline DOCTYPE subset may contain `>`, so the
//! first `<...>` region is only a candidate. These scanners keep swallowing the
//! next `>`-terminated segment until the construct's own terminator shows up.
//! Each round consumes at least one byte, so an unterminated construct fails
//! once the source is exhausted.

use tracing::trace;

use super::cursor::Cursor;
use super::is_valid_name;
use super::token::TokenKind;
use crate::error::{Error, ErrorKind, Result};

/// Whether a tag body starts with `!` or `?` after optional whitespace
pub fn is_special(body: &str) -> bool {
    body.trim_start().starts_with(['!', '?'])
}

/// Classify a special tag and, where needed, extend it to its terminator.
///
/// `open` is the offset of the tag's `<`. The cursor is only committed once
/// the tag has been scanned successfully.
pub fn scan<'a>(
    cursor: &mut Cursor<'a>,
    open: usize,
    body: &'a str,
) -> Result<(&'a str, TokenKind<'a>)> {
    let mut probe = *cursor;
    let trimmed = body.trim_start();

    let scanned = if trimmed.starts_with('?') {
        if !is_processing_instruction(body) {
            return Err(error_at(&probe, ErrorKind::MalformedProcessingInstruction, body));
        }
        (body, TokenKind::ProcessingInstruction)
    } else if trimmed.starts_with("!--") {
        let body = extend(&mut probe, open, body, is_closed_comment, ErrorKind::UnclosedComment)?;
        (body, TokenKind::Comment)
    } else if trimmed.starts_with("!DOCTYPE") {
        (scan_doctype(&mut probe, open, body)?, TokenKind::Doctype)
    } else if is_cdata(trimmed) {
        let body = extend(&mut probe, open, body, |b| b.ends_with("]]"), ErrorKind::UnclosedCData)?;
        let Some(payload) = cdata_payload(body) else {
            return Err(error_at(&probe, ErrorKind::MalformedSpecialTag, body));
        };
        (body, TokenKind::CData(payload))
    } else {
        return Err(error_at(&probe, ErrorKind::MalformedSpecialTag, body));
    };

    trace!(kind = scanned.1.name(), len = scanned.0.len(), "special tag");
    *cursor = probe;
    Ok(scanned)
}

fn error_at(cursor: &Cursor<'_>, kind: ErrorKind, tag: &str) -> Error {
    Error::at(kind, cursor.source(), cursor.pos(), tag)
}

/// Swallow `>`-terminated segments until `done` accepts the spliced body.
fn extend<'a>(
    cursor: &mut Cursor<'a>,
    open: usize,
    mut body: &'a str,
    done: impl Fn(&str) -> bool,
    unclosed: ErrorKind,
) -> Result<&'a str> {
    while !done(body) {
        let Some(close) = cursor.find(b'>') else {
            let source = cursor.source();
            let rest = cursor.slice(open + 1, source.len());
            return Err(Error::at(unclosed, source, source.len(), rest));
        };
        body = cursor.slice(open + 1, close);
        cursor.advance_to(close + 1);
    }
    Ok(body)
}

fn is_processing_instruction(body: &str) -> bool {
    let Some(inner) = body
        .trim_start()
        .strip_prefix('?')
        .and_then(|s| s.strip_suffix('?'))
    else {
        return false;
    };
    let name = inner.split(char::is_whitespace).next().unwrap_or_default();
    is_valid_name(name)
}

/// A comment body is complete once it ends in `--`, the opening `!--` included
fn is_closed_comment(body: &str) -> bool {
    body.trim_end().ends_with("--")
}

fn is_cdata(trimmed: &str) -> bool {
    trimmed
        .strip_prefix('!')
        .map(str::trim_start)
        .and_then(|s| s.strip_prefix('['))
        .map(str::trim_start)
        .is_some_and(|s| s.starts_with("CDATA"))
}

/// Literal text between `[CDATA[` and the closing `]]`
fn cdata_payload(body: &str) -> Option<&str> {
    let keyword = body.find("CDATA")?;
    let bracket = body.get(keyword..)?.find('[')? + keyword;
    let end = body.len().checked_sub(2)?;
    body.get(bracket + 1..end)
}

fn scan_doctype<'a>(cursor: &mut Cursor<'a>, open: usize, body: &'a str) -> Result<&'a str> {
    if !body.contains('[') {
        if is_external_doctype(body) {
            return Ok(body);
        }
        return Err(error_at(cursor, ErrorKind::MalformedDoctype, body));
    }

    let body = extend(
        cursor,
        open,
        body,
        |b| b.trim_end().ends_with(']'),
        ErrorKind::UnclosedDtd,
    )?;
    if is_inline_doctype(body) {
        Ok(body)
    } else {
        Err(error_at(cursor, ErrorKind::MalformedDoctype, body))
    }
}

/// Split `!DOCTYPE name rest` into the root name and what follows it
fn doctype_parts(body: &str) -> Option<(&str, &str)> {
    let rest = body.trim().strip_prefix("!DOCTYPE")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start();
    let end = rest
        .find(|c: char| c.is_whitespace() || c == '[')
        .unwrap_or(rest.len());
    let (name, tail) = rest.split_at(end);
    is_valid_name(name).then_some((name, tail))
}

/// `SYSTEM "uri"`, `PUBLIC "id" "uri"`, or nothing at all
fn is_external_id(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return true;
    }
    text.strip_prefix("SYSTEM")
        .or_else(|| text.strip_prefix("PUBLIC"))
        .is_some_and(|rest| {
            rest.starts_with(char::is_whitespace) && rest.trim_start().starts_with(['"', '\''])
        })
}

fn is_external_doctype(body: &str) -> bool {
    doctype_parts(body).is_some_and(|(_, tail)| is_external_id(tail))
}

fn is_inline_doctype(body: &str) -> bool {
    let Some((_, tail)) = doctype_parts(body) else {
        return false;
    };
    let Some(subset) = tail.find('[') else {
        return false;
    };
    let (external, subset) = tail.split_at(subset);
    is_external_id(external) && subset.trim_end().ends_with(']')
}
