//! Token types for the XML tag lexer

/// What a `<...>` region turned out to be
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// Opening or self-closing tag; `attributes` is the raw text after the name
    Open {
        name: &'a str,
        attributes: &'a str,
        self_closing: bool,
    },
    /// Closing tag
    Close { name: &'a str },
    ProcessingInstruction,
    Comment,
    Doctype,
    /// CDATA section carrying its literal payload
    CData(&'a str),
}

impl TokenKind<'_> {
    /// Get token name for log and error messages
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Open { .. } => "open tag",
            Self::Close { .. } => "close tag",
            Self::ProcessingInstruction => "processing instruction",
            Self::Comment => "comment",
            Self::Doctype => "DOCTYPE",
            Self::CData(_) => "CDATA",
        }
    }
}

/// One scanned tag together with the text that preceded it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    /// Raw text between the previous tag and this one, entities still encoded
    pub text: &'a str,
    /// Tag body between `<` and the terminating `>`, spliced across any
    /// embedded `>` for comments, CDATA and inline DOCTYPEs
    pub raw: &'a str,
    pub kind: TokenKind<'a>,
    /// Offset of the opening `<`
    pub start: usize,
    /// Offset just past the closing `>`
    pub end: usize,
}
