//! Recursive descent tree builder
//!
//! Consumes the lexer's tokens and builds one [`Element`] per open tag,
//! collapsing text-only elements and coalescing repeated siblings.

use tracing::trace;

use crate::attributes::Attributes;
use crate::config::Config;
use crate::entity;
use crate::error::{ErrorKind, Result};
use crate::lexer::{Lexer, TokenKind};
use crate::node::{Element, Node};

/// Output of one parse pass
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parsed {
    /// Root element content, or `{name: element}` under
    /// `preserve_document_node`
    pub tree: Node,
    /// Name of the single top-level element, empty if there was none
    pub name: String,
    /// Processing instruction bodies in document order
    pub processing_instructions: Vec<String>,
    /// DOCTYPE bodies in document order
    pub doctypes: Vec<String>,
}

/// Tree builder for a single source text
#[derive(Debug)]
pub struct TreeBuilder<'a, 'c> {
    lexer: Lexer<'a>,
    config: &'c Config,
    depth: u16,
    processing_instructions: Vec<String>,
    doctypes: Vec<String>,
}

impl<'a, 'c> TreeBuilder<'a, 'c> {
    pub const fn new(source: &'a str, config: &'c Config) -> Self {
        Self {
            lexer: Lexer::new(source),
            config,
            depth: 0,
            processing_instructions: Vec::new(),
            doctypes: Vec::new(),
        }
    }

    /// Build the whole tree, stopping at the first error
    pub fn build(mut self) -> Result<Parsed> {
        let mut root = Element::new();
        self.parse_element(&mut root, None)?;
        // stray document-level text and CDATA are not content
        root.data = None;

        let name = root.children.keys().next().cloned().unwrap_or_default();
        let tree = if self.config.preserve_document_node {
            Node::Element(root)
        } else {
            root.children
                .swap_remove(&name)
                .unwrap_or_else(|| Node::Element(Element::new()))
        };

        Ok(Parsed {
            tree,
            name,
            processing_instructions: self.processing_instructions,
            doctypes: self.doctypes,
        })
    }

    /// Fill `element` until its closing tag; `expected` is `None` at the root.
    fn parse_element(&mut self, element: &mut Element, expected: Option<&str>) -> Result<()> {
        while let Some(token) = self.lexer.next_token()? {
            self.append_text(element, token.text);

            match token.kind {
                TokenKind::ProcessingInstruction => {
                    self.processing_instructions.push(token.raw.to_string());
                }
                TokenKind::Doctype => self.doctypes.push(token.raw.to_string()),
                TokenKind::Comment => {}
                TokenKind::CData(payload) => element.append_data(payload),
                TokenKind::Close { name } => {
                    let name = self.config.normalize(name);
                    if expected == Some(name.as_str()) {
                        return Ok(());
                    }
                    return Err(self.lexer.error(ErrorKind::MismatchedClosingTag, token.raw));
                }
                TokenKind::Open {
                    name,
                    attributes,
                    self_closing,
                } => {
                    if expected.is_none() && !element.children.is_empty() {
                        return Err(self.lexer.error(ErrorKind::MultipleTopLevelNodes, token.raw));
                    }
                    let name = self.config.normalize(name);
                    let child = self.parse_child(token.raw, &name, attributes, self_closing)?;
                    let force = self.config.force_arrays && expected.is_some();
                    element.push_child(name, child.collapse(), force);
                }
            }
        }

        match expected {
            Some(name) => Err(self.lexer.error(ErrorKind::MissingClosingTag, name)),
            None => Ok(()),
        }
    }

    fn parse_child(
        &mut self,
        raw: &str,
        name: &str,
        attributes: &str,
        self_closing: bool,
    ) -> Result<Element> {
        let max = self.config.max_depth;
        if max != 0 && self.depth >= max {
            return Err(self.lexer.error(ErrorKind::MaxDepthExceeded { max }, raw));
        }

        let mut child = Element::new();
        for (key, value) in Attributes::new(attributes) {
            let key = self.config.normalize(key);
            if self.config.preserve_attributes {
                child.attributes.insert(key, value.into_owned());
            } else {
                child.push_child(key, Node::Text(value.into_owned()), false);
            }
        }

        if !self_closing {
            self.depth += 1;
            trace!(name, depth = self.depth, "enter element");
            let result = self.parse_element(&mut child, Some(name));
            self.depth -= 1;
            result?;
        }

        Ok(child)
    }

    fn append_text(&self, element: &mut Element, raw: &str) {
        let text = entity::decode(raw);
        let text = if self.config.preserve_whitespace {
            &*text
        } else {
            text.trim()
        };
        if !text.is_empty() {
            element.append_data(text);
        }
    }
}
