//! Tree to XML text
//!
//! Inverts the builder's conventions: sequences become repeated siblings,
//! text becomes `<name>text</name>`, an element with nothing but attributes
//! self-closes, and children whose key is not a valid tag name are skipped.

use tracing::debug;

use crate::config::FormatConfig;
use crate::entity;
use crate::error::{Error, ErrorKind, Result};
use crate::lexer::is_valid_name;
use crate::node::{Element, Node};

/// Declaration line emitted ahead of every serialized document
pub const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Serialize `node` as a complete document.
///
/// Without a `name`, the tree must be an element with exactly one child and
/// nothing else; that child becomes the root.
pub fn to_string(node: &Node, name: Option<&str>, config: &FormatConfig) -> Result<String> {
    let mut out = String::new();
    out.push_str(DECLARATION);
    out.push_str(&config.line_ending);
    write_document(&mut out, node, name, config)?;
    Ok(out)
}

/// Serialize with the default [`FormatConfig`]
pub fn to_string_default(node: &Node, name: Option<&str>) -> Result<String> {
    to_string(node, name, &FormatConfig::default())
}

/// Append the body of a document (no declaration) to `out`
pub(crate) fn write_document(
    out: &mut String,
    node: &Node,
    name: Option<&str>,
    config: &FormatConfig,
) -> Result<()> {
    let (name, root) = resolve_root(node, name)?;
    debug!(root = name, "serializing document");
    Serializer { out, config }.write_node(root, name, 0);
    Ok(())
}

/// Pick the root name and node, falling back to the tree's sole key.
pub fn resolve_root<'n>(node: &'n Node, name: Option<&'n str>) -> Result<(&'n str, &'n Node)> {
    match name.filter(|n| !n.is_empty()) {
        Some(name) if is_valid_name(name) => Ok((name, node)),
        Some(name) => Err(Error::new(ErrorKind::InvalidName {
            name: name.to_string(),
        })),
        None => match node {
            Node::Element(Element {
                attributes,
                data: None,
                children,
            }) if attributes.is_empty() && children.len() == 1 => children
                .first()
                .filter(|(key, _)| is_valid_name(key))
                .map(|(key, child)| (key.as_str(), child))
                .ok_or_else(|| Error::new(ErrorKind::MissingRootName)),
            _ => Err(Error::new(ErrorKind::MissingRootName)),
        },
    }
}

struct Serializer<'o, 'c> {
    out: &'o mut String,
    config: &'c FormatConfig,
}

impl Serializer<'_, '_> {
    fn write_node(&mut self, node: &Node, name: &str, depth: usize) {
        match node {
            Node::Sequence(items) => {
                for item in items {
                    self.write_node(item, name, depth);
                }
            }
            Node::Text(text) => {
                self.indent(depth);
                self.open(name);
                self.out.push('>');
                self.out.push_str(&entity::encode(text));
                self.close(name);
            }
            Node::Element(element) => self.write_element(element, name, depth),
        }
    }

    fn write_element(&mut self, element: &Element, name: &str, depth: usize) {
        self.indent(depth);
        self.open(name);

        let attributes = self.sorted(element.attributes.iter());
        for (key, value) in attributes {
            self.out.push(' ');
            self.out.push_str(key);
            self.out.push_str("=\"");
            self.out.push_str(&entity::encode_attribute(value));
            self.out.push('"');
        }

        let children = self.sorted(element.children.iter());
        match (element.data.as_deref(), children.is_empty()) {
            (None, true) => {
                self.out.push_str("/>");
                self.out.push_str(&self.config.line_ending);
            }
            (Some(data), true) => {
                self.out.push('>');
                self.out.push_str(&entity::encode(data));
                self.close(name);
            }
            (data, false) => {
                self.out.push('>');
                self.out.push_str(&self.config.line_ending);
                if let Some(data) = data {
                    self.indent(depth + 1);
                    self.out.push_str(&entity::encode(data));
                    self.out.push_str(&self.config.line_ending);
                }
                for (key, child) in children {
                    self.write_node(child, key, depth + 1);
                }
                self.indent(depth);
                self.close(name);
            }
        }
    }

    /// Valid-named entries, in key order when sorting is on
    fn sorted<'e, V>(
        &self,
        entries: impl Iterator<Item = (&'e String, &'e V)>,
    ) -> Vec<(&'e String, &'e V)> {
        let mut entries: Vec<_> = entries.filter(|(key, _)| is_valid_name(key)).collect();
        if self.config.sort_keys {
            entries.sort_by(|a, b| a.0.cmp(b.0));
        }
        entries
    }

    fn indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.out.push_str(&self.config.indent);
        }
    }

    fn open(&mut self, name: &str) {
        self.out.push('<');
        self.out.push_str(name);
    }

    fn close(&mut self, name: &str) {
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push('>');
        self.out.push_str(&self.config.line_ending);
    }
}
