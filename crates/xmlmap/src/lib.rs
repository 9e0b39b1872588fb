//! xmlmap - XML to nested maps and sequences, and back
//!
//! Parsing turns a document into a [`Node`] tree: elements become maps keyed
//! by child tag name, repeated children become sequences, and text-only
//! elements collapse to plain text. Serializing inverts those conventions, and
//! a [`Document`] also replays the processing instructions and DOCTYPEs it saw.
//!
//! # Quick Start
//!
//! ```
//! use xmlmap::{from_str, Node};
//! # fn main() -> Result<(), xmlmap::Error> {
//! let tree = from_str("<a><x>1</x><x>2</x><y k='v'/></a>")?;
//! let second = tree.get("x").and_then(|x| x.at(1)).and_then(Node::as_text);
//! assert_eq!(second, Some("2"));
//! # Ok(())
//! # }
//! ```
//!
//! Round trip through a [`Document`]:
//!
//! ```
//! # fn main() -> Result<(), xmlmap::Error> {
//! let mut doc = xmlmap::Document::parse_str("<?xml version=\"1.0\"?><r><a>1</a></r>")?;
//! if let Some(root) = doc.tree_mut().as_element_mut() {
//!     root.insert("b", "2");
//! }
//! assert_eq!(
//!     doc.to_xml()?,
//!     "<?xml version=\"1.0\"?>\n<r>\n\t<a>1</a>\n\t<b>2</b>\n</r>\n"
//! );
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Category, Error, ErrorKind, ErrorLog, Result};

pub mod entity;
pub use entity::{decode, encode, encode_attribute};

pub mod lexer;
pub use lexer::{Lexer, Token, TokenKind};

pub mod attributes;
pub mod builder;
pub mod config;
pub use config::{Config, FormatConfig, KeyNames};

pub mod node;
pub use node::{Element, Node};

pub mod serialize;
pub use serialize::to_string;

pub mod document;
pub use document::Document;

#[cfg(feature = "serde")]
pub mod view;
#[cfg(feature = "serde")]
pub use view::MappingView;

/// Parse XML into a tree with the default configuration
pub fn from_str(s: &str) -> Result<Node> {
    Document::parse_str(s).map(Document::into_tree)
}

/// Parse XML with custom configuration
pub fn from_str_with_config(s: &str, config: Config) -> Result<Node> {
    Document::parse_with_config(s, config).map(Document::into_tree)
}

/// Parse and immediately re-serialize a document with default formatting
pub fn round_trip(s: &str) -> Result<String> {
    Document::parse_str(s)?.to_xml()
}
