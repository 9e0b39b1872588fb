//! Serde view of a tree as nested maps and sequences
//!
//! Attributes and element text appear under the reserved key names, so the
//! output has the same shape as the mapping described by [`KeyNames`].

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::config::KeyNames;
use crate::node::Node;

/// Borrowed tree plus the key names to render it with
#[derive(Clone, Debug)]
pub struct MappingView<'a> {
    node: &'a Node,
    keys: KeyNames,
}

impl<'a> MappingView<'a> {
    pub fn new(node: &'a Node, keys: KeyNames) -> Self {
        Self { node, keys }
    }
}

struct NodeRef<'a> {
    node: &'a Node,
    keys: &'a KeyNames,
}

impl Serialize for MappingView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        NodeRef {
            node: self.node,
            keys: &self.keys,
        }
        .serialize(serializer)
    }
}

impl Serialize for NodeRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.node {
            Node::Text(text) => serializer.serialize_str(text),
            Node::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for node in items {
                    seq.serialize_element(&NodeRef {
                        node,
                        keys: self.keys,
                    })?;
                }
                seq.end()
            }
            Node::Element(element) => {
                let mut map = serializer.serialize_map(None)?;
                if !element.attributes.is_empty() {
                    map.serialize_entry(&self.keys.attributes, &element.attributes)?;
                }
                if let Some(data) = &element.data {
                    map.serialize_entry(&self.keys.data, data)?;
                }
                for (name, node) in &element.children {
                    map.serialize_entry(
                        name,
                        &NodeRef {
                            node,
                            keys: self.keys,
                        },
                    )?;
                }
                map.end()
            }
        }
    }
}
