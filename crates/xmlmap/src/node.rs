//! Tree types produced by parsing and consumed by serialization

use indexmap::map::Entry;
use indexmap::IndexMap;

/// A parsed XML value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Text content with entities decoded
    Text(String),
    /// Element with attributes, own text and named children
    Element(Element),
    /// Repeated siblings sharing one tag name
    Sequence(Vec<Node>),
}

impl Default for Node {
    fn default() -> Self {
        Self::Element(Element::new())
    }
}

impl Node {
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Self::Element(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Self::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_sequence_mut(&mut self) -> Option<&mut Vec<Self>> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Child named `name` if this is an element
    pub fn get(&self, name: &str) -> Option<&Self> {
        self.as_element().and_then(|e| e.child(name))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Self> {
        self.as_element_mut().and_then(|e| e.child_mut(name))
    }

    /// Item `index` of a sequence
    pub fn at(&self, index: usize) -> Option<&Self> {
        self.as_sequence().and_then(|items| items.get(index))
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Self::Element(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(values: Vec<Node>) -> Self {
        Self::Sequence(values)
    }
}

/// An element: attributes, its own text, and children keyed by tag name
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub attributes: IndexMap<String, String>,
    pub data: Option<String>,
    pub children: IndexMap<String, Node>,
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when there are no attributes, no text and no children
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.data.is_none() && self.children.is_empty()
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute, returning the previous value
    pub fn set_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.attributes.insert(name.into(), value.into())
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.shift_remove(name)
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    pub fn set_data(&mut self, data: impl Into<String>) {
        self.data = Some(data.into());
    }

    /// Append text to the data entry, space-separated from what is there
    pub fn append_data(&mut self, text: &str) {
        match &mut self.data {
            Some(data) if !data.is_empty() => {
                data.push(' ');
                data.push_str(text);
            }
            _ => self.data = Some(text.to_string()),
        }
    }

    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.get(name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children.get_mut(name)
    }

    /// Insert or replace a child, returning the previous node
    pub fn insert(&mut self, name: impl Into<String>, node: impl Into<Node>) -> Option<Node> {
        self.children.insert(name.into(), node.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<Node> {
        self.children.shift_remove(name)
    }

    /// Attach a child under `name`, promoting repeated names to a sequence.
    ///
    /// The first occurrence is stored as is (or as a one-item sequence when
    /// `force_sequence` is set), the second turns the entry into a two-item
    /// sequence, and later ones are appended.
    pub fn push_child(&mut self, name: impl Into<String>, node: Node, force_sequence: bool) {
        match self.children.entry(name.into()) {
            Entry::Vacant(slot) => {
                slot.insert(if force_sequence {
                    Node::Sequence(vec![node])
                } else {
                    node
                });
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                Node::Sequence(items) => items.push(node),
                existing => {
                    let first = std::mem::take(existing);
                    *existing = Node::Sequence(vec![first, node]);
                }
            },
        }
    }

    /// Reduce an element holding nothing but text to that text
    pub fn collapse(self) -> Node {
        match self.data {
            Some(data) if self.attributes.is_empty() && self.children.is_empty() => {
                Node::Text(data)
            }
            data => Node::Element(Self { data, ..self }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_child_coalesces() {
        let mut element = Element::new();
        element.push_child("x", Node::from("1"), false);
        assert_eq!(element.child("x"), Some(&Node::from("1")));

        element.push_child("x", Node::from("2"), false);
        element.push_child("x", Node::from("3"), false);
        assert_eq!(
            element.child("x"),
            Some(&Node::Sequence(vec!["1".into(), "2".into(), "3".into()]))
        );
    }

    #[test]
    fn test_push_child_forced_sequence() {
        let mut element = Element::new();
        element.push_child("x", Node::from("1"), true);
        assert_eq!(element.child("x"), Some(&Node::Sequence(vec!["1".into()])));
        element.push_child("x", Node::from("2"), true);
        assert_eq!(element.child("x").and_then(Node::as_sequence).map(<[Node]>::len), Some(2));
    }

    #[test]
    fn test_collapse() {
        let mut text_only = Element::new();
        text_only.set_data("hello");
        assert_eq!(text_only.collapse(), Node::from("hello"));

        let mut with_attr = Element::new();
        with_attr.set_data("hello");
        with_attr.set_attribute("k", "v");
        assert!(with_attr.collapse().is_element());

        assert_eq!(Element::new().collapse(), Node::Element(Element::new()));
    }

    #[test]
    fn test_append_data() {
        let mut element = Element::new();
        element.append_data("one");
        element.append_data("two");
        assert_eq!(element.data(), Some("one two"));
    }

    #[test]
    fn test_accessors() {
        let mut element = Element::new();
        element.insert("items", vec![Node::from("a"), Node::from("b")]);
        let node = Node::from(element);
        assert_eq!(node.get("items").and_then(|n| n.at(1)), Some(&Node::from("b")));
        assert_eq!(node.get("missing"), None);
    }
}
