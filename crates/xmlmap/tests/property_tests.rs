//! Property-based tests for the codec and the tree round trip
//!
//! These tests use proptest to verify:
//! 1. Entity codec: decode(encode(s)) == s for any string
//! 2. Roundtrip property: tree -> serialize -> parse == tree, for trees in
//!    the canonical shape the builder produces
//! 3. Arbitrary input never panics the parser

use proptest::prelude::*;
use xmlmap::{decode, encode, encode_attribute, from_str, to_string, Element, FormatConfig, Node};

fn arb_name() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_.-]{0,6}"
}

/// Non-empty text with no surrounding whitespace, including characters that
/// need escaping
fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9<>&'\"]{1,6}( [a-zA-Z0-9<>&'\"]{1,6}){0,2}"
}

fn arb_attribute_value() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 <>&'\"=]{0,10}"
}

fn arb_attributes() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((arb_name(), arb_attribute_value()), 0..3)
}

/// Element with no data and no attributes, or with attributes and optional
/// data; an attribute-less element holding only data would collapse to text
fn arb_leaf_element() -> impl Strategy<Value = Node> {
    (arb_attributes(), prop::option::of(arb_text())).prop_map(|(attributes, data)| {
        let mut element = Element::new();
        let has_attributes = !attributes.is_empty();
        for (key, value) in attributes {
            element.set_attribute(key, value);
        }
        if has_attributes {
            if let Some(data) = data {
                element.set_data(data);
            }
        }
        Node::Element(element)
    })
}

fn arb_node() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![arb_text().prop_map(Node::Text), arb_leaf_element()];

    leaf.prop_recursive(4, 48, 5, |inner| {
        (
            arb_attributes(),
            prop::option::of(arb_text()),
            prop::collection::vec((arb_name(), prop::collection::vec(inner, 1..4)), 1..5),
        )
            .prop_map(|(attributes, data, children)| {
                let mut element = Element::new();
                for (key, value) in attributes {
                    element.set_attribute(key, value);
                }
                if let Some(data) = data {
                    element.set_data(data);
                }
                for (key, items) in children {
                    for item in items {
                        element.push_child(key.clone(), item, false);
                    }
                }
                Node::Element(element)
            })
    })
}

proptest! {
    #[test]
    fn entity_codec_is_a_bijection(s in any::<String>()) {
        let encoded = encode(&s);
        prop_assert_eq!(decode(&encoded), s.as_str());
        let attribute = encode_attribute(&s);
        prop_assert_eq!(decode(&attribute), s.as_str());
    }

    #[test]
    fn encoded_text_has_no_markup(s in any::<String>()) {
        let encoded = encode(&s);
        prop_assert!(!encoded.contains('<'));
        prop_assert!(!encoded.contains('>'));
        let attribute = encode_attribute(&s);
        prop_assert!(!attribute.contains('"'));
        prop_assert!(!attribute.contains('\''));
    }

    #[test]
    fn tree_roundtrip(tree in arb_node()) {
        let xml = to_string(&tree, Some("root"), &FormatConfig::default());
        prop_assert!(xml.is_ok());
        let xml = xml.unwrap_or_default();
        let parsed = from_str(&xml);
        prop_assert!(parsed.is_ok(), "failed to reparse:\n{}", xml);
        prop_assert_eq!(parsed.unwrap_or_default(), tree);
    }

    #[test]
    fn unsorted_roundtrip(tree in arb_node()) {
        let config = FormatConfig::default().with_sort_keys(false).with_indent("");
        let xml = to_string(&tree, Some("root"), &config).unwrap_or_default();
        prop_assert_eq!(from_str(&xml).ok(), Some(tree));
    }

    #[test]
    fn arbitrary_input_never_panics(s in "[<>/!?a-z \\[\\]\"'=-]{0,64}") {
        let _result = from_str(&s);
    }
}
