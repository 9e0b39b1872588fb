//! Attribute list scanner
//!
//! Picks every `name = "value"` or `name = 'value'` pair out of the text that
//! follows a tag name. Anything between pairs that does not form a pair is
//! skipped.

use std::borrow::Cow;

use crate::entity;
use crate::lexer::is_valid_name;

/// Iterator over the attributes of a tag, values entity-decoded
#[derive(Clone, Debug)]
pub struct Attributes<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Attributes<'a> {
    pub const fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Try to read one pair starting at `start`; returns it and its end offset
    fn pair_at(&self, start: usize) -> Option<(&'a str, &'a str, usize)> {
        let rest = self.text.get(start..)?;
        let name_len = rest
            .find(|c: char| c.is_whitespace() || matches!(c, '=' | '"' | '\''))
            .unwrap_or(rest.len());
        let name = rest.get(..name_len)?;
        if !is_valid_name(name) {
            return None;
        }

        let after_name = rest.get(name_len..)?.trim_start();
        let after_eq = after_name.strip_prefix('=')?.trim_start();
        let quote = after_eq.chars().next().filter(|c| matches!(c, '"' | '\''))?;
        let value_text = after_eq.get(1..)?;
        let value_len = value_text.find(quote)?;
        let value = value_text.get(..value_len)?;

        let consumed = self.text.len() - value_text.len() + value_len + 1;
        Some((name, value, consumed))
    }

    /// Offset just past the word starting at `start`, or past one char if none
    fn skip_from(&self, start: usize) -> usize {
        let rest = self.text.get(start..).unwrap_or_default();
        let word = rest
            .find(|c: char| c.is_whitespace() || matches!(c, '=' | '"' | '\''))
            .unwrap_or(rest.len());
        let step = if word == 0 {
            rest.chars().next().map_or(1, char::len_utf8)
        } else {
            word
        };
        start + step
    }
}

impl<'a> Iterator for Attributes<'a> {
    type Item = (&'a str, Cow<'a, str>);

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.text.len() {
            if let Some((name, value, end)) = self.pair_at(self.pos) {
                self.pos = end;
                return Some((name, entity::decode(value)));
            }
            self.pos = self.skip_from(self.pos);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str) -> Vec<(String, String)> {
        Attributes::new(text)
            .map(|(k, v)| (k.to_string(), v.into_owned()))
            .collect()
    }

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn test_both_quote_styles() {
        assert_eq!(
            collect(r#" a="1" b='two words'"#),
            vec![pair("a", "1"), pair("b", "two words")]
        );
    }

    #[test]
    fn test_spaces_around_equals() {
        assert_eq!(collect("  id =\n 'x' "), vec![pair("id", "x")]);
    }

    #[test]
    fn test_other_quote_inside_value() {
        assert_eq!(
            collect(r#"q="it's" r='say "hi"'"#),
            vec![pair("q", "it's"), pair("r", "say \"hi\"")]
        );
    }

    #[test]
    fn test_values_are_decoded() {
        assert_eq!(
            collect(r#"v="a &lt; b &amp;&amp; c""#),
            vec![pair("v", "a < b && c")]
        );
    }

    #[test]
    fn test_junk_is_skipped() {
        assert_eq!(
            collect(r#"checked junk= x="1" 9bad="2" y="""#),
            vec![pair("x", "1"), pair("y", "")]
        );
    }

    #[test]
    fn test_unterminated_value() {
        assert!(collect(r#"a="open"#).is_empty());
    }

    #[test]
    fn test_empty() {
        assert!(collect("").is_empty());
        assert!(collect("   ").is_empty());
    }
}
