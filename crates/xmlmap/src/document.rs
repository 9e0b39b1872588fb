//! Document wrapper: one parse pass plus the lists that live outside the tree

use tracing::{debug, instrument};

use crate::builder::{Parsed, TreeBuilder};
use crate::config::{Config, FormatConfig};
use crate::error::{Error, ErrorLog, Result};
use crate::node::Node;
use crate::serialize::{self, DECLARATION};

/// A parsed XML document
///
/// Processing instructions and DOCTYPEs are kept verbatim on their own lists
/// and replayed ahead of the body when the document is serialized again, so
/// they survive any edits made to the tree in between.
#[derive(Clone, Debug, Default)]
pub struct Document {
    config: Config,
    tree: Node,
    name: String,
    processing_instructions: Vec<String>,
    doctypes: Vec<String>,
    errors: ErrorLog,
}

impl Document {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Parse `source` with the default configuration
    pub fn parse_str(source: &str) -> Result<Self> {
        Self::parse_with_config(source, Config::default())
    }

    pub fn parse_with_config(source: &str, config: Config) -> Result<Self> {
        let mut document = Self::new(config);
        document.parse(source)?;
        Ok(document)
    }

    /// Run a parse pass, replacing the tree and side lists.
    ///
    /// On failure the previous tree is cleared and the error is recorded.
    #[instrument(skip_all, fields(len = source.len()))]
    pub fn parse(&mut self, source: &str) -> Result<&Node> {
        debug!("starting parse");
        self.tree = Node::default();
        self.name.clear();
        self.processing_instructions.clear();
        self.doctypes.clear();

        let Parsed {
            tree,
            name,
            processing_instructions,
            doctypes,
        } = TreeBuilder::new(source, &self.config)
            .build()
            .map_err(|e| self.errors.record(e))?;

        debug!(
            name = %name,
            processing_instructions = processing_instructions.len(),
            doctypes = doctypes.len(),
            "parse completed"
        );
        self.tree = tree;
        self.name = name;
        self.processing_instructions = processing_instructions;
        self.doctypes = doctypes;
        Ok(&self.tree)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tree(&self) -> &Node {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Node {
        &mut self.tree
    }

    pub fn into_tree(self) -> Node {
        self.tree
    }

    /// Name of the top-level element
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Processing instruction bodies (without `<` `>`), in document order
    pub fn processing_instructions(&self) -> &[String] {
        &self.processing_instructions
    }

    /// DOCTYPE bodies (without `<` `>`), in document order
    pub fn doctypes(&self) -> &[String] {
        &self.doctypes
    }

    /// Every error recorded by this document's parse passes
    pub fn errors(&self) -> &[Error] {
        self.errors.errors()
    }

    /// Formatted message of the most recent error
    pub fn last_error(&self) -> Option<String> {
        self.errors.last_message()
    }

    /// Serialize with the default [`FormatConfig`]
    pub fn to_xml(&self) -> Result<String> {
        self.to_xml_with(&FormatConfig::default())
    }

    /// Serialize: declaration, processing instructions, DOCTYPEs, then body.
    ///
    /// An `<?xml ...?>` instruction recorded from the source stands in for the
    /// generic declaration and is always written first.
    #[instrument(skip_all)]
    pub fn to_xml_with(&self, format: &FormatConfig) -> Result<String> {
        let eol = &format.line_ending;
        let mut out = String::new();

        let declaration = self
            .processing_instructions
            .iter()
            .position(|pi| is_declaration(pi));
        match declaration.and_then(|i| self.processing_instructions.get(i)) {
            Some(pi) => push_tag(&mut out, pi, eol),
            None => {
                out.push_str(DECLARATION);
                out.push_str(eol);
            }
        }
        let instructions = self
            .processing_instructions
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != declaration)
            .map(|(_, pi)| pi);
        for tag in instructions.chain(&self.doctypes) {
            push_tag(&mut out, tag, eol);
        }

        let name = if self.config.preserve_document_node {
            None
        } else {
            Some(self.name.as_str())
        };
        serialize::write_document(&mut out, &self.tree, name, format)?;
        Ok(out)
    }

    /// Serde view of the tree using the configured reserved key names
    #[cfg(feature = "serde")]
    pub fn mapping(&self) -> crate::view::MappingView<'_> {
        crate::view::MappingView::new(&self.tree, self.config.key_names())
    }
}

fn push_tag(out: &mut String, tag: &str, eol: &str) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    out.push_str(eol);
}

fn is_declaration(pi: &str) -> bool {
    pi.trim_start()
        .strip_prefix("?xml")
        .is_some_and(|rest| rest.starts_with(|c: char| c.is_whitespace() || c == '?'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip_with_side_lists() -> Result<()> {
        let source = "<?xml version=\"1.0\"?>\n<!DOCTYPE note SYSTEM \"note.dtd\">\n<note><to>Tove</to></note>";
        let document = Document::parse_str(source)?;
        assert_eq!(
            document.to_xml()?,
            "<?xml version=\"1.0\"?>\n<!DOCTYPE note SYSTEM \"note.dtd\">\n<note>\n\t<to>Tove</to>\n</note>\n"
        );
        Ok(())
    }

    #[test]
    fn test_generic_declaration_precedes_other_pis() -> Result<()> {
        let document = Document::parse_str("<?style href=\"a.css\"?><a/>")?;
        assert_eq!(
            document.to_xml()?,
            format!("{DECLARATION}\n<?style href=\"a.css\"?>\n<a/>\n")
        );
        Ok(())
    }

    #[test]
    fn test_mutation_before_serializing() -> Result<()> {
        let mut document = Document::parse_str("<?pi one?><r><x>1</x></r>")?;
        if let Some(root) = document.tree_mut().as_element_mut() {
            root.remove("x");
            root.insert("y", "2");
            root.set_attribute("id", "7");
        }
        assert_eq!(
            document.to_xml()?,
            format!("{DECLARATION}\n<?pi one?>\n<r id=\"7\">\n\t<y>2</y>\n</r>\n")
        );
        Ok(())
    }

    #[test]
    fn test_preserve_document_node_serializes_from_wrapper() -> Result<()> {
        let config = Config::default().with_preserve_document_node(true);
        let document = Document::parse_with_config("<a>hi</a>", config)?;
        assert_eq!(document.to_xml()?, format!("{DECLARATION}\n<a>hi</a>\n"));
        Ok(())
    }

    #[test]
    fn test_errors_are_recorded() {
        let mut document = Document::default();
        let result = document.parse("<a>\n<b>\n</a>");
        assert_eq!(
            result.err().map(|e| e.kind().clone()),
            Some(ErrorKind::MismatchedClosingTag)
        );
        assert_eq!(document.errors().len(), 1);
        assert_eq!(
            document.last_error().as_deref(),
            Some("Parse Error: mismatched closing tag on line 3: /a")
        );
    }

    #[test]
    fn test_failed_parse_clears_previous_tree() -> Result<()> {
        let mut document = Document::default();
        document.parse("<a><b>1</b></a>")?;
        assert_eq!(document.name(), "a");
        assert!(document.parse("<a>").is_err());
        assert_eq!(document.name(), "");
        assert_eq!(document.tree(), &Node::default());
        Ok(())
    }

    #[test]
    fn test_empty_document_cannot_be_serialized() -> Result<()> {
        let document = Document::parse_str("<!-- nothing -->")?;
        let err = document.to_xml().err();
        assert_eq!(err.map(|e| e.kind().clone()), Some(ErrorKind::MissingRootName));
        Ok(())
    }

    #[test]
    fn test_late_declaration_is_moved_first() -> Result<()> {
        let document = Document::parse_str("<?pi x?><?xml version=\"1.0\"?><a/>")?;
        assert_eq!(
            document.to_xml()?,
            "<?xml version=\"1.0\"?>\n<?pi x?>\n<a/>\n"
        );
        Ok(())
    }

    #[test]
    fn test_generated_declaration_is_stable_on_reparse() -> Result<()> {
        let first = Document::parse_str("<a>1</a>")?;
        assert!(first.processing_instructions().is_empty());

        let output = first.to_xml()?;
        let second = Document::parse_str(&output)?;
        assert_eq!(second.tree(), first.tree());
        assert_eq!(
            second.processing_instructions(),
            [DECLARATION.trim_start_matches('<').trim_end_matches('>')]
        );
        assert_eq!(second.to_xml()?, output);
        Ok(())
    }

    #[test]
    fn test_is_declaration() {
        assert!(is_declaration("?xml version=\"1.0\"?"));
        assert!(is_declaration("?xml?"));
        assert!(!is_declaration("?xml-stylesheet href=\"a\"?"));
        assert!(!is_declaration("?php echo 1?"));
    }
}
