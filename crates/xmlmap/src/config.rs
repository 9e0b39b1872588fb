//! Parser and formatter configuration

/// Default name of the reserved attributes key
pub const DEFAULT_ATTRIBUTES_KEY: &str = "_Attribs";
/// Default name of the reserved data key
pub const DEFAULT_DATA_KEY: &str = "_Data";
/// Default maximum element nesting
pub const DEFAULT_MAX_DEPTH: u16 = 128;

/// Configuration for a parse pass
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Keep the `{documentName: element}` wrapper instead of returning the
    /// root element's content
    pub preserve_document_node: bool,
    /// Keep attributes apart from children; when off they become plain
    /// text children
    pub preserve_attributes: bool,
    /// Do not trim text between tags
    pub preserve_whitespace: bool,
    /// Lower-case tag names, attribute names and the reserved key names
    pub lower_case: bool,
    /// Wrap every non-root child in a sequence, even when it occurs once
    pub force_arrays: bool,
    pub attributes_key: String,
    pub data_key: String,
    /// Maximum element nesting (0 means unlimited)
    pub max_depth: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preserve_document_node: false,
            preserve_attributes: true,
            preserve_whitespace: false,
            lower_case: false,
            force_arrays: false,
            attributes_key: DEFAULT_ATTRIBUTES_KEY.to_string(),
            data_key: DEFAULT_DATA_KEY.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    pub fn with_preserve_document_node(mut self, on: bool) -> Self {
        self.preserve_document_node = on;
        self
    }

    pub fn with_preserve_attributes(mut self, on: bool) -> Self {
        self.preserve_attributes = on;
        self
    }

    pub fn with_preserve_whitespace(mut self, on: bool) -> Self {
        self.preserve_whitespace = on;
        self
    }

    pub fn with_lower_case(mut self, on: bool) -> Self {
        self.lower_case = on;
        self
    }

    pub fn with_force_arrays(mut self, on: bool) -> Self {
        self.force_arrays = on;
        self
    }

    pub fn with_keys(mut self, attributes: impl Into<String>, data: impl Into<String>) -> Self {
        self.attributes_key = attributes.into();
        self.data_key = data.into();
        self
    }

    pub fn with_max_depth(mut self, max_depth: u16) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Apply the case rule to a tag or attribute name
    pub(crate) fn normalize(&self, name: &str) -> String {
        if self.lower_case {
            name.to_lowercase()
        } else {
            name.to_string()
        }
    }

    /// Reserved key names after the case rule
    pub fn key_names(&self) -> KeyNames {
        KeyNames {
            attributes: self.normalize(&self.attributes_key),
            data: self.normalize(&self.data_key),
        }
    }
}

/// Names under which attributes and element text appear in the mapping view
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyNames {
    pub attributes: String,
    pub data: String,
}

impl Default for KeyNames {
    fn default() -> Self {
        Config::default().key_names()
    }
}

/// Configuration options for serializing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatConfig {
    /// Indentation unit, repeated once per depth level
    pub indent: String,
    pub line_ending: String,
    /// Emit attributes and children in lexicographic order
    pub sort_keys: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent: "\t".to_string(),
            line_ending: "\n".to_string(),
            sort_keys: true,
        }
    }
}

impl FormatConfig {
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn with_line_ending(mut self, line_ending: impl Into<String>) -> Self {
        self.line_ending = line_ending.into();
        self
    }

    pub fn with_sort_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }
}
