use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use xmlmap::config::{DEFAULT_ATTRIBUTES_KEY, DEFAULT_DATA_KEY, DEFAULT_MAX_DEPTH};
use xmlmap::{Config, Document, FormatConfig};

#[derive(Debug, Parser)]
#[command(
    name = "xmlmap",
    version,
    about = "Convert XML to nested maps (JSON) or normalize it back to XML"
)]
struct Args {
    /// Input file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    to: FormatArg,
    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Keep the top-level element name as the outermost key
    #[arg(long)]
    preserve_document_node: bool,
    /// Turn attributes into ordinary text children
    #[arg(long)]
    no_attributes: bool,
    /// Keep whitespace around text instead of trimming it
    #[arg(long)]
    preserve_whitespace: bool,
    /// Lower-case tag and attribute names
    #[arg(long)]
    lower_case: bool,
    /// Wrap every child in an array, even when it occurs once
    #[arg(long)]
    force_arrays: bool,
    /// Key holding an element's attributes in JSON output
    #[arg(long, default_value = DEFAULT_ATTRIBUTES_KEY)]
    attributes_key: String,
    /// Key holding an element's text in JSON output
    #[arg(long, default_value = DEFAULT_DATA_KEY)]
    data_key: String,
    /// Maximum element nesting (0 for unlimited)
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: u16,

    /// Indentation unit for XML output
    #[arg(long, default_value = "\t")]
    indent: String,
    /// Keep document order for attributes and children in XML output
    #[arg(long)]
    unsorted: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Json,
    Xml,
}

impl Args {
    fn config(&self) -> Config {
        Config::default()
            .with_preserve_document_node(self.preserve_document_node)
            .with_preserve_attributes(!self.no_attributes)
            .with_preserve_whitespace(self.preserve_whitespace)
            .with_lower_case(self.lower_case)
            .with_force_arrays(self.force_arrays)
            .with_keys(self.attributes_key.as_str(), self.data_key.as_str())
            .with_max_depth(self.max_depth)
    }

    fn format(&self) -> FormatConfig {
        FormatConfig::default()
            .with_indent(self.indent.as_str())
            .with_sort_keys(!self.unsorted)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    debug!(?args, "starting");

    let input = read_input(&args.input)?;
    let document = Document::parse_with_config(&input, args.config())
        .context("failed to parse input")?;
    info!(name = document.name(), "parsed document");

    let mut output = match args.to {
        FormatArg::Json => serde_json::to_string_pretty(&document.mapping())
            .context("failed to encode JSON")?,
        FormatArg::Xml => document
            .to_xml_with(&args.format())
            .context("failed to serialize XML")?,
    };
    if !output.ends_with('\n') {
        output.push('\n');
    }

    write_output(&args.output, output.as_bytes())
}

fn read_input(path: &Option<PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            if buffer.trim().is_empty() {
                bail!("no input provided on stdin");
            }
            Ok(buffer)
        }
    }
}

fn write_output(path: &Option<PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data).context("failed to write stdout")?;
            Ok(())
        }
    }
}
