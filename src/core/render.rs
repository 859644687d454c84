//! Renderer module
//!
//! Renders a finished Collection to one of the output formats: rust, json, jsonl

use std::io::Write;

use crate::core::model::{Collection, ManifestEntry};
use crate::core::util::{escape_byte_string, escape_str, HashAlgorithm};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Rust source declaring a static slice of (key, bytes) pairs
    #[default]
    Rust,
    Json,
    Jsonl,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rust" | "rs" => Ok(OutputFormat::Rust),
            "json" => Ok(OutputFormat::Json),
            "jsonl" => Ok(OutputFormat::Jsonl),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Default name of the generated static
pub const DEFAULT_VAR: &str = "FILES";

/// Render configuration combining format and options
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,

    /// Name of the generated static (rust format)
    pub var: String,

    /// Optional module wrapping the static (rust format)
    pub module: Option<String>,

    /// Hash written into manifest entries (json/jsonl formats)
    pub hash: HashAlgorithm,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: false,
            var: DEFAULT_VAR.to_string(),
            module: None,
            hash: HashAlgorithm::default(),
        }
    }
}

/// Renderer for collections
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a collection to a string
    pub fn render(&self, collection: &Collection) -> String {
        match self.config.format {
            OutputFormat::Rust => self.render_rust(collection),
            OutputFormat::Json => self.render_json(collection),
            OutputFormat::Jsonl => self.render_jsonl(collection),
        }
    }

    /// Render to a writer
    pub fn render_to<W: Write>(&self, collection: &Collection, mut writer: W) -> std::io::Result<()> {
        let mut output = self.render(collection);
        if !output.ends_with('\n') {
            output.push('\n');
        }
        writer.write_all(output.as_bytes())?;
        writer.flush()
    }

    fn manifest(&self, collection: &Collection) -> Vec<ManifestEntry> {
        collection
            .iter()
            .map(|(key, content)| ManifestEntry::new(key, content, self.config.hash))
            .collect()
    }

    /// Render as a Rust module fragment
    fn render_rust(&self, collection: &Collection) -> String {
        let mut output = String::from("// Code generated by filemap. DO NOT EDIT.\n\n");

        let indent = if self.config.module.is_some() { "    " } else { "" };
        if let Some(module) = &self.config.module {
            output.push_str(&format!("pub mod {} {{\n", module));
        }

        output.push_str(&format!(
            "{indent}/// Embedded files, sorted by key.\n\
             {indent}pub static {}: &[(&str, &[u8])] = &[\n",
            self.config.var
        ));
        for (key, content) in collection.iter() {
            output.push_str(&format!(
                "{indent}    (\"{}\", b\"{}\"),\n",
                escape_str(key),
                escape_byte_string(content)
            ));
        }
        output.push_str(&format!("{indent}];\n"));

        if self.config.module.is_some() {
            output.push_str("}\n");
        }
        output
    }

    /// Render as a single JSON array
    fn render_json(&self, collection: &Collection) -> String {
        let entries = self.manifest(collection);
        if self.config.pretty {
            serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(&entries).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl(&self, collection: &Collection) -> String {
        self.manifest(collection)
            .iter()
            .filter_map(|entry| serde_json::to_string(entry).ok())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self::with_config(RenderConfig {
            format,
            ..Default::default()
        })
    }
}
