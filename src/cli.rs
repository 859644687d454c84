//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;

use crate::core::error::CollectError;
use crate::core::model::{default_jobs, CollectConfig};
use crate::core::paths::KeyMode;
use crate::core::render::{OutputFormat, RenderConfig, Renderer, DEFAULT_VAR};
use crate::core::util::{is_rust_ident, HashAlgorithm};
use crate::engine::collect;

/// filemap - embed directory trees as a path -> contents map.
#[derive(Parser, Debug)]
#[command(name = "filemap")]
#[command(
    author,
    version,
    about,
    long_about = r#"filemap reads every regular file under the given paths and prints a
generated artifact mapping each file's path to its contents.

Paths may be directories or single files. Empty directories are ignored and
symlinks are not followed. Any stat or read failure aborts the run and
nothing is written.

Output formats:
- rust: a Rust module declaring `pub static FILES: &[(&str, &[u8])]`
- json: a single JSON array of {key, size, hash, content}
- jsonl: one JSON object per line

Examples:
    filemap static/css static/js > src/static_files.rs
    filemap --keys relative assets --var ASSETS --module assets
    filemap --abs --format jsonl templates
"#
)]
pub struct Cli {
    /// Files or directories to embed.
    #[arg(value_name = "PATH", required = true, num_args = 1..)]
    pub paths: Vec<PathBuf>,

    /// Name of the generated static.
    #[arg(
        long,
        env = "FILEMAP_VAR",
        default_value = DEFAULT_VAR,
        value_name = "NAME",
        long_help = "Name of the generated static in rust output. Must be a valid Rust identifier."
    )]
    pub var: String,

    /// Wrap the static in `pub mod NAME`.
    #[arg(long, value_name = "NAME")]
    pub module: Option<String>,

    /// How map keys are derived (raw/absolute/relative).
    #[arg(
        long,
        default_value = "raw",
        value_parser = ["raw", "absolute", "relative"],
        value_name = "MODE",
        long_help = "How map keys are derived from discovered paths.\n\n\
Supported values:\n\
- raw (default): the path as discovered, starting with the argument as given\n\
- absolute: the absolute path\n\
- relative: the path relative to the single PATH argument (a file argument\n  \
  is keyed by its file name)\n\n\
Separators are always '/'."
    )]
    pub keys: String,

    /// Use absolute paths for keys (same as --keys absolute).
    #[arg(long, conflicts_with = "keys")]
    pub abs: bool,

    /// Output format (rust/json/jsonl).
    #[arg(
        long,
        env = "FILEMAP_FORMAT",
        default_value = "rust",
        value_parser = ["rust", "json", "jsonl"],
        value_name = "FORMAT"
    )]
    pub format: String,

    /// Pretty-print JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Content hash used in json/jsonl output (xxh3/sha1).
    #[arg(long, default_value = "xxh3", value_parser = ["xxh3", "sha1"], value_name = "ALGO")]
    pub hash: String,

    /// Fail when two files produce the same key.
    #[arg(
        long,
        long_help = "Fail when two files produce the same key.\n\n\
Without this flag the file from the path argument listed last wins."
    )]
    pub strict: bool,

    /// Number of parallel reader threads.
    #[arg(short = 'j', long, default_value_t = default_jobs(), value_name = "N")]
    pub jobs: usize,

    /// Fail on files larger than this many bytes.
    #[arg(long, value_name = "BYTES")]
    pub max_file_size: Option<u64>,

    /// Write output to FILE instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Disable colored output (when applicable).
    #[arg(long)]
    pub no_color: bool,

    /// Quiet mode (errors only).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (more diagnostics).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Engine configuration derived from the flags
    pub fn collect_config(&self) -> Result<CollectConfig, CollectError> {
        let key_mode = if self.abs {
            KeyMode::Absolute
        } else {
            self.keys.parse().map_err(CollectError::Usage)?
        };

        Ok(CollectConfig {
            key_mode,
            jobs: self.jobs,
            strict: self.strict,
            max_file_size: self.max_file_size,
        })
    }

    /// Renderer configuration derived from the flags
    pub fn render_config(&self) -> Result<RenderConfig, CollectError> {
        if !is_rust_ident(&self.var) {
            return Err(CollectError::Usage(format!(
                "--var {:?} is not a valid Rust identifier",
                self.var
            )));
        }
        if let Some(module) = &self.module {
            if !is_rust_ident(module) {
                return Err(CollectError::Usage(format!(
                    "--module {:?} is not a valid Rust identifier",
                    module
                )));
            }
        }

        let format: OutputFormat = self.format.parse().map_err(CollectError::Usage)?;
        let hash: HashAlgorithm = self.hash.parse().map_err(CollectError::Usage)?;

        Ok(RenderConfig {
            format,
            pretty: self.pretty,
            var: self.var.clone(),
            module: self.module.clone(),
            hash,
        })
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let config = cli.collect_config()?;
    let renderer = Renderer::with_config(cli.render_config()?);

    let collection = collect(&cli.paths, &config)?;

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            renderer
                .render_to(&collection, BufWriter::new(file))
                .with_context(|| format!("cannot write {}", path.display()))?;
            info!(path = %path.display(), entries = collection.len(), "output written");
        }
        None => {
            renderer
                .render_to(&collection, std::io::stdout().lock())
                .context("cannot write to stdout")?;
        }
    }

    Ok(())
}
