//! Run configuration: row count, links, and seed.
//!
//! Links come from an optional JSON file followed by any `--link NAME=URL`
//! arguments, in that order. Every link is validated before a run starts.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use dumper_core::{Link, SeededEntropy};
use serde::Deserialize;
use tracing::debug;

use crate::error::{CliError, Result};

/// Rows in a dump, the cursor row included.
pub const DEFAULT_ROWS: usize = 32;

#[derive(Debug, Clone, Args)]
pub struct DumpArgs {
    /// Rows in the dump, the cursor row included.
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    pub rows: usize,

    /// Link to embed, as NAME=URL. Repeatable. A literal `\n` in NAME puts
    /// the rest of the name on a following row.
    #[arg(long = "link", value_name = "NAME=URL")]
    pub links: Vec<String>,

    /// JSON file holding an array of {"name": ..., "url": ...} objects.
    #[arg(long, value_name = "PATH")]
    pub links_file: Option<PathBuf>,

    /// Seed for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Default for DumpArgs {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            links: Vec::new(),
            links_file: None,
            seed: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LinkEntry {
    name: String,
    url: String,
}

/// Validated run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpConfig {
    pub rows: usize,
    pub links: Vec<Link>,
    pub seed: Option<u64>,
}

impl DumpConfig {
    pub fn from_args(args: &DumpArgs) -> Result<Self> {
        if args.rows < 2 {
            return Err(CliError::invalid(format!(
                "--rows must be at least 2, got {}",
                args.rows
            )));
        }

        let mut links = match &args.links_file {
            Some(path) => load_links_file(path)?,
            None => Vec::new(),
        };
        for arg in &args.links {
            links.push(parse_link_arg(arg)?);
        }

        debug!(rows = args.rows, links = links.len(), seed = ?args.seed, "configuration loaded");

        Ok(Self {
            rows: args.rows,
            links,
            seed: args.seed,
        })
    }

    /// Entropy for this run: seeded if a seed was given.
    #[must_use]
    pub fn entropy(&self) -> SeededEntropy {
        match self.seed {
            Some(seed) => SeededEntropy::from_seed(seed),
            None => SeededEntropy::from_os_rng(),
        }
    }
}

/// Parse `NAME=URL`, turning a literal `\n` in the name into a line break.
pub fn parse_link_arg(arg: &str) -> Result<Link> {
    Ok(Link::parse(&arg.replace("\\n", "\n"))?)
}

/// Read links from a JSON array of `{"name", "url"}` objects.
pub fn load_links_file(path: &Path) -> Result<Vec<Link>> {
    let text = fs::read_to_string(path)?;
    let entries: Vec<LinkEntry> =
        serde_json::from_str(&text).map_err(|source| CliError::LinksFile {
            path: path.to_path_buf(),
            source,
        })?;
    entries
        .into_iter()
        .map(|entry| Link::new(entry.name, entry.url).map_err(CliError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dumper_core::DumpError;

    #[test]
    fn literal_newline_splits_name() {
        let link = parse_link_arg(r"Michael\nDvorkin=https://example.com").unwrap();
        assert_eq!(link.head(), "Michael");
        assert!(link.is_multiline());
    }

    #[test]
    fn rejects_too_few_rows() {
        let args = DumpArgs {
            rows: 1,
            ..DumpArgs::default()
        };
        assert!(matches!(
            DumpConfig::from_args(&args).unwrap_err(),
            CliError::InvalidArgument { .. }
        ));
    }

    #[test]
    fn rejects_long_link_names() {
        let args = DumpArgs {
            links: vec!["a-name-that-is-too-long=https://example.com".to_string()],
            ..DumpArgs::default()
        };
        assert!(matches!(
            DumpConfig::from_args(&args).unwrap_err(),
            CliError::Link(DumpError::NameTooLong { .. })
        ));
    }

    #[test]
    fn seeded_config_is_reproducible() {
        use dumper_core::Entropy;

        let config = DumpConfig {
            rows: 4,
            links: Vec::new(),
            seed: Some(5),
        };
        let mut a = config.entropy();
        let mut b = config.entropy();
        assert_eq!(a.filler_byte(), b.filler_byte());
    }
}
