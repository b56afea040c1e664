//! lextrie CLI - Command line interface for the trie engine
//!
//! Keeps a trie in a JSON file (a `{kind, root}` envelope around the wire
//! format) and exposes the engine's operations as subcommands, so shell
//! pipelines and editors can use the library for word lists and completion.

use clap::{Parser, Subcommand};
use lextrie::{Trie, TrieKind, WireNode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lextrie")]
#[command(about = "A prefix-indexed string set engine")]
#[command(version)]
struct Cli {
    /// Path to the trie file
    #[arg(short, long, default_value = "words.trie")]
    file: PathBuf,

    /// Output format (json or text)
    #[arg(short = 'o', long, default_value = "json")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty trie file
    Init {
        /// Use the standard (one character per edge) representation
        #[arg(long)]
        standard: bool,
    },

    /// Insert words
    Insert {
        /// Words to insert
        words: Vec<String>,
        /// Also read words from a file, one per line
        #[arg(short = 'F', long)]
        from: Option<PathBuf>,
    },

    /// Test whether a word is stored
    Query {
        /// The word to look up
        word: String,
        /// Test prefix reachability instead of exact membership
        #[arg(short, long)]
        prefix: bool,
    },

    /// List stored words beginning with a prefix
    Complete {
        /// The prefix to complete
        prefix: String,
        /// Maximum number of completions to print
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Print word/node/depth counts and the fingerprint
    Stats,

    /// Print the longest prefix shared by every stored word
    Lcp,

    /// Print the prefix at every branch point or word boundary
    Branches,

    /// Print the distinct n-grams over all stored words
    Ngrams {
        /// Window size
        #[arg(short = 'n', long, default_value = "2")]
        size: usize,
    },

    /// Keep only words within a length range
    Filter {
        /// Minimum word length in code points
        #[arg(long)]
        min_len: Option<usize>,
        /// Maximum word length in code points
        #[arg(long)]
        max_len: Option<usize>,
        /// Write to this file instead of overwriting the source
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Union another trie file into this one
    Merge {
        /// The trie file to merge from
        other: PathBuf,
    },

    /// Render the node tree
    Show,
}

/// On-disk envelope: the wire record plus the representation it was built
/// with (the wire schema itself is representation-free)
#[derive(Serialize, Deserialize)]
struct TrieFile {
    kind: TrieKind,
    root: WireNode,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { standard } => {
            let kind = if standard {
                TrieKind::Standard
            } else {
                TrieKind::Radix
            };
            let trie = Trie::new(kind);
            save_trie(&cli.file, &trie)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "file": cli.file.display().to_string(),
                    "kind": kind
                }),
            );
        }

        Commands::Insert { words, from } => {
            let mut trie = load_trie(&cli.file)?;
            let before = trie.word_count();
            for word in &words {
                trie.insert(word);
            }
            if let Some(path) = from {
                for line in fs::read_to_string(&path)?.lines() {
                    let word = line.trim();
                    if !word.is_empty() {
                        trie.insert(word);
                    }
                }
            }
            let added = trie.word_count() - before;
            save_trie(&cli.file, &trie)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "added": added,
                    "words": trie.word_count()
                }),
            );
        }

        Commands::Query { word, prefix } => {
            let trie = load_trie(&cli.file)?;
            let found = if prefix {
                trie.starts_with(&word)
            } else {
                trie.contains(&word)
            };
            output(
                &cli.format,
                &serde_json::json!({
                    "word": word,
                    "prefix": prefix,
                    "found": found
                }),
            );
        }

        Commands::Complete { prefix, limit } => {
            let trie = load_trie(&cli.file)?;
            let mut words = trie.words_with_prefix(&prefix);
            let total = words.len();
            if let Some(limit) = limit {
                words.truncate(limit);
            }
            output(
                &cli.format,
                &serde_json::json!({
                    "prefix": prefix,
                    "total": total,
                    "words": words
                }),
            );
        }

        Commands::Stats => {
            let trie = load_trie(&cli.file)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "kind": trie.kind(),
                    "words": trie.word_count(),
                    "nodes": trie.node_count(),
                    "depth": trie.depth(),
                    "fingerprint": trie.fingerprint().to_hex()
                }),
            );
        }

        Commands::Lcp => {
            let trie = load_trie(&cli.file)?;
            output(
                &cli.format,
                &serde_json::json!({ "prefix": trie.longest_common_prefix() }),
            );
        }

        Commands::Branches => {
            let trie = load_trie(&cli.file)?;
            output(
                &cli.format,
                &serde_json::json!({ "branches": trie.branch_points() }),
            );
        }

        Commands::Ngrams { size } => {
            let trie = load_trie(&cli.file)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "size": size,
                    "ngrams": trie.ngrams(size)
                }),
            );
        }

        Commands::Filter {
            min_len,
            max_len,
            output: out_path,
        } => {
            let trie = load_trie(&cli.file)?;
            let kept = trie.filter(|word| {
                let len = word.chars().count();
                min_len.map_or(true, |min| len >= min) && max_len.map_or(true, |max| len <= max)
            });
            let target = out_path.unwrap_or(cli.file);
            save_trie(&target, &kept)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "file": target.display().to_string(),
                    "kept": kept.word_count(),
                    "dropped": trie.word_count() - kept.word_count()
                }),
            );
        }

        Commands::Merge { other } => {
            let mut trie = load_trie(&cli.file)?;
            let other = load_trie(&other)?;
            trie.merge(&other);
            save_trie(&cli.file, &trie)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "words": trie.word_count()
                }),
            );
        }

        Commands::Show => {
            let trie = load_trie(&cli.file)?;
            match cli.format {
                OutputFormat::Json => output(
                    &cli.format,
                    &serde_json::json!({ "tree": trie.to_pretty_string() }),
                ),
                OutputFormat::Text => print!("{}", trie.to_pretty_string()),
            }
        }
    }

    Ok(())
}

fn load_trie(path: &Path) -> anyhow::Result<Trie> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read {}: {e}", path.display()))?;
    let file: TrieFile = serde_json::from_str(&text)?;
    Ok(Trie::from_wire(file.kind, &file.root)?)
}

fn save_trie(path: &Path, trie: &Trie) -> anyhow::Result<()> {
    let file = TrieFile {
        kind: trie.kind(),
        root: trie.to_wire(),
    };
    fs::write(path, serde_json::to_string_pretty(&file)?)?;
    Ok(())
}

fn output(format: &OutputFormat, value: &serde_json::Value) {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(value).unwrap());
        }
        OutputFormat::Text => {
            println!("{}", serde_json::to_string_pretty(value).unwrap());
        }
    }
}
