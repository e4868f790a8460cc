use anyhow::{bail, Result};
use askdocs_core::{Document, ScoredChunk, Session, DEFAULT_TOP_K};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs;
use std::path::{Path, PathBuf};

/// Score below which the best match is reported as no match at all.
const DEFAULT_MIN_SCORE: f32 = 0.1;

/// Characters of chunk text shown per result in plain output.
const SNIPPET_CHARS: usize = 200;

#[derive(Parser)]
#[command(name = "askdocs")]
#[command(about = "Index text documents and retrieve ranked chunks for a query", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index a file or directory of text files and run a query against it
    Search {
        /// Input path (file or directory)
        input: PathBuf,
        /// Query text
        query: String,
        /// Maximum number of results
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
        /// Report no match when the best score falls below this threshold
        #[arg(long, default_value_t = DEFAULT_MIN_SCORE)]
        min_score: f32,
        /// Emit results as JSON instead of plain text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show library statistics for a file or directory without querying
    Stats {
        /// Input path (file or directory)
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            input,
            query,
            top_k,
            min_score,
            json,
        } => search(&input, &query, top_k, min_score, json),
        Commands::Stats { input } => stats(&input),
    }
}

fn search(input: &Path, query: &str, top_k: usize, min_score: f32, json: bool) -> Result<()> {
    let documents = load_documents(input)?;
    let results = run_query(documents, query, top_k, min_score);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No strong matches found.");
        return Ok(());
    }
    for (rank, result) in results.iter().enumerate() {
        println!("{}. {} (score {:.4})", rank + 1, result.id, result.score);
        println!("   {}", snippet(&result.text, SNIPPET_CHARS));
    }
    Ok(())
}

fn stats(input: &Path) -> Result<()> {
    let documents = load_documents(input)?;
    let mut session = Session::new();
    let chunks = session.load_documents(documents);

    println!("documents: {}", session.documents().len());
    println!("chunks: {}", chunks);
    println!("distinct terms: {}", session.term_count());
    for doc in session.documents() {
        println!("  {} ({} characters)", doc.filename, doc.text.chars().count());
    }
    Ok(())
}

/// Load the whole library and answer one query against it. Results come
/// back empty when the best score misses the threshold, matching the
/// "no strong matches" behavior of the server.
fn run_query(
    documents: Vec<Document>,
    query: &str,
    top_k: usize,
    min_score: f32,
) -> Vec<ScoredChunk> {
    let mut session = Session::new();
    session.load_documents(documents);

    let results = session.query(query, top_k);
    match results.first() {
        Some(best) if best.score >= min_score => results,
        _ => Vec::new(),
    }
}

/// Read every text-like file under `input` into a document, named by its
/// path relative to the input root. A single-file input is read as-is.
fn load_documents(input: &Path) -> Result<Vec<Document>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "txt" | "md" | "csv" | "log") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        bail!("input path {} does not exist", input.display());
    }
    // Walk order varies by platform; a sorted library keeps chunk ids and
    // positions reproducible.
    files.sort();

    let mut documents = Vec::with_capacity(files.len());
    for file in files {
        let bytes = fs::read(&file)?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let filename = file
            .strip_prefix(input)
            .unwrap_or(&file)
            .to_string_lossy()
            .into_owned();
        let filename = if filename.is_empty() {
            file.to_string_lossy().into_owned()
        } else {
            filename
        };
        documents.push(Document::new(filename, text));
    }
    tracing::info!(documents = documents.len(), "loaded library from disk");
    Ok(documents)
}

/// First `max_chars` characters of `text` with whitespace collapsed,
/// marked with an ellipsis when truncated.
fn snippet(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let mut cut: String = flat.chars().take(max_chars).collect();
    cut.push_str("...");
    cut
}
