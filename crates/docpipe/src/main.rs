use anyhow::Result;
use clap::{Parser, Subcommand};
use docpipe_core::{Error, KeywordConfig};
use docpipe_local::{extract_pages_from_bytes, keywords_from_bytes, layout, InputFormat};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "docpipe")]
#[command(about = "Document keyword plumbing (layout reconstruction + ranking)", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract the ranked keyword list from a document (json).
    Keywords(KeywordsCmd),
    /// Dump the reconstructed word stream (debugging aid; bounded).
    Words(WordsCmd),
    /// Print version info.
    Version(VersionCmd),
}

#[derive(clap::Args, Debug)]
struct KeywordsCmd {
    /// Input file: parsed-document JSON, a PDF, or plain text. Use `-` for stdin.
    input: PathBuf,
    /// Input format. Allowed: auto, parsed-json, pdf, text
    #[arg(long, default_value = "auto")]
    format: String,
    /// Maximum number of ranked terms to return (default 10).
    #[arg(long, env = "DOCPIPE_MAX_TERMS")]
    max_terms: Option<usize>,
    /// Replace the default stop-word set with this file
    /// (one term per line; blank lines and #comments ignored).
    #[arg(long)]
    stop_words_file: Option<PathBuf>,
    /// Output mode. Allowed: json, text
    #[arg(long, default_value = "json")]
    output: String,
    /// Also write the JSON payload to this path.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct WordsCmd {
    /// Input file: parsed-document JSON, a PDF, or plain text. Use `-` for stdin.
    input: PathBuf,
    /// Input format. Allowed: auto, parsed-json, pdf, text
    #[arg(long, default_value = "auto")]
    format: String,
    /// Cap on the number of words included in the dump.
    #[arg(long, default_value_t = 100)]
    limit: usize,
    /// Output mode. Allowed: json, text
    #[arg(long, default_value = "json")]
    output: String,
}

#[derive(clap::Args, Debug)]
struct VersionCmd {
    /// Output mode. Allowed: json, text
    #[arg(long, default_value = "json")]
    output: String,
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        return Ok(buf);
    }
    Ok(std::fs::read(path)?)
}

fn parse_format(s: &str) -> docpipe_core::Result<InputFormat> {
    match s.to_ascii_lowercase().as_str() {
        "auto" => Ok(InputFormat::Auto),
        "parsed-json" => Ok(InputFormat::ParsedJson),
        "pdf" => Ok(InputFormat::Pdf),
        "text" => Ok(InputFormat::Text),
        other => Err(Error::NotSupported(format!("input format: {other}"))),
    }
}

fn load_stop_words(path: &Path) -> Result<Vec<String>> {
    let txt = std::fs::read_to_string(path)?;
    Ok(txt
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(|l| l.to_string())
        .collect())
}

fn write_artifact(out: &Path, payload: &serde_json::Value) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(out, serde_json::to_string_pretty(payload)? + "\n")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Keywords(args) => {
            let format = parse_format(&args.format)?;
            let bytes = read_input(&args.input)?;
            let mut cfg = KeywordConfig::default();
            if let Some(path) = &args.stop_words_file {
                cfg = cfg.with_stop_words(load_stop_words(path)?);
            }
            if let Some(n) = args.max_terms {
                cfg = cfg.with_max_terms(n);
            }
            let report = keywords_from_bytes(&bytes, format, &cfg)?;
            let payload = serde_json::json!({
                "schema_version": 1,
                "kind": "keywords",
                "ok": true,
                "input": args.input.display().to_string(),
                "engine": report.engine,
                "pages": report.pages,
                "words": report.words,
                "keywords": report.keywords,
                "warnings": report.warnings,
            });
            if let Some(out) = &args.out {
                write_artifact(out, &payload)?;
            }
            match args.output.to_ascii_lowercase().as_str() {
                "text" => {
                    for term in &report.keywords {
                        println!("{term}");
                    }
                }
                _ => println!("{payload}"),
            }
        }
        Commands::Words(args) => {
            let format = parse_format(&args.format)?;
            let bytes = read_input(&args.input)?;
            let (engine, extracted) = extract_pages_from_bytes(&bytes, format)?;
            let words = layout::words_from_pages(&extracted.pages);
            let limit = args.limit.clamp(1, 10_000);
            let truncated = words.len() > limit;
            let sample: Vec<&String> = words.iter().take(limit).collect();
            let payload = serde_json::json!({
                "schema_version": 1,
                "kind": "words",
                "ok": true,
                "input": args.input.display().to_string(),
                "engine": engine,
                "pages": extracted.pages.len(),
                "words": words.len(),
                "truncated": truncated,
                "sample": sample,
                "warnings": extracted.warnings,
            });
            match args.output.to_ascii_lowercase().as_str() {
                "text" => {
                    for word in &sample {
                        println!("{word}");
                    }
                }
                _ => println!("{payload}"),
            }
        }
        Commands::Version(args) => {
            let v = serde_json::json!({
                "schema_version": 1,
                "kind": "version",
                "ok": true,
                "name": "docpipe",
                "version": env!("CARGO_PKG_VERSION"),
            });
            match args.output.to_ascii_lowercase().as_str() {
                "text" => println!("docpipe {}", env!("CARGO_PKG_VERSION")),
                _ => println!("{v}"),
            }
        }
    }

    Ok(())
}
