use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;

use je::{diff, io};

/// Edit JSON documents with path assignment expressions
#[derive(Parser)]
#[command(name = "je")]
#[command(version)]
#[command(about = "Edit JSON documents with path assignment expressions", long_about = None)]
struct Cli {
    /// JSON file to edit, or "-" to read stdin and write stdout
    file: String,

    /// Assignments to apply in order, e.g. user.name=john age:=30 tags[]=ci
    #[arg(required = true)]
    assignments: Vec<String>,

    /// Write the result here instead of back to FILE
    #[arg(short, long)]
    output: Option<String>,

    /// Start from an empty document when FILE does not exist
    #[arg(short, long)]
    create: bool,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// Print a colored line diff of the changes to stderr
    #[arg(short, long)]
    diff: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let assignments = je::parse_assignments(&cli.assignments)?;

    // The document must be valid JSON before any assignment is applied.
    let data = io::read_document(&cli.file, cli.create)?;
    let doc: Value = serde_json::from_slice(&data)
        .with_context(|| format!("invalid JSON in {}", cli.file))?;

    let doc = je::apply_assignments(doc, &assignments)?;
    let output = io::render_document(&doc, cli.compact)?;

    if cli.diff {
        let original = String::from_utf8_lossy(&data);
        let modified = String::from_utf8_lossy(&output);
        eprint!("{}", diff::render_diff(&original, &modified));
    }

    let target = cli.output.as_deref().unwrap_or(&cli.file);
    io::write_document(target, &output, &cli.file)?;

    Ok(())
}
