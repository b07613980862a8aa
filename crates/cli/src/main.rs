//! CLI tool for converting Marp-style markdown decks to PowerPoint.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use slidemd_core::{Deck, Error, RenderTarget};
use slidemd_pptx::PptxDeck;
use std::path::{Path, PathBuf};

/// Suffix appended to the input stem for the default output file.
const OUTPUT_SUFFIX: &str = "-slides";

/// Convert a Marp-style markdown deck into a PowerPoint presentation.
#[derive(Parser, Debug)]
#[command(name = "slidemd")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input markdown file
    input: PathBuf,

    /// Output .pptx path (default: <input stem>-slides.pptx next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the parsed deck as JSON instead of writing a file
    #[arg(short, long)]
    print: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            return Ok(());
        }
        Err(e) => return Err(Error::UsageError(usage_message(&e)).into()),
    };

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let deck = load_deck(&args.input)?;
    log::debug!("Parsed {} slides from {}", deck.len(), args.input.display());

    if args.print {
        println!("{}", serde_json::to_string_pretty(&deck)?);
        return Ok(());
    }

    let output_path = get_output_path(&args.input, args.output.as_deref());
    let written = convert(&deck, &args.input, &output_path)?;
    println!("Generated: {}", written.display());

    Ok(())
}

/// Clap's rendered message without its own `error:` prefix, which anyhow
/// already supplies.
fn usage_message(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    rendered
        .strip_prefix("error: ")
        .unwrap_or(&rendered)
        .trim_end()
        .to_string()
}

/// Read and parse a markdown deck.
fn load_deck(input_path: &Path) -> Result<Deck> {
    let source = std::fs::read_to_string(input_path)
        .with_context(|| format!("Failed to read {}", input_path.display()))?;

    Deck::parse(&source).with_context(|| format!("Failed to parse {}", input_path.display()))
}

/// Render the deck to a .pptx file and return its absolute path.
fn convert(deck: &Deck, input_path: &Path, output_path: &Path) -> Result<PathBuf> {
    let title = input_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("presentation");

    let mut pptx = PptxDeck::new().with_title(title);
    deck.render(&mut pptx)
        .with_context(|| format!("Failed to render {}", input_path.display()))?;
    pptx.save(output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    output_path
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", output_path.display()))
}

/// Determine the output path for a converted file.
fn get_output_path(input_path: &Path, output: Option<&Path>) -> PathBuf {
    if let Some(path) = output {
        return path.to_path_buf();
    }

    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let output_filename = format!("{}{}.pptx", stem, OUTPUT_SUFFIX);

    match input_path.parent() {
        Some(parent) => parent.join(output_filename),
        None => PathBuf::from(output_filename),
    }
}
