//! The `mathdown` binary.

use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use mathdown::{parse_document, Arena, Options};

#[derive(Debug, Parser)]
#[command(
    name = "mathdown",
    version,
    about = "A Markdown to HTML (or Markdown) converter with first-class math spans"
)]
struct Cli {
    /// The Markdown file(s) to parse; or standard input if none passed
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Specify output format
    #[arg(
        short = 't',
        long = "to",
        value_enum,
        default_value = "html",
        value_name = "FORMAT"
    )]
    format: Format,

    /// Treat newlines as hard line breaks
    #[arg(long)]
    hardbreaks: bool,

    /// Disable `$`/`$$` math spans
    #[arg(long)]
    no_math: bool,

    /// Specify wrap width (0 = nowrap)
    #[arg(long, default_value_t = 0, value_name = "WIDTH")]
    width: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Html,
    Commonmark,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let mut options = Options::default();
    options.extension.math_dollars = !cli.no_math;
    options.render.hardbreaks = cli.hardbreaks;
    options.render.width = cli.width;

    let mut input = String::new();
    if cli.files.is_empty() {
        io::stdin().read_to_string(&mut input)?;
    } else {
        for path in &cli.files {
            input.push_str(&fs::read_to_string(path)?);
        }
    }

    let arena = Arena::new();
    let root = parse_document(&arena, &input, &options);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        Format::Html => mathdown::html::format_document(root, &options, &mut out)?,
        Format::Commonmark => mathdown::cm::format_document(root, &options, &mut out)?,
    }
    out.flush()?;

    Ok(())
}
