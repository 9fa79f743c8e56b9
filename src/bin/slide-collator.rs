//! Slide Collator CLI tool
//!
//! Collates `koko-atulado-slide-01.png` .. `koko-atulado-slide-18.png` from the
//! current directory into `koko-atulado-final.pdf`. Every flag is optional.

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::LevelFilter;

use slide_collator::collate::{collate, CollateOptions};
use slide_collator::pdf::{Encoder, EncoderChoice};
use slide_collator::report::write_report;
use slide_collator::slides::{Deck, DEFAULT_DECK_NAME, DEFAULT_SLIDE_COUNT};

/// Slide Collator - Assemble numbered slide screenshots into one PDF
#[derive(Parser)]
#[command(name = "slide-collator")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Collate koko-atulado-slide-01.png .. -18.png in the current directory
    slide-collator

    # Collate another deck elsewhere
    slide-collator --dir ~/screenshots --name quarterly --count 12

    # Skip lossless passthrough (e.g. for screenshots with transparency)
    slide-collator --encoder raster")]
struct Cli {
    /// Directory holding the slides (defaults to the current directory)
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Deck name; slides are <NAME>-slide-NN.png
    #[arg(long, default_value = DEFAULT_DECK_NAME)]
    name: String,

    /// Number of slides in the deck
    #[arg(long, default_value_t = DEFAULT_SLIDE_COUNT, value_parser = clap::value_parser!(u32).range(1..=99))]
    count: u32,

    /// Output PDF file path (defaults to <DIR>/<NAME>-final.pdf)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Encoder to use
    #[arg(long, value_enum, default_value_t = EncoderArg::Auto)]
    encoder: EncoderArg,

    /// Log each step to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum EncoderArg {
    /// Lossless passthrough if available, otherwise raster
    Auto,
    /// Embed PNG data as is
    Passthrough,
    /// Decode, flatten transparency onto white, store as JPEG
    Raster,
}

impl From<EncoderArg> for EncoderChoice {
    fn from(arg: EncoderArg) -> Self {
        match arg {
            EncoderArg::Auto => EncoderChoice::Auto,
            EncoderArg::Passthrough => EncoderChoice::Only(Encoder::Passthrough),
            EncoderArg::Raster => EncoderChoice::Only(Encoder::Raster),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Warnings by default, everything with --verbose; RUST_LOG wins over both
fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let dir = match cli.dir {
        Some(dir) => dir,
        None => env::current_dir().context("Cannot determine the current directory")?,
    };

    let options = CollateOptions {
        deck: Deck {
            dir,
            name: cli.name,
            first: 1,
            last: cli.count,
        },
        output: cli.output,
        encoder: cli.encoder.into(),
    };

    let outcome = collate(&options)
        .with_context(|| format!("Failed to collate slides in {}", options.deck.dir.display()))?;

    // Missing slides or encoders are reported, not treated as failures
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &options, &outcome)?;
    out.flush()?;

    Ok(())
}
