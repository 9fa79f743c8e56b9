//! Operator console report
//!
//! Written to any `io::Write` so the binary can print to stdout and tests can
//! capture the text.

use std::io::{self, Write};
use crate::collate::{CollateOptions, Outcome};
use crate::pdf::{Encoder, EncoderChoice};
use crate::slides::SlideSet;

/// Format a byte count for humans, e.g. `1.4 MB`
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let size = bytes as f64;
    if size >= MB {
        format!("{:.1} MB", size / MB)
    } else if size >= KB {
        format!("{:.1} KB", size / KB)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Per-slide presence lines and the found/expected summary
fn write_slides(out: &mut impl Write, slides: &SlideSet) -> io::Result<()> {
    // Merge back into index order for the listing
    let mut all: Vec<(u32, String, bool)> = slides
        .present
        .iter()
        .map(|s| (s.index, s.file_name(), true))
        .chain(slides.missing.iter().map(|s| (s.index, s.file_name(), false)))
        .collect();
    all.sort_by_key(|(index, _, _)| *index);

    for (_, name, present) in &all {
        if *present {
            writeln!(out, "  ✓ {}", name)?;
        } else {
            writeln!(out, "  ✗ {} (missing)", name)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Found {}/{} slides", slides.found(), slides.expected())?;

    Ok(())
}

/// Install guidance when no encoder could be selected
fn write_no_encoder(out: &mut impl Write, requested: EncoderChoice) -> io::Result<()> {
    match requested {
        EncoderChoice::Only(encoder) => {
            writeln!(out, "✗ Error: the {} encoder is not available in this build", encoder)?;
            writeln!(
                out,
                "  Rebuild with: cargo install slide-collator --features {}",
                encoder.feature()
            )?;
        }
        EncoderChoice::Auto => {
            writeln!(out, "✗ Error: no PDF encoder is available in this build")?;
            writeln!(out, "  Rebuild with one of:")?;
            for encoder in Encoder::PRIORITY {
                writeln!(
                    out,
                    "    cargo install slide-collator --features {}  ({})",
                    encoder.feature(),
                    encoder.description()
                )?;
            }
        }
    }

    Ok(())
}

/// Write the full report for a finished run
pub fn write_report(out: &mut impl Write, options: &CollateOptions, outcome: &Outcome) -> io::Result<()> {
    let deck = &options.deck;

    writeln!(out, "Collating {} slides from {}", deck.name, deck.dir.display())?;

    match outcome {
        Outcome::NoEncoder { requested } => write_no_encoder(out, *requested)?,
        Outcome::NoSlides { slides } => {
            write_slides(out, slides)?;
            writeln!(
                out,
                "✗ Error: no files matching {}-slide-NN.png found; no PDF written",
                deck.name
            )?;
        }
        Outcome::Written { slides, summary } => {
            write_slides(out, slides)?;
            writeln!(out, "Encoder: {} ({})", summary.encoder, summary.encoder.description())?;
            writeln!(out)?;
            writeln!(out, "✓ PDF created: {}", summary.output.display())?;
            writeln!(out, "  Size: {}", format_size(summary.bytes))?;
            writeln!(out, "  Pages: {}", summary.pages)?;
        }
    }

    Ok(())
}
