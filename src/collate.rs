//! One collation run: pick an encoder, find the slides, write the PDF

use std::fs;
use std::path::PathBuf;
use crate::error::Result;
use crate::pdf::{count_pages, select_encoder, DocumentInfo, Encoder, EncoderChoice};
use crate::slides::{Deck, SlideSet};

/// Options for a collation run
#[derive(Debug, Clone, Default)]
pub struct CollateOptions {
    /// Deck to collate
    pub deck: Deck,
    /// Output PDF path; defaults to the deck's `<name>-final.pdf`
    pub output: Option<PathBuf>,
    /// Encoder preference
    pub encoder: EncoderChoice,
}

impl CollateOptions {
    /// Where the PDF will be written
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.deck.output_path())
    }
}

/// Details of a written PDF
#[derive(Debug, Clone)]
pub struct CollateSummary {
    pub output: PathBuf,
    pub encoder: Encoder,
    /// Page count read back from the written file
    pub pages: usize,
    /// Size of the written file in bytes
    pub bytes: u64,
}

/// How a run ended, short of an unexpected failure
#[derive(Debug, Clone)]
pub enum Outcome {
    /// No usable encoder is compiled in; nothing was scanned or written
    NoEncoder { requested: EncoderChoice },
    /// None of the slide files exist; nothing was written
    NoSlides { slides: SlideSet },
    /// The PDF was written
    Written { slides: SlideSet, summary: CollateSummary },
}

impl Outcome {
    pub fn is_written(&self) -> bool {
        matches!(self, Outcome::Written { .. })
    }
}

/// Run one collation
///
/// Missing slides and a missing encoder are reported through [`Outcome`].
/// Read, decode and write failures are returned as errors and nothing is retried.
pub fn collate(options: &CollateOptions) -> Result<Outcome> {
    // Probe encoders before touching the filesystem
    let Some(encoder) = select_encoder(options.encoder) else {
        log::warn!("no encoder available for {:?}", options.encoder);
        return Ok(Outcome::NoEncoder {
            requested: options.encoder,
        });
    };
    log::debug!("using {} encoder", encoder);

    let deck = &options.deck;
    let slides = deck.discover();

    for stray in deck.stray_slides()? {
        log::warn!("ignoring {}: not a slide index in {}..={}", stray.display(), deck.first, deck.last);
    }

    if slides.is_empty() {
        return Ok(Outcome::NoSlides { slides });
    }

    let output = options.output_path();
    let info = DocumentInfo::new(deck.name.as_str());

    let written = encoder.encode(&slides.paths(), &output, &info)?;
    let pages = count_pages(&output)?;
    if pages != written {
        log::warn!("wrote {} pages but {} reports {}", written, output.display(), pages);
    }

    let bytes = fs::metadata(&output)?.len();

    Ok(Outcome::Written {
        slides,
        summary: CollateSummary {
            output,
            encoder,
            pages,
            bytes,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_output_path() {
        let options = CollateOptions {
            deck: Deck::new("/decks", "demo"),
            ..Default::default()
        };
        assert_eq!(options.output_path(), PathBuf::from("/decks/demo-final.pdf"));
    }

    #[test]
    fn test_output_override() {
        let options = CollateOptions {
            output: Some(PathBuf::from("elsewhere.pdf")),
            ..Default::default()
        };
        assert_eq!(options.output_path(), PathBuf::from("elsewhere.pdf"));
    }

    #[test]
    fn test_no_slides_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let options = CollateOptions {
            deck: Deck::new(temp_dir.path(), "deck"),
            ..Default::default()
        };

        let outcome = collate(&options).unwrap();
        match outcome {
            Outcome::NoSlides { slides } => assert_eq!(slides.missing.len(), 18),
            Outcome::NoEncoder { .. } => {}
            Outcome::Written { .. } => panic!("nothing should be written"),
        }
        assert!(!options.output_path().exists());
    }
}
