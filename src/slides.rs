//! Slide discovery
//!
//! Slides are never found by listing a directory. Candidate filenames are built
//! from the index range and checked one by one, so the resulting order is always
//! numeric index order no matter how the filesystem lists entries.

use std::path::{Path, PathBuf};
use glob::{glob, Pattern};
use crate::error::{Error, Result};

/// Deck name used when none is given
pub const DEFAULT_DECK_NAME: &str = "koko-atulado";

/// Number of slides in a full deck
pub const DEFAULT_SLIDE_COUNT: u32 = 18;

/// One deck of numbered slide screenshots in a directory
#[derive(Debug, Clone)]
pub struct Deck {
    /// Directory holding the slide files (and receiving the PDF)
    pub dir: PathBuf,
    /// Filename prefix shared by every slide
    pub name: String,
    /// First slide index (inclusive, 1-based)
    pub first: u32,
    /// Last slide index (inclusive)
    pub last: u32,
}

impl Default for Deck {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            name: DEFAULT_DECK_NAME.to_string(),
            first: 1,
            last: DEFAULT_SLIDE_COUNT,
        }
    }
}

/// A single slide reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    /// 1-based slide index
    pub index: u32,
    /// Path the slide is expected at
    pub path: PathBuf,
}

impl Slide {
    /// Bare filename of the slide, for reporting
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// The slides found (and not found) for one run
#[derive(Debug, Clone, Default)]
pub struct SlideSet {
    /// Slides whose file exists, in index order
    pub present: Vec<Slide>,
    /// Slides whose file is absent, in index order
    pub missing: Vec<Slide>,
}

impl SlideSet {
    /// Number of slides the deck expects
    pub fn expected(&self) -> usize {
        self.present.len() + self.missing.len()
    }

    /// Number of slides found
    pub fn found(&self) -> usize {
        self.present.len()
    }

    pub fn is_empty(&self) -> bool {
        self.present.is_empty()
    }

    /// Paths of the present slides, in page order
    pub fn paths(&self) -> Vec<PathBuf> {
        self.present.iter().map(|slide| slide.path.clone()).collect()
    }
}

impl Deck {
    /// Create a full-size deck in `dir`
    pub fn new(dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Filename of the slide with the given index, e.g. `deck-slide-07.png`
    pub fn slide_file_name(&self, index: u32) -> String {
        format!("{}-slide-{:02}.png", self.name, index)
    }

    pub fn slide_path(&self, index: u32) -> PathBuf {
        self.dir.join(self.slide_file_name(index))
    }

    /// Default output path, `<dir>/<name>-final.pdf`
    pub fn output_path(&self) -> PathBuf {
        self.dir.join(format!("{}-final.pdf", self.name))
    }

    /// Number of indices in the deck's range
    pub fn slide_count(&self) -> u32 {
        if self.last < self.first {
            0
        } else {
            self.last - self.first + 1
        }
    }

    /// Check every candidate filename and split the deck into present and missing slides
    pub fn discover(&self) -> SlideSet {
        let mut set = SlideSet::default();

        for index in self.first..=self.last {
            let slide = Slide {
                index,
                path: self.slide_path(index),
            };

            if slide.path.is_file() {
                log::debug!("found slide {:02} at {}", index, slide.path.display());
                set.present.push(slide);
            } else {
                log::debug!("slide {:02} missing at {}", index, slide.path.display());
                set.missing.push(slide);
            }
        }

        set
    }

    /// Files that look like slides of this deck but will never be collated
    ///
    /// These are files matching `<name>-slide-*.png` whose suffix is not a
    /// two-digit index inside the deck's range, e.g. `deck-slide-7.png` or
    /// `deck-slide-19.png` for an 18-slide deck.
    pub fn stray_slides(&self) -> Result<Vec<PathBuf>> {
        // Escape both parts so brackets in a directory or deck name match literally
        let pattern = format!(
            "{}/{}-slide-*.png",
            Pattern::escape(&self.dir.to_string_lossy()),
            Pattern::escape(&self.name),
        );

        let entries = glob(&pattern).map_err(|e| Error::InvalidGlob(e.to_string()))?;

        let mut strays = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) => {
                    if self.index_of(&path).is_none() {
                        strays.push(path);
                    }
                }
                Err(e) => log::warn!("glob error for {}: {}", pattern, e),
            }
        }

        strays.sort();
        Ok(strays)
    }

    /// Parse the slide index out of a path, if it names an in-range slide of this deck
    pub fn index_of(&self, path: &Path) -> Option<u32> {
        let file_name = path.file_name()?.to_str()?;
        let digits = file_name
            .strip_prefix(&self.name)?
            .strip_prefix("-slide-")?
            .strip_suffix(".png")?;

        if digits.len() != 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let index: u32 = digits.parse().ok()?;
        (self.first..=self.last).contains(&index).then_some(index)
    }
}
