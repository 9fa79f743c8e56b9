//! Slide Collator Library
//!
//! Collates a deck of numbered PNG slide screenshots into a single PDF.
//! This library provides functionality to:
//! - Discover `<name>-slide-NN.png` files in index order
//! - Embed PNGs losslessly, or fall back to decoding and re-encoding them
//! - Read back page counts and metadata of the written PDF
//!
//! # Example
//!
//! ```no_run
//! use slide_collator::collate::{collate, CollateOptions, Outcome};
//! use slide_collator::slides::Deck;
//!
//! let options = CollateOptions {
//!     deck: Deck::new("screenshots", "koko-atulado"),
//!     ..Default::default()
//! };
//!
//! match collate(&options).expect("Failed to collate slides") {
//!     Outcome::Written { summary, .. } => println!("{} pages", summary.pages),
//!     other => println!("nothing written: {:?}", other),
//! }
//! ```

pub mod collate;
pub mod error;
pub mod layout;
pub mod pdf;
pub mod report;
pub mod slides;

// Re-export commonly used items
pub use error::{Error, Result};
