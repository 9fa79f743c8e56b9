//! Encoder selection
//!
//! Encoders are compiled in through Cargo features. At run time they are
//! probed in priority order and the first one available does the work.

use std::fmt;
use std::path::{Path, PathBuf};
use crate::error::Result;
use super::metadata::DocumentInfo;

/// A way of turning slide images into a PDF
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoder {
    /// Embeds PNG data as is, without decoding
    Passthrough,
    /// Decodes each image, flattens alpha onto white and re-encodes as JPEG
    Raster,
}

impl Encoder {
    /// All encoders, most preferred first
    pub const PRIORITY: [Encoder; 2] = [Encoder::Passthrough, Encoder::Raster];

    /// Get the name of the encoder.
    pub fn name(&self) -> &'static str {
        match self {
            Encoder::Passthrough => "passthrough",
            Encoder::Raster => "raster",
        }
    }

    /// One-line summary for the operator report
    pub fn description(&self) -> &'static str {
        match self {
            Encoder::Passthrough => "lossless PNG passthrough",
            Encoder::Raster => "decoded, flattened onto white, JPEG pages at 100 dpi",
        }
    }

    /// Cargo feature that compiles this encoder in
    pub fn feature(&self) -> &'static str {
        match self {
            Encoder::Passthrough => "passthrough",
            Encoder::Raster => "raster",
        }
    }

    /// Whether this build carries the encoder
    pub fn is_available(&self) -> bool {
        match self {
            Encoder::Passthrough => cfg!(feature = "passthrough"),
            Encoder::Raster => cfg!(feature = "raster"),
        }
    }

    /// Write `paths`, in order, as pages of a PDF at `output`
    ///
    /// Returns the number of pages written. All inputs are read before the
    /// output file is created, so a bad input leaves any existing output alone.
    pub fn encode(&self, paths: &[PathBuf], output: &Path, info: &DocumentInfo) -> Result<usize> {
        log::debug!("encoding {} slides with {} encoder", paths.len(), self.name());

        match self {
            #[cfg(feature = "passthrough")]
            Encoder::Passthrough => super::passthrough::encode(paths, output, info),
            #[cfg(feature = "raster")]
            Encoder::Raster => super::raster::encode(paths, output, info),
            #[allow(unreachable_patterns)]
            _ => Err(crate::Error::General(format!(
                "{} encoder is not compiled in (enable the `{}` feature)",
                self.name(),
                self.feature()
            ))),
        }
    }
}

impl fmt::Display for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which encoder the operator asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncoderChoice {
    /// First available encoder in priority order
    #[default]
    Auto,
    /// Exactly this encoder, or none
    Only(Encoder),
}

/// Pick the encoder to use, or `None` if nothing suitable is compiled in
pub fn select_encoder(choice: EncoderChoice) -> Option<Encoder> {
    match choice {
        EncoderChoice::Auto => Encoder::PRIORITY
            .into_iter()
            .find(|encoder| encoder.is_available()),
        EncoderChoice::Only(encoder) => encoder.is_available().then_some(encoder),
    }
}
