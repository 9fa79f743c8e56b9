//! PDF assembly module

pub mod builder;
pub mod encoder;
pub mod metadata;
#[cfg(feature = "passthrough")]
pub mod png;
#[cfg(feature = "passthrough")]
pub mod passthrough;
#[cfg(feature = "raster")]
pub mod raster;

// Re-export commonly used items
pub use builder::{ImageDocument, ImageXObject};
pub use encoder::{select_encoder, Encoder, EncoderChoice};
pub use metadata::{count_pages, extract_metadata, DocumentInfo, PdfMetadata};
