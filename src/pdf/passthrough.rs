//! Lossless PNG passthrough
//!
//! A PNG's IDAT payload is a zlib stream of filtered scanlines, which is exactly
//! what a PDF `FlateDecode` filter with PNG predictors (`/Predictor 15`) reads.
//! The bytes are copied into the PDF untouched: no decoding, no quality loss.

use std::path::{Path, PathBuf};
use lopdf::{Dictionary, Object, StringFormat};
use crate::error::{Error, Result};
use crate::layout::{PageDimensions, Resolution, DEFAULT_PNG_DPI};
use super::builder::{ImageDocument, ImageXObject};
use super::metadata::DocumentInfo;
use super::png::{read_png, ColorType, PngImage};

/// Build a PDF from PNG files without re-encoding them
pub fn encode(paths: &[PathBuf], output: &Path, info: &DocumentInfo) -> Result<usize> {
    let mut document = ImageDocument::new();

    for path in paths {
        let png = read_png(path)?;
        let (image, page) = image_xobject(path, png)?;
        document.add_image_page(image, &page)?;
    }

    let pages = document.page_count();
    document.save(output, info)?;

    Ok(pages)
}

/// Turn a parsed PNG into an image XObject and the page it fills
///
/// Images that would need decoding to embed (alpha, transparency, interlacing)
/// are refused rather than silently altered.
pub fn image_xobject(path: &Path, png: PngImage) -> Result<(ImageXObject, PageDimensions)> {
    let header = png.header;

    let unsupported = |reason: &str| Error::UnsupportedPng {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    if png.has_transparency {
        return Err(unsupported("image has a transparent color (tRNS)"));
    }
    if header.interlaced {
        return Err(unsupported("image is Adam7 interlaced"));
    }

    let color_space = match header.color_type {
        ColorType::Gray => Object::Name(b"DeviceGray".to_vec()),
        ColorType::Rgb => Object::Name(b"DeviceRGB".to_vec()),
        ColorType::Indexed => {
            // Checked by the parser: indexed images always carry a palette
            let palette = png.palette.unwrap_or_default();
            let hival = (palette.len() / 3).saturating_sub(1);
            Object::Array(vec![
                Object::Name(b"Indexed".to_vec()),
                Object::Name(b"DeviceRGB".to_vec()),
                Object::Integer(hival as i64),
                Object::String(palette, StringFormat::Hexadecimal),
            ])
        }
        ColorType::GrayAlpha | ColorType::Rgba => {
            return Err(unsupported("image has an alpha channel"));
        }
    };

    let mut decode_parms = Dictionary::new();
    decode_parms.set("Predictor", Object::Integer(15));
    decode_parms.set("Colors", Object::Integer(header.color_type.channels() as i64));
    decode_parms.set("BitsPerComponent", Object::Integer(header.bit_depth as i64));
    decode_parms.set("Columns", Object::Integer(header.width as i64));

    let resolution = png
        .resolution
        .unwrap_or_else(|| Resolution::uniform(DEFAULT_PNG_DPI));
    let page = PageDimensions::from_pixels(header.width, header.height, resolution);

    log::debug!(
        "{}: {}x{} {:?} {}-bit, {:.0}x{:.0} dpi",
        path.display(),
        header.width,
        header.height,
        header.color_type,
        header.bit_depth,
        resolution.x,
        resolution.y
    );

    let image = ImageXObject {
        width: header.width,
        height: header.height,
        color_space,
        bits_per_component: header.bit_depth,
        filter: "FlateDecode",
        decode_parms: Some(decode_parms),
        data: png.data,
    };

    Ok((image, page))
}
