//! Raster fallback encoder
//!
//! Every slide is fully decoded, any alpha channel is composited onto white,
//! and the result is stored as a JPEG page at a fixed resolution.

use std::path::{Path, PathBuf};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, Rgb, RgbImage};
use lopdf::Object;
use crate::error::Result;
use crate::layout::{PageDimensions, Resolution, RASTER_DPI};
use super::builder::{ImageDocument, ImageXObject};
use super::metadata::DocumentInfo;

/// JPEG quality for raster pages
pub const JPEG_QUALITY: u8 = 95;

/// Build a PDF by decoding and re-encoding every image
pub fn encode(paths: &[PathBuf], output: &Path, info: &DocumentInfo) -> Result<usize> {
    // Decode everything up front so a bad file fails before anything is written
    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        log::debug!("decoding {}", path.display());
        images.push(image::open(path)?);
    }

    let mut document = ImageDocument::new();
    let resolution = Resolution::uniform(RASTER_DPI);

    for image in &images {
        let rgb = flatten_onto_white(image);
        let page = PageDimensions::from_pixels(rgb.width(), rgb.height(), resolution);
        document.add_image_page(jpeg_xobject(&rgb)?, &page)?;
    }

    let pages = document.page_count();
    document.save(output, info)?;

    Ok(pages)
}

/// Blend one color channel with a white background, weighted by alpha
///
/// `alpha = 0` gives 255 (white), `alpha = 255` gives the channel unchanged.
pub fn blend_with_white(channel: u8, alpha: u8) -> u8 {
    let (c, a) = (channel as u32, alpha as u32);
    // Rounded integer form of c * a/255 + 255 * (1 - a/255)
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}

/// Convert any image to opaque RGB, compositing transparency onto white
pub fn flatten_onto_white(image: &DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }

    let rgba = image.to_rgba8();
    let mut rgb = RgbImage::new(rgba.width(), rgba.height());

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        rgb.put_pixel(
            x,
            y,
            Rgb([blend_with_white(r, a), blend_with_white(g, a), blend_with_white(b, a)]),
        );
    }

    rgb
}

/// JPEG-encode an RGB image as a `DCTDecode` XObject
fn jpeg_xobject(rgb: &RgbImage) -> Result<ImageXObject> {
    let mut data = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut data, JPEG_QUALITY);
        encoder.encode_image(rgb)?;
    }

    Ok(ImageXObject {
        width: rgb.width(),
        height: rgb.height(),
        color_space: Object::Name(b"DeviceRGB".to_vec()),
        bits_per_component: 8,
        filter: "DCTDecode",
        decode_parms: None,
        data,
    })
}
