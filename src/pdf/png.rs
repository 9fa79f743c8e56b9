//! PNG container parsing
//!
//! Only the chunks needed to embed a PNG into a PDF without decoding it are
//! read: IHDR, PLTE, tRNS, pHYs and the IDAT payload. The zlib stream inside
//! IDAT is never inflated; PDF's FlateDecode with a PNG predictor reads it as is.

use std::fs;
use std::path::Path;
use crate::error::{Error, Result};
use crate::layout::Resolution;

/// Eight-byte signature every PNG file starts with
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// PNG color types (IHDR byte 9)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorType {
    Gray,
    Rgb,
    Indexed,
    GrayAlpha,
    Rgba,
}

impl ColorType {
    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(ColorType::Gray),
            2 => Some(ColorType::Rgb),
            3 => Some(ColorType::Indexed),
            4 => Some(ColorType::GrayAlpha),
            6 => Some(ColorType::Rgba),
            _ => None,
        }
    }

    /// Samples per pixel as stored in the image data
    pub fn channels(&self) -> u8 {
        match self {
            ColorType::Gray | ColorType::Indexed => 1,
            ColorType::GrayAlpha => 2,
            ColorType::Rgb => 3,
            ColorType::Rgba => 4,
        }
    }

    pub fn has_alpha(&self) -> bool {
        matches!(self, ColorType::GrayAlpha | ColorType::Rgba)
    }

    fn allows_bit_depth(&self, depth: u8) -> bool {
        match self {
            ColorType::Gray => matches!(depth, 1 | 2 | 4 | 8 | 16),
            ColorType::Indexed => matches!(depth, 1 | 2 | 4 | 8),
            ColorType::Rgb | ColorType::GrayAlpha | ColorType::Rgba => matches!(depth, 8 | 16),
        }
    }
}

/// Decoded IHDR chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngHeader {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: ColorType,
    pub interlaced: bool,
}

/// A PNG split into the parts a PDF image XObject needs
#[derive(Debug, Clone)]
pub struct PngImage {
    pub header: PngHeader,
    /// RGB triplets from PLTE (indexed images only)
    pub palette: Option<Vec<u8>>,
    /// Whether a tRNS chunk marks some color or palette entry as transparent
    pub has_transparency: bool,
    /// Physical resolution from pHYs, when given in pixels per meter
    pub resolution: Option<Resolution>,
    /// Concatenated IDAT payload (a single zlib stream)
    pub data: Vec<u8>,
}

/// Read and parse a PNG file
pub fn read_png(path: &Path) -> Result<PngImage> {
    let bytes = fs::read(path)?;
    parse_png(&bytes).map_err(|reason| Error::InvalidPng {
        path: path.to_path_buf(),
        reason,
    })
}

/// Parse PNG bytes, returning a human-readable reason on malformed input
pub fn parse_png(bytes: &[u8]) -> std::result::Result<PngImage, String> {
    let mut rest = bytes
        .strip_prefix(&PNG_SIGNATURE[..])
        .ok_or_else(|| "missing PNG signature".to_string())?;

    let mut header = None;
    let mut palette = None;
    let mut has_transparency = false;
    let mut resolution = None;
    let mut data = Vec::new();

    loop {
        let (chunk_type, chunk_data, remaining) = next_chunk(rest)?;
        rest = remaining;

        // IHDR must come first
        if header.is_none() && chunk_type != *b"IHDR" {
            return Err("first chunk is not IHDR".to_string());
        }

        match &chunk_type {
            b"IHDR" => header = Some(parse_header(chunk_data)?),
            b"PLTE" => {
                if chunk_data.is_empty() || chunk_data.len() % 3 != 0 {
                    return Err(format!("PLTE length {} is not a multiple of 3", chunk_data.len()));
                }
                palette = Some(chunk_data.to_vec());
            }
            b"tRNS" => has_transparency = true,
            b"pHYs" => {
                // Unit 1 is the meter; unit 0 only gives an aspect ratio
                if chunk_data.len() == 9 && chunk_data[8] == 1 {
                    resolution = Resolution::from_pixels_per_meter(
                        be_u32(&chunk_data[0..4]),
                        be_u32(&chunk_data[4..8]),
                    );
                }
            }
            b"IDAT" => data.extend_from_slice(chunk_data),
            b"IEND" => break,
            _ => {}
        }
    }

    let header = header.ok_or_else(|| "missing IHDR".to_string())?;

    if data.is_empty() {
        return Err("no IDAT data".to_string());
    }
    if header.color_type == ColorType::Indexed && palette.is_none() {
        return Err("indexed image without PLTE".to_string());
    }

    Ok(PngImage {
        header,
        palette: if header.color_type == ColorType::Indexed { palette } else { None },
        has_transparency,
        resolution,
        data,
    })
}

/// Split off one chunk: (type, data, rest). The CRC is skipped, not checked.
fn next_chunk(bytes: &[u8]) -> std::result::Result<([u8; 4], &[u8], &[u8]), String> {
    if bytes.len() < 12 {
        return Err("truncated chunk header".to_string());
    }

    let length = be_u32(&bytes[0..4]) as usize;
    let chunk_type = [bytes[4], bytes[5], bytes[6], bytes[7]];

    let end = 8usize
        .checked_add(length)
        .and_then(|n| n.checked_add(4))
        .filter(|&n| n <= bytes.len())
        .ok_or_else(|| {
            format!("truncated {} chunk", String::from_utf8_lossy(&chunk_type))
        })?;

    Ok((chunk_type, &bytes[8..8 + length], &bytes[end..]))
}

fn parse_header(data: &[u8]) -> std::result::Result<PngHeader, String> {
    if data.len() != 13 {
        return Err(format!("IHDR length is {}, expected 13", data.len()));
    }

    let width = be_u32(&data[0..4]);
    let height = be_u32(&data[4..8]);
    if width == 0 || height == 0 {
        return Err(format!("invalid dimensions {}x{}", width, height));
    }

    let bit_depth = data[8];
    let color_type = ColorType::from_byte(data[9])
        .ok_or_else(|| format!("unknown color type {}", data[9]))?;
    if !color_type.allows_bit_depth(bit_depth) {
        return Err(format!("bit depth {} not allowed for {:?}", bit_depth, color_type));
    }

    let interlaced = match data[12] {
        0 => false,
        1 => true,
        other => return Err(format!("unknown interlace method {}", other)),
    };

    Ok(PngHeader {
        width,
        height,
        bit_depth,
        color_type,
        interlaced,
    })
}

fn be_u32(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
