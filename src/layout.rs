//! Page layout calculations
//!
//! Every slide becomes one page sized to the image itself, so layout is just a
//! matter of turning pixels into points at some resolution.

/// Resolution assumed for PNGs that carry no physical size
pub const DEFAULT_PNG_DPI: f64 = 96.0;

/// Resolution the raster encoder places its pages at
pub const RASTER_DPI: f64 = 100.0;

const MM_PER_INCH: f64 = 25.4;
const INCHES_PER_METER: f64 = 1000.0 / MM_PER_INCH;

/// Simple length type in millimeters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length(pub f64);

impl Length {
    /// Create a length from millimeters
    pub fn from_mm(mm: f64) -> Self {
        Length(mm)
    }

    /// Create a length from inches
    pub fn from_inches(inches: f64) -> Self {
        Length(inches * MM_PER_INCH)
    }

    /// Create a length from a pixel count at the given dots per inch
    pub fn from_pixels(pixels: u32, dpi: f64) -> Self {
        Self::from_inches(pixels as f64 / dpi)
    }

    /// Get the value in millimeters
    pub fn mm(&self) -> f64 {
        self.0
    }

    /// Get the value in points (1/72 inch)
    pub fn pt(&self) -> f64 {
        self.0 * 72.0 / MM_PER_INCH
    }
}

/// Horizontal and vertical resolution in dots per inch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub x: f64,
    pub y: f64,
}

impl Resolution {
    /// Same resolution on both axes
    pub fn uniform(dpi: f64) -> Self {
        Self { x: dpi, y: dpi }
    }

    /// Convert a PNG `pHYs` density (pixels per meter) to dots per inch
    ///
    /// Returns `None` for a zero density on either axis, which would give an
    /// infinitely large page.
    pub fn from_pixels_per_meter(x: u32, y: u32) -> Option<Self> {
        if x == 0 || y == 0 {
            return None;
        }

        Some(Self {
            x: x as f64 / INCHES_PER_METER,
            y: y as f64 / INCHES_PER_METER,
        })
    }
}

/// Page dimensions
#[derive(Debug, Clone, Copy)]
pub struct PageDimensions {
    pub width: Length,
    pub height: Length,
}

impl PageDimensions {
    /// Page that exactly fits an image of the given pixel size
    pub fn from_pixels(width: u32, height: u32, resolution: Resolution) -> Self {
        Self {
            width: Length::from_pixels(width, resolution.x),
            height: Length::from_pixels(height, resolution.y),
        }
    }

    /// `[0 0 w h]` MediaBox values in points
    pub fn media_box(&self) -> [f32; 4] {
        [0.0, 0.0, self.width.pt() as f32, self.height.pt() as f32]
    }
}
