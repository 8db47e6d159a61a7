use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::error::{Result, TraceError};

/// Pixels with alpha at or below this value are off.
pub const ALPHA_THRESHOLD: u8 = 128;

/// Pixels whose mean RGB is at or below this value are off.
pub const BRIGHTNESS_THRESHOLD: u8 = 128;

/// Boolean grid marking the bright, opaque pixels of an image.
///
/// Stored row-major; `get(x, y)` reads column `x` of row `y`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl Mask {
    /// Wrap a row-major vector of cells.
    pub fn from_bools(width: u32, height: u32, cells: Vec<bool>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if cells.len() != expected {
            return Err(TraceError::MalformedImage(format!(
                "mask of {}x{} needs {} cells, got {}",
                width,
                height,
                expected,
                cells.len()
            )));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Cell at column `x`, row `y`. Out-of-bounds reads are off.
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.cells[y as usize * self.width as usize + x as usize]
    }

    /// All cells of row `y`, left to right. Rows past the bottom are empty.
    pub fn row(&self, y: u32) -> &[bool] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        (0..self.height).map(move |y| self.row(y))
    }

    /// Number of on cells.
    pub fn count_on(&self) -> usize {
        self.cells.iter().filter(|&&on| on).count()
    }
}

/// Threshold rule for a single sample: opaque enough and bright enough.
///
/// The RGB mean is compared as `r + g + b > 3 * threshold`, which is exact for
/// integer channels and agrees with a floating-point mean at the boundary.
pub fn is_on(pixel: Rgba<u8>) -> bool {
    let [r, g, b, a] = pixel.0;
    let sum = r as u16 + g as u16 + b as u16;
    a > ALPHA_THRESHOLD && sum > 3 * BRIGHTNESS_THRESHOLD as u16
}

/// Build the mask for a decoded image.
pub fn build_mask(image: &RgbaImage) -> Mask {
    let (width, height) = image.dimensions();
    let cells: Vec<bool> = image.pixels().map(|&pixel| is_on(pixel)).collect();
    debug!(
        width,
        height,
        on = cells.iter().filter(|&&on| on).count(),
        "built mask"
    );

    Mask {
        width,
        height,
        cells,
    }
}

/// Wrap a raw RGBA8 buffer, rejecting buffers that don't hold exactly `width * height` pixels.
pub fn rgba_from_raw(width: u32, height: u32, buf: Vec<u8>) -> Result<RgbaImage> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| {
            TraceError::MalformedImage(format!("{}x{} overflows the pixel buffer", width, height))
        })?;

    if buf.len() != expected {
        return Err(TraceError::MalformedImage(format!(
            "{}x{} RGBA image needs {} bytes, got {}",
            width,
            height,
            expected,
            buf.len()
        )));
    }

    RgbaImage::from_raw(width, height, buf).ok_or_else(|| {
        TraceError::MalformedImage(format!("{}x{} buffer rejected", width, height))
    })
}
