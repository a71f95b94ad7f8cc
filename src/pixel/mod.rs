//! Pixel access and tolerance matching
//!
//! The engine never reads pixels through a concrete image type. All scans
//! go through the [`PixelSource`] trait, a read-only 2-D indexable color
//! buffer implemented by adapters: [`image::RgbImage`] for decoded files
//! and [`RawPixels`] for interleaved RGB byte buffers handed in by
//! external callers.
//!
//! Out-of-range access is a programmer error and panics; callers are
//! required to pre-clamp coordinates (see `Polygon::bind_to`).

use image::{Rgb, RgbImage};

use crate::geometry::Size;

/// Default per-channel tolerance for "same color" comparisons
pub const DEFAULT_TOLERANCE: u8 = 25;

/// True iff every channel of `a` and `b` differs by at most `tolerance`
/// (inclusive). Symmetric in its arguments.
#[inline]
pub fn matches(a: Rgb<u8>, b: Rgb<u8>, tolerance: u8) -> bool {
    a.0.iter()
        .zip(b.0.iter())
        .all(|(&x, &y)| x.abs_diff(y) <= tolerance)
}

/// Read-only 2-D pixel accessor over `[0, width) x [0, height)`
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics when `(x, y)` lies outside the image.
    fn pixel(&self, x: u32, y: u32) -> Rgb<u8>;

    fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}

impl PixelSource for RgbImage {
    fn width(&self) -> u32 {
        RgbImage::width(self)
    }

    fn height(&self) -> u32 {
        RgbImage::height(self)
    }

    fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.get_pixel(x, y)
    }
}

/// Adapter over an interleaved RGB byte buffer (3 bytes per pixel,
/// row-major)
#[derive(Debug, Clone, Copy)]
pub struct RawPixels<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> RawPixels<'a> {
    /// # Panics
    ///
    /// Panics when `data` is not exactly `width * height * 3` bytes.
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Self {
        assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * 3,
            "raw buffer length must be width * height * 3"
        );
        Self {
            data,
            width,
            height,
        }
    }
}

impl PixelSource for RawPixels<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        assert!(x < self.width && y < self.height, "pixel out of range");
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 3;
        Rgb([self.data[idx], self.data[idx + 1], self.data[idx + 2]])
    }
}

/// True iff every pixel of row `y` in `x0..x1` matches `reference`.
/// Early-exits on the first mismatch.
pub fn row_is_uniform<S: PixelSource + ?Sized>(
    src: &S,
    y: u32,
    x0: u32,
    x1: u32,
    reference: Rgb<u8>,
    tolerance: u8,
) -> bool {
    (x0..x1).all(|x| matches(src.pixel(x, y), reference, tolerance))
}

/// True iff every pixel of column `x` in `y0..y1` matches `reference`
pub fn col_is_uniform<S: PixelSource + ?Sized>(
    src: &S,
    x: u32,
    y0: u32,
    y1: u32,
    reference: Rgb<u8>,
    tolerance: u8,
) -> bool {
    (y0..y1).all(|y| matches(src.pixel(x, y), reference, tolerance))
}
