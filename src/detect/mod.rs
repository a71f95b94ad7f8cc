//! Solid-band detection
//!
//! Scans an image for rows and columns that are one uniform color within
//! tolerance ("solid" lines) and consolidates the resulting indices into
//! split bands. Solid lines are where an image can be cut without going
//! through content.
//!
//! Each line is compared against its own index-0 reference pixel (the
//! leftmost pixel of a row, the topmost pixel of a column); a line
//! qualifies only when every other pixel matches the reference. Lines are
//! scanned in parallel with rayon; no scan depends on any other line.

mod bands;

pub use bands::{consolidate, merge_short_bands, Band, DEFAULT_MIN_BAND_FRACTION};

use rayon::prelude::*;
use tracing::debug;

use crate::options::SplitOptions;
use crate::pixel::{col_is_uniform, row_is_uniform, PixelSource};

/// Y indices of rows whose every pixel matches the row's leftmost pixel
/// within `tolerance`. Empty for an empty image.
pub fn solid_rows<S: PixelSource + Sync>(src: &S, tolerance: u8) -> Vec<u32> {
    let (width, height) = (src.width(), src.height());
    if width == 0 || height == 0 {
        return Vec::new();
    }
    (0..height)
        .into_par_iter()
        .filter(|&y| {
            let reference = src.pixel(0, y);
            row_is_uniform(src, y, 1, width, reference, tolerance)
        })
        .collect()
}

/// X indices of columns whose every pixel matches the column's topmost
/// pixel within `tolerance`
pub fn solid_cols<S: PixelSource + Sync>(src: &S, tolerance: u8) -> Vec<u32> {
    let (width, height) = (src.width(), src.height());
    if width == 0 || height == 0 {
        return Vec::new();
    }
    (0..width)
        .into_par_iter()
        .filter(|&x| {
            let reference = src.pixel(x, 0);
            col_is_uniform(src, x, 1, height, reference, tolerance)
        })
        .collect()
}

/// Raw solid indices for both axes: `(rows, cols)`
pub fn solid_grid<S: PixelSource + Sync>(src: &S, tolerance: u8) -> (Vec<u32>, Vec<u32>) {
    (solid_rows(src, tolerance), solid_cols(src, tolerance))
}

/// Consolidated bands for both axes: `(row_bands, col_bands)`.
///
/// An axis with no solid lines still yields one band covering it fully,
/// so downstream grid construction always has usable ranges.
pub fn band_grid<S: PixelSource + Sync>(
    src: &S,
    options: &SplitOptions,
) -> (Vec<Band>, Vec<Band>) {
    let (rows, cols) = solid_grid(src, options.tolerance);
    debug!(
        solid_rows = rows.len(),
        solid_cols = cols.len(),
        width = src.width(),
        height = src.height(),
        "solid line scan"
    );
    let row_bands = consolidate(&rows, src.height(), options.min_band_fraction);
    let col_bands = consolidate(&cols, src.width(), options.min_band_fraction);
    debug!(
        row_bands = row_bands.len(),
        col_bands = col_bands.len(),
        "consolidated bands"
    );
    (row_bands, col_bands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn white_with_black_row(width: u32, height: u32, row: u32) -> RgbImage {
        let mut img = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
        for x in 0..width {
            img.put_pixel(x, row, Rgb([0, 0, 0]));
        }
        img
    }

    #[test]
    fn test_solid_rows_all_uniform() {
        // every row is uniform, including the black separator row
        let img = white_with_black_row(100, 100, 50);
        let rows = solid_rows(&img, 25);
        assert_eq!(rows, (0..100).collect::<Vec<u32>>());
    }

    #[test]
    fn test_solid_cols_broken_by_black_row() {
        // every column passes through the black row: white vs black
        // exceeds any reasonable tolerance
        let img = white_with_black_row(100, 100, 50);
        assert!(solid_cols(&img, 25).is_empty());
    }

    #[test]
    fn test_solid_scan_respects_tolerance() {
        let mut img = RgbImage::from_pixel(10, 4, Rgb([100, 100, 100]));
        // within default tolerance
        img.put_pixel(5, 1, Rgb([120, 90, 100]));
        // outside it
        img.put_pixel(5, 2, Rgb([160, 100, 100]));

        let rows = solid_rows(&img, 25);
        assert_eq!(rows, vec![0, 1, 3]);
    }

    #[test]
    fn test_reference_is_per_line() {
        // two uniform rows of different colors both qualify
        let mut img = RgbImage::from_pixel(10, 2, Rgb([255, 255, 255]));
        for x in 0..10 {
            img.put_pixel(x, 1, Rgb([0, 0, 0]));
        }
        assert_eq!(solid_rows(&img, 0), vec![0, 1]);
    }

    #[test]
    fn test_empty_image_yields_no_indices() {
        let img = RgbImage::new(0, 0);
        assert!(solid_rows(&img, 25).is_empty());
        assert!(solid_cols(&img, 25).is_empty());
    }

    #[test]
    fn test_band_grid_separator_row() {
        let img = white_with_black_row(100, 100, 50);
        let (row_bands, col_bands) = band_grid(&img, &SplitOptions::default());
        assert_eq!(row_bands, vec![Band::new(0, 50), Band::new(51, 100)]);
        assert_eq!(col_bands, vec![Band::new(0, 100)]);
    }

    #[test]
    fn test_single_pixel_line_is_solid() {
        // a 1-wide image: every row trivially matches its reference
        let img = RgbImage::from_pixel(1, 5, Rgb([10, 20, 30]));
        assert_eq!(solid_rows(&img, 0), vec![0, 1, 2, 3, 4]);
    }
}
