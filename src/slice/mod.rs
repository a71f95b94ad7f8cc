//! Segmentation orchestrator
//!
//! Composes the solid-band detector's row/column bands into either
//! boundary lines or full rectangular regions ready for cropping.

use std::path::Path;

use tracing::{debug, info};

use crate::detect::{band_grid, Band};
use crate::error::{Result, SplitError};
use crate::geometry::{Point, Polygon, Rect, PALETTE, PURPLE};
use crate::options::SplitOptions;
use crate::pixel::PixelSource;

/// What `slice_image` emits per detected band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SliceMode {
    /// Rectangular regions: row-band x column-band Cartesian product
    #[default]
    Regions,
    /// Paired boundary lines at every band edge
    Lines,
}

/// Slice an image along its solid bands.
///
/// In [`SliceMode::Regions`] the result is the Cartesian product of row
/// and column bands as rectangles; an axis without splits contributes a
/// single full-span band, so a 1-D split still produces valid regions.
/// In [`SliceMode::Lines`] every band edge becomes a full-span line
/// (two per band and axis).
///
/// A zero-dimension image yields an empty list rather than a degenerate
/// whole-image region: a zero-area polygon could never be cropped or
/// drawn, so callers get "nothing to do" instead of an unusable value.
pub fn slice_image<S: PixelSource + Sync>(
    src: &S,
    options: &SplitOptions,
    mode: SliceMode,
) -> Vec<Polygon> {
    let width = src.width();
    let height = src.height();
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let (row_bands, col_bands) = band_grid(src, options);
    debug!(?row_bands, ?col_bands, "slicing");

    match mode {
        SliceMode::Lines => band_lines(&row_bands, &col_bands, width, height),
        SliceMode::Regions => band_regions(&row_bands, &col_bands),
    }
}

/// Load an image file and slice it.
pub fn slice_path(path: &Path, options: &SplitOptions, mode: SliceMode) -> Result<Vec<Polygon>> {
    if !path.exists() {
        return Err(SplitError::ImageNotFound(path.to_path_buf()));
    }
    let img = image::open(path)
        .map_err(|e| SplitError::InvalidImage(e.to_string()))?
        .to_rgb8();
    let polygons = slice_image(&img, options, mode);
    info!(
        path = %path.display(),
        sections = polygons.len(),
        "sliced image"
    );
    Ok(polygons)
}

fn band_lines(
    row_bands: &[Band],
    col_bands: &[Band],
    width: u32,
    height: u32,
) -> Vec<Polygon> {
    let w = width as i32;
    let h = height as i32;
    let mut out = Vec::with_capacity(2 * (row_bands.len() + col_bands.len()));

    let h_line = |y: u32| {
        Polygon::new(
            vec![Point::new(0, y as i32), Point::new(w, y as i32)],
            PURPLE,
        )
    };
    let v_line = |x: u32| {
        Polygon::new(
            vec![Point::new(x as i32, 0), Point::new(x as i32, h)],
            PURPLE,
        )
    };

    for band in row_bands {
        out.push(h_line(band.start));
        out.push(h_line(band.end));
    }
    for band in col_bands {
        out.push(v_line(band.start));
        out.push(v_line(band.end));
    }
    out
}

fn band_regions(row_bands: &[Band], col_bands: &[Band]) -> Vec<Polygon> {
    let mut out = Vec::with_capacity(row_bands.len() * col_bands.len());
    for (j, row) in row_bands.iter().enumerate() {
        for (i, col) in col_bands.iter().enumerate() {
            let cell = Rect::new(
                col.start as i32,
                row.start as i32,
                col.end as i32,
                row.end as i32,
            );
            if cell.is_empty() {
                continue;
            }
            out.push(Polygon::from_rect(cell, PALETTE[(i + j) % PALETTE.len()]));
        }
    }
    out
}
