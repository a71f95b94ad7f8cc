//! Region auto-trimming
//!
//! Shrinks an approximate rectangle to the tight bounding box of its
//! non-uniform content by peeling away edge rows/columns that are one
//! uniform color, and snaps straight cut lines to the nearest real
//! content edge.

use image::Rgb;
use tracing::debug;

use crate::geometry::{Point, Polygon, Rect};
use crate::pixel::{matches, PixelSource};

/// Shrink each edge of `corners` inward while the whole edge (within the
/// current span) matches its own corner reference pixel, then re-expand
/// by `padding` clamped to the original corners.
///
/// `corners` follows the rectangle convention of the rest of the crate:
/// `right` and `bottom` are exclusive, and so are the returned points:
/// the result is `(top_left, bottom_right_exclusive)`. A degenerate
/// rectangle (zero width or height) is returned unchanged.
///
/// # Panics
///
/// Panics when `corners` reaches outside the image; callers are required
/// to pre-clamp via `Polygon::bind_to`.
pub fn determine_boundary<S: PixelSource>(
    src: &S,
    corners: Rect,
    padding: u32,
    tolerance: u8,
) -> (Point, Point) {
    assert!(
        corners.left >= 0
            && corners.top >= 0
            && corners.right <= src.width() as i32
            && corners.bottom <= src.height() as i32,
        "trim corners out of image bounds"
    );

    // a zero-span axis has nothing to scan; the vacuous row/col matches
    // would otherwise peel the other axis down to a point
    if corners.is_empty() {
        return (corners.top_left(), corners.bottom_right());
    }

    let padding = padding as i32;
    let (s_left, s_top) = (corners.left, corners.top);
    let (s_right, s_bottom) = (corners.right, corners.bottom);

    let mut left = s_left;
    let mut top = s_top;
    // switch to inclusive indices for the scan
    let mut right = s_right - 1;
    let mut bottom = s_bottom - 1;

    let px = |x: i32, y: i32| -> Rgb<u8> { src.pixel(x as u32, y as u32) };
    let row_matches = |y: i32, x0: i32, x1: i32, reference: Rgb<u8>| {
        (x0..=x1).all(|x| matches(px(x, y), reference, tolerance))
    };
    let col_matches = |x: i32, y0: i32, y1: i32, reference: Rgb<u8>| {
        (y0..=y1).all(|y| matches(px(x, y), reference, tolerance))
    };

    while top < bottom && row_matches(top, left, right, px(left, top)) {
        top += 1;
    }
    while bottom > top && row_matches(bottom, left, right, px(left, bottom)) {
        bottom -= 1;
    }
    while left < right && col_matches(left, top, bottom, px(left, top)) {
        left += 1;
    }
    while right > left && col_matches(right, top, bottom, px(right, top)) {
        right -= 1;
    }

    // re-expand, never past the caller-supplied bounds
    top = (top - padding).max(s_top);
    bottom = (bottom + padding).min(s_bottom - 1);
    left = (left - padding).max(s_left);
    right = (right + padding).min(s_right - 1);

    debug!(
        left,
        top,
        right = right + 1,
        bottom = bottom + 1,
        "trimmed boundary"
    );
    (Point::new(left, top), Point::new(right + 1, bottom + 1))
}

/// Replace every rectangular polygon's points with its auto-trimmed
/// content box.
pub fn trim_polygons<S: PixelSource>(
    src: &S,
    polygons: &mut [Polygon],
    padding: u32,
    tolerance: u8,
) {
    for poly in polygons.iter_mut().filter(|p| p.is_rectangle()) {
        let (tl, br) = poly.bounding_points();
        let (tl, br) = determine_boundary(src, Rect::from_points(tl, br), padding, tolerance);
        poly.set_points(vec![tl, br]);
    }
}

/// Snap a straight axis-aligned cut line to the edges of the uniform
/// band it sits in.
///
/// The band is grown outward in both directions from the line's
/// coordinate while whole rows (or columns) match the starting line's
/// reference pixel; `padding` then insets the two resulting cuts, and a
/// cut lying on the image border is suppressed. Returns the original
/// line unchanged when it is not axis-aligned or no uniform band exists
/// at its coordinate.
pub fn trim_ortho_lines<S: PixelSource>(
    line: &Polygon,
    src: &S,
    padding: u32,
    tolerance: u8,
) -> Vec<Polygon> {
    let points = line.points();
    let vertical = points.iter().all(|p| p.x == points[0].x);
    let horizontal = points.iter().all(|p| p.y == points[0].y);

    let snapped = if vertical && !horizontal {
        find_verticals(line, src, padding, tolerance)
    } else if horizontal && !vertical {
        find_horizontals(line, src, padding, tolerance)
    } else {
        Vec::new()
    };

    if snapped.is_empty() {
        vec![line.clone()]
    } else {
        snapped
    }
}

/// Snap a horizontal line to the top/bottom edges of its uniform row
/// band. Returns 0-2 full-width lines; empty when the starting row is
/// not uniform.
pub fn find_horizontals<S: PixelSource>(
    line: &Polygon,
    src: &S,
    padding: u32,
    tolerance: u8,
) -> Vec<Polygon> {
    let width = src.width() as i32;
    let height = src.height() as i32;
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let y0 = line.start().y.clamp(0, height - 1);
    let reference = src.pixel(0, y0 as u32);
    let row_uniform = |y: i32| {
        (0..width).all(|x| matches(src.pixel(x as u32, y as u32), reference, tolerance))
    };

    if !row_uniform(y0) {
        return Vec::new();
    }

    let mut top = y0;
    while top > 0 && row_uniform(top - 1) {
        top -= 1;
    }
    let mut bottom = y0 + 1;
    while bottom < height && row_uniform(bottom) {
        bottom += 1;
    }

    let padding = padding as i32;
    let hi = (bottom - padding).max(top);
    let lo = (top + padding).min(hi);

    let h_line = |y: i32| {
        Polygon::new(vec![Point::new(0, y), Point::new(width, y)], line.color)
    };
    let mut out = Vec::new();
    if lo != 0 || lo == hi {
        out.push(h_line(lo));
    }
    if lo != hi && hi != height {
        out.push(h_line(hi));
    }
    out
}

/// Snap a vertical line to the left/right edges of its uniform column
/// band. Returns 0-2 full-height lines; empty when the starting column
/// is not uniform.
pub fn find_verticals<S: PixelSource>(
    line: &Polygon,
    src: &S,
    padding: u32,
    tolerance: u8,
) -> Vec<Polygon> {
    let width = src.width() as i32;
    let height = src.height() as i32;
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let x0 = line.start().x.clamp(0, width - 1);
    let reference = src.pixel(x0 as u32, 0);
    let col_uniform = |x: i32| {
        (0..height).all(|y| matches(src.pixel(x as u32, y as u32), reference, tolerance))
    };

    if !col_uniform(x0) {
        return Vec::new();
    }

    let mut left = x0;
    while left > 0 && col_uniform(left - 1) {
        left -= 1;
    }
    let mut right = x0 + 1;
    while right < width && col_uniform(right) {
        right += 1;
    }

    let padding = padding as i32;
    let hi = (right - padding).max(left);
    let lo = (left + padding).min(hi);

    let v_line = |x: i32| {
        Polygon::new(vec![Point::new(x, 0), Point::new(x, height)], line.color)
    };
    let mut out = Vec::new();
    if lo != 0 || lo == hi {
        out.push(v_line(lo));
    }
    if lo != hi && hi != width {
        out.push(v_line(hi));
    }
    out
}
