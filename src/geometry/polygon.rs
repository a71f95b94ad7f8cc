//! Polygon: an ordered point set with a color tag
//!
//! A `Polygon` represents either a split line (2 points) or a rectangular
//! region (2 or 4 points). The point list is kept in canonical row-major
//! order at all times: sorting happens once at construction and again on
//! every replacement through [`Polygon::set_points`], so equality and
//! hashing are insensitive to the insertion order of the points.

use std::collections::BTreeSet;

use super::point::{Point, Rect};

/// RGB tag carried by every polygon.
///
/// The color is decorative (visualization/debug); it has no geometric
/// meaning but participates in equality and hashing so two split sets
/// drawn in different colors stay distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SplitColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl SplitColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Reserved for frame boundary lines
pub const RED: SplitColor = SplitColor::new(255, 0, 0);
/// Reserved for generated grid lines
pub const BLUE: SplitColor = SplitColor::new(0, 0, 255);

pub const GREEN: SplitColor = SplitColor::new(0, 128, 0);
pub const YELLOW: SplitColor = SplitColor::new(255, 255, 0);
pub const MAGENTA: SplitColor = SplitColor::new(255, 0, 255);
pub const CYAN: SplitColor = SplitColor::new(0, 255, 255);
pub const ORANGE: SplitColor = SplitColor::new(255, 165, 0);
pub const PURPLE: SplitColor = SplitColor::new(128, 0, 128);

/// Region color rotation; indexed deterministically as
/// `PALETTE[(i + j) % PALETTE.len()]` so generated grids are repeatable.
pub const PALETTE: [SplitColor; 6] = [GREEN, YELLOW, MAGENTA, CYAN, ORANGE, PURPLE];

/// Ordered point set plus color tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Polygon {
    points: Vec<Point>,
    pub color: SplitColor,
}

impl Polygon {
    /// Create a polygon from at least two points.
    ///
    /// The points are normalized into canonical order immediately;
    /// callers must not rely on insertion order being preserved.
    ///
    /// # Panics
    ///
    /// Panics when fewer than two points are supplied.
    pub fn new(points: Vec<Point>, color: SplitColor) -> Self {
        let mut poly = Self { points, color };
        poly.normalize();
        poly
    }

    /// Two-point polygon spanning a rectangle: top-left and
    /// bottom-right (exclusive) corners.
    pub fn from_rect(rect: Rect, color: SplitColor) -> Self {
        Self::new(vec![rect.top_left(), rect.bottom_right()], color)
    }

    /// Polygon from the distinct endpoints of a set of lines.
    ///
    /// Returns `None` with fewer than two lines, or when the lines'
    /// endpoints deduplicate to fewer than two distinct points (a set of
    /// zero-length lines stacked on one spot spans nothing).
    pub fn from_lines(lines: &[Polygon], color: SplitColor) -> Option<Self> {
        if lines.len() < 2 {
            return None;
        }
        let endpoints: BTreeSet<Point> = lines
            .iter()
            .flat_map(|line| [line.start(), line.end()])
            .collect();
        if endpoints.len() < 2 {
            return None;
        }
        Some(Self::new(endpoints.into_iter().collect(), color))
    }

    fn normalize(&mut self) {
        assert!(
            self.points.len() >= 2,
            "a polygon needs at least two points"
        );
        self.points.sort();
    }

    /// Points in canonical order
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Replace the point list; the new list is re-normalized.
    pub fn set_points(&mut self, points: Vec<Point>) {
        self.points = points;
        self.normalize();
    }

    /// First point in canonical order (smallest `(y, x)`)
    pub fn start(&self) -> Point {
        self.points[0]
    }

    /// Last point in canonical order
    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Two-point polygon whose points share an x coordinate
    pub fn is_vertical_line(&self) -> bool {
        self.points.len() == 2 && self.points[0].x == self.points[1].x
    }

    /// Two-point polygon whose points share a y coordinate
    pub fn is_horizontal_line(&self) -> bool {
        self.points.len() == 2 && self.points[0].y == self.points[1].y
    }

    /// Two- or four-point polygon spanning both axes with exactly two
    /// distinct coordinates per axis
    pub fn is_rectangle(&self) -> bool {
        if self.points.len() != 2 && self.points.len() != 4 {
            return false;
        }
        let xs: BTreeSet<i32> = self.points.iter().map(|p| p.x).collect();
        let ys: BTreeSet<i32> = self.points.iter().map(|p| p.y).collect();
        xs.len() == 2 && ys.len() == 2
    }

    /// Axis-aligned min/max rectangle over all points
    pub fn bounding_rect(&self) -> Rect {
        let min_x = self.points.iter().map(|p| p.x).min().unwrap_or(0);
        let min_y = self.points.iter().map(|p| p.y).min().unwrap_or(0);
        let max_x = self.points.iter().map(|p| p.x).max().unwrap_or(0);
        let max_y = self.points.iter().map(|p| p.y).max().unwrap_or(0);
        Rect::new(min_x, min_y, max_x, max_y)
    }

    /// Bounding corners as (top-left, bottom-right-exclusive) points
    pub fn bounding_points(&self) -> (Point, Point) {
        let rect = self.bounding_rect();
        (rect.top_left(), rect.bottom_right())
    }

    /// Clamp every point into `[0, width] x [0, height]`.
    ///
    /// Called after scaling from display to image space so a polygon
    /// never references out-of-image coordinates.
    pub fn bind_to(&mut self, width: i32, height: i32) {
        for p in &mut self.points {
            *p = p.clamped(width, height);
        }
        // clamping can reorder points
        self.points.sort();
    }
}
