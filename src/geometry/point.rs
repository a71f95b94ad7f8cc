//! Integer point, size and rectangle primitives
//!
//! All coordinates are in image-pixel space. `Rect` is half-open: `right`
//! and `bottom` are exclusive, matching the crop convention used by the
//! export collaborator.

use std::cmp::Ordering;

/// Integer 2-D point in image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Clamp the point into `[0, width] x [0, height]`
    pub fn clamped(self, width: i32, height: i32) -> Self {
        Self {
            x: self.x.clamp(0, width),
            y: self.y.clamp(0, height),
        }
    }
}

/// Canonical point order: row-major, `y` first then `x`.
/// This is the normalization order used inside [`Polygon`](super::Polygon).
impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Image dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Axis-aligned rectangle, `right`/`bottom` exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Build a normalized rectangle from two arbitrary corner points
    pub fn from_points(a: Point, b: Point) -> Self {
        Self {
            left: a.x.min(b.x),
            top: a.y.min(b.y),
            right: a.x.max(b.x),
            bottom: a.y.max(b.y),
        }
    }

    /// Full-image rectangle for the given size
    pub fn of_size(size: Size) -> Self {
        Self {
            left: 0,
            top: 0,
            right: size.width as i32,
            bottom: size.height as i32,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.right, self.bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_order_row_major() {
        let a = Point::new(5, 1);
        let b = Point::new(0, 2);
        let c = Point::new(1, 2);
        assert!(a < b);
        assert!(b < c);

        let mut pts = vec![c, a, b];
        pts.sort();
        assert_eq!(pts, vec![a, b, c]);
    }

    #[test]
    fn test_point_clamped() {
        let p = Point::new(-5, 120).clamped(100, 100);
        assert_eq!(p, Point::new(0, 100));

        let inside = Point::new(40, 60).clamped(100, 100);
        assert_eq!(inside, Point::new(40, 60));
    }

    #[test]
    fn test_rect_from_points_normalizes() {
        let r = Rect::from_points(Point::new(90, 10), Point::new(10, 80));
        assert_eq!(r, Rect::new(10, 10, 90, 80));
        assert_eq!(r.width(), 80);
        assert_eq!(r.height(), 70);
        assert!(!r.is_empty());
    }

    #[test]
    fn test_rect_degenerate_is_empty() {
        assert!(Rect::new(10, 10, 10, 80).is_empty());
        assert!(Rect::new(10, 10, 80, 10).is_empty());
        assert!(Rect::of_size(Size::new(0, 0)).is_empty());
    }
}
