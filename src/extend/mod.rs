//! Line geometry and boundary extension
//!
//! Turns short user-drawn segments into full dividers spanning the image
//! and assembles a set of dividers into rectangular regions.
//!
//! A line is treated parametrically as `P = P1 + t * (P2 - P1)`; its
//! intersections with the four image edges are solved for `t`, and the
//! extreme two intersections become the endpoints of the extended line.

use std::collections::BTreeSet;

use crate::geometry::{Point, Polygon, Rect, Size, PALETTE, RED};

const EPS: f64 = 1e-10;

/// Intersection of a line with an image edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub x: i32,
    pub y: i32,
    /// Line parameter at the intersection
    pub t: f64,
}

/// Parametric intersections of `line` with the four image edges, sorted
/// by `t` ascending.
///
/// An intersection is kept only when its coordinate along the edge lies
/// within `[0, dimension]`. A zero-length line yields no intersections.
pub fn solve_intersections(size: Size, line: &Polygon) -> Vec<Intersection> {
    let p1 = line.start();
    let p2 = line.end();
    let (x1, y1) = (p1.x as f64, p1.y as f64);
    let dx = p2.x as f64 - x1;
    let dy = p2.y as f64 - y1;

    if dx.abs() < EPS && dy.abs() < EPS {
        return Vec::new();
    }

    let width = size.width as f64;
    let height = size.height as f64;
    let mut intersections = Vec::with_capacity(4);

    if dy.abs() > EPS {
        // top edge (y = 0)
        let t = -y1 / dy;
        let x = x1 + t * dx;
        if (0.0..=width).contains(&x) {
            intersections.push(Intersection {
                x: x.round() as i32,
                y: 0,
                t,
            });
        }
        // bottom edge (y = height)
        let t = (height - y1) / dy;
        let x = x1 + t * dx;
        if (0.0..=width).contains(&x) {
            intersections.push(Intersection {
                x: x.round() as i32,
                y: size.height as i32,
                t,
            });
        }
    }

    if dx.abs() > EPS {
        // left edge (x = 0)
        let t = -x1 / dx;
        let y = y1 + t * dy;
        if (0.0..=height).contains(&y) {
            intersections.push(Intersection {
                x: 0,
                y: y.round() as i32,
                t,
            });
        }
        // right edge (x = width)
        let t = (width - x1) / dx;
        let y = y1 + t * dy;
        if (0.0..=height).contains(&y) {
            intersections.push(Intersection {
                x: size.width as i32,
                y: y.round() as i32,
                t,
            });
        }
    }

    intersections.sort_by(|a, b| a.t.total_cmp(&b.t));
    intersections
}

/// Extend a line until both endpoints lie on the image border.
///
/// Returns `None` for a degenerate line or when fewer than two boundary
/// intersections exist; callers treat absence as "skip this line".
pub fn extend_line(line: &Polygon, size: Size) -> Option<Polygon> {
    let intersections = solve_intersections(size, line);
    if intersections.len() < 2 {
        return None;
    }
    let first = intersections[0];
    let last = intersections[intersections.len() - 1];
    Some(Polygon::new(
        vec![Point::new(first.x, first.y), Point::new(last.x, last.y)],
        line.color,
    ))
}

/// The four frame edges of the image as RED lines
pub fn frame_edges(size: Size) -> Vec<Polygon> {
    let w = size.width as i32;
    let h = size.height as i32;
    vec![
        Polygon::new(vec![Point::new(0, 0), Point::new(w, 0)], RED),
        Polygon::new(vec![Point::new(w, 0), Point::new(w, h)], RED),
        Polygon::new(vec![Point::new(0, h), Point::new(w, h)], RED),
        Polygon::new(vec![Point::new(0, 0), Point::new(0, h)], RED),
    ]
}

/// Build the rectangular regions delimited by a set of user lines.
///
/// Every line is extended to the border, the four frame edges are added,
/// and each line is classified as vertical-ish or horizontal-ish by
/// comparing |dx| with |dy|. The distinct x coordinates of vertical
/// lines and y coordinates of horizontal lines (taken from the line's
/// canonical first point) form a grid; consecutive coordinate pairs
/// become cells. Falls back to one whole-image region when no grid can
/// be formed.
pub fn polygons_from_lines(lines: &[Polygon], size: Size) -> Vec<Polygon> {
    let whole = || vec![Polygon::from_rect(Rect::of_size(size), PALETTE[0])];
    if size.is_empty() {
        return whole();
    }

    let mut dividers: Vec<Polygon> = lines
        .iter()
        .filter_map(|line| extend_line(line, size))
        .collect();
    dividers.extend(frame_edges(size));

    let mut xs: BTreeSet<i32> = BTreeSet::new();
    let mut ys: BTreeSet<i32> = BTreeSet::new();
    for line in &dividers {
        let a = line.start();
        let b = line.end();
        if (b.x - a.x).abs() < (b.y - a.y).abs() {
            xs.insert(a.x);
        } else {
            ys.insert(a.y);
        }
    }

    let xs: Vec<i32> = xs.into_iter().collect();
    let ys: Vec<i32> = ys.into_iter().collect();
    if xs.len() < 2 || ys.len() < 2 {
        return whole();
    }

    let mut regions = Vec::with_capacity((xs.len() - 1) * (ys.len() - 1));
    for (j, yw) in ys.windows(2).enumerate() {
        for (i, xw) in xs.windows(2).enumerate() {
            let cell = Rect::new(xw[0], yw[0], xw[1], yw[1]);
            if cell.is_empty() {
                continue;
            }
            regions.push(Polygon::from_rect(cell, PALETTE[(i + j) % PALETTE.len()]));
        }
    }

    if regions.is_empty() {
        return whole();
    }
    regions
}

/// Uniform `vert x horz` grid of rectangular cells (BLUE), the last row
/// and column absorbing any rounding slack.
pub fn uniform_grid(size: Size, vert: u32, horz: u32) -> Vec<Polygon> {
    use crate::geometry::BLUE;

    if size.is_empty() || vert == 0 || horz == 0 {
        return Vec::new();
    }
    let w = size.width as f64;
    let h = size.height as f64;
    let cell_w = (w / vert as f64).round() as i32;
    let cell_h = (h / horz as f64).round() as i32;

    let mut cells = Vec::with_capacity((vert * horz) as usize);
    for row in 0..horz as i32 {
        for col in 0..vert as i32 {
            let left = col * cell_w;
            let top = row * cell_h;
            let right = if col as u32 == vert - 1 {
                size.width as i32
            } else {
                left + cell_w
            };
            let bottom = if row as u32 == horz - 1 {
                size.height as i32
            } else {
                top + cell_h
            };
            let cell = Rect::new(left, top, right, bottom);
            if cell.is_empty() {
                continue;
            }
            let mut poly = Polygon::from_rect(cell, BLUE);
            poly.bind_to(size.width as i32, size.height as i32);
            cells.push(poly);
        }
    }
    cells
}

/// The interior divider lines of a uniform `vert x horz` grid (BLUE)
pub fn uniform_grid_lines(size: Size, vert: u32, horz: u32) -> Vec<Polygon> {
    use crate::geometry::BLUE;

    if size.is_empty() || vert == 0 || horz == 0 {
        return Vec::new();
    }
    let w = size.width as i32;
    let h = size.height as i32;
    let v_spacing = (size.width as f64 / vert as f64).round() as i32;
    let h_spacing = (size.height as f64 / horz as f64).round() as i32;

    let mut out = Vec::new();
    for i in 1..horz as i32 {
        let y = i * h_spacing;
        out.push(Polygon::new(
            vec![Point::new(0, y), Point::new(w, y)],
            BLUE,
        ));
    }
    for i in 1..vert as i32 {
        let x = i * v_spacing;
        out.push(Polygon::new(
            vec![Point::new(x, 0), Point::new(x, h)],
            BLUE,
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GREEN;

    fn size100() -> Size {
        Size::new(100, 100)
    }

    fn line(x1: i32, y1: i32, x2: i32, y2: i32) -> Polygon {
        Polygon::new(vec![Point::new(x1, y1), Point::new(x2, y2)], GREEN)
    }

    fn on_border(p: Point, size: Size) -> bool {
        p.x == 0 || p.x == size.width as i32 || p.y == 0 || p.y == size.height as i32
    }

    #[test]
    fn test_degenerate_line_has_no_intersections() {
        // a zero-length "line" cannot be extended
        let degenerate = Polygon::new(vec![Point::new(5, 5), Point::new(5, 5)], GREEN);
        assert!(solve_intersections(size100(), &degenerate).is_empty());
        assert!(extend_line(&degenerate, size100()).is_none());
    }

    #[test]
    fn test_vertical_line_extends_top_to_bottom() {
        let extended = extend_line(&line(40, 10, 40, 90), size100()).unwrap();
        assert_eq!(extended.start(), Point::new(40, 0));
        assert_eq!(extended.end(), Point::new(40, 100));
        assert!(extended.is_vertical_line());
    }

    #[test]
    fn test_horizontal_line_extends_left_to_right() {
        let extended = extend_line(&line(10, 60, 90, 60), size100()).unwrap();
        assert_eq!(extended.start(), Point::new(0, 60));
        assert_eq!(extended.end(), Point::new(100, 60));
        assert!(extended.is_horizontal_line());
    }

    #[test]
    fn test_interior_line_endpoints_reach_border() {
        let candidates = [
            line(10, 10, 20, 30),
            line(50, 50, 60, 40),
            line(5, 95, 95, 5),
            line(33, 33, 34, 34),
        ];
        for candidate in candidates {
            let extended = extend_line(&candidate, size100()).unwrap();
            assert!(on_border(extended.start(), size100()), "{:?}", extended);
            assert!(on_border(extended.end(), size100()), "{:?}", extended);
        }
    }

    #[test]
    fn test_intersections_sorted_by_t() {
        let hits = solve_intersections(size100(), &line(10, 10, 20, 30));
        assert!(hits.len() >= 2);
        for pair in hits.windows(2) {
            assert!(pair[0].t <= pair[1].t);
        }
    }

    #[test]
    fn test_line_outside_extension_window() {
        // steep line whose edge intersections all fall outside the frame
        // never happens for in-image lines, but a line "on" the corner
        // direction pointing away must not panic
        let hits = solve_intersections(Size::new(10, 10), &line(0, 0, 1, 1));
        assert!(hits.len() >= 2);
    }

    #[test]
    fn test_grid_coverage_no_user_lines() {
        // only frame edges: exactly one region, the full image
        let regions = polygons_from_lines(&[], size100());
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].bounding_rect(), Rect::new(0, 0, 100, 100));
    }

    #[test]
    fn test_crossing_lines_make_four_regions() {
        let regions = polygons_from_lines(
            &[line(40, 10, 40, 90), line(10, 60, 90, 60)],
            size100(),
        );
        assert_eq!(regions.len(), 4);

        let rects: Vec<Rect> = regions.iter().map(|p| p.bounding_rect()).collect();
        assert!(rects.contains(&Rect::new(0, 0, 40, 60)));
        assert!(rects.contains(&Rect::new(40, 0, 100, 60)));
        assert!(rects.contains(&Rect::new(0, 60, 40, 100)));
        assert!(rects.contains(&Rect::new(40, 60, 100, 100)));
    }

    #[test]
    fn test_region_colors_deterministic() {
        let a = polygons_from_lines(
            &[line(40, 10, 40, 90), line(10, 60, 90, 60)],
            size100(),
        );
        let b = polygons_from_lines(
            &[line(40, 10, 40, 90), line(10, 60, 90, 60)],
            size100(),
        );
        assert_eq!(a, b);
        assert_eq!(a[0].color, PALETTE[0]);
        assert_eq!(a[1].color, PALETTE[1]);
    }

    #[test]
    fn test_duplicate_lines_collapse() {
        // two lines on the same x produce one divider, not an empty cell
        let regions = polygons_from_lines(
            &[line(40, 10, 40, 90), line(40, 20, 40, 70)],
            size100(),
        );
        assert_eq!(regions.len(), 2);
    }

    #[test]
    fn test_uniform_grid_covers_image() {
        let cells = uniform_grid(size100(), 2, 2);
        assert_eq!(cells.len(), 4);
        let area: i32 = cells
            .iter()
            .map(|c| {
                let r = c.bounding_rect();
                r.width() * r.height()
            })
            .sum();
        assert_eq!(area, 100 * 100);
    }

    #[test]
    fn test_uniform_grid_rounding_slack() {
        // 101 wide, 3 columns: last column absorbs the extra pixel
        let cells = uniform_grid(Size::new(101, 30), 3, 1);
        assert_eq!(cells.len(), 3);
        assert_eq!(cells.last().unwrap().bounding_rect().right, 101);
    }

    #[test]
    fn test_uniform_grid_lines_count() {
        let lines = uniform_grid_lines(size100(), 4, 3);
        // 3 interior vertical + 2 interior horizontal
        assert_eq!(lines.len(), 5);
        assert!(lines[0].is_horizontal_line());
    }
}
