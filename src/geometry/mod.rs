//! Geometry primitives
//!
//! Points, sizes, rectangles and the [`Polygon`] value used throughout the
//! segmentation engine. Everything here is a plain value type; pixel data
//! never enters this module.

mod point;
mod polygon;

pub use point::{Point, Rect, Size};
pub use polygon::{
    Polygon, SplitColor, BLUE, CYAN, GREEN, MAGENTA, ORANGE, PALETTE, PURPLE, RED, YELLOW,
};
