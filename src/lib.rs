//! image-splitter - content-aware image segmentation
//!
//! Helps partition a raster image into sub-images, either from
//! user-supplied split lines/boxes or by automatically detecting
//! uniform-color ("solid") boundary bands.
//!
//! The engine is pure: every function takes a read-only pixel source and
//! returns new [`Polygon`] values; it never touches a display surface or
//! holds polygon storage of its own. Rendering, input handling and file
//! navigation are external collaborators that feed pixel buffers and
//! point coordinates in and turn the resulting polygons into crops.
//!
//! # Pipeline
//!
//! 1. [`detect`] scans for solid rows/columns and consolidates them into
//!    split bands;
//! 2. [`extend`] turns short user-drawn segments into full dividers and
//!    assembles dividers into grid regions;
//! 3. [`trim`] shrinks approximate rectangles to tight content boxes and
//!    snaps straight cuts to real content edges;
//! 4. [`slice`] orchestrates detection into boundary lines or
//!    rectangular regions;
//! 5. [`export`] crops the regions out of an image file.
//!
//! # Example
//!
//! ```rust,no_run
//! use image_splitter::{slice_path, SliceMode, SplitOptions};
//! use std::path::Path;
//!
//! let options = SplitOptions::builder().tolerance(30).build();
//! let regions = slice_path(Path::new("page.png"), &options, SliceMode::Regions).unwrap();
//! for region in &regions {
//!     println!("{:?}", region.bounding_rect());
//! }
//! ```

pub mod config;
pub mod detect;
pub mod error;
pub mod export;
pub mod extend;
pub mod geometry;
pub mod options;
pub mod pixel;
pub mod slice;
pub mod trim;

// Re-export the public API
pub use config::{CliOverrides, Config};
pub use detect::{
    band_grid, consolidate, merge_short_bands, solid_cols, solid_grid, solid_rows, Band,
    DEFAULT_MIN_BAND_FRACTION,
};
pub use error::{Result, SplitError};
pub use export::{crop_polygon, image_files_in, save_sections, ALLOWED_EXTENSIONS};
pub use extend::{
    extend_line, frame_edges, polygons_from_lines, solve_intersections, uniform_grid,
    uniform_grid_lines, Intersection,
};
pub use geometry::{Point, Polygon, Rect, Size, SplitColor, BLUE, GREEN, PALETTE, RED};
pub use options::{SplitOptions, SplitOptionsBuilder};
pub use pixel::{matches, PixelSource, RawPixels, DEFAULT_TOLERANCE};
pub use slice::{slice_image, slice_path, SliceMode};
pub use trim::{determine_boundary, find_horizontals, find_verticals, trim_ortho_lines, trim_polygons};

/// Process exit codes for the CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const INPUT_NOT_FOUND: i32 = 2;
}
