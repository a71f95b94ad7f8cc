//! Section export
//!
//! The collaborator that turns polygons back into files: crops each
//! polygon's bounding rectangle out of the source image and writes
//! numbered PNGs next to it (or into a per-image subdirectory).

use std::fs;
use std::path::{Path, PathBuf};

use image::{imageops, RgbImage};
use rayon::prelude::*;
use tracing::info;

use crate::error::{Result, SplitError};
use crate::geometry::Polygon;

/// Image file extensions the batch tools pick up
pub const ALLOWED_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "tiff", "webp"];

/// Crop the polygon's bounding rectangle out of `img`, clamped to the
/// image. `None` for a zero-area rectangle.
pub fn crop_polygon(img: &RgbImage, poly: &Polygon) -> Option<RgbImage> {
    let rect = poly.bounding_rect();
    let left = rect.left.clamp(0, img.width() as i32) as u32;
    let top = rect.top.clamp(0, img.height() as i32) as u32;
    let right = rect.right.clamp(0, img.width() as i32) as u32;
    let bottom = rect.bottom.clamp(0, img.height() as i32) as u32;
    if right <= left || bottom <= top {
        return None;
    }
    Some(imageops::crop_imm(img, left, top, right - left, bottom - top).to_image())
}

/// Crop every polygon of `image_path` and write numbered sections.
///
/// Files are named `"{stem} {NNN}.png"`, numbered in polygon order
/// starting at 1; zero-area polygons consume a number but produce no
/// file. With `create_subdir` the sections land in a directory named
/// after the image stem. Returns the written paths.
pub fn save_sections(
    image_path: &Path,
    polygons: &[Polygon],
    create_subdir: bool,
) -> Result<Vec<PathBuf>> {
    if !image_path.exists() {
        return Err(SplitError::ImageNotFound(image_path.to_path_buf()));
    }
    if polygons.is_empty() {
        return Ok(Vec::new());
    }

    let img = image::open(image_path)
        .map_err(|e| SplitError::InvalidImage(e.to_string()))?
        .to_rgb8();

    let stem = image_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "section".to_string());
    let parent = image_path.parent().unwrap_or_else(|| Path::new("."));
    let dst = if create_subdir {
        parent.join(&stem)
    } else {
        parent.to_path_buf()
    };
    fs::create_dir_all(&dst)?;

    let written = polygons
        .par_iter()
        .enumerate()
        .map(|(idx, poly)| -> Result<Option<PathBuf>> {
            let Some(section) = crop_polygon(&img, poly) else {
                return Ok(None);
            };
            let output = dst.join(format!("{} {:03}.png", stem, idx + 1));
            section.save(&output)?;
            Ok(Some(output))
        })
        .collect::<Result<Vec<_>>>()?;

    let written: Vec<PathBuf> = written.into_iter().flatten().collect();
    info!(
        path = %image_path.display(),
        sections = written.len(),
        "saved sections"
    );
    Ok(written)
}

/// Sorted image files directly inside `dir`, filtered by
/// [`ALLOWED_EXTENSIONS`]. Missing or unreadable directories yield an
/// empty list.
pub fn image_files_in(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .map(|ext| {
                        let ext = ext.to_string_lossy().to_lowercase();
                        ALLOWED_EXTENSIONS.contains(&ext.as_str())
                    })
                    .unwrap_or(false)
        })
        .collect();
    files.sort();
    files
}
