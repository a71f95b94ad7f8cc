//! image-splitter - split raster images into sections
//!
//! CLI entry point

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::Level;

use image_splitter::{
    determine_boundary, exit_codes, image_files_in, polygons_from_lines, save_sections,
    slice_image, slice_path, uniform_grid, CliOverrides, Config, Point, Polygon, Rect, SliceMode,
    Size, SplitOptions, GREEN,
};

#[derive(Parser)]
#[command(
    name = "image-splitter",
    version,
    about = "Split raster images into sections along solid color bands"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Auto-detect solid bands and export the resulting sections
    Slice(SliceArgs),
    /// Split along manually specified cut lines
    Lines(LinesArgs),
    /// Split into a uniform vertical x horizontal grid
    Grid(GridArgs),
    /// Auto-trim uniform margins and report (or export) the content box
    Trim(TrimArgs),
    /// Show detected bands without writing anything
    Info(InfoArgs),
}

#[derive(Args)]
struct CommonArgs {
    /// Per-channel color tolerance (default 25)
    #[arg(long)]
    tolerance: Option<u8>,

    /// Padding in pixels re-added around detected content
    #[arg(long)]
    padding: Option<u32>,

    /// Minimum band length as percent of the dimension (default 10)
    #[arg(long)]
    min_section: Option<f32>,

    /// Explicit config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct SliceArgs {
    /// Image file or directory of images
    input: PathBuf,

    /// Print boundary lines instead of exporting regions
    #[arg(long)]
    lines: bool,

    /// Write sections into a per-image subdirectory
    #[arg(long)]
    subdir: bool,

    /// Show what would be written without writing it
    #[arg(long)]
    dry_run: bool,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args)]
struct LinesArgs {
    /// Image file
    input: PathBuf,

    /// Cut line as "x1,y1:x2,y2"; repeatable. Lines are extended to the
    /// image border before the grid is formed.
    #[arg(long = "cut", value_name = "X1,Y1:X2,Y2")]
    cuts: Vec<String>,

    /// Write sections into a per-image subdirectory
    #[arg(long)]
    subdir: bool,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args)]
struct GridArgs {
    /// Image file or directory of images
    input: PathBuf,

    /// Number of columns
    #[arg(long, default_value_t = 2)]
    vert: u32,

    /// Number of rows
    #[arg(long, default_value_t = 2)]
    horz: u32,

    /// Write sections into a per-image subdirectory
    #[arg(long)]
    subdir: bool,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args)]
struct TrimArgs {
    /// Image file
    input: PathBuf,

    /// Save the trimmed image here instead of only reporting
    #[arg(long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args)]
struct InfoArgs {
    /// Image file
    input: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Slice(args) => run_slice(&args),
        Commands::Lines(args) => run_lines(&args),
        Commands::Grid(args) => run_grid(&args),
        Commands::Trim(args) => run_trim(&args),
        Commands::Info(args) => run_info(&args),
    };

    std::process::exit(match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_codes::GENERAL_ERROR
        }
    });
}

fn load_options(common: &CommonArgs) -> anyhow::Result<(SplitOptions, Config)> {
    let config = match &common.config {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::load().unwrap_or_default(),
    };
    let overrides = CliOverrides {
        tolerance: common.tolerance,
        padding: common.padding,
        min_section_percent: common.min_section,
    };
    Ok((config.split_options(&overrides), config))
}

/// Resolve a file-or-directory input into the list of images to process
fn collect_inputs(input: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if !input.exists() {
        eprintln!("Error: Input path does not exist: {}", input.display());
        std::process::exit(exit_codes::INPUT_NOT_FOUND);
    }
    let files = if input.is_dir() {
        image_files_in(input)
    } else {
        vec![input.to_path_buf()]
    };
    if files.is_empty() {
        bail!("no image files found in {}", input.display());
    }
    Ok(files)
}

fn batch_bar(len: usize) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
            .expect("static progress template"),
    );
    bar
}

fn open_rgb(path: &Path) -> anyhow::Result<image::RgbImage> {
    Ok(image::open(path)
        .with_context(|| format!("opening {}", path.display()))?
        .to_rgb8())
}

fn run_slice(args: &SliceArgs) -> anyhow::Result<()> {
    let (options, config) = load_options(&args.common)?;
    let subdir = args.subdir || config.create_subdir.unwrap_or(false);
    let files = collect_inputs(&args.input)?;
    let mode = if args.lines {
        SliceMode::Lines
    } else {
        SliceMode::Regions
    };

    let bar = batch_bar(files.len());
    for file in &files {
        bar.set_message(file.display().to_string());
        let polygons = slice_path(file, &options, mode)?;

        if args.lines || args.dry_run {
            print_polygons(file, &polygons);
        } else {
            let written = save_sections(file, &polygons, subdir)?;
            bar.println(format!(
                "{}: {} section(s) written",
                file.display(),
                written.len()
            ));
        }
        bar.inc(1);
    }
    bar.finish_and_clear();
    Ok(())
}

fn run_lines(args: &LinesArgs) -> anyhow::Result<()> {
    let (_, config) = load_options(&args.common)?;
    let subdir = args.subdir || config.create_subdir.unwrap_or(false);
    if args.cuts.is_empty() {
        bail!("at least one --cut is required");
    }

    let img = open_rgb(&args.input)?;
    let size = Size::new(img.width(), img.height());

    let mut lines = Vec::with_capacity(args.cuts.len());
    for spec in &args.cuts {
        let (a, b) = parse_cut(spec)?;
        let mut line = Polygon::new(vec![a, b], GREEN);
        line.bind_to(size.width as i32, size.height as i32);
        lines.push(line);
    }

    let regions = polygons_from_lines(&lines, size);
    let written = save_sections(&args.input, &regions, subdir)?;
    println!(
        "{}: {} section(s) written",
        args.input.display(),
        written.len()
    );
    Ok(())
}

fn run_grid(args: &GridArgs) -> anyhow::Result<()> {
    let (_, config) = load_options(&args.common)?;
    let subdir = args.subdir || config.create_subdir.unwrap_or(false);
    if args.vert == 0 || args.horz == 0 {
        bail!("grid needs at least 1 column and 1 row");
    }
    let files = collect_inputs(&args.input)?;

    let bar = batch_bar(files.len());
    for file in &files {
        bar.set_message(file.display().to_string());
        let img = open_rgb(file)?;
        let cells = uniform_grid(Size::new(img.width(), img.height()), args.vert, args.horz);
        let written = save_sections(file, &cells, subdir)?;
        bar.println(format!(
            "{}: {} cell(s) written",
            file.display(),
            written.len()
        ));
        bar.inc(1);
    }
    bar.finish_and_clear();
    Ok(())
}

fn run_trim(args: &TrimArgs) -> anyhow::Result<()> {
    let (options, _) = load_options(&args.common)?;
    let img = open_rgb(&args.input)?;
    if img.width() == 0 || img.height() == 0 {
        bail!("empty image: {}", args.input.display());
    }

    let corners = Rect::new(0, 0, img.width() as i32, img.height() as i32);
    let (tl, br) = determine_boundary(&img, corners, options.padding, options.tolerance);
    println!(
        "content box: ({}, {}) - ({}, {}) of {}x{}",
        tl.x,
        tl.y,
        br.x,
        br.y,
        img.width(),
        img.height()
    );

    if let Some(output) = &args.output {
        let poly = Polygon::new(vec![tl, br], GREEN);
        match image_splitter::crop_polygon(&img, &poly) {
            Some(section) => {
                section
                    .save(output)
                    .with_context(|| format!("saving {}", output.display()))?;
                println!("wrote {}", output.display());
            }
            None => bail!("trim collapsed to an empty region, nothing to save"),
        }
    }
    Ok(())
}

fn run_info(args: &InfoArgs) -> anyhow::Result<()> {
    let (options, _) = load_options(&args.common)?;
    let img = open_rgb(&args.input)?;

    let (rows, cols) = image_splitter::solid_grid(&img, options.tolerance);
    let (row_bands, col_bands) = image_splitter::band_grid(&img, &options);

    println!("{}: {}x{}", args.input.display(), img.width(), img.height());
    println!("solid rows: {}  solid cols: {}", rows.len(), cols.len());
    println!("row bands:  {:?}", row_bands);
    println!("col bands:  {:?}", col_bands);

    let regions = slice_image(&img, &options, SliceMode::Regions);
    println!("regions:    {}", regions.len());
    for region in &regions {
        println!("  {:?}", region.bounding_rect());
    }
    Ok(())
}

/// Parse a cut spec of the form "x1,y1:x2,y2"
fn parse_cut(spec: &str) -> anyhow::Result<(Point, Point)> {
    let err = || format!("invalid cut '{}', expected X1,Y1:X2,Y2", spec);
    let (a, b) = spec.split_once(':').with_context(err)?;
    let parse_point = |s: &str| -> anyhow::Result<Point> {
        let (x, y) = s.split_once(',').with_context(err)?;
        Ok(Point::new(
            x.trim().parse().with_context(err)?,
            y.trim().parse().with_context(err)?,
        ))
    };
    Ok((parse_point(a)?, parse_point(b)?))
}

fn print_polygons(file: &Path, polygons: &[Polygon]) {
    println!("{}:", file.display());
    for poly in polygons {
        let kind = if poly.is_vertical_line() {
            "vertical"
        } else if poly.is_horizontal_line() {
            "horizontal"
        } else {
            "region"
        };
        let points: Vec<(i32, i32)> = poly.points().iter().map(|p| (p.x, p.y)).collect();
        println!("  {:<10} {:?}", kind, points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cut() {
        let (a, b) = parse_cut("40,10:40,90").unwrap();
        assert_eq!(a, Point::new(40, 10));
        assert_eq!(b, Point::new(40, 90));
    }

    #[test]
    fn test_parse_cut_rejects_garbage() {
        assert!(parse_cut("40,10").is_err());
        assert!(parse_cut("a,b:c,d").is_err());
        assert!(parse_cut("").is_err());
    }
}
