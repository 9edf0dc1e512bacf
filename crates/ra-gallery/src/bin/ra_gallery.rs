use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use image::{GrayImage, Rgb, RgbImage, RgbaImage};
use log::info;
use ra_binarize::{
    SAUVOLA_DEFAULT_R, ThresholdMethod, ThresholdParams, WindowBorder, binarize_gray,
};
use ra_core::{BorderMode, Image, PixelBuffer, Point2i, Rgba8, to_gray_u8};
use ra_filter::{KernelKind, SmoothConfig, smooth};
use ra_scan::{Coverage, CubicBezier, LineAlgorithm, Primitive, PointSink, rasterize};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "ra_gallery")]
#[command(about = "Run raster algorithms on external fixtures")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(name = "smooth")]
    Smooth(SmoothArgs),
    #[command(name = "threshold")]
    Threshold(ThresholdArgs),
    #[command(name = "raster")]
    Raster(RasterArgs),
}

#[derive(Args, Debug, Clone)]
struct InputArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value = "docs/fig/raw")]
    out: PathBuf,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum KernelArg {
    Box,
    Gaussian,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum BorderArg {
    Clamp,
    Reflect101,
}

#[derive(Args, Debug, Clone)]
struct SmoothArgs {
    #[command(flatten)]
    common: InputArgs,
    #[arg(long, value_enum, default_value_t = KernelArg::Box)]
    kernel: KernelArg,
    #[arg(long, default_value_t = 3)]
    size: usize,
    #[arg(long, default_value_t = 1.0)]
    sigma: f64,
    #[arg(long, value_enum, default_value_t = BorderArg::Clamp)]
    border: BorderArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum MethodArg {
    Niblack,
    Sauvola,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum WindowBorderArg {
    Shrink,
    Interior,
}

#[derive(Args, Debug, Clone)]
struct ThresholdArgs {
    #[command(flatten)]
    common: InputArgs,
    #[arg(long, value_enum, default_value_t = MethodArg::Niblack)]
    method: MethodArg,
    #[arg(long, default_value_t = 15)]
    window: usize,
    /// Defaults to -0.2 for Niblack and 0.2 for Sauvola.
    #[arg(long, allow_negative_numbers = true)]
    k: Option<f64>,
    #[arg(long, default_value_t = SAUVOLA_DEFAULT_R)]
    r: f64,
    #[arg(long, value_enum, default_value_t = WindowBorderArg::Shrink)]
    border: WindowBorderArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum RasterAlgorithm {
    Step,
    Dda,
    Bresenham,
    Circle,
    Wu,
    Castle,
}

#[derive(Args, Debug, Clone)]
struct RasterArgs {
    #[arg(long, value_enum, default_value_t = RasterAlgorithm::Bresenham)]
    algorithm: RasterAlgorithm,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    x1: i32,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    y1: i32,
    #[arg(long, default_value_t = 15, allow_negative_numbers = true)]
    x2: i32,
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
    y2: i32,
    /// Circle radius around (x1, y1).
    #[arg(long, default_value_t = 10)]
    radius: u32,
    /// First inner Bezier control point.
    #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
    x3: i32,
    #[arg(long, default_value_t = 15, allow_negative_numbers = true)]
    y3: i32,
    /// Second inner Bezier control point.
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
    x4: i32,
    #[arg(long, default_value_t = -5, allow_negative_numbers = true)]
    y4: i32,
    /// Cell size in output pixels.
    #[arg(long, default_value_t = 20)]
    scale: u32,
    #[arg(long, default_value = "docs/fig/raw")]
    out: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
struct MetaSmooth {
    kernel: &'static str,
    size: usize,
    sigma: Option<f64>,
    border: &'static str,
    width: usize,
    height: usize,
    elapsed_us: u64,
}

#[derive(Debug, Clone, Serialize)]
struct MetaThreshold {
    method: &'static str,
    window: usize,
    k: f64,
    r: Option<f64>,
    border: &'static str,
    gray_rule: &'static str,
    pixel_rule: &'static str,
    foreground: usize,
    elapsed_us: u64,
}

#[derive(Debug, Clone, Serialize)]
struct WeightedPointDto {
    x: i32,
    y: i32,
    weight: f32,
}

#[derive(Debug, Clone, Serialize)]
struct MetaRaster {
    algorithm: &'static str,
    primitive: String,
    emitted: usize,
    cells: usize,
    scale: u32,
    axes: &'static str,
    elapsed_us: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.cmd {
        Command::Smooth(args) => run_smooth(args),
        Command::Threshold(args) => run_threshold(args),
        Command::Raster(args) => run_raster(args),
    }
}

fn run_smooth(args: SmoothArgs) -> Result<()> {
    let case_dir = prepare_case(&args.common, "smooth")?;
    let img = load_input_rgba(&args.common.input)?;

    let border = match args.border {
        BorderArg::Clamp => BorderMode::Clamp,
        BorderArg::Reflect101 => BorderMode::Reflect101,
    };
    let kernel = match args.kernel {
        KernelArg::Box => KernelKind::Box,
        KernelArg::Gaussian => KernelKind::Gaussian { sigma: args.sigma },
    };
    let cfg = SmoothConfig {
        kernel,
        size: args.size,
        border,
    };

    let start = Instant::now();
    let out = smooth(&img.as_view(), &cfg).context("smoothing input")?;
    let elapsed_us = elapsed_micros(start);
    info!("smooth: {cfg:?} in {elapsed_us} us");

    save_rgba_image(case_dir.join("smoothed.png"), &out)?;
    write_json(
        case_dir.join("meta.json"),
        &MetaSmooth {
            kernel: match args.kernel {
                KernelArg::Box => "box",
                KernelArg::Gaussian => "gaussian",
            },
            size: args.size,
            sigma: (args.kernel == KernelArg::Gaussian).then_some(args.sigma),
            border: match border {
                BorderMode::Clamp => "clamp",
                BorderMode::Reflect101 => "reflect101",
            },
            width: out.width(),
            height: out.height(),
            elapsed_us,
        },
    )?;

    Ok(())
}

fn run_threshold(args: ThresholdArgs) -> Result<()> {
    let case_dir = prepare_case(&args.common, "threshold")?;
    let img = load_input_rgba(&args.common.input)?;

    let (method, k) = match args.method {
        MethodArg::Niblack => {
            let k = args.k.unwrap_or(-0.2);
            (ThresholdMethod::Niblack { k }, k)
        }
        MethodArg::Sauvola => {
            let k = args.k.unwrap_or(0.2);
            (ThresholdMethod::Sauvola { k, r: args.r }, k)
        }
    };
    let border = match args.border {
        WindowBorderArg::Shrink => WindowBorder::Shrink,
        WindowBorderArg::Interior => WindowBorder::InteriorOnly,
    };
    let params = ThresholdParams {
        method,
        window_size: args.window,
        border,
    };

    let start = Instant::now();
    let gray = to_gray_u8(&img.as_view());
    let binary = binarize_gray(&gray.as_view(), &params).context("thresholding input")?;
    let elapsed_us = elapsed_micros(start);
    info!("threshold: {params:?} in {elapsed_us} us");

    save_luma_image(case_dir.join("gray.png"), &gray)?;
    save_luma_image(case_dir.join("binary.png"), &binary)?;
    write_json(
        case_dir.join("meta.json"),
        &MetaThreshold {
            method: match args.method {
                MethodArg::Niblack => "niblack",
                MethodArg::Sauvola => "sauvola",
            },
            window: args.window,
            k,
            r: matches!(method, ThresholdMethod::Sauvola { .. }).then_some(args.r),
            border: match border {
                WindowBorder::Shrink => "shrink",
                WindowBorder::InteriorOnly => "interior",
            },
            gray_rule: "trunc(0.299 R) + trunc(0.587 G) + trunc(0.114 B)",
            pixel_rule: "255 iff center > T",
            foreground: binary.data().iter().filter(|&&v| v == 255).count(),
            elapsed_us,
        },
    )?;

    Ok(())
}

fn run_raster(args: RasterArgs) -> Result<()> {
    if args.scale < 2 {
        bail!("scale must be at least 2 pixels per cell, got {}.", args.scale);
    }
    let case_dir = args.out.join("raster");
    fs::create_dir_all(&case_dir)
        .with_context(|| format!("creating output directory {}", case_dir.display()))?;

    let p1 = Point2i::new(args.x1, args.y1);
    let p2 = Point2i::new(args.x2, args.y2);
    let p3 = Point2i::new(args.x3, args.y3);
    let p4 = Point2i::new(args.x4, args.y4);

    let line = |algorithm| Primitive::Line {
        from: p1,
        to: p2,
        algorithm,
    };
    let (name, primitive) = match args.algorithm {
        RasterAlgorithm::Step => ("step", line(LineAlgorithm::Naive)),
        RasterAlgorithm::Dda => ("dda", line(LineAlgorithm::Dda)),
        RasterAlgorithm::Bresenham => ("bresenham", line(LineAlgorithm::Bresenham)),
        RasterAlgorithm::Wu => ("wu", line(LineAlgorithm::Wu)),
        RasterAlgorithm::Circle => (
            "circle",
            Primitive::Circle {
                center: p1,
                radius: args.radius,
            },
        ),
        RasterAlgorithm::Castle => (
            "castle",
            Primitive::Bezier {
                // (x1, y1) and (x2, y2) are the curve ends.
                controls: CubicBezier::from_grid(p1, p3, p4, p2),
            },
        ),
    };

    let mut emitted: Vec<WeightedPointDto> = Vec::new();
    let mut coverage = Coverage::new();
    let start = Instant::now();
    {
        let mut tee = Tee {
            points: &mut emitted,
            coverage: &mut coverage,
        };
        rasterize(&primitive, &mut tee).context("rasterizing primitive")?;
    }
    let elapsed_us = elapsed_micros(start);
    info!("raster: {name} emitted {} points in {elapsed_us} us", emitted.len());

    let markers = match primitive {
        Primitive::Bezier { .. } => vec![
            (p1, Rgb([220, 40, 40])),
            (p2, Rgb([220, 40, 40])),
            (p3, Rgb([255, 160, 0])),
            (p4, Rgb([255, 160, 0])),
        ],
        _ => Vec::new(),
    };
    let grid = render_grid(&coverage, &markers, args.scale)?;
    grid.save(case_dir.join("grid.png"))
        .with_context(|| format!("saving image {}", case_dir.join("grid.png").display()))?;

    write_json(case_dir.join("points.json"), &emitted)?;
    write_json(
        case_dir.join("meta.json"),
        &MetaRaster {
            algorithm: name,
            primitive: format!("{primitive:?}"),
            emitted: emitted.len(),
            cells: coverage.len(),
            scale: args.scale,
            axes: "x right, y up",
            elapsed_us,
        },
    )?;

    Ok(())
}

/// Records the raw emission sequence while compositing into a coverage map.
struct Tee<'a> {
    points: &'a mut Vec<WeightedPointDto>,
    coverage: &'a mut Coverage,
}

impl PointSink for Tee<'_> {
    fn plot(&mut self, p: Point2i, weight: f32) {
        self.points.push(WeightedPointDto {
            x: p.x,
            y: p.y,
            weight,
        });
        self.coverage.plot(p, weight);
    }
}

/// Draws covered cells on a y-up grid with a two-cell margin.
///
/// Coverage `a` is shown as black over white at opacity `a`. Markers are
/// outlined cells drawn on top.
fn render_grid(
    coverage: &Coverage,
    markers: &[(Point2i, Rgb<u8>)],
    scale: u32,
) -> Result<RgbImage> {
    const MARGIN: i64 = 2;

    let mut lo = Point2i::new(0, 0);
    let mut hi = Point2i::new(0, 0);
    let corners = coverage
        .bounds()
        .into_iter()
        .flat_map(|(a, b)| [a, b])
        .chain(markers.iter().map(|&(p, _)| p));
    for p in corners {
        lo = Point2i::new(lo.x.min(p.x), lo.y.min(p.y));
        hi = Point2i::new(hi.x.max(p.x), hi.y.max(p.y));
    }
    let x0 = i64::from(lo.x) - MARGIN;
    let y_top = i64::from(hi.y) + MARGIN;
    let cols = i64::from(hi.x) - i64::from(lo.x) + 2 * MARGIN + 1;
    let rows = i64::from(hi.y) - i64::from(lo.y) + 2 * MARGIN + 1;

    let s = i64::from(scale);
    let (w, h) = grid_pixels(cols, rows, scale)?;
    let mut img = RgbImage::from_pixel(w as u32, h as u32, Rgb([255, 255, 255]));

    // Top-left output pixel of a cell.
    let origin = |c: Point2i| ((i64::from(c.x) - x0) * s, (y_top - i64::from(c.y)) * s);

    for (cell, a) in coverage.iter() {
        let v = (255.0 * (1.0 - a)).round().clamp(0.0, 255.0) as u8;
        let (px, py) = origin(cell);
        fill_rect(&mut img, px, py, s, s, Rgb([v, v, v]));
    }

    for i in 0..=cols {
        fill_rect(&mut img, i * s, 0, 1, h, Rgb([220, 220, 220]));
    }
    for j in 0..=rows {
        fill_rect(&mut img, 0, j * s, w, 1, Rgb([220, 220, 220]));
    }

    // Axes along the left and bottom edges of cell (0, 0).
    let (ax, ay) = origin(Point2i::new(0, 0));
    fill_rect(&mut img, ax - 1, 0, 2, h, Rgb([0, 0, 0]));
    fill_rect(&mut img, 0, ay + s - 1, w, 2, Rgb([0, 0, 0]));

    for &(cell, color) in markers {
        let (px, py) = origin(cell);
        let t = (s / 6).max(1);
        fill_rect(&mut img, px, py, s, t, color);
        fill_rect(&mut img, px, py + s - t, s, t, color);
        fill_rect(&mut img, px, py, t, s, color);
        fill_rect(&mut img, px + s - t, py, t, s, color);
    }

    Ok(img)
}

const MAX_GRID_PIXELS: i64 = 64 * 1024 * 1024;

/// Output size in pixels of a `cols x rows` grid, at most `MAX_GRID_PIXELS`.
fn grid_pixels(cols: i64, rows: i64, scale: u32) -> Result<(i64, i64)> {
    let s = i64::from(scale);
    let size = cols
        .checked_mul(s)
        .zip(rows.checked_mul(s))
        .filter(|&(w, h)| w.checked_mul(h).is_some_and(|n| n <= MAX_GRID_PIXELS));
    match size {
        Some(wh) => Ok(wh),
        None => bail!("grid of {cols}x{rows} cells at scale {scale} is too large to render."),
    }
}

fn fill_rect(img: &mut RgbImage, x: i64, y: i64, w: i64, h: i64, color: Rgb<u8>) {
    let (iw, ih) = (i64::from(img.width()), i64::from(img.height()));
    for yy in y.max(0)..(y + h).min(ih) {
        for xx in x.max(0)..(x + w).min(iw) {
            img.put_pixel(xx as u32, yy as u32, color);
        }
    }
}

fn prepare_case(common: &InputArgs, case_name: &str) -> Result<PathBuf> {
    ensure_file_exists(&common.input, "input")?;

    let case_dir = common.out.join(case_name);
    fs::create_dir_all(&case_dir)
        .with_context(|| format!("creating output directory {}", case_dir.display()))?;

    fs::copy(&common.input, case_dir.join("input.png")).with_context(|| {
        format!(
            "copying input {} -> {}",
            common.input.display(),
            case_dir.join("input.png").display()
        )
    })?;

    Ok(case_dir)
}

fn load_input_rgba(path: &Path) -> Result<PixelBuffer> {
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    let rgba = dyn_img.to_rgba8();
    let (w, h) = rgba.dimensions();
    let data = rgba
        .into_raw()
        .chunks_exact(4)
        .map(|c| Rgba8::new(c[0], c[1], c[2], c[3]))
        .collect();

    Image::from_vec(w as usize, h as usize, data)
        .with_context(|| format!("constructing pixel buffer from {}", path.display()))
}

fn save_rgba_image(path: PathBuf, img: &PixelBuffer) -> Result<()> {
    let raw = img.data().iter().flat_map(|p| p.to_array()).collect();
    let out = RgbaImage::from_raw(img.width() as u32, img.height() as u32, raw)
        .context("constructing RgbaImage from raw bytes")?;
    out.save(&path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn save_luma_image(path: PathBuf, img: &Image<u8>) -> Result<()> {
    let gray = GrayImage::from_raw(img.width() as u32, img.height() as u32, img.data().to_vec())
        .context("constructing GrayImage from raw bytes")?;
    gray.save(&path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn elapsed_micros(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX)
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}
