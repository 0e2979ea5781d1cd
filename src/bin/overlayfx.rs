use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use overlayfx::{
    BezPath, Color, CpuCanvas, CpuCanvasOpts, CropOverlay, CropOverlayConfig, EffectDocument,
    RasterImage, Rect, crop_rect, fit_path,
};

#[derive(Parser, Debug)]
#[command(name = "overlayfx", version)]
struct Cli {
    /// Log verbosity for tracing output (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn")]
    log: tracing::Level,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw an effect document over an image and write a PNG.
    Render(RenderArgs),
    /// Fit an SVG path into a container and print the result as JSON.
    Fit(FitArgs),
    /// Render the shaded crop overlay for an SVG path as a PNG.
    Overlay(OverlayArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input image (any format the `image` crate decodes).
    #[arg(long)]
    image: PathBuf,

    /// Effect document JSON.
    #[arg(long)]
    effects: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Directory font paths are resolved against. Defaults to the effect document's directory.
    #[arg(long)]
    fonts_root: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FitArgs {
    /// SVG path data, e.g. "M0 0 L1 0 L1 1 Z".
    #[arg(long)]
    path: String,

    #[arg(long)]
    width: f64,

    #[arg(long)]
    height: f64,

    /// Largest share of the container the path may fill.
    #[arg(long, default_value_t = 0.8)]
    max_fill: f64,
}

#[derive(Parser, Debug)]
struct OverlayArgs {
    /// SVG path data of the crop shape.
    #[arg(long)]
    path: String,

    #[arg(long)]
    width: u32,

    #[arg(long)]
    height: u32,

    #[arg(long, default_value_t = 0.8)]
    max_fill: f64,

    /// Shade color as hex, e.g. "#000000cc".
    #[arg(long)]
    shade: Option<Color>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(serde::Serialize)]
struct FitOutput {
    width: f64,
    height: f64,
    origin: [f64; 2],
    path: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log)
        .with_writer(std::io::stderr)
        .init();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Fit(args) => cmd_fit(args),
        Command::Overlay(args) => cmd_overlay(args),
    }
}

fn parse_svg_path(d: &str) -> anyhow::Result<BezPath> {
    BezPath::from_svg(d).map_err(|e| anyhow::anyhow!("parse SVG path data: {e}"))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let base = RasterImage::open(&args.image)?;
    let doc = EffectDocument::from_path(&args.effects)?;
    let fonts_root = match &args.fonts_root {
        Some(root) => root.clone(),
        None => args
            .effects
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
    };
    let item = doc.apply_to(base, &fonts_root)?;

    let mut canvas = CpuCanvas::new(CpuCanvasOpts::default());
    let out = item.render(&mut canvas)?;
    out.save_png(&args.out)?;

    eprintln!(
        "wrote {} ({}x{}, {} effects)",
        args.out.display(),
        out.width(),
        out.height(),
        item.effects().len()
    );
    Ok(())
}

fn cmd_fit(args: FitArgs) -> anyhow::Result<()> {
    let path = parse_svg_path(&args.path)?;
    let fitted = fit_path(&path, args.width, args.height, args.max_fill).with_context(|| {
        format!(
            "path cannot be fitted into {}x{} at max fill {}",
            args.width, args.height, args.max_fill
        )
    })?;
    let rect = crop_rect(&fitted, args.width, args.height);
    let out = FitOutput {
        width: fitted.width,
        height: fitted.height,
        origin: [rect.x0, rect.y0],
        path: fitted.path.to_svg(),
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_overlay(args: OverlayArgs) -> anyhow::Result<()> {
    let mut config = CropOverlayConfig::default().with_max_fill_percent(args.max_fill);
    if let Some(shade) = args.shade {
        config = config.with_shade_color(shade);
    }
    let mut overlay = CropOverlay::new(config)?;
    overlay.set_frame(Rect::new(0.0, 0.0, args.width as f64, args.height as f64));
    overlay.set_crop_path(Some(parse_svg_path(&args.path)?));

    let mut canvas = CpuCanvas::default();
    let img = overlay.redraw(&mut canvas)?;
    if overlay.crop_rect().is_none() {
        tracing::warn!("crop path could not be fitted; overlay is fully shaded");
    }
    img.save_png(&args.out)?;
    eprintln!("wrote {} ({}x{})", args.out.display(), img.width(), img.height());
    Ok(())
}
