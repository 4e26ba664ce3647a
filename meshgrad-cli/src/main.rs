//! Mesh-gradient CLI
//!
//! Converts a raster image into an editable vector "mesh gradient"
//! SVG: a background gradient plus layered, smoothly shaded regions.
//!
//! Run with: `meshgrad -i photo.jpg -o out.svg --mood 60`
//!
//! The mood value (0-100) drives all styling: low mood keeps shapes
//! small and sharp, high mood makes them large and soft. Without
//! `--seed`, regenerating gives a different composition each time.

mod svg;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use meshgrad_core::Pipeline;

#[derive(Parser, Debug)]
#[command(name = "meshgrad")]
#[command(about = "Render a mesh-gradient SVG from a raster image", long_about = None)]
#[command(arg_required_else_help = true)]
struct Args {
    /// Input image path
    #[arg(short, long)]
    input: PathBuf,

    /// Output SVG path
    #[arg(short, long)]
    output: PathBuf,

    /// Mood value in [0, 100]: 0 = tight and sharp, 100 = large and soft
    #[arg(short, long, default_value = "50.0")]
    mood: f64,

    /// Random seed for reproducible output (omit for a fresh
    /// composition each run)
    #[arg(long)]
    seed: Option<u64>,

    /// Working image width (preserves aspect ratio if only one dim given)
    #[arg(long)]
    width: Option<u32>,

    /// Working image height (preserves aspect ratio if only one dim given)
    #[arg(long)]
    height: Option<u32>,

    /// Gaussian blur sigma applied before analysis (0 disables).
    /// The pipeline expects a denoised image; this supplies it.
    #[arg(long, default_value = "1.0")]
    blur: f32,

    /// Base minimum spacing between sample points, in pixels
    #[arg(long, default_value = "24.0", value_parser = parse_spacing)]
    spacing: f64,

    /// Also write the composed scene as JSON
    #[arg(long)]
    dump_scene: Option<PathBuf>,
}

/// Parse a spacing argument, rejecting non-positive values up front.
fn parse_spacing(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("invalid spacing: {e}"))?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(format!("spacing must be positive, got {v}"))
    }
}

/// Resolve working dimensions from CLI overrides.
/// If only one dimension is given, the other preserves aspect ratio.
fn resolve_dimensions(
    orig_w: u32,
    orig_h: u32,
    cli_w: Option<u32>,
    cli_h: Option<u32>,
) -> (u32, u32) {
    match (cli_w, cli_h) {
        (Some(tw), Some(th)) => (tw, th),
        (Some(tw), None) => {
            let th = (orig_h as f64 * tw as f64 / orig_w as f64).round() as u32;
            (tw, th)
        }
        (None, Some(th)) => {
            let tw = (orig_w as f64 * th as f64 / orig_h as f64).round() as u32;
            (tw, th)
        }
        (None, None) => (orig_w, orig_h),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    println!("Loading image: {:?}", args.input);
    let mut image = image::open(&args.input)
        .with_context(|| format!("failed to open {:?}", args.input))?
        .to_rgb8();
    let (orig_w, orig_h) = image.dimensions();

    let (target_w, target_h) = resolve_dimensions(orig_w, orig_h, args.width, args.height);
    if (target_w, target_h) != (orig_w, orig_h) {
        println!("Resizing {}x{} -> {}x{}", orig_w, orig_h, target_w, target_h);
        image = image::imageops::resize(
            &image,
            target_w,
            target_h,
            image::imageops::FilterType::Lanczos3,
        );
    }

    if args.blur > 0.0 {
        image = image::imageops::blur(&image, args.blur);
    }

    let (width, height) = image.dimensions();
    println!("Image size: {}x{}", width, height);

    let mut pipeline = match args.seed {
        Some(seed) => {
            println!("Using seed: {seed}");
            Pipeline::seeded(seed)
        }
        None => Pipeline::new(),
    }
    .with_spacing(args.spacing);

    let scene = pipeline.run(&image, args.mood)?;
    println!(
        "Composed scene: {} primary, {} detail shapes (mood {})",
        scene.primary.len(),
        scene.detail.len(),
        args.mood,
    );

    if let Some(path) = &args.dump_scene {
        let json = serde_json::to_string_pretty(&scene)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write scene dump {path:?}"))?;
        println!("Scene dump saved to: {path:?}");
    }

    std::fs::write(&args.output, svg::scene_to_svg(&scene))
        .with_context(|| format!("failed to write {:?}", args.output))?;
    println!("Output saved to: {:?}", args.output);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spacing() {
        assert_eq!(parse_spacing("24.0"), Ok(24.0));
        assert_eq!(parse_spacing("0.5"), Ok(0.5));
        assert!(parse_spacing("0").is_err());
        assert!(parse_spacing("-5").is_err());
        assert!(parse_spacing("abc").is_err());
    }

    #[test]
    fn test_resolve_dimensions() {
        assert_eq!(resolve_dimensions(800, 600, None, None), (800, 600));
        assert_eq!(resolve_dimensions(800, 600, Some(400), None), (400, 300));
        assert_eq!(resolve_dimensions(800, 600, None, Some(300)), (400, 300));
        assert_eq!(
            resolve_dimensions(800, 600, Some(100), Some(100)),
            (100, 100)
        );
    }
}
