use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;

use whitted::{default_threads, scenes};

#[derive(Parser, Debug)]
#[command(version, about = "Render a built-in scene with a recursive ray tracer")]
struct Args {
    /// One of: spheres, boxes, mirrors
    #[arg(short, long, default_value = "spheres")]
    scene: String,

    #[arg(long, default_value_t = 1800)]
    width: u32,

    #[arg(long, default_value_t = 800)]
    height: u32,

    /// World-space width of the image plane
    #[arg(long, default_value_t = 4.)]
    plane_width: f64,

    /// Worker threads (at least 2)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Overrides the scene's maximum recursion level
    #[arg(long)]
    max_depth: Option<u32>,

    #[arg(long)]
    no_reflections: bool,

    #[arg(long)]
    no_refractions: bool,

    #[arg(short, long, default_value = "render.png")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let mut scene = scenes::by_name(&args.scene)
        .ok_or_else(|| anyhow!("unknown scene {:?}, expected one of {:?}", args.scene, scenes::NAMES))?
        .with_context(|| format!("failed to build scene {}", args.scene))?;
    if let Some(depth) = args.max_depth {
        scene = scene.with_max_recursion_level(depth);
    }
    if args.no_reflections {
        scene = scene.with_reflections(false);
    }
    if args.no_refractions {
        scene = scene.with_refractions(false);
    }
    info!("Rendering:\n{}", scene);

    let threads = args.threads.unwrap_or_else(default_threads);
    let image = scene
        .render_with_threads(args.width, args.height, args.plane_width, threads)
        .context("render failed")?;

    image
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!("Wrote {}", args.output.display());
    Ok(())
}
