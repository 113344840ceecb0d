//! spritetools command-line inspector.
//!
//! Loads one sprite sheet (`<name>.data` + `<name>.png`), scales it and prints
//! its frame table. Optionally writes the scaled image back out as PNG, which
//! is handy for checking a scale factor before shipping assets.
//!
//! Settings come from, in increasing priority: built-in defaults, the INI file
//! (`./spritetools.ini` or `--config`), command-line flags.
//!
//! # Running
//!
//! ```sh
//! cargo run -- hero --dir assets/sprites --scale 2 --export /tmp/hero@2x.png
//! ```

use std::path::PathBuf;

use clap::Parser;
use log::{debug, error, info};
use spritetools::config::LoaderConfig;
use spritetools::frames::{SpriteSheet, load_frames_info_with};
use spritetools::{AssetError, ResizeFilter, ScaleFactor, export_png};

/// Sprite sheet inspector
#[derive(Parser)]
#[command(version, about = "Load a sprite sheet, scale it and print its frame table.")]
struct Cli {
    /// Sheet base name, without extension.
    name: String,

    /// Directory holding <NAME>.data and <NAME>.png.
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Scale factor. Zero or negative means no scaling.
    #[arg(long, allow_negative_numbers = true)]
    scale: Option<f64>,

    /// Resize filter: nearest or smooth.
    #[arg(long)]
    filter: Option<ResizeFilter>,

    /// Write the scaled sheet image to this PNG path.
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// INI configuration file (default: ./spritetools.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AssetError> {
    let config = resolve_config(&cli)?;
    let sheet = load_frames_info_with(&config.asset_dir, &cli.name, config.scale, config.filter)?;
    print_sheet(&cli.name, &sheet);

    if let Some(path) = &cli.export {
        export_png(&sheet.image, path)?;
        println!("Scaled image written to {}", path.display());
    }
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<LoaderConfig, AssetError> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = LoaderConfig::with_path(path);
            config.load_from_file()?;
            config
        }
        None => {
            let mut config = LoaderConfig::new();
            // The default file is optional
            if let Err(e) = config.load_from_file() {
                debug!("Using default config: {}", e);
            }
            config
        }
    };

    if let Some(dir) = &cli.dir {
        config.asset_dir = dir.clone();
    }
    if let Some(scale) = cli.scale {
        config.scale = ScaleFactor::new(scale);
    }
    if let Some(filter) = cli.filter {
        config.filter = filter;
    }
    info!(
        "Loading '{}' from {} (scale={}, filter={})",
        cli.name,
        config.asset_dir.display(),
        config.scale.value(),
        config.filter.as_str()
    );
    Ok(config)
}

fn print_sheet(name: &str, sheet: &SpriteSheet) {
    println!(
        "{}: {}x{} px, {} keys, {} frames",
        name,
        sheet.image.width(),
        sheet.image.height(),
        sheet.frames.len(),
        sheet.frames.frame_count()
    );
    for key in sheet.frames.sorted_keys() {
        let rects = sheet.frames.get(key).unwrap_or_default();
        println!("  {} ({})", key, rects.len());
        for (i, r) in rects.iter().enumerate() {
            println!("    [{}] x={} y={} w={} h={}", i, r.x, r.y, r.w, r.h);
        }
    }
}
