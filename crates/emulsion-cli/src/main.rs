//! Command-line front end for the film-emulation pipeline.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use emulsion_core::Lut3D;
use emulsion_core::image::{FilmImage, PixelFormat};
use emulsion_core::params::LookSnapshot;
use emulsion_pipeline::{AuxiliaryTextures, Renderer, SurfacePool};

#[derive(Debug, Parser)]
#[command(name = "emulsion")]
#[command(about = "Film-emulation image pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render an image through a look preset.
    Render {
        input: PathBuf,
        #[arg(short = 'p', long = "preset")]
        preset: PathBuf,
        #[arg(short = 'o', long = "output")]
        output: PathBuf,
        /// 3D LUT in .cube format, required when the preset references one.
        #[arg(long = "lut")]
        lut: Option<PathBuf>,
    },
    /// Validate a look preset and print a summary.
    Check { preset: PathBuf },
    /// Write the identity preset as a starting point.
    Init {
        #[arg(short = 'o', long = "output")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Render {
            input,
            preset,
            output,
            lut,
        } => run_render(&input, &preset, &output, lut.as_deref()),
        Commands::Check { preset } => run_check(&preset),
        Commands::Init { output } => run_init(&output),
    }
}

fn load_preset(path: &Path) -> Result<LookSnapshot> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading preset {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing preset {}", path.display()))
}

fn run_render(
    input_path: &Path,
    preset_path: &Path,
    output_path: &Path,
    lut_path: Option<&Path>,
) -> Result<()> {
    let snapshot = load_preset(preset_path)?;

    let decoded = image::open(input_path)
        .with_context(|| format!("reading image {}", input_path.display()))?;
    let rgba = decoded.to_rgba32f();
    let input = FilmImage {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba
            .pixels()
            .map(|p| [p.0[0], p.0[1], p.0[2], p.0[3]])
            .collect(),
        source_format: PixelFormat::Rgba32F,
    };

    let mut aux = AuxiliaryTextures::default();
    if let Some(path) = lut_path {
        let lut =
            Lut3D::load_cube(path).with_context(|| format!("loading LUT {}", path.display()))?;
        tracing::info!(size = lut.size, "LUT loaded");
        aux.lut = Some(Arc::new(lut));
    }

    let renderer = Renderer::new(Arc::new(SurfacePool::default()));
    let rendered = renderer.render(&input, &snapshot, &aux)?;

    let mut out = image::Rgba32FImage::new(rendered.width, rendered.height);
    for (px, src) in out.pixels_mut().zip(rendered.pixels.iter()) {
        px.0 = [
            src[0].clamp(0.0, 1.0),
            src[1].clamp(0.0, 1.0),
            src[2].clamp(0.0, 1.0),
            src[3].clamp(0.0, 1.0),
        ];
    }
    image::DynamicImage::ImageRgba32F(out)
        .to_rgba8()
        .save(output_path)
        .with_context(|| format!("writing {}", output_path.display()))?;

    println!("Wrote {}", output_path.display());
    Ok(())
}

fn run_check(preset_path: &Path) -> Result<()> {
    let snapshot = load_preset(preset_path)?;

    let active: Vec<&str> = [
        ("lens", snapshot.lens.is_active()),
        ("grading", snapshot.grading.is_active()),
        ("tone mapping", snapshot.tone_mapping.is_active()),
        ("bloom", snapshot.bloom.is_active()),
        ("halation", snapshot.halation.is_active()),
        ("ccd bloom", snapshot.ccd_bloom.is_active()),
        ("grain", snapshot.grain.is_active()),
        ("vignette", snapshot.vignette.is_active()),
        ("bw", snapshot.bw.is_active()),
        ("flash", snapshot.flash.is_active()),
        ("light leak", snapshot.light_leak.is_active()),
        ("instant frame", snapshot.instant_frame.is_active()),
        ("date stamp", snapshot.date_stamp.is_active()),
    ]
    .into_iter()
    .filter_map(|(name, active)| active.then_some(name))
    .collect();

    println!(
        "OK: {} (version {}, {} active effects)",
        preset_path.display(),
        snapshot.version,
        active.len()
    );
    if !active.is_empty() {
        println!("Active: {}", active.join(", "));
    }
    if snapshot.grading.uses_lut() {
        println!("Preset references a 3D LUT; pass --lut when rendering.");
    }
    Ok(())
}

fn run_init(output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&LookSnapshot::identity())?;
    std::fs::write(output_path, json)
        .with_context(|| format!("writing {}", output_path.display()))?;
    println!("Wrote {}", output_path.display());
    Ok(())
}
