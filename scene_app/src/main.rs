//! Scene renderer CLI
//!
//! Renders a scene description file to a plain-text PPM image on stdout:
//!
//! ```text
//! scene_app <scene_file> <xres> <yres> <mode>
//! ```
//!
//! Mode selects the shading strategy: 0 = Gouraud, 1 = Phong, 2 = flat,
//! 3 = wireframe. Any argument or load failure prints to stderr and exits
//! with status 1. Set `RASTER_CONFIG` to point at an optional TOML file with
//! background and wireframe colors.

use raster_engine::assets::scene_loader::{SceneError, SceneLoader};
use raster_engine::render::pipeline::{self, RenderError, ShadingMode};
use raster_engine::{ConfigError, RenderConfig};
use std::env;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;
use thiserror::Error;

#[derive(Error, Debug)]
enum AppError {
    #[error("{0}")]
    BadArgument(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("could not write image: {0}")]
    Output(#[from] io::Error),
}

fn main() -> ExitCode {
    raster_engine::foundation::logging::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 5 {
        let program = args.first().map_or("scene_app", String::as_str);
        eprintln!("Usage: {program} <scene_file> <xres> <yres> <mode>");
        eprintln!("Modes: 0 = Gouraud, 1 = Phong, 2 = flat, 3 = wireframe");
        return ExitCode::FAILURE;
    }

    match run(&args[1], &args[2], &args[3], &args[4]) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(scene_path: &str, xres: &str, yres: &str, mode: &str) -> Result<(), AppError> {
    let width = parse_resolution(xres, "xres")?;
    let height = parse_resolution(yres, "yres")?;
    let mode = mode
        .parse::<usize>()
        .ok()
        .and_then(ShadingMode::from_index)
        .ok_or_else(|| {
            AppError::BadArgument(format!(
                "invalid mode '{mode}': must be 0 (Gouraud), 1 (Phong), 2 (flat), or 3 (wireframe)"
            ))
        })?;

    let config = match env::var("RASTER_CONFIG") {
        Ok(path) => RenderConfig::from_toml_file(path)?,
        Err(_) => RenderConfig::default(),
    };

    log::info!("loading scene {scene_path}");
    let scene = SceneLoader::load_scene(scene_path)?;
    log::info!(
        "rendering {} objects with {} lights at {width}x{height} ({mode:?})",
        scene.objects.len(),
        scene.lights.len()
    );
    let frame = pipeline::render(scene, mode, width, height, &config)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    frame.write_ppm(&mut out)?;
    out.flush()?;
    Ok(())
}

fn parse_resolution(value: &str, what: &str) -> Result<usize, AppError> {
    value
        .parse()
        .map_err(|_| AppError::BadArgument(format!("invalid {what} '{value}'")))
}
