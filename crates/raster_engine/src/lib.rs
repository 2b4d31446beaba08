//! # Raster Engine
//!
//! A software (CPU-only) 3D rendering pipeline. Scene descriptions go in,
//! shaded raster images come out.
//!
//! ## Features
//!
//! - **Transform Chain**: world → view → NDC → screen coordinate spaces
//! - **Rasterization**: barycentric triangle scan-fill with a depth buffer
//! - **Shading**: flat, Gouraud, and Phong local illumination
//! - **Wireframe**: anti-aliased line drawing without supersampling
//! - **Scene Loading**: line-oriented scene grammar plus an OBJ-subset mesh format
//! - **PPM Output**: plain-text portable pixel-map image sink
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use raster_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scene = SceneLoader::load_scene("scene.txt")?;
//!     let config = RenderConfig::default();
//!     let frame = render(scene, ShadingMode::Phong, 800, 600, &config)?;
//!     let mut out = std::io::stdout().lock();
//!     frame.write_ppm(&mut out)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::many_single_char_names)]

pub mod assets;
pub mod config;
pub mod foundation;
pub mod render;

pub use config::{ConfigError, RenderConfig};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{obj_loader::ObjLoader, scene_loader::SceneLoader},
        config::RenderConfig,
        foundation::math::{Mat3, Mat4, Mat4Ext, Vec3},
        render::{
            pipeline::render, Camera, CameraParams, Framebuffer, Light, Material, Mesh,
            ObjectInstance, Scene, ShadingMode,
        },
    };
}
