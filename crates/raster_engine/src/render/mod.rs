//! # Software Rendering System
//!
//! The transform–rasterize–shade pipeline and the types that flow through it.
//!
//! ## Architecture
//!
//! - **Camera**: derives the world-to-view and projection matrices once per scene
//! - **Transform**: pure stage functions moving geometry world → view → NDC → screen
//! - **Raster**: barycentric triangle scan-fill and anti-aliased line drawing
//!   over a depth-buffered framebuffer
//! - **Lighting/Shading**: Blinn-Phong local illumination evaluated per face,
//!   per vertex, or per pixel depending on the selected [`ShadingMode`]
//!
//! The pipeline is single-threaded and synchronous; a render call owns its
//! framebuffer and runs to completion or fails before the first pixel.

pub mod camera;
pub mod framebuffer;
pub mod lighting;
pub mod material;
pub mod mesh;
pub mod pipeline;
pub mod raster;
pub mod scene;
pub mod transform;

pub use camera::{Camera, CameraError, CameraParams};
pub use framebuffer::Framebuffer;
pub use lighting::Light;
pub use material::Material;
pub use mesh::{Face, Mesh, ObjectInstance};
pub use pipeline::{RenderError, ShadingMode};
pub use scene::Scene;
