//! Frame orchestration for the transform–rasterize–shade pipeline
//!
//! A render call owns its framebuffer and the scene it consumes: the
//! transform chain advances the scene's geometry through the coordinate
//! spaces in place, so nothing here is shared with any other consumer. The
//! call either runs to completion or fails before the first pixel; there is
//! no partial output.

use crate::config::RenderConfig;
use crate::foundation::math::Vec3;
use crate::render::framebuffer::Framebuffer;
use crate::render::lighting::{self, Light};
use crate::render::material::Material;
use crate::render::raster;
use crate::render::scene::Scene;
use crate::render::transform;
use thiserror::Error;

/// Pixel-generation strategy, selected once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingMode {
    /// Per-vertex lighting, colors interpolated across each triangle
    Gouraud,
    /// Per-pixel lighting over interpolated positions and normals
    Phong,
    /// One lighting evaluation per triangle at its averaged corner
    Flat,
    /// Anti-aliased triangle edges only, no lighting, no backface culling
    Wireframe,
}

impl ShadingMode {
    /// Numeric mode selector used by the CLI
    ///
    /// 0 = Gouraud, 1 = Phong, 2 = flat, 3 = wireframe; anything else is
    /// `None`.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Gouraud),
            1 => Some(Self::Phong),
            2 => Some(Self::Flat),
            3 => Some(Self::Wireframe),
            _ => None,
        }
    }

    /// Rasterize one front-facing, already screen-space triangle
    ///
    /// Every strategy implements the same contract: given the triangle's
    /// screen corners, its view-space positions and normals, the material,
    /// and the view-space lights, produce depth-tested pixel writes.
    fn shade_triangle(
        self,
        fb: &mut Framebuffer,
        screen: &[Vec3; 3],
        view_pos: &[Vec3; 3],
        view_normals: &[Vec3; 3],
        material: &Material,
        lights: &[Light],
    ) {
        // The eye sits at the view-space origin.
        let eye = Vec3::zeros();
        match self {
            Self::Flat => {
                let p_avg = (view_pos[0] + view_pos[1] + view_pos[2]) / 3.0;
                let n_avg = (view_normals[0] + view_normals[1] + view_normals[2]) / 3.0;
                let color = to_rgb8(lighting::shade_point(p_avg, n_avg, material, lights, eye));
                raster::fill_triangle(fb, screen, |_| color);
            }
            Self::Gouraud => {
                let corner_colors = [0, 1, 2].map(|i| {
                    lighting::shade_point(view_pos[i], view_normals[i], material, lights, eye)
                });
                raster::fill_triangle(fb, screen, |w| {
                    to_rgb8(w.interpolate_vec(corner_colors[0], corner_colors[1], corner_colors[2]))
                });
            }
            Self::Phong => {
                raster::fill_triangle(fb, screen, |w| {
                    let p = w.interpolate_vec(view_pos[0], view_pos[1], view_pos[2]);
                    let n = w.interpolate_vec(view_normals[0], view_normals[1], view_normals[2]);
                    to_rgb8(lighting::shade_point(p, n, material, lights, eye))
                });
            }
            // Wireframe has its own whole-scene pass; no fill to do here.
            Self::Wireframe => {}
        }
    }
}

/// Fatal render-call errors; nothing is drawn when these occur
#[derive(Error, Debug)]
pub enum RenderError {
    /// The requested image has no pixels
    #[error("render target must be at least 1x1 pixels, got {width}x{height}")]
    EmptyTarget {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },
}

/// Render a scene into a fresh framebuffer
///
/// Consumes the scene; the transform chain mutates its geometry stage by
/// stage. Triangles are processed in mesh and face iteration order, and the
/// strict depth test means a later triangle only displaces an earlier one
/// with a strictly smaller depth.
///
/// # Errors
/// Returns [`RenderError::EmptyTarget`] for a zero-sized image.
pub fn render(
    mut scene: Scene,
    mode: ShadingMode,
    width: usize,
    height: usize,
    config: &RenderConfig,
) -> Result<Framebuffer, RenderError> {
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyTarget { width, height });
    }
    log::debug!(
        "rendering {} objects, {} lights at {}x{} ({:?})",
        scene.objects.len(),
        scene.lights.len(),
        width,
        height,
        mode
    );

    let mut fb = Framebuffer::new(width, height, config.background);
    transform::world_to_view(&mut scene);

    match mode {
        ShadingMode::Wireframe => draw_wireframe(&mut fb, &mut scene, config.wireframe_color),
        shaded => draw_shaded(&mut fb, &scene, shaded),
    }

    Ok(fb)
}

/// Shaded pass: backface-cull, project, and fill every triangle
fn draw_shaded(fb: &mut Framebuffer, scene: &Scene, mode: ShadingMode) {
    let projection = scene.camera.projection;
    for instance in &scene.objects {
        let mesh = &instance.mesh;
        for face in &mesh.faces {
            let view_pos = face.v.map(|i| mesh.vertices[i as usize]);
            let view_normals = face.vn.map(|i| mesh.normals[i as usize]);

            // Facing is decided in view space, before the projection can
            // distort winding.
            if raster::is_backface(&view_pos) {
                continue;
            }

            let mut screen = view_pos;
            transform::view_to_ndc(&projection, &mut screen);
            transform::ndc_to_screen(&mut screen, fb.width(), fb.height());

            mode.shade_triangle(
                fb,
                &screen,
                &view_pos,
                &view_normals,
                &instance.material,
                &scene.lights,
            );
        }
    }
}

/// Wireframe pass: project whole meshes, then stroke every triangle's edges
fn draw_wireframe(fb: &mut Framebuffer, scene: &mut Scene, stroke: [u8; 3]) {
    let projection = scene.camera.projection;
    for instance in &mut scene.objects {
        let mesh = &mut instance.mesh;
        transform::view_to_ndc(&projection, &mut mesh.vertices[1..]);
        transform::ndc_to_screen(&mut mesh.vertices[1..], fb.width(), fb.height());

        for face in &mesh.faces {
            let [a, b, c] = face.v.map(|i| {
                let p = mesh.vertices[i as usize];
                (p.x.round() as i64, p.y.round() as i64)
            });
            raster::draw_line(fb, a.0, a.1, b.0, b.1, stroke);
            raster::draw_line(fb, b.0, b.1, c.0, c.1, stroke);
            raster::draw_line(fb, c.0, c.1, a.0, a.1, stroke);
        }
    }
}

/// Quantize a [0, 1] color to 8-bit RGB
fn to_rgb8(color: Vec3) -> [u8; 3] {
    [
        (color.x * 255.0) as u8,
        (color.y * 255.0) as u8,
        (color.z * 255.0) as u8,
    ]
}
