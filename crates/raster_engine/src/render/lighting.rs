//! Point lights and the Blinn-Phong local illumination model

use crate::foundation::math::Vec3;
use crate::render::material::Material;

/// Point light with quadratic distance attenuation
///
/// Light positions live in whatever coordinate space the scene is currently
/// in; the transform pipeline moves them alongside the geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// Position of the light
    pub position: Vec3,
    /// RGB color of the light
    pub color: Vec3,
    /// Quadratic attenuation coefficient; 0 means no falloff with distance
    pub attenuation: f64,
}

impl Light {
    /// Create a point light
    #[must_use]
    pub fn new(position: Vec3, color: Vec3, attenuation: f64) -> Self {
        Self {
            position,
            color,
            attenuation,
        }
    }
}

/// Evaluate Blinn-Phong illumination at a single point
///
/// `p` and `n` must be in view space (pre-projection); lighting in NDC or
/// screen space would not be metric. `eye` is the viewer position in the same
/// space, which for view space is the origin. The normal is normalized here,
/// so interpolated normals can be passed straight in.
///
/// Returns an RGB color clamped componentwise to [0, 1].
#[must_use]
pub fn shade_point(p: Vec3, n: Vec3, material: &Material, lights: &[Light], eye: Vec3) -> Vec3 {
    let mut diffuse_sum = Vec3::zeros();
    let mut specular_sum = Vec3::zeros();

    let n = n.try_normalize(0.0).unwrap_or(n);
    let eye_dir = (eye - p).try_normalize(0.0).unwrap_or_else(Vec3::zeros);

    for light in lights {
        let mut light_dir = light.position - p;
        let d = light_dir.norm();
        if d > 0.0 {
            light_dir /= d;
        }
        let atten = 1.0 / (1.0 + light.attenuation * d * d);

        diffuse_sum += atten * n.dot(&light_dir).max(0.0) * light.color;

        // Half-vector specular; powf gives 0^0 = 1, so shininess 0 degrades
        // to a uniform specular term instead of an error.
        let half = (eye_dir + light_dir)
            .try_normalize(0.0)
            .unwrap_or_else(Vec3::zeros);
        specular_sum +=
            atten * n.dot(&half).max(0.0).powf(material.shininess) * light.color;
    }

    let color = material.ambient
        + diffuse_sum.component_mul(&material.diffuse)
        + specular_sum.component_mul(&material.specular);
    color.map(|c| c.min(1.0))
}
