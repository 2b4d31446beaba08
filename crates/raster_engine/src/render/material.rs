//! Surface material parameters for local illumination

use crate::foundation::math::Vec3;

/// Blinn-Phong surface reflectances
///
/// Each reflectance is an RGB triple expected to lie in [0, 1]; the final
/// shaded color is clamped componentwise anyway, so mildly out-of-range
/// values degrade gracefully rather than wrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Ambient reflectance
    pub ambient: Vec3,
    /// Diffuse reflectance
    pub diffuse: Vec3,
    /// Specular reflectance
    pub specular: Vec3,
    /// Specular exponent; 0 flattens the specular term to uniform
    pub shininess: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Vec3::zeros(),
            diffuse: Vec3::zeros(),
            specular: Vec3::zeros(),
            shininess: 0.0,
        }
    }
}

impl Material {
    /// Create an all-zero material
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ambient reflectance
    #[must_use]
    pub fn with_ambient(mut self, r: f64, g: f64, b: f64) -> Self {
        self.ambient = Vec3::new(r, g, b);
        self
    }

    /// Set the diffuse reflectance
    #[must_use]
    pub fn with_diffuse(mut self, r: f64, g: f64, b: f64) -> Self {
        self.diffuse = Vec3::new(r, g, b);
        self
    }

    /// Set the specular reflectance
    #[must_use]
    pub fn with_specular(mut self, r: f64, g: f64, b: f64) -> Self {
        self.specular = Vec3::new(r, g, b);
        self
    }

    /// Set the specular exponent
    #[must_use]
    pub fn with_shininess(mut self, shininess: f64) -> Self {
        self.shininess = shininess;
        self
    }
}
