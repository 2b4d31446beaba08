//! Scene graph handed from the loader to the pipeline

use crate::render::camera::Camera;
use crate::render::lighting::Light;
use crate::render::mesh::ObjectInstance;

/// Everything a render call needs: camera matrices, placed objects, lights
///
/// The loader produces the scene with all instances already in world space;
/// the pipeline takes ownership and advances the geometry through the
/// remaining coordinate spaces. Nothing else holds a reference to it.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Derived camera matrices
    pub camera: Camera,
    /// Placed mesh instances, in scene-file order
    pub objects: Vec<ObjectInstance>,
    /// Point lights, in scene-file order
    pub lights: Vec<Light>,
}

impl Scene {
    /// Assemble a scene from its parts
    #[must_use]
    pub fn new(camera: Camera, objects: Vec<ObjectInstance>, lights: Vec<Light>) -> Self {
        Self {
            camera,
            objects,
            lights,
        }
    }
}
