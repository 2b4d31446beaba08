//! Camera matrix construction
//!
//! A scene's camera is described by a rigid placement (position plus an
//! axis-angle rotation) and six frustum scalars. From those this module
//! derives the two matrices the pipeline actually consumes: the inverse
//! extrinsic (world → view) and the perspective projection (view → clip).
//! Both are computed once per scene and reused for every instance and light.

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
use thiserror::Error;

/// Camera configuration errors; all are fatal before any pixel is written
#[derive(Error, Debug)]
pub enum CameraError {
    /// One of the frustum invariants is violated
    #[error("degenerate frustum: {0}")]
    DegenerateFrustum(&'static str),
    /// The camera placement matrix could not be inverted (NaN input)
    #[error("camera placement matrix is not invertible")]
    SingularPlacement,
}

/// Raw camera description as given in a scene file
#[derive(Debug, Clone, PartialEq)]
pub struct CameraParams {
    /// Camera position in world space
    pub position: Vec3,
    /// Rotation axis of the camera orientation
    pub axis: Vec3,
    /// Rotation angle about `axis`, in radians
    pub angle: f64,
    /// Near plane distance; must be nonzero
    pub near: f64,
    /// Far plane distance; must differ from `near`
    pub far: f64,
    /// Left frustum bound
    pub left: f64,
    /// Right frustum bound; must differ from `left`
    pub right: f64,
    /// Top frustum bound; must differ from `bottom`
    pub top: f64,
    /// Bottom frustum bound
    pub bottom: f64,
}

impl Default for CameraParams {
    /// Origin placement with a +Y axis and all frustum scalars zeroed
    ///
    /// The default is intentionally *invalid* as a frustum; it exists as the
    /// accumulator the scene loader fills in, and [`Camera::from_params`]
    /// rejects it if the scene never provided real values.
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            axis: Vec3::new(0.0, 1.0, 0.0),
            angle: 0.0,
            near: 0.0,
            far: 0.0,
            left: 0.0,
            right: 0.0,
            top: 0.0,
            bottom: 0.0,
        }
    }
}

impl CameraParams {
    fn validate(&self) -> Result<(), CameraError> {
        if self.near == 0.0 {
            return Err(CameraError::DegenerateFrustum("near plane must be nonzero"));
        }
        if self.far == self.near {
            return Err(CameraError::DegenerateFrustum("far plane equals near plane"));
        }
        if self.right == self.left {
            return Err(CameraError::DegenerateFrustum("right bound equals left bound"));
        }
        if self.top == self.bottom {
            return Err(CameraError::DegenerateFrustum("top bound equals bottom bound"));
        }
        Ok(())
    }
}

/// Derived camera matrices, computed once per scene
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// World-to-view transform, the inverse of the camera's rigid placement
    pub inverse_extrinsic: Mat4,
    /// Off-axis perspective projection
    pub projection: Mat4,
}

impl Camera {
    /// Derive the camera matrices from raw parameters
    ///
    /// # Errors
    /// Returns [`CameraError::DegenerateFrustum`] when the frustum invariants
    /// are violated; no partial camera is produced.
    pub fn from_params(params: &CameraParams) -> Result<Self, CameraError> {
        params.validate()?;

        let placement = Mat4::translation(params.position.x, params.position.y, params.position.z)
            * Mat4::rotation(params.axis, params.angle);
        let inverse_extrinsic = placement
            .try_inverse()
            .ok_or(CameraError::SingularPlacement)?;

        let projection = Mat4::frustum(
            params.near,
            params.far,
            params.left,
            params.right,
            params.top,
            params.bottom,
        );

        Ok(Self {
            inverse_extrinsic,
            projection,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f64 = 1e-12;

    fn test_params() -> CameraParams {
        CameraParams {
            position: Vec3::new(0.0, 0.0, 5.0),
            axis: Vec3::new(0.0, 1.0, 0.0),
            angle: 0.0,
            near: 1.0,
            far: 10.0,
            left: -0.5,
            right: 0.5,
            top: 0.5,
            bottom: -0.5,
        }
    }

    #[test]
    fn camera_sits_at_view_space_origin() {
        let camera = Camera::from_params(&test_params()).unwrap();
        let at_origin = camera.inverse_extrinsic.mul_point(Vec3::new(0.0, 0.0, 5.0));
        assert_relative_eq!(at_origin, Vec3::zeros(), epsilon = EPSILON);
    }

    #[test]
    fn world_to_view_round_trips_through_placement() {
        let mut params = test_params();
        params.axis = Vec3::new(0.3, 1.0, -0.2);
        params.angle = 0.8;
        let camera = Camera::from_params(&params).unwrap();

        let placement = camera.inverse_extrinsic.try_inverse().unwrap();
        let p = Vec3::new(1.5, -2.0, 3.25);
        let back = placement.mul_point(camera.inverse_extrinsic.mul_point(p));
        assert_relative_eq!(back, p, epsilon = 1e-9);
    }

    #[test]
    fn each_frustum_invariant_is_enforced() {
        let breakages: [fn(&mut CameraParams); 4] = [
            |p| p.near = 0.0,
            |p| p.far = p.near,
            |p| p.left = p.right,
            |p| p.bottom = p.top,
        ];
        for breakage in breakages {
            let mut params = test_params();
            breakage(&mut params);
            assert!(matches!(
                Camera::from_params(&params),
                Err(CameraError::DegenerateFrustum(_))
            ));
        }
    }

    #[test]
    fn default_params_are_rejected() {
        assert!(Camera::from_params(&CameraParams::default()).is_err());
    }

    #[test]
    fn zero_axis_placement_is_pure_translation() {
        let mut params = test_params();
        params.axis = Vec3::zeros();
        params.angle = 2.0;
        let camera = Camera::from_params(&params).unwrap();
        let p = camera.inverse_extrinsic.mul_point(Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(p, Vec3::new(1.0, 2.0, -2.0), epsilon = EPSILON);
    }
}
