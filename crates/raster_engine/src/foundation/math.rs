//! Math utilities and types
//!
//! Provides the fundamental math types for the software rendering pipeline.
//! The pipeline works in `f64` throughout; depth interpolation and the
//! singular-matrix guard in the normal transform are precision sensitive.

pub use nalgebra::{Matrix3, Matrix4, Unit, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f64>;

/// 4D vector type, used for homogeneous coordinates
pub type Vec4 = Vector4<f64>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f64>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f64>;

/// Extension trait for [`Mat4`] with the transform constructors the pipeline needs
pub trait Mat4Ext {
    /// Create a translation matrix
    fn translation(tx: f64, ty: f64, tz: f64) -> Mat4;

    /// Create a (possibly non-uniform) scaling matrix
    fn scaling(sx: f64, sy: f64, sz: f64) -> Mat4;

    /// Create a rotation matrix from an axis and an angle in radians
    ///
    /// A zero-length axis yields the identity rotation; degenerate input is
    /// tolerated, not an error.
    fn rotation(axis: Vec3, angle: f64) -> Mat4;

    /// Create an off-axis perspective projection matrix
    ///
    /// Maps the view-space frustum given by `(near, far, left, right, top,
    /// bottom)` to a clip space where, after the homogeneous divide, visible
    /// x, y, z all lie in [-1, 1]. The caller is responsible for rejecting
    /// degenerate frustum parameters first.
    fn frustum(near: f64, far: f64, left: f64, right: f64, top: f64, bottom: f64) -> Mat4;

    /// Transform a 3D point through this matrix with the homogeneous divide
    fn mul_point(&self, p: Vec3) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn translation(tx: f64, ty: f64, tz: f64) -> Mat4 {
        Mat4::new_translation(&Vec3::new(tx, ty, tz))
    }

    fn scaling(sx: f64, sy: f64, sz: f64) -> Mat4 {
        Mat4::new_nonuniform_scaling(&Vec3::new(sx, sy, sz))
    }

    fn rotation(axis: Vec3, angle: f64) -> Mat4 {
        if axis.norm_squared() == 0.0 {
            log::warn!("zero-length rotation axis, substituting identity rotation");
            return Mat4::identity();
        }
        Mat4::from_axis_angle(&Unit::new_normalize(axis), angle)
    }

    fn frustum(near: f64, far: f64, left: f64, right: f64, top: f64, bottom: f64) -> Mat4 {
        let (n, f, l, r, t, b) = (near, far, left, right, top, bottom);
        #[rustfmt::skip]
        let p = Mat4::new(
            (2.0 * n) / (r - l), 0.0,                 (r + l) / (r - l),  0.0,
            0.0,                 (2.0 * n) / (t - b), (t + b) / (t - b),  0.0,
            0.0,                 0.0,                 -(f + n) / (f - n), -(2.0 * f * n) / (f - n),
            0.0,                 0.0,                 -1.0,               0.0,
        );
        p
    }

    fn mul_point(&self, p: Vec3) -> Vec3 {
        let q = self * Vec4::new(p.x, p.y, p.z, 1.0);
        q.xyz() / q.w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn translation_moves_points() {
        let m = Mat4::translation(1.0, -2.0, 3.0);
        let p = m.mul_point(Vec3::new(0.5, 0.5, 0.5));
        assert_relative_eq!(p, Vec3::new(1.5, -1.5, 3.5), epsilon = EPSILON);
    }

    #[test]
    fn rotation_quarter_turn_about_z() {
        let m = Mat4::rotation(Vec3::new(0.0, 0.0, 1.0), FRAC_PI_2);
        let p = m.mul_point(Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Vec3::new(0.0, 1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn rotation_axis_need_not_be_unit_length() {
        let a = Mat4::rotation(Vec3::new(0.0, 0.0, 10.0), FRAC_PI_2);
        let b = Mat4::rotation(Vec3::new(0.0, 0.0, 1.0), FRAC_PI_2);
        assert_relative_eq!(a, b, epsilon = EPSILON);
    }

    #[test]
    fn zero_axis_rotation_is_identity() {
        let m = Mat4::rotation(Vec3::zeros(), 1.234);
        assert_relative_eq!(m, Mat4::identity(), epsilon = EPSILON);
    }

    #[test]
    fn frustum_maps_near_corners_to_unit_cube() {
        let m = Mat4::frustum(1.0, 10.0, -0.5, 0.5, 0.5, -0.5);
        // Near-plane corner (right, top) sits at z = -near in view space.
        let p = m.mul_point(Vec3::new(0.5, 0.5, -1.0));
        assert_relative_eq!(p, Vec3::new(1.0, 1.0, -1.0), epsilon = EPSILON);
        // Far-plane center maps to z = +1.
        let q = m.mul_point(Vec3::new(0.0, 0.0, -10.0));
        assert_relative_eq!(q.z, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn mul_point_performs_homogeneous_divide() {
        // Bottom row (0,0,-1,0) makes w = -z; a point at z = -2 is halved.
        let m = Mat4::frustum(1.0, 10.0, -1.0, 1.0, 1.0, -1.0);
        let p = m.mul_point(Vec3::new(2.0, 0.0, -2.0));
        assert_relative_eq!(p.x, 1.0, epsilon = EPSILON);
    }
}
