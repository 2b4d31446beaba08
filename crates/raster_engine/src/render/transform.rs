//! Coordinate-space transforms: world → view → NDC → screen
//!
//! Each stage is a pure function over owned geometry. The order is fixed;
//! shading always happens with view-space positions and normals, because
//! lighting must stay metric and the projection is not angle-preserving.

use crate::foundation::math::{Mat3, Mat4, Mat4Ext, Vec3};
use crate::render::mesh::Mesh;
use crate::render::scene::Scene;

/// Determinant magnitude below which the normal-transform block is treated
/// as singular
pub const SINGULAR_DET_EPS: f64 = 1e-15;

/// Normal-correction matrix: inverse-transpose of the linear part of `m`
///
/// Required to keep normals perpendicular under non-uniform scaling. When the
/// linear block is numerically singular the identity is substituted and a
/// warning logged; degenerate scale is tolerated, not fatal.
#[must_use]
pub fn normal_matrix(m: &Mat4) -> Mat3 {
    let linear: Mat3 = m.fixed_view::<3, 3>(0, 0).into_owned();
    if linear.determinant().abs() < SINGULAR_DET_EPS {
        log::warn!("singular transform for normals, substituting identity");
        return Mat3::identity();
    }
    linear
        .try_inverse()
        .unwrap_or_else(Mat3::identity)
        .transpose()
}

/// Apply `m` to every vertex of `mesh`, and optionally to its normals
///
/// Vertices go through the full homogeneous transform with divide. Normals,
/// when requested, are multiplied by the inverse-transpose of the linear
/// block and renormalized; zero-length normals are left untouched. The
/// reserved dummy entries in slot 0 are skipped.
pub fn apply_to_mesh(mesh: &mut Mesh, m: &Mat4, transform_normals: bool) {
    for v in mesh.vertices.iter_mut().skip(1) {
        *v = m.mul_point(*v);
    }

    if transform_normals {
        let n_mat = normal_matrix(m);
        for n in mesh.normals.iter_mut().skip(1) {
            let transformed = n_mat * *n;
            *n = transformed.try_normalize(0.0).unwrap_or(transformed);
        }
    }
}

/// World → view: move every instance and light into camera space
///
/// Applies the camera's inverse extrinsic to all object vertices (with
/// normal correction) and to all light positions.
pub fn world_to_view(scene: &mut Scene) {
    let inverse_extrinsic = scene.camera.inverse_extrinsic;
    for instance in &mut scene.objects {
        apply_to_mesh(&mut instance.mesh, &inverse_extrinsic, true);
    }
    for light in &mut scene.lights {
        light.position = inverse_extrinsic.mul_point(light.position);
    }
}

/// View → NDC: project points with the homogeneous divide
///
/// Normals are deliberately *not* projected; the projection matrix does not
/// preserve angles, so normals stay in view space for shading.
pub fn view_to_ndc(projection: &Mat4, points: &mut [Vec3]) {
    for p in points {
        *p = projection.mul_point(*p);
    }
}

/// NDC → screen: map x and y from [-1, 1] to pixel coordinates
///
/// x lands in [0, width-1], y in [0, height-1]; z is left in NDC range for
/// the depth test. A zero-sized target leaves the points unchanged.
pub fn ndc_to_screen(points: &mut [Vec3], width: usize, height: usize) {
    if width == 0 || height == 0 {
        return;
    }
    let max_x = (width - 1) as f64;
    let max_y = (height - 1) as f64;
    for p in points {
        p.x = (p.x + 1.0) * 0.5 * max_x;
        p.y = (p.y + 1.0) * 0.5 * max_y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::camera::{Camera, CameraParams};
    use crate::render::lighting::Light;
    use crate::render::material::Material;
    use crate::render::mesh::ObjectInstance;
    use approx::assert_relative_eq;

    const EPSILON: f64 = 1e-9;

    fn camera_at_z5() -> Camera {
        Camera::from_params(&CameraParams {
            position: Vec3::new(0.0, 0.0, 5.0),
            axis: Vec3::new(0.0, 1.0, 0.0),
            angle: 0.0,
            near: 1.0,
            far: 10.0,
            left: -1.0,
            right: 1.0,
            top: 1.0,
            bottom: -1.0,
        })
        .unwrap()
    }

    fn single_point_mesh(p: Vec3) -> Mesh {
        let mut mesh = Mesh::new("test");
        mesh.vertices.push(p);
        mesh.normals.push(Vec3::new(0.0, 0.0, 1.0));
        mesh
    }

    #[test]
    fn world_to_view_round_trip_restores_vertices() {
        let camera = camera_at_z5();
        let original = Vec3::new(0.25, -0.75, 1.5);
        let mut mesh = single_point_mesh(original);

        apply_to_mesh(&mut mesh, &camera.inverse_extrinsic, true);
        let placement = camera.inverse_extrinsic.try_inverse().unwrap();
        apply_to_mesh(&mut mesh, &placement, true);

        assert_relative_eq!(mesh.vertices[1], original, epsilon = EPSILON);
    }

    #[test]
    fn lights_move_with_the_geometry() {
        let camera = camera_at_z5();
        let mut scene = Scene::new(
            camera,
            vec![],
            vec![Light::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(1.0, 1.0, 1.0), 0.0)],
        );
        world_to_view(&mut scene);
        assert_relative_eq!(scene.lights[0].position, Vec3::zeros(), epsilon = EPSILON);
    }

    #[test]
    fn dummy_slot_is_never_transformed() {
        let camera = camera_at_z5();
        let mut scene = Scene::new(
            camera,
            vec![ObjectInstance {
                mesh: single_point_mesh(Vec3::zeros()),
                name: "test_copy1".to_string(),
                material: Material::new(),
            }],
            vec![],
        );
        world_to_view(&mut scene);
        assert_relative_eq!(scene.objects[0].mesh.vertices[0], Vec3::zeros(), epsilon = EPSILON);
        assert_relative_eq!(scene.objects[0].mesh.vertices[1], Vec3::new(0.0, 0.0, -5.0), epsilon = EPSILON);
    }

    #[test]
    fn nonuniform_scale_corrects_normals() {
        // Squashing in y must tilt the normal of a slanted surface the other
        // way; the plain matrix would tilt it wrongly.
        let m = Mat4::scaling(1.0, 0.5, 1.0);
        let mut mesh = Mesh::new("slant");
        mesh.vertices.push(Vec3::zeros());
        mesh.normals.push(Vec3::new(1.0, 1.0, 0.0).normalize());
        apply_to_mesh(&mut mesh, &m, true);

        let expected = Vec3::new(1.0, 2.0, 0.0).normalize();
        assert_relative_eq!(mesh.normals[1], expected, epsilon = EPSILON);
    }

    #[test]
    fn singular_scale_falls_back_to_identity_for_normals() {
        let m = Mat4::scaling(1.0, 0.0, 1.0);
        let n = Vec3::new(0.0, 1.0, 0.0);
        let mut mesh = Mesh::new("flat");
        mesh.vertices.push(Vec3::new(1.0, 1.0, 1.0));
        mesh.normals.push(n);
        apply_to_mesh(&mut mesh, &m, true);

        // Vertices are still flattened; the normal passes through unchanged.
        assert_relative_eq!(mesh.vertices[1], Vec3::new(1.0, 0.0, 1.0), epsilon = EPSILON);
        assert_relative_eq!(mesh.normals[1], n, epsilon = EPSILON);
    }

    #[test]
    fn projection_does_not_touch_normals() {
        let camera = camera_at_z5();
        let mut mesh = single_point_mesh(Vec3::new(0.0, 0.0, -5.0));
        let normal_before = mesh.normals[1];
        view_to_ndc(&camera.projection, &mut mesh.vertices[1..]);
        assert_relative_eq!(mesh.normals[1], normal_before, epsilon = EPSILON);
    }

    #[test]
    fn ndc_corners_map_to_image_corners() {
        let mut points = [Vec3::new(-1.0, -1.0, 0.5), Vec3::new(1.0, 1.0, 0.5)];
        ndc_to_screen(&mut points, 640, 480);
        assert_relative_eq!(points[0].x, 0.0, epsilon = EPSILON);
        assert_relative_eq!(points[0].y, 0.0, epsilon = EPSILON);
        assert_relative_eq!(points[1].x, 639.0, epsilon = EPSILON);
        assert_relative_eq!(points[1].y, 479.0, epsilon = EPSILON);
        // Depth is untouched.
        assert_relative_eq!(points[0].z, 0.5, epsilon = EPSILON);
    }
}
