//! CPU mirror of the blade vertex stage.

use glam::{Mat3, Mat4, Vec3};

use super::FragmentInput;
use crate::geometry::BladeVertex;

/// Matrix taking object-space normals of an instanced vertex to view space:
/// the inverse-transpose of the model-view matrix times the inverse-transpose
/// of the instance's linear part.
#[must_use]
pub fn normal_matrix(model_view: &Mat4, instance: &Mat4) -> Mat3 {
    inverse_transpose(Mat3::from_mat4(*model_view))
        * inverse_transpose(Mat3::from_mat4(*instance))
}

/// Inverse-transpose via cofactors, as the vertex shader computes it.
fn inverse_transpose(m: Mat3) -> Mat3 {
    let (a, b, c) = (m.x_axis, m.y_axis, m.z_axis);
    let det = a.dot(b.cross(c));
    Mat3::from_cols(b.cross(c), c.cross(a), a.cross(b)) * det.recip()
}

/// Run one blade vertex through the instanced vertex stage, producing the
/// values the rasterizer interpolates for the fragment stage.
#[must_use]
pub fn transform_vertex(
    view: &Mat4,
    model: &Mat4,
    instance: &Mat4,
    vertex: &BladeVertex,
) -> FragmentInput {
    let world = *model * *instance * Vec3::from(vertex.position).extend(1.0);
    let model_view = *view * *model;
    FragmentInput {
        world_position: world.truncate(),
        view_normal: normal_matrix(&model_view, instance)
            * Vec3::from(vertex.normal),
        view_position: (*view * world).truncate(),
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use glam::Quat;

    use super::*;
    use crate::geometry::BladeGeometry;
    use crate::placement::BladePose;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn cofactor_inverse_transpose_matches_glam() {
        let m = Mat3::from_quat(Quat::from_euler(glam::EulerRot::YXZ, 0.4, 1.1, -0.3))
            * Mat3::from_diagonal(Vec3::new(2.0, 0.5, 1.5));
        let expected = m.inverse().transpose();
        let got = inverse_transpose(m);
        for (g, e) in got.to_cols_array().iter().zip(expected.to_cols_array()) {
            assert!((g - e).abs() < 1e-5);
        }
    }

    #[test]
    fn upright_blade_faces_forward() {
        let blade = BladeGeometry::default();
        let pose = BladePose {
            translation: Vec3::new(3.0, 0.0, -2.0),
            pitch: FRAC_PI_2,
            yaw: 0.0,
            roll: 0.0,
        };
        let instance = pose.transform().to_matrix();
        let tip = transform_vertex(
            &Mat4::IDENTITY,
            &Mat4::IDENTITY,
            &instance,
            &blade.vertices()[0],
        );
        assert!(close(tip.world_position, Vec3::new(3.0, 1.0, -2.0)));
        assert!(close(tip.view_normal, Vec3::Z));
    }

    #[test]
    fn normals_stay_perpendicular_under_nonuniform_scale() {
        let blade = BladeGeometry::default();
        let instance = Mat4::from_scale_rotation_translation(
            Vec3::new(3.0, 1.0, 0.5),
            Quat::from_rotation_x(0.7) * Quat::from_rotation_z(0.2),
            Vec3::new(1.0, 0.0, 4.0),
        );
        let view = Mat4::look_at_rh(
            Vec3::new(0.0, 10.0, 30.0),
            Vec3::ZERO,
            Vec3::Y,
        );
        let out: Vec<FragmentInput> = blade
            .vertices()
            .iter()
            .map(|v| transform_vertex(&view, &Mat4::IDENTITY, &instance, v))
            .collect();
        let edge_a = out[1].view_position - out[0].view_position;
        let edge_b = out[2].view_position - out[0].view_position;
        let n = out[0].view_normal.normalize();
        assert!(n.dot(edge_a.normalize()).abs() < 1e-4);
        assert!(n.dot(edge_b.normalize()).abs() < 1e-4);
    }

    #[test]
    fn view_position_is_relative_to_camera() {
        let blade = BladeGeometry::default();
        let eye = Vec3::new(0.0, 10.0, 30.0);
        let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);
        let v = transform_vertex(
            &view,
            &Mat4::IDENTITY,
            &Mat4::IDENTITY,
            &blade.vertices()[1],
        );
        let distance = (Vec3::from(blade.vertices()[1].position) - eye).length();
        assert!((v.view_position.length() - distance).abs() < 1e-3);
        // The camera looks down -Z in view space.
        assert!(v.view_position.z < 0.0);
    }
}
