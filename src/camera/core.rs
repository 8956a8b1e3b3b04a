use glam::{Mat3, Mat4, Quat, Vec3};

use crate::options::CameraOptions;

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Camera posed from options with the given viewport aspect.
    #[must_use]
    pub fn from_options(options: &CameraOptions, aspect: f32) -> Self {
        Self {
            eye: Vec3::from(options.eye),
            target: Vec3::from(options.target),
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// World-to-view transform.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Projection matrix.
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.view_matrix()
    }

    /// This camera carried by a pivot at the origin turned `yaw` radians
    /// about world `+Y`.
    #[must_use]
    pub fn orbited(&self, yaw: f32) -> Self {
        let pivot = Quat::from_rotation_y(yaw);
        Self {
            eye: pivot * self.eye,
            target: pivot * self.target,
            up: pivot * self.up,
            ..*self
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the camera matrices.
///
/// WGSL layout:
///   view_proj: mat4x4<f32>      (offset 0)
///   view: mat4x4<f32>           (offset 64)
///   normal_matrix: mat3x3<f32>  (offset 128, columns padded to vec4)
///   position: vec3<f32>         (offset 176)
///   aspect: f32                 (offset 188)
///   Total: 192 bytes
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// World-to-view matrix. The field root sits at the world origin, so
    /// this is also the model-view matrix.
    pub view: [[f32; 4]; 4],
    /// Inverse-transpose of the model-view matrix's linear part.
    pub normal_matrix: [[f32; 4]; 3],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity matrices.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            view: Mat4::IDENTITY.to_cols_array_2d(),
            normal_matrix: pad_mat3(Mat3::IDENTITY),
            position: [0.0; 3],
            aspect: 1.0,
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        let view = camera.view_matrix();
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.view = view.to_cols_array_2d();
        self.normal_matrix =
            pad_mat3(Mat3::from_mat4(view).inverse().transpose());
        self.position = camera.eye.to_array();
        self.aspect = camera.aspect;
    }
}

fn pad_mat3(m: Mat3) -> [[f32; 4]; 3] {
    [
        m.x_axis.extend(0.0).to_array(),
        m.y_axis.extend(0.0).to_array(),
        m.z_axis.extend(0.0).to_array(),
    ]
}
