use wgpu::util::DeviceExt;

use crate::camera::core::{Camera, CameraUniform};
use crate::gpu::render_context::RenderContext;
use crate::options::CameraOptions;

/// Orbit rig: a fixed camera pose relative to a pivot at the origin, plus
/// the pivot's current yaw and the GPU resources for the resulting uniform.
pub struct CameraController {
    rig: Camera,
    yaw: f32,

    /// Camera in world space after applying the pivot yaw.
    pub camera: Camera,
    /// CPU copy of the uniform last written to `buffer`.
    pub uniform: CameraUniform,
    /// Uniform buffer bound at group 0.
    pub buffer: wgpu::Buffer,
    /// Bind group layout for the camera uniform.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group for the camera uniform.
    pub bind_group: wgpu::BindGroup,
}

impl CameraController {
    /// Create the rig from camera options, sized to the context's surface.
    pub fn new(context: &RenderContext, options: &CameraOptions) -> Self {
        let aspect =
            context.config.width as f32 / context.config.height.max(1) as f32;
        let rig = Camera::from_options(options, aspect);

        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&rig);

        let buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX
                        | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );

        let bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: &layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                    label: Some("Camera Bind Group"),
                });

        Self {
            rig,
            yaw: 0.0,
            camera: rig,
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Current pivot yaw in radians.
    pub fn orbit_yaw(&self) -> f32 {
        self.yaw
    }

    /// Turn the pivot to `yaw` radians about world `+Y`.
    pub fn set_orbit_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
        self.camera = self.rig.orbited(yaw);
    }

    /// Update the projection aspect for a new viewport size. Zero-sized
    /// dimensions are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let aspect = width as f32 / height as f32;
        self.rig.aspect = aspect;
        self.camera.aspect = aspect;
    }

    /// Upload the current camera state.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue) {
        self.uniform.update_view_proj(&self.camera);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}
