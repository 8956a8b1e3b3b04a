use wgpu::util::DeviceExt;

use crate::gpu::render_context::RenderContext;
use crate::shading::ShadingParameters;

/// Shading parameters as uploaded to the fragment program.
/// NOTE: Must match WGSL struct layout exactly (96 bytes)
///
/// WGSL layout (auto-padded):
///   albedo: vec3<f32>           (offset 0,  align 16)
///   glossiness: f32             (offset 12)
///   subsurface: vec3<f32>       (offset 16, align 16)
///   metalness: f32              (offset 28)
///   specular_color: vec3<f32>   (offset 32, align 16)
///   hemisphere_weight: f32      (offset 44)
///   light_color: vec3<f32>      (offset 48, align 16)
///   shadow_band: f32            (offset 60)
///   light_direction: vec3<f32>  (offset 64, align 16)
///   inv_gamma: f32              (offset 76)
///   ambient_color: vec3<f32>    (offset 80, align 16)
///   _pad: f32                   (offset 92)
///   Total: 96 bytes
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShadingUniform {
    /// Front-face diffuse reflectance.
    pub albedo: [f32; 3],
    /// Specular exponent.
    pub glossiness: f32,
    /// Transmission tint.
    pub subsurface: [f32; 3],
    /// Fresnel blend at normal incidence.
    pub metalness: f32,
    /// Specular reflectance.
    pub specular_color: [f32; 3],
    /// Weight of the hemisphere ambient term.
    pub hemisphere_weight: f32,
    /// Directional light radiance.
    pub light_color: [f32; 3],
    /// Half-width of the back-lit pseudo-shadow band.
    pub shadow_band: f32,
    /// Unit world-space direction toward the light.
    pub light_direction: [f32; 3],
    /// Reciprocal of the output gamma.
    pub inv_gamma: f32,
    /// Ambient sky radiance.
    pub ambient_color: [f32; 3],
    /// Padding for GPU alignment.
    pub _pad: f32,
}

impl From<&ShadingParameters> for ShadingUniform {
    fn from(params: &ShadingParameters) -> Self {
        Self {
            albedo: params.albedo.to_array(),
            glossiness: params.glossiness,
            subsurface: params.subsurface.to_array(),
            metalness: params.metalness,
            specular_color: params.specular_color.to_array(),
            hemisphere_weight: params.hemisphere_weight,
            light_color: params.light_color.to_array(),
            shadow_band: params.shadow_band,
            light_direction: params.light_direction.to_array(),
            inv_gamma: params.gamma.recip(),
            ambient_color: params.ambient_color.to_array(),
            _pad: 0.0,
        }
    }
}

/// Shading uniform with its buffer and bind group. Written once at startup
/// and whenever the parameters change.
pub struct Shading {
    /// CPU copy of the uploaded uniform.
    pub uniform: ShadingUniform,
    /// Uniform buffer bound at group 1.
    pub buffer: wgpu::Buffer,
    /// Bind group layout for the shading uniform.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group for the shading uniform.
    pub bind_group: wgpu::BindGroup,
}

impl Shading {
    /// Upload `params` and build the bind group.
    pub fn new(context: &RenderContext, params: &ShadingParameters) -> Self {
        let uniform = ShadingUniform::from(params);

        let buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Shading Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Shading Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
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
                    label: Some("Shading Bind Group"),
                    layout: &layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                });

        Self {
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Replace the parameters and upload them.
    pub fn update(&mut self, queue: &wgpu::Queue, params: &ShadingParameters) {
        self.uniform = ShadingUniform::from(params);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_is_96_bytes() {
        assert_eq!(size_of::<ShadingUniform>(), 96);
    }

    #[test]
    fn uniform_carries_reciprocal_gamma() {
        let uniform = ShadingUniform::from(&ShadingParameters::default());
        assert!((uniform.inv_gamma - 1.0 / 2.2).abs() < 1e-7);
        assert_eq!(uniform.glossiness, 30.0);
        assert_eq!(uniform._pad, 0.0);
    }

    #[test]
    fn field_offsets_match_wgsl() {
        let uniform = ShadingUniform::from(&ShadingParameters::default());
        let bytes: &[u8] = bytemuck::bytes_of(&uniform);
        let at = |offset: usize| {
            f32::from_le_bytes([
                bytes[offset],
                bytes[offset + 1],
                bytes[offset + 2],
                bytes[offset + 3],
            ])
        };
        assert_eq!(at(12), uniform.glossiness);
        assert_eq!(at(28), uniform.metalness);
        assert_eq!(at(60), uniform.shadow_band);
        assert_eq!(at(64), uniform.light_direction[0]);
        assert_eq!(at(76), uniform.inv_gamma);
        assert_eq!(at(80), uniform.ambient_color[0]);
    }
}
