//! Instanced blade pass: one shared triangle drawn once per transform.

use wgpu::util::DeviceExt;

use crate::error::MeadowError;
use crate::geometry::{BladeGeometry, BladeVertex};
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{ShaderComposer, GRASS_BLADE_SHADER};
use crate::placement::InstanceTransform;
use crate::renderer::pipeline_util;

/// Per-instance vertex data: the blade's column-major 4x4 transform.
/// Must match the WGSL `InstanceInput` locations 2..=5.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    /// Matrix columns.
    pub model: [[f32; 4]; 4],
}

impl InstanceRaw {
    const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
    ];

    /// Instance-step layout for buffer slot 1.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

impl From<&InstanceTransform> for InstanceRaw {
    fn from(transform: &InstanceTransform) -> Self {
        Self {
            model: transform.to_cols_array_2d(),
        }
    }
}

/// Bind groups the blade pass reads.
pub struct GrassBindings<'a> {
    /// Camera uniform (group 0).
    pub camera: &'a wgpu::BindGroup,
    /// Shading uniform (group 1).
    pub shading: &'a wgpu::BindGroup,
}

/// Owns the blade pipeline and the vertex, index, and instance buffers.
///
/// Instance data is uploaded once at construction and never rewritten.
pub struct GrassRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    index_count: u32,
    instance_count: u32,
}

impl GrassRenderer {
    /// Build the pipeline and upload the blade and its instances.
    ///
    /// `layouts` are the camera (group 0) and shading (group 1) bind group
    /// layouts.
    ///
    /// # Errors
    ///
    /// Returns [`MeadowError::Shader`] if the blade program fails to compose.
    pub fn new(
        context: &RenderContext,
        shader_composer: &mut ShaderComposer,
        layouts: [&wgpu::BindGroupLayout; 2],
        blade: &BladeGeometry,
        instances: &[InstanceTransform],
        sample_count: u32,
    ) -> Result<Self, MeadowError> {
        let shader = shader_composer.compose(
            &context.device,
            "Grass Blade Shader",
            GRASS_BLADE_SHADER,
            "grass_blade.wgsl",
        )?;
        let pipeline =
            create_pipeline(context, &shader, &layouts, sample_count);

        let vertex_buffer =
            context
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Blade Vertex Buffer"),
                    contents: bytemuck::cast_slice(blade.vertices()),
                    usage: wgpu::BufferUsages::VERTEX,
                });
        let index_buffer =
            context
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Blade Index Buffer"),
                    contents: bytemuck::cast_slice(blade.indices()),
                    usage: wgpu::BufferUsages::INDEX,
                });

        let raw: Vec<InstanceRaw> =
            instances.iter().map(InstanceRaw::from).collect();
        let instance_buffer =
            context
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Blade Instance Buffer"),
                    contents: bytemuck::cast_slice(&raw),
                    usage: wgpu::BufferUsages::VERTEX,
                });
        log::debug!(
            "uploaded {} blade instances ({} bytes)",
            raw.len(),
            raw.len() * size_of::<InstanceRaw>()
        );

        Ok(Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            instance_buffer,
            index_count: blade.index_count(),
            instance_count: raw.len() as u32,
        })
    }

    /// Number of blades drawn per frame.
    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }

    /// Record one instanced draw of every blade.
    pub fn draw(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        bindings: &GrassBindings<'_>,
    ) {
        if self.instance_count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, bindings.camera, &[]);
        render_pass.set_bind_group(1, bindings.shading, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        render_pass.set_index_buffer(
            self.index_buffer.slice(..),
            wgpu::IndexFormat::Uint16,
        );
        render_pass.draw_indexed(0..self.index_count, 0, 0..self.instance_count);
    }
}

/// Double-sided triangle-list pipeline; both faces reach the fragment stage.
fn create_pipeline(
    context: &RenderContext,
    shader: &wgpu::ShaderModule,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
    sample_count: u32,
) -> wgpu::RenderPipeline {
    let pipeline_layout = context.device.create_pipeline_layout(
        &wgpu::PipelineLayoutDescriptor {
            label: Some("Grass Blade Pipeline Layout"),
            bind_group_layouts,
            push_constant_ranges: &[],
        },
    );

    context
        .device
        .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Grass Blade Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[BladeVertex::layout(), InstanceRaw::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &pipeline_util::surface_fragment_targets(
                    context.format(),
                ),
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(pipeline_util::depth_stencil_state()),
            multisample: pipeline_util::multisample_state(sample_count),
            multiview: None,
            cache: None,
        })
}
