//! Top-level rendering engine.
//!
//! [`MeadowEngine`] owns the GPU context and every per-frame resource. It
//! builds the field once, then renders it for whatever camera yaw the
//! caller supplies; the frame loop that produces that yaw lives outside.

mod field;

pub use field::GrassField;

use crate::camera::controller::CameraController;
use crate::error::{ConfigError, MeadowError};
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::gpu::shading::Shading;
use crate::gpu::texture::FrameTargets;
use crate::options::{Options, ShadingOptions};
use crate::renderer::grass::{GrassBindings, GrassRenderer};
use crate::shading::ShadingParameters;

/// Renders an instanced grass field to a window surface.
pub struct MeadowEngine {
    context: RenderContext,
    camera_controller: CameraController,
    shading: Shading,
    grass: GrassRenderer,
    targets: FrameTargets,
    clear_color: wgpu::Color,
    options: Options,
}

impl MeadowEngine {
    /// Initialize the GPU, generate the field from `options`, and upload it.
    ///
    /// `size` is the surface size in physical pixels, so the window's pixel
    /// density is already folded in.
    ///
    /// # Errors
    ///
    /// Returns [`MeadowError::Config`] for invalid options (checked before
    /// touching the GPU), [`MeadowError::Gpu`] if device setup fails, and
    /// [`MeadowError::Shader`] if the blade program fails to compose.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, MeadowError> {
        let field = GrassField::from_options(&options)?;
        match field.seed() {
            Some(seed) => log::info!("field seed {seed}"),
            None => log::info!("field seeded from OS entropy"),
        }

        let context = RenderContext::new(window, size).await?;
        let mut shader_composer = ShaderComposer::new()?;

        let camera_controller = CameraController::new(&context, &options.camera);
        let shading = Shading::new(
            &context,
            field.shading(),
        );

        let sample_count = options.display.sample_count();
        let grass = GrassRenderer::new(
            &context,
            &mut shader_composer,
            [&camera_controller.layout, &shading.layout],
            field.blade(),
            field.instances(),
            sample_count,
        )?;
        let targets = FrameTargets::new(
            &context.device,
            (context.width(), context.height()),
            context.format(),
            sample_count,
        );

        let [r, g, b] = options.display.clear_color;
        let clear_color = wgpu::Color {
            r: f64::from(r),
            g: f64::from(g),
            b: f64::from(b),
            a: 1.0,
        };

        log::info!(
            "engine ready: {} blades, {}x{}, {}x MSAA",
            grass.instance_count(),
            context.width(),
            context.height(),
            sample_count
        );

        Ok(Self {
            context,
            camera_controller,
            shading,
            grass,
            targets,
            clear_color,
            options,
        })
    }

    /// Options the engine was built from.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Number of blades drawn per frame.
    pub fn instance_count(&self) -> u32 {
        self.grass.instance_count()
    }

    /// Current camera pivot yaw in radians.
    pub fn camera_yaw(&self) -> f32 {
        self.camera_controller.orbit_yaw()
    }

    /// Replace the material and light parameters. Instance data is
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Shading`] and keeps the current parameters if
    /// `shading` is out of range.
    pub fn set_shading(
        &mut self,
        shading: ShadingOptions,
    ) -> Result<(), ConfigError> {
        let params = ShadingParameters::from_options(&shading)?;
        self.shading.update(&self.context.queue, &params);
        self.options.shading = shading;
        Ok(())
    }

    /// Render one frame with the camera pivot at `yaw` radians and present
    /// it.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain texture cannot be
    /// acquired.
    pub fn render_at(&mut self, yaw: f32) -> Result<(), wgpu::SurfaceError> {
        self.camera_controller.set_orbit_yaw(yaw);
        self.camera_controller.update_gpu(&self.context.queue);

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.context.create_encoder();
        {
            let mut render_pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Grass Pass"),
                    color_attachments: &[Some(
                        self.targets.color_attachment(&view, self.clear_color),
                    )],
                    depth_stencil_attachment: Some(
                        self.targets.depth_attachment(),
                    ),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });
            self.grass.draw(
                &mut render_pass,
                &GrassBindings {
                    camera: &self.camera_controller.bind_group,
                    shading: &self.shading.bind_group,
                },
            );
        }
        self.context.submit(encoder);
        frame.present();
        Ok(())
    }

    /// Resize the surface, render targets, and camera projection. Ignores
    /// zero-sized dimensions.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.context.resize(width, height);
            self.camera_controller.resize(width, height);
            self.targets = FrameTargets::new(
                &self.context.device,
                (width, height),
                self.context.format(),
                self.targets.sample_count(),
            );
        }
    }
}
