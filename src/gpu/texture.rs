//! Depth and multisample render targets sized to the surface.

use crate::renderer::pipeline_util;

/// A render-target texture and its default view.
pub struct RenderTarget {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl RenderTarget {
    /// Create an attachment-only texture with the given dimensions, format,
    /// and sample count.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        (width, height): (u32, u32),
        format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

/// Attachments the blade pass renders into besides the swapchain texture.
pub struct FrameTargets {
    /// Depth buffer, multisampled when MSAA is on.
    pub depth: RenderTarget,
    /// Multisampled color buffer resolved into the swapchain texture.
    /// `None` when rendering single-sampled.
    pub msaa: Option<RenderTarget>,
    sample_count: u32,
}

impl FrameTargets {
    /// Allocate targets for a surface of `size` with `color_format`.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        size: (u32, u32),
        color_format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> Self {
        let depth = RenderTarget::new(
            device,
            "Depth Target",
            size,
            pipeline_util::DEPTH_FORMAT,
            sample_count,
        );
        let msaa = (sample_count > 1).then(|| {
            RenderTarget::new(
                device,
                "MSAA Color Target",
                size,
                color_format,
                sample_count,
            )
        });
        log::debug!(
            "allocated frame targets {}x{} ({} samples)",
            size.0,
            size.1,
            sample_count
        );
        Self {
            depth,
            msaa,
            sample_count,
        }
    }

    /// Samples per pixel.
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Color attachment for the pass: the multisampled buffer resolving into
    /// `surface_view`, or `surface_view` directly.
    pub fn color_attachment<'a>(
        &'a self,
        surface_view: &'a wgpu::TextureView,
        clear: wgpu::Color,
    ) -> wgpu::RenderPassColorAttachment<'a> {
        let (view, resolve_target) = match &self.msaa {
            Some(msaa) => (&msaa.view, Some(surface_view)),
            None => (surface_view, None),
        };
        wgpu::RenderPassColorAttachment {
            view,
            depth_slice: None,
            resolve_target,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        }
    }

    /// Depth attachment cleared to the far plane.
    pub fn depth_attachment(&self) -> wgpu::RenderPassDepthStencilAttachment<'_> {
        wgpu::RenderPassDepthStencilAttachment {
            view: &self.depth.view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Discard,
            }),
            stencil_ops: None,
        }
    }
}
