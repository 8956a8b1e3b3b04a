//! Standalone window backed by winit.
//!
//! ```no_run
//! # use meadow::viewer::Viewer;
//! Viewer::builder().build().run().unwrap();
//! ```

use std::sync::Arc;

use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    engine::MeadowEngine, error::MeadowError, frame::FrameDriver,
    options::Options,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Options,
    title: Option<String>,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: Options::default(),
            title: None,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Set the window title. Defaults to the display options' title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        let title = self
            .title
            .unwrap_or_else(|| self.options.display.title.clone());
        Viewer {
            options: self.options,
            title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays an orbiting grass field.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`MeadowError::Viewer`] if the event loop cannot be created
    /// or exits abnormally, and the engine's error if initialization fails.
    pub fn run(self) -> Result<(), MeadowError> {
        let event_loop =
            EventLoop::new().map_err(|e| MeadowError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            driver: FrameDriver::new(self.options.camera.orbit_speed),
            start: Instant::now(),
            options: Some(self.options),
            title: self.title,
            init_error: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| MeadowError::Viewer(e.to_string()))?;
        app.init_error.map_or(Ok(()), Err)
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler. Owns the engine and the frame
/// driver; neither is reachable from anywhere else.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<MeadowEngine>,
    driver: FrameDriver,
    start: Instant,
    options: Option<Options>,
    title: String,
    init_error: Option<MeadowError>,
}

/// Compute the wgpu surface size from the window's physical size.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ViewerApp {
    fn redraw(&mut self) {
        let timestamp_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        let (Some(window), Some(engine)) = (&self.window, &mut self.engine)
        else {
            return;
        };

        match self.driver.tick(timestamp_ms, |yaw| engine.render_at(yaw)) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                let (vp_w, vp_h) = viewport_size(window.inner_size());
                log::debug!("surface lost, reconfiguring at {vp_w}x{vp_h}");
                engine.resize(vp_w, vp_h);
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface timeout, skipping frame");
            }
            Err(e) => {
                log::error!("render error: {e:?}");
            }
        }
        window.request_redraw();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(options) = self.options.take() else {
            return;
        };

        let attrs = Window::default_attributes().with_title(&self.title);
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                self.init_error = Some(MeadowError::Viewer(e.to_string()));
                event_loop.exit();
                return;
            }
        };

        let (vp_w, vp_h) = viewport_size(window.inner_size());
        log::debug!(
            "window {vp_w}x{vp_h} at scale factor {}",
            window.scale_factor()
        );

        let engine = match pollster::block_on(MeadowEngine::new(
            window.clone(),
            (vp_w, vp_h),
            options,
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                self.init_error = Some(e);
                event_loop.exit();
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(event_size) => {
                let (vp_w, vp_h) = viewport_size(event_size);
                if let Some(engine) = &mut self.engine {
                    engine.resize(vp_w, vp_h);
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let inner = self.window.as_ref().map(|w| w.inner_size());
                if let (Some(engine), Some(inner)) = (&mut self.engine, inner) {
                    let (vp_w, vp_h) = viewport_size(inner);
                    engine.resize(vp_w, vp_h);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(),

            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_title_from_options() {
        let mut options = Options::default();
        options.display.title = "Dusk".to_owned();
        let viewer = Viewer::builder().with_options(options).build();
        assert_eq!(viewer.title, "Dusk");
    }

    #[test]
    fn explicit_title_wins() {
        let viewer = Viewer::builder().with_title("Field").build();
        assert_eq!(viewer.title, "Field");
        assert_eq!(viewer.options, Options::default());
    }
}
