//! Window lifecycle and the render loop.
//!
//! This module is the only place that touches platform scheduling: winit's
//! event loop drives both the 1 Hz ticker (via `ControlFlow::WaitUntil` on
//! the controller's deadline) and the sweep animation (via continuous redraw
//! requests while visible). All state decisions live in `face-core`.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context as _, Result};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::Pixel;
use softbuffer::{Context, Surface};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use face_core::controller::FaceController;
use face_core::time::TimeSource;
use face_render::{DirAssets, FaceRenderer, FaceStyle};

use crate::config::EmulatorConfig;
use crate::wallclock::WallClock;

/// Open the window and run the face until it is closed.
pub fn run(config: EmulatorConfig) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = FaceApp::new(config);
    event_loop
        .run_app(&mut app)
        .context("event loop terminated with error")?;
    match app.failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// `DrawTarget` over one softbuffer frame, packing pixels as `0xFFRRGGBB`.
struct SurfaceCanvas<'a> {
    pixels: &'a mut [u32],
    width: u32,
    height: u32,
}

impl DrawTarget for SurfaceCanvas<'_> {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0
                && point.y >= 0
                && (point.x as u32) < self.width
                && (point.y as u32) < self.height
            {
                let idx = (point.y as u32 * self.width + point.x as u32) as usize;
                if let Some(slot) = self.pixels.get_mut(idx) {
                    *slot = 0xFF00_0000
                        | (u32::from(color.r()) << 16)
                        | (u32::from(color.g()) << 8)
                        | u32::from(color.b());
                }
            }
        }
        Ok(())
    }
}

impl OriginDimensions for SurfaceCanvas<'_> {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

struct WindowState {
    window: Arc<Window>,
    surface: Surface<Arc<Window>, Arc<Window>>,
    size: PhysicalSize<u32>,
}

struct FaceApp {
    config: EmulatorConfig,
    clock: WallClock,
    controller: FaceController,
    renderer: FaceRenderer<DirAssets>,
    state: Option<WindowState>,
    failure: Option<anyhow::Error>,
}

impl FaceApp {
    fn new(config: EmulatorConfig) -> Self {
        let assets = DirAssets::new(config.assets_dir.clone());
        let renderer = FaceRenderer::new(assets, FaceStyle::default());
        Self {
            config,
            clock: WallClock,
            controller: FaceController::new(),
            renderer,
            state: None,
            failure: None,
        }
    }

    /// Record a fatal error and stop the loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        tracing::error!("{err:#}");
        self.failure = Some(err);
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let side = f64::from(self.config.window_size.max(1));
        let attrs = WindowAttributes::default()
            .with_title("Watch Face")
            .with_inner_size(LogicalSize::new(side, side));

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );
        let context =
            Context::new(window.clone()).map_err(|e| anyhow::anyhow!("softbuffer context: {e}"))?;
        let surface = Surface::new(&context, window.clone())
            .map_err(|e| anyhow::anyhow!("softbuffer surface: {e}"))?;

        let size = window.inner_size();
        self.state = Some(WindowState {
            window,
            surface,
            size,
        });
        Ok(())
    }

    fn density(&self, window: &Window) -> f32 {
        self.config
            .density_override
            .unwrap_or(window.scale_factor() as f32)
    }

    /// Resize the surface and rebuild the scaled bitmap set.
    fn handle_resize(&mut self, size: PhysicalSize<u32>) -> Result<()> {
        if let Some(state) = &mut self.state {
            state.size = size;
            if let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
            {
                state
                    .surface
                    .resize(w, h)
                    .map_err(|e| anyhow::anyhow!("surface resize: {e}"))?;
            }
        }
        self.renderer
            .on_resize(size.width, size.height)
            .context("failed to rebuild face bitmaps")?;
        Ok(())
    }

    /// Compose the current frame into the window surface and present it.
    fn redraw(&mut self) -> Result<()> {
        let now = self.clock.now_millis();
        if self.controller.service(now) {
            self.update_title();
        }

        let Some(state) = &mut self.state else {
            return Ok(());
        };
        if state.size.width == 0 || state.size.height == 0 {
            return Ok(());
        }

        let mut buffer = state
            .surface
            .buffer_mut()
            .map_err(|e| anyhow::anyhow!("surface buffer: {e}"))?;
        let mut canvas = SurfaceCanvas {
            pixels: &mut buffer[..],
            width: state.size.width,
            height: state.size.height,
        };

        let sweep = self.controller.sweep_angle(now);
        // Drawing into the surface canvas is infallible.
        let _ = self
            .renderer
            .render_frame(&mut canvas, self.controller.clock(), sweep);

        buffer
            .present()
            .map_err(|e| anyhow::anyhow!("surface present: {e}"))?;
        Ok(())
    }

    fn update_title(&self) {
        let Some(state) = &self.state else {
            return;
        };
        let c = self.controller.clock();
        let dial_hour = if c.hour() == 0 { 12 } else { c.hour() };
        state.window.set_title(&format!(
            "Watch Face — {:02}:{:02}:{:02}",
            dial_hour,
            c.minute(),
            c.second()
        ));
    }
}

impl ApplicationHandler for FaceApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_none() {
            if let Err(err) = self.create_window(event_loop) {
                self.fail(event_loop, err);
                return;
            }
        }

        let Some(state) = &self.state else {
            return;
        };
        let size = state.size;
        self.renderer.set_density(self.density(&state.window));

        if let Err(err) = self.handle_resize(size) {
            self.fail(event_loop, err);
            return;
        }

        self.controller.set_visible(true, &self.clock);
        self.update_title();
        tracing::info!(
            width = size.width,
            height = size.height,
            "face visible, ticker running"
        );

        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.controller.set_visible(false, &self.clock);
                event_loop.exit();
            }

            WindowEvent::Occluded(occluded) => {
                self.controller.set_visible(!occluded, &self.clock);
                tracing::info!(occluded, "visibility changed");
                if !occluded {
                    if let Some(state) = &self.state {
                        state.window.request_redraw();
                    }
                }
            }

            WindowEvent::Resized(size) => {
                if let Err(err) = self.handle_resize(size) {
                    self.fail(event_loop, err);
                    return;
                }
                if let Some(state) = &self.state {
                    state.window.request_redraw();
                }
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                let density = self
                    .config
                    .density_override
                    .unwrap_or(scale_factor as f32);
                self.renderer.set_density(density);
                let size = self.state.as_ref().map(|s| s.size);
                if let Some(size) = size {
                    if let Err(err) = self.handle_resize(size) {
                        self.fail(event_loop, err);
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                if let Err(err) = self.redraw() {
                    self.fail(event_loop, err);
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.controller.is_visible() {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        }

        // The sweep animates at the display's own cadence.
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }

        // Wake at the next second boundary even if no frame lands earlier.
        match self.controller.next_deadline() {
            Some(deadline) => {
                let now = self.clock.now_millis();
                let wait = Duration::from_millis(deadline.saturating_sub(now));
                event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + wait));
            }
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}
