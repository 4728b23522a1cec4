use std::mem;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use crate::config::WindowSettings;
use crate::coords::{Color, Viewport};
use crate::device::{Gpu, GpuConfig, SurfaceErrorAction};
use crate::input::{platform, InputEvent, InputState};
use crate::render::{Canvas, PolygonRenderer, RenderCtx, RenderTarget};

use super::{fps_title, Screen};

/// Pumps allowed for the platform to deliver `resumed` after startup.
const STARTUP_PUMPS: usize = 200;
const STARTUP_PUMP_TIMEOUT: Duration = Duration::from_millis(5);

/// Window configuration.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub gpu: GpuConfig,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::from(&WindowSettings::default())
    }
}

impl From<&WindowSettings> for WindowConfig {
    fn from(settings: &WindowSettings) -> Self {
        Self {
            title: settings.title.clone(),
            initial_size: LogicalSize::new(settings.width, settings.height),
            gpu: GpuConfig::from(settings),
        }
    }
}

#[self_referencing]
struct Surface {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// Receives winit callbacks while the event loop is being pumped.
struct Host {
    config: WindowConfig,
    surface: Option<Surface>,
    input: InputState,
    pending: Vec<InputEvent>,
    failure: Option<anyhow::Error>,
}

impl Host {
    fn new(config: WindowConfig) -> Self {
        Self {
            config,
            surface: None,
            input: InputState::default(),
            pending: Vec::new(),
            failure: None,
        }
    }

    fn create_surface(&self, event_loop: &ActiveEventLoop) -> Result<Surface> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_config = self.config.gpu.clone();
        SurfaceTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_config)),
        }
        .try_build()
        .context("GPU initialization failed for window")
    }

    fn scale_factor(&self) -> f64 {
        self.surface
            .as_ref()
            .map_or(1.0, |s| s.with_window(|w| w.scale_factor()))
    }
}

impl ApplicationHandler for Host {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() {
            return;
        }

        match self.create_surface(event_loop) {
            Ok(surface) => self.surface = Some(surface),
            Err(e) => {
                self.failure = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let scale = self.scale_factor();
        if let Some(ev) = platform::translate(&event, &self.input, scale) {
            self.input.apply(&ev);
            self.pending.push(ev);
        }

        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        match &event {
            WindowEvent::Resized(new_size) => {
                surface.with_gpu_mut(|gpu| gpu.resize(*new_size));
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = surface.with_window(|w| w.inner_size());
                surface.with_gpu_mut(|gpu| gpu.resize(new_size));
            }
            _ => {}
        }
    }
}

/// [`Screen`] backed by a winit window and a wgpu surface.
///
/// The event loop is pumped, never run: each [`poll_events`](Screen::poll_events)
/// drains whatever the platform has queued and returns immediately, so the
/// caller keeps its own blocking frame loop.
pub struct WindowScreen {
    event_loop: EventLoop<()>,
    host: Host,
    title: String,
    canvas: Canvas,
    renderer: PolygonRenderer,
}

impl WindowScreen {
    /// Opens the window and brings up the GPU.
    pub fn open(config: WindowConfig) -> Result<Self> {
        let mut event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let title = config.title.clone();
        let mut host = Host::new(config);

        for _ in 0..STARTUP_PUMPS {
            let status = event_loop.pump_app_events(Some(STARTUP_PUMP_TIMEOUT), &mut host);
            if let Some(e) = host.failure.take() {
                return Err(e);
            }
            if host.surface.is_some() {
                break;
            }
            if let PumpStatus::Exit(code) = status {
                bail!("event loop exited during startup (code {code})");
            }
        }

        let Some(surface) = host.surface.as_ref() else {
            bail!("window was not created after {STARTUP_PUMPS} event pumps");
        };

        let size = surface.with_window(|w| logical_size(w));
        log::info!("window open: \"{title}\" {}x{}", size.width, size.height);

        // Startup events (initial resize, focus) are kept for the first phase.
        Ok(Self {
            event_loop,
            host,
            title,
            canvas: Canvas::new(size),
            renderer: PolygonRenderer::new(),
        })
    }

    fn sync_canvas_size(&mut self) {
        if let Some(surface) = self.host.surface.as_ref() {
            let size = surface.with_window(|w| logical_size(w));
            self.canvas.set_size(size);
        }
    }
}

impl Screen for WindowScreen {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.host);

        if let Some(e) = self.host.failure.take() {
            return Err(e);
        }

        if let PumpStatus::Exit(code) = status {
            log::debug!("event loop exited (code {code})");
            self.host.pending.push(InputEvent::Quit);
        }

        self.sync_canvas_size();
        Ok(mem::take(&mut self.host.pending))
    }

    fn input(&self) -> &InputState {
        &self.host.input
    }

    fn canvas(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    fn size(&self) -> Viewport {
        self.canvas.size()
    }

    fn present(&mut self) -> Result<()> {
        let (canvas, renderer) = (&self.canvas, &mut self.renderer);

        let result = match self.host.surface.as_mut() {
            Some(surface) => surface.with_mut(|fields| -> Result<()> {
                let gpu = fields.gpu;
                if gpu.size().width == 0 || gpu.size().height == 0 {
                    return Ok(());
                }

                let mut frame = match gpu.begin_frame() {
                    Ok(frame) => frame,
                    Err(err) => match gpu.handle_surface_error(err) {
                        SurfaceErrorAction::Fatal => bail!("surface error is unrecoverable"),
                        action => {
                            log::debug!("frame skipped: {action:?}");
                            return Ok(());
                        }
                    },
                };

                let rctx = RenderCtx::new(
                    gpu.device(),
                    gpu.queue(),
                    gpu.surface_format(),
                    canvas.size(),
                );

                clear(&mut frame.encoder, &frame.view, canvas.clear_color(), rctx.wants_linear());
                {
                    let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
                    renderer.render(&rctx, &mut target, canvas);
                }

                fields.window.pre_present_notify();
                gpu.submit(frame);
                Ok(())
            }),
            None => Ok(()),
        };

        self.canvas.reset();
        result
    }

    fn show_fps(&mut self, fps: f32) {
        if let Some(surface) = self.host.surface.as_ref() {
            let title = fps_title(&self.title, fps);
            surface.with_window(|w| w.set_title(&title));
        }
    }
}

fn logical_size(window: &Window) -> Viewport {
    let logical = window.inner_size().to_logical::<f64>(window.scale_factor());
    Viewport::new(logical.width as f32, logical.height as f32)
}

fn clear(
    encoder: &mut wgpu::CommandEncoder,
    view: &wgpu::TextureView,
    color: Color,
    linear: bool,
) {
    let [r, g, b, a] = if linear {
        color.to_linear_premul()
    } else {
        color.to_srgb_premul()
    };

    let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("otl clear pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color {
                    r: r as f64,
                    g: g as f64,
                    b: b as f64,
                    a: a as f64,
                }),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    });
}
