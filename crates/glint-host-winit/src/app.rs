use std::num::NonZeroU32;

use glutin::prelude::GlSurface;
use winit::event::{Event, Touch, TouchPhase, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};

use glint_core::{ContextOptions, RenderError};
use glint_gl::{query_capabilities, Capabilities};
use glint_passes::{FrameState, OutputPass};
use glint_runtime::{ControlPanel, PointerTracker, RenderContext};

use crate::bootstrap::{bootstrap, Bootstrap};

/// Composes the render context, pointer tracker, control panel and output
/// pass, and owns the frame loop.
///
/// Lifecycle: [`App::init`] → [`App::setup`] → [`App::run`], in that order,
/// exactly once. There is no teardown path: closing the window flips the
/// running flag and the process exits with the event loop.
pub struct App {
    window: winit::window::Window,
    gl_surface: glutin::surface::Surface<glutin::surface::WindowSurface>,
    gl_context: glutin::context::PossiblyCurrentContext,
    ctx: RenderContext,
    caps: Capabilities,
    pointer: PointerTracker,
    panel: ControlPanel,
    output: Option<OutputPass>,
    active_touch: Option<u64>,
}

impl App {
    /// Resolves the surface and acquires the drawing context. Hard-fails
    /// when no surface resolves or context acquisition fails.
    pub fn init<T>(
        event_loop: &EventLoop<T>,
        title: &str,
        width: u32,
        height: u32,
        options: &ContextOptions,
    ) -> Result<Self, RenderError> {
        let Bootstrap {
            window,
            gl_surface,
            gl_context,
            gl,
        } = bootstrap(event_loop, title, width, height, options)?;

        let caps = unsafe { query_capabilities(&gl) };
        tracing::debug!(?caps, "probed GL capabilities");

        let size = window.inner_size();
        let ctx = RenderContext::new(gl, size.width, size.height, window.scale_factor());

        Ok(Self {
            window,
            gl_surface,
            gl_context,
            ctx,
            caps,
            pointer: PointerTracker::new(),
            panel: ControlPanel::new(),
            output: None,
            active_touch: None,
        })
    }

    /// Seeds the clock and builds the output pass from the supplied shader
    /// pair. A shader failure leaves the pass absent — the loop will then
    /// log and skip frames instead of crashing, and the compiler diagnostic
    /// has already been surfaced.
    pub fn setup(&mut self, vertex_src: &str, fragment_src: &str) {
        self.ctx.setup();
        match unsafe { OutputPass::new(self.ctx.gl(), &self.caps, vertex_src, fragment_src) } {
            Ok(pass) => self.output = Some(pass),
            Err(err) => tracing::error!(%err, "output pass construction failed"),
        }
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    /// Runs the frame loop until the running flag goes false.
    ///
    /// The next frame is scheduled while the flag is true, *before* the
    /// frame work runs — so a flip during a frame lets the already
    /// scheduled frame complete, and only then does the loop stop.
    pub fn run(mut self, event_loop: EventLoop<()>) -> ! {
        event_loop.run(move |event, _, control_flow| {
            *control_flow = ControlFlow::Poll;

            match event {
                Event::WindowEvent { event, .. } => self.on_window_event(event),

                Event::MainEventsCleared => {
                    if self.ctx.running() {
                        self.window.request_redraw();
                    } else {
                        *control_flow = ControlFlow::Exit;
                    }
                }

                Event::RedrawRequested(_) => self.frame(),

                _ => {}
            }
        })
    }

    fn on_window_event(&mut self, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.ctx.set_running(false),

            WindowEvent::Resized(physical_size) => {
                let w = physical_size.width.max(1);
                let h = physical_size.height.max(1);
                self.gl_surface.resize(
                    &self.gl_context,
                    NonZeroU32::new(w).unwrap(),
                    NonZeroU32::new(h).unwrap(),
                );
                self.ctx.resize(w, h);
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.ctx.set_scale_factor(scale_factor);
            }

            WindowEvent::CursorMoved { position, .. } => {
                let (w, h) = self.ctx.size();
                self.pointer
                    .set_coords(position.x as f32, position.y as f32, w, h);
            }

            WindowEvent::Touch(touch) => self.on_touch(touch),

            WindowEvent::ReceivedCharacter(ch) => self.panel.on_key(ch),

            _ => {}
        }
    }

    /// Only the first active touch drives the pointer. A touch *start*
    /// repositions; a mouse press does not (the cursor already moved).
    fn on_touch(&mut self, touch: Touch) {
        let (w, h) = self.ctx.size();
        match touch.phase {
            TouchPhase::Started => {
                if self.active_touch.is_none() {
                    self.active_touch = Some(touch.id);
                    self.pointer
                        .set_coords(touch.location.x as f32, touch.location.y as f32, w, h);
                }
            }
            TouchPhase::Moved => {
                if self.active_touch == Some(touch.id) {
                    self.pointer
                        .set_coords(touch.location.x as f32, touch.location.y as f32, w, h);
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.active_touch == Some(touch.id) {
                    self.active_touch = None;
                }
            }
        }
    }

    /// One frame: clock → pointer → draw → swap, bracketed by the panel's
    /// instrumentation marks. A missing pass or a failed swap skips the
    /// frame; nothing here may stop the loop.
    fn frame(&mut self) {
        self.panel.mark_begin();

        self.ctx.set_time_scale(self.panel.params().time_scale);
        self.ctx.update();
        self.pointer.update();

        match &self.output {
            Some(pass) => {
                let frame = FrameState {
                    time: self.ctx.time() as f32,
                    resolution: self.ctx.resolution(),
                    pointer: self.pointer.coords(),
                };
                unsafe { pass.draw(self.ctx.gl(), &frame) };
                if let Err(err) = self.gl_surface.swap_buffers(&self.gl_context) {
                    tracing::error!(%err, "swap_buffers failed; skipping frame");
                }
            }
            None => tracing::error!("no output pass; skipping frame"),
        }

        self.panel.mark_end();
    }
}
