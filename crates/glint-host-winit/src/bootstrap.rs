use std::num::NonZeroU32;

use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextAttributesBuilder, GlProfile, PossiblyCurrentContext};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasRawWindowHandle;
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowBuilder};

use glint_core::{ContextOptions, RenderError};

/// Everything the driver needs from the platform: the window, the GL
/// surface/context pair, and the loaded function table.
pub struct Bootstrap {
    pub window: Window,
    pub gl_surface: Surface<WindowSurface>,
    pub gl_context: PossiblyCurrentContext,
    pub gl: glow::Context,
}

/// Resolves a window and acquires a core-profile GL context for it.
///
/// Either succeeds completely or fails with a host error — no partially
/// initialised surface is ever returned. `options` maps onto the config
/// template; see DESIGN.md for flags with no glutin counterpart.
pub fn bootstrap<T>(
    event_loop: &EventLoop<T>,
    title: &str,
    width: u32,
    height: u32,
    options: &ContextOptions,
) -> Result<Bootstrap, RenderError> {
    let window_builder = WindowBuilder::new()
        .with_title(title)
        .with_inner_size(winit::dpi::LogicalSize::new(width as f64, height as f64))
        .with_transparent(options.transparent);

    let mut template = ConfigTemplateBuilder::new()
        .with_alpha_size(if options.alpha { 8 } else { 0 })
        .with_depth_size(if options.depth { 24 } else { 0 })
        .with_stencil_size(if options.stencil { 8 } else { 0 })
        .with_transparency(options.transparent);
    if options.antialias {
        template = template.with_multisampling(4);
    }
    if options.require_acceleration {
        template = template.prefer_hardware_accelerated(Some(true));
    }

    let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

    let antialias = options.antialias;
    let (window, gl_config) = display_builder
        .build(event_loop, template, |mut configs| {
            if antialias {
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() > accum.num_samples() {
                            config
                        } else {
                            accum
                        }
                    })
                    .unwrap()
            } else {
                configs.next().unwrap()
            }
        })
        .map_err(|e| RenderError::SurfaceInit(format!("DisplayBuilder.build: {e}")))?;

    let window = window
        .ok_or_else(|| RenderError::SurfaceInit("DisplayBuilder did not create a window".into()))?;
    let gl_display = gl_config.display();

    let raw_window_handle = window.raw_window_handle();

    let context_attributes = ContextAttributesBuilder::new()
        .with_profile(GlProfile::Core)
        .build(Some(raw_window_handle));

    let fallback_context_attributes = ContextAttributesBuilder::new()
        .with_profile(GlProfile::Core)
        .build(None);

    let not_current_gl_context = unsafe {
        gl_display
            .create_context(&gl_config, &context_attributes)
            .or_else(|_| gl_display.create_context(&gl_config, &fallback_context_attributes))
            .map_err(|e| RenderError::ContextInit(format!("create_context: {e}")))?
    };

    let (surface_width, surface_height) = {
        let s = window.inner_size();
        (s.width.max(1), s.height.max(1))
    };

    let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
        raw_window_handle,
        NonZeroU32::new(surface_width).unwrap(),
        NonZeroU32::new(surface_height).unwrap(),
    );

    let gl_surface = unsafe {
        gl_display
            .create_window_surface(&gl_config, &attrs)
            .map_err(|e| RenderError::ContextInit(format!("create_window_surface: {e}")))?
    };

    let gl_context = not_current_gl_context
        .make_current(&gl_surface)
        .map_err(|e| RenderError::ContextInit(format!("make_current: {e}")))?;

    let gl = unsafe {
        glow::Context::from_loader_function(|s| {
            gl_display.get_proc_address(std::ffi::CString::new(s).unwrap().as_c_str()) as *const _
        })
    };

    Ok(Bootstrap {
        window,
        gl_surface,
        gl_context,
        gl,
    })
}
