use std::path::Path;

use winit::event_loop::EventLoop;

use glint_core::{load_shader_pair, ContextOptions, RenderError, ShaderSource};
use glint_host_winit::App;
use glint_passes::{DEFAULT_FRAG, DEFAULT_VERT};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run() {
        tracing::error!(%e, "fatal");
        std::process::exit(1);
    }
}

fn run() -> Result<(), RenderError> {
    // Optional: `sketch <vertex.vert> <fragment.frag>` renders your own pair.
    let mut args = std::env::args().skip(1);
    let sources = match (args.next(), args.next()) {
        (Some(vert), Some(frag)) => load_shader_pair(Path::new(&vert), Path::new(&frag))?,
        _ => ShaderSource {
            vert: DEFAULT_VERT.to_string(),
            frag: DEFAULT_FRAG.to_string(),
            origin: Some("builtin".to_string()),
        },
    };
    if let Some(origin) = &sources.origin {
        tracing::info!(%origin, "shader pair loaded");
    }

    let event_loop = EventLoop::new();
    let mut app = App::init(
        &event_loop,
        "glint: sketch",
        960,
        540,
        &ContextOptions::default(),
    )?;
    app.setup(&sources.vert, &sources.frag);
    app.run(event_loop)
}
