//! Host glue (policy layer): winit window + glutin context bootstrap and
//! the application driver that owns the frame loop.
//!
//! This crate stays separate so the runtime remains embed-friendly.

mod app;
mod bootstrap;

pub use app::App;
pub use bootstrap::{bootstrap, Bootstrap};
