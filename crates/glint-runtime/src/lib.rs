//! Frame-loop state for the glint harness: the render context (clock +
//! surface state), the pointer tracker, the control panel, and the quad
//! geometry generator.
//!
//! One instance of each is constructed at startup by the driver and passed
//! by reference into whatever needs it — shared mutable state without
//! hidden globals.
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_debug_implementations)]

pub mod context;
pub mod controls;
pub mod geometry;
pub mod pointer;

pub use context::{FrameClock, RenderContext};
pub use controls::{ControlPanel, PanelParams};
pub use geometry::{plane_attributes, PlaneGeometry};
pub use pointer::{PointerTracker, MOVE_DECAY};
