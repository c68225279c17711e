use serde::{Deserialize, Serialize};

/// Flags forwarded to surface/context acquisition.
///
/// These are plain data; the winit host maps them onto its config template.
/// Flags with no counterpart on the host side are not carried (see
/// DESIGN.md for the mapping).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextOptions {
    /// Request an alpha channel on the default framebuffer.
    pub alpha: bool,
    /// Request a depth buffer.
    pub depth: bool,
    /// Request a stencil buffer.
    pub stencil: bool,
    /// Request a multisampled config.
    pub antialias: bool,
    /// Request a compositor-transparent surface.
    pub transparent: bool,
    /// Refuse software rasterizers.
    pub require_acceleration: bool,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            alpha: true,
            depth: true,
            stencil: false,
            antialias: false,
            transparent: false,
            require_acceleration: false,
        }
    }
}
