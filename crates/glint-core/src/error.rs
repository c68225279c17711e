use std::fmt;
use std::path::PathBuf;

/// Harness-level errors used across the glint crates.
///
/// Contract rule: this type lives in `glint-core` and is re-exported by the
/// GL runtime. Soft, recoverable failures travel through it; programmer
/// contract violations (descriptor arity, missing mandatory capabilities)
/// panic instead and are documented under `# Panics` at the call sites.
#[derive(Debug)]
pub enum RenderError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ---- Host / surface acquisition ----
    SurfaceInit(String),
    ContextInit(String),

    // ---- GL runtime ----
    VertexCompile(String),
    FragmentCompile(String),
    Link(String),
    GlCreate(String),

    // ---- Fallback ----
    Other(String),
}

impl RenderError {
    pub fn other<T: Into<String>>(s: T) -> Self {
        RenderError::Other(s.into())
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Io { path, source } => {
                write!(f, "io error at {}: {}", path.display(), source)
            }

            RenderError::SurfaceInit(msg) => write!(f, "surface acquisition failed: {msg}"),
            RenderError::ContextInit(msg) => write!(f, "context acquisition failed: {msg}"),

            RenderError::VertexCompile(msg) => write!(f, "vertex shader compile error: {msg}"),
            RenderError::FragmentCompile(msg) => write!(f, "fragment shader compile error: {msg}"),
            RenderError::Link(msg) => write!(f, "program link error: {msg}"),
            RenderError::GlCreate(msg) => write!(f, "backend object creation failed: {msg}"),

            RenderError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
