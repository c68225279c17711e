#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_debug_implementations)]

pub mod assets;
pub mod error;
pub mod options;

pub use assets::{load_shader_pair, load_text, ShaderSource};
pub use error::RenderError;
pub use options::ContextOptions;
