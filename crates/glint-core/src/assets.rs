use std::fs;
use std::path::Path;

use crate::error::RenderError;

/// A vertex/fragment source pair, opaque to the harness.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    pub vert: String,
    pub frag: String,
    /// Optional human-friendly origin (path/label) for logs.
    pub origin: Option<String>,
}

/// Reads one opaque text blob from disk. No preprocessing, no validation.
pub fn load_text(path: impl AsRef<Path>) -> Result<String, RenderError> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a vertex/fragment pair from disk.
pub fn load_shader_pair(vert: &Path, frag: &Path) -> Result<ShaderSource, RenderError> {
    Ok(ShaderSource {
        vert: load_text(vert)?,
        frag: load_text(frag)?,
        origin: Some(format!("{} + {}", vert.display(), frag.display())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn write_temp_fixture(name: &str, contents: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis();
        p.push(format!("glint_assets_{name}_{ts}"));
        fs::write(&p, contents).expect("write fixture");
        p
    }

    #[test]
    fn load_text_round_trips() {
        let path = write_temp_fixture("round_trip.frag", "void main() {}\n");
        let text = load_text(&path).expect("fixture should load");
        assert_eq!(text, "void main() {}\n");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn load_text_missing_file_reports_path() {
        let mut path = std::env::temp_dir();
        path.push("glint_assets_does_not_exist.vert");
        let err = load_text(&path).expect_err("missing file must fail");
        assert!(
            err.to_string().contains("glint_assets_does_not_exist"),
            "expected error to name the path, got: {err}"
        );
    }

    #[test]
    fn load_shader_pair_records_origin() {
        let vert = write_temp_fixture("pair.vert", "v");
        let frag = write_temp_fixture("pair.frag", "f");
        let pair = load_shader_pair(&vert, &frag).expect("pair should load");
        assert_eq!(pair.vert, "v");
        assert_eq!(pair.frag, "f");
        assert!(pair.origin.is_some());
        let _ = fs::remove_file(vert);
        let _ = fs::remove_file(frag);
    }
}
