//! Final on-screen stage: one full-screen quad, one program, three
//! per-frame uniforms.

use glow::HasContext;

use glint_gl::{
    create_vertex_buffer, Capabilities, ProgramDesc, RenderError, ShaderProgram, UniformDecl,
    UniformKind, UniformValue, VertexAttribute,
};
use glint_runtime::geometry::plane_attributes;

/// Per-frame values the output pass pushes, read fresh from the render
/// context and the pointer tracker by the driver.
#[derive(Debug, Clone, Copy)]
pub struct FrameState {
    /// Accumulated (scaled) seconds.
    pub time: f32,
    /// Surface pixel size.
    pub resolution: [f32; 2],
    /// Pointer position in normalized device coordinates.
    pub pointer: [f32; 2],
}

/// Quad vertex count — the strip needs no index buffer.
const QUAD_VERTICES: i32 = 4;

/// The on-screen stage: owns the quad geometry and the final program.
///
/// Exactly one instance draws to the default framebuffer; the quad buffers
/// and the program live and die with it (see [`OutputPass::destroy`]).
#[derive(Debug)]
pub struct OutputPass {
    program: ShaderProgram,
    position_vbo: glow::NativeBuffer,
    texcoord_vbo: glow::NativeBuffer,
}

impl OutputPass {
    /// Builds the quad and compiles/links the final program, declaring the
    /// harness's canonical attribute and uniform set. Shader failures are
    /// soft — the diagnostic has already been surfaced, and the caller may
    /// retry with corrected source.
    pub unsafe fn new(
        gl: &glow::Context,
        caps: &Capabilities,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<Self, RenderError> {
        let plane = plane_attributes(2.0, 2.0);
        let position_vbo = create_vertex_buffer(gl, &plane.positions)?;
        let texcoord_vbo = match create_vertex_buffer(gl, &plane.tex_coords) {
            Ok(vbo) => vbo,
            Err(e) => {
                gl.delete_buffer(position_vbo);
                return Err(e);
            }
        };

        let desc = ProgramDesc {
            vertex_src,
            fragment_src,
            attributes: vec![
                VertexAttribute::new("position", 3),
                VertexAttribute::new("texCoord", 2),
            ],
            uniforms: Some(vec![
                UniformDecl::new("uTime", UniformKind::Float),
                UniformDecl::new("uResolution", UniformKind::Vec2),
                UniformDecl::new("uMouse", UniformKind::Vec2),
            ]),
            feedback_outputs: None,
        };
        let program = match ShaderProgram::new(gl, caps, &desc) {
            Ok(program) => program,
            Err(e) => {
                gl.delete_buffer(position_vbo);
                gl.delete_buffer(texcoord_vbo);
                return Err(e);
            }
        };

        Ok(Self {
            program,
            position_vbo,
            texcoord_vbo,
        })
    }

    /// Draws one frame into the default framebuffer: viewport to the
    /// surface size, clear color+depth, activate, bind the quad, push the
    /// uniforms, one 4-vertex strip.
    pub unsafe fn draw(&self, gl: &glow::Context, frame: &FrameState) {
        gl.bind_framebuffer(glow::FRAMEBUFFER, None);
        gl.viewport(0, 0, frame.resolution[0] as i32, frame.resolution[1] as i32);
        gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);

        self.program.activate(gl);
        self.program
            .bind_buffers(gl, &[self.position_vbo, self.texcoord_vbo], None);
        self.program.push_uniforms(
            gl,
            &[
                UniformValue::Float(frame.time),
                UniformValue::Vec2(frame.resolution),
                UniformValue::Vec2(frame.pointer),
            ],
        );
        gl.draw_arrays(glow::TRIANGLE_STRIP, 0, QUAD_VERTICES);
        gl.bind_vertex_array(None);
    }

    /// Explicitly destroys the program and the quad's buffers.
    pub unsafe fn destroy(&mut self, gl: &glow::Context) {
        self.program.destroy(gl);
        gl.delete_buffer(self.position_vbo);
        gl.delete_buffer(self.texcoord_vbo);
    }
}

pub const DEFAULT_VERT: &str = r#"#version 330 core
in vec3 position;
in vec2 texCoord;
out vec2 vTexCoord;
void main() {
    vTexCoord = texCoord;
    gl_Position = vec4(position, 1.0);
}
"#;

pub const DEFAULT_FRAG: &str = r#"#version 330 core
in vec2 vTexCoord;
out vec4 fragColor;

uniform float uTime;
uniform vec2  uResolution;
uniform vec2  uMouse;

void main() {
    float aspect = uResolution.x / max(uResolution.y, 1.0);
    vec2 p = vTexCoord * 2.0 - 1.0;
    p.y = -p.y;
    p.x *= aspect;
    vec2 m = vec2(uMouse.x * aspect, uMouse.y);
    float d = length(p - m);
    float ring = 0.5 + 0.5 * sin(d * 12.0 - uTime * 3.0);
    fragColor = vec4(ring * 0.2, ring * 0.6, 1.0 - d * 0.4, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sources_declare_the_canonical_names() {
        assert!(DEFAULT_VERT.contains("position"));
        assert!(DEFAULT_VERT.contains("texCoord"));
        assert!(DEFAULT_FRAG.contains("uTime"));
        assert!(DEFAULT_FRAG.contains("uResolution"));
        assert!(DEFAULT_FRAG.contains("uMouse"));
    }

    #[test]
    fn frame_state_is_plain_copyable_data() {
        let frame = FrameState {
            time: 1.5,
            resolution: [640.0, 480.0],
            pointer: [0.0, 0.0],
        };
        let copy = frame;
        assert_eq!(copy.time, frame.time);
        assert_eq!(copy.resolution, frame.resolution);
    }
}
