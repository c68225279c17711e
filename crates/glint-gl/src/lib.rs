//! glint GL runtime (glow/OpenGL backend)
//
// This crate intentionally contains **only** the render-resource layer:
// - compile/link shader stages (plain + transform-feedback link paths)
// - vertex/index buffer allocation
// - render targets (FBO + color texture, optional depth renderbuffer)
// - the declared-attribute/uniform program wrapper
//
// It does NOT contain windowing, timing policy, pointer input, or passes.
#![allow(clippy::missing_safety_doc)]

use glow::HasContext;

pub use glint_core::RenderError;

// -------------------------------------------------------------------------------------------------
// Capabilities
// -------------------------------------------------------------------------------------------------

/// Best-effort capability probe results.
///
/// Every field defaults to `false`; absence of evidence is treated as
/// "unsupported" wherever capabilities are consulted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// 32-bit element indices are usable (core in GL 3 / GLES 3, extension below).
    pub uint32_indices: bool,
    /// Full-float color textures are usable.
    pub float_textures: bool,
    /// Half-float color textures are usable.
    pub half_float_textures: bool,
    /// The context can capture vertex outputs into buffers.
    pub transform_feedback: bool,
    /// The context is an embedded (GLES) profile.
    pub is_embedded: bool,
}

/// Probes the context version and extension strings.
pub unsafe fn query_capabilities(gl: &glow::Context) -> Capabilities {
    let version = gl.version();
    let exts = gl.supported_extensions();

    let core_desktop = !version.is_embedded && version.major >= 3;
    let core_es3 = version.is_embedded && version.major >= 3;

    Capabilities {
        uint32_indices: core_desktop || core_es3 || exts.contains("GL_OES_element_index_uint"),
        float_textures: core_desktop
            || exts.contains("GL_ARB_texture_float")
            || exts.contains("GL_OES_texture_float")
            || (core_es3 && exts.contains("GL_EXT_color_buffer_float")),
        half_float_textures: core_desktop
            || core_es3
            || exts.contains("GL_OES_texture_half_float")
            || exts.contains("GL_EXT_color_buffer_half_float"),
        transform_feedback: core_desktop || core_es3,
        is_embedded: version.is_embedded,
    }
}

// -------------------------------------------------------------------------------------------------
// Shader compilation / program linking
// -------------------------------------------------------------------------------------------------

/// Which pipeline stage a shader unit feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_kind(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

/// Compiles one shader stage.
///
/// On failure the compiler's info log is reported on the error channel and
/// the shader object is deleted before the error is returned, so a caller
/// may retry with corrected source.
pub unsafe fn compile_shader(
    gl: &glow::Context,
    source: &str,
    stage: ShaderStage,
) -> Result<glow::NativeShader, RenderError> {
    let shader = gl
        .create_shader(stage.gl_kind())
        .map_err(|e| RenderError::GlCreate(format!("create_shader({stage:?}) failed: {e:?}")))?;
    gl.shader_source(shader, source);
    gl.compile_shader(shader);
    if !gl.get_shader_compile_status(shader) {
        let log = gl.get_shader_info_log(shader);
        gl.delete_shader(shader);
        tracing::error!(stage = ?stage, "shader compile failed:\n{log}");
        return Err(match stage {
            ShaderStage::Vertex => RenderError::VertexCompile(log),
            ShaderStage::Fragment => RenderError::FragmentCompile(log),
        });
    }
    Ok(shader)
}

/// Links a vertex/fragment pair into a program.
///
/// The shader units are detached and deleted afterwards (linking consumes
/// them), on failure as well. On success the fresh program is left installed
/// as the currently active program.
pub unsafe fn link_program(
    gl: &glow::Context,
    vs: glow::NativeShader,
    fs: glow::NativeShader,
) -> Result<glow::NativeProgram, RenderError> {
    link_inner(gl, vs, fs, None)
}

/// Transform-feedback variant of [`link_program`]: `outputs` names the
/// vertex outputs captured into buffers, in order, one buffer per output.
pub unsafe fn link_program_with_feedback(
    gl: &glow::Context,
    vs: glow::NativeShader,
    fs: glow::NativeShader,
    outputs: &[&str],
) -> Result<glow::NativeProgram, RenderError> {
    link_inner(gl, vs, fs, Some(outputs))
}

unsafe fn link_inner(
    gl: &glow::Context,
    vs: glow::NativeShader,
    fs: glow::NativeShader,
    feedback_outputs: Option<&[&str]>,
) -> Result<glow::NativeProgram, RenderError> {
    let program = match gl.create_program() {
        Ok(p) => p,
        Err(e) => {
            gl.delete_shader(vs);
            gl.delete_shader(fs);
            return Err(RenderError::GlCreate(format!("create_program failed: {e:?}")));
        }
    };
    gl.attach_shader(program, vs);
    gl.attach_shader(program, fs);
    if let Some(outputs) = feedback_outputs {
        gl.transform_feedback_varyings(program, outputs, glow::SEPARATE_ATTRIBS);
    }
    gl.link_program(program);

    gl.detach_shader(program, vs);
    gl.detach_shader(program, fs);
    gl.delete_shader(vs);
    gl.delete_shader(fs);

    if !gl.get_program_link_status(program) {
        let log = gl.get_program_info_log(program);
        gl.delete_program(program);
        tracing::error!("program link failed:\n{log}");
        return Err(RenderError::Link(log));
    }

    // Callers rely on the fresh program being active after a successful link.
    gl.use_program(Some(program));
    Ok(program)
}

// -------------------------------------------------------------------------------------------------
// Buffers
// -------------------------------------------------------------------------------------------------

/// Uploads `data` into a fresh ARRAY_BUFFER (static draw), unbound after.
pub unsafe fn create_vertex_buffer(
    gl: &glow::Context,
    data: &[f32],
) -> Result<glow::NativeBuffer, RenderError> {
    let vbo = gl
        .create_buffer()
        .map_err(|e| RenderError::GlCreate(format!("create_buffer failed: {e:?}")))?;
    gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
    gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, bytemuck::cast_slice(data), glow::STATIC_DRAW);
    gl.bind_buffer(glow::ARRAY_BUFFER, None);
    Ok(vbo)
}

/// Uploads 16-bit indices into a fresh ELEMENT_ARRAY_BUFFER.
pub unsafe fn create_index_buffer_u16(
    gl: &glow::Context,
    data: &[u16],
) -> Result<glow::NativeBuffer, RenderError> {
    let ibo = gl
        .create_buffer()
        .map_err(|e| RenderError::GlCreate(format!("create_buffer failed: {e:?}")))?;
    gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ibo));
    gl.buffer_data_u8_slice(
        glow::ELEMENT_ARRAY_BUFFER,
        bytemuck::cast_slice(data),
        glow::STATIC_DRAW,
    );
    gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);
    Ok(ibo)
}

/// Uploads 32-bit indices into a fresh ELEMENT_ARRAY_BUFFER.
///
/// # Panics
///
/// Panics when `caps.uint32_indices` is false. Asking for 32-bit indices on
/// a context without the capability is a programmer error at the call site,
/// not a runtime condition to recover from; nothing is allocated first.
pub unsafe fn create_index_buffer_u32(
    gl: &glow::Context,
    caps: &Capabilities,
    data: &[u32],
) -> Result<glow::NativeBuffer, RenderError> {
    assert!(
        caps.uint32_indices,
        "create_index_buffer_u32: context does not support 32-bit element indices"
    );
    let ibo = gl
        .create_buffer()
        .map_err(|e| RenderError::GlCreate(format!("create_buffer failed: {e:?}")))?;
    gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ibo));
    gl.buffer_data_u8_slice(
        glow::ELEMENT_ARRAY_BUFFER,
        bytemuck::cast_slice(data),
        glow::STATIC_DRAW,
    );
    gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);
    Ok(ibo)
}

// -------------------------------------------------------------------------------------------------
// Render targets
// -------------------------------------------------------------------------------------------------

/// Backing storage selected for a render target's color texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetStorage {
    /// 8-bit fixed point (RGBA8), paired with a depth renderbuffer.
    Fixed,
    /// 16-bit float (RGBA16F).
    HalfFloat,
    /// 32-bit float (RGBA32F).
    FullFloat,
}

impl TargetStorage {
    fn internal_format(self) -> i32 {
        match self {
            TargetStorage::Fixed => glow::RGBA8 as i32,
            TargetStorage::HalfFloat => glow::RGBA16F as i32,
            TargetStorage::FullFloat => glow::RGBA32F as i32,
        }
    }

    fn texel_type(self) -> u32 {
        match self {
            TargetStorage::Fixed => glow::UNSIGNED_BYTE,
            TargetStorage::HalfFloat => glow::HALF_FLOAT,
            TargetStorage::FullFloat => glow::FLOAT,
        }
    }
}

/// Offscreen render target: framebuffer + color texture, optionally a depth
/// renderbuffer.
///
/// The handles are created together, resized together and released
/// together. Each bundle has exactly one logical owner, responsible for
/// calling [`RenderTarget::release`] before discard; there is no implicit
/// finalization, and a forgotten release leaks for the life of the surface.
#[derive(Debug)]
pub struct RenderTarget {
    framebuffer: Option<glow::NativeFramebuffer>,
    depth: Option<glow::NativeRenderbuffer>,
    color: Option<glow::NativeTexture>,
    width: i32,
    height: i32,
    storage: TargetStorage,
}

impl RenderTarget {
    pub fn framebuffer(&self) -> Option<glow::NativeFramebuffer> {
        self.framebuffer
    }

    pub fn color(&self) -> Option<glow::NativeTexture> {
        self.color
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn storage(&self) -> TargetStorage {
        self.storage
    }

    /// True once every handle has been released.
    pub fn is_released(&self) -> bool {
        self.framebuffer.is_none() && self.depth.is_none() && self.color.is_none()
    }

    /// Reallocates the backing storage in place, keeping the same handles
    /// and the storage format chosen at creation. A no-op on a released
    /// bundle. Acts on `self` only — never on any other bundle.
    pub unsafe fn resize(&mut self, gl: &glow::Context, width: i32, height: i32) {
        let Some(color) = self.color else { return };
        self.width = width.max(1);
        self.height = height.max(1);

        gl.bind_texture(glow::TEXTURE_2D, Some(color));
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            self.storage.internal_format(),
            self.width,
            self.height,
            0,
            glow::RGBA,
            self.storage.texel_type(),
            None,
        );
        gl.bind_texture(glow::TEXTURE_2D, None);

        if let Some(depth) = self.depth {
            gl.bind_renderbuffer(glow::RENDERBUFFER, Some(depth));
            gl.renderbuffer_storage(
                glow::RENDERBUFFER,
                glow::DEPTH_COMPONENT16,
                self.width,
                self.height,
            );
            gl.bind_renderbuffer(glow::RENDERBUFFER, None);
        }
    }

    /// Unbinds and deletes every present handle, leaving the bundle empty.
    /// Idempotent: a second call is a no-op.
    pub unsafe fn release(&mut self, gl: &glow::Context) {
        if let Some(fbo) = self.framebuffer.take() {
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);
            gl.delete_framebuffer(fbo);
        }
        if let Some(depth) = self.depth.take() {
            gl.bind_renderbuffer(glow::RENDERBUFFER, None);
            gl.delete_renderbuffer(depth);
        }
        if let Some(color) = self.color.take() {
            gl.bind_texture(glow::TEXTURE_2D, None);
            gl.delete_texture(color);
        }
        self.width = 0;
        self.height = 0;
    }
}

/// Allocates a fixed-point color target with a depth renderbuffer.
pub unsafe fn create_color_target(
    gl: &glow::Context,
    width: i32,
    height: i32,
) -> Result<RenderTarget, RenderError> {
    create_target(gl, width, height, TargetStorage::Fixed, true)
}

/// Allocates a floating-point color target, selecting half-float storage on
/// embedded contexts (or when full float is unavailable) and full-float
/// otherwise. Float targets carry no depth attachment.
///
/// # Panics
///
/// Panics when the context supports neither float nor half-float color
/// textures; consult [`Capabilities`] before asking for one.
pub unsafe fn create_float_target(
    gl: &glow::Context,
    caps: &Capabilities,
    width: i32,
    height: i32,
) -> Result<RenderTarget, RenderError> {
    let storage = if caps.half_float_textures && (caps.is_embedded || !caps.float_textures) {
        TargetStorage::HalfFloat
    } else if caps.float_textures {
        TargetStorage::FullFloat
    } else {
        panic!("create_float_target: context supports neither float nor half-float color textures");
    };
    create_target(gl, width, height, storage, false)
}

/// [`create_float_target`] without the capability gate: assumes native
/// full-float texture support unconditionally.
pub unsafe fn create_float_target_native(
    gl: &glow::Context,
    width: i32,
    height: i32,
) -> Result<RenderTarget, RenderError> {
    create_target(gl, width, height, TargetStorage::FullFloat, false)
}

unsafe fn create_target(
    gl: &glow::Context,
    width: i32,
    height: i32,
    storage: TargetStorage,
    with_depth: bool,
) -> Result<RenderTarget, RenderError> {
    let width = width.max(1);
    let height = height.max(1);

    let fbo = gl
        .create_framebuffer()
        .map_err(|e| RenderError::GlCreate(format!("create_framebuffer failed: {e:?}")))?;
    let tex = match gl.create_texture() {
        Ok(t) => t,
        Err(e) => {
            gl.delete_framebuffer(fbo);
            return Err(RenderError::GlCreate(format!("create_texture failed: {e:?}")));
        }
    };

    gl.bind_texture(glow::TEXTURE_2D, Some(tex));
    gl.tex_parameter_i32(
        glow::TEXTURE_2D,
        glow::TEXTURE_MIN_FILTER,
        glow::LINEAR as i32,
    );
    gl.tex_parameter_i32(
        glow::TEXTURE_2D,
        glow::TEXTURE_MAG_FILTER,
        glow::LINEAR as i32,
    );
    gl.tex_parameter_i32(
        glow::TEXTURE_2D,
        glow::TEXTURE_WRAP_S,
        glow::CLAMP_TO_EDGE as i32,
    );
    gl.tex_parameter_i32(
        glow::TEXTURE_2D,
        glow::TEXTURE_WRAP_T,
        glow::CLAMP_TO_EDGE as i32,
    );
    gl.tex_image_2d(
        glow::TEXTURE_2D,
        0,
        storage.internal_format(),
        width,
        height,
        0,
        glow::RGBA,
        storage.texel_type(),
        None,
    );

    let depth = if with_depth {
        match gl.create_renderbuffer() {
            Ok(rbo) => {
                gl.bind_renderbuffer(glow::RENDERBUFFER, Some(rbo));
                gl.renderbuffer_storage(glow::RENDERBUFFER, glow::DEPTH_COMPONENT16, width, height);
                Some(rbo)
            }
            Err(e) => {
                gl.bind_texture(glow::TEXTURE_2D, None);
                gl.delete_framebuffer(fbo);
                gl.delete_texture(tex);
                return Err(RenderError::GlCreate(format!(
                    "create_renderbuffer failed: {e:?}"
                )));
            }
        }
    } else {
        None
    };

    gl.bind_framebuffer(glow::FRAMEBUFFER, Some(fbo));
    gl.framebuffer_texture_2d(
        glow::FRAMEBUFFER,
        glow::COLOR_ATTACHMENT0,
        glow::TEXTURE_2D,
        Some(tex),
        0,
    );
    if let Some(rbo) = depth {
        gl.framebuffer_renderbuffer(
            glow::FRAMEBUFFER,
            glow::DEPTH_ATTACHMENT,
            glow::RENDERBUFFER,
            Some(rbo),
        );
    }

    let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);
    if status != glow::FRAMEBUFFER_COMPLETE {
        // clean up
        gl.bind_framebuffer(glow::FRAMEBUFFER, None);
        gl.bind_renderbuffer(glow::RENDERBUFFER, None);
        gl.bind_texture(glow::TEXTURE_2D, None);
        gl.delete_framebuffer(fbo);
        if let Some(rbo) = depth {
            gl.delete_renderbuffer(rbo);
        }
        gl.delete_texture(tex);
        return Err(RenderError::GlCreate(format!(
            "framebuffer incomplete: 0x{status:x}"
        )));
    }

    gl.bind_framebuffer(glow::FRAMEBUFFER, None);
    gl.bind_renderbuffer(glow::RENDERBUFFER, None);
    gl.bind_texture(glow::TEXTURE_2D, None);

    Ok(RenderTarget {
        framebuffer: Some(fbo),
        depth,
        color: Some(tex),
        width,
        height,
        storage,
    })
}

// -------------------------------------------------------------------------------------------------
// Program wrapper
// -------------------------------------------------------------------------------------------------

/// The closed set of uniform shapes the wrapper can push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformKind {
    Float,
    Int,
    Vec2,
    Vec3,
    Vec4,
    Mat3,
    Mat4,
}

/// One uniform value, parallel to its [`UniformDecl`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Mat3([f32; 9]),
    Mat4([f32; 16]),
}

impl UniformValue {
    pub fn kind(&self) -> UniformKind {
        match self {
            UniformValue::Float(_) => UniformKind::Float,
            UniformValue::Int(_) => UniformKind::Int,
            UniformValue::Vec2(_) => UniformKind::Vec2,
            UniformValue::Vec3(_) => UniformKind::Vec3,
            UniformValue::Vec4(_) => UniformKind::Vec4,
            UniformValue::Mat3(_) => UniformKind::Mat3,
            UniformValue::Mat4(_) => UniformKind::Mat4,
        }
    }
}

/// A vertex attribute the program consumes: name + components per vertex.
#[derive(Debug, Clone)]
pub struct VertexAttribute {
    pub name: String,
    pub components: i32,
}

impl VertexAttribute {
    pub fn new(name: impl Into<String>, components: i32) -> Self {
        Self {
            name: name.into(),
            components,
        }
    }
}

/// A uniform the program declares: name + shape.
#[derive(Debug, Clone)]
pub struct UniformDecl {
    pub name: String,
    pub kind: UniformKind,
}

impl UniformDecl {
    pub fn new(name: impl Into<String>, kind: UniformKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Everything needed to build a [`ShaderProgram`].
#[derive(Debug, Clone)]
pub struct ProgramDesc<'a> {
    pub vertex_src: &'a str,
    pub fragment_src: &'a str,
    pub attributes: Vec<VertexAttribute>,
    /// `None` = the program declares no uniforms; `push_uniforms` is then a
    /// no-op.
    pub uniforms: Option<Vec<UniformDecl>>,
    /// Vertex outputs to capture via transform feedback, used only when the
    /// context supports it.
    pub feedback_outputs: Option<Vec<String>>,
}

#[derive(Debug)]
struct AttributeSlot {
    components: i32,
    location: Option<u32>,
}

#[derive(Debug)]
struct UniformSlot {
    kind: UniformKind,
    location: Option<glow::NativeUniformLocation>,
}

/// A linked program bound to its declared vertex attributes and uniforms.
///
/// Either fully linked and usable, or construction fails — no partially
/// usable state is ever exposed. Names the linked program does not
/// recognize are warned about and left unresolved (shaders may legitimately
/// optimize declarations away); the slot is skipped at bind/push time.
#[derive(Debug)]
pub struct ShaderProgram {
    program: glow::NativeProgram,
    vao: glow::NativeVertexArray,
    attributes: Vec<AttributeSlot>,
    uniforms: Option<Vec<UniformSlot>>,
}

impl ShaderProgram {
    pub unsafe fn new(
        gl: &glow::Context,
        caps: &Capabilities,
        desc: &ProgramDesc<'_>,
    ) -> Result<Self, RenderError> {
        let vs = compile_shader(gl, desc.vertex_src, ShaderStage::Vertex)?;
        let fs = match compile_shader(gl, desc.fragment_src, ShaderStage::Fragment) {
            Ok(fs) => fs,
            Err(e) => {
                gl.delete_shader(vs);
                return Err(e);
            }
        };

        let program = match &desc.feedback_outputs {
            Some(outputs) if caps.transform_feedback => {
                let names: Vec<&str> = outputs.iter().map(String::as_str).collect();
                link_program_with_feedback(gl, vs, fs, &names)?
            }
            _ => link_program(gl, vs, fs)?,
        };

        let vao = match gl.create_vertex_array() {
            Ok(vao) => vao,
            Err(e) => {
                gl.delete_program(program);
                return Err(RenderError::GlCreate(format!(
                    "create_vertex_array failed: {e:?}"
                )));
            }
        };

        let attributes = desc
            .attributes
            .iter()
            .map(|attr| {
                let location = gl.get_attrib_location(program, &attr.name);
                if location.is_none() {
                    tracing::warn!(name = %attr.name, "attribute not found in linked program");
                }
                AttributeSlot {
                    components: attr.components,
                    location,
                }
            })
            .collect();

        let uniforms = desc.uniforms.as_ref().map(|decls| {
            decls
                .iter()
                .map(|decl| {
                    let location = gl.get_uniform_location(program, &decl.name);
                    if location.is_none() {
                        tracing::warn!(name = %decl.name, "uniform not found in linked program");
                    }
                    UniformSlot {
                        kind: decl.kind,
                        location,
                    }
                })
                .collect()
        });

        Ok(Self {
            program,
            vao,
            attributes,
            uniforms,
        })
    }

    /// Installs this program for subsequent draws.
    pub unsafe fn activate(&self, gl: &glow::Context) {
        gl.use_program(Some(self.program));
    }

    /// Binds one vertex buffer per declared attribute, plus an optional
    /// index buffer. Buffers hold tightly packed 32-bit float components.
    /// Unresolved attributes are skipped. The program's VAO stays bound for
    /// the draw that follows.
    ///
    /// # Panics
    ///
    /// Panics unless `vertex_buffers.len()` equals the declared attribute
    /// count.
    pub unsafe fn bind_buffers(
        &self,
        gl: &glow::Context,
        vertex_buffers: &[glow::NativeBuffer],
        index_buffer: Option<glow::NativeBuffer>,
    ) {
        check_attribute_batch(self.attributes.len(), vertex_buffers.len());
        gl.bind_vertex_array(Some(self.vao));
        for (slot, vbo) in self.attributes.iter().zip(vertex_buffers) {
            let Some(location) = slot.location else {
                continue;
            };
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(*vbo));
            gl.enable_vertex_attrib_array(location);
            gl.vertex_attrib_pointer_f32(location, slot.components, glow::FLOAT, false, 0, 0);
        }
        gl.bind_buffer(glow::ARRAY_BUFFER, None);
        if let Some(ibo) = index_buffer {
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ibo));
        }
    }

    /// Pushes one value per declared uniform, in declaration order; a no-op
    /// when the program declared none. Matrices are pushed without
    /// transposition. Unresolved uniforms are skipped.
    ///
    /// # Panics
    ///
    /// Panics when the value count differs from the declared count or when
    /// a value's shape differs from its declaration; nothing is dispatched
    /// before the checks pass.
    pub unsafe fn push_uniforms(&self, gl: &glow::Context, values: &[UniformValue]) {
        let Some(uniforms) = &self.uniforms else {
            return;
        };
        let declared: Vec<UniformKind> = uniforms.iter().map(|u| u.kind).collect();
        check_uniform_batch(&declared, values);

        for (slot, value) in uniforms.iter().zip(values) {
            let Some(location) = &slot.location else {
                continue;
            };
            match value {
                UniformValue::Float(v) => gl.uniform_1_f32(Some(location), *v),
                UniformValue::Int(v) => gl.uniform_1_i32(Some(location), *v),
                UniformValue::Vec2(v) => gl.uniform_2_f32(Some(location), v[0], v[1]),
                UniformValue::Vec3(v) => gl.uniform_3_f32(Some(location), v[0], v[1], v[2]),
                UniformValue::Vec4(v) => gl.uniform_4_f32(Some(location), v[0], v[1], v[2], v[3]),
                UniformValue::Mat3(v) => gl.uniform_matrix_3_f32_slice(Some(location), false, v),
                UniformValue::Mat4(v) => gl.uniform_matrix_4_f32_slice(Some(location), false, v),
            }
        }
    }

    /// Explicitly destroys the program and its VAO.
    pub unsafe fn destroy(&mut self, gl: &glow::Context) {
        gl.delete_program(self.program);
        gl.delete_vertex_array(self.vao);
    }
}

// -------------------------------------------------------------------------------------------------
// Batch contracts
// -------------------------------------------------------------------------------------------------

/// Contract check for [`ShaderProgram::bind_buffers`]: one vertex buffer
/// per declared attribute, verified before any binding happens.
///
/// # Panics
///
/// Panics on a count mismatch.
pub fn check_attribute_batch(declared: usize, supplied: usize) {
    assert_eq!(
        supplied, declared,
        "bind_buffers: {supplied} vertex buffers supplied for {declared} declared attributes"
    );
}

/// Contract check for [`ShaderProgram::push_uniforms`]: value count and
/// per-slot shape must match the declaration, verified before any dispatch
/// (a failing batch never partially updates).
///
/// # Panics
///
/// Panics on a count or shape mismatch.
pub fn check_uniform_batch(declared: &[UniformKind], values: &[UniformValue]) {
    assert_eq!(
        values.len(),
        declared.len(),
        "push_uniforms: {} values supplied for {} declared uniforms",
        values.len(),
        declared.len()
    );
    for (i, (kind, value)) in declared.iter().zip(values).enumerate() {
        assert!(
            value.kind() == *kind,
            "push_uniforms: value {i} is {:?} but was declared {:?}",
            value.kind(),
            *kind
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_values_report_their_shape() {
        assert_eq!(UniformValue::Float(1.0).kind(), UniformKind::Float);
        assert_eq!(UniformValue::Int(2).kind(), UniformKind::Int);
        assert_eq!(UniformValue::Vec2([0.0; 2]).kind(), UniformKind::Vec2);
        assert_eq!(UniformValue::Vec3([0.0; 3]).kind(), UniformKind::Vec3);
        assert_eq!(UniformValue::Vec4([0.0; 4]).kind(), UniformKind::Vec4);
        assert_eq!(UniformValue::Mat3([0.0; 9]).kind(), UniformKind::Mat3);
        assert_eq!(UniformValue::Mat4([0.0; 16]).kind(), UniformKind::Mat4);
    }

    #[test]
    fn uniform_batch_accepts_matching_declarations() {
        let declared = [UniformKind::Float, UniformKind::Vec2, UniformKind::Mat4];
        let values = [
            UniformValue::Float(0.5),
            UniformValue::Vec2([1.0, -1.0]),
            UniformValue::Mat4([0.0; 16]),
        ];
        check_uniform_batch(&declared, &values);
    }

    #[test]
    fn empty_uniform_batch_is_valid() {
        check_uniform_batch(&[], &[]);
    }

    #[test]
    #[should_panic(expected = "push_uniforms")]
    fn uniform_batch_rejects_count_mismatch() {
        let declared = [UniformKind::Float, UniformKind::Vec2];
        let values = [UniformValue::Float(0.5)];
        check_uniform_batch(&declared, &values);
    }

    #[test]
    #[should_panic(expected = "push_uniforms")]
    fn uniform_batch_rejects_shape_mismatch() {
        let declared = [UniformKind::Vec3];
        let values = [UniformValue::Vec2([0.0, 0.0])];
        check_uniform_batch(&declared, &values);
    }

    #[test]
    fn attribute_batch_accepts_matching_counts() {
        check_attribute_batch(2, 2);
        check_attribute_batch(0, 0);
    }

    #[test]
    #[should_panic(expected = "bind_buffers")]
    fn attribute_batch_rejects_count_mismatch() {
        check_attribute_batch(2, 1);
    }

    #[test]
    fn capabilities_default_to_unsupported() {
        let caps = Capabilities::default();
        assert!(!caps.uint32_indices);
        assert!(!caps.float_textures);
        assert!(!caps.half_float_textures);
        assert!(!caps.transform_feedback);
        assert!(!caps.is_embedded);
    }

    #[test]
    fn storage_formats_line_up_with_texel_types() {
        assert_eq!(TargetStorage::Fixed.texel_type(), glow::UNSIGNED_BYTE);
        assert_eq!(TargetStorage::HalfFloat.texel_type(), glow::HALF_FLOAT);
        assert_eq!(TargetStorage::FullFloat.texel_type(), glow::FLOAT);
        assert_eq!(TargetStorage::Fixed.internal_format(), glow::RGBA8 as i32);
        assert_eq!(
            TargetStorage::HalfFloat.internal_format(),
            glow::RGBA16F as i32
        );
        assert_eq!(
            TargetStorage::FullFloat.internal_format(),
            glow::RGBA32F as i32
        );
    }
}
