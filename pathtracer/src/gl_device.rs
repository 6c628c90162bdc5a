//! glowtrayのHandleを使ったGraphicsDeviceの実装

use glow::HasContext;
use glowtray::utils::{ColorFormat, ColorTarget, FullScreenQuad, ProgramDiagnostic};

use crate::{
    device::{CompiledProgram, GraphicsDevice},
    error::{RendererError, Result},
    shader::VERTEX_ATTRIBUTE,
};

/// OpenGL (ES) のコンテキストでレンダラーを動かすためのデバイス
///
/// シェーダーは`#version 100`のGLSL ESで書かれている。
/// OpenGL ES 2.0以上とWebGLではそのまま動き、デスクトップのGLでは
/// 4.1以上か`GL_ARB_ES2_compatibility`が必要。
/// コンテキストはホスト側で作成してcurrentにしておく必要がある。
pub struct GlDevice {
    context: glowtray::ContextHandle,
    quad: FullScreenQuad,
    format: ColorFormat,
}
impl GlDevice {
    pub fn new(context: glow::Context) -> Result<Self> {
        Self::from_handle(glowtray::ContextHandle::new(context))
    }

    pub fn from_handle(context: glowtray::ContextHandle) -> Result<Self> {
        if !accepts_glsl_es_100(&context) {
            return Err(RendererError::Device(format!(
                "GLSL ES 1.00 shaders are not supported by {context:?}"
            )));
        }

        let quad = glowtray::utils::create_full_screen_quad(&context, VERTEX_ATTRIBUTE.0)?;
        let format = ColorFormat::detect(&context);
        log::info!("{:?}, accumulation format {:?}", context, format);
        glowtray::utils::check_error(&context, "create_full_screen_quad");

        Ok(Self {
            context,
            quad,
            format,
        })
    }

    pub fn context(&self) -> &glowtray::ContextHandle {
        &self.context
    }

    pub fn color_format(&self) -> ColorFormat {
        self.format
    }
}

impl GraphicsDevice for GlDevice {
    type Program = glowtray::ProgramHandle;
    type Target = ColorTarget;
    type Location = glow::UniformLocation;

    fn create_color_target(&mut self, width: u32, height: u32) -> Result<Self::Target> {
        let target =
            glowtray::utils::create_color_target(&self.context, width, height, self.format)?;
        glowtray::utils::check_error(&self.context, "create_color_target");
        Ok(target)
    }

    fn create_program(
        &mut self,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<CompiledProgram<Self::Program>> {
        let build = glowtray::utils::compile_program(
            &self.context,
            vertex_source,
            fragment_source,
            &[VERTEX_ATTRIBUTE],
        )?;
        glowtray::utils::check_error(&self.context, "create_program");

        let diagnostics = build
            .diagnostics
            .into_iter()
            .map(|diagnostic| match diagnostic {
                ProgramDiagnostic::Compile { stage, log } => {
                    RendererError::ShaderCompile { stage, log }
                }
                ProgramDiagnostic::Link { log } => RendererError::ShaderLink { log },
            })
            .collect();
        Ok(CompiledProgram {
            program: build.program,
            diagnostics,
        })
    }

    fn uniform_location(&self, program: &Self::Program, name: &str) -> Option<Self::Location> {
        program.uniform_location(name)
    }

    fn use_program(&mut self, program: &Self::Program) {
        glowtray::utils::use_program(&self.context, Some(program));
    }

    fn set_uniform_1f(&mut self, location: &Self::Location, value: f32) {
        unsafe { self.context.uniform_1_f32(Some(location), value) }
    }

    fn set_uniform_3f(&mut self, location: &Self::Location, value: glam::Vec3) {
        unsafe {
            self.context
                .uniform_3_f32(Some(location), value.x, value.y, value.z)
        }
    }

    fn set_uniform_4f(&mut self, location: &Self::Location, value: glam::Vec4) {
        unsafe {
            self.context
                .uniform_4_f32(Some(location), value.x, value.y, value.z, value.w)
        }
    }

    fn bind_target_for_write(&mut self, target: &Self::Target) {
        target.framebuffer.bind();
    }

    fn bind_default_display_target(&mut self) {
        unsafe { self.context.bind_framebuffer(glow::FRAMEBUFFER, None) }
    }

    fn bind_source_texture(&mut self, target: &Self::Target) {
        unsafe { self.context.active_texture(glow::TEXTURE0) };
        target.texture.bind_2d();
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        unsafe { self.context.viewport(0, 0, width as i32, height as i32) }
    }

    fn clear(&mut self, color: glam::Vec4) {
        unsafe {
            self.context.clear_color(color.x, color.y, color.z, color.w);
            self.context.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    fn draw_full_screen_quad(&mut self) {
        self.quad.draw(&self.context);
        glowtray::utils::check_error(&self.context, "draw_full_screen_quad");
    }

    fn max_texture_size(&self) -> u32 {
        self.context.max_texture_size()
    }
}

/// `#version 100`のシェーダーをコンパイルできるコンテキストかどうか
fn accepts_glsl_es_100(context: &glowtray::ContextHandle) -> bool {
    let version = context.version();
    version.is_embedded
        || (version.major, version.minor) >= (4, 1)
        || context.has_extension("GL_ARB_ES2_compatibility")
}
