use anyhow::{bail, Result};
use glow::HasContext;

/// 描画先textureのフォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFormat {
    /// 8bit RGBA
    Rgba8,
    /// half float RGBA
    Rgba16F,
}
impl ColorFormat {
    /// コンテキストがhalf floatのtextureに描画できるならRgba16Fを、そうでなければRgba8を選ぶ
    pub fn detect(context: &crate::ContextHandle) -> Self {
        let version = context.version();
        let float_renderable = if context.is_embedded() {
            version.major >= 3
                && (context.has_extension("GL_EXT_color_buffer_half_float")
                    || context.has_extension("GL_EXT_color_buffer_float"))
        } else {
            version.major >= 3
        };
        if float_renderable {
            ColorFormat::Rgba16F
        } else {
            ColorFormat::Rgba8
        }
    }

    /// (internal_format, format, type)
    fn gl_formats(self) -> (u32, u32, u32) {
        match self {
            ColorFormat::Rgba8 => (glow::RGBA, glow::RGBA, glow::UNSIGNED_BYTE),
            ColorFormat::Rgba16F => (glow::RGBA16F, glow::RGBA, glow::HALF_FLOAT),
        }
    }
}

/// 描画先として使うtextureとframebufferをまとめた構造体
pub struct ColorTarget {
    /// TextureHandle
    pub texture: crate::TextureHandle,
    /// FramebufferHandle
    pub framebuffer: crate::FramebufferHandle,
    /// 幅
    pub width: u32,
    /// 高さ
    pub height: u32,
    /// フォーマット
    pub format: ColorFormat,
}

/// 2Dの描画先textureとそれを接続したframebufferを作成する関数
pub fn create_color_target(
    context: &crate::ContextHandle,
    width: u32,
    height: u32,
    format: ColorFormat,
) -> Result<ColorTarget> {
    // textureの作成
    let texture = context.create_texture()?;
    texture.bind_2d();
    texture.set_sampling(glow::LINEAR, glow::NEAREST, glow::CLAMP_TO_EDGE);
    let (internal_format, pixel_format, ty) = format.gl_formats();
    texture.allocate_2d(internal_format, width, height, pixel_format, ty);

    // framebufferの作成とtextureの接続
    let framebuffer = context.create_framebuffer()?;
    framebuffer.bind();
    framebuffer.attach_color_texture(&texture);
    let status = framebuffer.status();

    unsafe {
        // 0で埋めておく
        context.clear_color(0.0, 0.0, 0.0, 0.0);
        context.clear(glow::COLOR_BUFFER_BIT);

        context.bind_framebuffer(glow::FRAMEBUFFER, None);
        context.bind_texture(glow::TEXTURE_2D, None);
    }

    if status != glow::FRAMEBUFFER_COMPLETE {
        bail!(
            "Framebuffer is not complete: status 0x{:X} ({}x{}, {:?})",
            status,
            width,
            height,
            format
        );
    }

    Ok(ColorTarget {
        texture,
        framebuffer,
        width,
        height,
        format,
    })
}
