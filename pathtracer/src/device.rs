//! レンダラーが使うグラフィックスAPIの窓口

use crate::error::{RendererError, Result};

/// `create_program`の結果
///
/// コンパイルやリンクに失敗してもprogramは返ってくる。
/// 失敗の情報は`diagnostics`に入っていて、呼び出し側はログに出すだけで続行する。
pub struct CompiledProgram<P> {
    pub program: P,
    pub diagnostics: Vec<RendererError>,
}

/// レンダラーがGPUに対して行う操作
///
/// `Program`と`Target`はdropされたときにGPUのオブジェクトを解放する。
pub trait GraphicsDevice {
    type Program;
    type Target;
    type Location;

    /// width x heightの色の描画先を作成する。中身は0で埋められている。
    fn create_color_target(&mut self, width: u32, height: u32) -> Result<Self::Target>;

    /// vertex shaderとfragment shaderをコンパイルしてリンクする。
    ///
    /// シェーダーのエラーで`Err`を返すことはない。
    /// `Err`になるのはGPUのオブジェクト自体が作れなかったとき。
    fn create_program(
        &mut self,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<CompiledProgram<Self::Program>>;

    /// 最適化で消えたuniformは`None`になる
    fn uniform_location(&self, program: &Self::Program, name: &str) -> Option<Self::Location>;

    fn use_program(&mut self, program: &Self::Program);
    fn set_uniform_1f(&mut self, location: &Self::Location, value: f32);
    fn set_uniform_3f(&mut self, location: &Self::Location, value: glam::Vec3);
    fn set_uniform_4f(&mut self, location: &Self::Location, value: glam::Vec4);

    fn bind_target_for_write(&mut self, target: &Self::Target);
    fn bind_default_display_target(&mut self);
    /// テクスチャユニット0にtargetをbindする
    fn bind_source_texture(&mut self, target: &Self::Target);

    fn set_viewport(&mut self, width: u32, height: u32);
    fn clear(&mut self, color: glam::Vec4);
    fn draw_full_screen_quad(&mut self);

    fn max_texture_size(&self) -> u32;
}
