use anyhow::Result;
use glow::HasContext;

/// 画面全体を覆うtriangle stripの頂点
const QUAD_VERTICES: [f32; 8] = [
    -1.0, -1.0, //
    -1.0, 1.0, //
    1.0, -1.0, //
    1.0, 1.0, //
];

/// フルスクリーンquadの頂点バッファ
pub struct FullScreenQuad {
    /// 頂点バッファ
    pub buffer: crate::BufferHandle,
    /// GLES2ではVAOが作れないのでOption
    pub vertex_array: Option<crate::VertexArrayHandle>,
    /// 頂点座標のattributeのlocation
    pub attribute: u32,
}

/// フルスクリーンquadの頂点バッファを作成する関数
pub fn create_full_screen_quad(
    context: &crate::ContextHandle,
    attribute: u32,
) -> Result<FullScreenQuad> {
    let vertex_array = match context.create_vertex_array() {
        Ok(vertex_array) => Some(vertex_array),
        Err(err) => {
            log::debug!("vertex array is not available: {err}");
            None
        }
    };
    if let Some(vertex_array) = &vertex_array {
        vertex_array.bind();
    }

    let buffer = context.create_buffer()?;
    buffer.bind_array();
    buffer.upload_static(&QUAD_VERTICES);

    Ok(FullScreenQuad {
        buffer,
        vertex_array,
        attribute,
    })
}

impl FullScreenQuad {
    /// 現在bindされているprogramとframebufferでquadを描画する
    pub fn draw(&self, context: &crate::ContextHandle) {
        if let Some(vertex_array) = &self.vertex_array {
            vertex_array.bind();
        }
        self.buffer.bind_array();
        unsafe {
            context.enable_vertex_attrib_array(self.attribute);
            context.vertex_attrib_pointer_f32(self.attribute, 2, glow::FLOAT, false, 0, 0);
            context.draw_arrays(glow::TRIANGLE_STRIP, 0, 4);
        }
    }
}
