//! GLの各Objectを参照カウンタで管理して、参照がすべて破棄された際に
//! 自動で各種delete処理を行うようにしたラッパーの構造体の各種Handleを用意している。

mod context;
pub use context::ContextHandle;
mod shader;
pub use shader::ShaderHandle;
mod program;
pub use program::ProgramHandle;
mod texture;
pub use texture::TextureHandle;
mod framebuffer;
pub use framebuffer::FramebufferHandle;
mod buffer;
pub use buffer::BufferHandle;
mod vertex_array;
pub use vertex_array::VertexArrayHandle;
