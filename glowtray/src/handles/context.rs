//! 参照カウンタで管理して、参照がすべて破棄された際に
//! glow::Contextの破棄の処理まで行うContextHandleを定義する。

use anyhow::Result;
use glow::HasContext;
use std::{cell::Cell, fmt::Debug, ops::Deref, ptr::NonNull};

struct ContextHandleData {
    context: glow::Context,
    ref_count: Cell<usize>,
}

/// glow::Contextを参照カウントで管理するためのハンドル
pub struct ContextHandle {
    ptr: NonNull<ContextHandleData>,
}
impl ContextHandle {
    /// ホスト側で作成してcurrentにしたglow::Contextからハンドルを作成する
    pub fn new(context: glow::Context) -> Self {
        let data = Box::new(ContextHandleData {
            context,
            ref_count: Cell::new(1),
        });
        let ptr = unsafe { NonNull::new_unchecked(Box::into_raw(data)) };
        Self { ptr }
    }

    // create系

    /// ShaderHandleを作成してソースをコンパイルする
    pub fn create_shader(&self, shader_type: u32, source: &str) -> Result<crate::ShaderHandle> {
        crate::ShaderHandle::new(self.clone(), shader_type, source)
    }

    /// ProgramHandleを作成する
    pub fn create_program(&self) -> Result<crate::ProgramHandle> {
        crate::ProgramHandle::new(self.clone())
    }

    /// TextureHandleを作成する
    pub fn create_texture(&self) -> Result<crate::TextureHandle> {
        crate::TextureHandle::new(self.clone())
    }

    /// FramebufferHandleを作成する
    pub fn create_framebuffer(&self) -> Result<crate::FramebufferHandle> {
        crate::FramebufferHandle::new(self.clone())
    }

    /// BufferHandleを作成する
    pub fn create_buffer(&self) -> Result<crate::BufferHandle> {
        crate::BufferHandle::new(self.clone())
    }

    /// VertexArrayHandleを作成する
    pub fn create_vertex_array(&self) -> Result<crate::VertexArrayHandle> {
        crate::VertexArrayHandle::new(self.clone())
    }

    // 情報取得系

    /// 作成できるテクスチャの一辺の最大サイズ
    pub fn max_texture_size(&self) -> u32 {
        let size = unsafe { self.context().get_parameter_i32(glow::MAX_TEXTURE_SIZE) };
        size.max(0) as u32
    }

    /// OpenGL ESのコンテキストかどうか
    pub fn is_embedded(&self) -> bool {
        self.context().version().is_embedded
    }

    /// 拡張機能が使えるかどうか
    pub fn has_extension(&self, name: &str) -> bool {
        self.context().supported_extensions().contains(name)
    }

    // raw

    /// glow::Contextを取得する
    pub fn context(&self) -> &glow::Context {
        &self.data().context
    }

    fn data(&self) -> &ContextHandleData {
        unsafe { self.ptr.as_ref() }
    }
}

// Debugトレイトの実装
impl Debug for ContextHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let version = self.context().version();
        f.debug_struct("ContextHandle")
            .field("major", &version.major)
            .field("minor", &version.minor)
            .field("is_embedded", &version.is_embedded)
            .finish()
    }
}

// ContextHandleはglow::ContextにDerefする
impl Deref for ContextHandle {
    type Target = glow::Context;
    fn deref(&self) -> &Self::Target {
        &self.data().context
    }
}

// Cloneで参照カウントを増やす
impl Clone for ContextHandle {
    fn clone(&self) -> Self {
        let count = self.data().ref_count.get();
        if count > usize::MAX / 2 {
            panic!("Too many references to ContextHandle");
        }
        self.data().ref_count.set(count + 1);
        Self { ptr: self.ptr }
    }
}

// Drop時に参照カウントを減らし、0になったら破棄する
impl Drop for ContextHandle {
    fn drop(&mut self) {
        let count = self.data().ref_count.get() - 1;
        self.data().ref_count.set(count);
        if count == 0 {
            unsafe {
                // GLのコンテキスト自体はホストのものなので、ここではローダーだけを破棄する
                drop(Box::from_raw(self.ptr.as_ptr()));
            }
        }
    }
}
