//! 参照カウンタで管理して、参照がすべて破棄された際に
//! Shaderの破棄の処理まで行うShaderHandleを定義する。

use anyhow::Result;
use glow::HasContext;
use std::{cell::Cell, fmt::Debug, ops::Deref, ptr::NonNull};

struct ShaderHandleData {
    context: crate::ContextHandle,
    shader: glow::Shader,
    shader_type: u32,
    ref_count: Cell<usize>,
}
impl ShaderHandleData {
    fn new(context: crate::ContextHandle, shader_type: u32, source: &str) -> Result<Self> {
        // create shader
        let shader = unsafe { context.context().create_shader(shader_type) }
            .map_err(anyhow::Error::msg)?;

        // compile
        unsafe {
            context.shader_source(shader, source);
            context.compile_shader(shader);
        }

        Ok(Self {
            context,
            shader,
            shader_type,
            ref_count: Cell::new(1),
        })
    }
}

/// glow::Shaderを参照カウントで管理するためのハンドル
///
/// コンパイルに失敗してもハンドル自体は作成される。
/// 成否は`compile_status`と`info_log`で確認する。
pub struct ShaderHandle {
    ptr: NonNull<ShaderHandleData>,
}
impl ShaderHandle {
    pub(crate) fn new(
        context_handle: crate::ContextHandle,
        shader_type: u32,
        source: &str,
    ) -> Result<Self> {
        let data = Box::new(ShaderHandleData::new(context_handle, shader_type, source)?);
        let ptr = unsafe { NonNull::new_unchecked(Box::into_raw(data)) };
        Ok(Self { ptr })
    }

    // Shaderの関数

    /// コンパイルが成功したかどうか
    pub fn compile_status(&self) -> bool {
        unsafe { self.data().context.get_shader_compile_status(self.data().shader) }
    }

    /// コンパイラのログを取得する
    pub fn info_log(&self) -> String {
        unsafe { self.data().context.get_shader_info_log(self.data().shader) }
    }

    /// glow::VERTEX_SHADERなどのシェーダーの種類
    pub fn shader_type(&self) -> u32 {
        self.data().shader_type
    }

    // raw

    /// ContextHandleを取得する
    pub fn context(&self) -> crate::ContextHandle {
        self.data().context.clone()
    }

    /// glow::Shaderを取得する
    /// ## Safety
    /// 参照カウントの管理から中身を取り出すので注意。
    /// Handleが破棄されると、この関数で取り出したglow::Shaderは無効になる。
    pub unsafe fn shader_raw(&self) -> glow::Shader {
        self.data().shader
    }

    fn data(&self) -> &ShaderHandleData {
        unsafe { self.ptr.as_ref() }
    }
}

// Debugトレイトの実装
impl Debug for ShaderHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderHandle")
            .field("shader_type", &self.data().shader_type)
            .finish()
    }
}

// ShaderHandleはglow::ShaderにDerefする
impl Deref for ShaderHandle {
    type Target = glow::Shader;
    fn deref(&self) -> &Self::Target {
        &self.data().shader
    }
}

// Cloneで参照カウントを増やす
impl Clone for ShaderHandle {
    fn clone(&self) -> Self {
        let count = self.data().ref_count.get();
        if count > usize::MAX / 2 {
            panic!("Too many references to ShaderHandle");
        }
        self.data().ref_count.set(count + 1);
        Self { ptr: self.ptr }
    }
}

// Drop時に参照カウントを減らし、0になったら破棄する
impl Drop for ShaderHandle {
    fn drop(&mut self) {
        let count = self.data().ref_count.get() - 1;
        self.data().ref_count.set(count);
        if count == 0 {
            unsafe {
                let data = Box::from_raw(self.ptr.as_ptr());

                // shaderの破棄
                data.context.delete_shader(data.shader);
            }
        }
    }
}
