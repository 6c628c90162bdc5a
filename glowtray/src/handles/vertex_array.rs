//! 参照カウンタで管理して、参照がすべて破棄された際に
//! VertexArrayの破棄の処理まで行うVertexArrayHandleを定義する。

use anyhow::Result;
use glow::HasContext;
use std::{cell::Cell, fmt::Debug, ops::Deref, ptr::NonNull};

struct VertexArrayHandleData {
    context: crate::ContextHandle,
    vertex_array: glow::VertexArray,
    ref_count: Cell<usize>,
}
impl VertexArrayHandleData {
    fn new(context: crate::ContextHandle) -> Result<Self> {
        // create vertex array
        let vertex_array = unsafe { context.context().create_vertex_array() }
            .map_err(anyhow::Error::msg)?;

        Ok(Self {
            context,
            vertex_array,
            ref_count: Cell::new(1),
        })
    }
}

/// glow::VertexArrayを参照カウントで管理するためのハンドル
///
/// GLES2のコンテキストではVAOが無いので作成に失敗することがある。
pub struct VertexArrayHandle {
    ptr: NonNull<VertexArrayHandleData>,
}
impl VertexArrayHandle {
    pub(crate) fn new(context_handle: crate::ContextHandle) -> Result<Self> {
        let data = Box::new(VertexArrayHandleData::new(context_handle)?);
        let ptr = unsafe { NonNull::new_unchecked(Box::into_raw(data)) };
        Ok(Self { ptr })
    }

    // VertexArrayの関数

    /// bindする
    pub fn bind(&self) {
        unsafe {
            self.data()
                .context
                .bind_vertex_array(Some(self.data().vertex_array))
        }
    }

    // raw

    /// ContextHandleを取得する
    pub fn context(&self) -> crate::ContextHandle {
        self.data().context.clone()
    }

    /// glow::VertexArrayを取得する
    /// ## Safety
    /// 参照カウントの管理から中身を取り出すので注意。
    /// Handleが破棄されると、この関数で取り出したglow::VertexArrayは無効になる。
    pub unsafe fn vertex_array_raw(&self) -> glow::VertexArray {
        self.data().vertex_array
    }

    fn data(&self) -> &VertexArrayHandleData {
        unsafe { self.ptr.as_ref() }
    }
}

// Debugトレイトの実装
impl Debug for VertexArrayHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VertexArrayHandle").finish()
    }
}

// VertexArrayHandleはglow::VertexArrayにDerefする
impl Deref for VertexArrayHandle {
    type Target = glow::VertexArray;
    fn deref(&self) -> &Self::Target {
        &self.data().vertex_array
    }
}

// Cloneで参照カウントを増やす
impl Clone for VertexArrayHandle {
    fn clone(&self) -> Self {
        let count = self.data().ref_count.get();
        if count > usize::MAX / 2 {
            panic!("Too many references to VertexArrayHandle");
        }
        self.data().ref_count.set(count + 1);
        Self { ptr: self.ptr }
    }
}

// Drop時に参照カウントを減らし、0になったら破棄する
impl Drop for VertexArrayHandle {
    fn drop(&mut self) {
        let count = self.data().ref_count.get() - 1;
        self.data().ref_count.set(count);
        if count == 0 {
            unsafe {
                let data = Box::from_raw(self.ptr.as_ptr());

                // vertex arrayの破棄
                data.context.delete_vertex_array(data.vertex_array);
            }
        }
    }
}
