//! 参照カウンタで管理して、参照がすべて破棄された際に
//! Bufferの破棄の処理まで行うBufferHandleを定義する。

use anyhow::Result;
use glow::HasContext;
use std::{cell::Cell, fmt::Debug, ops::Deref, ptr::NonNull};

struct BufferHandleData {
    context: crate::ContextHandle,
    buffer: glow::Buffer,
    ref_count: Cell<usize>,
}
impl BufferHandleData {
    fn new(context: crate::ContextHandle) -> Result<Self> {
        // create buffer
        let buffer = unsafe { context.context().create_buffer() }
            .map_err(anyhow::Error::msg)?;

        Ok(Self {
            context,
            buffer,
            ref_count: Cell::new(1),
        })
    }
}

/// glow::Bufferを参照カウントで管理するためのハンドル
pub struct BufferHandle {
    ptr: NonNull<BufferHandleData>,
}
impl BufferHandle {
    pub(crate) fn new(context_handle: crate::ContextHandle) -> Result<Self> {
        let data = Box::new(BufferHandleData::new(context_handle)?);
        let ptr = unsafe { NonNull::new_unchecked(Box::into_raw(data)) };
        Ok(Self { ptr })
    }

    // Bufferの関数

    /// ARRAY_BUFFERにbindする
    pub fn bind_array(&self) {
        unsafe {
            self.data()
                .context
                .bind_buffer(glow::ARRAY_BUFFER, Some(self.data().buffer))
        }
    }

    /// ARRAY_BUFFERにデータをSTATIC_DRAWでアップロードする
    /// 呼び出し前に`bind_array`しておく必要がある。
    pub fn upload_static<T: bytemuck::Pod>(&self, data: &[T]) {
        unsafe {
            self.data().context.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(data),
                glow::STATIC_DRAW,
            );
        }
    }

    // raw

    /// ContextHandleを取得する
    pub fn context(&self) -> crate::ContextHandle {
        self.data().context.clone()
    }

    /// glow::Bufferを取得する
    /// ## Safety
    /// 参照カウントの管理から中身を取り出すので注意。
    /// Handleが破棄されると、この関数で取り出したglow::Bufferは無効になる。
    pub unsafe fn buffer_raw(&self) -> glow::Buffer {
        self.data().buffer
    }

    fn data(&self) -> &BufferHandleData {
        unsafe { self.ptr.as_ref() }
    }
}

// Debugトレイトの実装
impl Debug for BufferHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferHandle").finish()
    }
}

// BufferHandleはglow::BufferにDerefする
impl Deref for BufferHandle {
    type Target = glow::Buffer;
    fn deref(&self) -> &Self::Target {
        &self.data().buffer
    }
}

// Cloneで参照カウントを増やす
impl Clone for BufferHandle {
    fn clone(&self) -> Self {
        let count = self.data().ref_count.get();
        if count > usize::MAX / 2 {
            panic!("Too many references to BufferHandle");
        }
        self.data().ref_count.set(count + 1);
        Self { ptr: self.ptr }
    }
}

// Drop時に参照カウントを減らし、0になったら破棄する
impl Drop for BufferHandle {
    fn drop(&mut self) {
        let count = self.data().ref_count.get() - 1;
        self.data().ref_count.set(count);
        if count == 0 {
            unsafe {
                let data = Box::from_raw(self.ptr.as_ptr());

                // bufferの破棄
                data.context.delete_buffer(data.buffer);
            }
        }
    }
}
