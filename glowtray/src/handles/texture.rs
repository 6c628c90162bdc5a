//! 参照カウンタで管理して、参照がすべて破棄された際に
//! Textureの破棄の処理まで行うTextureHandleを定義する。

use anyhow::Result;
use glow::HasContext;
use std::{cell::Cell, fmt::Debug, ops::Deref, ptr::NonNull};

struct TextureHandleData {
    context: crate::ContextHandle,
    texture: glow::Texture,
    ref_count: Cell<usize>,
}
impl TextureHandleData {
    fn new(context: crate::ContextHandle) -> Result<Self> {
        // create texture
        let texture = unsafe { context.context().create_texture() }
            .map_err(anyhow::Error::msg)?;

        Ok(Self {
            context,
            texture,
            ref_count: Cell::new(1),
        })
    }
}

/// glow::Textureを参照カウントで管理するためのハンドル
pub struct TextureHandle {
    ptr: NonNull<TextureHandleData>,
}
impl TextureHandle {
    pub(crate) fn new(context_handle: crate::ContextHandle) -> Result<Self> {
        let data = Box::new(TextureHandleData::new(context_handle)?);
        let ptr = unsafe { NonNull::new_unchecked(Box::into_raw(data)) };
        Ok(Self { ptr })
    }

    // Textureの関数

    /// TEXTURE_2Dにbindする
    pub fn bind_2d(&self) {
        unsafe {
            self.data()
                .context
                .bind_texture(glow::TEXTURE_2D, Some(self.data().texture))
        }
    }

    /// 中身を指定せずに2Dのストレージを確保する
    /// 呼び出し前に`bind_2d`しておく必要がある。
    pub fn allocate_2d(
        &self,
        internal_format: u32,
        width: u32,
        height: u32,
        format: u32,
        ty: u32,
    ) {
        unsafe {
            self.data().context.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                internal_format as i32,
                width as i32,
                height as i32,
                0,
                format,
                ty,
                glow::PixelUnpackData::Slice(None),
            );
        }
    }

    /// フィルタとラップモードを設定する
    /// 呼び出し前に`bind_2d`しておく必要がある。
    pub fn set_sampling(&self, mag_filter: u32, min_filter: u32, wrap: u32) {
        let context = &self.data().context;
        unsafe {
            context.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, mag_filter as i32);
            context.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, min_filter as i32);
            context.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, wrap as i32);
            context.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, wrap as i32);
        }
    }

    // raw

    /// ContextHandleを取得する
    pub fn context(&self) -> crate::ContextHandle {
        self.data().context.clone()
    }

    /// glow::Textureを取得する
    /// ## Safety
    /// 参照カウントの管理から中身を取り出すので注意。
    /// Handleが破棄されると、この関数で取り出したglow::Textureは無効になる。
    pub unsafe fn texture_raw(&self) -> glow::Texture {
        self.data().texture
    }

    fn data(&self) -> &TextureHandleData {
        unsafe { self.ptr.as_ref() }
    }
}

// Debugトレイトの実装
impl Debug for TextureHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureHandle").finish()
    }
}

// TextureHandleはglow::TextureにDerefする
impl Deref for TextureHandle {
    type Target = glow::Texture;
    fn deref(&self) -> &Self::Target {
        &self.data().texture
    }
}

// Cloneで参照カウントを増やす
impl Clone for TextureHandle {
    fn clone(&self) -> Self {
        let count = self.data().ref_count.get();
        if count > usize::MAX / 2 {
            panic!("Too many references to TextureHandle");
        }
        self.data().ref_count.set(count + 1);
        Self { ptr: self.ptr }
    }
}

// Drop時に参照カウントを減らし、0になったら破棄する
impl Drop for TextureHandle {
    fn drop(&mut self) {
        let count = self.data().ref_count.get() - 1;
        self.data().ref_count.set(count);
        if count == 0 {
            unsafe {
                let data = Box::from_raw(self.ptr.as_ptr());

                // textureの破棄
                data.context.delete_texture(data.texture);
            }
        }
    }
}
