//! 参照カウンタで管理して、参照がすべて破棄された際に
//! Framebufferの破棄の処理まで行うFramebufferHandleを定義する。

use anyhow::Result;
use glow::HasContext;
use std::{cell::Cell, fmt::Debug, ops::Deref, ptr::NonNull};

struct FramebufferHandleData {
    context: crate::ContextHandle,
    framebuffer: glow::Framebuffer,
    ref_count: Cell<usize>,
}
impl FramebufferHandleData {
    fn new(context: crate::ContextHandle) -> Result<Self> {
        // create framebuffer
        let framebuffer = unsafe { context.context().create_framebuffer() }
            .map_err(anyhow::Error::msg)?;

        Ok(Self {
            context,
            framebuffer,
            ref_count: Cell::new(1),
        })
    }
}

/// glow::Framebufferを参照カウントで管理するためのハンドル
pub struct FramebufferHandle {
    ptr: NonNull<FramebufferHandleData>,
}
impl FramebufferHandle {
    pub(crate) fn new(context_handle: crate::ContextHandle) -> Result<Self> {
        let data = Box::new(FramebufferHandleData::new(context_handle)?);
        let ptr = unsafe { NonNull::new_unchecked(Box::into_raw(data)) };
        Ok(Self { ptr })
    }

    // Framebufferの関数

    /// FRAMEBUFFERにbindする
    pub fn bind(&self) {
        unsafe {
            self.data()
                .context
                .bind_framebuffer(glow::FRAMEBUFFER, Some(self.data().framebuffer))
        }
    }

    /// COLOR_ATTACHMENT0にtextureを接続する
    /// 呼び出し前に`bind`しておく必要がある。
    pub fn attach_color_texture(&self, texture: &crate::TextureHandle) {
        unsafe {
            self.data().context.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::TEXTURE_2D,
                Some(**texture),
                0,
            );
        }
    }

    /// framebufferの完全性を確認する
    /// 呼び出し前に`bind`しておく必要がある。
    pub fn status(&self) -> u32 {
        unsafe {
            self.data()
                .context
                .check_framebuffer_status(glow::FRAMEBUFFER)
        }
    }

    // raw

    /// ContextHandleを取得する
    pub fn context(&self) -> crate::ContextHandle {
        self.data().context.clone()
    }

    /// glow::Framebufferを取得する
    /// ## Safety
    /// 参照カウントの管理から中身を取り出すので注意。
    /// Handleが破棄されると、この関数で取り出したglow::Framebufferは無効になる。
    pub unsafe fn framebuffer_raw(&self) -> glow::Framebuffer {
        self.data().framebuffer
    }

    fn data(&self) -> &FramebufferHandleData {
        unsafe { self.ptr.as_ref() }
    }
}

// Debugトレイトの実装
impl Debug for FramebufferHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FramebufferHandle").finish()
    }
}

// FramebufferHandleはglow::FramebufferにDerefする
impl Deref for FramebufferHandle {
    type Target = glow::Framebuffer;
    fn deref(&self) -> &Self::Target {
        &self.data().framebuffer
    }
}

// Cloneで参照カウントを増やす
impl Clone for FramebufferHandle {
    fn clone(&self) -> Self {
        let count = self.data().ref_count.get();
        if count > usize::MAX / 2 {
            panic!("Too many references to FramebufferHandle");
        }
        self.data().ref_count.set(count + 1);
        Self { ptr: self.ptr }
    }
}

// Drop時に参照カウントを減らし、0になったら破棄する
impl Drop for FramebufferHandle {
    fn drop(&mut self) {
        let count = self.data().ref_count.get() - 1;
        self.data().ref_count.set(count);
        if count == 0 {
            unsafe {
                let data = Box::from_raw(self.ptr.as_ptr());

                // framebufferの破棄
                data.context.delete_framebuffer(data.framebuffer);
            }
        }
    }
}
