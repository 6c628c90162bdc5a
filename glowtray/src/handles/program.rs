//! 参照カウンタで管理して、参照がすべて破棄された際に
//! Programの破棄の処理まで行うProgramHandleを定義する。

use anyhow::Result;
use glow::HasContext;
use std::{cell::Cell, fmt::Debug, ops::Deref, ptr::NonNull};

struct ProgramHandleData {
    context: crate::ContextHandle,
    program: glow::Program,
    ref_count: Cell<usize>,
}
impl ProgramHandleData {
    fn new(context: crate::ContextHandle) -> Result<Self> {
        // create program
        let program = unsafe { context.context().create_program() }
            .map_err(anyhow::Error::msg)?;

        Ok(Self {
            context,
            program,
            ref_count: Cell::new(1),
        })
    }
}

/// glow::Programを参照カウントで管理するためのハンドル
pub struct ProgramHandle {
    ptr: NonNull<ProgramHandleData>,
}
impl ProgramHandle {
    pub(crate) fn new(context_handle: crate::ContextHandle) -> Result<Self> {
        let data = Box::new(ProgramHandleData::new(context_handle)?);
        let ptr = unsafe { NonNull::new_unchecked(Box::into_raw(data)) };
        Ok(Self { ptr })
    }

    // Programの関数

    /// shaderをattachする
    pub fn attach_shader(&self, shader: &crate::ShaderHandle) {
        unsafe { self.data().context.attach_shader(self.data().program, **shader) }
    }

    /// shaderをdetachする
    pub fn detach_shader(&self, shader: &crate::ShaderHandle) {
        unsafe { self.data().context.detach_shader(self.data().program, **shader) }
    }

    /// link前にattributeのlocationを固定する
    pub fn bind_attrib_location(&self, index: u32, name: &str) {
        unsafe {
            self.data()
                .context
                .bind_attrib_location(self.data().program, index, name)
        }
    }

    /// linkする
    pub fn link(&self) {
        unsafe { self.data().context.link_program(self.data().program) }
    }

    /// linkが成功したかどうか
    pub fn link_status(&self) -> bool {
        unsafe { self.data().context.get_program_link_status(self.data().program) }
    }

    /// linkerのログを取得する
    pub fn info_log(&self) -> String {
        unsafe { self.data().context.get_program_info_log(self.data().program) }
    }

    /// uniformのlocationを取得する
    ///
    /// 最適化で消えたuniformは`None`になる。
    pub fn uniform_location(&self, name: &str) -> Option<glow::UniformLocation> {
        unsafe {
            self.data()
                .context
                .get_uniform_location(self.data().program, name)
        }
    }

    // raw

    /// ContextHandleを取得する
    pub fn context(&self) -> crate::ContextHandle {
        self.data().context.clone()
    }

    /// glow::Programを取得する
    /// ## Safety
    /// 参照カウントの管理から中身を取り出すので注意。
    /// Handleが破棄されると、この関数で取り出したglow::Programは無効になる。
    pub unsafe fn program_raw(&self) -> glow::Program {
        self.data().program
    }

    fn data(&self) -> &ProgramHandleData {
        unsafe { self.ptr.as_ref() }
    }
}

// Debugトレイトの実装
impl Debug for ProgramHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgramHandle").finish()
    }
}

// ProgramHandleはglow::ProgramにDerefする
impl Deref for ProgramHandle {
    type Target = glow::Program;
    fn deref(&self) -> &Self::Target {
        &self.data().program
    }
}

// Cloneで参照カウントを増やす
impl Clone for ProgramHandle {
    fn clone(&self) -> Self {
        let count = self.data().ref_count.get();
        if count > usize::MAX / 2 {
            panic!("Too many references to ProgramHandle");
        }
        self.data().ref_count.set(count + 1);
        Self { ptr: self.ptr }
    }
}

// Drop時に参照カウントを減らし、0になったら破棄する
impl Drop for ProgramHandle {
    fn drop(&mut self) {
        let count = self.data().ref_count.get() - 1;
        self.data().ref_count.set(count);
        if count == 0 {
            unsafe {
                let data = Box::from_raw(self.ptr.as_ptr());

                // programの破棄
                data.context.delete_program(data.program);
            }
        }
    }
}
