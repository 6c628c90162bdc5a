use glow::HasContext;

/// GLのエラーフラグを確認して、立っていればログに出す関数
///
/// `validation` featureが無効のときは何もしない。
pub fn check_error(context: &crate::ContextHandle, label: &str) -> Option<u32> {
    if !cfg!(feature = "validation") {
        return None;
    }

    let error = unsafe { context.get_error() };
    if error == glow::NO_ERROR {
        return None;
    }
    log::warn!(
        "[GL] {} failed with 0x{:X} ({})",
        label,
        error,
        error_name(error)
    );
    Some(error)
}

/// エラーコードの名前
pub fn error_name(error: u32) -> &'static str {
    match error {
        glow::INVALID_ENUM => "GL_INVALID_ENUM",
        glow::INVALID_VALUE => "GL_INVALID_VALUE",
        glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
        glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        _ => "GL_...",
    }
}
