use glow::HasContext;

/// シェーダーのステージ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    /// vertex shader
    Vertex,
    /// fragment shader
    Fragment,
}
impl ShaderStage {
    fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}
impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// コンパイルやリンクで出た失敗の情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramDiagnostic {
    /// コンパイルの失敗
    Compile {
        /// 失敗したステージ
        stage: ShaderStage,
        /// コンパイラのログ
        log: String,
    },
    /// リンクの失敗
    Link {
        /// リンカのログ
        log: String,
    },
}

/// compile_programの結果
///
/// 失敗していてもprogram自体は作成されている。
/// 使えないprogramでdrawしてもGLがエラーフラグを立てるだけなので、
/// 呼び出し側はdiagnosticsを見て判断する。
pub struct ProgramBuild {
    /// linkしたprogram
    pub program: crate::ProgramHandle,
    /// 失敗の情報
    pub diagnostics: Vec<ProgramDiagnostic>,
}

/// vertex shaderとfragment shaderのソースからprogramを作成するヘルパー関数
///
/// `attributes`で指定したattributeはlink前にlocationを固定する。
pub fn compile_program(
    context: &crate::ContextHandle,
    vertex_source: &str,
    fragment_source: &str,
    attributes: &[(u32, &str)],
) -> anyhow::Result<ProgramBuild> {
    let mut diagnostics = Vec::new();

    // 各ステージのコンパイル
    let mut shaders = Vec::with_capacity(2);
    for (stage, source) in [
        (ShaderStage::Vertex, vertex_source),
        (ShaderStage::Fragment, fragment_source),
    ] {
        let shader = context.create_shader(stage.gl_type(), source)?;
        if !shader.compile_status() {
            diagnostics.push(ProgramDiagnostic::Compile {
                stage,
                log: shader.info_log(),
            });
        }
        shaders.push(shader);
    }

    // programの作成とリンク
    let program = context.create_program()?;
    for shader in &shaders {
        program.attach_shader(shader);
    }
    for (index, name) in attributes {
        program.bind_attrib_location(*index, name);
    }
    program.link();
    if !program.link_status() {
        diagnostics.push(ProgramDiagnostic::Link {
            log: program.info_log(),
        });
    }

    // リンク後のshaderは不要なのでdetachしてHandleごと破棄する
    for shader in &shaders {
        program.detach_shader(shader);
    }
    drop(shaders);

    Ok(ProgramBuild {
        program,
        diagnostics,
    })
}

/// programをbindする
pub fn use_program(context: &crate::ContextHandle, program: Option<&crate::ProgramHandle>) {
    unsafe { context.use_program(program.map(|program| **program)) }
}
