//! パストレーサーのエラー型

use thiserror::Error;

pub use glowtray::utils::ShaderStage;

/// レンダラーで起こりうるエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RendererError {
    /// シェーダーのコンパイルの失敗
    ///
    /// programの作成自体は続行されるので、致命的なエラーとしては返さずに
    /// programのdiagnosticsとして保持する。
    #[error("{stage} shader compile error: {log}")]
    ShaderCompile {
        /// 失敗したステージ
        stage: ShaderStage,
        /// コンパイラのログ
        log: String,
    },

    /// programのリンクの失敗
    #[error("program link error: {log}")]
    ShaderLink {
        /// リンカのログ
        log: String,
    },

    /// トレース解像度が0か大きすぎる
    #[error("invalid trace resolution: {requested} (must be in 1..={max})")]
    InvalidResolution { requested: u32, max: u32 },

    /// パラメータが不正
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// シーンの球が多すぎる
    #[error("too many spheres: {count} (max {max})")]
    TooManySpheres { count: usize, max: usize },

    /// GPUのオブジェクトの作成などの失敗
    #[error("graphics device error: {0}")]
    Device(String),
}

impl From<anyhow::Error> for RendererError {
    fn from(err: anyhow::Error) -> Self {
        RendererError::Device(format!("{err:#}"))
    }
}

/// レンダラーの操作の結果の型
pub type Result<T> = std::result::Result<T, RendererError>;
