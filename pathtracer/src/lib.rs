//! 箱型の部屋と球をフラグメントシェーダーでパストレースし、
//! フレームをまたいでサンプルを蓄積していくプログレッシブレンダラー。

pub mod accumulation;
pub mod camera;
pub mod device;
pub mod error;
pub mod gl_device;
pub mod program;
pub mod scene;
pub mod shader;

mod renderer;
pub use renderer::{Renderer, RendererState, SurfaceLifecycle, DISPLAY_CLEAR_COLOR};

pub use camera::Camera;
pub use device::{CompiledProgram, GraphicsDevice};
pub use error::{RendererError, Result};
pub use gl_device::GlDevice;
pub use scene::{Environment, Material, Scene, Sphere};

use std::time::Duration;

/// トレース解像度の上限
pub const MAX_TRACE_RESOLUTION: u32 = 4096;

/// `on_frame`の結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub sample_count: u32,
    /// このフレームで実行したtrace passの数
    pub passes: u32,
    /// 蓄積をリセットしてから最後にtraceするまでの時間
    pub rendering_time: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    /// 蓄積用テクスチャの一辺のピクセル数
    pub trace_resolution: u32,
    pub max_sample_count: u32,
    pub samples_per_frame: u32,
    pub bounces: u32,
    pub epsilon: f32,
    pub infinity: f32,
    pub light_size: f32,
    pub light_value: f32,
    pub glossiness: f32,
    pub environment: Environment,
}
impl Default for Parameters {
    fn default() -> Self {
        Self {
            trace_resolution: 256,
            max_sample_count: 64,
            samples_per_frame: 1,
            bounces: 4,
            epsilon: 1e-4,
            infinity: 1e4,
            light_size: 0.2,
            light_value: 0.5,
            glossiness: 0.6,
            environment: Environment::RedGreen,
        }
    }
}
impl Parameters {
    /// `max_texture_size`はデバイスが作れるテクスチャの一辺の最大値 (0なら不明)
    pub fn validate(&self, max_texture_size: u32) -> Result<()> {
        let max = if max_texture_size == 0 {
            MAX_TRACE_RESOLUTION
        } else {
            MAX_TRACE_RESOLUTION.min(max_texture_size)
        };
        if self.trace_resolution == 0 || self.trace_resolution > max {
            return Err(RendererError::InvalidResolution {
                requested: self.trace_resolution,
                max,
            });
        }

        if self.bounces == 0 {
            return Err(RendererError::InvalidParameters(
                "bounces must be at least 1".to_string(),
            ));
        }
        if self.samples_per_frame == 0 {
            return Err(RendererError::InvalidParameters(
                "samples_per_frame must be at least 1".to_string(),
            ));
        }
        for (name, value) in [("epsilon", self.epsilon), ("infinity", self.infinity)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(RendererError::InvalidParameters(format!(
                    "{name} must be finite and positive: {value}"
                )));
            }
        }
        if self.epsilon >= self.infinity {
            return Err(RendererError::InvalidParameters(format!(
                "epsilon ({}) must be smaller than infinity ({})",
                self.epsilon, self.infinity
            )));
        }
        for (name, value) in [
            ("light_size", self.light_size),
            ("light_value", self.light_value),
            ("glossiness", self.glossiness),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RendererError::InvalidParameters(format!(
                    "{name} must be finite and non-negative: {value}"
                )));
            }
        }
        Ok(())
    }
}
