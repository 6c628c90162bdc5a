//! 蓄積用の2枚の描画先をping-pongで使う

use crate::{
    device::GraphicsDevice,
    error::Result,
    program::{PassUniforms, TracerProgram},
};

/// 新しいサンプルを混ぜるときの前回の蓄積結果の重み
///
/// `mix(sample, previous, n / (n + 1))`で単純平均の逐次更新になる。
pub fn blend_weight(sample_count: u32) -> f32 {
    let count = sample_count as f32;
    count / (count + 1.0)
}

/// GLSLの`mix(sample, previous, weight)`と同じ計算
pub fn accumulate(sample: glam::Vec3, previous: glam::Vec3, weight: f32) -> glam::Vec3 {
    sample * (1.0 - weight) + previous * weight
}

/// トレース解像度の2枚の描画先と読み書きの役割、サンプル数
///
/// 片方が読み込み用、もう片方が書き込み用で、trace passのたびに役割を入れ替える。
/// 同じ描画先を同じpassの中で読み書きすることはない。
pub struct AccumulationBuffers<D: GraphicsDevice> {
    targets: [D::Target; 2],
    read_index: usize,
    size: u32,
    sample_count: u32,
}
impl<D: GraphicsDevice> AccumulationBuffers<D> {
    pub fn new(device: &mut D, size: u32) -> Result<Self> {
        Ok(Self {
            targets: Self::create_targets(device, size)?,
            read_index: 0,
            size,
            sample_count: 0,
        })
    }

    /// size x sizeの描画先を2枚作る
    pub fn create_targets(device: &mut D, size: u32) -> Result<[D::Target; 2]> {
        Ok([
            device.create_color_target(size, size)?,
            device.create_color_target(size, size)?,
        ])
    }

    /// `create_targets`で作った新しいサイズのtargetに差し替えて蓄積をリセットする
    pub fn replace_targets(&mut self, targets: [D::Target; 2], size: u32) {
        // 古いtargetはここでdropされて解放される
        self.targets = targets;
        self.read_index = 0;
        self.size = size;
        self.reset();
        log::info!("accumulation buffers resized to {size}x{size}");
    }

    /// 書き込み用のtargetにtracerを描き、役割を入れ替えてサンプル数を1増やす
    pub fn trace_pass(
        &mut self,
        device: &mut D,
        tracer: &TracerProgram<D>,
        uniforms: &PassUniforms,
    ) {
        let write_index = 1 - self.read_index;
        let weight = blend_weight(self.sample_count);

        device.bind_target_for_write(&self.targets[write_index]);
        device.set_viewport(self.size, self.size);
        tracer.bind(device, uniforms, weight);
        device.bind_source_texture(&self.targets[self.read_index]);
        device.draw_full_screen_quad();

        self.read_index = write_index;
        self.sample_count += 1;
        log::debug!("trace pass {} (weight {weight})", self.sample_count);
    }

    /// 最後に書き込みが終わったtarget
    pub fn current_image(&self) -> &D::Target {
        &self.targets[self.read_index]
    }

    pub fn reset(&mut self) {
        self.sample_count = 0;
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    pub fn size(&self) -> u32 {
        self.size
    }
}
