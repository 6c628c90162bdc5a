//! blit用とパストレース用のprogramの管理

use std::collections::HashMap;

use crate::{
    accumulation::AccumulationBuffers,
    camera::CornerRays,
    device::{CompiledProgram, GraphicsDevice},
    error::{RendererError, Result},
    shader::{self, TracerConstants},
};

/// tracerのprogramで毎パス送るuniformの名前
pub const TRACER_UNIFORMS: [&str; 9] = [
    "eye",
    "light",
    "ray00",
    "ray01",
    "ray10",
    "ray11",
    "textureWeight",
    "timeSinceStart",
    "glossiness",
];

/// programをコンパイルして、失敗の情報があればログに出すヘルパー関数
pub fn compile_program<D: GraphicsDevice>(
    device: &mut D,
    vertex_source: &str,
    fragment_source: &str,
    label: &str,
) -> Result<CompiledProgram<D::Program>> {
    let compiled = device.create_program(vertex_source, fragment_source)?;
    for diagnostic in &compiled.diagnostics {
        log::warn!("[{label}] {diagnostic}");
    }
    Ok(compiled)
}

/// uniformのlocationをまとめて引く
///
/// 見つからない名前は結果に入らない。dead codeとして消されたuniformへの書き込みは何もしないだけ。
pub fn resolve_handles<D: GraphicsDevice>(
    device: &D,
    program: &D::Program,
    names: &[&str],
) -> HashMap<String, D::Location> {
    names
        .iter()
        .filter_map(|name| {
            let location = device.uniform_location(program, name);
            if location.is_none() {
                log::debug!("uniform `{name}` is not active");
            }
            location.map(|location| (name.to_string(), location))
        })
        .collect()
}

/// 1回のtrace passでtracerに送るuniformの値
#[derive(Debug, Clone, PartialEq)]
pub struct PassUniforms {
    pub eye: glam::Vec3,
    pub rays: CornerRays,
    pub light: glam::Vec3,
    /// xyz: 中心, w: 半径
    pub spheres: Vec<glam::Vec4>,
    pub glossiness: f32,
    /// 擬似乱数のseed
    pub time_since_start: f32,
}

/// パストレース用のprogram
///
/// locationはこのprogramのインスタンスが生きている間だけ有効。
pub struct TracerProgram<D: GraphicsDevice> {
    program: D::Program,
    handles: HashMap<String, D::Location>,
    constants: TracerConstants,
    diagnostics: Vec<RendererError>,
}
impl<D: GraphicsDevice> TracerProgram<D> {
    pub fn build(device: &mut D, constants: TracerConstants) -> Result<Self> {
        let fragment_source = shader::build_tracer_fragment_source(&constants);
        let CompiledProgram {
            program,
            diagnostics,
        } = compile_program(device, shader::TRACER_VERTEX_SOURCE, &fragment_source, "tracer")?;

        let sphere_names = (0..constants.materials.len())
            .map(shader::sphere_uniform_name)
            .collect::<Vec<_>>();
        let names = TRACER_UNIFORMS
            .iter()
            .copied()
            .chain(sphere_names.iter().map(String::as_str))
            .collect::<Vec<_>>();
        let handles = resolve_handles(device, &program, &names);

        Ok(Self {
            program,
            handles,
            constants,
            diagnostics,
        })
    }

    /// programをbindしてuniformを送る
    ///
    /// `texture_weight`は前回の蓄積結果に掛ける重み。
    pub fn bind(&self, device: &mut D, uniforms: &PassUniforms, texture_weight: f32) {
        device.use_program(&self.program);

        self.set_3f(device, "eye", uniforms.eye);
        self.set_3f(device, "light", uniforms.light);
        self.set_3f(device, "ray00", uniforms.rays.ray00);
        self.set_3f(device, "ray01", uniforms.rays.ray01);
        self.set_3f(device, "ray10", uniforms.rays.ray10);
        self.set_3f(device, "ray11", uniforms.rays.ray11);
        self.set_1f(device, "textureWeight", texture_weight);
        self.set_1f(device, "timeSinceStart", uniforms.time_since_start);
        self.set_1f(device, "glossiness", uniforms.glossiness);
        for (i, sphere) in uniforms.spheres.iter().enumerate() {
            if let Some(location) = self.handles.get(&shader::sphere_uniform_name(i)) {
                device.set_uniform_4f(location, *sphere);
            }
        }
    }

    fn set_1f(&self, device: &mut D, name: &str, value: f32) {
        if let Some(location) = self.handles.get(name) {
            device.set_uniform_1f(location, value);
        }
    }

    fn set_3f(&self, device: &mut D, name: &str, value: glam::Vec3) {
        if let Some(location) = self.handles.get(name) {
            device.set_uniform_3f(location, value);
        }
    }

    pub fn program(&self) -> &D::Program {
        &self.program
    }

    pub fn constants(&self) -> &TracerConstants {
        &self.constants
    }

    pub fn diagnostics(&self) -> &[RendererError] {
        &self.diagnostics
    }

    /// コンパイルとリンクが通ったかどうか
    pub fn is_usable(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// 蓄積結果を画面に描くだけのprogram
pub struct BlitProgram<D: GraphicsDevice> {
    program: D::Program,
    diagnostics: Vec<RendererError>,
}
impl<D: GraphicsDevice> BlitProgram<D> {
    pub fn build(device: &mut D) -> Result<Self> {
        let CompiledProgram {
            program,
            diagnostics,
        } = compile_program(
            device,
            shader::BLIT_VERTEX_SOURCE,
            shader::BLIT_FRAGMENT_SOURCE,
            "blit",
        )?;
        Ok(Self {
            program,
            diagnostics,
        })
    }

    pub fn program(&self) -> &D::Program {
        &self.program
    }

    pub fn diagnostics(&self) -> &[RendererError] {
        &self.diagnostics
    }
}

/// 2つのprogramを持ち、定数が変わったらtracerを作り直す
pub struct ProgramManager<D: GraphicsDevice> {
    blit: BlitProgram<D>,
    tracer: Option<TracerProgram<D>>,
    rebuild_count: u32,
}
impl<D: GraphicsDevice> ProgramManager<D> {
    /// blitのprogramだけを作る。tracerは`rebuild`で作る。
    pub fn new(device: &mut D) -> Result<Self> {
        Ok(Self {
            blit: BlitProgram::build(device)?,
            tracer: None,
            rebuild_count: 0,
        })
    }

    /// tracerを作り直し、蓄積をリセットする
    ///
    /// 作成に失敗したときは前のtracerがそのまま残る。
    pub fn rebuild(
        &mut self,
        device: &mut D,
        constants: TracerConstants,
        accumulation: &mut AccumulationBuffers<D>,
    ) -> Result<()> {
        let tracer = TracerProgram::build(device, constants)?;
        self.replace_tracer(tracer, accumulation);
        Ok(())
    }

    /// 作成済みのtracerに差し替える。古いtracerはここでdropされる。
    pub fn replace_tracer(
        &mut self,
        tracer: TracerProgram<D>,
        accumulation: &mut AccumulationBuffers<D>,
    ) {
        log::info!(
            "tracer program rebuilt: {} bounces, {} spheres, {}px",
            tracer.constants().bounces,
            tracer.constants().materials.len(),
            tracer.constants().trace_resolution
        );
        if !tracer.is_usable() {
            log::warn!(
                "tracer program has {} errors, passes will not produce samples",
                tracer.diagnostics().len()
            );
        }
        self.tracer = Some(tracer);
        self.rebuild_count += 1;

        accumulation.reset();
    }

    pub fn tracer(&self) -> Option<&TracerProgram<D>> {
        self.tracer.as_ref()
    }

    pub fn blit(&self) -> &BlitProgram<D> {
        &self.blit
    }

    /// tracerを作った回数
    pub fn rebuild_count(&self) -> u32 {
        self.rebuild_count
    }
}
