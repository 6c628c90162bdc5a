use std::time::{Duration, Instant};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    accumulation::AccumulationBuffers,
    camera::{Camera, CornerRays},
    device::GraphicsDevice,
    error::{RendererError, Result},
    program::{PassUniforms, ProgramManager, TracerProgram},
    scene::{self, Scene, Sphere},
    shader::TracerConstants,
    FrameInfo, Parameters,
};

/// 起動時に画面を塗りつぶす色
pub const DISPLAY_CLEAR_COLOR: glam::Vec4 = glam::Vec4::new(0.0, 0.0, 0.5, 1.0);

/// `timeSinceStart`に送る乱数から引く値
const TIME_OFFSET: f32 = 0.1573;

/// ホストの描画ループから呼ばれるライフサイクル
pub trait SurfaceLifecycle {
    /// 描画先のサーフェスとコンテキストが使えるようになったときに呼ぶ。
    /// コンテキストが作り直されたときにもう一度呼んでよい。
    fn on_surface_create(&mut self) -> Result<()>;
    fn on_surface_resize(&mut self, width: u32, height: u32);
    /// 1フレーム分のtraceと画面への描画を行う
    fn on_frame(&mut self) -> FrameInfo;
}

/// レンダラーの設定と乱数の状態
pub struct RendererState {
    pub parameters: Parameters,
    pub scene: Scene,
    pub camera: Camera,
    pub display_width: u32,
    pub display_height: u32,
    rng: StdRng,
}
impl Default for RendererState {
    fn default() -> Self {
        Self::new(Parameters::default(), Scene::default(), Camera::default())
    }
}
impl RendererState {
    pub fn new(parameters: Parameters, scene: Scene, camera: Camera) -> Self {
        Self {
            display_width: parameters.trace_resolution,
            display_height: parameters.trace_resolution,
            parameters,
            scene,
            camera,
            rng: StdRng::from_entropy(),
        }
    }

    /// 乱数のseedを固定する
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// 透視投影に渡す画面の横/縦
    ///
    /// レイは逆view-projectionから求めるので、投影行列と同じ横/縦の比にすると
    /// 正方形のトレース画像を引き伸ばして表示したときに1ピクセルが正方形になる。
    pub fn aspect(&self) -> f32 {
        self.display_width.max(1) as f32 / self.display_height.max(1) as f32
    }

    fn pass_uniforms(&mut self, rays: CornerRays) -> PassUniforms {
        PassUniforms {
            eye: self.camera.eye(),
            rays,
            light: self.scene.light,
            spheres: self.scene.spheres.iter().map(Sphere::packed).collect(),
            glossiness: self.parameters.glossiness,
            time_since_start: self.rng.gen::<f32>() - TIME_OFFSET,
        }
    }
}

struct GpuResources<D: GraphicsDevice> {
    programs: ProgramManager<D>,
    accumulation: AccumulationBuffers<D>,
}

/// プログレッシブにパストレースするレンダラー
///
/// `on_surface_create`が呼ばれるまでGPUのリソースは持たず、`on_frame`は何もしない。
pub struct Renderer<D: GraphicsDevice> {
    resources: Option<GpuResources<D>>,
    device: D,
    state: RendererState,
    rendering_start_time: Instant,
    rendering_time: Duration,
}
impl<D: GraphicsDevice> Renderer<D> {
    pub fn new(device: D, state: RendererState) -> Self {
        Self {
            resources: None,
            device,
            state,
            rendering_start_time: Instant::now(),
            rendering_time: Duration::from_secs(0),
        }
    }

    /// 画面上の座標に光源を移して蓄積をやり直す
    pub fn on_pointer_input(&mut self, x: f32, y: f32) -> Result<()> {
        let position = scene::light_from_pointer(
            x,
            y,
            self.state.display_width,
            self.state.display_height,
        );
        let mut scene = self.state.scene.clone();
        scene.light.x = position.x;
        scene.light.y = position.y;
        self.set_scene(scene)
    }

    pub fn set_trace_resolution(&mut self, resolution: u32) -> Result<()> {
        let parameters = Parameters {
            trace_resolution: resolution,
            ..self.state.parameters.clone()
        };
        self.set_parameters(parameters)
    }

    pub fn set_parameters(&mut self, parameters: Parameters) -> Result<()> {
        let scene = self.state.scene.clone();
        self.reconfigure(parameters, scene)
    }

    pub fn set_scene(&mut self, scene: Scene) -> Result<()> {
        let parameters = self.state.parameters.clone();
        self.reconfigure(parameters, scene)
    }

    pub fn set_camera(&mut self, camera: Camera) -> Result<()> {
        if !camera.angle_x.is_finite()
            || !camera.angle_y.is_finite()
            || !camera.zoom.is_finite()
            || camera.zoom <= 0.0
        {
            return Err(RendererError::InvalidParameters(format!(
                "camera angles must be finite and zoom positive: {camera:?}"
            )));
        }
        if self.state.camera != camera {
            self.state.camera = camera;
            self.restart_accumulation();
        }
        Ok(())
    }

    /// 前の設定と比べて、必要なものだけ作り直す
    ///
    /// - トレース解像度が変わったら蓄積用テクスチャを作り直す
    /// - シェーダーに焼き込む定数が変わったらtracerを作り直す
    /// - それ以外で絵が変わるものが変わったら蓄積をリセットする
    fn reconfigure(&mut self, parameters: Parameters, scene: Scene) -> Result<()> {
        parameters.validate(self.device.max_texture_size())?;
        scene.validate()?;

        let old_constants = TracerConstants::new(&self.state.parameters, &self.state.scene);
        let new_constants = TracerConstants::new(&parameters, &scene);
        let resized = self.state.parameters.trace_resolution != parameters.trace_resolution;
        let rebuild = old_constants != new_constants;
        let dirty = rebuild
            || self.state.parameters != parameters
            || self.state.scene != scene;

        if let Some(resources) = self.resources.as_mut() {
            // 必要なものを全部作ってから差し替える。途中で失敗したら何も変えない。
            let targets = if resized {
                Some(AccumulationBuffers::create_targets(
                    &mut self.device,
                    parameters.trace_resolution,
                )?)
            } else {
                None
            };
            let tracer = if rebuild {
                Some(TracerProgram::build(&mut self.device, new_constants)?)
            } else {
                None
            };

            if let Some(targets) = targets {
                resources
                    .accumulation
                    .replace_targets(targets, parameters.trace_resolution);
            }
            if let Some(tracer) = tracer {
                resources
                    .programs
                    .replace_tracer(tracer, &mut resources.accumulation);
            }
        }

        self.state.parameters = parameters;
        self.state.scene = scene;
        if dirty {
            self.restart_accumulation();
        }
        Ok(())
    }

    fn restart_accumulation(&mut self) {
        if let Some(resources) = self.resources.as_mut() {
            resources.accumulation.reset();
        }
        self.rendering_start_time = Instant::now();
        self.rendering_time = Duration::from_secs(0);
    }

    fn create_resources(&mut self) -> Result<GpuResources<D>> {
        let mut accumulation =
            AccumulationBuffers::new(&mut self.device, self.state.parameters.trace_resolution)?;
        let mut programs = ProgramManager::new(&mut self.device)?;
        programs.rebuild(
            &mut self.device,
            TracerConstants::new(&self.state.parameters, &self.state.scene),
            &mut accumulation,
        )?;
        Ok(GpuResources {
            programs,
            accumulation,
        })
    }

    pub fn state(&self) -> &RendererState {
        &self.state
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn sample_count(&self) -> u32 {
        self.resources
            .as_ref()
            .map_or(0, |resources| resources.accumulation.sample_count())
    }

    pub fn is_converged(&self) -> bool {
        self.resources.is_some() && self.sample_count() >= self.state.parameters.max_sample_count
    }

    /// 最後に蓄積が終わった画像
    pub fn current_image(&self) -> Option<&D::Target> {
        self.resources
            .as_ref()
            .map(|resources| resources.accumulation.current_image())
    }

    /// tracerのコンパイルとリンクで出たエラー
    pub fn tracer_diagnostics(&self) -> &[RendererError] {
        self.resources
            .as_ref()
            .and_then(|resources| resources.programs.tracer())
            .map(|tracer| tracer.diagnostics())
            .unwrap_or(&[])
    }

    pub fn rebuild_count(&self) -> u32 {
        self.resources
            .as_ref()
            .map_or(0, |resources| resources.programs.rebuild_count())
    }
}

impl<D: GraphicsDevice> SurfaceLifecycle for Renderer<D> {
    fn on_surface_create(&mut self) -> Result<()> {
        // コンテキストが作り直された場合は古いリソースを先に捨てる
        self.resources = None;

        self.state
            .parameters
            .validate(self.device.max_texture_size())?;
        self.state.scene.validate()?;

        self.device.bind_default_display_target();
        self.device.clear(DISPLAY_CLEAR_COLOR);

        let resources = self.create_resources()?;
        self.resources = Some(resources);
        self.restart_accumulation();
        log::info!(
            "surface created: trace resolution {}, max samples {}",
            self.state.parameters.trace_resolution,
            self.state.parameters.max_sample_count
        );
        Ok(())
    }

    fn on_surface_resize(&mut self, width: u32, height: u32) {
        let (width, height) = (width.max(1), height.max(1));
        if (width, height) == (self.state.display_width, self.state.display_height) {
            return;
        }
        self.state.display_width = width;
        self.state.display_height = height;
        // アスペクト比が変わるとレイも変わるので蓄積をやり直す
        self.restart_accumulation();
        log::info!("display resized to {width}x{height}");
    }

    fn on_frame(&mut self) -> FrameInfo {
        let Some(resources) = self.resources.as_mut() else {
            return FrameInfo {
                sample_count: 0,
                passes: 0,
                rendering_time: Duration::from_secs(0),
            };
        };

        // 上限に達していたらtraceはせずに表示だけする
        let mut passes = 0;
        if let Some(tracer) = resources.programs.tracer() {
            let remaining = self
                .state
                .parameters
                .max_sample_count
                .saturating_sub(resources.accumulation.sample_count());
            let pass_count = self.state.parameters.samples_per_frame.min(remaining);
            if pass_count > 0 {
                let rays = self.state.camera.corner_rays(self.state.aspect());
                for _ in 0..pass_count {
                    let uniforms = self.state.pass_uniforms(rays);
                    resources
                        .accumulation
                        .trace_pass(&mut self.device, tracer, &uniforms);
                    passes += 1;
                }
                self.rendering_time = self.rendering_start_time.elapsed();
            }
        }

        // 蓄積結果を画面の解像度で描く
        self.device.bind_default_display_target();
        self.device
            .set_viewport(self.state.display_width, self.state.display_height);
        self.device.use_program(resources.programs.blit().program());
        self.device
            .bind_source_texture(resources.accumulation.current_image());
        self.device.draw_full_screen_quad();

        FrameInfo {
            sample_count: resources.accumulation.sample_count(),
            passes,
            rendering_time: self.rendering_time,
        }
    }
}
