//! GPUを使わずにRendererを動かすためのソフトウェアのGraphicsDevice。
//!
//! 描画のコマンドを記録し、tracerのprogramはfragment shaderのconst宣言と
//! uniformの値から同じ計算をCPUで行う。

#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    rc::{Rc, Weak},
};

use glam::{Vec2, Vec3, Vec4};
use pathtracer::{
    error::ShaderStage, Camera, CompiledProgram, GraphicsDevice, Parameters, Renderer,
    RendererError, RendererState, Result, Scene, SurfaceLifecycle,
};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec3(Vec3),
    Vec4(Vec4),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramKind {
    Tracer,
    Blit,
}

pub struct ProgramData {
    pub id: u32,
    pub kind: ProgramKind,
    pub linked: bool,
    pub kernel: Option<TracerKernel>,
    active_uniforms: HashSet<String>,
    uniforms: RefCell<HashMap<String, UniformValue>>,
}
impl ProgramData {
    fn float(&self, name: &str) -> f32 {
        match self.uniforms.borrow().get(name) {
            Some(UniformValue::Float(value)) => *value,
            _ => 0.0,
        }
    }

    fn vec3(&self, name: &str) -> Vec3 {
        match self.uniforms.borrow().get(name) {
            Some(UniformValue::Vec3(value)) => *value,
            _ => Vec3::ZERO,
        }
    }

    fn vec4(&self, name: &str) -> Vec4 {
        match self.uniforms.borrow().get(name) {
            Some(UniformValue::Vec4(value)) => *value,
            _ => Vec4::ZERO,
        }
    }

    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.uniforms.borrow().get(name).cloned()
    }
}

#[derive(Clone)]
pub struct SoftwareProgram(pub Rc<ProgramData>);

pub struct TargetData {
    pub id: u32,
    pub width: u32,
    pub height: u32,
    pixels: RefCell<Vec<Vec3>>,
}
impl TargetData {
    pub fn pixel(&self, x: u32, y: u32) -> Vec3 {
        self.pixels.borrow()[(y * self.width + x) as usize]
    }

    pub fn pixels(&self) -> Vec<Vec3> {
        self.pixels.borrow().clone()
    }

    /// NEARESTでのサンプリング
    fn sample(&self, uv: Vec2) -> Vec3 {
        let x = ((uv.x * self.width as f32).floor() as i64).clamp(0, self.width as i64 - 1);
        let y = ((uv.y * self.height as f32).floor() as i64).clamp(0, self.height as i64 - 1);
        self.pixel(x as u32, y as u32)
    }
}

#[derive(Clone)]
pub struct SoftwareTarget(pub Rc<TargetData>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftwareLocation {
    program: u32,
    name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Clear(Vec4),
    Draw {
        kind: ProgramKind,
        program: u32,
        /// Noneは画面
        write: Option<u32>,
        read: Option<u32>,
        viewport: (u32, u32),
    },
}

pub struct SoftwareDevice {
    next_id: u32,
    pub events: Vec<Event>,
    pub max_texture_size: u32,
    /// fragment shaderにこの文字列が含まれていたらコンパイルエラーにする
    pub reject_fragment_containing: Option<String>,
    /// trueの間はprogramの作成自体を失敗させる
    pub fail_program_creation: bool,
    /// trueの間はtargetの作成を失敗させる
    pub fail_target_creation: bool,
    programs: Vec<Weak<ProgramData>>,
    targets: Vec<Weak<TargetData>>,
    current_program: Option<Rc<ProgramData>>,
    write_target: Option<Rc<TargetData>>,
    source_texture: Option<Rc<TargetData>>,
    viewport: (u32, u32),
}
impl Default for SoftwareDevice {
    fn default() -> Self {
        Self {
            next_id: 1,
            events: Vec::new(),
            max_texture_size: 2048,
            reject_fragment_containing: None,
            fail_program_creation: false,
            fail_target_creation: false,
            programs: Vec::new(),
            targets: Vec::new(),
            current_program: None,
            write_target: None,
            source_texture: None,
            viewport: (0, 0),
        }
    }
}
impl SoftwareDevice {
    fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// まだdropされていないprogramの数
    pub fn live_programs(&self) -> usize {
        self.programs
            .iter()
            .filter(|program| program.strong_count() > 0)
            .count()
    }

    /// まだdropされていないtargetの数
    pub fn live_targets(&self) -> usize {
        self.targets
            .iter()
            .filter(|target| target.strong_count() > 0)
            .count()
    }

    pub fn tracer_draws(&self) -> Vec<(u32, Option<u32>, Option<u32>)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Draw {
                    kind: ProgramKind::Tracer,
                    program,
                    write,
                    read,
                    ..
                } => Some((*program, *write, *read)),
                _ => None,
            })
            .collect()
    }

    pub fn blit_draws(&self) -> Vec<(Option<u32>, Option<u32>, (u32, u32))> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Draw {
                    kind: ProgramKind::Blit,
                    write,
                    read,
                    viewport,
                    ..
                } => Some((*write, *read, *viewport)),
                _ => None,
            })
            .collect()
    }

    fn draw_tracer(&self, program: &ProgramData, kernel: &TracerKernel) {
        let target = self
            .write_target
            .as_ref()
            .expect("tracer must draw into an off-screen target");
        let source = self
            .source_texture
            .as_ref()
            .expect("tracer must sample the previous accumulation");
        assert_ne!(
            target.id, source.id,
            "a pass must not read the target it is writing"
        );

        let uniforms = TracerUniforms::read(program, kernel.sphere_materials.len());
        let (width, height) = self.viewport;
        let mut output = target.pixels.borrow().clone();
        for y in 0..height.min(target.height) {
            for x in 0..width.min(target.width) {
                let frag_coord = Vec3::new(x as f32 + 0.5, y as f32 + 0.5, 0.5);
                let percent = Vec2::new(frag_coord.x / width as f32, frag_coord.y / height as f32);
                let previous = source.sample(frag_coord.truncate() / kernel.trace_resolution);
                output[(y * target.width + x) as usize] =
                    kernel.shade(&uniforms, frag_coord, percent, previous);
            }
        }
        *target.pixels.borrow_mut() = output;
    }
}

/// 宣言されているuniformの名前
fn declared_uniforms(source: &str) -> impl Iterator<Item = String> + '_ {
    source.lines().filter_map(|line| {
        let line = line.trim().strip_prefix("uniform ")?;
        let name = line.split_whitespace().nth(1)?;
        Some(name.trim_end_matches(';').to_string())
    })
}

impl GraphicsDevice for SoftwareDevice {
    type Program = SoftwareProgram;
    type Target = SoftwareTarget;
    type Location = SoftwareLocation;

    fn create_color_target(&mut self, width: u32, height: u32) -> Result<Self::Target> {
        if self.fail_target_creation {
            return Err(RendererError::Device("out of memory".to_string()));
        }
        if width == 0 || height == 0 || width > self.max_texture_size {
            return Err(RendererError::Device(format!(
                "cannot allocate {width}x{height} target"
            )));
        }
        let data = Rc::new(TargetData {
            id: self.next_id(),
            width,
            height,
            pixels: RefCell::new(vec![Vec3::ZERO; (width * height) as usize]),
        });
        self.targets.push(Rc::downgrade(&data));
        Ok(SoftwareTarget(data))
    }

    fn create_program(
        &mut self,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<CompiledProgram<Self::Program>> {
        if self.fail_program_creation {
            return Err(RendererError::Device("out of memory".to_string()));
        }
        let mut diagnostics = Vec::new();
        if let Some(pattern) = &self.reject_fragment_containing {
            if fragment_source.contains(pattern.as_str()) {
                diagnostics.push(RendererError::ShaderCompile {
                    stage: ShaderStage::Fragment,
                    log: format!("rejected `{pattern}`"),
                });
                diagnostics.push(RendererError::ShaderLink {
                    log: "fragment shader is not compiled".to_string(),
                });
            }
        }

        let (kind, kernel) = if fragment_source.contains("calculateColor") {
            (ProgramKind::Tracer, Some(TracerKernel::parse(fragment_source)))
        } else {
            (ProgramKind::Blit, None)
        };
        // リンクに失敗したprogramはuniformを持たない
        let active_uniforms = if diagnostics.is_empty() {
            declared_uniforms(vertex_source)
                .chain(declared_uniforms(fragment_source))
                .collect()
        } else {
            HashSet::new()
        };

        let data = Rc::new(ProgramData {
            id: self.next_id(),
            kind,
            linked: diagnostics.is_empty(),
            kernel,
            active_uniforms,
            uniforms: RefCell::new(HashMap::new()),
        });
        self.programs.push(Rc::downgrade(&data));
        Ok(CompiledProgram {
            program: SoftwareProgram(data),
            diagnostics,
        })
    }

    fn uniform_location(&self, program: &Self::Program, name: &str) -> Option<Self::Location> {
        program
            .0
            .active_uniforms
            .contains(name)
            .then(|| SoftwareLocation {
                program: program.0.id,
                name: name.to_string(),
            })
    }

    fn use_program(&mut self, program: &Self::Program) {
        self.current_program = Some(program.0.clone());
    }

    fn set_uniform_1f(&mut self, location: &Self::Location, value: f32) {
        self.set_uniform(location, UniformValue::Float(value));
    }

    fn set_uniform_3f(&mut self, location: &Self::Location, value: Vec3) {
        self.set_uniform(location, UniformValue::Vec3(value));
    }

    fn set_uniform_4f(&mut self, location: &Self::Location, value: Vec4) {
        self.set_uniform(location, UniformValue::Vec4(value));
    }

    fn bind_target_for_write(&mut self, target: &Self::Target) {
        self.write_target = Some(target.0.clone());
    }

    fn bind_default_display_target(&mut self) {
        self.write_target = None;
    }

    fn bind_source_texture(&mut self, target: &Self::Target) {
        self.source_texture = Some(target.0.clone());
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    fn clear(&mut self, color: Vec4) {
        self.events.push(Event::Clear(color));
    }

    fn draw_full_screen_quad(&mut self) {
        let program = self
            .current_program
            .clone()
            .expect("draw without a bound program");
        self.events.push(Event::Draw {
            kind: program.kind,
            program: program.id,
            write: self.write_target.as_ref().map(|target| target.id),
            read: self.source_texture.as_ref().map(|target| target.id),
            viewport: self.viewport,
        });
        // リンクに失敗したprogramでは何も描かれない
        if let (true, Some(kernel)) = (program.linked, &program.kernel) {
            self.draw_tracer(&program, kernel);
        }
    }

    fn max_texture_size(&self) -> u32 {
        self.max_texture_size
    }
}

impl SoftwareDevice {
    fn set_uniform(&mut self, location: &SoftwareLocation, value: UniformValue) {
        let program = self
            .current_program
            .as_ref()
            .expect("uniform upload without a bound program");
        assert_eq!(
            program.id, location.program,
            "uniform location of another program"
        );
        program
            .uniforms
            .borrow_mut()
            .insert(location.name.clone(), value);
    }

    /// まだ生きているprogram
    pub fn program(&self, id: u32) -> Option<Rc<ProgramData>> {
        self.programs
            .iter()
            .filter_map(Weak::upgrade)
            .find(|program| program.id == id)
    }

    /// まだ生きているtarget
    pub fn target(&self, id: u32) -> Option<Rc<TargetData>> {
        self.targets
            .iter()
            .filter_map(Weak::upgrade)
            .find(|target| target.id == id)
    }
}

/// 小さい解像度でseedを固定し、サーフェスを作成済みのRenderer
pub fn create_renderer(parameters: Parameters, scene: Scene) -> Renderer<SoftwareDevice> {
    init_logger();
    let state = RendererState::new(parameters, scene, Camera::default()).with_seed(7);
    let mut renderer = Renderer::new(SoftwareDevice::default(), state);
    renderer
        .on_surface_create()
        .expect("Failed to create surface");
    renderer
}

pub fn small_parameters() -> Parameters {
    Parameters {
        trace_resolution: 4,
        max_sample_count: 8,
        samples_per_frame: 1,
        ..Default::default()
    }
}

// tracer.fragのCPU版

const ROOM_MIN: Vec3 = Vec3::splat(-1.0);
const ROOM_MAX: Vec3 = Vec3::splat(1.0);
const MATERIAL_DIFFUSE: i32 = 0;
const MATERIAL_MIRROR: i32 = 1;
const MATERIAL_GLOSSY: i32 = 2;

/// fragment shaderに焼き込まれた定数
#[derive(Debug, Clone)]
pub struct TracerKernel {
    pub bounces: i32,
    pub epsilon: f32,
    pub infinity: f32,
    pub light_size: f32,
    pub light_value: f32,
    pub trace_resolution: f32,
    pub left_wall_color: Vec3,
    pub right_wall_color: Vec3,
    pub sphere_materials: Vec<i32>,
}

enum ConstValue {
    Int(i32),
    Float(f32),
    Vec3(Vec3),
}

impl TracerKernel {
    /// `const TYPE NAME = VALUE;`の行を読む
    pub fn parse(source: &str) -> Self {
        let mut constants = HashMap::new();
        for line in source.lines() {
            let Some(declaration) = line.trim().strip_prefix("const ") else {
                continue;
            };
            let (head, value) = declaration
                .trim_end_matches(';')
                .split_once(" = ")
                .expect("const declaration");
            let (ty, name) = head.split_once(' ').expect("const type and name");
            let value = match ty {
                "int" => ConstValue::Int(value.parse().expect("int literal")),
                "float" => ConstValue::Float(value.parse().expect("float literal")),
                "vec3" => {
                    let components = value
                        .trim_start_matches("vec3(")
                        .trim_end_matches(')')
                        .split(',')
                        .map(|component| component.trim().parse::<f32>().expect("vec3 literal"))
                        .collect::<Vec<_>>();
                    ConstValue::Vec3(Vec3::new(components[0], components[1], components[2]))
                }
                other => panic!("unexpected const type {other}"),
            };
            constants.insert(name.to_string(), value);
        }

        let int = |name: &str| match constants.get(name) {
            Some(ConstValue::Int(value)) => *value,
            _ => panic!("missing const int {name}"),
        };
        let float = |name: &str| match constants.get(name) {
            Some(ConstValue::Float(value)) => *value,
            _ => panic!("missing const float {name}"),
        };
        let vec3 = |name: &str| match constants.get(name) {
            Some(ConstValue::Vec3(value)) => *value,
            _ => panic!("missing const vec3 {name}"),
        };

        let mut sphere_materials = Vec::new();
        while let Some(ConstValue::Int(material)) =
            constants.get(&format!("SPHERE_MATERIAL_{}", sphere_materials.len()))
        {
            sphere_materials.push(*material);
        }

        Self {
            bounces: int("BOUNCES"),
            epsilon: float("EPSILON"),
            infinity: float("INFINITY"),
            light_size: float("LIGHT_SIZE"),
            light_value: float("LIGHT_VALUE"),
            trace_resolution: float("TRACE_RESOLUTION"),
            left_wall_color: vec3("LEFT_WALL_COLOR"),
            right_wall_color: vec3("RIGHT_WALL_COLOR"),
            sphere_materials,
        }
    }

    /// 1ピクセル分のfragment shader
    fn shade(&self, uniforms: &TracerUniforms, frag_coord: Vec3, percent: Vec2, previous: Vec3) -> Vec3 {
        let initial_ray = mix3(
            mix3(uniforms.ray00, uniforms.ray01, percent.y),
            mix3(uniforms.ray10, uniforms.ray11, percent.y),
            percent.x,
        );
        let new_light = uniforms.light
            + uniformly_random_vector(frag_coord, uniforms.time_since_start - 53.0) * self.light_size;
        let color = self.calculate_color(uniforms, frag_coord, uniforms.eye, initial_ray, new_light);
        mix3(color, previous, uniforms.texture_weight)
    }

    fn calculate_color(
        &self,
        uniforms: &TracerUniforms,
        frag_coord: Vec3,
        mut origin: Vec3,
        mut ray: Vec3,
        light: Vec3,
    ) -> Vec3 {
        let mut color_mask = Vec3::ONE;
        let mut accumulated = Vec3::ZERO;

        for bounce in 0..self.bounces {
            let t_room = intersect_cube(origin, ray, ROOM_MIN, ROOM_MAX);
            let t_spheres = uniforms
                .spheres
                .iter()
                .map(|sphere| self.intersect_sphere(origin, ray, *sphere))
                .collect::<Vec<_>>();

            let mut t = self.infinity;
            if t_room.x < t_room.y {
                t = t_room.y;
            }
            for t_sphere in &t_spheres {
                if *t_sphere < t {
                    t = *t_sphere;
                }
            }

            let hit = origin + ray * t;
            let mut surface_color = Vec3::splat(0.75);
            let mut normal = Vec3::ZERO;
            let mut specular = 0.0;
            let seed = uniforms.time_since_start + bounce as f32;

            if t == t_room.y {
                normal = -self.normal_for_cube(hit);
                if hit.x < -0.9999 {
                    surface_color = self.left_wall_color;
                } else if hit.x > 0.9999 {
                    surface_color = self.right_wall_color;
                }
                ray = self.scatter(
                    MATERIAL_DIFFUSE,
                    uniforms,
                    frag_coord,
                    (ray, normal, hit, origin, light),
                    seed,
                    &mut specular,
                );
            } else if t == self.infinity {
                break;
            } else if let Some(i) = t_spheres.iter().position(|t_sphere| t == *t_sphere) {
                normal = normal_for_sphere(hit, uniforms.spheres[i]);
                ray = self.scatter(
                    self.sphere_materials[i],
                    uniforms,
                    frag_coord,
                    (ray, normal, hit, origin, light),
                    seed,
                    &mut specular,
                );
            }

            let to_light = light - hit;
            let diffuse = to_light.normalize().dot(normal).max(0.0);
            let shadow = self.shadow(uniforms, hit + normal * self.epsilon, to_light);
            color_mask *= surface_color;
            accumulated += color_mask * (self.light_value * diffuse * shadow);
            accumulated += color_mask * specular * shadow;

            origin = hit;
        }

        accumulated
    }

    fn scatter(
        &self,
        material: i32,
        uniforms: &TracerUniforms,
        frag_coord: Vec3,
        (ray, normal, hit, origin, light): (Vec3, Vec3, Vec3, Vec3, Vec3),
        seed: f32,
        specular: &mut f32,
    ) -> Vec3 {
        *specular = 0.0;
        if material == MATERIAL_MIRROR {
            *specular = 2.0 * specular_reflection(hit, normal, origin, light).powf(20.0);
            reflect(ray, normal)
        } else if material == MATERIAL_GLOSSY {
            *specular = specular_reflection(hit, normal, origin, light).powf(3.0);
            reflect(ray, normal).normalize()
                + uniformly_random_vector(frag_coord, seed) * uniforms.glossiness
        } else {
            cosine_weighted_direction(frag_coord, seed, normal)
        }
    }

    fn normal_for_cube(&self, hit: Vec3) -> Vec3 {
        if hit.x < ROOM_MIN.x + self.epsilon {
            Vec3::new(-1.0, 0.0, 0.0)
        } else if hit.x > ROOM_MAX.x - self.epsilon {
            Vec3::new(1.0, 0.0, 0.0)
        } else if hit.y < ROOM_MIN.y + self.epsilon {
            Vec3::new(0.0, -1.0, 0.0)
        } else if hit.y > ROOM_MAX.y - self.epsilon {
            Vec3::new(0.0, 1.0, 0.0)
        } else if hit.z < ROOM_MIN.z + self.epsilon {
            Vec3::new(0.0, 0.0, -1.0)
        } else {
            Vec3::new(0.0, 0.0, 1.0)
        }
    }

    fn intersect_sphere(&self, origin: Vec3, ray: Vec3, sphere: Vec4) -> f32 {
        let to_sphere = origin - sphere.truncate();
        let a = ray.dot(ray);
        let b = 2.0 * to_sphere.dot(ray);
        let c = to_sphere.dot(to_sphere) - sphere.w * sphere.w;
        let discriminant = b * b - 4.0 * a * c;
        if discriminant > 0.0 {
            let t = (-b - discriminant.sqrt()) / (2.0 * a);
            if t > 0.0 {
                return t;
            }
        }
        self.infinity
    }

    fn shadow(&self, uniforms: &TracerUniforms, origin: Vec3, ray: Vec3) -> f32 {
        for sphere in &uniforms.spheres {
            if self.intersect_sphere(origin, ray, *sphere) < 1.0 {
                return 0.0;
            }
        }
        1.0
    }
}

/// tracerのprogramに送られたuniformの値
struct TracerUniforms {
    eye: Vec3,
    light: Vec3,
    ray00: Vec3,
    ray01: Vec3,
    ray10: Vec3,
    ray11: Vec3,
    texture_weight: f32,
    time_since_start: f32,
    glossiness: f32,
    spheres: Vec<Vec4>,
}
impl TracerUniforms {
    fn read(program: &ProgramData, sphere_count: usize) -> Self {
        Self {
            eye: program.vec3("eye"),
            light: program.vec3("light"),
            ray00: program.vec3("ray00"),
            ray01: program.vec3("ray01"),
            ray10: program.vec3("ray10"),
            ray11: program.vec3("ray11"),
            texture_weight: program.float("textureWeight"),
            time_since_start: program.float("timeSinceStart"),
            glossiness: program.float("glossiness"),
            spheres: (0..sphere_count)
                .map(|i| program.vec4(&format!("sphereCenter{i}")))
                .collect(),
        }
    }
}

fn mix3(x: Vec3, y: Vec3, a: f32) -> Vec3 {
    x * (1.0 - a) + y * a
}

fn fract(x: f32) -> f32 {
    x - x.floor()
}

fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * normal.dot(incident) * normal
}

fn intersect_cube(origin: Vec3, ray: Vec3, cube_min: Vec3, cube_max: Vec3) -> Vec2 {
    let t_min = (cube_min - origin) / ray;
    let t_max = (cube_max - origin) / ray;
    let t1 = t_min.min(t_max);
    let t2 = t_min.max(t_max);
    let t_near = t1.x.max(t1.y).max(t1.z);
    let t_far = t2.x.min(t2.y).min(t2.z);
    Vec2::new(t_near, t_far)
}

fn normal_for_sphere(hit: Vec3, sphere: Vec4) -> Vec3 {
    (hit - sphere.truncate()) / sphere.w
}

fn random(frag_coord: Vec3, scale: Vec3, seed: f32) -> f32 {
    fract(((frag_coord + Vec3::splat(seed)).dot(scale)).sin() * 43758.5453 + seed)
}

fn cosine_weighted_direction(frag_coord: Vec3, seed: f32, normal: Vec3) -> Vec3 {
    let u = random(frag_coord, Vec3::new(12.9898, 78.233, 151.7182), seed);
    let v = random(frag_coord, Vec3::new(63.7264, 10.873, 623.6736), seed);
    let r = u.sqrt();
    let angle = std::f32::consts::TAU * v;
    let sdir = if normal.x.abs() < 0.5 {
        normal.cross(Vec3::X)
    } else {
        normal.cross(Vec3::Y)
    };
    let tdir = normal.cross(sdir);
    r * angle.cos() * sdir + r * angle.sin() * tdir + (1.0 - u).sqrt() * normal
}

fn uniformly_random_direction(frag_coord: Vec3, seed: f32) -> Vec3 {
    let u = random(frag_coord, Vec3::new(12.9898, 78.233, 151.7182), seed);
    let v = random(frag_coord, Vec3::new(63.7264, 10.873, 623.6736), seed);
    let z = 1.0 - 2.0 * u;
    let r = (1.0 - z * z).sqrt();
    let angle = std::f32::consts::TAU * v;
    Vec3::new(r * angle.cos(), r * angle.sin(), z)
}

fn uniformly_random_vector(frag_coord: Vec3, seed: f32) -> Vec3 {
    uniformly_random_direction(frag_coord, seed)
        * random(frag_coord, Vec3::new(36.7539, 50.3658, 306.2759), seed).sqrt()
}

fn specular_reflection(hit: Vec3, normal: Vec3, origin: Vec3, light: Vec3) -> f32 {
    let reflected_light = reflect(light - hit, normal).normalize();
    reflected_light.dot((hit - origin).normalize()).max(0.0)
}
