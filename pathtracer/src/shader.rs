//! テンプレートに定数を埋め込んでシェーダーのソースを組み立てる。
//!
//! ループ回数や分岐の閾値になる値はGLSL ES 1.00ではコンパイル時定数である必要があるので、
//! uniformではなくソースに直接焼き込む。
//! ソースの生成は定数だけから決まる純粋な関数で、GPUのコンテキストは要らない。

use crate::scene::{Environment, Material, Scene};

/// パストレース用のvertex shader
pub const TRACER_VERTEX_SOURCE: &str = include_str!("shaders/tracer.vert");
/// 蓄積したテクスチャを画面に描くvertex shader
pub const BLIT_VERTEX_SOURCE: &str = include_str!("shaders/blit.vert");
/// 蓄積したテクスチャを画面に描くfragment shader
pub const BLIT_FRAGMENT_SOURCE: &str = include_str!("shaders/blit.frag");

const TRACER_FRAGMENT_TEMPLATE: &str = include_str!("shaders/tracer.frag");

/// 頂点座標のattributeの名前とlocation
pub const VERTEX_ATTRIBUTE: (u32, &str) = (0, "vertex");

/// tracerのfragment shaderに焼き込む定数
#[derive(Debug, Clone, PartialEq)]
pub struct TracerConstants {
    pub bounces: u32,
    pub epsilon: f32,
    pub infinity: f32,
    pub light_size: f32,
    pub light_value: f32,
    /// 前回の蓄積結果を読むときのテクスチャ座標の分母
    pub trace_resolution: u32,
    pub environment: Environment,
    /// 球ごとの材質。球の数もここから決まる。
    pub materials: Vec<Material>,
}
impl TracerConstants {
    pub fn new(parameters: &crate::Parameters, scene: &Scene) -> Self {
        Self {
            bounces: parameters.bounces,
            epsilon: parameters.epsilon,
            infinity: parameters.infinity,
            light_size: parameters.light_size,
            light_value: parameters.light_value,
            trace_resolution: parameters.trace_resolution,
            environment: parameters.environment,
            materials: scene.materials(),
        }
    }
}

/// tracerのfragment shaderのソースを生成する
pub fn build_tracer_fragment_source(constants: &TracerConstants) -> String {
    let (left_wall, right_wall) = constants.environment.wall_colors();

    let mut declarations = String::new();
    let mut intersections = String::new();
    let mut closest = String::new();
    let mut surfaces = String::new();
    let mut shadows = String::new();
    for (i, material) in constants.materials.iter().enumerate() {
        declarations += &format!(
            "uniform vec4 sphereCenter{i};\nconst int SPHERE_MATERIAL_{i} = {};\n",
            material.shader_id()
        );
        intersections += &format!(
            "        float tSphere{i} = intersectSphere(origin, ray, sphereCenter{i});\n"
        );
        closest += &format!("        if (tSphere{i} < t) t = tSphere{i};\n");
        let branch = if i == 0 { "if" } else { "else if" };
        surfaces += &format!(
            "            {branch} (t == tSphere{i}) {{\n\
             \x20               normal = normalForSphere(hit, sphereCenter{i});\n\
             \x20               ray = scatter(SPHERE_MATERIAL_{i}, ray, normal, hit, origin, light, seed, specularHighlight);\n\
             \x20           }}\n"
        );
        shadows +=
            &format!("    if (intersectSphere(origin, ray, sphereCenter{i}) < 1.0) return 0.0;\n");
    }

    TRACER_FRAGMENT_TEMPLATE
        .replace("__BOUNCES__", &constants.bounces.to_string())
        .replace("__EPSILON__", &glsl_float(constants.epsilon))
        .replace("__INFINITY__", &glsl_float(constants.infinity))
        .replace("__LIGHT_SIZE__", &glsl_float(constants.light_size))
        .replace("__LIGHT_VALUE__", &glsl_float(constants.light_value))
        .replace(
            "__TRACE_RESOLUTION__",
            &glsl_float(constants.trace_resolution as f32),
        )
        .replace("__LEFT_WALL_COLOR__", &glsl_vec3(left_wall))
        .replace("__RIGHT_WALL_COLOR__", &glsl_vec3(right_wall))
        .replace("__SPHERE_DECLARATIONS__", &declarations)
        .replace("__SPHERE_INTERSECTIONS__", &intersections)
        .replace("__SPHERE_CLOSEST__", &closest)
        .replace("__SPHERE_SURFACES__", &surfaces)
        .replace("__SPHERE_SHADOWS__", &shadows)
}

/// `uniform vec4 sphereCenter{i}`の名前
pub fn sphere_uniform_name(index: usize) -> String {
    format!("sphereCenter{index}")
}

/// GLSLの浮動小数点リテラル
///
/// Debug表記は必ず小数点か指数を含むので、そのままGLSLのfloatとして読める。
fn glsl_float(value: f32) -> String {
    format!("{value:?}")
}

fn glsl_vec3(value: glam::Vec3) -> String {
    format!(
        "vec3({}, {}, {})",
        glsl_float(value.x),
        glsl_float(value.y),
        glsl_float(value.z)
    )
}
