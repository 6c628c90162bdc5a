use crate::error::{RendererError, Result};

/// シーンに置ける球の最大数
///
/// 球ごとに交差判定のコードをシェーダーに展開するので上限を設けている。
pub const MAX_SPHERES: usize = 8;

/// 部屋のキューブの最小の角
pub const ROOM_MIN: glam::Vec3 = glam::Vec3::splat(-1.0);
/// 部屋のキューブの最大の角
pub const ROOM_MAX: glam::Vec3 = glam::Vec3::splat(1.0);

/// 球の材質
///
/// シェーダーの中で定数として焼き込まれるので、変更するとprogramの作り直しになる。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    /// cosine weightedに拡散反射する
    Diffuse,
    /// 完全鏡面反射
    Mirror,
    /// 反射方向をglossinessでぼかす
    Glossy,
}
impl Material {
    /// シェーダー側で使う材質のID
    pub fn shader_id(self) -> i32 {
        match self {
            Material::Diffuse => 0,
            Material::Mirror => 1,
            Material::Glossy => 2,
        }
    }
}

/// 部屋の左右の壁の色の組み合わせ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    RedGreen,
    YellowBlue,
}
impl Environment {
    /// (x = -1の壁の色, x = 1の壁の色)
    pub fn wall_colors(self) -> (glam::Vec3, glam::Vec3) {
        match self {
            Environment::RedGreen => (glam::vec3(1.0, 0.3, 0.1), glam::vec3(0.3, 1.0, 0.1)),
            Environment::YellowBlue => (glam::vec3(0.1, 0.5, 1.0), glam::vec3(1.0, 0.9, 0.1)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: glam::Vec3,
    pub radius: f32,
    pub material: Material,
}
impl Sphere {
    /// uniformに送るvec4 (xyz: 中心, w: 半径)
    pub fn packed(&self) -> glam::Vec4 {
        self.center.extend(self.radius)
    }
}

/// 部屋の中に置く光源と球
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub light: glam::Vec3,
    pub spheres: Vec<Sphere>,
}
impl Default for Scene {
    fn default() -> Self {
        Self {
            light: glam::vec3(0.4, 0.5, -0.6),
            spheres: vec![Sphere {
                center: glam::vec3(0.0, -0.75, 0.0),
                radius: 0.25,
                material: Material::Glossy,
            }],
        }
    }
}
impl Scene {
    pub fn validate(&self) -> Result<()> {
        if self.spheres.len() > MAX_SPHERES {
            return Err(RendererError::TooManySpheres {
                count: self.spheres.len(),
                max: MAX_SPHERES,
            });
        }
        if !self.light.is_finite() {
            return Err(RendererError::InvalidParameters(format!(
                "light position must be finite: {}",
                self.light
            )));
        }
        for (i, sphere) in self.spheres.iter().enumerate() {
            if !sphere.center.is_finite() || !sphere.radius.is_finite() || sphere.radius <= 0.0 {
                return Err(RendererError::InvalidParameters(format!(
                    "sphere {i} must have a finite center and a positive radius: {:?}",
                    sphere
                )));
            }
        }
        Ok(())
    }

    /// シェーダーに焼き込まれる球の数と材質が違うかどうか
    pub fn layout_differs(&self, other: &Scene) -> bool {
        self.spheres.len() != other.spheres.len()
            || self
                .spheres
                .iter()
                .zip(&other.spheres)
                .any(|(a, b)| a.material != b.material)
    }

    pub fn materials(&self) -> Vec<Material> {
        self.spheres.iter().map(|sphere| sphere.material).collect()
    }
}

/// 画面上の座標を光源のxyに写す
///
/// 左上が(-1, 1)、右下が(1, -1)になる。
pub fn light_from_pointer(x: f32, y: f32, width: u32, height: u32) -> glam::Vec2 {
    let width = width.max(1) as f32;
    let height = height.max(1) as f32;
    glam::vec2(x / width * 2.0 - 1.0, 1.0 - y / height * 2.0)
}
