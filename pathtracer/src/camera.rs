//! 軌道カメラとフラスタムの四隅のレイの計算

/// 縦方向の画角 (度)
pub const FIELD_OF_VIEW_Y_DEGREES: f32 = 45.0;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 100.0;

/// 原点を中心に回る軌道カメラ
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub angle_x: f32,
    pub angle_y: f32,
    pub zoom: f32,
}
impl Default for Camera {
    fn default() -> Self {
        Self {
            angle_x: 0.0,
            angle_y: 0.0,
            zoom: 2.5,
        }
    }
}
impl Camera {
    /// 球座標から視点の位置を求める
    pub fn eye(&self) -> glam::Vec3 {
        let (sin_x, cos_x) = self.angle_x.sin_cos();
        let (sin_y, cos_y) = self.angle_y.sin_cos();
        self.zoom * glam::vec3(sin_y * cos_x, sin_x, cos_y * cos_x)
    }

    /// 原点を向くview行列
    pub fn view_matrix(&self) -> glam::Mat4 {
        glam::Mat4::look_at_rh(self.eye(), glam::Vec3::ZERO, glam::Vec3::Y)
    }

    pub fn view_projection(&self, aspect: f32) -> glam::Mat4 {
        projection_matrix(aspect) * self.view_matrix()
    }

    pub fn corner_rays(&self, aspect: f32) -> CornerRays {
        CornerRays::new(&self.view_projection(aspect), self.eye())
    }
}

/// 45度の画角の透視投影行列
pub fn projection_matrix(aspect: f32) -> glam::Mat4 {
    glam::Mat4::perspective_rh_gl(FIELD_OF_VIEW_Y_DEGREES.to_radians(), aspect, NEAR, FAR)
}

/// NDCの点(x, y)を通るワールド空間のレイの方向 (正規化はしない)
///
/// クリップ空間の(x, y, 0, 1)を逆変換してwで割り、視点の位置を引く。
pub fn eye_ray(inverse_view_projection: &glam::Mat4, eye: glam::Vec3, x: f32, y: f32) -> glam::Vec3 {
    let point = *inverse_view_projection * glam::vec4(x, y, 0.0, 1.0);
    point.truncate() / point.w - eye
}

/// フラスタムの四隅のレイ
///
/// 添字は(x, y)の順で、0が-1、1が+1の側。
/// vertex shaderでこれを画面上の割合で双線形補間して各ピクセルのレイにする。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerRays {
    pub ray00: glam::Vec3,
    pub ray01: glam::Vec3,
    pub ray10: glam::Vec3,
    pub ray11: glam::Vec3,
}
impl CornerRays {
    pub fn new(view_projection: &glam::Mat4, eye: glam::Vec3) -> Self {
        let inverse = view_projection.inverse();
        Self {
            ray00: eye_ray(&inverse, eye, -1.0, -1.0),
            ray01: eye_ray(&inverse, eye, -1.0, 1.0),
            ray10: eye_ray(&inverse, eye, 1.0, -1.0),
            ray11: eye_ray(&inverse, eye, 1.0, 1.0),
        }
    }

    /// 画面上の割合(0..1)でのレイ
    ///
    /// tracer.vertの`initialRay`と同じ補間をする。
    pub fn interpolate(&self, percent: glam::Vec2) -> glam::Vec3 {
        let left = self.ray00.lerp(self.ray01, percent.y);
        let right = self.ray10.lerp(self.ray11, percent.y);
        left.lerp(right, percent.x)
    }
}
