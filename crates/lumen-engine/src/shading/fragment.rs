use glam::{Vec2, Vec3, Vec4};

/// Constant output of the procedural triangle's fragment stage.
pub const DEBUG_COLOR: Vec4 = Vec4::new(0.3, 0.2, 0.1, 1.0);

/// Read-only texture + sampler pair as seen by a fragment stage.
///
/// Filtering and out-of-range handling belong to the implementation; the stage
/// only supplies the interpolated coordinate.
pub trait TextureSampler {
    fn sample(&self, uv: Vec2) -> Vec4;
}

impl<T: TextureSampler + ?Sized> TextureSampler for &T {
    #[inline]
    fn sample(&self, uv: Vec2) -> Vec4 {
        (**self).sample(uv)
    }
}

/// Interpolated-color stage: `(color, 1.0)`.
#[inline]
pub fn color_fragment(color: Vec3) -> Vec4 {
    color.extend(1.0)
}

/// Textured stage (shared by the camera, no-camera and instanced pipelines).
#[inline]
pub fn textured_fragment<S: TextureSampler + ?Sized>(texture: &S, uv: Vec2) -> Vec4 {
    texture.sample(uv)
}

/// Procedural stage. The interpolated position is ignored.
#[inline]
pub fn procedural_fragment(_position: Vec3) -> Vec4 {
    DEBUG_COLOR
}
