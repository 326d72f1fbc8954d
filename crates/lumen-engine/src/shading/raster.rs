//! Reference rasterizer math: coverage weights and perspective-correct interpolation.

use glam::{Vec2, Vec4};

use super::types::{Varying, VertexOutput};

/// Screen-space barycentric weights of `point` (NDC) for a triangle given in clip space.
///
/// Weights sum to one; any negative weight means the point lies outside.
/// Returns `None` for zero-area triangles and for vertices with `w <= 0`
/// (those would need clipping, which the reference path does not model).
pub fn barycentric(clip: [Vec4; 3], point: Vec2) -> Option<[f32; 3]> {
    if clip.iter().any(|c| c.w <= 0.0) {
        return None;
    }

    let [a, b, c] = clip.map(|p| Vec2::new(p.x, p.y) / p.w);
    let area = edge(a, b, c);
    if area == 0.0 || !area.is_finite() {
        return None;
    }

    let w0 = edge(b, c, point) / area;
    let w1 = edge(c, a, point) / area;
    Some([w0, w1, 1.0 - w0 - w1])
}

/// True when all weights are non-negative (edges are inclusive).
#[inline]
pub fn covers(weights: [f32; 3]) -> bool {
    weights.iter().all(|w| *w >= 0.0)
}

/// Interpolates the varyings of a triangle at screen-space `weights`.
///
/// Screen weights are corrected by each vertex's `1 / w` so attributes are
/// linear in eye space, matching the rasterizer's default `perspective`
/// interpolation.
pub fn interpolate(outputs: &[VertexOutput; 3], weights: [f32; 3]) -> Option<Varying> {
    let raw = [
        weights[0] / outputs[0].clip_position.w,
        weights[1] / outputs[1].clip_position.w,
        weights[2] / outputs[2].clip_position.w,
    ];
    let sum = raw[0] + raw[1] + raw[2];
    if sum == 0.0 || !sum.is_finite() {
        return None;
    }

    Varying::blend(outputs.map(|o| o.varying), raw.map(|r| r / sum))
}

/// Runs the rasterizer step for one sample point and hands the interpolated
/// varying to `fragment`.
///
/// Returns `None` when the point is not covered by the triangle.
pub fn shade_point<F>(outputs: &[VertexOutput; 3], point: Vec2, fragment: F) -> Option<Vec4>
where
    F: FnOnce(Varying) -> Vec4,
{
    let weights = barycentric(outputs.map(|o| o.clip_position), point)?;
    if !covers(weights) {
        return None;
    }
    interpolate(outputs, weights).map(fragment)
}

#[inline]
fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b - a).perp_dot(p - a)
}
