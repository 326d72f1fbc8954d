use glam::{Vec2, Vec3, Vec4};

use super::types::{
    CameraUniform, ColorVertex, InstanceTransform, TexturedVertex, Varying, VertexOutput,
};

/// Interpolated-color stage: position passes through, color is the varying.
///
/// Mirrors `vs_main` in `shaders/color.wgsl`.
#[inline]
pub fn color_vertex(vertex: &ColorVertex) -> VertexOutput {
    VertexOutput {
        clip_position: Vec3::from_array(vertex.position).extend(1.0),
        varying: Varying::Color(Vec3::from_array(vertex.color)),
    }
}

/// Textured stage with an optional camera.
///
/// `None` is the identity transform: the clip position is `(position, 1)`
/// without any multiplication. Mirrors `vs_main` in `shaders/textured.wgsl`.
#[inline]
pub fn textured_vertex(vertex: &TexturedVertex, camera: Option<&CameraUniform>) -> VertexOutput {
    let position = Vec3::from_array(vertex.position).extend(1.0);
    let clip_position = match camera {
        Some(camera) => camera.view_proj() * position,
        None => position,
    };

    VertexOutput {
        clip_position,
        varying: Varying::TexCoords(Vec2::from_array(vertex.tex_coords)),
    }
}

/// Instanced textured stage.
///
/// The instance transform is applied in object space, then the camera:
/// `view_proj * model * (position, 1)`, evaluated left to right like the WGSL
/// expression in `shaders/instanced.wgsl`.
#[inline]
pub fn instanced_vertex(
    vertex: &TexturedVertex,
    instance: &InstanceTransform,
    camera: &CameraUniform,
) -> VertexOutput {
    let model = instance.to_mat4();
    let position = Vec3::from_array(vertex.position).extend(1.0);

    VertexOutput {
        clip_position: camera.view_proj() * model * position,
        varying: Varying::TexCoords(Vec2::from_array(vertex.tex_coords)),
    }
}

/// Procedural triangle stage; reads no vertex buffer.
///
/// Indices 0, 1, 2 produce the corners (0.5, -0.5), (0.0, 0.5), (-0.5, -0.5).
/// Arithmetic is done on `i32` with wrapping, as WGSL does, then cast.
#[inline]
pub fn procedural_vertex(vertex_index: u32) -> VertexOutput {
    let i = vertex_index as i32;
    let x = 1i32.wrapping_sub(i) as f32 * 0.5;
    let y = ((vertex_index & 1) as i32 * 2 - 1) as f32 * 0.5;
    let clip_position = Vec4::new(x, y, 0.0, 1.0);

    VertexOutput {
        clip_position,
        varying: Varying::Position(clip_position.truncate()),
    }
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Quat};

    use super::*;

    fn sample_camera() -> CameraUniform {
        let proj = Mat4::perspective_rh(45f32.to_radians(), 1.5, 0.1, 100.0);
        let view = Mat4::look_at_rh(Vec3::new(0.0, 1.0, 2.0), Vec3::ZERO, Vec3::Y);
        CameraUniform::from_mat4(proj * view)
    }

    fn tv(x: f32, y: f32, z: f32) -> TexturedVertex {
        TexturedVertex::new([x, y, z], [0.25, 0.75])
    }

    // ── plain ─────────────────────────────────────────────────────────────

    #[test]
    fn color_vertex_passes_position_and_color() {
        let out = color_vertex(&ColorVertex::new([0.1, -0.2, 0.3], [1.0, 0.5, 0.0]));
        assert_eq!(out.clip_position, Vec4::new(0.1, -0.2, 0.3, 1.0));
        assert_eq!(out.varying, Varying::Color(Vec3::new(1.0, 0.5, 0.0)));
    }

    // ── textured ──────────────────────────────────────────────────────────

    #[test]
    fn textured_vertex_applies_camera() {
        let camera = sample_camera();
        let v = tv(0.3, -0.4, 0.0);
        let out = textured_vertex(&v, Some(&camera));
        let expected = camera.view_proj() * Vec4::new(0.3, -0.4, 0.0, 1.0);
        assert_eq!(out.clip_position, expected);
        assert_eq!(out.varying, Varying::TexCoords(Vec2::new(0.25, 0.75)));
    }

    #[test]
    fn textured_vertex_without_camera_is_exact_passthrough() {
        let v = tv(-0.0868241, 0.49240386, 0.0);
        let out = textured_vertex(&v, None);
        assert_eq!(out.clip_position, Vec4::new(-0.0868241, 0.49240386, 0.0, 1.0));
    }

    #[test]
    fn missing_camera_matches_identity_camera() {
        let v = tv(0.44147372, 0.2347359, -0.5);
        let flat = textured_vertex(&v, None);
        let identity = textured_vertex(&v, Some(&CameraUniform::IDENTITY));
        assert_eq!(flat, identity);
    }

    // ── instanced ─────────────────────────────────────────────────────────

    #[test]
    fn identity_instance_matches_camera_case() {
        let camera = sample_camera();
        let v = tv(0.2, 0.1, -0.3);
        let instanced = instanced_vertex(&v, &InstanceTransform::IDENTITY, &camera);
        let plain = textured_vertex(&v, Some(&camera));
        assert!(instanced.clip_position.abs_diff_eq(plain.clip_position, 1e-6));
        assert_eq!(instanced.varying, plain.varying);
    }

    #[test]
    fn instance_is_applied_before_camera() {
        let camera = sample_camera();
        let instance = InstanceTransform::from_translation_rotation(
            Vec3::new(1.0, 0.0, -2.0),
            Quat::from_rotation_y(0.5),
        );
        let v = tv(0.5, 0.5, 0.0);

        let out = instanced_vertex(&v, &instance, &camera);
        let expected = camera.view_proj() * instance.to_mat4() * Vec4::new(0.5, 0.5, 0.0, 1.0);
        assert_eq!(out.clip_position, expected);

        let camera_first = instance.to_mat4() * camera.view_proj() * Vec4::new(0.5, 0.5, 0.0, 1.0);
        assert!(!out.clip_position.abs_diff_eq(camera_first, 1e-3));
    }

    #[test]
    fn instance_translation_by_hand() {
        // Pure translation with an identity camera: clip = p + t.
        let instance = InstanceTransform::from_columns(
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.25, -0.5, 0.0, 1.0],
        );
        let out = instanced_vertex(&tv(0.5, 0.5, 0.0), &instance, &CameraUniform::IDENTITY);
        assert_eq!(out.clip_position, Vec4::new(0.75, 0.0, 0.0, 1.0));
    }

    #[test]
    fn swapped_columns_change_the_result() {
        let camera = CameraUniform::IDENTITY;
        let straight = InstanceTransform::from_columns(
            [2.0, 0.0, 0.0, 0.0],
            [0.0, 3.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        );
        let swapped = InstanceTransform::from_columns(
            straight.columns[1],
            straight.columns[0],
            straight.columns[2],
            straight.columns[3],
        );
        let v = tv(1.0, 0.0, 0.0);
        let a = instanced_vertex(&v, &straight, &camera);
        let b = instanced_vertex(&v, &swapped, &camera);
        assert_eq!(a.clip_position, Vec4::new(2.0, 0.0, 0.0, 1.0));
        assert_eq!(b.clip_position, Vec4::new(0.0, 3.0, 0.0, 1.0));
    }

    // ── procedural ────────────────────────────────────────────────────────

    #[test]
    fn procedural_corners() {
        let corners: Vec<Vec4> = (0..3).map(|i| procedural_vertex(i).clip_position).collect();
        assert_eq!(corners[0], Vec4::new(0.5, -0.5, 0.0, 1.0));
        assert_eq!(corners[1], Vec4::new(0.0, 0.5, 0.0, 1.0));
        assert_eq!(corners[2], Vec4::new(-0.5, -0.5, 0.0, 1.0));
    }

    #[test]
    fn procedural_varying_is_clip_xyz() {
        for i in 0..3 {
            let out = procedural_vertex(i);
            assert_eq!(out.varying, Varying::Position(out.clip_position.truncate()));
        }
    }

    // ── idempotence ───────────────────────────────────────────────────────

    #[test]
    fn stages_are_bit_identical_across_calls() {
        let camera = sample_camera();
        let instance = InstanceTransform::from_translation_rotation(Vec3::ONE, Quat::from_rotation_x(1.1));
        let v = tv(0.123, -0.456, 0.789);

        let a = instanced_vertex(&v, &instance, &camera);
        let b = instanced_vertex(&v, &instance, &camera);
        assert_eq!(a.clip_position.to_array().map(f32::to_bits), b.clip_position.to_array().map(f32::to_bits));
        assert_eq!(a.varying, b.varying);

        let c = textured_vertex(&v, Some(&camera));
        let d = textured_vertex(&v, Some(&camera));
        assert_eq!(c, d);

        assert_eq!(procedural_vertex(2), procedural_vertex(2));
    }
}
