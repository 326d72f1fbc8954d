//! Bundled geometry and the GPU buffers that carry it.
//!
//! Every table is counter-clockwise in NDC, so back-face culling keeps it.
//! Texture coordinates use a top-left origin: `v = 0.5 - y` for geometry
//! spanning `-0.5..0.5`.

use std::ops::Range;

use bytemuck::Pod;
use glam::{Quat, Vec3};
use wgpu::util::DeviceExt;

use crate::pipeline::slots;
use crate::shading::{ColorVertex, InstanceTransform, TexturedVertex};

// ── geometry tables ───────────────────────────────────────────────────────

pub const COLOR_TRIANGLE: [ColorVertex; 3] = [
    ColorVertex::new([0.0, 0.5, 0.0], [1.0, 0.0, 0.0]),
    ColorVertex::new([-0.5, -0.5, 0.0], [0.0, 1.0, 0.0]),
    ColorVertex::new([0.5, -0.5, 0.0], [0.0, 0.0, 1.0]),
];

pub const COLOR_TRIANGLE_INDICES: [u16; 3] = [0, 1, 2];

pub const PENTAGON_VERTICES: [TexturedVertex; 5] = [
    TexturedVertex::new([-0.0868241, 0.49240386, 0.0], [0.4131759, 0.00759614]),
    TexturedVertex::new([-0.49513406, 0.06958647, 0.0], [0.0048659444, 0.43041354]),
    TexturedVertex::new([-0.21918549, -0.44939706, 0.0], [0.28081453, 0.949397]),
    TexturedVertex::new([0.35966998, -0.3473291, 0.0], [0.85967, 0.84732914]),
    TexturedVertex::new([0.44147372, 0.2347359, 0.0], [0.9414737, 0.2652641]),
];

pub const PENTAGON_INDICES: [u16; 9] = [0, 1, 4, 1, 2, 4, 2, 3, 4];

pub const QUAD_VERTICES: [TexturedVertex; 4] = [
    TexturedVertex::new([-0.5, 0.5, 0.0], [0.0, 0.0]),
    TexturedVertex::new([-0.5, -0.5, 0.0], [0.0, 1.0]),
    TexturedVertex::new([0.5, -0.5, 0.0], [1.0, 1.0]),
    TexturedVertex::new([0.5, 0.5, 0.0], [1.0, 0.0]),
];

pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// `rows` x `rows` transforms on the XZ plane, centered on the origin.
///
/// Each instance is tilted 45° about the axis pointing from the origin to its
/// position; an instance sitting exactly on the origin is not rotated.
pub fn instance_grid(rows: u32, spacing: f32) -> Vec<InstanceTransform> {
    let half = rows as f32 / 2.0;
    let mut out = Vec::with_capacity(grid_len(rows));

    for z in 0..rows {
        for x in 0..rows {
            let position = Vec3::new(x as f32 - half, 0.0, z as f32 - half) * spacing;
            let rotation = match position.try_normalize() {
                Some(axis) => Quat::from_axis_angle(axis, 45f32.to_radians()),
                None => Quat::IDENTITY,
            };
            out.push(InstanceTransform::from_translation_rotation(position, rotation));
        }
    }

    out
}

#[inline]
fn grid_len(rows: u32) -> usize {
    (rows as usize).saturating_mul(rows as usize)
}

// ── gpu buffers ───────────────────────────────────────────────────────────

/// Vertex + `Uint16` index buffer pair.
pub struct Mesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl Mesh {
    pub fn new<V: Pod>(device: &wgpu::Device, label: &str, vertices: &[V], indices: &[u16]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} vbo")),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} ibo")),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Binds slot 0 + the index buffer and issues one indexed draw.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, instances: Range<u32>) {
        pass.set_vertex_buffer(slots::MESH, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..self.index_count, 0, instances);
    }
}

/// Growable per-instance vertex buffer for slot 1.
#[derive(Default)]
pub struct InstanceBuffer {
    buffer: Option<wgpu::Buffer>,
    capacity: usize,
    len: u32,
}

impl InstanceBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads `instances`, reallocating when they no longer fit.
    pub fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, instances: &[InstanceTransform]) {
        self.len = instances.len() as u32;
        if instances.is_empty() {
            return;
        }

        self.ensure_capacity(device, instances.len());
        let Some(buffer) = self.buffer.as_ref() else { return };
        queue.write_buffer(buffer, 0, bytemuck::cast_slice(instances));
    }

    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Written range of the buffer, if anything has been written.
    pub fn slice(&self) -> Option<wgpu::BufferSlice<'_>> {
        let buffer = self.buffer.as_ref().filter(|_| self.len > 0)?;
        let end = u64::from(self.len) * std::mem::size_of::<InstanceTransform>() as u64;
        Some(buffer.slice(0..end))
    }

    fn ensure_capacity(&mut self, device: &wgpu::Device, required: usize) {
        if required <= self.capacity && self.buffer.is_some() {
            return;
        }

        let new_cap = grown_capacity(required);
        self.buffer = Some(device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lumen instance vbo"),
            size: (new_cap * std::mem::size_of::<InstanceTransform>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.capacity = new_cap;

        log::debug!("instance buffer grown to {new_cap} instances");
    }
}

fn grown_capacity(required: usize) -> usize {
    required.next_power_of_two().max(64)
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Vec2};

    use super::*;

    fn signed_area(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> f32 {
        let (a, b, c) = (Vec2::new(a[0], a[1]), Vec2::new(b[0], b[1]), Vec2::new(c[0], c[1]));
        (b - a).perp_dot(c - a)
    }

    fn assert_ccw(positions: &[[f32; 3]], indices: &[u16]) {
        assert_eq!(indices.len() % 3, 0);
        for tri in indices.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|n| positions[tri[n] as usize]);
            assert!(signed_area(a, b, c) > 0.0, "{tri:?} is clockwise");
        }
    }

    // ── tables ────────────────────────────────────────────────────────────

    #[test]
    fn tables_are_counter_clockwise() {
        let positions: Vec<_> = COLOR_TRIANGLE.iter().map(|v| v.position).collect();
        assert_ccw(&positions, &COLOR_TRIANGLE_INDICES);

        let positions: Vec<_> = PENTAGON_VERTICES.iter().map(|v| v.position).collect();
        assert_ccw(&positions, &PENTAGON_INDICES);

        let positions: Vec<_> = QUAD_VERTICES.iter().map(|v| v.position).collect();
        assert_ccw(&positions, &QUAD_INDICES);
    }

    #[test]
    fn pentagon_indices_in_range() {
        assert_eq!(PENTAGON_INDICES.len(), 9);
        assert!(PENTAGON_INDICES.iter().all(|&i| (i as usize) < PENTAGON_VERTICES.len()));
    }

    #[test]
    fn texture_coordinates_follow_position() {
        for v in PENTAGON_VERTICES.iter().chain(QUAD_VERTICES.iter()) {
            let [x, y, _] = v.position;
            let [u, t] = v.tex_coords;
            assert!((u - (x + 0.5)).abs() < 1e-5, "{v:?}");
            assert!((t - (0.5 - y)).abs() < 1e-5, "{v:?}");
        }
    }

    // ── instance grid ─────────────────────────────────────────────────────

    #[test]
    fn grid_has_rows_squared_instances() {
        assert_eq!(instance_grid(10, 1.0).len(), 100);
        assert!(instance_grid(0, 1.0).is_empty());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn grid_len_does_not_wrap_past_u16_rows() {
        assert_eq!(grid_len(65_535), 65_535 * 65_535);
        assert_eq!(grid_len(65_536) as u64, 1u64 << 32);
        assert_eq!(grid_len(70_000) as u64, 4_900_000_000);
        assert!(grid_len(u32::MAX) >= grid_len(70_000));
    }

    #[test]
    fn grid_is_centered_and_spaced() {
        let grid = instance_grid(4, 2.0);
        let first = grid[0].to_mat4().w_axis.truncate();
        let second = grid[1].to_mat4().w_axis.truncate();
        assert_eq!(first, Vec3::new(-4.0, 0.0, -4.0));
        assert_eq!(second - first, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn instance_on_origin_is_unrotated() {
        // rows = 2 → x, z in {-1, 0}; index 3 sits on the origin.
        let grid = instance_grid(2, 1.0);
        assert_eq!(grid[3].to_mat4(), Mat4::IDENTITY);
    }

    #[test]
    fn off_origin_instances_keep_their_axis() {
        for t in instance_grid(3, 1.5) {
            let m = t.to_mat4();
            let position = m.w_axis.truncate();
            if let Some(axis) = position.try_normalize() {
                assert!(m.transform_vector3(axis).abs_diff_eq(axis, 1e-5));
            }
        }
    }

    // ── capacity ──────────────────────────────────────────────────────────

    #[test]
    fn capacity_grows_in_powers_of_two_from_64() {
        assert_eq!(grown_capacity(1), 64);
        assert_eq!(grown_capacity(64), 64);
        assert_eq!(grown_capacity(65), 128);
        assert_eq!(grown_capacity(1000), 1024);
    }

    #[test]
    fn empty_instance_buffer_has_no_slice() {
        let buffer = InstanceBuffer::new();
        assert!(buffer.is_empty());
        assert!(buffer.slice().is_none());
        assert_eq!(buffer.capacity(), 0);
    }
}
