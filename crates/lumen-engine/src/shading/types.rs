use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

// ── vertices ──────────────────────────────────────────────────────────────

/// Vertex carrying a per-vertex color (location 0 = position, 1 = color).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl ColorVertex {
    #[inline]
    pub const fn new(position: [f32; 3], color: [f32; 3]) -> Self {
        Self { position, color }
    }
}

/// Vertex carrying texture coordinates (location 0 = position, 1 = uv).
///
/// Texture space has +V pointing down while clip space has +Y pointing up,
/// so geometry tables map V from the flipped position (see [`crate::mesh`]).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct TexturedVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl TexturedVertex {
    #[inline]
    pub const fn new(position: [f32; 3], tex_coords: [f32; 2]) -> Self {
        Self { position, tex_coords }
    }
}

// ── instance transform ────────────────────────────────────────────────────

/// Per-instance model transform.
///
/// A `mat4x4` cannot be bound as one vertex attribute, so the matrix travels as
/// four `vec4` attributes at consecutive locations, one per column. The layout
/// is column-major: `columns[n]` is the attribute at `INSTANCE_COLUMNS[n]`, and
/// concatenating the four slots in location order rebuilds exactly one matrix.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct InstanceTransform {
    pub columns: [[f32; 4]; 4],
}

impl InstanceTransform {
    pub const IDENTITY: Self = Self::from_columns(
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    );

    /// Builds a transform from its four attribute slots, in slot order.
    #[inline]
    pub const fn from_columns(c0: [f32; 4], c1: [f32; 4], c2: [f32; 4], c3: [f32; 4]) -> Self {
        Self { columns: [c0, c1, c2, c3] }
    }

    #[inline]
    pub fn from_mat4(m: Mat4) -> Self {
        Self { columns: m.to_cols_array_2d() }
    }

    /// Rotation followed by translation (`T * R`).
    pub fn from_translation_rotation(translation: Vec3, rotation: Quat) -> Self {
        Self::from_mat4(Mat4::from_rotation_translation(rotation, translation))
    }

    /// Attribute slot `slot` (0..4) as a vector.
    #[inline]
    pub fn column(&self, slot: usize) -> Vec4 {
        Vec4::from_array(self.columns[slot])
    }

    /// Reassembles the matrix; slot 0 is the first column.
    #[inline]
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_cols(self.column(0), self.column(1), self.column(2), self.column(3))
    }
}

impl Default for InstanceTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ── camera ────────────────────────────────────────────────────────────────

/// Uniform block bound at group 1, binding 0: one column-major view-projection matrix.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub const IDENTITY: Self = Self {
        view_proj: InstanceTransform::IDENTITY.columns,
    };

    #[inline]
    pub fn from_mat4(view_proj: Mat4) -> Self {
        Self { view_proj: view_proj.to_cols_array_2d() }
    }

    #[inline]
    pub fn view_proj(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.view_proj)
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ── stage output ──────────────────────────────────────────────────────────

/// The single data-carrying attribute a vertex stage hands to the rasterizer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Varying {
    Color(Vec3),
    TexCoords(Vec2),
    /// Raw clip-space position, used by the procedural triangle as a visual signal.
    Position(Vec3),
}

impl Varying {
    /// Weighted sum of three varyings of the same kind.
    ///
    /// Returns `None` when the kinds differ; a primitive never mixes pipelines.
    pub fn blend(values: [Varying; 3], weights: [f32; 3]) -> Option<Varying> {
        let [w0, w1, w2] = weights;
        match values {
            [Varying::Color(a), Varying::Color(b), Varying::Color(c)] => {
                Some(Varying::Color(a * w0 + b * w1 + c * w2))
            }
            [Varying::TexCoords(a), Varying::TexCoords(b), Varying::TexCoords(c)] => {
                Some(Varying::TexCoords(a * w0 + b * w1 + c * w2))
            }
            [Varying::Position(a), Varying::Position(b), Varying::Position(c)] => {
                Some(Varying::Position(a * w0 + b * w1 + c * w2))
            }
            _ => None,
        }
    }
}

/// Result of one vertex-stage invocation.
///
/// `clip_position` is consumed by the rasterizer only; fragment stages see the
/// interpolated `varying`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VertexOutput {
    pub clip_position: Vec4,
    pub varying: Varying,
}
