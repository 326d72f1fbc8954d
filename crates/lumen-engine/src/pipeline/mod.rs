//! Pipeline configurations and their GPU-facing layout.
//!
//! Binding and attribute numbering is fixed; the WGSL modules under `shaders/`
//! and the layouts here must agree exactly:
//!
//! - group 0: texture (binding 0) + filtering sampler (binding 1)
//! - group 1: camera uniform, one `mat4x4<f32>` (binding 0)
//! - location 0: position, location 1: color or uv, locations 5..=8: instance columns

mod kind;
mod layout;
mod program;

pub use kind::{Capabilities, PipelineKind};
pub use layout::BindingLayouts;
pub use program::{ShaderProgram, FRAGMENT_ENTRY, VERTEX_ENTRY};

/// Bind group and binding indices.
pub mod bindings {
    pub const TEXTURE_GROUP: u32 = 0;
    pub const TEXTURE: u32 = 0;
    pub const SAMPLER: u32 = 1;

    pub const CAMERA_GROUP: u32 = 1;
    pub const CAMERA: u32 = 0;
}

/// Vertex attribute locations.
pub mod locations {
    pub const POSITION: u32 = 0;
    pub const COLOR: u32 = 1;
    pub const TEX_COORDS: u32 = 1;
    pub const INSTANCE_COLUMNS: [u32; 4] = [5, 6, 7, 8];
}

/// Vertex buffer slots.
pub mod slots {
    pub const MESH: u32 = 0;
    pub const INSTANCES: u32 = 1;
}
