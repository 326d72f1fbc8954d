use crate::shading::{ColorVertex, InstanceTransform, TexturedVertex};

/// Entry point names shared by every shader module.
pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// A compiled shader module + pipeline layout combination.
///
/// Pipelines are cached per program, so kinds that differ only in the
/// resources the host binds reuse one pipeline object.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderProgram {
    InterpolatedColor,
    Textured,
    InstancedTextured,
    Procedural,
}

impl ShaderProgram {
    pub const fn source(self) -> &'static str {
        match self {
            ShaderProgram::InterpolatedColor => include_str!("shaders/color.wgsl"),
            ShaderProgram::Textured => include_str!("shaders/textured.wgsl"),
            ShaderProgram::InstancedTextured => include_str!("shaders/instanced.wgsl"),
            ShaderProgram::Procedural => include_str!("shaders/procedural.wgsl"),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ShaderProgram::InterpolatedColor => "lumen color",
            ShaderProgram::Textured => "lumen textured",
            ShaderProgram::InstancedTextured => "lumen instanced",
            ShaderProgram::Procedural => "lumen procedural",
        }
    }

    /// Declares the group 0 texture/sampler bindings.
    pub const fn uses_texture_group(self) -> bool {
        matches!(self, ShaderProgram::Textured | ShaderProgram::InstancedTextured)
    }

    /// Declares the group 1 camera uniform.
    pub const fn uses_camera_group(self) -> bool {
        matches!(self, ShaderProgram::Textured | ShaderProgram::InstancedTextured)
    }

    pub const fn reads_vertex_buffer(self) -> bool {
        !matches!(self, ShaderProgram::Procedural)
    }

    pub const fn reads_instances(self) -> bool {
        matches!(self, ShaderProgram::InstancedTextured)
    }

    /// Vertex buffer layouts in slot order (slot 0 = mesh, slot 1 = instances).
    pub fn vertex_buffers(self) -> Vec<wgpu::VertexBufferLayout<'static>> {
        match self {
            ShaderProgram::InterpolatedColor => vec![ColorVertex::layout()],
            ShaderProgram::Textured => vec![TexturedVertex::layout()],
            ShaderProgram::InstancedTextured => {
                vec![TexturedVertex::layout(), InstanceTransform::layout()]
            }
            ShaderProgram::Procedural => Vec::new(),
        }
    }
}
