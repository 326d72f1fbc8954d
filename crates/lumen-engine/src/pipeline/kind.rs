use std::fmt;

use super::program::ShaderProgram;

/// Host resources a pipeline kind expects at draw time.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Capabilities {
    /// A camera uniform is supplied by the host (group 1).
    pub has_camera: bool,
    /// A texture + sampler pair is bound (group 0).
    pub has_texture: bool,
    /// An instance buffer with one transform per instance is bound (slot 1).
    pub has_instancing: bool,
}

/// The closed set of pipeline configurations.
///
/// Chosen once when a draw is recorded; stages never branch on it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PipelineKind {
    InterpolatedColor,
    Textured,
    /// Same program as [`PipelineKind::Textured`], drawn with an identity camera.
    TexturedNoCamera,
    InstancedTextured,
    ProceduralTriangle,
}

impl PipelineKind {
    pub const ALL: [PipelineKind; 5] = [
        PipelineKind::InterpolatedColor,
        PipelineKind::Textured,
        PipelineKind::TexturedNoCamera,
        PipelineKind::InstancedTextured,
        PipelineKind::ProceduralTriangle,
    ];

    pub const fn capabilities(self) -> Capabilities {
        match self {
            PipelineKind::InterpolatedColor | PipelineKind::ProceduralTriangle => Capabilities {
                has_camera: false,
                has_texture: false,
                has_instancing: false,
            },
            PipelineKind::Textured => Capabilities {
                has_camera: true,
                has_texture: true,
                has_instancing: false,
            },
            PipelineKind::TexturedNoCamera => Capabilities {
                has_camera: false,
                has_texture: true,
                has_instancing: false,
            },
            PipelineKind::InstancedTextured => Capabilities {
                has_camera: true,
                has_texture: true,
                has_instancing: true,
            },
        }
    }

    /// Compiled program backing this kind. Several kinds may share one.
    pub const fn program(self) -> ShaderProgram {
        match self {
            PipelineKind::InterpolatedColor => ShaderProgram::InterpolatedColor,
            PipelineKind::Textured | PipelineKind::TexturedNoCamera => ShaderProgram::Textured,
            PipelineKind::InstancedTextured => ShaderProgram::InstancedTextured,
            PipelineKind::ProceduralTriangle => ShaderProgram::Procedural,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PipelineKind::InterpolatedColor => "interpolated color",
            PipelineKind::Textured => "textured",
            PipelineKind::TexturedNoCamera => "textured (no camera)",
            PipelineKind::InstancedTextured => "instanced textured",
            PipelineKind::ProceduralTriangle => "procedural triangle",
        }
    }

    /// Next kind in [`PipelineKind::ALL`], wrapping around.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
