use std::ffi::OsString;
use std::path::PathBuf;

use glam::Vec3;
use lumen_engine::camera::Camera;
use lumen_engine::pipeline::PipelineKind;
use lumen_engine::texture::SamplerConfig;

/// Environment variable naming an image file to use as the texture.
pub const TEXTURE_ENV: &str = "LUMEN_TEXTURE";

/// Demo settings.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub initial_kind: PipelineKind,
    /// Image for the textured kinds; a checkerboard is used when absent or unreadable.
    pub texture_path: Option<PathBuf>,
    pub sampler: SamplerConfig,
    pub camera: Camera,
    /// Instances per row of the instanced grid.
    pub grid_rows: u32,
    pub grid_spacing: f32,
    /// Radians per arrow key press.
    pub orbit_step: f32,
    pub clear: wgpu::Color,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            initial_kind: PipelineKind::InterpolatedColor,
            texture_path: None,
            sampler: SamplerConfig::default(),
            camera: Camera {
                eye: Vec3::new(0.0, 3.0, 6.0),
                ..Camera::default()
            },
            grid_rows: 6,
            grid_spacing: 1.2,
            orbit_step: 0.1,
            clear: wgpu::Color {
                r: 0.1,
                g: 0.2,
                b: 0.3,
                a: 1.0,
            },
        }
    }
}

impl StudioConfig {
    pub fn from_env() -> Self {
        Self::with_texture_var(std::env::var_os(TEXTURE_ENV))
    }

    fn with_texture_var(texture: Option<OsString>) -> Self {
        Self {
            texture_path: texture.filter(|v| !v.is_empty()).map(PathBuf::from),
            ..Self::default()
        }
    }
}
