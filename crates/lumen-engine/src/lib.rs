//! Lumen engine crate.
//!
//! Five fixed shading pipelines (interpolated color, textured with and without
//! a camera, instanced textured, procedural) in two renditions: WGSL programs
//! drawn through wgpu, and a CPU reference of the same stages in [`shading`].
//! The remaining modules host them: device and window runtime, textures,
//! meshes, camera and the renderer.

pub mod camera;
pub mod core;
pub mod device;
pub mod logging;
pub mod mesh;
pub mod pipeline;
pub mod render;
pub mod shading;
pub mod texture;
pub mod window;
