//! CPU reference implementation of the shading stages.
//!
//! Each function mirrors one WGSL entry point under `pipeline/shaders`, operation
//! for operation, so GPU output can be predicted (and tested) without a device.
//!
//! Stages are pure functions of their inputs. Nothing here keeps state between
//! invocations, which is what makes the GPU free to run them in any order.

mod fragment;
pub mod raster;
mod types;
mod vertex;

pub use fragment::{
    color_fragment, procedural_fragment, textured_fragment, TextureSampler, DEBUG_COLOR,
};
pub use types::{
    CameraUniform, ColorVertex, InstanceTransform, TexturedVertex, Varying, VertexOutput,
};
pub use vertex::{color_vertex, instanced_vertex, procedural_vertex, textured_vertex};
