//! Texture sources, GPU upload, and the sampler policy.
//!
//! Images are stored as `Rgba8UnormSrgb`; [`ImageSampler`] reproduces the GPU
//! sampler on the CPU for reference shading.

mod gpu;
mod sampler;
mod source;

pub use gpu::{GpuTexture, TEXTURE_FORMAT};
pub use sampler::{ImageSampler, SamplerConfig};
pub use source::{checkerboard, default_texture, load_image};
