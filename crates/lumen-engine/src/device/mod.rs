//! GPU device and window surface.
//!
//! Creates the device and queue, keeps the surface configured across resizes
//! and lost surfaces, and hands out one encoder + view per frame.

mod gpu;
mod surface;

pub use gpu::{Frame, Gpu, GpuInit};
