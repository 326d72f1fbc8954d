//! GPU rendering subsystem.
//!
//! [`StageRenderer`] turns a [`crate::pipeline::PipelineKind`] plus its bound
//! resources into one render pass. Each pass loads the existing target, so the
//! caller clears once per frame and may layer several draws.

mod ctx;
mod renderer;

pub use ctx::{RenderCtx, RenderTarget};
pub use renderer::{DrawInputs, StageRenderer};
