//! Contracts between the window runtime and applications.
//!
//! The runtime owns the platform loop and the GPU; applications see one
//! [`FrameCtx`] per redraw and never touch runtime internals.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
