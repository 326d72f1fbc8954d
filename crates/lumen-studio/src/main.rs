mod config;
mod studio;

use anyhow::Result;
use lumen_engine::device::GpuInit;
use lumen_engine::logging::{init_logging, LoggingConfig};
use lumen_engine::window::{Runtime, RuntimeConfig};

use crate::config::StudioConfig;
use crate::studio::Studio;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = StudioConfig::from_env();
    match &config.texture_path {
        Some(path) => log::info!("texture: {}", path.display()),
        None => log::info!("texture: checkerboard (set {} to load an image)", config::TEXTURE_ENV),
    }
    log::info!("controls: space = next pipeline, arrows = orbit, escape = quit");

    let runtime = RuntimeConfig {
        title: "lumen".to_string(),
        ..RuntimeConfig::default()
    };

    Runtime::run(runtime, GpuInit::default(), Studio::new(config))
}
