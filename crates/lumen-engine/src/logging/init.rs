use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "lumen_engine=debug,wgpu_core=warn") and takes precedence over `RUST_LOG`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            env_filter: Some(filter.into()),
            ..Self::default()
        }
    }
}

/// Used when neither the config nor `RUST_LOG` names a filter. wgpu is chatty at info.
const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Subsequent calls are ignored. Call early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = resolve_filter(config.env_filter, std::env::var("RUST_LOG").ok());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter);
        builder.write_style(config.write_style);

        if builder.try_init().is_err() {
            // Another logger was installed first; keep it.
            return;
        }

        log::debug!("logging initialized with filter '{filter}'");
    });
}

/// Config, then `RUST_LOG`, then [`DEFAULT_FILTER`]; blank values count as unset.
fn resolve_filter(configured: Option<String>, env: Option<String>) -> String {
    let non_blank = |f: &String| !f.trim().is_empty();
    configured
        .filter(non_blank)
        .or_else(|| env.filter(non_blank))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}
