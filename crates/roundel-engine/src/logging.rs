//! Logger setup.
//!
//! Library code only talks to the `log` facade; binaries call
//! [`init_logging`] once at startup.

use env_logger::{Builder, Env, WriteStyle};

/// Logger configuration.
///
/// `filter` uses the `env_logger` directive syntax, e.g.
/// `"roundel_ui=debug,roundel_engine=warn"`. Without it `RUST_LOG` applies,
/// falling back to `info`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    pub write_style: WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: None, write_style: WriteStyle::Auto }
    }
}

impl LoggingConfig {
    /// Config with an explicit filter, e.g. from a `--log` flag.
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self { filter: Some(filter.into()), ..Self::default() }
    }
}

/// Installs the global logger.
///
/// Returns `false` when a logger was already installed, by an earlier call
/// or by someone else; the existing logger stays in place.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    if let Some(filter) = &config.filter {
        builder.parse_filters(filter);
    }
    builder.write_style(config.write_style);

    let installed = builder.try_init().is_ok();
    if installed {
        log::debug!("logging initialized");
    }
    installed
}
