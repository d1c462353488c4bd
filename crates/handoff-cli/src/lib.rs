pub mod cmd;
pub mod output;
pub mod root;

use handoff_core::config::{Config, WarnLevel};
use std::path::Path;

/// Install the stderr subscriber. `RUST_LOG` refines the default `warn` level.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Project config, falling back to defaults when the file cannot be used.
pub fn load_config(root: &Path) -> Config {
    let config = match Config::load(root) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable .claude/handoff.yaml");
            return Config::default();
        }
    };
    for warning in config.validate() {
        match warning.level {
            WarnLevel::Error => tracing::error!("config: {}", warning.message),
            WarnLevel::Warning => tracing::warn!("config: {}", warning.message),
        }
    }
    config
}
