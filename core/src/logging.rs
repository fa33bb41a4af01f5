//! Process-wide logging setup.
//!
//! `init` installs a stderr `tracing` subscriber once per process. The level
//! passed to the first call becomes the default directive; `RUST_LOG`
//! overrides it per target. Later calls leave the installed subscriber alone.

use std::sync::OnceLock;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Install the global subscriber. Returns `true` if this call installed it,
/// `false` if logging was already set up (by an earlier call or by someone
/// else registering a global subscriber).
pub fn init(default_level: &str) -> bool {
    let mut installed_now = false;
    INSTALLED.get_or_init(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(default_directive(default_level).into())
            .from_env_lossy();
        installed_now = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok();
        installed_now
    });
    installed_now
}

/// `level` as a filter, or INFO when it names no level.
fn default_directive(level: &str) -> LevelFilter {
    level.parse().unwrap_or(LevelFilter::INFO)
}

/// Whether `init` has run in this process.
pub fn is_initialized() -> bool {
    INSTALLED.get().is_some()
}
