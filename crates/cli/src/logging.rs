// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "RV_LOG";

/// Installs a stderr subscriber filtered by `$RV_LOG`, then `$RUST_LOG`.
///
/// Defaults to `warn` so normal output stays clean.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // A subscriber may already be installed when running inside tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
