/* src/cli/core/src/logging.rs */

// Diagnostics go through tracing to stderr; user-facing progress stays in `ui`.

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directives, e.g. `NEXT2D_LOG=debug`.
pub const LOG_ENV: &str = "NEXT2D_LOG";

pub fn init() {
  let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
  let _ = tracing_subscriber::registry()
    .with(
      fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .with_filter(filter),
    )
    .try_init();
}
