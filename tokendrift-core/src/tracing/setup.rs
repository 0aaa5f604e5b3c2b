//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the tokendrift tracing/logging system.
///
/// Reads the `TOKENDRIFT_LOG` environment variable for per-subsystem log
/// levels. Format: `TOKENDRIFT_LOG=scanner=debug,extractors=info`
///
/// Falls back to `tokendrift=info` if `TOKENDRIFT_LOG` is not set or is
/// invalid.
///
/// This function is idempotent; calling it multiple times is safe.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("TOKENDRIFT_LOG")
            .unwrap_or_else(|_| EnvFilter::new("tokendrift=info"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .init();
    });
}
