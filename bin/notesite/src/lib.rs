//! Notesite CLI Library
//!
//! Command implementation for the notesite binary. The binary entry point
//! in `main.rs` parses arguments and delegates here.

pub mod cmd;

// Re-export core types for convenience
pub use notesite_core::{Config, Note};
pub use notesite_generator::{BuildStats, Builder};

/// Initialize tracing from the `-v` count (0 = WARN up to 3+ = TRACE).
///
/// `RUST_LOG` still wins when set, so a single run can be narrowed to one
/// module without touching the flags.
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();
}
