use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_DIRECTIVES: &str = "warn,studio_blocks=info,studio_meta=info";

/// Install a global subscriber that writes field-editing events to stderr.
///
/// Hosts embedding the block editor call this once at startup; the crates
/// themselves only emit events. Fails if a global subscriber is already set.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_DIRECTIVES))?;

    let events = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact();

    tracing_subscriber::registry().with(filter).with(events).try_init()?;
    Ok(())
}
