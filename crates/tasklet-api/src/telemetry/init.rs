use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "tasklet=debug,tower_http=debug";

/// Initialize console tracing.
///
/// Uses `try_init` so a second call (tests building several apps in one
/// process) leaves the first subscriber in place instead of failing.
pub fn init_telemetry(environment: &str) -> Result<(), anyhow::Error> {
    let console_fmt = tracing_subscriber::fmt::layer().event_format(
        Format::default()
            .compact()
            .with_target(false)
            .without_time(),
    );

    let installed = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(console_fmt)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(environment = %environment, "Tracing initialized");
    }
    Ok(())
}
