use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding an EnvFilter directive
pub const LOG_ENV: &str = "SITEBOARD_LOG";

/// Install the stderr subscriber. `SITEBOARD_LOG` wins over the
/// configured filter; an invalid directive falls back to "warn".
pub fn setup(config_filter: &str) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(config_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .without_time()
        .with_filter(env_filter);

    tracing_subscriber::registry().with(fmt_layer).try_init()?;

    Ok(())
}
