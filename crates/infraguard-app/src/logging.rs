use anyhow::Context;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding an `EnvFilter` directive string.
pub const LOG_ENV: &str = "INFRAGUARD_LOG";

/// Directives used when `INFRAGUARD_LOG` is not set.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "infraguard_app=debug,infraguard_domain=debug"
    } else {
        "infraguard_app=info,infraguard_domain=warn"
    }
}

/// Install a stderr `fmt` subscriber. Fails if a global subscriber is already set.
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let filter = if verbose {
        EnvFilter::new(default_filter(true))
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter(false)))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("install tracing subscriber")
}
