use crate::config::APP_CONFIG;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the fmt subscriber. `RUST_LOG` wins; otherwise the calling
/// binary, this library and tower_http log at `LOG_LEVEL`.
pub fn init_standard_tracing(crate_name: &str) {
    let level: &String = &APP_CONFIG.log_level;
    let lib_name = env!("CARGO_CRATE_NAME");
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{crate_name}={level},{lib_name}={level},tower_http={level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().event_format(tracing_subscriber::fmt::format()))
        .init();
}
