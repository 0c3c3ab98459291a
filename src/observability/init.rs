//! Tracing initialization and subscriber setup.

use super::tracer;
use crate::infrastructure::paths::TRACE_FILE_NAME;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber: an `EnvFilter` in front of an
/// OpenTelemetry layer exporting to `<data dir>/cinemagic-traces.json`.
///
/// The filter comes from `RUST_LOG` when set, otherwise from
/// `config.trace_level`. Tracing is optional: if the data directory cannot be
/// created nothing is installed, and a second call is a no-op.
///
/// # Example
///
/// ```rust,no_run
/// use cinemagic::observability::init_tracing;
/// use cinemagic::Config;
///
/// let config = Config {
///     trace_level: "debug".to_string(),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let data_dir = config.data_dir();
    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        eprintln!("cinemagic: tracing disabled, cannot create {}: {e}", data_dir.display());
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.trace_level));

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", "CineMagic"),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(tracer::SCOPE_NAME));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
