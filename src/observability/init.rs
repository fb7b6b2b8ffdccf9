//! Subscriber installation.

use super::exporter;
use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::PathBuf;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the span export inside the data directory.
pub const TRACE_FILE_NAME: &str = "todo-sync-otlp.json";

const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber: an [`EnvFilter`] built from
/// `config.trace_level` (default `"info"`) feeding an OpenTelemetry layer
/// that exports to `<data dir>/todo-sync-otlp.json`.
///
/// Returns the trace file path when this call installed the subscriber.
/// Returns `None` when the data directory cannot be created or a global
/// subscriber is already set, so calling it twice is harmless.
///
/// # Example
///
/// ```rust,no_run
/// use todo_sync::observability::init_tracing;
/// use todo_sync::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// if let Some(path) = init_tracing(&config) {
///     println!("spans go to {}", path.display());
/// }
/// ```
pub fn init_tracing(config: &Config) -> Option<PathBuf> {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);

    let data_dir = paths::data_dir(config);
    std::fs::create_dir_all(&data_dir).ok()?;
    let trace_file = data_dir.join(TRACE_FILE_NAME);

    let resource = Resource::new(vec![
        KeyValue::new("service.name", exporter::SCOPE),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = exporter::file_tracer_provider(trace_file.clone(), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(exporter::SCOPE));

    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .try_init()
        .ok()?;

    tracing::debug!(path = %trace_file.display(), level = level, "tracing initialized");
    Some(trace_file)
}
