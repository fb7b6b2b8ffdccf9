//! Tracing with file-based OpenTelemetry export.
//!
//! Spans from `tracing` macros pass through `tracing-opentelemetry` into an
//! `opentelemetry_sdk` tracer provider, whose exporter writes OTLP JSON to a
//! rotating file in the data directory:
//!
//! ```text
//! tracing → OpenTelemetryLayer → TracerProvider → FileSpanExporter → todo-sync-otlp.json
//! ```
//!
//! The file rotates at 10 MiB and keeps three backups. The level comes from
//! the `trace_level` config key and defaults to `"info"`.
//!
//! # Modules
//!
//! - [`init`]: Subscriber installation
//! - `exporter`: The file span exporter and tracer provider
//! - `otlp`: OTLP JSON encoding
//! - [`file_writer`]: Rotating line writer

mod exporter;
pub mod file_writer;
pub mod init;
mod otlp;

pub use file_writer::{RotatingFile, RotationPolicy};
pub use init::{init_tracing, TRACE_FILE_NAME};
