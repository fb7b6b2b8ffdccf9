//! Span exporter writing OTLP-JSON lines to a rotating file.

use super::file_writer::{RotatingFile, RotationPolicy};
use super::otlp;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

/// Instrumentation scope recorded on every exported batch.
pub const SCOPE: &str = "todo-sync";

/// Writes each exported batch as one line of OTLP JSON.
#[derive(Debug)]
pub struct FileSpanExporter {
    file: RotatingFile,
    resource: Resource,
    shut_down: bool,
}

impl FileSpanExporter {
    pub const fn new(file: RotatingFile, resource: Resource) -> Self {
        Self {
            file,
            resource,
            shut_down: false,
        }
    }

    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        if self.shut_down {
            return Err(TraceError::from("exporter is shut down"));
        }
        let document = otlp::encode_batch(&self.resource, SCOPE, batch);
        self.file
            .write_line(&document.to_string())
            .map_err(|e| TraceError::from(e.to_string()))
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        // The write is synchronous; the future only carries its result.
        let result = self.write_batch(&batch);
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.shut_down = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

/// Builds a tracer provider that exports every finished span immediately to
/// `path`.
pub fn file_tracer_provider(path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(RotatingFile::new(path, RotationPolicy::default()), resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
