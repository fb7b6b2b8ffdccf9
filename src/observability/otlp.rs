//! OTLP-JSON encoding of finished spans.
//!
//! Each exported batch becomes one JSON document in the OTLP trace shape:
//!
//! ```json
//! {
//!   "resourceSpans": [{
//!     "resource": { "attributes": [{"key": "service.name", "value": {"stringValue": "todo-sync"}}] },
//!     "scopeSpans": [{ "scope": {"name": "todo-sync"}, "spans": [ ... ] }]
//!   }]
//! }
//! ```
//!
//! Ids are lowercase hex, times are decimal nanoseconds since the Unix epoch
//! encoded as strings, and integer attribute values are strings too.

use opentelemetry::trace::{Event, Link, SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde_json::{json, Value as JsonValue};
use std::time::{SystemTime, UNIX_EPOCH};

/// Encodes one batch under the given resource and instrumentation scope.
pub fn encode_batch(resource: &Resource, scope: &str, batch: &[SpanData]) -> JsonValue {
    let resource_attributes: Vec<JsonValue> = resource
        .iter()
        .map(|(key, value)| attribute(key.as_str(), value))
        .collect();
    let spans: Vec<JsonValue> = batch.iter().map(encode_span).collect();

    json!({
        "resourceSpans": [{
            "resource": { "attributes": resource_attributes },
            "scopeSpans": [{
                "scope": { "name": scope },
                "spans": spans,
            }],
        }],
    })
}

fn encode_span(span: &SpanData) -> JsonValue {
    let parent = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };
    let (code, message) = status(&span.status);

    json!({
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent,
        "name": span.name,
        "kind": kind(&span.span_kind),
        "startTimeUnixNano": unix_nanos(span.start_time),
        "endTimeUnixNano": unix_nanos(span.end_time),
        "attributes": attributes(&span.attributes),
        "events": span.events.iter().map(event).collect::<Vec<_>>(),
        "links": span.links.iter().map(link).collect::<Vec<_>>(),
        "status": { "code": code, "message": message },
    })
}

fn event(event: &Event) -> JsonValue {
    json!({
        "timeUnixNano": unix_nanos(event.timestamp),
        "name": event.name,
        "attributes": attributes(&event.attributes),
    })
}

fn link(link: &Link) -> JsonValue {
    json!({
        "traceId": format!("{:032x}", link.span_context.trace_id()),
        "spanId": format!("{:016x}", link.span_context.span_id()),
        "attributes": attributes(&link.attributes),
    })
}

fn attributes(pairs: &[KeyValue]) -> Vec<JsonValue> {
    pairs.iter().map(|kv| attribute(kv.key.as_str(), &kv.value)).collect()
}

fn attribute(key: &str, value: &Value) -> JsonValue {
    json!({ "key": key, "value": any_value(value) })
}

fn any_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!({ "boolValue": b }),
        Value::I64(i) => json!({ "intValue": i.to_string() }),
        Value::F64(f) => json!({ "doubleValue": f }),
        Value::String(s) => json!({ "stringValue": s.as_str() }),
        // Arrays are flattened to their display form.
        Value::Array(_) => json!({ "stringValue": value.to_string() }),
    }
}

const fn kind(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn status(status: &Status) -> (u8, String) {
    match status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    }
}

fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default()
        .to_string()
}
