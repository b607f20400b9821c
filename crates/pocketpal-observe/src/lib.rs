//! Observability for the Pocketpal relay: tracing subscriber setup with an
//! optional OpenTelemetry stdout exporter.

pub mod tracing_setup;
