//! Observability setup for Wayfarer: tracing subscriber and optional
//! OpenTelemetry span export.

pub mod tracing_setup;
