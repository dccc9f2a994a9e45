//! Observability for StayOn: structured logging and optional trace export.

pub mod tracing_setup;
