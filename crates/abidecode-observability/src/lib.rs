//! # abidecode-observability
//!
//! OpenTelemetry-based observability for abidecode.
//!
//! ## Built-in metrics
//! - `abidecode.calls_decoded`  counter, tagged with function name
//! - `abidecode.logs_decoded`   counter, tagged with event name
//! - `abidecode.unresolved`     counter, tagged with input kind (`call` / `log`)
//! - `abidecode.decode_errors`  counter, tagged with error kind
//! - `abidecode.batch_size`     histogram
//!
//! ## Structured logging
//! Text or JSON logs via `tracing-subscriber`, with per-crate level overrides.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::DecoderMetrics;
pub use tracing_setup::{init_tracing, LogConfig};
