//! abidecode metrics definitions.
//!
//! All metrics use OpenTelemetry conventions and can be exported through any
//! installed `MeterProvider`. Without one, the global meter is a no-op.

use abidecode_core::{decoder::BatchDecodeResult, error::DecodeError};
use opentelemetry::{
    metrics::{Counter, Histogram, Meter},
    KeyValue,
};

/// Central metrics handle for a decoder.
#[derive(Clone)]
pub struct DecoderMetrics {
    pub calls_decoded: Counter<u64>,
    pub logs_decoded: Counter<u64>,
    pub unresolved: Counter<u64>,
    pub decode_errors: Counter<u64>,
    pub batch_size: Histogram<u64>,
}

impl DecoderMetrics {
    pub fn new(meter: &Meter) -> Self {
        Self {
            calls_decoded: meter
                .u64_counter("abidecode.calls_decoded")
                .with_description("Calldata payloads decoded against a registered function")
                .init(),
            logs_decoded: meter
                .u64_counter("abidecode.logs_decoded")
                .with_description("Logs decoded against a registered event")
                .init(),
            unresolved: meter
                .u64_counter("abidecode.unresolved")
                .with_description("Inputs whose selector or topic is not registered")
                .init(),
            decode_errors: meter
                .u64_counter("abidecode.decode_errors")
                .with_description("Inputs that failed to decode")
                .init(),
            batch_size: meter
                .u64_histogram("abidecode.batch_size")
                .with_description("Number of logs in a batch decode request")
                .init(),
        }
    }

    pub fn record_call(&self, function: &str) {
        self.calls_decoded
            .add(1, &[KeyValue::new("function", function.to_string())]);
    }

    pub fn record_log(&self, event: &str) {
        self.logs_decoded
            .add(1, &[KeyValue::new("event", event.to_string())]);
    }

    /// `kind` is `"call"` or `"log"`.
    pub fn record_unresolved(&self, kind: &'static str) {
        self.unresolved.add(1, &[KeyValue::new("kind", kind)]);
    }

    pub fn record_error(&self, err: &DecodeError) {
        self.decode_errors
            .add(1, &[KeyValue::new("error_type", err.kind())]);
    }

    /// Record the outcome of one batch: its size, every decoded log, the
    /// unresolved count and any collected errors.
    pub fn record_batch(&self, total: usize, result: &BatchDecodeResult) {
        self.batch_size.record(total as u64, &[]);
        for log in &result.logs {
            self.record_log(&log.name);
        }
        if result.unresolved > 0 {
            self.unresolved
                .add(result.unresolved as u64, &[KeyValue::new("kind", "log")]);
        }
        for (_, err) in &result.errors {
            self.record_error(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abidecode_core::error::EncodingError;
    use opentelemetry::global;

    #[test]
    fn records_against_the_noop_meter() {
        let meter = global::meter("abidecode-test");
        let metrics = DecoderMetrics::new(&meter);
        metrics.record_call("transfer");
        metrics.record_unresolved("call");
        metrics.record_error(&DecodeError::MalformedEncoding(EncodingError::ValueOverflow));

        let result = BatchDecodeResult {
            unresolved: 2,
            ..Default::default()
        };
        metrics.record_batch(2, &result);
    }
}
