//! Prometheus metrics for the name generator.
//!
//! Recording is a no-op until [`init_metrics`] has run, so library users and
//! tests never need to set up a registry.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use reqwest::StatusCode;
use std::sync::OnceLock;
use std::time::Duration;

struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    upstream_duration_seconds: HistogramVec,
}

static METRICS: OnceLock<Metrics> = OnceLock::new();

impl Metrics {
    fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new(
                "namegen_requests_total",
                "Total number of name generation requests by response status",
            ),
            &["status"],
        )?;

        let upstream_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "namegen_upstream_duration_seconds",
                "Upstream chat-completion latency in seconds",
            )
            .buckets(vec![0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0]),
            &["outcome"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(upstream_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            upstream_duration_seconds,
        })
    }
}

/// Initialize all metrics. Calling it again is harmless.
pub fn init_metrics() -> Result<(), prometheus::Error> {
    if METRICS.get().is_some() {
        return Ok(());
    }
    let _ = METRICS.set(Metrics::new()?);
    Ok(())
}

pub fn record_request(status: StatusCode) {
    if let Some(metrics) = METRICS.get() {
        metrics
            .requests_total
            .with_label_values(&[status.as_str()])
            .inc();
    }
}

pub fn observe_upstream(outcome: &str, elapsed: Duration) {
    if let Some(metrics) = METRICS.get() {
        metrics
            .upstream_duration_seconds
            .with_label_values(&[outcome])
            .observe(elapsed.as_secs_f64());
    }
}

/// Text exposition of every registered metric.
pub fn get_metrics() -> String {
    let Some(metrics) = METRICS.get() else {
        return String::new();
    };

    let mut buffer = Vec::new();
    if let Err(e) = TextEncoder::new().encode(&metrics.registry.gather(), &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_after_init() {
        init_metrics().unwrap();
        init_metrics().unwrap();

        record_request(StatusCode::REQUEST_TIMEOUT);
        observe_upstream("timeout", Duration::from_secs(30));

        let text = get_metrics();
        assert!(text.contains(r#"namegen_requests_total{status="408"}"#));
        assert!(text.contains("namegen_upstream_duration_seconds"));
    }
}
