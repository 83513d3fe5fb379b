//! Metrics collection and Prometheus integration service.

use crate::services::security::SecurityManager;
use prometheus::{
    CounterVec, Gauge, HistogramOpts, HistogramVec, IntGauge, Opts, Registry, TextEncoder,
};
use std::time::{Duration, Instant};

/// Application metrics collector for Prometheus integration
#[derive(Clone)]
pub struct AppMetrics {
    pub registry: Registry,
    pub http_requests_total: CounterVec,
    pub http_request_duration_seconds: HistogramVec,
    pub app_uptime_seconds: Gauge,
    pub denials_total: CounterVec,
    pub active_sessions: IntGauge,
    pub blacklist_size: IntGauge,
    pub tracked_failed_identifiers: IntGauge,
    pub start_time: Instant,
}

impl AppMetrics {
    /// Create a new metrics collector with the gatekeeper's metric set
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        // HTTP request counter by method, status, and route
        let http_requests_total = CounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "status", "route"],
        )?;

        // HTTP request duration histogram
        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![
                0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ]),
            &["method", "route"],
        )?;

        // Application uptime gauge
        let app_uptime_seconds = Gauge::new("app_uptime_seconds", "Application uptime in seconds")?;

        // Gate denials by reason (blacklist or rate_limit)
        let denials_total = CounterVec::new(
            Opts::new("gate_denials_total", "Requests denied by the security gate"),
            &["reason"],
        )?;

        let active_sessions =
            IntGauge::new("active_sessions", "Sessions currently in the session table")?;
        let blacklist_size =
            IntGauge::new("blacklist_size", "Identifiers currently blacklisted")?;
        let tracked_failed_identifiers = IntGauge::new(
            "tracked_failed_identifiers",
            "Identifiers with recorded failed login attempts",
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(app_uptime_seconds.clone()))?;
        registry.register(Box::new(denials_total.clone()))?;
        registry.register(Box::new(active_sessions.clone()))?;
        registry.register(Box::new(blacklist_size.clone()))?;
        registry.register(Box::new(tracked_failed_identifiers.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            app_uptime_seconds,
            denials_total,
            active_sessions,
            blacklist_size,
            tracked_failed_identifiers,
            start_time: Instant::now(),
        })
    }

    /// Record an HTTP request with method, route, status, and duration
    pub fn record_request(&self, method: &str, route: &str, status: u16, duration: Duration) {
        if route == "/api/metrics" {
            // Don't record metrics for the metrics endpoint itself to avoid noise
            return;
        }

        self.http_requests_total
            .with_label_values(&[method, &status.to_string(), route])
            .inc();

        self.http_request_duration_seconds
            .with_label_values(&[method, route])
            .observe(duration.as_secs_f64());
    }

    /// Count a denial handed out by the security gate
    pub fn record_denial(&self, reason: &str) {
        self.denials_total.with_label_values(&[reason]).inc();
    }

    /// Refresh the security gauges from the manager's dashboard accessors
    pub fn update_security_gauges(&self, security: &SecurityManager) {
        self.active_sessions
            .set(security.active_session_count() as i64);
        self.blacklist_size.set(security.blacklist_size() as i64);
        self.tracked_failed_identifiers
            .set(security.failed_attempt_identifiers() as i64);
    }

    /// Update the application uptime gauge
    pub fn update_uptime(&self) {
        let uptime = self.start_time.elapsed().as_secs_f64();
        self.app_uptime_seconds.set(uptime);
    }

    /// Render metrics in Prometheus text format
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder.encode_to_string(&metric_families)
    }
}
