//! Observability: counters for store traffic, grouped by key domain.
//!
//! Key builders never record; only the store accessors do.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{DomainCounters, DomainSummary, EventOps, EventReport, EventState};
pub use sink::{
    MetricsEvent, MetricsSink, UNKNOWN_DOMAIN, domain_label, metrics_report, metrics_reset_all,
    with_metrics_sink,
};
