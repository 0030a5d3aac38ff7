//! Metrics sink boundary.
//!
//! Store accessors MUST NOT touch obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::{keys::KeyDomain, obs::metrics};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = const { RefCell::new(None) };
}

/// Label recorded for keys whose leading byte is not a registered domain.
pub const UNKNOWN_DOMAIN: &str = "unknown";

/// Domain label for an arbitrary key.
#[must_use]
pub fn domain_label(key: &[u8]) -> &'static str {
    KeyDomain::classify(key).map_or(UNKNOWN_DOMAIN, KeyDomain::label)
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    Read { domain: &'static str, hit: bool },
    Write { domain: &'static str },
    Delete { domain: &'static str },
    Scan { domain: &'static str, rows: u64 },
    DecodeRejected { domain: &'static str },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local metrics state.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::with_state_mut(|m| match event {
            MetricsEvent::Read { domain, hit } => {
                m.ops.reads = m.ops.reads.saturating_add(1);
                let entry = m.domains.entry(domain.to_string()).or_default();
                entry.reads = entry.reads.saturating_add(1);
                if !hit {
                    m.ops.read_misses = m.ops.read_misses.saturating_add(1);
                    entry.read_misses = entry.read_misses.saturating_add(1);
                }
            }

            MetricsEvent::Write { domain } => {
                m.ops.writes = m.ops.writes.saturating_add(1);
                let entry = m.domains.entry(domain.to_string()).or_default();
                entry.writes = entry.writes.saturating_add(1);
            }

            MetricsEvent::Delete { domain } => {
                m.ops.deletes = m.ops.deletes.saturating_add(1);
                let entry = m.domains.entry(domain.to_string()).or_default();
                entry.deletes = entry.deletes.saturating_add(1);
            }

            MetricsEvent::Scan { domain, rows } => {
                m.ops.scans = m.ops.scans.saturating_add(1);
                m.ops.rows_scanned = m.ops.rows_scanned.saturating_add(rows);
                let entry = m.domains.entry(domain.to_string()).or_default();
                entry.scans = entry.scans.saturating_add(1);
                entry.rows_scanned = entry.rows_scanned.saturating_add(rows);
            }

            MetricsEvent::DecodeRejected { domain } => {
                m.ops.decode_rejections = m.ops.decode_rejections.saturating_add(1);
                let entry = m.domains.entry(domain.to_string()).or_default();
                entry.decode_rejections = entry.decode_rejections.saturating_add(1);
            }
        });
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match override_sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current metrics state.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override on this thread.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}
