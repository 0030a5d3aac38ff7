use serde::{Deserialize, Serialize};
use std::{cell::RefCell, cmp::Ordering, collections::BTreeMap};

///
/// EventState
/// Ephemeral, in-memory counters for store traffic through the keyspace.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub domains: BTreeMap<String, DomainCounters>,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventOps {
    pub reads: u64,
    pub read_misses: u64,
    pub writes: u64,
    pub deletes: u64,
    pub scans: u64,
    pub rows_scanned: u64,
    pub decode_rejections: u64,
}

///
/// DomainCounters
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct DomainCounters {
    pub reads: u64,
    pub read_misses: u64,
    pub writes: u64,
    pub deletes: u64,
    pub scans: u64,
    pub rows_scanned: u64,
    pub decode_rejections: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters.
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

///
/// EventReport
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    pub counters: Option<EventState>,
    pub domain_counters: Vec<DomainSummary>,
}

///
/// DomainSummary
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct DomainSummary {
    pub domain: String,
    pub reads: u64,
    pub read_misses: u64,
    pub writes: u64,
    pub deletes: u64,
    pub scans: u64,
    pub rows_scanned: u64,
    pub avg_rows_per_scan: f64,
    pub decode_rejections: u64,
}

/// Build a metrics report from in-memory counters.
///
/// Domains are ordered by average rows per scan (descending), then by
/// total rows scanned, then by name.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn report() -> EventReport {
    let snap = with_state(Clone::clone);

    let mut domain_counters: Vec<DomainSummary> = snap
        .domains
        .iter()
        .map(|(domain, c)| DomainSummary {
            domain: domain.clone(),
            reads: c.reads,
            read_misses: c.read_misses,
            writes: c.writes,
            deletes: c.deletes,
            scans: c.scans,
            rows_scanned: c.rows_scanned,
            avg_rows_per_scan: if c.scans > 0 {
                c.rows_scanned as f64 / c.scans as f64
            } else {
                0.0
            },
            decode_rejections: c.decode_rejections,
        })
        .collect();

    domain_counters.sort_by(|a, b| {
        match b
            .avg_rows_per_scan
            .partial_cmp(&a.avg_rows_per_scan)
            .unwrap_or(Ordering::Equal)
        {
            Ordering::Equal => match b.rows_scanned.cmp(&a.rows_scanned) {
                Ordering::Equal => a.domain.cmp(&b.domain),
                other => other,
            },
            other => other,
        }
    });

    EventReport {
        counters: Some(snap),
        domain_counters,
    }
}

///
/// TESTS
///

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn reset_all_clears_state() {
        with_state_mut(|m| {
            m.ops.reads = 3;
            m.ops.rows_scanned = 2;
            m.domains.insert(
                "request".to_string(),
                DomainCounters {
                    reads: 1,
                    ..Default::default()
                },
            );
        });

        reset_all();

        with_state(|m| {
            assert_eq!(m.ops.reads, 0);
            assert_eq!(m.ops.rows_scanned, 0);
            assert!(m.domains.is_empty());
        });
    }

    #[test]
    fn report_sorts_domains_by_average_rows() {
        reset_all();
        with_state_mut(|m| {
            m.domains.insert(
                "report".to_string(),
                DomainCounters {
                    scans: 2,
                    rows_scanned: 6,
                    ..Default::default()
                },
            );
            m.domains.insert(
                "request".to_string(),
                DomainCounters {
                    scans: 1,
                    rows_scanned: 5,
                    ..Default::default()
                },
            );
            m.domains.insert(
                "global".to_string(),
                DomainCounters {
                    reads: 4,
                    ..Default::default()
                },
            );
        });

        let report = report();
        let order: Vec<&str> = report
            .domain_counters
            .iter()
            .map(|s| s.domain.as_str())
            .collect();

        assert_eq!(order, ["request", "report", "global"]);
        assert_eq!(report.domain_counters[0].avg_rows_per_scan, 5.0);
        assert_eq!(report.domain_counters[1].avg_rows_per_scan, 3.0);
    }
}
