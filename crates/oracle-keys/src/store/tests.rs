use super::*;
use crate::{
    error::ErrorClass,
    keys::{
        ADDRESS_LEN, AccAddress, PENDING_RESOLVE_LIST_STORE_KEY, REQUEST_COUNT_STORE_KEY,
        RequestId, ValAddress, report_store_key_per_validator, request_store_key,
        result_store_key,
    },
    obs::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink},
};
use std::{cell::RefCell, rc::Rc};

fn val(byte: u8) -> ValAddress {
    ValAddress::from_array([byte; ADDRESS_LEN])
}

fn acc(byte: u8) -> AccAddress {
    AccAddress::from_array([byte; ADDRESS_LEN])
}

#[derive(Default)]
struct CaptureSink(RefCell<Vec<MetricsEvent>>);

impl MetricsSink for CaptureSink {
    fn record(&self, event: MetricsEvent) {
        self.0.borrow_mut().push(event);
    }
}

// ------------------------------------------------------------------
// MemoryStore
// ------------------------------------------------------------------

#[test]
fn memory_store_scans_in_ascending_key_order() {
    let mut store = MemoryStore::new();
    for id in [300, 5, 42] {
        store.set(request_store_key(RequestId::new(id)), vec![]);
    }
    store.set(result_store_key(RequestId::new(1)), vec![]);

    let ids: Vec<Vec<u8>> = store
        .iter_prefix(&[0x01])
        .into_iter()
        .map(|(k, _)| k)
        .collect();

    assert_eq!(
        ids,
        [5, 42, 300].map(|id| request_store_key(RequestId::new(id)))
    );
}

#[test]
fn memory_store_scans_terminal_domain() {
    let mut store = MemoryStore::new();
    store.set(result_store_key(RequestId::new(u64::MAX)), vec![1]);
    store.set(request_store_key(RequestId::new(u64::MAX)), vec![2]);

    let rows = store.iter_prefix(&[0xff]);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].1, vec![1]);
}

#[test]
fn memory_store_point_ops() {
    let mut store = MemoryStore::default();
    let key = request_store_key(RequestId::new(1));

    assert!(!store.has(&key));
    store.set(key.clone(), b"req".to_vec());
    assert_eq!(store.get(&key), Some(b"req".to_vec()));
    assert_eq!(store.memory_bytes(), (key.len() + 3) as u64);

    store.delete(&key);
    assert!(store.is_empty());
}

// ------------------------------------------------------------------
// Counters
// ------------------------------------------------------------------

#[test]
fn counters_start_at_zero_and_allocate_sequential_ids() {
    let mut oracle = OracleStore::new(MemoryStore::new());

    assert_eq!(oracle.request_count().unwrap(), 0);
    assert_eq!(oracle.next_request_id().unwrap(), RequestId::new(1));
    assert_eq!(oracle.next_request_id().unwrap(), RequestId::new(2));
    assert_eq!(oracle.request_count().unwrap(), 2);

    assert_eq!(oracle.next_data_source_id().unwrap().get(), 1);
    assert_eq!(oracle.next_oracle_script_id().unwrap().get(), 1);
    assert_eq!(oracle.data_source_count().unwrap(), 1);
    assert_eq!(oracle.oracle_script_count().unwrap(), 1);

    assert_eq!(
        oracle.inner().get(REQUEST_COUNT_STORE_KEY),
        Some(2u64.to_be_bytes().to_vec())
    );
}

#[test]
fn corrupt_counter_is_reported() {
    let mut store = MemoryStore::new();
    store.set(REQUEST_COUNT_STORE_KEY.to_vec(), vec![0x01, 0x02]);
    let mut oracle = OracleStore::new(store);

    let err = oracle.next_request_id().unwrap_err();
    assert_eq!(err.class, ErrorClass::Corruption);
}

#[test]
fn counter_overflow_is_an_error() {
    let mut store = MemoryStore::new();
    store.set(REQUEST_COUNT_STORE_KEY.to_vec(), u64::MAX.to_be_bytes().to_vec());
    let mut oracle = OracleStore::new(store);

    let err = oracle.next_request_id().unwrap_err();
    assert_eq!(err.class, ErrorClass::Internal);
    assert_eq!(oracle.request_count().unwrap(), u64::MAX);
}

// ------------------------------------------------------------------
// Pending list
// ------------------------------------------------------------------

#[test]
fn pending_list_preserves_order() {
    let mut oracle = OracleStore::new(MemoryStore::new());
    assert!(oracle.pending_resolve_list().unwrap().is_empty());

    let ids = [RequestId::new(9), RequestId::new(2), RequestId::new(300)];
    oracle.set_pending_resolve_list(&ids);

    assert_eq!(oracle.pending_resolve_list().unwrap(), ids);
}

#[test]
fn pending_list_with_partial_id_is_corruption() {
    let mut store = MemoryStore::new();
    store.set(PENDING_RESOLVE_LIST_STORE_KEY.to_vec(), vec![0; 12]);
    let oracle = OracleStore::new(store);

    let err = oracle.pending_resolve_list().unwrap_err();
    assert!(err.is_corruption());
}

// ------------------------------------------------------------------
// Reports and reporters
// ------------------------------------------------------------------

#[test]
fn reports_are_isolated_per_request() {
    let mut oracle = OracleStore::new(MemoryStore::new());
    for (req, v) in [(1, 0x30), (1, 0x10), (2, 0x20), (256, 0x40)] {
        oracle.set(
            report_store_key_per_validator(RequestId::new(req), &val(v)),
            vec![v],
        );
    }

    assert_eq!(
        oracle.reporters_of_request(RequestId::new(1)).unwrap(),
        [val(0x10), val(0x30)]
    );
    assert!(oracle.has_report(RequestId::new(2), &val(0x20)));
    assert!(!oracle.has_report(RequestId::new(2), &val(0x10)));

    assert_eq!(oracle.delete_reports(RequestId::new(1)), 2);
    assert!(oracle.reporters_of_request(RequestId::new(1)).unwrap().is_empty());
    assert_eq!(
        oracle.reporters_of_request(RequestId::new(256)).unwrap(),
        [val(0x40)]
    );
}

#[test]
fn reporter_authorizations_round_trip() {
    let mut oracle = OracleStore::new(MemoryStore::new());
    oracle.add_reporter(&val(1), &acc(9));
    oracle.add_reporter(&val(1), &acc(3));
    oracle.add_reporter(&val(2), &acc(5));

    assert!(oracle.is_reporter(&val(1), &acc(9)));
    assert!(!oracle.is_reporter(&val(2), &acc(9)));
    assert_eq!(
        oracle.reporters_of_validator(&val(1)).unwrap(),
        [acc(3), acc(9)]
    );

    oracle.remove_reporter(&val(1), &acc(9));
    assert_eq!(oracle.reporters_of_validator(&val(1)).unwrap(), [acc(3)]);
}

#[test]
fn request_ids_are_ascending() {
    let mut oracle = OracleStore::new(MemoryStore::new());
    for id in [300, 5, 42] {
        oracle.set(request_store_key(RequestId::new(id)), vec![]);
    }

    assert_eq!(
        oracle.request_ids().unwrap(),
        [5, 42, 300].map(RequestId::new)
    );
}

#[test]
fn malformed_scanned_key_surfaces_as_corruption() {
    let mut store = MemoryStore::new();
    store.set(vec![0x01, 0x00, 0x01], vec![]);
    let oracle = OracleStore::new(store);

    let err = oracle.request_ids().unwrap_err();
    assert_eq!(err.class, ErrorClass::Corruption);
}

#[test]
fn must_get_reports_missing_key() {
    let oracle = OracleStore::new(MemoryStore::new());

    let err = oracle.must_get(&request_store_key(RequestId::new(7))).unwrap_err();
    assert!(err.is_not_found());
}

// ------------------------------------------------------------------
// Metrics
// ------------------------------------------------------------------

#[test]
fn store_traffic_records_domain_events() {
    let sink = Rc::new(CaptureSink::default());
    let mut oracle = OracleStore::new(MemoryStore::new());

    with_metrics_sink(sink.clone(), || {
        oracle.set(request_store_key(RequestId::new(1)), vec![]);
        let _ = oracle.get(&result_store_key(RequestId::new(1)));
        let _ = oracle.scan(&[0x01]);
        oracle.delete(&[0x09]);
    });

    assert_eq!(
        *sink.0.borrow(),
        [
            MetricsEvent::Write { domain: "request" },
            MetricsEvent::Read {
                domain: "result",
                hit: false,
            },
            MetricsEvent::Scan {
                domain: "request",
                rows: 1,
            },
            MetricsEvent::Delete { domain: "unknown" },
        ]
    );
}

#[test]
fn decode_rejections_reach_global_metrics() {
    metrics_reset_all();
    let mut store = MemoryStore::new();
    store.set(vec![0x01, 0xaa], vec![]);
    let oracle = OracleStore::new(store);

    assert!(oracle.request_ids().is_err());

    let report = metrics_report();
    let counters = report.counters.unwrap();
    assert_eq!(counters.ops.decode_rejections, 1);
    assert_eq!(counters.ops.scans, 1);
    assert_eq!(counters.domains["request"].decode_rejections, 1);
}
