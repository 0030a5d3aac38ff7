use crate::{
    error::InternalError,
    keys::{
        AccAddress, DATA_SOURCE_COUNT_STORE_KEY, DataSourceId, ID_LEN, KeyDecodeError, KeyDomain,
        ORACLE_SCRIPT_COUNT_STORE_KEY, OracleScriptId, PENDING_RESOLVE_LIST_STORE_KEY,
        REQUEST_COUNT_STORE_KEY, REQUEST_STORE_KEY_PREFIX, RequestId, ValAddress, decode_id,
        encode_id, hex, report_store_key, report_store_key_per_validator,
        request_id_from_request_key, reporter_store_key, reporter_store_key_prefix,
        split_report_key, split_reporter_key,
    },
    obs::sink::{self, MetricsEvent, domain_label},
    store::KvStore,
};

/// Stored marker value for reporter authorizations.
const REPORTER_MARKER: &[u8] = &[0x01];

///
/// OracleStore
///
/// Typed accessors over the oracle keyspace. Every key is produced by the
/// builders in `keys`; record payloads other than counters and the pending
/// list are opaque bytes.
///

#[derive(Debug, Default)]
pub struct OracleStore<S> {
    store: S,
}

impl<S: KvStore> OracleStore<S> {
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn into_inner(self) -> S {
        self.store
    }

    // ------------------------------------------------------------------
    // Raw access (instrumented)
    // ------------------------------------------------------------------

    #[must_use]
    pub fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        let value = self.store.get(key);
        sink::record(MetricsEvent::Read {
            domain: domain_label(key),
            hit: value.is_some(),
        });

        value
    }

    /// Read a key that must exist.
    pub fn must_get(&self, key: &[u8]) -> Result<Vec<u8>, InternalError> {
        self.get(key)
            .ok_or_else(|| InternalError::store_not_found(key))
    }

    pub fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        sink::record(MetricsEvent::Write {
            domain: domain_label(&key),
        });
        self.store.set(key, value);
    }

    pub fn delete(&mut self, key: &[u8]) {
        sink::record(MetricsEvent::Delete {
            domain: domain_label(key),
        });
        self.store.delete(key);
    }

    /// Ascending scan of every entry under `prefix`.
    #[must_use]
    pub fn scan(&self, prefix: &[u8]) -> Vec<(Vec<u8>, Vec<u8>)> {
        let rows = self.store.iter_prefix(prefix);
        sink::record(MetricsEvent::Scan {
            domain: domain_label(prefix),
            rows: rows.len() as u64,
        });

        rows
    }

    // ------------------------------------------------------------------
    // Global counters
    // ------------------------------------------------------------------

    /// Total requests created so far. Absent counter reads as zero.
    pub fn request_count(&self) -> Result<u64, InternalError> {
        self.counter(REQUEST_COUNT_STORE_KEY)
    }

    /// Bump the request counter and return the newly allocated ID.
    pub fn next_request_id(&mut self) -> Result<RequestId, InternalError> {
        self.bump_counter(REQUEST_COUNT_STORE_KEY).map(RequestId::new)
    }

    pub fn data_source_count(&self) -> Result<u64, InternalError> {
        self.counter(DATA_SOURCE_COUNT_STORE_KEY)
    }

    pub fn next_data_source_id(&mut self) -> Result<DataSourceId, InternalError> {
        self.bump_counter(DATA_SOURCE_COUNT_STORE_KEY)
            .map(DataSourceId::new)
    }

    pub fn oracle_script_count(&self) -> Result<u64, InternalError> {
        self.counter(ORACLE_SCRIPT_COUNT_STORE_KEY)
    }

    pub fn next_oracle_script_id(&mut self) -> Result<OracleScriptId, InternalError> {
        self.bump_counter(ORACLE_SCRIPT_COUNT_STORE_KEY)
            .map(OracleScriptId::new)
    }

    fn counter(&self, key: &'static [u8]) -> Result<u64, InternalError> {
        let Some(raw) = self.get(key) else {
            return Ok(0);
        };
        if raw.len() != ID_LEN {
            return Err(InternalError::store_corruption(format!(
                "counter {} holds {} bytes (expected {ID_LEN})",
                hex(key),
                raw.len()
            )));
        }

        decode_id(&raw).map_err(InternalError::from)
    }

    fn bump_counter(&mut self, key: &'static [u8]) -> Result<u64, InternalError> {
        let next = self.counter(key)?.checked_add(1).ok_or_else(|| {
            InternalError::store_internal(format!("counter {} overflowed", hex(key)))
        })?;
        self.set(key.to_vec(), encode_id(next).to_vec());

        Ok(next)
    }

    // ------------------------------------------------------------------
    // Pending-resolve list
    // ------------------------------------------------------------------

    /// Request IDs awaiting resolution, in stored order.
    pub fn pending_resolve_list(&self) -> Result<Vec<RequestId>, InternalError> {
        let Some(raw) = self.get(PENDING_RESOLVE_LIST_STORE_KEY) else {
            return Ok(Vec::new());
        };
        if raw.len() % ID_LEN != 0 {
            return Err(InternalError::store_corruption(format!(
                "pending resolve list length {} is not a multiple of {ID_LEN}",
                raw.len()
            )));
        }

        raw.chunks_exact(ID_LEN)
            .map(|chunk| {
                decode_id(chunk)
                    .map(RequestId::new)
                    .map_err(InternalError::from)
            })
            .collect()
    }

    pub fn set_pending_resolve_list(&mut self, ids: &[RequestId]) {
        let raw: Vec<u8> = ids.iter().flat_map(|id| id.to_bytes()).collect();
        self.set(PENDING_RESOLVE_LIST_STORE_KEY.to_vec(), raw);
    }

    // ------------------------------------------------------------------
    // Requests and reports
    // ------------------------------------------------------------------

    /// Every stored request ID, ascending.
    pub fn request_ids(&self) -> Result<Vec<RequestId>, InternalError> {
        self.scan(REQUEST_STORE_KEY_PREFIX)
            .iter()
            .map(|(key, _)| decoded(KeyDomain::Request, request_id_from_request_key(key)))
            .collect()
    }

    #[must_use]
    pub fn has_report(&self, request_id: RequestId, validator: &ValAddress) -> bool {
        self.get(&report_store_key_per_validator(request_id, validator))
            .is_some()
    }

    /// Validators that reported on `request_id`, in key order.
    pub fn reporters_of_request(
        &self,
        request_id: RequestId,
    ) -> Result<Vec<ValAddress>, InternalError> {
        self.scan(&report_store_key(request_id))
            .iter()
            .map(|(key, _)| {
                decoded(KeyDomain::Report, split_report_key(key))
                    .map(|(_, validator)| validator)
            })
            .collect()
    }

    /// Delete every report stored for `request_id`; returns the count removed.
    pub fn delete_reports(&mut self, request_id: RequestId) -> usize {
        let keys: Vec<Vec<u8>> = self
            .scan(&report_store_key(request_id))
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        for key in &keys {
            self.delete(key);
        }

        keys.len()
    }

    // ------------------------------------------------------------------
    // Reporter authorizations
    // ------------------------------------------------------------------

    #[must_use]
    pub fn is_reporter(&self, validator: &ValAddress, reporter: &AccAddress) -> bool {
        self.get(&reporter_store_key(validator, reporter)).is_some()
    }

    pub fn add_reporter(&mut self, validator: &ValAddress, reporter: &AccAddress) {
        self.set(
            reporter_store_key(validator, reporter),
            REPORTER_MARKER.to_vec(),
        );
    }

    pub fn remove_reporter(&mut self, validator: &ValAddress, reporter: &AccAddress) {
        self.delete(&reporter_store_key(validator, reporter));
    }

    /// Reporters authorized for `validator`, in key order.
    pub fn reporters_of_validator(
        &self,
        validator: &ValAddress,
    ) -> Result<Vec<AccAddress>, InternalError> {
        self.scan(&reporter_store_key_prefix(validator))
            .iter()
            .map(|(key, _)| {
                decoded(KeyDomain::Reporter, split_reporter_key(key))
                    .map(|(_, reporter)| reporter)
            })
            .collect()
    }
}

/// Map a key decode failure into a corruption error, recording the rejection.
fn decoded<T>(domain: KeyDomain, result: Result<T, KeyDecodeError>) -> Result<T, InternalError> {
    result.map_err(|err| {
        sink::record(MetricsEvent::DecodeRejected {
            domain: domain.label(),
        });
        InternalError::from(err)
    })
}
