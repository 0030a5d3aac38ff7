//! Keyspace layout.
//!
//! Invariants:
//! - Every key begins with exactly one domain prefix owned by its entity type.
//! - IDs are fixed-width big-endian, so byte order equals numeric order.
//! - Components concatenate left to right (prefix, IDs, addresses); every
//!   leading truncation of a composite key is a valid range prefix.
//! - Key construction is pure; nothing here touches storage.

pub(crate) mod address;
mod builder;
mod decode;
mod id;
mod prefix;
mod range;


pub use address::{ADDRESS_LEN, AccAddress, AddressError, ValAddress};
pub use builder::{
    data_source_store_key, oracle_script_store_key, report_store_key,
    report_store_key_per_validator, reporter_store_key, reporter_store_key_prefix,
    request_store_key, result_store_key, validator_report_info_store_key,
};
pub use decode::{
    KeyDecodeError, data_source_id_from_key, oracle_script_id_from_key,
    request_id_from_request_key, request_id_from_result_key, split_report_key,
    split_reporter_key, validator_from_report_info_key,
};
pub use id::{
    DataSourceId, ID_LEN, OracleScriptId, RequestId, decode_id, decode_id_exact, encode_id,
};
pub use prefix::{
    DATA_SOURCE_COUNT_STORE_KEY, DATA_SOURCE_STORE_KEY_PREFIX, DomainLayout,
    GLOBAL_STORE_KEY_PREFIX, KeyComponent, KeyDomain, LayoutError,
    ORACLE_SCRIPT_COUNT_STORE_KEY, ORACLE_SCRIPT_STORE_KEY_PREFIX,
    PENDING_RESOLVE_LIST_STORE_KEY, REPORT_STORE_KEY_PREFIX, REPORTER_STORE_KEY_PREFIX,
    REQUEST_COUNT_STORE_KEY, REQUEST_STORE_KEY_PREFIX, RESULT_STORE_KEY_PREFIX,
    SINGLETON_KEYS, VALIDATOR_REPORT_INFO_KEY_PREFIX, layout, validate_layout,
};
pub use range::{KeyRange, prefix_end};

/// Lowercase hex rendering for keys and addresses in messages.
pub(crate) fn hex(bytes: &[u8]) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }

    out
}
