//! Composite key builders.
//!
//! One pure function per entity type. Components are concatenated left to
//! right with no length tags; fixed widths make the boundaries implicit.

use crate::keys::{
    AccAddress, DATA_SOURCE_STORE_KEY_PREFIX, DataSourceId, ORACLE_SCRIPT_STORE_KEY_PREFIX,
    OracleScriptId, REPORT_STORE_KEY_PREFIX, REPORTER_STORE_KEY_PREFIX, REQUEST_STORE_KEY_PREFIX,
    RESULT_STORE_KEY_PREFIX, RequestId, VALIDATOR_REPORT_INFO_KEY_PREFIX, ValAddress,
};

/// Key of a single request record.
#[must_use]
pub fn request_store_key(request_id: RequestId) -> Vec<u8> {
    [REQUEST_STORE_KEY_PREFIX, request_id.to_bytes().as_slice()].concat()
}

/// Range prefix over every report submitted for a request.
#[must_use]
pub fn report_store_key(request_id: RequestId) -> Vec<u8> {
    [REPORT_STORE_KEY_PREFIX, request_id.to_bytes().as_slice()].concat()
}

/// Key of one validator's report for a request.
#[must_use]
pub fn report_store_key_per_validator(request_id: RequestId, validator: &ValAddress) -> Vec<u8> {
    [
        REPORT_STORE_KEY_PREFIX,
        request_id.to_bytes().as_slice(),
        validator.as_bytes().as_slice(),
    ]
    .concat()
}

/// Key of a data source record.
#[must_use]
pub fn data_source_store_key(data_source_id: DataSourceId) -> Vec<u8> {
    [DATA_SOURCE_STORE_KEY_PREFIX, data_source_id.to_bytes().as_slice()].concat()
}

/// Key of an oracle script record.
#[must_use]
pub fn oracle_script_store_key(oracle_script_id: OracleScriptId) -> Vec<u8> {
    [ORACLE_SCRIPT_STORE_KEY_PREFIX, oracle_script_id.to_bytes().as_slice()].concat()
}

/// Key marking `reporter` as authorized to report for `validator`.
#[must_use]
pub fn reporter_store_key(validator: &ValAddress, reporter: &AccAddress) -> Vec<u8> {
    [
        REPORTER_STORE_KEY_PREFIX,
        validator.as_bytes().as_slice(),
        reporter.as_bytes().as_slice(),
    ]
    .concat()
}

/// Range prefix over every reporter authorized for `validator`.
#[must_use]
pub fn reporter_store_key_prefix(validator: &ValAddress) -> Vec<u8> {
    [REPORTER_STORE_KEY_PREFIX, validator.as_bytes().as_slice()].concat()
}

#[must_use]
pub fn validator_report_info_store_key(validator: &ValAddress) -> Vec<u8> {
    [VALIDATOR_REPORT_INFO_KEY_PREFIX, validator.as_bytes().as_slice()].concat()
}

/// Key of a request's final result.
#[must_use]
pub fn result_store_key(request_id: RequestId) -> Vec<u8> {
    [RESULT_STORE_KEY_PREFIX, request_id.to_bytes().as_slice()].concat()
}
