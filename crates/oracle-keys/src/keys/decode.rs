//! Inverse of the builders: recover typed components from scanned keys.

use crate::keys::{
    ADDRESS_LEN, AccAddress, AddressError, DataSourceId, ID_LEN, KeyDomain, OracleScriptId,
    RequestId, ValAddress, decode_id,
};
use thiserror::Error as ThisError;

///
/// KeyDecodeError
/// (decode / corruption boundary)
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum KeyDecodeError {
    #[error("malformed key: empty")]
    Empty,

    #[error("malformed key: expected {expected} domain, found prefix {found:#04x}")]
    WrongDomain { expected: KeyDomain, found: u8 },

    #[error("malformed key: needed {needed} bytes, found {found}")]
    Truncated { needed: usize, found: usize },

    #[error("malformed key: {extra} trailing bytes")]
    TrailingBytes { extra: usize },

    #[error("malformed key: {0}")]
    Address(#[from] AddressError),
}

///
/// KeyReader
///
/// Left-to-right cursor over one key's components.
///

struct KeyReader<'a> {
    rest: &'a [u8],
}

impl<'a> KeyReader<'a> {
    fn open(key: &'a [u8], domain: KeyDomain) -> Result<Self, KeyDecodeError> {
        let Some(&found) = key.first() else {
            return Err(KeyDecodeError::Empty);
        };
        let rest = key
            .strip_prefix(domain.prefix())
            .ok_or(KeyDecodeError::WrongDomain {
                expected: domain,
                found,
            })?;

        Ok(Self { rest })
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], KeyDecodeError> {
        if self.rest.len() < len {
            return Err(KeyDecodeError::Truncated {
                needed: len,
                found: self.rest.len(),
            });
        }
        let (head, tail) = self.rest.split_at(len);
        self.rest = tail;

        Ok(head)
    }

    fn id(&mut self) -> Result<u64, KeyDecodeError> {
        decode_id(self.take(ID_LEN)?)
    }

    fn val_address(&mut self) -> Result<ValAddress, KeyDecodeError> {
        Ok(ValAddress::try_from_slice(self.take(ADDRESS_LEN)?)?)
    }

    fn acc_address(&mut self) -> Result<AccAddress, KeyDecodeError> {
        Ok(AccAddress::try_from_slice(self.take(ADDRESS_LEN)?)?)
    }

    fn finish(self) -> Result<(), KeyDecodeError> {
        if self.rest.is_empty() {
            Ok(())
        } else {
            Err(KeyDecodeError::TrailingBytes {
                extra: self.rest.len(),
            })
        }
    }
}

fn single_id(key: &[u8], domain: KeyDomain) -> Result<u64, KeyDecodeError> {
    let mut reader = KeyReader::open(key, domain)?;
    let id = reader.id()?;
    reader.finish()?;

    Ok(id)
}

pub fn request_id_from_request_key(key: &[u8]) -> Result<RequestId, KeyDecodeError> {
    single_id(key, KeyDomain::Request).map(RequestId::new)
}

pub fn request_id_from_result_key(key: &[u8]) -> Result<RequestId, KeyDecodeError> {
    single_id(key, KeyDomain::Result).map(RequestId::new)
}

pub fn data_source_id_from_key(key: &[u8]) -> Result<DataSourceId, KeyDecodeError> {
    single_id(key, KeyDomain::DataSource).map(DataSourceId::new)
}

pub fn oracle_script_id_from_key(key: &[u8]) -> Result<OracleScriptId, KeyDecodeError> {
    single_id(key, KeyDomain::OracleScript).map(OracleScriptId::new)
}

/// Split a per-validator report key into its request and validator.
pub fn split_report_key(key: &[u8]) -> Result<(RequestId, ValAddress), KeyDecodeError> {
    let mut reader = KeyReader::open(key, KeyDomain::Report)?;
    let request_id = RequestId::new(reader.id()?);
    let validator = reader.val_address()?;
    reader.finish()?;

    Ok((request_id, validator))
}

/// Split a reporter authorization key into its validator and reporter.
pub fn split_reporter_key(key: &[u8]) -> Result<(ValAddress, AccAddress), KeyDecodeError> {
    let mut reader = KeyReader::open(key, KeyDomain::Reporter)?;
    let validator = reader.val_address()?;
    let reporter = reader.acc_address()?;
    reader.finish()?;

    Ok((validator, reporter))
}

pub fn validator_from_report_info_key(key: &[u8]) -> Result<ValAddress, KeyDecodeError> {
    let mut reader = KeyReader::open(key, KeyDomain::ValidatorReportInfo)?;
    let validator = reader.val_address()?;
    reader.finish()?;

    Ok(validator)
}
