use crate::keys::KeyDecodeError;

/// Fixed width of every encoded numeric ID (protocol invariant).
/// DO NOT CHANGE without migration.
pub const ID_LEN: usize = 8;

/// Encode an ID as fixed-width big-endian bytes.
///
/// For any `a < b`, `encode_id(a) < encode_id(b)` under byte comparison.
#[must_use]
pub const fn encode_id(id: u64) -> [u8; ID_LEN] {
    id.to_be_bytes()
}

/// Decode the leading `ID_LEN` bytes of `bytes`.
///
/// Trailing bytes are left for the caller; short input is rejected rather
/// than zero-padded.
pub fn decode_id(bytes: &[u8]) -> Result<u64, KeyDecodeError> {
    let Some(head) = bytes.first_chunk::<ID_LEN>() else {
        return Err(KeyDecodeError::Truncated {
            needed: ID_LEN,
            found: bytes.len(),
        });
    };

    Ok(u64::from_be_bytes(*head))
}

/// Decode exactly one ID, rejecting trailing bytes.
pub fn decode_id_exact(bytes: &[u8]) -> Result<u64, KeyDecodeError> {
    let id = decode_id(bytes)?;
    if bytes.len() > ID_LEN {
        return Err(KeyDecodeError::TrailingBytes {
            extra: bytes.len() - ID_LEN,
        });
    }

    Ok(id)
}

numeric_id! {
    /// Identifier of one oracle data request.
    RequestId,
    /// Identifier of a registered data source.
    DataSourceId,
    /// Identifier of a registered oracle script.
    OracleScriptId,
}
