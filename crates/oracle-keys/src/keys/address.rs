use thiserror::Error as ThisError;

/// Canonical raw address width in bytes.
///
/// Composite keys concatenate addresses without a length tag, so every
/// address component must have exactly this width.
pub const ADDRESS_LEN: usize = 20;

///
/// AddressError
/// (input boundary)
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum AddressError {
    #[error("address is empty")]
    Empty,

    #[error("address length mismatch: {len} bytes (expected {expected})")]
    WrongWidth { len: usize, expected: usize },
}

pub(crate) fn fixed_width(bytes: &[u8]) -> Result<[u8; ADDRESS_LEN], AddressError> {
    if bytes.is_empty() {
        return Err(AddressError::Empty);
    }

    <[u8; ADDRESS_LEN]>::try_from(bytes).map_err(|_| AddressError::WrongWidth {
        len: bytes.len(),
        expected: ADDRESS_LEN,
    })
}

fixed_address! {
    /// Operator address of a validator.
    ValAddress,
    /// Account address, used for reporters acting on a validator's behalf.
    AccAddress,
}
