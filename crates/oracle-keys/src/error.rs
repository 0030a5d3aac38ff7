use crate::keys::{AddressError, KeyDecodeError};
use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable internal classification.
/// Boundary-specific errors (`KeyDecodeError`, `AddressError`) convert into
/// this type once they cross into the store layer.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl InternalError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    /// Construct a key-origin corruption error.
    pub(crate) fn key_corruption(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Corruption, ErrorOrigin::Key, message)
    }

    /// Construct a store-origin corruption error.
    pub(crate) fn store_corruption(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Corruption, ErrorOrigin::Store, message)
    }

    /// Construct a store-origin internal error.
    pub(crate) fn store_internal(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Internal, ErrorOrigin::Store, message)
    }

    /// Construct an address-origin invalid input error.
    pub(crate) fn address_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::InvalidInput, ErrorOrigin::Address, message)
    }

    pub fn store_not_found(key: &[u8]) -> Self {
        Self::new(
            ErrorClass::NotFound,
            ErrorOrigin::Store,
            format!("key not found: {}", crate::keys::hex(key)),
        )
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.class, ErrorClass::NotFound)
    }

    #[must_use]
    pub const fn is_corruption(&self) -> bool {
        matches!(self.class, ErrorClass::Corruption)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

impl From<KeyDecodeError> for InternalError {
    fn from(err: KeyDecodeError) -> Self {
        Self::key_corruption(err.to_string())
    }
}

impl From<AddressError> for InternalError {
    fn from(err: AddressError) -> Self {
        Self::address_invalid(err.to_string())
    }
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// Persisted bytes do not match the keyspace layout (`MalformedKey`).
    Corruption,
    /// Caller supplied a value that violates a boundary contract.
    InvalidInput,
    NotFound,
    Internal,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Corruption => "corruption",
            Self::InvalidInput => "invalid_input",
            Self::NotFound => "not_found",
            Self::Internal => "internal",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Address,
    Key,
    Store,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Address => "address",
            Self::Key => "key",
            Self::Store => "store",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_errors_classify_as_key_corruption() {
        let err: InternalError = KeyDecodeError::Truncated {
            needed: 8,
            found: 3,
        }
        .into();

        assert_eq!(err.class, ErrorClass::Corruption);
        assert_eq!(err.origin, ErrorOrigin::Key);
        assert!(err.is_corruption());
    }

    #[test]
    fn address_errors_classify_as_invalid_input() {
        let err: InternalError = AddressError::Empty.into();

        assert_eq!(err.class, ErrorClass::InvalidInput);
        assert_eq!(err.origin, ErrorOrigin::Address);
        assert!(err.display_with_class().starts_with("address:invalid_input: "));
    }

    #[test]
    fn not_found_renders_key_as_hex() {
        let err = InternalError::store_not_found(&[0x01, 0xab]);

        assert!(err.is_not_found());
        assert_eq!(err.message, "key not found: 01ab");
    }
}
