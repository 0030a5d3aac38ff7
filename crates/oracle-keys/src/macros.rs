// numeric_id
/// Declare `u64`-backed identifier newtypes that encode through the
/// fixed-width big-endian ID codec.
macro_rules! numeric_id {
    ( $( $(#[$meta:meta])* $name:ident ),* $(,)? ) => {
        $(
            $(#[$meta])*
            #[derive(
                Clone,
                Copy,
                Debug,
                Default,
                ::derive_more::Display,
                Eq,
                ::derive_more::From,
                Hash,
                ::derive_more::Into,
                Ord,
                PartialEq,
                PartialOrd,
                ::serde::Deserialize,
                ::serde::Serialize,
            )]
            #[serde(transparent)]
            pub struct $name(u64);

            impl $name {
                #[must_use]
                pub const fn new(id: u64) -> Self {
                    Self(id)
                }

                #[must_use]
                pub const fn get(self) -> u64 {
                    self.0
                }

                /// Fixed-width key component for this ID.
                #[must_use]
                pub const fn to_bytes(self) -> [u8; $crate::keys::ID_LEN] {
                    $crate::keys::encode_id(self.0)
                }

                /// Decode an ID from exactly `ID_LEN` bytes.
                pub fn from_bytes(bytes: &[u8]) -> Result<Self, $crate::keys::KeyDecodeError> {
                    $crate::keys::decode_id_exact(bytes).map(Self)
                }
            }
        )*
    };
}

// fixed_address
/// Declare fixed-width raw address newtypes.
///
/// Width is a type-level guarantee: every composite key that embeds one of
/// these has self-delimiting component boundaries.
macro_rules! fixed_address {
    ( $( $(#[$meta:meta])* $name:ident ),* $(,)? ) => {
        $(
            $(#[$meta])*
            #[derive(
                Clone,
                Copy,
                Debug,
                Eq,
                Hash,
                Ord,
                PartialEq,
                PartialOrd,
                ::serde::Deserialize,
                ::serde::Serialize,
            )]
            pub struct $name([u8; $crate::keys::ADDRESS_LEN]);

            impl $name {
                #[must_use]
                pub const fn from_array(bytes: [u8; $crate::keys::ADDRESS_LEN]) -> Self {
                    Self(bytes)
                }

                /// Validate raw canonical bytes at the boundary.
                pub fn try_from_slice(bytes: &[u8]) -> Result<Self, $crate::keys::AddressError> {
                    $crate::keys::address::fixed_width(bytes).map(Self)
                }

                #[must_use]
                pub const fn as_bytes(&self) -> &[u8; $crate::keys::ADDRESS_LEN] {
                    &self.0
                }

                #[must_use]
                pub const fn to_array(self) -> [u8; $crate::keys::ADDRESS_LEN] {
                    self.0
                }
            }

            impl AsRef<[u8]> for $name {
                fn as_ref(&self) -> &[u8] {
                    &self.0
                }
            }

            impl TryFrom<&[u8]> for $name {
                type Error = $crate::keys::AddressError;

                fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
                    Self::try_from_slice(bytes)
                }
            }

            impl ::std::fmt::Display for $name {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    f.write_str(&$crate::keys::hex(&self.0))
                }
            }
        )*
    };
}
