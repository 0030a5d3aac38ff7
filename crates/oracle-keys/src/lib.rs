//! Keyspace layout for the oracle module's slice of an ordered key-value
//! store: domain prefixes, the numeric ID codec, composite key builders, and
//! the typed store accessors that consume them.
#![warn(unreachable_pub)]

#[macro_use]
pub(crate) mod macros;

// public exports are one module level down
pub mod error;
pub mod keys;
pub mod obs;
pub mod store;

///
/// CONSTANTS
///

/// Name of the module that owns this keyspace.
pub const MODULE_NAME: &str = "oracle";

/// Store key used when mounting the module's key-value store.
pub const STORE_KEY: &str = MODULE_NAME;

/// Default port the module binds to.
pub const PORT_ID: &str = MODULE_NAME;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, stores, or metrics helpers are re-exported here.
///

pub mod prelude {
    pub use crate::keys::{
        AccAddress, DataSourceId, KeyDomain, OracleScriptId, RequestId, ValAddress,
    };
}
