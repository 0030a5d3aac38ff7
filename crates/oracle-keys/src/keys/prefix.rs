//! Prefix registry: the fixed partition of the leading key byte into domains.

use crate::keys::{ADDRESS_LEN, ID_LEN};
use serde::Serialize;
use std::fmt;
use thiserror::Error as ThisError;

// ── Domain prefixes (DO NOT reorder or reuse) ────────────────────────

/// Prefix for global primitive state variables.
pub const GLOBAL_STORE_KEY_PREFIX: &[u8] = &[0x00];
/// Prefix for the request store.
pub const REQUEST_STORE_KEY_PREFIX: &[u8] = &[0x01];
/// Prefix for the report store.
pub const REPORT_STORE_KEY_PREFIX: &[u8] = &[0x02];
/// Prefix for the data source store.
pub const DATA_SOURCE_STORE_KEY_PREFIX: &[u8] = &[0x03];
/// Prefix for the oracle script store.
pub const ORACLE_SCRIPT_STORE_KEY_PREFIX: &[u8] = &[0x04];
/// Prefix for the reporter store.
pub const REPORTER_STORE_KEY_PREFIX: &[u8] = &[0x05];
/// Prefix for the validator report info store.
pub const VALIDATOR_REPORT_INFO_KEY_PREFIX: &[u8] = &[0x06];
/// Prefix for request results. Terminal: sorts after every other domain.
pub const RESULT_STORE_KEY_PREFIX: &[u8] = &[0xff];

// ── Global singletons ─────────────────────────────────────────────
// Global prefix followed by a unique ASCII token. Singletons are never
// range-scanned against each other.

/// Total request count.
pub const REQUEST_COUNT_STORE_KEY: &[u8] = b"\x00RequestCount";
/// Ordered list of request IDs awaiting resolution.
pub const PENDING_RESOLVE_LIST_STORE_KEY: &[u8] = b"\x00PendingList";
/// Total data source count.
pub const DATA_SOURCE_COUNT_STORE_KEY: &[u8] = b"\x00DataSourceCount";
/// Total oracle script count.
pub const ORACLE_SCRIPT_COUNT_STORE_KEY: &[u8] = b"\x00OracleScriptCount";

/// Every singleton key with a diagnostic name.
pub const SINGLETON_KEYS: [(&str, &[u8]); 4] = [
    ("request_count", REQUEST_COUNT_STORE_KEY),
    ("pending_resolve_list", PENDING_RESOLVE_LIST_STORE_KEY),
    ("data_source_count", DATA_SOURCE_COUNT_STORE_KEY),
    ("oracle_script_count", ORACLE_SCRIPT_COUNT_STORE_KEY),
];

///
/// KeyDomain
///
/// Closed set of key domains. The discriminant order follows prefix order.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyDomain {
    Global,
    Request,
    Report,
    DataSource,
    OracleScript,
    Reporter,
    ValidatorReportInfo,
    Result,
}

impl KeyDomain {
    pub const ALL: [Self; 8] = [
        Self::Global,
        Self::Request,
        Self::Report,
        Self::DataSource,
        Self::OracleScript,
        Self::Reporter,
        Self::ValidatorReportInfo,
        Self::Result,
    ];

    #[must_use]
    pub const fn prefix(self) -> &'static [u8] {
        match self {
            Self::Global => GLOBAL_STORE_KEY_PREFIX,
            Self::Request => REQUEST_STORE_KEY_PREFIX,
            Self::Report => REPORT_STORE_KEY_PREFIX,
            Self::DataSource => DATA_SOURCE_STORE_KEY_PREFIX,
            Self::OracleScript => ORACLE_SCRIPT_STORE_KEY_PREFIX,
            Self::Reporter => REPORTER_STORE_KEY_PREFIX,
            Self::ValidatorReportInfo => VALIDATOR_REPORT_INFO_KEY_PREFIX,
            Self::Result => RESULT_STORE_KEY_PREFIX,
        }
    }

    /// Map a leading key byte back to its domain.
    #[must_use]
    pub const fn from_prefix_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Self::Global),
            0x01 => Some(Self::Request),
            0x02 => Some(Self::Report),
            0x03 => Some(Self::DataSource),
            0x04 => Some(Self::OracleScript),
            0x05 => Some(Self::Reporter),
            0x06 => Some(Self::ValidatorReportInfo),
            0xff => Some(Self::Result),
            _ => None,
        }
    }

    /// Domain owning `key`, if its leading byte is registered.
    #[must_use]
    pub fn classify(key: &[u8]) -> Option<Self> {
        key.first().copied().and_then(Self::from_prefix_byte)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Request => "request",
            Self::Report => "report",
            Self::DataSource => "data_source",
            Self::OracleScript => "oracle_script",
            Self::Reporter => "reporter",
            Self::ValidatorReportInfo => "validator_report_info",
            Self::Result => "result",
        }
    }
}

impl fmt::Display for KeyDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

///
/// KeyComponent
///
/// One segment following a domain prefix.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyComponent {
    Id,
    ValAddress,
    AccAddress,
    /// Variable-width ASCII token; only used by global singletons.
    Token,
}

impl KeyComponent {
    #[must_use]
    pub const fn width(self) -> Option<usize> {
        match self {
            Self::Id => Some(ID_LEN),
            Self::ValAddress | Self::AccAddress => Some(ADDRESS_LEN),
            Self::Token => None,
        }
    }
}

///
/// DomainLayout
///
/// Static description of one domain's full key shape.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct DomainLayout {
    pub domain: KeyDomain,
    pub prefix: &'static [u8],
    pub components: &'static [KeyComponent],
}

impl DomainLayout {
    /// Full key length, or `None` when a component is variable-width.
    #[must_use]
    pub fn key_len(&self) -> Option<usize> {
        self.components
            .iter()
            .try_fold(self.prefix.len(), |len, c| Some(len + c.width()?))
    }
}

static LAYOUT: [DomainLayout; 8] = [
    DomainLayout {
        domain: KeyDomain::Global,
        prefix: GLOBAL_STORE_KEY_PREFIX,
        components: &[KeyComponent::Token],
    },
    DomainLayout {
        domain: KeyDomain::Request,
        prefix: REQUEST_STORE_KEY_PREFIX,
        components: &[KeyComponent::Id],
    },
    DomainLayout {
        domain: KeyDomain::Report,
        prefix: REPORT_STORE_KEY_PREFIX,
        components: &[KeyComponent::Id, KeyComponent::ValAddress],
    },
    DomainLayout {
        domain: KeyDomain::DataSource,
        prefix: DATA_SOURCE_STORE_KEY_PREFIX,
        components: &[KeyComponent::Id],
    },
    DomainLayout {
        domain: KeyDomain::OracleScript,
        prefix: ORACLE_SCRIPT_STORE_KEY_PREFIX,
        components: &[KeyComponent::Id],
    },
    DomainLayout {
        domain: KeyDomain::Reporter,
        prefix: REPORTER_STORE_KEY_PREFIX,
        components: &[KeyComponent::ValAddress, KeyComponent::AccAddress],
    },
    DomainLayout {
        domain: KeyDomain::ValidatorReportInfo,
        prefix: VALIDATOR_REPORT_INFO_KEY_PREFIX,
        components: &[KeyComponent::ValAddress],
    },
    DomainLayout {
        domain: KeyDomain::Result,
        prefix: RESULT_STORE_KEY_PREFIX,
        components: &[KeyComponent::Id],
    },
];

/// The immutable layout table, one entry per domain in prefix order.
#[must_use]
pub fn layout() -> &'static [DomainLayout] {
    &LAYOUT
}

///
/// LayoutError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum LayoutError {
    #[error("domain {domain} has an empty prefix")]
    EmptyPrefix { domain: KeyDomain },

    #[error("domain {domain} prefix does not match its registry entry")]
    PrefixMismatch { domain: KeyDomain },

    #[error("domain prefixes overlap: {left} and {right}")]
    OverlappingPrefix { left: KeyDomain, right: KeyDomain },

    #[error("singleton key '{name}' is outside the global domain")]
    SingletonOutsideGlobal { name: &'static str },

    #[error("singleton keys overlap: '{left}' and '{right}'")]
    OverlappingSingleton {
        left: &'static str,
        right: &'static str,
    },
}

/// Re-check the registry's structural invariants.
///
/// Run once at startup by embedders; a failure means the static table was
/// edited inconsistently.
pub fn validate_layout() -> Result<(), LayoutError> {
    let table = layout();

    for (entry, domain) in table.iter().zip(KeyDomain::ALL) {
        if entry.prefix.is_empty() {
            return Err(LayoutError::EmptyPrefix { domain });
        }
        if entry.domain != domain || entry.prefix != domain.prefix() {
            return Err(LayoutError::PrefixMismatch { domain });
        }
    }

    for (i, left) in table.iter().enumerate() {
        for right in &table[i + 1..] {
            if left.prefix.starts_with(right.prefix) || right.prefix.starts_with(left.prefix) {
                return Err(LayoutError::OverlappingPrefix {
                    left: left.domain,
                    right: right.domain,
                });
            }
        }
    }

    for (i, &(name, key)) in SINGLETON_KEYS.iter().enumerate() {
        if key.len() <= GLOBAL_STORE_KEY_PREFIX.len() || !key.starts_with(GLOBAL_STORE_KEY_PREFIX)
        {
            return Err(LayoutError::SingletonOutsideGlobal { name });
        }
        for &(other, other_key) in &SINGLETON_KEYS[i + 1..] {
            if key.starts_with(other_key) || other_key.starts_with(key) {
                return Err(LayoutError::OverlappingSingleton {
                    left: name,
                    right: other,
                });
            }
        }
    }

    Ok(())
}
