use crate::keys::KeyDomain;
use std::ops::Bound;

/// Exclusive upper bound of every key starting with `prefix`.
///
/// Increments the last byte that is not `0xff` after dropping trailing
/// `0xff`s. Returns `None` when no finite bound exists (empty or all-`0xff`
/// prefix), meaning the scan runs to the end of the keyspace.
#[must_use]
pub fn prefix_end(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut end = prefix.to_vec();
    while let Some(last) = end.pop() {
        if last < u8::MAX {
            end.push(last + 1);
            return Some(end);
        }
    }

    None
}

///
/// KeyRange
///
/// Half-open byte range `[start, end)` covering exactly the keys that share
/// a prefix. `end == None` is unbounded.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyRange {
    start: Vec<u8>,
    end: Option<Vec<u8>>,
}

impl KeyRange {
    #[must_use]
    pub fn for_prefix(prefix: impl Into<Vec<u8>>) -> Self {
        let start = prefix.into();
        let end = prefix_end(&start);

        Self { start, end }
    }

    /// Range over every key in one domain.
    #[must_use]
    pub fn for_domain(domain: KeyDomain) -> Self {
        Self::for_prefix(domain.prefix())
    }

    #[must_use]
    pub fn start(&self) -> &[u8] {
        &self.start
    }

    #[must_use]
    pub fn end(&self) -> Option<&[u8]> {
        self.end.as_deref()
    }

    #[must_use]
    pub fn contains(&self, key: &[u8]) -> bool {
        key >= self.start.as_slice() && self.end.as_deref().is_none_or(|end| key < end)
    }

    /// Bounds in the shape `BTreeMap::range` accepts for `[u8]` lookups.
    #[must_use]
    pub fn as_bounds(&self) -> (Bound<&[u8]>, Bound<&[u8]>) {
        let end = match &self.end {
            Some(end) => Bound::Excluded(end.as_slice()),
            None => Bound::Unbounded,
        };

        (Bound::Included(self.start.as_slice()), end)
    }
}
