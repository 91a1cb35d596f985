//! The set of point identifiers chosen for removal

use serde::{Deserialize, Serialize};

/// Identifiers of the points to discard.
///
/// Always sorted ascending and free of duplicates. The identifiers refer to
/// the cloud as it was when the set was computed; they go stale as soon as
/// the cloud is compacted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalSet {
    indices: Vec<usize>,
}

impl RemovalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from arbitrary identifiers, sorting and dropping repeats
    pub fn from_indices<I: IntoIterator<Item = usize>>(indices: I) -> Self {
        let mut indices: Vec<usize> = indices.into_iter().collect();
        indices.sort_unstable();
        indices.dedup();
        Self { indices }
    }

    /// Every identifier whose flag is `false`
    pub(crate) fn from_keep_flags(keep: &[bool]) -> Self {
        let indices = keep
            .iter()
            .enumerate()
            .filter(|(_, &kept)| !kept)
            .map(|(idx, _)| idx)
            .collect();
        Self { indices }
    }

    /// Wrap identifiers that are already strictly ascending
    pub(crate) fn from_sorted(indices: Vec<usize>) -> Self {
        debug_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        Self { indices }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, idx: usize) -> bool {
        self.indices.binary_search(&idx).is_ok()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.indices.iter()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.indices
    }

    /// How many points a cloud of `cloud_len` points keeps once this set is applied
    pub fn remaining(&self, cloud_len: usize) -> usize {
        cloud_len.saturating_sub(self.indices.len())
    }
}

impl<'a> IntoIterator for &'a RemovalSet {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices.iter()
    }
}

impl IntoIterator for RemovalSet {
    type Item = usize;
    type IntoIter = std::vec::IntoIter<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices.into_iter()
    }
}
