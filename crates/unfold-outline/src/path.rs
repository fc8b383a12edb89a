//! Hierarchical heading numbers.

use std::fmt;

/// Position of a heading in the outline, one counter per depth.
///
/// `[2, 1, 3]` displays as `2.1.3`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NumberPath(Vec<u32>);

impl NumberPath {
    /// Create a path from counters, root first.
    #[must_use]
    pub fn new(counters: Vec<u32>) -> Self {
        Self(counters)
    }

    /// Counters, root first.
    #[must_use]
    pub fn counters(&self) -> &[u32] {
        &self.0
    }

    /// Depth of the path (number of counters).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the path is the (empty) root path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Path of the enclosing scope, `None` for top-level and root paths.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        match self.0.len() {
            0 | 1 => None,
            n => Some(Self(self.0[..n - 1].to_vec())),
        }
    }

    /// Counters joined with `sep` (e.g. `"_"` for anchors).
    #[must_use]
    pub fn join(&self, sep: &str) -> String {
        self.0
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(sep)
    }
}

impl fmt::Display for NumberPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join("."))
    }
}

impl From<Vec<u32>> for NumberPath {
    fn from(counters: Vec<u32>) -> Self {
        Self(counters)
    }
}
