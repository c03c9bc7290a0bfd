//! Best-match search over the template library.

use serde::{Deserialize, Serialize};

use crate::{BitPattern, ModelLibrary, Result, SqwaveError, Template, NBITS};

/// Result of one best-match search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Index of the winning template in enumeration order.
    pub index: usize,
    /// Hamming distance between the observation and the winning template.
    pub distance: usize,
}

/// Exhaustive Hamming-distance matcher.
///
/// Scans the whole library on every call; each comparison is one XOR plus a
/// popcount on the packing word. Ties resolve to the lowest enumerated
/// index. A parallel partition of the scan would have to merge partial
/// results by comparing (distance, index) lexicographically to keep that
/// tie-break.
pub struct Matcher {
    library: ModelLibrary,
}

impl Matcher {
    /// Wrap a built library.
    pub fn new(library: ModelLibrary) -> Self {
        Self { library }
    }

    /// The wrapped library.
    pub fn library(&self) -> &ModelLibrary {
        &self.library
    }

    /// Find the template with minimum Hamming distance to `observation`.
    ///
    /// The scan keeps the first encountered minimum: a later template at the
    /// same distance never replaces an earlier one. There is no early exit
    /// at distance zero.
    pub fn best_overlap(&self, observation: BitPattern) -> Result<MatchResult> {
        if self.library.is_empty() {
            return Err(SqwaveError::EmptyLibrary);
        }

        let mut best = MatchResult {
            index: 0,
            distance: NBITS,
        };
        for template in self.library.templates() {
            let distance = template.bits.hamming_distance(observation);
            if distance < best.distance {
                best = MatchResult {
                    index: template.index,
                    distance,
                };
            }
        }
        Ok(best)
    }

    /// The winning template itself.
    pub fn best_template(&self, observation: BitPattern) -> Result<&Template> {
        let result = self.best_overlap(observation)?;
        Ok(&self.library.templates()[result.index])
    }
}
