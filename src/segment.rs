//! Iteration spaces.
//!
//! A kernel traverses one `RangeSegment` per dimension. Index values are
//! signed so that offsets and strides computed inside bodies stay in one type.

use std::ops::Range;

/// Loop index type handed to every body argument.
pub type Index = i64;

/// Half-open contiguous index range `[begin, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RangeSegment {
    begin: Index,
    end: Index,
}

impl RangeSegment {
    /// Build a segment. An `end` at or below `begin` yields an empty range.
    pub fn new(begin: Index, end: Index) -> Self {
        Self {
            begin,
            end: end.max(begin),
        }
    }

    pub fn begin(&self) -> Index {
        self.begin
    }

    pub fn end(&self) -> Index {
        self.end
    }

    /// Number of indices in the segment, saturating at `usize::MAX`.
    pub fn len(&self) -> usize {
        usize::try_from(self.end.abs_diff(self.begin)).unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.begin
    }

    /// The indices of the segment, in ascending order.
    pub fn iter(&self) -> Range<Index> {
        self.begin..self.end
    }
}

impl From<Range<Index>> for RangeSegment {
    fn from(range: Range<Index>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl IntoIterator for RangeSegment {
    type Item = Index;
    type IntoIter = Range<Index>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
