//! Execution context threaded through statement dispatch.

use crate::segment::{Index, RangeSegment};

/// Scratch view in effect when no `CreateShmem` encloses the statement.
///
/// Bodies dispatched against this view take only their index arguments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoScratch;

/// Per-invocation state of one kernel.
///
/// `'k` borrows the kernel's segments, parameters and bodies for the whole
/// launch. `'t` borrows the scratch view currently in scope; it is the frame
/// of the nearest enclosing `CreateShmem`, or the launch frame when `S` is
/// [`NoScratch`].
pub struct LoopData<'k, 't, P, B, S, const N: usize> {
    pub(crate) segments: &'k [RangeSegment; N],
    pub(crate) params: &'k P,
    pub(crate) bodies: &'k B,
    pub(crate) offsets: [Index; N],
    pub(crate) scratch: &'t mut S,
}

impl<'k, 't, P, B, S, const N: usize> LoopData<'k, 't, P, B, S, N> {
    /// Fresh context with every index at the start of its segment.
    pub fn new(
        segments: &'k [RangeSegment; N],
        params: &'k P,
        bodies: &'k B,
        scratch: &'t mut S,
    ) -> Self {
        Self {
            segments,
            params,
            bodies,
            offsets: segments.map(|seg| seg.begin()),
            scratch,
        }
    }

    /// Current index value of every dimension, in declaration order.
    pub fn offsets(&self) -> [Index; N] {
        self.offsets
    }

    pub fn segments(&self) -> &'k [RangeSegment; N] {
        self.segments
    }

    pub fn params(&self) -> &'k P {
        self.params
    }

    pub fn bodies(&self) -> &'k B {
        self.bodies
    }

    /// Same kernel state seen through another scratch view.
    ///
    /// The returned context cannot outlive `scratch`, which is what confines
    /// tiles to the subtree they were created for.
    pub fn with_scratch<'u, T>(&self, scratch: &'u mut T) -> LoopData<'k, 'u, P, B, T, N> {
        LoopData {
            segments: self.segments,
            params: self.params,
            bodies: self.bodies,
            offsets: self.offsets,
            scratch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_start_at_segment_begin() {
        let segments = [RangeSegment::new(4, 8), RangeSegment::new(-3, 3)];
        let mut none = NoScratch;
        let data = LoopData::new(&segments, &(), &(), &mut none);
        assert_eq!(data.offsets(), [4, -3]);
    }

    #[test]
    fn test_with_scratch_keeps_offsets() {
        let segments = [RangeSegment::new(0, 8)];
        let mut none = NoScratch;
        let mut data = LoopData::new(&segments, &(), &(), &mut none);
        data.offsets[0] = 5;
        let mut tiles = (1.5f64, ());
        let inner = data.with_scratch(&mut tiles);
        assert_eq!(inner.offsets(), [5]);
        assert_eq!(inner.scratch.0, 1.5);
    }
}
