use std::marker::PhantomData;

use rayon::prelude::*;

use crate::data::{LoopData, NoScratch};
use crate::policy::{ParExec, SeqExec, SimdExec};

use super::Statement;

/// Traverse dimension `DIM` under policy `Pol`, running `Body` once per
/// index of that dimension's segment.
///
/// `DIM` must name one of the kernel's segments; a larger value stops the
/// build when the kernel is instantiated.
#[derive(Clone, Copy, Debug, Default)]
pub struct For<const DIM: usize, Pol, Body>(PhantomData<(Pol, Body)>);

macro_rules! serial_for {
    ($pol:ty) => {
        impl<'k, 't, P, B, S, Body, M, const DIM: usize, const N: usize>
            Statement<LoopData<'k, 't, P, B, S, N>, M> for For<DIM, $pol, Body>
        where
            Body: Statement<LoopData<'k, 't, P, B, S, N>, M>,
        {
            #[inline]
            fn exec(data: &mut LoopData<'k, 't, P, B, S, N>) {
                const { assert!(DIM < N, "For dimension is out of range for the kernel's segments") };
                let outer = data.offsets[DIM];
                for i in data.segments[DIM].iter() {
                    data.offsets[DIM] = i;
                    Body::exec(data);
                }
                data.offsets[DIM] = outer;
            }
        }
    };
}

serial_for!(SeqExec);
serial_for!(SimdExec);

/// Parallel traversal. Each iteration runs against its own copy of the
/// context, so a `CreateShmem` below this loop installs tiles per iteration.
/// No scratch view may be in scope: tiles are never shared between workers.
impl<'k, 't, P, B, Body, M, const DIM: usize, const N: usize>
    Statement<LoopData<'k, 't, P, B, NoScratch, N>, M> for For<DIM, ParExec, Body>
where
    P: Sync,
    B: Sync,
    Body: for<'u> Statement<LoopData<'k, 'u, P, B, NoScratch, N>, M>,
{
    fn exec(data: &mut LoopData<'k, 't, P, B, NoScratch, N>) {
        const { assert!(DIM < N, "For dimension is out of range for the kernel's segments") };
        let segments = data.segments;
        let params = data.params;
        let bodies = data.bodies;
        let offsets = data.offsets;

        segments[DIM].iter().into_par_iter().for_each(|i| {
            let mut none = NoScratch;
            let mut worker = LoopData {
                segments,
                params,
                bodies,
                offsets,
                scratch: &mut none,
            };
            worker.offsets[DIM] = i;
            Body::exec(&mut worker);
        });
    }
}
