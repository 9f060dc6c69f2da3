//! Kernel entry points.
//!
//! A kernel is launched by naming its statement tree as a type and passing
//! the runtime pieces: one segment per dimension, the parameter tuple and
//! the body tuple.
//!
//! ```
//! use std::cell::Cell;
//! use nestloop::{For, Index, KernelPolicy, Lambda, RangeSegment, SeqExec};
//!
//! type Pol = KernelPolicy<For<1, SeqExec, For<0, SeqExec, Lambda<0>>>>;
//!
//! let visits = Cell::new(0);
//! Pol::run(
//!     [RangeSegment::new(0, 4), RangeSegment::new(0, 3)],
//!     (|_i: Index, _j: Index| visits.set(visits.get() + 1),),
//! );
//! assert_eq!(visits.get(), 12);
//! ```

use std::marker::PhantomData;

use crate::data::{LoopData, NoScratch};
use crate::policy::ExecPolicy;
use crate::segment::{Index, RangeSegment};
use crate::stmt::{
    describe, BodyList, Describe, For, IndicesOnly, Lambda, ParamTuple, Statement,
};


/// A statement tree ready to launch.
#[derive(Clone, Copy, Debug, Default)]
pub struct KernelPolicy<Stmts>(PhantomData<Stmts>);

impl<Stmts> KernelPolicy<Stmts> {
    /// Launch without parameters.
    pub fn run<B, M, const N: usize>(segments: [RangeSegment; N], bodies: B)
    where
        B: BodyList,
        Stmts: for<'k, 't> Statement<LoopData<'k, 't, (), B, NoScratch, N>, M>,
    {
        Self::run_param::<(), B, M, N>(segments, (), bodies)
    }

    /// Launch with a parameter tuple, whose slots `CreateShmem` turns into
    /// tiles.
    ///
    /// `M` is inferred from the body signatures.
    pub fn run_param<P, B, M, const N: usize>(segments: [RangeSegment; N], params: P, bodies: B)
    where
        P: ParamTuple,
        B: BodyList,
        Stmts: for<'k, 't> Statement<LoopData<'k, 't, P, B, NoScratch, N>, M>,
    {
        tracing::debug!(dims = N, slots = P::LEN, bodies = B::COUNT, "kernel launch");
        tracing::trace!(policy = std::any::type_name::<Stmts>());

        let mut none = NoScratch;
        let mut data = LoopData::new(&segments, &params, &bodies, &mut none);
        Stmts::exec(&mut data);
    }

    /// Indented rendering of the statement tree.
    pub fn describe() -> String
    where
        Stmts: Describe,
    {
        describe::<Stmts>()
    }
}

/// One-dimensional loop: `For<0, Pol, Lambda<0>>` over `segment`.
pub fn forall<Pol, F>(_policy: Pol, segment: RangeSegment, body: F)
where
    Pol: ExecPolicy,
    F: Fn(Index),
    For<0, Pol, Lambda<0>>:
        for<'k, 't> Statement<LoopData<'k, 't, (), (F,), NoScratch, 1>, IndicesOnly>,
{
    KernelPolicy::<For<0, Pol, Lambda<0>>>::run::<(F,), IndicesOnly, 1>([segment], (body,));
}
