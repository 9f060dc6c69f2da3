use crate::data::LoopData;
use crate::segment::Index;

use super::Statement;

/// Invoke body `I` of the kernel's body tuple.
///
/// The body receives the current index of every dimension, in the order the
/// segments were declared. Under a [`CreateShmem`] it may also take the
/// innermost tile set as a trailing `&mut` argument. The index must name a
/// body that exists:
///
/// ```compile_fail
/// use nestloop::{For, Index, KernelPolicy, Lambda, RangeSegment, SeqExec};
///
/// // One body, but the statement asks for the second one.
/// type Pol = KernelPolicy<For<0, SeqExec, Lambda<1>>>;
/// Pol::run([RangeSegment::new(0, 4)], (|_i: Index| {},));
/// ```
///
/// [`CreateShmem`]: super::CreateShmem
#[derive(Clone, Copy, Debug, Default)]
pub struct Lambda<const I: usize>;

/// Compile-time access to element `I` of a body tuple.
pub trait BodyAt<const I: usize> {
    type Body;

    fn body(&self) -> &Self::Body;
}

/// Number of bodies in a body tuple.
pub trait BodyList {
    const COUNT: usize;
}

/// Call shape of a body that takes only its indices.
#[derive(Clone, Copy, Debug)]
pub enum IndicesOnly {}

/// Call shape of a body that takes its indices and then `&mut` tiles.
#[derive(Clone, Copy, Debug)]
pub enum WithTiles {}

/// A callable that can run as a loop body over `N` dimensions with scratch
/// view `S`.
///
/// Implemented for closures of 0 to 6 `Index` arguments, one per kernel
/// segment. A closure taking the indices only ([`IndicesOnly`]) runs
/// anywhere. Under a `CreateShmem` a closure may instead take the tile set
/// as one extra, trailing `&mut` argument ([`WithTiles`]); the tile type
/// must match the enclosing parameter tuple. `Shape` is inferred from the
/// closure's signature.
pub trait LoopBody<const N: usize, S, Shape> {
    fn invoke(&self, args: [Index; N], scratch: &mut S);
}

impl<'k, 't, P, B, S, Shape, const I: usize, const N: usize>
    Statement<LoopData<'k, 't, P, B, S, N>, Shape> for Lambda<I>
where
    B: BodyAt<I>,
    <B as BodyAt<I>>::Body: LoopBody<N, S, Shape>,
{
    #[inline]
    fn exec(data: &mut LoopData<'k, 't, P, B, S, N>) {
        let body = <B as BodyAt<I>>::body(data.bodies);
        body.invoke(data.offsets, &mut *data.scratch);
    }
}

// ─── Body tuples ───────────────────────────────────────────────────

macro_rules! body_at {
    (@impl ($($F:ident),+) $idx:tt $pick:ident) => {
        impl<$($F),+> BodyAt<$idx> for ($($F,)+) {
            type Body = $pick;

            #[inline]
            fn body(&self) -> &$pick {
                &self.$idx
            }
        }
    };
    ($tuple:tt; $count:literal; $($idx:tt => $pick:ident),+) => {
        $( body_at!(@impl $tuple $idx $pick); )+
        body_at!(@count $tuple $count);
    };
    (@count ($($F:ident),+) $count:literal) => {
        impl<$($F),+> BodyList for ($($F,)+) {
            const COUNT: usize = $count;
        }
    };
}

impl BodyList for () {
    const COUNT: usize = 0;
}

body_at!((F0); 1; 0 => F0);
body_at!((F0, F1); 2; 0 => F0, 1 => F1);
body_at!((F0, F1, F2); 3; 0 => F0, 1 => F1, 2 => F2);
body_at!((F0, F1, F2, F3); 4; 0 => F0, 1 => F1, 2 => F2, 3 => F3);
body_at!((F0, F1, F2, F3, F4); 5; 0 => F0, 1 => F1, 2 => F2, 3 => F3, 4 => F4);
body_at!((F0, F1, F2, F3, F4, F5); 6;
    0 => F0, 1 => F1, 2 => F2, 3 => F3, 4 => F4, 5 => F5);
body_at!((F0, F1, F2, F3, F4, F5, F6); 7;
    0 => F0, 1 => F1, 2 => F2, 3 => F3, 4 => F4, 5 => F5, 6 => F6);
body_at!((F0, F1, F2, F3, F4, F5, F6, F7); 8;
    0 => F0, 1 => F1, 2 => F2, 3 => F3, 4 => F4, 5 => F5, 6 => F6, 7 => F7);

// ─── Closure bodies ────────────────────────────────────────────────

macro_rules! loop_body {
    (@index $i:ident) => { Index };
    ($n:literal; $($i:ident),*) => {
        impl<F, S> LoopBody<$n, S, IndicesOnly> for F
        where
            F: Fn($(loop_body!(@index $i)),*),
        {
            #[inline]
            fn invoke(&self, [$($i),*]: [Index; $n], _scratch: &mut S) {
                self($($i),*)
            }
        }

        impl<F> LoopBody<$n, (), WithTiles> for F
        where
            F: Fn($(loop_body!(@index $i),)* &mut ()),
        {
            #[inline]
            fn invoke(&self, [$($i),*]: [Index; $n], scratch: &mut ()) {
                self($($i,)* scratch)
            }
        }

        impl<F, H, T> LoopBody<$n, (H, T), WithTiles> for F
        where
            F: Fn($(loop_body!(@index $i),)* &mut (H, T)),
        {
            #[inline]
            fn invoke(&self, [$($i),*]: [Index; $n], scratch: &mut (H, T)) {
                self($($i,)* scratch)
            }
        }
    };
}

loop_body!(0;);
loop_body!(1; i0);
loop_body!(2; i0, i1);
loop_body!(3; i0, i1, i2);
loop_body!(4; i0, i1, i2, i3);
loop_body!(5; i0, i1, i2, i3, i4);
loop_body!(6; i0, i1, i2, i3, i4, i5);
