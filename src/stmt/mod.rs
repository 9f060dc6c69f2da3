//! Statement tags and their dispatch.
//!
//! A kernel's loop nest is a type built from zero-sized tags:
//!
//! - [`For<DIM, Pol, Body>`] traverses dimension `DIM` under policy `Pol`
//! - [`Lambda<I>`] invokes body `I` with the current indices
//! - [`CreateShmem<Body>`] materialises one tile per parameter slot, then runs `Body`
//!
//! and tuples of statements, which run their members in order. Every tag
//! implements [`Statement`] for the contexts it can run against; that impl is
//! the whole of its behaviour. A tag that cannot run in a given position (an
//! out-of-range body index, a parallel loop over a borrowed scratch view) has
//! no impl there and the kernel does not build.

mod describe;
mod for_loop;
mod lambda;
mod shmem;


pub use describe::{describe, Describe};
pub use for_loop::For;
pub use lambda::{BodyAt, BodyList, IndicesOnly, Lambda, LoopBody, WithTiles};
pub use shmem::{CreateShmem, ParamSlot, ParamTuple, SharedMem, TileAt, TileList};

/// Execution behaviour of one statement type against a context `D`.
///
/// Statements carry no runtime state, so `exec` has no receiver. `M`
/// records which call shape every `Lambda` in the tree uses (see
/// [`LoopBody`]); it is inferred from the bodies and never written out.
pub trait Statement<D, M> {
    fn exec(data: &mut D);
}

/// The empty statement list.
impl<D> Statement<D, ()> for () {
    #[inline]
    fn exec(_data: &mut D) {}
}

macro_rules! statement_list {
    ($($S:ident / $M:ident),+) => {
        impl<D, $($S: Statement<D, $M>, $M),+> Statement<D, ($($M,)+)> for ($($S,)+) {
            #[inline]
            fn exec(data: &mut D) {
                $($S::exec(data);)+
            }
        }
    };
}

statement_list!(S0 / M0);
statement_list!(S0 / M0, S1 / M1);
statement_list!(S0 / M0, S1 / M1, S2 / M2);
statement_list!(S0 / M0, S1 / M1, S2 / M2, S3 / M3);
statement_list!(S0 / M0, S1 / M1, S2 / M2, S3 / M3, S4 / M4);
statement_list!(S0 / M0, S1 / M1, S2 / M2, S3 / M3, S4 / M4, S5 / M5);
statement_list!(S0 / M0, S1 / M1, S2 / M2, S3 / M3, S4 / M4, S5 / M5, S6 / M6);
statement_list!(S0 / M0, S1 / M1, S2 / M2, S3 / M3, S4 / M4, S5 / M5, S6 / M6, S7 / M7);
