//! Scratch tiles.
//!
//! The parameter tuple is a cons list `(slot, rest)` ending in `()` (build it
//! with [`params!`](crate::params)). `CreateShmem` walks that list once per
//! execution, asks every slot for a fresh tile, and keeps the resulting tile
//! list `(tile, rest)` as a local of its own frame. Enclosed statements see
//! the list through a `&mut` view; when `CreateShmem` returns the tiles are
//! dropped and no reference to them can remain.

use std::marker::PhantomData;

use crate::data::LoopData;

use super::Statement;

/// Install one tile per parameter slot, then run `Body` with the tiles in
/// scope.
///
/// Tiles belong to one execution of the node. When an enclosing loop runs
/// the node several times, or in parallel, every execution gets its own set.
#[derive(Clone, Copy, Debug, Default)]
pub struct CreateShmem<Body>(PhantomData<Body>);

/// One entry of a kernel's parameter tuple.
pub trait ParamSlot {
    /// Scratch type materialised by `CreateShmem` for this slot.
    type Tile;

    fn make_tile(&self) -> Self::Tile;
}

/// Parameter tuple: `()` or `(slot, rest)`.
pub trait ParamTuple {
    /// Number of slots.
    const LEN: usize;

    /// Tile list mirroring the slot list: `()` or `(tile, rest)`.
    type Tiles;

    /// Build one tile for every slot, first slot first.
    fn install(&self) -> Self::Tiles;
}

impl ParamTuple for () {
    const LEN: usize = 0;
    type Tiles = ();

    #[inline]
    fn install(&self) -> Self::Tiles {}
}

impl<H: ParamSlot, T: ParamTuple> ParamTuple for (H, T) {
    const LEN: usize = T::LEN + 1;
    type Tiles = (H::Tile, T::Tiles);

    #[inline]
    fn install(&self) -> Self::Tiles {
        let tile = self.0.make_tile();
        (tile, self.1.install())
    }
}

impl<'k, 't, P, B, S, Body, M, const N: usize> Statement<LoopData<'k, 't, P, B, S, N>, M>
    for CreateShmem<Body>
where
    P: ParamTuple,
    Body: for<'u> Statement<LoopData<'k, 'u, P, B, P::Tiles, N>, M>,
{
    #[inline]
    fn exec(data: &mut LoopData<'k, 't, P, B, S, N>) {
        let mut tiles = data.params.install();
        let mut inner = data.with_scratch(&mut tiles);
        Body::exec(&mut inner);
    }
}

/// Parameter slot whose tile is a clone of a fill value.
///
/// `SharedMem::<[f64; 64]>::new()` gives every execution a zeroed 64-element
/// tile; `SharedMem::filled(x)` starts each tile at `x`.
#[derive(Clone, Debug, Default)]
pub struct SharedMem<T> {
    fill: T,
}

impl<T: Default> SharedMem<T> {
    pub fn new() -> Self {
        Self { fill: T::default() }
    }
}

impl<T> SharedMem<T> {
    pub fn filled(fill: T) -> Self {
        Self { fill }
    }
}

impl<T: Clone> ParamSlot for SharedMem<T> {
    type Tile = T;

    #[inline]
    fn make_tile(&self) -> T {
        self.fill.clone()
    }
}

/// Build a parameter tuple from slot values.
///
/// `params![a, b]` is `(a, (b, ()))`.
#[macro_export]
macro_rules! params {
    () => { () };
    ($head:expr $(, $tail:expr)* $(,)?) => {
        ($head, $crate::params!($($tail),*))
    };
}

// ─── Tile access ───────────────────────────────────────────────────

/// Element `K` of a tile list.
pub trait TileAt<const K: usize> {
    type Tile;

    fn tile_at(&mut self) -> &mut Self::Tile;
}

impl<H, T> TileAt<0> for (H, T) {
    type Tile = H;

    #[inline]
    fn tile_at(&mut self) -> &mut H {
        &mut self.0
    }
}

macro_rules! tile_at {
    ($($k:literal => $prev:literal),+) => {
        $(
            impl<H, T: TileAt<$prev>> TileAt<$k> for (H, T) {
                type Tile = T::Tile;

                #[inline]
                fn tile_at(&mut self) -> &mut T::Tile {
                    <T as TileAt<$prev>>::tile_at(&mut self.1)
                }
            }
        )+
    };
}

tile_at!(1 => 0, 2 => 1, 3 => 2, 4 => 3, 5 => 4, 6 => 5, 7 => 6);

/// Indexed access on a tile list: `tiles.slot::<2>()`.
pub trait TileList {
    fn slot<const K: usize>(&mut self) -> &mut <Self as TileAt<K>>::Tile
    where
        Self: TileAt<K>,
    {
        <Self as TileAt<K>>::tile_at(self)
    }
}

impl<H, T> TileList for (H, T) {}
