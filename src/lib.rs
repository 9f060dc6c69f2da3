//! Compile-time dispatched loop-nest kernels.
//!
//! A kernel's loop structure is a type (`For`, `Lambda`, `CreateShmem` and
//! tuples of them); every node resolves to a statically known code path when
//! the kernel is instantiated. See [`api`] for launching and [`stmt`] for the
//! statement tags.

pub mod api;
pub mod config;
pub mod data;
pub mod demos;
pub mod diagnostic;
pub mod policy;
pub mod segment;
pub mod span;
pub mod stmt;

pub use api::{forall, KernelPolicy};
pub use data::{LoopData, NoScratch};
pub use demos::{Demo, DemoReport};
pub use policy::{ExecPolicy, ParExec, PolicyKind, SeqExec, SimdExec};
pub use segment::{Index, RangeSegment};
pub use stmt::{
    describe, BodyAt, BodyList, CreateShmem, Describe, For, IndicesOnly, Lambda, LoopBody,
    ParamSlot, ParamTuple, SharedMem, Statement, TileAt, TileList, WithTiles,
};
