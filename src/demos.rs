//! Self-checking sample kernels.
//!
//! Each demo builds its inputs, launches one statement tree under the
//! requested outer policy, and verifies every output element. The CLI and
//! the benches run these; they double as usage examples for `CreateShmem`.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crate::api::KernelPolicy;
use crate::params;
use crate::policy::{ParExec, PolicyKind, SeqExec, SimdExec};
use crate::segment::{Index, RangeSegment};
use crate::stmt::{CreateShmem, For, Lambda, SharedMem};

/// Expand `$body` once per policy with `$pol` naming the policy marker.
macro_rules! with_policy {
    ($kind:expr, $pol:ident => $body:expr) => {
        match $kind {
            PolicyKind::Seq => {
                type $pol = SeqExec;
                $body
            }
            PolicyKind::Simd => {
                type $pol = SimdExec;
                $body
            }
            PolicyKind::Par => {
                type $pol = ParExec;
                $body
            }
        }
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Demo {
    /// `y[i] += x[i] * c` with the product staged in a scratch tile.
    Daxpy,
    /// `c = a + b` over an `n x n` grid, inner loop vectorised.
    MatrixAdd,
    /// Per-row sums accumulated in a scratch tile.
    RowSums,
}

/// Outcome of one verified demo run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoReport {
    pub demo: Demo,
    pub policy: PolicyKind,
    pub size: usize,
    /// Body invocations observed.
    pub invocations: usize,
    /// Body invocations the loop nest should perform.
    pub expected_invocations: usize,
    /// Output elements that differ from the reference.
    pub mismatches: usize,
}

impl DemoReport {
    pub fn passed(&self) -> bool {
        self.mismatches == 0 && self.invocations == self.expected_invocations
    }
}

impl Demo {
    pub const ALL: [Demo; 3] = [Demo::Daxpy, Demo::MatrixAdd, Demo::RowSums];

    pub fn name(self) -> &'static str {
        match self {
            Demo::Daxpy => "daxpy",
            Demo::MatrixAdd => "matrix_add",
            Demo::RowSums => "row_sums",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Demo::Daxpy => "y[i] += x[i] * c over [0, n), product staged in a tile",
            Demo::MatrixAdd => "c = a + b over [0, n) x [0, n), inner loop simd",
            Demo::RowSums => "row sums of an n x n grid, accumulator tile per row",
        }
    }

    /// Statement tree of the demo with `policy` on its outer loop.
    pub fn describe(self, policy: PolicyKind) -> String {
        match self {
            Demo::Daxpy => with_policy!(policy, Pol => {
                KernelPolicy::<DaxpyTree<Pol>>::describe()
            }),
            Demo::MatrixAdd => with_policy!(policy, Pol => {
                KernelPolicy::<MatrixAddTree<Pol>>::describe()
            }),
            Demo::RowSums => with_policy!(policy, Pol => {
                KernelPolicy::<RowSumsTree<Pol>>::describe()
            }),
        }
    }

    /// Output elements the demo allocates at `size`, if the grid and every
    /// flat offset into it fit both `usize` and `Index`.
    pub fn elements(self, size: usize) -> Option<usize> {
        let elements = match self {
            Demo::Daxpy => size,
            Demo::MatrixAdd | Demo::RowSums => size.checked_mul(size)?,
        };
        Index::try_from(elements).ok()?;
        Some(elements)
    }

    /// Run and verify the demo at problem size `size`.
    pub fn run(self, policy: PolicyKind, size: usize) -> Result<DemoReport, String> {
        if self.elements(size).is_none() {
            return Err(format!("size {} is too large for {}", size, self));
        }
        let report = match self {
            Demo::Daxpy => daxpy(policy, size),
            Demo::MatrixAdd => matrix_add(policy, size),
            Demo::RowSums => row_sums(policy, size),
        };
        tracing::debug!(
            demo = self.name(),
            %policy,
            size,
            invocations = report.invocations,
            mismatches = report.mismatches,
            "demo verified"
        );
        Ok(report)
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Demo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Demo::ALL
            .into_iter()
            .find(|demo| demo.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Demo::ALL.iter().map(|d| d.name()).collect();
                format!("unknown kernel '{}' (available: {})", s, names.join(", "))
            })
    }
}

// ─── Kernels ───────────────────────────────────────────────────────

type DaxpyTree<Pol> = For<0, Pol, CreateShmem<Lambda<0>>>;
type MatrixAddTree<Pol> = For<1, Pol, For<0, SimdExec, Lambda<0>>>;
type RowSumsTree<Pol> = For<1, Pol, CreateShmem<(For<0, SimdExec, Lambda<0>>, Lambda<1>)>>;

fn filled(len: usize, value: f64) -> Vec<AtomicU64> {
    (0..len).map(|_| AtomicU64::new(value.to_bits())).collect()
}

fn load(cells: &[AtomicU64], i: Index) -> f64 {
    f64::from_bits(cells[i as usize].load(Ordering::Relaxed))
}

fn store(cells: &[AtomicU64], i: Index, value: f64) {
    cells[i as usize].store(value.to_bits(), Ordering::Relaxed);
}

fn mismatches(cells: &[AtomicU64], expected: impl Fn(usize) -> f64) -> usize {
    cells
        .iter()
        .enumerate()
        .filter(|(i, cell)| f64::from_bits(cell.load(Ordering::Relaxed)) != expected(*i))
        .count()
}

fn daxpy(policy: PolicyKind, n: usize) -> DemoReport {
    let c = 0.5;
    let x = filled(n, 2.0);
    let y = filled(n, 0.0);
    let calls = AtomicUsize::new(0);

    let body = |i: Index, tile: &mut (f64, ())| {
        calls.fetch_add(1, Ordering::Relaxed);
        tile.0 = load(&x, i) * c;
        store(&y, i, load(&y, i) + tile.0);
    };
    let segments = [RangeSegment::new(0, n as Index)];
    with_policy!(policy, Pol => {
        KernelPolicy::<DaxpyTree<Pol>>::run_param(segments, params![SharedMem::<f64>::new()], (body,))
    });

    DemoReport {
        demo: Demo::Daxpy,
        policy,
        size: n,
        invocations: calls.into_inner(),
        expected_invocations: n,
        mismatches: mismatches(&y, |_| 1.0),
    }
}

fn matrix_add(policy: PolicyKind, n: usize) -> DemoReport {
    let a = filled(n * n, 1.0);
    let b = filled(n * n, 1.0);
    let c = filled(n * n, 0.0);
    let calls = AtomicUsize::new(0);
    let stride = n as Index;

    let body = |i: Index, j: Index| {
        calls.fetch_add(1, Ordering::Relaxed);
        let k = i + j * stride;
        store(&c, k, load(&a, k) + load(&b, k));
    };
    let segments = [RangeSegment::new(0, stride), RangeSegment::new(0, stride)];
    with_policy!(policy, Pol => {
        KernelPolicy::<MatrixAddTree<Pol>>::run(segments, (body,))
    });

    DemoReport {
        demo: Demo::MatrixAdd,
        policy,
        size: n,
        invocations: calls.into_inner(),
        expected_invocations: n * n,
        mismatches: mismatches(&c, |_| 2.0),
    }
}

fn row_sums(policy: PolicyKind, n: usize) -> DemoReport {
    let grid: Vec<AtomicU64> = (0..n * n)
        .map(|k| AtomicU64::new((((k % n) + (k / n)) as f64).to_bits()))
        .collect();
    let sums = filled(n, 0.0);
    let calls = AtomicUsize::new(0);
    let stride = n as Index;

    let accumulate = |i: Index, j: Index, acc: &mut (f64, ())| {
        calls.fetch_add(1, Ordering::Relaxed);
        acc.0 += load(&grid, i + j * stride);
    };
    let finish = |_i: Index, j: Index, acc: &mut (f64, ())| {
        store(&sums, j, acc.0);
    };
    let segments = [RangeSegment::new(0, stride), RangeSegment::new(0, stride)];
    with_policy!(policy, Pol => {
        KernelPolicy::<RowSumsTree<Pol>>::run_param(
            segments,
            params![SharedMem::<f64>::new()],
            (accumulate, finish),
        )
    });

    // Row j holds i + j for i in [0, n).
    let triangle = (n * n.saturating_sub(1) / 2) as f64;
    DemoReport {
        demo: Demo::RowSums,
        policy,
        size: n,
        invocations: calls.into_inner(),
        expected_invocations: n * n,
        mismatches: mismatches(&sums, |j| triangle + (n * j) as f64),
    }
}
