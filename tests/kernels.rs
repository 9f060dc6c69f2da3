//! End-to-end kernels built from the public statement types.

use std::cell::Cell;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Barrier, Mutex};

use nestloop::{
    params, CreateShmem, For, Index, KernelPolicy, Lambda, ParExec, ParamSlot, RangeSegment,
    SeqExec, SharedMem, SimdExec,
};

#[test]
fn test_daxpy_with_one_double_tile() {
    let x = vec![2.0f64; 1024];
    let y: Vec<Cell<f64>> = (0..1024).map(|_| Cell::new(0.0)).collect();
    let c = 0.5;

    KernelPolicy::<For<0, SeqExec, CreateShmem<Lambda<0>>>>::run_param(
        [RangeSegment::new(0, 1024)],
        params![SharedMem::<f64>::new()],
        (|i: Index, tile: &mut (f64, ())| {
            tile.0 = x[i as usize] * c;
            let y = &y[i as usize];
            y.set(y.get() + tile.0);
        },),
    );
    assert!(y.iter().all(|v| v.get() == 1.0));
}

#[test]
fn test_matrix_add_threads_and_simd() {
    const N: usize = 32;
    let a = vec![1.0f64; N * N];
    let b = vec![1.0f64; N * N];
    let c: Vec<AtomicU64> = (0..N * N).map(|_| AtomicU64::new(0)).collect();
    let calls = AtomicUsize::new(0);

    KernelPolicy::<For<1, ParExec, For<0, SimdExec, Lambda<0>>>>::run(
        [RangeSegment::new(0, N as Index), RangeSegment::new(0, N as Index)],
        (|i: Index, j: Index| {
            let k = i as usize + j as usize * N;
            c[k].store((a[k] + b[k]).to_bits(), Ordering::Relaxed);
            calls.fetch_add(1, Ordering::Relaxed);
        },),
    );

    assert_eq!(calls.load(Ordering::Relaxed), N * N);
    assert!(c
        .iter()
        .all(|v| f64::from_bits(v.load(Ordering::Relaxed)) == 2.0));
}

#[test]
fn test_concurrent_instances_get_distinct_tiles() {
    let barrier = Barrier::new(2);
    let seen = Mutex::new(Vec::new());

    std::thread::scope(|scope| {
        for outer in 0..2 {
            let barrier = &barrier;
            let seen = &seen;
            scope.spawn(move || {
                KernelPolicy::<CreateShmem<Lambda<0>>>::run_param(
                    [RangeSegment::new(outer, outer + 1)],
                    params![SharedMem::<f64>::new()],
                    (|i: Index, tiles: &mut (f64, ())| {
                        tiles.0 = i as f64;
                        seen.lock().unwrap().push(&tiles.0 as *const f64 as usize);
                        // Both tiles are alive while either thread waits here.
                        barrier.wait();
                        assert_eq!(tiles.0, i as f64);
                    },),
                );
            });
        }
    });

    let seen = seen.into_inner().unwrap();
    assert_eq!(seen.len(), 2);
    assert_ne!(seen[0], seen[1]);
}

#[test]
fn test_parallel_loop_replicates_tiles_per_iteration() {
    let config = nestloop::config::ExecConfig {
        threads: Some(2),
        ..Default::default()
    };
    let pool = config.thread_pool().unwrap();
    let barrier = Barrier::new(2);
    let seen = Mutex::new(Vec::new());

    pool.install(|| {
        KernelPolicy::<For<0, ParExec, CreateShmem<Lambda<0>>>>::run_param(
            [RangeSegment::new(0, 2)],
            params![SharedMem::<f64>::new()],
            (|i: Index, tiles: &mut (f64, ())| {
                tiles.0 = i as f64;
                seen.lock().unwrap().push((i, &tiles.0 as *const f64 as usize));
                // Both iterations hold their tiles while either waits here.
                barrier.wait();
                assert_eq!(tiles.0, i as f64);
            },),
        );
    });

    let mut seen = seen.into_inner().unwrap();
    seen.sort();
    assert_eq!(seen.len(), 2);
    assert_eq!((seen[0].0, seen[1].0), (0, 1));
    assert_ne!(seen[0].1, seen[1].1);
}

#[test]
fn test_empty_parameter_tuple_installs_nothing() {
    let calls = Cell::new(0);
    KernelPolicy::<For<0, SeqExec, CreateShmem<Lambda<0>>>>::run_param(
        [RangeSegment::new(0, 3)],
        params![],
        (|_i: Index, _tiles: &mut ()| calls.set(calls.get() + 1),),
    );
    assert_eq!(calls.get(), 3);
}

struct Counted<'a>(&'a Cell<usize>);

impl ParamSlot for Counted<'_> {
    type Tile = [u8; 16];

    fn make_tile(&self) -> [u8; 16] {
        self.0.set(self.0.get() + 1);
        [0; 16]
    }
}

#[test]
fn test_install_count_matches_tuple_length() {
    let made = Cell::new(0);
    KernelPolicy::<CreateShmem<Lambda<0>>>::run_param(
        [RangeSegment::new(0, 1)],
        params![Counted(&made), Counted(&made)],
        (|_i: Index, tiles: &mut ([u8; 16], ([u8; 16], ()))| {
            assert_eq!(tiles.0.len() + (tiles.1).0.len(), 32);
        },),
    );
    assert_eq!(made.get(), 2);
}

#[test]
fn test_demos_verify_under_configured_pool() {
    let config = nestloop::config::ExecConfig {
        threads: Some(3),
        ..Default::default()
    };
    let pool = config.thread_pool().unwrap();
    for demo in nestloop::Demo::ALL {
        let report = pool
            .install(|| demo.run(nestloop::PolicyKind::Par, 64))
            .unwrap();
        assert!(report.passed(), "{:?}", report);
        assert_eq!(report.invocations, report.expected_invocations);
    }
}
