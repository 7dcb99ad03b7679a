//! Criterion benches for the three kernels plus the pooled variant.
//!
//! ```bash
//! cargo bench --bench matmul_bench -- gemm/256
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use densemat::{
    DEFAULT_NUM_THREADS, Matrix, WorkerPool, multiply_parallel, multiply_pooled,
    multiply_sequential_v1, multiply_sequential_v2,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Matrix<f64> {
    let data = (0..rows * cols).map(|_| rng.gen_range(-1.0..1.0)).collect();
    Matrix::from_vec(rows, cols, data).unwrap()
}

fn bench_gemm(c: &mut Criterion) {
    let mut group = c.benchmark_group("gemm");
    group.sample_size(20);

    let mut rng = StdRng::seed_from_u64(7);
    let pool = WorkerPool::new(DEFAULT_NUM_THREADS).unwrap();

    for size in [64, 128, 256] {
        let a = random_matrix(&mut rng, size, size);
        let b = random_matrix(&mut rng, size, size);
        group.throughput(Throughput::Elements(2 * (size * size * size) as u64));

        group.bench_function(BenchmarkId::new("ijk", size), |bencher| {
            bencher.iter(|| multiply_sequential_v1(black_box(&a), black_box(&b)))
        });
        group.bench_function(BenchmarkId::new("ikj", size), |bencher| {
            bencher.iter(|| multiply_sequential_v2(black_box(&a), black_box(&b)))
        });
        group.bench_function(BenchmarkId::new("ikj_mt", size), |bencher| {
            bencher.iter(|| multiply_parallel(black_box(&a), black_box(&b), DEFAULT_NUM_THREADS))
        });
        group.bench_function(BenchmarkId::new("ikj_pooled", size), |bencher| {
            bencher.iter(|| multiply_pooled(black_box(&a), black_box(&b), &pool))
        });
    }

    group.finish();
}

/// Thread count sweep on an uneven row count.
fn bench_thread_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("ikj_mt_threads");
    group.sample_size(20);

    let mut rng = StdRng::seed_from_u64(11);
    let a = random_matrix(&mut rng, 250, 200);
    let b = random_matrix(&mut rng, 200, 180);

    for threads in [1, 2, 4, 8] {
        group.bench_function(BenchmarkId::from_parameter(threads), |bencher| {
            bencher.iter(|| multiply_parallel(black_box(&a), black_box(&b), threads))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_gemm, bench_thread_scaling);
criterion_main!(benches);
