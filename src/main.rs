//! Benchmark runner for the densemat kernels.

use clap::Parser;
use densemat::{
    DEFAULT_NUM_THREADS, Matrix, WorkerPool, multiply_parallel, multiply_pooled,
    multiply_sequential_v1, multiply_sequential_v2,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Parser)]
#[command(name = "densemat", about = "Time the sequential and threaded matrix kernels")]
struct Args {
    /// Square matrix sizes to run.
    #[arg(long, value_delimiter = ',', default_values_t = [256, 512, 1024])]
    sizes: Vec<usize>,

    /// Timed runs per kernel (after one warmup run).
    #[arg(long, default_value_t = 3)]
    iterations: usize,

    /// Worker threads for the threaded kernels.
    #[arg(long, default_value_t = DEFAULT_NUM_THREADS)]
    threads: usize,

    /// Seed for the random input matrices.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(long, default_value_t = Level::INFO)]
    log_level: Level,
}

type Kernel<'a> = Box<dyn Fn(&Matrix<f64>, &Matrix<f64>) -> Matrix<f64> + 'a>;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!(sizes = ?args.sizes, iterations = args.iterations, threads = args.threads, "starting");

    let pool = WorkerPool::new(args.threads)?;
    let threads = args.threads;
    let mut kernels: Vec<(&str, Kernel<'_>)> = Vec::new();
    kernels.push(("Naive (i-j-k)", Box::new(multiply_sequential_v1::<f64>)));
    kernels.push(("Scalar (i-k-j)", Box::new(multiply_sequential_v2::<f64>)));
    kernels.push((
        "Threaded (i-k-j)",
        Box::new(move |a: &Matrix<f64>, b: &Matrix<f64>| multiply_parallel(a, b, threads)),
    ));
    kernels.push((
        "Pooled (i-k-j)",
        Box::new(|a: &Matrix<f64>, b: &Matrix<f64>| multiply_pooled(a, b, &pool)),
    ));

    let mut rng = StdRng::seed_from_u64(args.seed);

    println!("=== Matrix Multiplication Benchmark ===\n");

    for &size in &args.sizes {
        println!("Matrix: {}×{}", size, size);
        println!("{}", "-".repeat(60));

        let a = random_matrix(&mut rng, size, size);
        let b = random_matrix(&mut rng, size, size);

        let mut baseline_time = None;
        for (i, (name, kernel)) in kernels.iter().enumerate() {
            let (time_ms, gflops, checksum) = bench_fn(&a, &b, args.iterations, kernel);
            let baseline = *baseline_time.get_or_insert(time_ms);
            println!(
                "{}. {:18} {:9.2} ms  {:6.2} GFLOPS  ({:.1}×)  sum={:.6e}",
                i + 1,
                name,
                time_ms,
                gflops,
                baseline / time_ms,
                checksum
            );
        }
        println!();
    }

    Ok(())
}

fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Matrix<f64> {
    let mut m = Matrix::new(rows, cols);
    for x in m.iter_mut() {
        *x = rng.gen_range(-10.0..10.0);
    }
    m
}

/// Returns (average ms, GFLOPS, sum of the last result's cells).
fn bench_fn<F>(a: &Matrix<f64>, b: &Matrix<f64>, iterations: usize, f: F) -> (f64, f64, f64)
where
    F: Fn(&Matrix<f64>, &Matrix<f64>) -> Matrix<f64>,
{
    // Warmup
    f(a, b);

    let iterations = iterations.max(1);
    let mut total = 0.0;
    let mut checksum = 0.0;
    for _ in 0..iterations {
        let start = Instant::now();
        let c = f(a, b);
        total += start.elapsed().as_secs_f64();
        checksum = c.iter().sum();
    }

    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    let avg = total / iterations as f64;
    let gflops = 2.0 * (m * n * k) as f64 / avg / 1e9;
    (avg * 1000.0, gflops, checksum)
}
