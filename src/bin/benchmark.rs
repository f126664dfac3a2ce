//! Generation throughput of the serial and parallel classifiers

use std::time::Instant;
use life_editor::domain::{Algorithm, Grid, step_generation};

fn benchmark(algorithm: Algorithm, width: usize, height: usize, iterations: u32) -> f64 {
    let mut grid = Grid::new(width, height);
    grid.randomize(0.3);

    let start = Instant::now();
    for _ in 0..iterations {
        step_generation(&mut grid, algorithm);
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn main() {
    println!("=== Game of Life Engine Benchmark ===\n");

    // The default 256x144 grid first, then larger squares
    let sizes = [(256, 144), (500, 500), (1000, 1000), (2000, 2000)];
    let iterations = 20;

    println!("{:>12} {:>12} {:>12} {:>10}", "Size", "Serial", "Parallel", "Speedup");
    println!("{:-<50}", "");

    for (width, height) in sizes {
        let serial_ms = benchmark(Algorithm::Serial, width, height, iterations);
        let parallel_ms = benchmark(Algorithm::Parallel, width, height, iterations);

        println!(
            "{:>12} {:>12.2} {:>12.2} {:>9.1}x",
            format!("{}x{}", width, height),
            serial_ms,
            parallel_ms,
            serial_ms / parallel_ms
        );
    }

    let (width, height) = (2000, 2000);
    let cells = (width * height) as f64;
    println!("\n=== Throughput at {}x{} ===\n", width, height);
    for algorithm in Algorithm::all() {
        let ms = benchmark(algorithm, width, height, iterations);
        println!(
            "{:<10} {:.2} ms/gen, {:.1}M cells/sec",
            algorithm.name(),
            ms,
            cells / (ms / 1000.0) / 1_000_000.0
        );
    }
}
