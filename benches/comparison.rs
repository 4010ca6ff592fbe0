use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use decompose::{DecompConfig, DenseMatrix};

const SIZES: [usize; 3] = [4, 16, 64];

// ---------------------------------------------------------------------------
// Helpers: the same deterministic entries for every library
// ---------------------------------------------------------------------------

fn entry(i: usize, j: usize) -> f64 {
    ((i * 7 + j * 13) % 17) as f64 - 8.0 + if i == j { 3.0 } else { 0.0 }
}

fn sym_entry(i: usize, j: usize) -> f64 {
    entry(i, j) + entry(j, i)
}

fn dense(n: usize, f: fn(usize, usize) -> f64) -> DenseMatrix<f64> {
    DenseMatrix::from_fn(n, n, f)
}

fn nalgebra_mat(n: usize, f: fn(usize, usize) -> f64) -> nalgebra::DMatrix<f64> {
    nalgebra::DMatrix::from_fn(n, n, f)
}

fn faer_mat(n: usize, f: fn(usize, usize) -> f64) -> faer::Mat<f64> {
    faer::Mat::from_fn(n, n, f)
}

// ---------------------------------------------------------------------------
// SVD
// ---------------------------------------------------------------------------

fn svd(c: &mut Criterion) {
    let mut g = c.benchmark_group("svd");
    let cfg = DecompConfig::default();

    for n in SIZES {
        g.bench_with_input(BenchmarkId::new("decompose", n), &n, |b, &n| {
            let a = dense(n, entry);
            b.iter(|| decompose::svd_with(std::hint::black_box(&a), &cfg))
        });

        g.bench_with_input(BenchmarkId::new("nalgebra", n), &n, |b, &n| {
            let a = nalgebra_mat(n, entry);
            b.iter(|| std::hint::black_box(&a).clone().svd(true, true))
        });

        g.bench_with_input(BenchmarkId::new("faer", n), &n, |b, &n| {
            let a = faer_mat(n, entry);
            b.iter(|| std::hint::black_box(&a).thin_svd())
        });
    }

    g.finish();
}

fn singular_values(c: &mut Criterion) {
    let mut g = c.benchmark_group("singular_values");

    for n in SIZES {
        g.bench_with_input(BenchmarkId::new("decompose", n), &n, |b, &n| {
            let a = dense(n, entry);
            b.iter(|| decompose::singular_values(std::hint::black_box(&a)))
        });

        g.bench_with_input(BenchmarkId::new("nalgebra", n), &n, |b, &n| {
            let a = nalgebra_mat(n, entry);
            b.iter(|| std::hint::black_box(&a).singular_values())
        });
    }

    g.finish();
}

// ---------------------------------------------------------------------------
// Symmetric eigendecomposition
// ---------------------------------------------------------------------------

fn eigen_symmetric(c: &mut Criterion) {
    let mut g = c.benchmark_group("eigen_symmetric");
    let cfg = DecompConfig::default();

    for n in SIZES {
        g.bench_with_input(BenchmarkId::new("decompose", n), &n, |b, &n| {
            let a = dense(n, sym_entry);
            b.iter(|| decompose::eig_symmetric_with(std::hint::black_box(&a), &cfg))
        });

        g.bench_with_input(BenchmarkId::new("nalgebra", n), &n, |b, &n| {
            let a = nalgebra_mat(n, sym_entry);
            b.iter(|| std::hint::black_box(&a).clone().symmetric_eigen())
        });

        g.bench_with_input(BenchmarkId::new("faer", n), &n, |b, &n| {
            let a = faer_mat(n, sym_entry);
            b.iter(|| std::hint::black_box(&a).self_adjoint_eigen(faer::Side::Lower))
        });
    }

    g.finish();
}

// ---------------------------------------------------------------------------
// General eigendecomposition
// ---------------------------------------------------------------------------

fn eigen_general(c: &mut Criterion) {
    let mut g = c.benchmark_group("eigen_general");
    let cfg = DecompConfig::default();

    for n in SIZES {
        g.bench_with_input(BenchmarkId::new("decompose", n), &n, |b, &n| {
            let a = dense(n, entry);
            b.iter(|| decompose::eig_with(std::hint::black_box(&a), &cfg))
        });

        g.bench_with_input(BenchmarkId::new("decompose_values", n), &n, |b, &n| {
            let a = dense(n, entry);
            b.iter(|| decompose::eigenvalues(std::hint::black_box(&a)))
        });

        g.bench_with_input(BenchmarkId::new("nalgebra_values", n), &n, |b, &n| {
            let a = nalgebra_mat(n, entry);
            b.iter(|| std::hint::black_box(&a).complex_eigenvalues())
        });

        g.bench_with_input(BenchmarkId::new("faer", n), &n, |b, &n| {
            let a = faer_mat(n, entry);
            b.iter(|| std::hint::black_box(&a).eigen())
        });
    }

    g.finish();
}

// ---------------------------------------------------------------------------

criterion_group!(benches, svd, singular_values, eigen_symmetric, eigen_general);
criterion_main!(benches);
