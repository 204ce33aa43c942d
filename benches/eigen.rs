use criterion::{criterion_group, criterion_main, Criterion};

// ---------------------------------------------------------------------------
// Helpers: general and symmetric test matrices
// ---------------------------------------------------------------------------

fn general_entry(i: usize, j: usize) -> f64 {
    ((i * 7 + j * 3) % 11) as f64 - 5.0 + if i == j { 2.0 } else { 0.0 }
}

fn spd_entry(n: usize) -> impl Fn(usize, usize) -> f64 {
    move |i, j| {
        // AᵗA + nI for A = general_entry
        let mut s = 0.0;
        for k in 0..n {
            s += general_entry(k, i) * general_entry(k, j);
        }
        s + if i == j { n as f64 } else { 0.0 }
    }
}

fn eigenkit_general(n: usize) -> eigenkit::DynMatrix<f64> {
    eigenkit::DynMatrix::from_fn(n, n, general_entry)
}

fn nalgebra_general(n: usize) -> nalgebra::DMatrix<f64> {
    nalgebra::DMatrix::from_fn(n, n, general_entry)
}

fn eigenkit_spd(n: usize) -> eigenkit::DynMatrix<f64> {
    eigenkit::DynMatrix::from_fn(n, n, spd_entry(n))
}

fn nalgebra_spd(n: usize) -> nalgebra::DMatrix<f64> {
    nalgebra::DMatrix::from_fn(n, n, spd_entry(n))
}

// ---------------------------------------------------------------------------
// Hessenberg reduction
// ---------------------------------------------------------------------------

fn hessenberg_dyn_50(c: &mut Criterion) {
    let mut g = c.benchmark_group("hessenberg_dyn_50");

    g.bench_function("eigenkit", |b| {
        let a = eigenkit_general(50);
        let mut q = eigenkit::DynMatrix::zeros(50, 50, 0.0);
        b.iter(|| {
            let mut h = std::hint::black_box(&a).clone();
            eigenkit::linalg::hessenberg(&mut h, Some(&mut q));
            h
        })
    });

    g.bench_function("nalgebra", |b| {
        let a = nalgebra_general(50);
        b.iter(|| std::hint::black_box(&a).clone().hessenberg().unpack())
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Real Schur decomposition
// ---------------------------------------------------------------------------

fn schur_group(c: &mut Criterion, n: usize) {
    let mut g = c.benchmark_group(format!("schur_dyn_{}", n));

    g.bench_function("eigenkit", |b| {
        let a = eigenkit_general(n);
        b.iter(|| eigenkit::linalg::RealSchurDecomposition::new(std::hint::black_box(&a), 30 * n))
    });

    g.bench_function("nalgebra", |b| {
        let a = nalgebra_general(n);
        b.iter(|| std::hint::black_box(&a).clone().schur())
    });

    g.finish();
}

fn schur_dyn_6(c: &mut Criterion) {
    schur_group(c, 6);
}

fn schur_dyn_50(c: &mut Criterion) {
    schur_group(c, 50);
}

fn eigenvalues_only_dyn_50(c: &mut Criterion) {
    let mut g = c.benchmark_group("eigenvalues_only_dyn_50");

    g.bench_function("eigenkit", |b| {
        let a = eigenkit_general(50);
        b.iter(|| std::hint::black_box(&a).eigenvalues_real())
    });

    g.bench_function("nalgebra", |b| {
        let a = nalgebra_general(50);
        b.iter(|| std::hint::black_box(&a).complex_eigenvalues())
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Symmetric eigendecomposition
// ---------------------------------------------------------------------------

fn symmetric_group(c: &mut Criterion, n: usize) {
    let mut g = c.benchmark_group(format!("eigen_symmetric_dyn_{}", n));

    g.bench_function("eigenkit", |b| {
        let a = eigenkit_spd(n);
        b.iter(|| std::hint::black_box(&a).eig_symmetric())
    });

    g.bench_function("nalgebra", |b| {
        let a = nalgebra_spd(n);
        b.iter(|| std::hint::black_box(&a).clone().symmetric_eigen())
    });

    g.finish();
}

fn eigen_symmetric_dyn_6(c: &mut Criterion) {
    symmetric_group(c, 6);
}

fn eigen_symmetric_dyn_50(c: &mut Criterion) {
    symmetric_group(c, 50);
}

// ---------------------------------------------------------------------------

criterion_group!(
    benches,
    hessenberg_dyn_50,
    schur_dyn_6,
    schur_dyn_50,
    eigenvalues_only_dyn_50,
    eigen_symmetric_dyn_6,
    eigen_symmetric_dyn_50,
);
criterion_main!(benches);
