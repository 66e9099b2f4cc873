//! Criterion benchmarks for implicit and explicitly padded convolutions.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use dealias_core::{
    multbinary, realmultbinary, Complex64, ExplicitConvolution, ExplicitHConvolution,
    ImplicitConvolution, ImplicitHConvolution, ImplicitHTConvolution, Nyquist, Options,
};

fn sample(m: usize, seed: f64) -> Vec<Complex64> {
    let mut f: Vec<Complex64> = (0..=m)
        .map(|k| Complex64::new((seed + k as f64).sin(), (seed * k as f64).cos()))
        .collect();
    f[0].im = 0.0;
    f[m].im = 0.0;
    f
}

fn bench_complex(c: &mut Criterion) {
    let sizes: Vec<usize> = vec![64, 256, 1024, 4096];
    let options = Options::default();

    let mut group = c.benchmark_group("ImplicitConvolution");
    for &m in &sizes {
        let mut engine = ImplicitConvolution::new(m, &options).unwrap();
        let inputs = [sample(m, 0.5), sample(m, 1.5)];
        let mut data = inputs.clone();
        group.bench_with_input(BenchmarkId::from_parameter(m), &m, |b, _| {
            b.iter(|| {
                data.clone_from(&inputs);
                let mut views: Vec<&mut [Complex64]> =
                    data.iter_mut().map(Vec::as_mut_slice).collect();
                engine.convolve(&mut views, &multbinary, 0);
            });
        });
    }
    group.finish();

    let mut group = c.benchmark_group("ExplicitConvolution");
    for &m in &sizes {
        let mut engine = ExplicitConvolution::new(m, &options).unwrap();
        let inputs = [sample(m, 0.5), sample(m, 1.5)];
        let mut data = inputs.clone();
        group.bench_with_input(BenchmarkId::from_parameter(m), &m, |b, _| {
            b.iter(|| {
                data.clone_from(&inputs);
                let mut views: Vec<&mut [Complex64]> =
                    data.iter_mut().map(Vec::as_mut_slice).collect();
                engine.convolve(&mut views, &multbinary, 0);
            });
        });
    }
    group.finish();
}

fn bench_hermitian(c: &mut Criterion) {
    let sizes: Vec<usize> = vec![64, 256, 1024, 4096];
    let options = Options::default().nyquist(Nyquist::Compact);

    let mut group = c.benchmark_group("ImplicitHConvolution");
    for &m in &sizes {
        let mut engine = ImplicitHConvolution::new(m, &options).unwrap();
        let inputs = [sample(m, 0.5), sample(m, 1.5)];
        let mut data = inputs.clone();
        group.bench_with_input(BenchmarkId::from_parameter(m), &m, |b, _| {
            b.iter(|| {
                data.clone_from(&inputs);
                let mut views: Vec<&mut [Complex64]> =
                    data.iter_mut().map(Vec::as_mut_slice).collect();
                engine.convolve(&mut views, &realmultbinary, 0);
            });
        });
    }
    group.finish();

    let mut group = c.benchmark_group("ExplicitHConvolution");
    for &m in &sizes {
        let mut engine = ExplicitHConvolution::new(m, &options).unwrap();
        let inputs = [sample(m, 0.5), sample(m, 1.5)];
        let mut data = inputs.clone();
        group.bench_with_input(BenchmarkId::from_parameter(m), &m, |b, _| {
            b.iter(|| {
                data.clone_from(&inputs);
                let mut views: Vec<&mut [Complex64]> =
                    data.iter_mut().map(Vec::as_mut_slice).collect();
                engine.convolve(&mut views, &realmultbinary, 0);
            });
        });
    }
    group.finish();

    let mut group = c.benchmark_group("ImplicitHTConvolution");
    for &m in &sizes {
        let mut engine = ImplicitHTConvolution::new(m, &options).unwrap();
        let (f, g, h) = (sample(m, 0.5), sample(m, 1.5), sample(m, 2.5));
        let mut out = f.clone();
        group.bench_with_input(BenchmarkId::from_parameter(m), &m, |b, _| {
            b.iter(|| {
                out.copy_from_slice(&f);
                engine.convolve(&mut [out.as_mut_slice()], &[g.as_slice()], &[h.as_slice()], 0);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_complex, bench_hermitian);
criterion_main!(benches);
