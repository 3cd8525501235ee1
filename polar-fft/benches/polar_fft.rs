use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use polar_fft::kernel::KernelLifecycle;
use polar_fft::spectral::{EngineKind, PolarSpectrum, SpectralTransform, SpectralTransformConfig};
use polar_fft::traits::PolarFft1D;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const WINDOW_SIZES: [usize; 4] = [256, 1024, 2048, 8192];

/// Noise frame of `n` samples in `[-1, 1)`.
fn noise_frame(rng: &mut StdRng, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.random_range(-1.0..1.0)).collect()
}

fn polar_fft_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1234);

    for engine in [EngineKind::ComplexPair, EngineKind::PackedReal] {
        let mut group = c.benchmark_group(format!("polar_fft/{engine:?}"));
        for n in WINDOW_SIZES {
            let config = SpectralTransformConfig::new(n).with_engine(engine);
            let mut fft = SpectralTransform::<f64>::try_new(config).expect("plan");
            let frame = noise_frame(&mut rng, n);
            let mut spectrum = PolarSpectrum::zeros(n);
            let mut rebuilt = vec![0.0; n];

            group.bench_with_input(BenchmarkId::new("forward", n), &frame, |b, frame| {
                b.iter(|| {
                    fft.forward_into(black_box(frame), &mut spectrum)
                        .expect("forward")
                })
            });
            group.bench_with_input(BenchmarkId::new("inverse", n), &n, |b, _| {
                b.iter(|| {
                    fft.inverse_into(black_box(&spectrum), &mut rebuilt)
                        .expect("inverse")
                })
            });
        }
        group.finish();
    }
}

fn planning_benchmark(c: &mut Criterion) {
    c.bench_function("polar_fft/plan_1024", |b| {
        b.iter(|| SpectralTransform::<f64>::new(black_box(1024)).expect("plan"))
    });
}

criterion_group!(benches, polar_fft_benchmark, planning_benchmark);
criterion_main!(benches);
