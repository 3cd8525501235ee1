use approx::assert_abs_diff_eq;
use core::f64::consts::PI;
use polar_fft::kernel::KernelLifecycle;
use polar_fft::spectral::{EngineKind, SpectralTransform, SpectralTransformConfig};
use polar_fft::traits::{PackedFft1D, PolarFft1D};
use proptest::prelude::*;

const SIZES: [usize; 7] = [2, 4, 8, 16, 64, 256, 1024];

fn engine_kind() -> impl Strategy<Value = EngineKind> {
    prop_oneof![Just(EngineKind::ComplexPair), Just(EngineKind::PackedReal)]
}

fn frame() -> impl Strategy<Value = Vec<f64>> {
    prop::sample::select(SIZES.to_vec())
        .prop_flat_map(|n| prop::collection::vec(-100.0f64..100.0, n))
}

fn planned(n: usize, engine: EngineKind) -> SpectralTransform<f64> {
    SpectralTransform::try_new(SpectralTransformConfig::new(n).with_engine(engine))
        .expect("supported window size")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn inverse_of_forward_is_identity(frame in frame(), engine in engine_kind()) {
        let mut fft = planned(frame.len(), engine);
        let spectrum = fft.forward_alloc(&frame).expect("forward");
        let rebuilt = fft.inverse_alloc(&spectrum).expect("inverse");
        let scale = frame.iter().fold(1.0f64, |acc, x| acc.max(x.abs()));
        for (a, b) in rebuilt.iter().zip(&frame) {
            prop_assert!((a - b).abs() <= 1e-9 * scale, "{a} != {b}");
        }
    }

    #[test]
    fn magnitudes_are_non_negative_and_boundaries_are_real(
        frame in frame(),
        engine in engine_kind(),
    ) {
        let n = frame.len();
        let mut fft = planned(n, engine);
        let packed = fft.forward_complex_alloc(&frame).expect("packed");
        let spectrum = fft.forward_alloc(&frame).expect("polar");

        prop_assert_eq!(spectrum.len(), n / 2 + 1);
        prop_assert!(spectrum.norm().iter().all(|m| *m >= 0.0));

        let phas = spectrum.phas();
        prop_assert!(phas[0] == 0.0 || phas[0] == PI);
        prop_assert!(phas[n / 2] == 0.0 || phas[n / 2] == PI);
        prop_assert_eq!(phas[0] == PI, packed[0] < 0.0);
        prop_assert_eq!(phas[n / 2] == PI, packed[n / 2] < 0.0);
    }

    #[test]
    fn polar_bins_reproduce_packed_parts(frame in frame(), engine in engine_kind()) {
        let n = frame.len();
        let mut fft = planned(n, engine);
        let packed = fft.forward_complex_alloc(&frame).expect("packed");
        let spectrum = fft.forward_alloc(&frame).expect("polar");
        let (norm, phas) = (spectrum.norm(), spectrum.phas());
        let tol = 1e-9 * norm.iter().fold(1.0f64, |acc, m| acc.max(*m));

        for k in 0..=n / 2 {
            prop_assert!((norm[k] * phas[k].cos() - packed[k]).abs() <= tol);
        }
        for k in 1..n / 2 {
            prop_assert!((norm[k] * phas[k].sin() - packed[n - k]).abs() <= tol);
        }
    }

    #[test]
    fn engines_produce_the_same_packed_spectrum(frame in frame()) {
        let n = frame.len();
        let a = planned(n, EngineKind::ComplexPair)
            .forward_complex_alloc(&frame)
            .expect("complex pair");
        let b = planned(n, EngineKind::PackedReal)
            .forward_complex_alloc(&frame)
            .expect("packed real");
        let tol = 1e-9 * a.iter().fold(1.0f64, |acc, x| acc.max(x.abs()));
        for (x, y) in a.iter().zip(&b) {
            prop_assert!((x - y).abs() <= tol, "{x} != {y}");
        }
    }
}

#[test]
fn impulse_at_nyquist_alternates_sign() {
    for engine in [EngineKind::ComplexPair, EngineKind::PackedReal] {
        let mut fft = planned(8, engine);
        let mut frame = [0.0; 8];
        frame[4] = 1.0;
        let spectrum = fft.forward_alloc(&frame).expect("forward");
        for k in 0..5 {
            assert_abs_diff_eq!(spectrum.norm()[k], 1.0, epsilon = 1e-12);
        }
        // X[k] = (-1)^k
        assert_eq!(spectrum.phas()[0], 0.0);
        assert_abs_diff_eq!(spectrum.phas()[1].abs(), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(spectrum.phas()[2], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(spectrum.phas()[3].abs(), PI, epsilon = 1e-12);
        assert_eq!(spectrum.phas()[4], 0.0);
    }
}

#[test]
fn transforms_are_reusable_across_many_calls() {
    let mut fft = planned(64, EngineKind::ComplexPair);
    for step in 0..100 {
        let frame: Vec<f64> = (0..64)
            .map(|i| ((i + step) as f64 * 0.37).sin())
            .collect();
        let spectrum = fft.forward_alloc(&frame).expect("forward");
        let rebuilt = fft.inverse_alloc(&spectrum).expect("inverse");
        for (a, b) in rebuilt.iter().zip(&frame) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
        }
    }
}
