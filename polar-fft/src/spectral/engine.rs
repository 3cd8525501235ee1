//! Transform engine binding.
//!
//! Two native layouts are supported: [`EngineKind::ComplexPair`] runs
//! `realfft` plans that emit `n/2 + 1` complex bins, [`EngineKind::PackedReal`]
//! runs full-length `rustfft` plans and stores the result in the raw
//! half-complex real layout, which already matches the packed spectrum.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::kernel::{try_filled, ConfigError, ExecInvariantViolation};
use num_traits::{Float, Zero};
use realfft::{ComplexToReal, RealFftPlanner, RealToComplex};
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftNum, FftPlanner};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Serializes every plan construction and release in the process.
static PLANNER_LOCK: Mutex<()> = Mutex::new(());

fn planner_lock() -> MutexGuard<'static, ()> {
    PLANNER_LOCK.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
        tracing::warn!("recovering poisoned fft planner lock");
        poisoned.into_inner()
    })
}

/// Native output layout of the transform engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EngineKind {
    /// Real-to-complex plans with `n/2 + 1` complex output bins.
    #[default]
    ComplexPair,
    /// Complex plans written out as `n` half-complex reals.
    PackedReal,
}

/// Planned engine state: plans plus the native scratch they run over.
pub(crate) enum NativeEngine<F: FftNum> {
    ComplexPair {
        forward: Arc<dyn RealToComplex<F>>,
        inverse: Arc<dyn ComplexToReal<F>>,
        specdata: Vec<Complex<F>>,
        scratch: Vec<Complex<F>>,
    },
    PackedReal {
        forward: Arc<dyn Fft<F>>,
        inverse: Arc<dyn Fft<F>>,
        specdata: Vec<F>,
        work: Vec<Complex<F>>,
        scratch: Vec<Complex<F>>,
    },
}

impl<F> NativeEngine<F>
where
    F: FftNum + Float,
{
    /// Plan a forward/inverse pair for `window_size` and allocate scratch.
    pub(crate) fn plan(kind: EngineKind, window_size: usize) -> Result<Self, ConfigError> {
        let engine = match kind {
            EngineKind::ComplexPair => {
                let (forward, inverse) = {
                    let _guard = planner_lock();
                    let mut planner = RealFftPlanner::<F>::new();
                    (
                        planner.plan_fft_forward(window_size),
                        planner.plan_fft_inverse(window_size),
                    )
                };
                let scratch_len = forward
                    .get_scratch_len()
                    .max(inverse.get_scratch_len());
                NativeEngine::ComplexPair {
                    specdata: try_filled("specdata", window_size / 2 + 1, Complex::zero())?,
                    scratch: try_filled("fft_scratch", scratch_len, Complex::zero())?,
                    forward,
                    inverse,
                }
            }
            EngineKind::PackedReal => {
                let (forward, inverse) = {
                    let _guard = planner_lock();
                    let mut planner = FftPlanner::<F>::new();
                    (
                        planner.plan_fft_forward(window_size),
                        planner.plan_fft_inverse(window_size),
                    )
                };
                let scratch_len = forward
                    .get_inplace_scratch_len()
                    .max(inverse.get_inplace_scratch_len());
                NativeEngine::PackedReal {
                    specdata: try_filled("specdata", window_size, F::zero())?,
                    work: try_filled("fft_work", window_size, Complex::zero())?,
                    scratch: try_filled("fft_scratch", scratch_len, Complex::zero())?,
                    forward,
                    inverse,
                }
            }
        };
        tracing::debug!(window_size, engine = ?kind, "planned spectral transform");
        Ok(engine)
    }

    /// Run the unnormalized forward transform of `input`.
    ///
    /// `input` is used as engine scratch and holds garbage afterwards.
    pub(crate) fn execute_forward(&mut self, input: &mut [F]) -> Result<(), ExecInvariantViolation> {
        match self {
            NativeEngine::ComplexPair {
                forward,
                specdata,
                scratch,
                ..
            } => forward.process_with_scratch(input, specdata, scratch)?,
            NativeEngine::PackedReal {
                forward,
                specdata,
                work,
                scratch,
                ..
            } => {
                for (w, &x) in work.iter_mut().zip(input.iter()) {
                    *w = Complex::new(x, F::zero());
                }
                forward.process_with_scratch(work, scratch);
                let n = work.len();
                for k in 0..=n / 2 {
                    specdata[k] = work[k].re;
                }
                for k in 1..n.div_ceil(2) {
                    specdata[n - k] = work[k].im;
                }
            }
        }
        Ok(())
    }

    /// Copy the native forward output into the packed layout.
    pub(crate) fn write_packed(&self, compspec: &mut [F]) {
        match self {
            NativeEngine::ComplexPair { specdata, .. } => {
                let n = compspec.len();
                let last = specdata.len() - 1;
                compspec[0] = specdata[0].re;
                for (j, bin) in specdata.iter().enumerate().take(last).skip(1) {
                    compspec[j] = bin.re;
                    compspec[n - j] = bin.im;
                }
                compspec[last] = specdata[last].re;
            }
            NativeEngine::PackedReal { specdata, .. } => compspec.copy_from_slice(specdata),
        }
    }

    /// Load a packed spectrum into the native inverse input.
    pub(crate) fn load_packed(&mut self, compspec: &[F]) {
        match self {
            NativeEngine::ComplexPair { specdata, .. } => {
                let n = compspec.len();
                let last = specdata.len() - 1;
                specdata[0] = Complex::new(compspec[0], F::zero());
                for (j, bin) in specdata.iter_mut().enumerate().take(last).skip(1) {
                    *bin = Complex::new(compspec[j], compspec[n - j]);
                }
                specdata[last] = Complex::new(compspec[last], F::zero());
            }
            NativeEngine::PackedReal { specdata, .. } => specdata.copy_from_slice(compspec),
        }
    }

    /// Run the unnormalized inverse transform into `output`.
    pub(crate) fn execute_inverse(&mut self, output: &mut [F]) -> Result<(), ExecInvariantViolation> {
        match self {
            NativeEngine::ComplexPair {
                inverse,
                specdata,
                scratch,
                ..
            } => inverse.process_with_scratch(specdata, output, scratch)?,
            NativeEngine::PackedReal {
                inverse,
                specdata,
                work,
                scratch,
                ..
            } => {
                let n = work.len();
                work[0] = Complex::new(specdata[0], F::zero());
                for k in 1..n.div_ceil(2) {
                    let bin = Complex::new(specdata[k], specdata[n - k]);
                    work[k] = bin;
                    work[n - k] = bin.conj();
                }
                if n.is_multiple_of(2) {
                    work[n / 2] = Complex::new(specdata[n / 2], F::zero());
                }
                inverse.process_with_scratch(work, scratch);
                for (y, w) in output.iter_mut().zip(work.iter()) {
                    *y = w.re;
                }
            }
        }
        Ok(())
    }
}

impl<F: FftNum> NativeEngine<F> {
    pub(crate) fn kind(&self) -> EngineKind {
        match self {
            NativeEngine::ComplexPair { .. } => EngineKind::ComplexPair,
            NativeEngine::PackedReal { .. } => EngineKind::PackedReal,
        }
    }

    /// Drop both plans under the planner lock.
    pub(crate) fn release(self) {
        let kind = self.kind();
        let _guard = planner_lock();
        drop(self);
        tracing::trace!(engine = ?kind, "released spectral transform plans");
    }
}

#[cfg(test)]
mod tests {
    use super::{EngineKind, NativeEngine};
    use approx::assert_abs_diff_eq;

    fn forward_packed(kind: EngineKind, frame: &[f64]) -> Vec<f64> {
        let mut engine = NativeEngine::<f64>::plan(kind, frame.len()).expect("plan");
        let mut input = frame.to_vec();
        engine.execute_forward(&mut input).expect("forward");
        let mut compspec = vec![0.0; frame.len()];
        engine.write_packed(&mut compspec);
        engine.release();
        compspec
    }

    #[test]
    fn default_engine_is_complex_pair() {
        assert_eq!(EngineKind::default(), EngineKind::ComplexPair);
    }

    #[test]
    fn both_engines_agree_on_packed_layout() {
        let frame = [0.5, -1.0, 2.0, 0.25, -0.75, 1.5, 0.0, 3.0];
        let a = forward_packed(EngineKind::ComplexPair, &frame);
        let b = forward_packed(EngineKind::PackedReal, &frame);
        for (x, y) in a.iter().zip(&b) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-12);
        }
    }

    #[test]
    fn packed_layout_matches_direct_dft() {
        let frame = [1.0, 2.0, 3.0, 4.0];
        // X = [10, -2+2i, -2]
        let compspec = forward_packed(EngineKind::ComplexPair, &frame);
        let expected = [10.0, -2.0, -2.0, 2.0];
        for (x, y) in compspec.iter().zip(&expected) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-12);
        }
    }

    #[test]
    fn inverse_is_unnormalized() {
        for kind in [EngineKind::ComplexPair, EngineKind::PackedReal] {
            let mut engine = NativeEngine::<f64>::plan(kind, 4).expect("plan");
            engine.load_packed(&[10.0, -2.0, -2.0, 2.0]);
            let mut out = [0.0; 4];
            engine.execute_inverse(&mut out).expect("inverse");
            for (x, y) in out.iter().zip(&[4.0, 8.0, 12.0, 16.0]) {
                assert_abs_diff_eq!(*x, *y, epsilon = 1e-12);
            }
            engine.release();
        }
    }
}
