use core::fmt;

use crate::kernel::{
    expect_len, try_filled, ConfigError, ExecInvariantViolation, KernelLifecycle, ReadFrame,
    ReadPolar, WriteFrame, WritePolar,
};
use crate::traits::{PackedFft1D, PolarFft1D};
use num_traits::{Float, FloatConst};
use rustfft::FftNum;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::engine::{EngineKind, NativeEngine};
use super::polar::{packed_to_polar, polar_to_packed, PolarSpectrum};

/// Constructor config for [`SpectralTransform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpectralTransformConfig {
    /// Number of real samples per frame.
    pub window_size: usize,
    /// Native layout of the transform engine.
    #[cfg_attr(feature = "serde", serde(default))]
    pub engine: EngineKind,
}

impl SpectralTransformConfig {
    /// Config for `window_size` using the default engine.
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size,
            engine: EngineKind::default(),
        }
    }

    /// Select the engine layout.
    #[must_use]
    pub fn with_engine(mut self, engine: EngineKind) -> Self {
        self.engine = engine;
        self
    }
}

/// Real FFT of a fixed window size producing polar spectra.
///
/// Owns the plan pair and all scratch; every call overwrites that scratch, so
/// calls on one instance take `&mut self`. Use one instance per thread.
///
/// ```
/// use polar_fft::kernel::KernelLifecycle;
/// use polar_fft::spectral::{SpectralTransform, SpectralTransformConfig};
/// use polar_fft::traits::PolarFft1D;
///
/// let mut fft = SpectralTransform::<f64>::try_new(SpectralTransformConfig::new(8)).unwrap();
/// let frame = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
/// let spectrum = fft.forward_alloc(&frame).unwrap();
/// assert!(spectrum.norm().iter().all(|m| (m - 1.0).abs() < 1e-12));
///
/// let rebuilt = fft.inverse_alloc(&spectrum).unwrap();
/// assert!((rebuilt[0] - 1.0).abs() < 1e-12);
/// ```
pub struct SpectralTransform<F: FftNum> {
    window_size: usize,
    kind: EngineKind,
    renorm: F,
    input: Vec<F>,
    output: Vec<F>,
    compspec: Vec<F>,
    engine: Option<NativeEngine<F>>,
}

const RELEASED: ExecInvariantViolation = ExecInvariantViolation::InvalidState {
    reason: "transform plans were released",
};

impl<F> SpectralTransform<F>
where
    F: FftNum + Float + FloatConst,
{
    /// Plan a transform for `window_size` with the default engine.
    pub fn new(window_size: usize) -> Result<Self, ConfigError> {
        Self::try_new(SpectralTransformConfig::new(window_size))
    }

    /// Frame length this transform was planned for.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Number of spectrum bins, `window_size / 2 + 1`.
    pub fn spectrum_len(&self) -> usize {
        self.window_size / 2 + 1
    }

    /// Engine layout in use.
    pub fn engine(&self) -> EngineKind {
        self.kind
    }

    /// `frame` → `self.compspec`.
    fn analyze(&mut self, frame: &[F]) -> Result<(), ExecInvariantViolation> {
        let engine = self.engine.as_mut().ok_or(RELEASED)?;
        self.input.copy_from_slice(frame);
        engine.execute_forward(&mut self.input)?;
        engine.write_packed(&mut self.compspec);
        Ok(())
    }

    /// `compspec` → `frame`, scaled by `1 / window_size`.
    fn synthesize(
        engine: &mut NativeEngine<F>,
        compspec: &[F],
        output: &mut [F],
        renorm: F,
        frame: &mut [F],
    ) -> Result<(), ExecInvariantViolation> {
        engine.load_packed(compspec);
        engine.execute_inverse(output)?;
        for (y, &x) in frame.iter_mut().zip(output.iter()) {
            *y = x * renorm;
        }
        Ok(())
    }

    fn expect_spectrum(&self, norm: usize, phas: usize) -> Result<(), ExecInvariantViolation> {
        expect_len("norm", self.spectrum_len(), norm)?;
        expect_len("phas", self.spectrum_len(), phas)
    }
}

impl<F> KernelLifecycle for SpectralTransform<F>
where
    F: FftNum + Float + FloatConst,
{
    type Config = SpectralTransformConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        let window_size = config.window_size;
        if window_size == 0 {
            return Err(ConfigError::UnsupportedSize {
                window_size,
                reason: "window size must be > 0",
            });
        }
        if window_size > 1 && !window_size.is_multiple_of(2) {
            return Err(ConfigError::UnsupportedSize {
                window_size,
                reason: "odd window sizes other than 1 have no Nyquist bin",
            });
        }
        let renorm = F::from_usize(window_size)
            .map(|n| F::one() / n)
            .ok_or(ConfigError::UnsupportedSize {
                window_size,
                reason: "window size is not representable in the sample type",
            })?;

        let input = try_filled("in", window_size, F::zero())?;
        let output = try_filled("out", window_size, F::zero())?;
        let compspec = try_filled("compspec", window_size, F::zero())?;
        let engine = NativeEngine::plan(config.engine, window_size)?;

        Ok(Self {
            window_size,
            kind: config.engine,
            renorm,
            input,
            output,
            compspec,
            engine: Some(engine),
        })
    }
}

impl<F> PolarFft1D<F> for SpectralTransform<F>
where
    F: FftNum + Float + FloatConst,
{
    fn forward_into<I, S>(&mut self, frame: &I, spectrum: &mut S) -> Result<(), ExecInvariantViolation>
    where
        I: ReadFrame<F> + ?Sized,
        S: WritePolar<F> + ?Sized,
    {
        let frame = frame.frame().map_err(ExecInvariantViolation::from)?;
        expect_len("frame", self.window_size, frame.len())?;
        let (norm, phas) = spectrum
            .polar_mut()
            .map_err(ExecInvariantViolation::from)?;
        self.expect_spectrum(norm.len(), phas.len())?;

        self.analyze(frame)?;
        packed_to_polar(&self.compspec, norm, phas)
    }

    fn forward_alloc<I>(&mut self, frame: &I) -> Result<PolarSpectrum<F>, ExecInvariantViolation>
    where
        I: ReadFrame<F> + ?Sized,
    {
        let mut spectrum = PolarSpectrum::zeros(self.window_size);
        self.forward_into(frame, &mut spectrum)?;
        Ok(spectrum)
    }

    fn inverse_into<S, O>(&mut self, spectrum: &S, frame: &mut O) -> Result<(), ExecInvariantViolation>
    where
        S: ReadPolar<F> + ?Sized,
        O: WriteFrame<F> + ?Sized,
    {
        let (norm, phas) = spectrum.polar().map_err(ExecInvariantViolation::from)?;
        self.expect_spectrum(norm.len(), phas.len())?;
        let frame = frame.frame_mut().map_err(ExecInvariantViolation::from)?;
        expect_len("frame", self.window_size, frame.len())?;

        polar_to_packed(norm, phas, &mut self.compspec)?;
        let engine = self.engine.as_mut().ok_or(RELEASED)?;
        Self::synthesize(engine, &self.compspec, &mut self.output, self.renorm, frame)
    }

    fn inverse_alloc<S>(&mut self, spectrum: &S) -> Result<Vec<F>, ExecInvariantViolation>
    where
        S: ReadPolar<F> + ?Sized,
    {
        let mut frame = vec![F::zero(); self.window_size];
        self.inverse_into(spectrum, &mut frame)?;
        Ok(frame)
    }
}

impl<F> PackedFft1D<F> for SpectralTransform<F>
where
    F: FftNum + Float + FloatConst,
{
    fn forward_complex_into<I, O>(
        &mut self,
        frame: &I,
        compspec: &mut O,
    ) -> Result<(), ExecInvariantViolation>
    where
        I: ReadFrame<F> + ?Sized,
        O: WriteFrame<F> + ?Sized,
    {
        let frame = frame.frame().map_err(ExecInvariantViolation::from)?;
        expect_len("frame", self.window_size, frame.len())?;
        let out = compspec.frame_mut().map_err(ExecInvariantViolation::from)?;
        expect_len("compspec", self.window_size, out.len())?;

        self.analyze(frame)?;
        out.copy_from_slice(&self.compspec);
        Ok(())
    }

    fn forward_complex_alloc<I>(&mut self, frame: &I) -> Result<Vec<F>, ExecInvariantViolation>
    where
        I: ReadFrame<F> + ?Sized,
    {
        let mut compspec = vec![F::zero(); self.window_size];
        self.forward_complex_into(frame, &mut compspec)?;
        Ok(compspec)
    }

    fn inverse_complex_into<I, O>(
        &mut self,
        compspec: &I,
        frame: &mut O,
    ) -> Result<(), ExecInvariantViolation>
    where
        I: ReadFrame<F> + ?Sized,
        O: WriteFrame<F> + ?Sized,
    {
        let compspec = compspec.frame().map_err(ExecInvariantViolation::from)?;
        expect_len("compspec", self.window_size, compspec.len())?;
        let frame = frame.frame_mut().map_err(ExecInvariantViolation::from)?;
        expect_len("frame", self.window_size, frame.len())?;

        let engine = self.engine.as_mut().ok_or(RELEASED)?;
        Self::synthesize(engine, compspec, &mut self.output, self.renorm, frame)
    }

    fn inverse_complex_alloc<I>(&mut self, compspec: &I) -> Result<Vec<F>, ExecInvariantViolation>
    where
        I: ReadFrame<F> + ?Sized,
    {
        let mut frame = vec![F::zero(); self.window_size];
        self.inverse_complex_into(compspec, &mut frame)?;
        Ok(frame)
    }
}

impl<F: FftNum> Drop for SpectralTransform<F> {
    fn drop(&mut self) {
        if let Some(engine) = self.engine.take() {
            engine.release();
        }
    }
}

impl<F: FftNum> fmt::Debug for SpectralTransform<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpectralTransform")
            .field("window_size", &self.window_size)
            .field("engine", &self.kind)
            .field("planned", &self.engine.is_some())
            .finish()
    }
}
