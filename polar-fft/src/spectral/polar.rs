//! Conversions between the packed half-complex layout and polar spectra.
//!
//! A packed spectrum of a length `n` frame stores bin `k` as
//! `packed[k] = Re(k)` and `packed[n - k] = Im(k)`. DC (`k = 0`) and Nyquist
//! (`k = n / 2`) are purely real and have no imaginary slot.

use crate::kernel::{expect_len, ConfigError, ExecInvariantViolation, ReadPolar, WritePolar};
use num_traits::{Float, FloatConst};

/// Magnitude/phase spectrum of a real frame, bins `0..=n/2`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolarSpectrum<F> {
    norm: Vec<F>,
    phas: Vec<F>,
}

impl<F: Float> PolarSpectrum<F> {
    /// Zeroed spectrum sized for a frame of `window_size` samples.
    pub fn zeros(window_size: usize) -> Self {
        let len = window_size / 2 + 1;
        Self {
            norm: vec![F::zero(); len],
            phas: vec![F::zero(); len],
        }
    }
}

impl<F> PolarSpectrum<F> {
    /// Build a spectrum from parallel magnitude and phase vectors.
    pub fn from_parts(norm: Vec<F>, phas: Vec<F>) -> Result<Self, ConfigError> {
        if norm.len() != phas.len() {
            return Err(ConfigError::LengthMismatch {
                arg: "phas",
                expected: norm.len(),
                got: phas.len(),
            });
        }
        Ok(Self { norm, phas })
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.norm.len()
    }

    /// True if the spectrum holds no bins.
    pub fn is_empty(&self) -> bool {
        self.norm.is_empty()
    }

    /// Magnitudes, one per bin.
    pub fn norm(&self) -> &[F] {
        &self.norm
    }

    /// Phases in radians, one per bin.
    pub fn phas(&self) -> &[F] {
        &self.phas
    }

    /// Mutable magnitudes.
    pub fn norm_mut(&mut self) -> &mut [F] {
        &mut self.norm
    }

    /// Mutable phases.
    pub fn phas_mut(&mut self) -> &mut [F] {
        &mut self.phas
    }

    /// Split into `(norm, phas)`.
    pub fn into_parts(self) -> (Vec<F>, Vec<F>) {
        (self.norm, self.phas)
    }
}

impl<F> ReadPolar<F> for PolarSpectrum<F> {
    fn polar(&self) -> Result<(&[F], &[F]), ConfigError> {
        Ok((&self.norm, &self.phas))
    }
}

impl<F> WritePolar<F> for PolarSpectrum<F> {
    fn polar_mut(&mut self) -> Result<(&mut [F], &mut [F]), ConfigError> {
        Ok((&mut self.norm, &mut self.phas))
    }
}

/// Convert a packed spectrum into magnitudes and phases.
pub fn packed_to_polar<F>(
    compspec: &[F],
    norm: &mut [F],
    phas: &mut [F],
) -> Result<(), ExecInvariantViolation>
where
    F: Float + FloatConst,
{
    packed_phase(compspec, phas)?;
    packed_norm(compspec, norm)
}

/// Convert magnitudes and phases into a packed spectrum.
pub fn polar_to_packed<F>(
    norm: &[F],
    phas: &[F],
    compspec: &mut [F],
) -> Result<(), ExecInvariantViolation>
where
    F: Float,
{
    polar_imag(norm, phas, compspec)?;
    polar_real(norm, phas, compspec)
}

/// Phase of every bin of a packed spectrum.
///
/// DC and Nyquist are real, so their phase is `0` or `π` depending on sign.
/// A bin whose real and imaginary parts are both zero gets phase `0`.
pub fn packed_phase<F>(compspec: &[F], phas: &mut [F]) -> Result<(), ExecInvariantViolation>
where
    F: Float + FloatConst,
{
    check_bins(compspec.len(), "phas", phas.len())?;
    let n = compspec.len();
    let last = phas.len() - 1;

    phas[0] = real_phase(compspec[0]);
    for (k, p) in phas[..last].iter_mut().enumerate().skip(1) {
        *p = bin_phase(compspec[k], compspec[n - k]);
    }
    phas[last] = real_phase(compspec[n / 2]);
    Ok(())
}

/// Magnitude of every bin of a packed spectrum.
pub fn packed_norm<F>(compspec: &[F], norm: &mut [F]) -> Result<(), ExecInvariantViolation>
where
    F: Float,
{
    check_bins(compspec.len(), "norm", norm.len())?;
    let n = compspec.len();
    let last = norm.len() - 1;

    norm[0] = compspec[0].abs();
    for (k, m) in norm[..last].iter_mut().enumerate().skip(1) {
        let (re, im) = (compspec[k], compspec[n - k]);
        *m = (re * re + im * im).sqrt();
    }
    norm[last] = compspec[n / 2].abs();
    Ok(())
}

/// Fill the imaginary half of a packed spectrum from polar bins.
///
/// Only `compspec[n/2 + 1..]` is written (plus nothing for DC/Nyquist).
pub fn polar_imag<F>(norm: &[F], phas: &[F], compspec: &mut [F]) -> Result<(), ExecInvariantViolation>
where
    F: Float,
{
    check_polar(compspec.len(), norm.len(), phas.len())?;
    let n = compspec.len();
    for k in 1..n.div_ceil(2) {
        compspec[n - k] = norm[k] * phas[k].sin();
    }
    Ok(())
}

/// Fill the real half `compspec[..=n/2]` of a packed spectrum from polar bins.
pub fn polar_real<F>(norm: &[F], phas: &[F], compspec: &mut [F]) -> Result<(), ExecInvariantViolation>
where
    F: Float,
{
    check_polar(compspec.len(), norm.len(), phas.len())?;
    for ((re, &m), &p) in compspec.iter_mut().zip(norm).zip(phas) {
        *re = m * p.cos();
    }
    Ok(())
}

fn real_phase<F: Float + FloatConst>(re: F) -> F {
    if re < F::zero() {
        F::PI()
    } else {
        F::zero()
    }
}

fn bin_phase<F: Float>(re: F, im: F) -> F {
    // atan2(±0, -0) is ±π; an empty bin has no direction.
    if re == F::zero() && im == F::zero() {
        F::zero()
    } else {
        im.atan2(re)
    }
}

fn check_bins(
    packed_len: usize,
    arg: &'static str,
    bins: usize,
) -> Result<(), ExecInvariantViolation> {
    if packed_len == 0 {
        return Err(ExecInvariantViolation::InvalidState {
            reason: "packed spectrum must be non-empty",
        });
    }
    expect_len(arg, packed_len / 2 + 1, bins)
}

fn check_polar(packed_len: usize, norm: usize, phas: usize) -> Result<(), ExecInvariantViolation> {
    check_bins(packed_len, "norm", norm)?;
    check_bins(packed_len, "phas", phas)
}
