//! Real-input spectral analysis and synthesis.
//!
//! [`SpectralTransform`] runs a real FFT of a fixed window size and converts
//! its packed half-complex output into a [`PolarSpectrum`] of `n/2 + 1`
//! magnitude/phase bins, and back. The packed layout and its conversions are
//! public through [`polar`] for callers that work on the intermediate form.

mod engine;
pub mod polar;
mod transform;

pub use engine::EngineKind;
pub use polar::{
    packed_norm, packed_phase, packed_to_polar, polar_imag, polar_real, polar_to_packed,
    PolarSpectrum,
};
pub use transform::{SpectralTransform, SpectralTransformConfig};
