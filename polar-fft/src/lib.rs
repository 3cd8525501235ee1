//! Real FFT analysis/synthesis between time-domain frames and polar
//! (magnitude/phase) spectra.
//!
//! ```
//! use polar_fft::kernel::KernelLifecycle;
//! use polar_fft::spectral::{EngineKind, SpectralTransform, SpectralTransformConfig};
//! use polar_fft::traits::PolarFft1D;
//!
//! let config = SpectralTransformConfig::new(4).with_engine(EngineKind::PackedReal);
//! let mut fft = SpectralTransform::<f64>::try_new(config).unwrap();
//!
//! let spectrum = fft.forward_alloc(&[1.0, 1.0, 1.0, 1.0]).unwrap();
//! assert!((spectrum.norm()[0] - 4.0).abs() < 1e-12);
//! assert_eq!(spectrum.phas()[0], 0.0);
//!
//! let frame = fft.inverse_alloc(&spectrum).unwrap();
//! assert!(frame.iter().all(|x| (x - 1.0).abs() < 1e-12));
//! ```

#![warn(missing_docs)]

pub mod kernel;
pub mod spectral;
pub mod traits;

pub use kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle};
pub use spectral::{EngineKind, PolarSpectrum, SpectralTransform, SpectralTransformConfig};
