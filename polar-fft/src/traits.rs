//! Trait interfaces for spectral transform capabilities.

use crate::kernel::{ExecInvariantViolation, ReadFrame, ReadPolar, WriteFrame, WritePolar};
use crate::spectral::PolarSpectrum;

/// Real frame ⇄ polar spectrum capability.
pub trait PolarFft1D<T> {
    /// Forward transform of `frame` into caller-provided `norm`/`phas` buffers.
    fn forward_into<I, S>(&mut self, frame: &I, spectrum: &mut S) -> Result<(), ExecInvariantViolation>
    where
        I: ReadFrame<T> + ?Sized,
        S: WritePolar<T> + ?Sized;

    /// Forward transform of `frame` into a newly allocated spectrum.
    fn forward_alloc<I>(&mut self, frame: &I) -> Result<PolarSpectrum<T>, ExecInvariantViolation>
    where
        I: ReadFrame<T> + ?Sized;

    /// Inverse transform of `spectrum` into a caller-provided frame.
    fn inverse_into<S, O>(&mut self, spectrum: &S, frame: &mut O) -> Result<(), ExecInvariantViolation>
    where
        S: ReadPolar<T> + ?Sized,
        O: WriteFrame<T> + ?Sized;

    /// Inverse transform of `spectrum` into a newly allocated frame.
    fn inverse_alloc<S>(&mut self, spectrum: &S) -> Result<Vec<T>, ExecInvariantViolation>
    where
        S: ReadPolar<T> + ?Sized;
}

/// Real frame ⇄ packed half-complex spectrum capability.
pub trait PackedFft1D<T> {
    /// Forward transform of `frame` into a caller-provided packed buffer.
    fn forward_complex_into<I, O>(
        &mut self,
        frame: &I,
        compspec: &mut O,
    ) -> Result<(), ExecInvariantViolation>
    where
        I: ReadFrame<T> + ?Sized,
        O: WriteFrame<T> + ?Sized;

    /// Forward transform of `frame` into a newly allocated packed buffer.
    fn forward_complex_alloc<I>(&mut self, frame: &I) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I: ReadFrame<T> + ?Sized;

    /// Normalized inverse transform of a packed spectrum into a caller-provided frame.
    fn inverse_complex_into<I, O>(
        &mut self,
        compspec: &I,
        frame: &mut O,
    ) -> Result<(), ExecInvariantViolation>
    where
        I: ReadFrame<T> + ?Sized,
        O: WriteFrame<T> + ?Sized;

    /// Normalized inverse transform of a packed spectrum into a newly allocated frame.
    fn inverse_complex_alloc<I>(&mut self, compspec: &I) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I: ReadFrame<T> + ?Sized;
}
