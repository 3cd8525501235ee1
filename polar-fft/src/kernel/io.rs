use super::ConfigError;

use ndarray::{Array1, ArrayView1, ArrayViewMut1};

/// Adapter trait for reading a contiguous frame of samples.
pub trait ReadFrame<T> {
    /// Borrow the underlying samples as a contiguous slice.
    fn frame(&self) -> Result<&[T], ConfigError>;
}

/// Adapter trait for writing a contiguous frame of samples.
pub trait WriteFrame<T> {
    /// Borrow the underlying samples as a mutable contiguous slice.
    fn frame_mut(&mut self) -> Result<&mut [T], ConfigError>;
}

/// Adapter trait for reading a polar spectrum as parallel `(norm, phas)` slices.
pub trait ReadPolar<T> {
    /// Borrow magnitudes and phases.
    fn polar(&self) -> Result<(&[T], &[T]), ConfigError>;
}

/// Adapter trait for writing a polar spectrum as parallel `(norm, phas)` slices.
pub trait WritePolar<T> {
    /// Mutably borrow magnitudes and phases.
    fn polar_mut(&mut self) -> Result<(&mut [T], &mut [T]), ConfigError>;
}

impl<T> ReadFrame<T> for [T] {
    fn frame(&self) -> Result<&[T], ConfigError> {
        Ok(self)
    }
}

impl<T> WriteFrame<T> for [T] {
    fn frame_mut(&mut self) -> Result<&mut [T], ConfigError> {
        Ok(self)
    }
}

impl<T, const N: usize> ReadFrame<T> for [T; N] {
    fn frame(&self) -> Result<&[T], ConfigError> {
        Ok(self)
    }
}

impl<T, const N: usize> WriteFrame<T> for [T; N] {
    fn frame_mut(&mut self) -> Result<&mut [T], ConfigError> {
        Ok(self)
    }
}

impl<T> ReadFrame<T> for Vec<T> {
    fn frame(&self) -> Result<&[T], ConfigError> {
        Ok(self.as_slice())
    }
}

impl<T> WriteFrame<T> for Vec<T> {
    fn frame_mut(&mut self) -> Result<&mut [T], ConfigError> {
        Ok(self.as_mut_slice())
    }
}

impl<T> ReadFrame<T> for Array1<T> {
    fn frame(&self) -> Result<&[T], ConfigError> {
        self.as_slice()
            .ok_or(ConfigError::NonContiguous { arg: "array" })
    }
}

impl<T> WriteFrame<T> for Array1<T> {
    fn frame_mut(&mut self) -> Result<&mut [T], ConfigError> {
        self.as_slice_mut()
            .ok_or(ConfigError::NonContiguous { arg: "array" })
    }
}

impl<T> ReadFrame<T> for ArrayView1<'_, T> {
    fn frame(&self) -> Result<&[T], ConfigError> {
        self.as_slice()
            .ok_or(ConfigError::NonContiguous { arg: "array_view" })
    }
}

impl<T> WriteFrame<T> for ArrayViewMut1<'_, T> {
    fn frame_mut(&mut self) -> Result<&mut [T], ConfigError> {
        self.as_slice_mut().ok_or(ConfigError::NonContiguous {
            arg: "array_view_mut",
        })
    }
}

impl<T> ReadPolar<T> for (&[T], &[T]) {
    fn polar(&self) -> Result<(&[T], &[T]), ConfigError> {
        same_len(self.0.len(), self.1.len())?;
        Ok((self.0, self.1))
    }
}

impl<T> WritePolar<T> for (&mut [T], &mut [T]) {
    fn polar_mut(&mut self) -> Result<(&mut [T], &mut [T]), ConfigError> {
        same_len(self.0.len(), self.1.len())?;
        Ok((&mut *self.0, &mut *self.1))
    }
}

fn same_len(norm: usize, phas: usize) -> Result<(), ConfigError> {
    if norm != phas {
        return Err(ConfigError::LengthMismatch {
            arg: "phas",
            expected: norm,
            got: phas,
        });
    }
    Ok(())
}
