//! Shared kernel substrate.
//!
//! Constructor validation, error types and the frame/spectrum buffer
//! adapters the transform reads from and writes into.

mod errors;
mod io;

pub(crate) use errors::expect_len;
pub use errors::{ConfigError, ExecInvariantViolation};
pub use io::*;

/// Constructor validation lifecycle shared by kernel structs.
///
/// Everything that can fail (allocation, planning) happens in `try_new`, so a
/// constructed kernel never fails for configuration reasons afterwards.
pub trait KernelLifecycle: Sized {
    /// Kernel config type.
    type Config;

    /// Construct a validated kernel from config.
    fn try_new(config: Self::Config) -> Result<Self, ConfigError>;
}

/// Allocate a buffer of `len` copies of `fill`, reporting allocation failure
/// instead of aborting.
pub(crate) fn try_filled<T: Clone>(
    buffer: &'static str,
    len: usize,
    fill: T,
) -> Result<Vec<T>, ConfigError> {
    let mut out = Vec::new();
    out.try_reserve_exact(len)
        .map_err(|_| ConfigError::AllocationFailure { buffer, len })?;
    out.resize(len, fill);
    Ok(out)
}
