use core::fmt;

/// Errors raised while constructing a transform or binding a buffer adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The planner cannot produce a plan pair for this window size.
    UnsupportedSize {
        /// Requested window size.
        window_size: usize,
        /// Human readable reason.
        reason: &'static str,
    },
    /// A scratch buffer could not be reserved.
    AllocationFailure {
        /// Name of the buffer that failed to allocate.
        buffer: &'static str,
        /// Number of elements requested.
        len: usize,
    },
    /// A contiguous 1D slice view could not be obtained.
    NonContiguous {
        /// Name of the argument that is non-contiguous.
        arg: &'static str,
    },
    /// Two parallel sequences that must share a length did not.
    LengthMismatch {
        /// Name of the argument.
        arg: &'static str,
        /// Required length.
        expected: usize,
        /// Received length.
        got: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnsupportedSize {
                window_size,
                reason,
            } => write!(f, "Unsupported window size {window_size}: {reason}"),
            ConfigError::AllocationFailure { buffer, len } => {
                write!(f, "Failed to allocate `{buffer}` with {len} elements.")
            }
            ConfigError::NonContiguous { arg } => {
                write!(f, "Argument `{arg}` is not contiguous in memory.")
            }
            ConfigError::LengthMismatch { arg, expected, got } => {
                write!(
                    f,
                    "Length mismatch on `{arg}`. Expected {expected}, got {got}."
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime invariant violations for checked transform entrypoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecInvariantViolation {
    /// An execution precondition was violated.
    InvalidState {
        /// Human readable reason.
        reason: &'static str,
    },
    /// A frame, spectrum or packed buffer had the wrong length for this transform.
    LengthMismatch {
        /// Name of the argument.
        arg: &'static str,
        /// Required length.
        expected: usize,
        /// Received length.
        got: usize,
    },
    /// The transform engine refused to execute a plan.
    Engine {
        /// Message reported by the engine.
        detail: String,
    },
    /// Adapter binding failure.
    Config(ConfigError),
}

impl From<ConfigError> for ExecInvariantViolation {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<realfft::FftError> for ExecInvariantViolation {
    fn from(value: realfft::FftError) -> Self {
        Self::Engine {
            detail: value.to_string(),
        }
    }
}

impl fmt::Display for ExecInvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecInvariantViolation::InvalidState { reason } => {
                write!(f, "Execution invariant violation: {reason}")
            }
            ExecInvariantViolation::LengthMismatch { arg, expected, got } => {
                write!(
                    f,
                    "Execution length mismatch on `{arg}`. Expected {expected}, got {got}."
                )
            }
            ExecInvariantViolation::Engine { detail } => {
                write!(f, "Transform engine failure: {detail}")
            }
            ExecInvariantViolation::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ExecInvariantViolation {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExecInvariantViolation::Config(err) => Some(err),
            _ => None,
        }
    }
}

/// Check that `got` matches the length a transform was built for.
pub(crate) fn expect_len(
    arg: &'static str,
    expected: usize,
    got: usize,
) -> Result<(), ExecInvariantViolation> {
    if expected != got {
        return Err(ExecInvariantViolation::LengthMismatch { arg, expected, got });
    }
    Ok(())
}
