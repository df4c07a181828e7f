//! Error types for embed-runtime.
//!
//! [`RuntimeError`] covers the failures that can occur while constructing the
//! engine and loading or validating modules, using `thiserror`.

use std::io;

use thiserror::Error;

/// Top-level runtime errors.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Invalid configuration was provided.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration error.
        reason: String,
    },

    /// WebAssembly compilation failed.
    #[error("Compilation failed: {reason}")]
    CompilationFailed {
        /// Description of the compilation failure.
        reason: String,
    },

    /// WebAssembly validation failed.
    #[error("Validation failed: {reason}")]
    ValidationFailed {
        /// Description of the validation failure.
        reason: String,
    },

    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl RuntimeError {
    /// Create a new `InvalidConfig` error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create a new `CompilationFailed` error.
    pub fn compilation_failed(reason: impl Into<String>) -> Self {
        Self::CompilationFailed {
            reason: reason.into(),
        }
    }

    /// Create a new `ValidationFailed` error.
    pub fn validation_failed(reason: impl Into<String>) -> Self {
        Self::ValidationFailed {
            reason: reason.into(),
        }
    }

    /// Returns `true` if this error came from compiling or validating a module.
    pub fn is_module_error(&self) -> bool {
        matches!(
            self,
            Self::CompilationFailed { .. } | Self::ValidationFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RuntimeError::invalid_config("bad pool size");
        assert_eq!(err.to_string(), "Invalid configuration: bad pool size");

        let err = RuntimeError::compilation_failed("bad magic");
        assert_eq!(err.to_string(), "Compilation failed: bad magic");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: RuntimeError = io_err.into();

        assert!(matches!(err, RuntimeError::Io(_)));
    }

    #[test]
    fn test_is_module_error() {
        assert!(RuntimeError::compilation_failed("x").is_module_error());
        assert!(RuntimeError::validation_failed("x").is_module_error());
        assert!(!RuntimeError::invalid_config("x").is_module_error());
    }
}
