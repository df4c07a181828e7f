//! Standalone WebAssembly module validation.

use tracing::debug;
use wasmtime::{Engine, Module};

use crate::Interpreter;
use embed_runtime_common::RuntimeError;

/// Module validator for a single store.
///
/// Validates binaries against the feature set of the interpreter it was built
/// from, without compiling them.
pub struct Validator {
    engine: Engine,
}

impl Validator {
    /// Create a new validator sharing the given interpreter's engine.
    pub fn new(interpreter: &Interpreter) -> Self {
        Self {
            engine: interpreter.inner().clone(),
        }
    }

    /// Validate raw WebAssembly bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid WebAssembly binary under
    /// the configured feature set.
    pub fn validate(&self, bytes: &[u8]) -> Result<(), RuntimeError> {
        Module::validate(&self.engine, bytes)
            .map_err(|e| RuntimeError::validation_failed(e.to_string()))?;

        debug!(bytes_len = bytes.len(), "Module validated");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embed_runtime_common::EngineConfig;

    const MINIMAL_WASM: &[u8] = &[
        0x00, 0x61, 0x73, 0x6d, // magic: \0asm
        0x01, 0x00, 0x00, 0x00, // version: 1
    ];

    fn validator() -> Validator {
        Validator::new(&Interpreter::new(&EngineConfig::default()).unwrap())
    }

    #[test]
    fn test_validate_minimal_module() {
        assert!(validator().validate(MINIMAL_WASM).is_ok());
    }

    #[test]
    fn test_validate_rejects_truncated() {
        let result = validator().validate(&MINIMAL_WASM[..4]);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_magic() {
        let result = validator().validate(&[0xff; 8]);
        assert!(result.is_err());
        assert!(result.unwrap_err().is_module_error());
    }
}
