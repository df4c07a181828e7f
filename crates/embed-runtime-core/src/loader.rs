//! WebAssembly module loading and compilation.
//!
//! [`Loader`] turns raw bytes (or WAT, for tests and tooling) into a
//! [`LoadedModule`], a compiled module plus the metadata the registry keys on.

use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, instrument};
use wasmtime::{Engine, Module};

use crate::Interpreter;
use embed_runtime_common::RuntimeError;

/// Module loader for a single store.
///
/// Shares the compiled-code machinery of the interpreter it was built from.
pub struct Loader {
    engine: Engine,
}

/// A loaded, compiled WebAssembly module.
///
/// Cheap to clone; the underlying compiled code is shared.
#[derive(Clone)]
pub struct LoadedModule {
    /// The compiled Wasmtime module.
    module: Module,

    /// Hash of the original Wasm bytes.
    content_hash: String,

    /// When this module was loaded.
    loaded_at: Instant,
}

impl Loader {
    /// Create a new loader sharing the given interpreter's engine.
    pub fn new(interpreter: &Interpreter) -> Self {
        Self {
            engine: interpreter.inner().clone(),
        }
    }

    /// Load a module from raw WebAssembly bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a WebAssembly binary or fail to
    /// compile.
    #[instrument(skip(self, bytes), fields(bytes_len = bytes.len()))]
    pub fn load_bytes(&self, bytes: &[u8]) -> Result<LoadedModule, RuntimeError> {
        let start = Instant::now();

        check_wasm_header(bytes)?;

        let module = Module::new(&self.engine, bytes)
            .map_err(|e| RuntimeError::compilation_failed(format!("Module compilation failed: {e}")))?;

        let content_hash = compute_hash(bytes);
        let duration = start.elapsed();

        info!(
            content_hash = %content_hash,
            duration_ms = duration.as_millis(),
            "Module loaded"
        );

        Ok(LoadedModule {
            module,
            content_hash,
            loaded_at: Instant::now(),
        })
    }

    /// Load a module from a file on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents fail to
    /// compile.
    #[instrument(skip(self, path))]
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<LoadedModule, RuntimeError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;

        debug!(path = %path.display(), "Module file read");

        self.load_bytes(&bytes)
    }

    /// Load a module from WAT (WebAssembly Text Format).
    ///
    /// This is primarily for testing purposes.
    ///
    /// # Errors
    ///
    /// Returns an error if the WAT source fails to parse or compile.
    #[instrument(skip(self, wat))]
    pub fn load_wat(&self, wat: &str) -> Result<LoadedModule, RuntimeError> {
        let module = Module::new(&self.engine, wat)
            .map_err(|e| RuntimeError::compilation_failed(format!("WAT compilation failed: {e}")))?;

        Ok(LoadedModule {
            content_hash: compute_hash(wat.as_bytes()),
            module,
            loaded_at: Instant::now(),
        })
    }
}

impl LoadedModule {
    /// Get the inner compiled module.
    pub fn module(&self) -> &Module {
        &self.module
    }

    /// Get the content hash of the original bytes.
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    /// Get when this module was loaded.
    pub fn loaded_at(&self) -> Instant {
        self.loaded_at
    }
}

impl std::fmt::Debug for LoadedModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModule")
            .field("content_hash", &self.content_hash)
            .finish_non_exhaustive()
    }
}

/// Validate the WebAssembly header (magic number).
fn check_wasm_header(bytes: &[u8]) -> Result<(), RuntimeError> {
    if bytes.len() < 8 {
        return Err(RuntimeError::compilation_failed(
            "Invalid Wasm: file too small",
        ));
    }

    // Check magic number: \0asm
    if &bytes[0..4] != b"\0asm" {
        return Err(RuntimeError::compilation_failed(
            "Invalid Wasm: bad magic number",
        ));
    }

    Ok(())
}

/// Compute a hash of the given bytes.
fn compute_hash(bytes: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use embed_runtime_common::EngineConfig;

    // Minimal valid Wasm module (empty module)
    const MINIMAL_WASM: &[u8] = &[
        0x00, 0x61, 0x73, 0x6d, // magic: \0asm
        0x01, 0x00, 0x00, 0x00, // version: 1
    ];

    fn interpreter() -> Interpreter {
        Interpreter::new(&EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_check_wasm_header_valid() {
        assert!(check_wasm_header(MINIMAL_WASM).is_ok());
    }

    #[test]
    fn test_check_wasm_header_too_small() {
        let result = check_wasm_header(&[0x00, 0x61]);
        assert!(result.is_err());
    }

    #[test]
    fn test_check_wasm_header_bad_magic() {
        let bad_wasm = &[0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00];
        let result = check_wasm_header(bad_wasm);
        assert!(result.is_err());
    }

    #[test]
    fn test_compute_hash() {
        let hash1 = compute_hash(b"hello");
        let hash2 = compute_hash(b"hello");
        let hash3 = compute_hash(b"world");

        assert_eq!(hash1, hash2);
        assert_ne!(hash1, hash3);
        assert_eq!(hash1.len(), 16); // 64-bit hex
    }

    #[test]
    fn test_load_bytes() {
        let loader = Loader::new(&interpreter());
        let module = loader.load_bytes(MINIMAL_WASM);
        assert!(module.is_ok());

        let module = module.unwrap();
        assert!(!module.content_hash().is_empty());
    }

    #[test]
    fn test_load_bytes_rejects_garbage() {
        let loader = Loader::new(&interpreter());
        let result = loader.load_bytes(b"not a wasm module");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_wat() {
        let loader = Loader::new(&interpreter());
        let module = loader.load_wat("(module)");
        assert!(module.is_ok());
    }

    #[test]
    fn test_module_debug() {
        let loader = Loader::new(&interpreter());
        let module = loader.load_bytes(MINIMAL_WASM).unwrap();

        let debug_str = format!("{module:?}");
        assert!(debug_str.contains("LoadedModule"));
        assert!(debug_str.contains("content_hash"));
    }
}
