//! Engine, store, and configuration handles.
//!
//! These shells own the engine internals: an engine holds the configuration
//! snapshot and the interpreter built from it; a store holds the loader,
//! validator, and store manager built from a borrowed engine. The store keeps
//! a non-owning pointer back to its engine and must not outlive it.

use tracing::error;

use embed_runtime_common::EngineConfig;
use embed_runtime_core::{Interpreter, Loader, StoreManager, Validator};

/// Configuration snapshot consumed by engine construction.
#[derive(Clone, Default)]
pub struct wasm_config_t {
    pub(crate) config: EngineConfig,
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_config_new() -> Box<wasm_config_t> {
    Box::default()
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_config_delete(_config: Option<Box<wasm_config_t>>) {}

/// The engine: a configuration snapshot plus the interpreter built from it.
pub struct wasm_engine_t {
    config: EngineConfig,
    interpreter: Interpreter,
}

impl wasm_engine_t {
    /// The interpreter owned by this engine.
    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// The configuration snapshot this engine was built from.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

fn engine_with_config(config: EngineConfig) -> Option<Box<wasm_engine_t>> {
    match Interpreter::new(&config) {
        Ok(interpreter) => Some(Box::new(wasm_engine_t {
            config,
            interpreter,
        })),
        Err(err) => {
            error!(%err, "engine construction failed");
            None
        }
    }
}

/// Create an engine with the default configuration; null on failure.
#[unsafe(no_mangle)]
pub extern "C" fn wasm_engine_new() -> Option<Box<wasm_engine_t>> {
    engine_with_config(EngineConfig::default())
}

/// Create an engine from a taken configuration snapshot.
///
/// A null configuration means the defaults; construction failure yields null.
#[unsafe(no_mangle)]
pub extern "C" fn wasm_engine_new_with_config(
    config: Option<Box<wasm_config_t>>,
) -> Option<Box<wasm_engine_t>> {
    engine_with_config(config.map(|c| c.config).unwrap_or_default())
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_engine_delete(_engine: Option<Box<wasm_engine_t>>) {}

/// The store: loader, validator, and store manager over a borrowed engine.
pub struct wasm_store_t {
    /// Borrowed, never owned or freed; the store must not outlive it.
    engine: *mut wasm_engine_t,
    loader: Loader,
    validator: Validator,
    manager: StoreManager,
}

impl wasm_store_t {
    /// The engine this store was created from.
    pub fn engine(&self) -> *const wasm_engine_t {
        self.engine
    }

    /// The store's module loader.
    pub fn loader(&self) -> &Loader {
        &self.loader
    }

    /// The store's module validator.
    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// The store's state manager.
    pub fn manager(&self) -> &StoreManager {
        &self.manager
    }

    /// The store's state manager, mutably.
    pub fn manager_mut(&mut self) -> &mut StoreManager {
        &mut self.manager
    }
}

/// Create a store over a borrowed engine.
///
/// A null engine yields null with no side effects.
#[unsafe(no_mangle)]
pub extern "C" fn wasm_store_new(engine: Option<&mut wasm_engine_t>) -> Option<Box<wasm_store_t>> {
    let engine = engine?;
    let loader = Loader::new(&engine.interpreter);
    let validator = Validator::new(&engine.interpreter);
    let manager = match StoreManager::new(&engine.interpreter) {
        Ok(manager) => manager,
        Err(err) => {
            error!(%err, "store construction failed");
            return None;
        }
    };

    Some(Box::new(wasm_store_t {
        engine: std::ptr::from_mut(engine),
        loader,
        validator,
        manager,
    }))
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_store_delete(_store: Option<Box<wasm_store_t>>) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_with_default_configuration() {
        let engine = wasm_engine_new().unwrap();
        assert!(!engine.config().fuel_metering);
        wasm_engine_delete(Some(engine));
    }

    #[test]
    fn engine_consumes_config_snapshot() {
        let mut config = wasm_config_new();
        config.config.fuel_metering = true;
        config.config.max_fuel = 500;

        let engine = wasm_engine_new_with_config(Some(config)).unwrap();
        assert!(engine.config().fuel_metering);
        assert_eq!(engine.config().max_fuel, 500);
    }

    #[test]
    fn engine_null_config_means_defaults() {
        let engine = wasm_engine_new_with_config(None).unwrap();
        assert!(!engine.config().pooling_allocator);
    }

    #[test]
    fn store_requires_engine() {
        assert!(wasm_store_new(None).is_none());
    }

    #[test]
    fn store_borrows_its_engine() {
        let mut engine = wasm_engine_new().unwrap();
        let engine_ptr: *const wasm_engine_t = &*engine;

        let store = wasm_store_new(Some(&mut engine)).unwrap();
        assert_eq!(store.engine(), engine_ptr);
        assert_eq!(store.manager().module_names().count(), 0);

        // Store released first; the engine stays usable.
        wasm_store_delete(Some(store));
        assert!(!engine.interpreter().is_pooling_enabled());
        wasm_engine_delete(Some(engine));
    }
}
