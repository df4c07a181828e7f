//! Store-scoped state management.
//!
//! This module provides:
//! - [`StoreManager`]: the mutable state owned by one store handle, including
//!   the named-module registry and fuel accounting
//! - [`HostState`]: data attached to the underlying Wasmtime [`Store`]

use std::collections::HashMap;

use tracing::debug;
use wasmtime::Store;

use crate::{Interpreter, LoadedModule};
use embed_runtime_common::RuntimeError;

/// Data attached to the underlying [`Store`].
///
/// Kept separate from [`StoreManager`] bookkeeping so that host functions
/// registered by an execution layer can borrow it mutably.
#[derive(Debug, Default)]
pub struct HostState {
    /// Fuel originally granted to this store, if metering is enabled.
    pub initial_fuel: Option<u64>,
}

/// Mutable state owned by a single store handle.
///
/// A `StoreManager` keeps loaded modules registered under embedder-chosen
/// names. It performs no instantiation or execution itself.
///
/// # Thread Safety
///
/// Not internally synchronized; a store and everything in it must be used
/// from one thread at a time.
pub struct StoreManager {
    store: Store<HostState>,
    modules: HashMap<String, LoadedModule>,
}

impl StoreManager {
    /// Create a new store manager backed by the given interpreter.
    ///
    /// Grants the configured initial fuel when fuel metering is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if fuel cannot be set on the store.
    pub fn new(interpreter: &Interpreter) -> Result<Self, RuntimeError> {
        let config = interpreter.config();
        let mut store = Store::new(interpreter.inner(), HostState::default());

        if config.fuel_metering {
            store
                .set_fuel(config.max_fuel)
                .map_err(|e| RuntimeError::invalid_config(format!("Failed to set fuel: {e}")))?;
            store.data_mut().initial_fuel = Some(config.max_fuel);
        }

        Ok(Self {
            store,
            modules: HashMap::new(),
        })
    }

    /// Register a loaded module under a name.
    ///
    /// A later registration under the same name replaces the earlier one.
    pub fn register(&mut self, name: impl Into<String>, module: LoadedModule) {
        let name = name.into();
        debug!(name = %name, content_hash = %module.content_hash(), "Module registered");
        self.modules.insert(name, module);
    }

    /// Look up a registered module by name.
    pub fn named_module(&self, name: &str) -> Option<&LoadedModule> {
        self.modules.get(name)
    }

    /// Iterate over the names of all registered modules.
    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    /// Get remaining fuel, if metering is enabled.
    pub fn remaining_fuel(&self) -> Option<u64> {
        self.store.get_fuel().ok()
    }

    /// Fuel consumed since this store was created.
    ///
    /// Returns 0 when metering is disabled.
    pub fn fuel_consumed(&self) -> u64 {
        let initial = self.store.data().initial_fuel.unwrap_or(0);
        let remaining = self.remaining_fuel().unwrap_or(initial);
        initial.saturating_sub(remaining)
    }

    /// Get the host state attached to the underlying store.
    pub fn host_state(&self) -> &HostState {
        self.store.data()
    }

    /// Get the host state mutably.
    pub fn host_state_mut(&mut self) -> &mut HostState {
        self.store.data_mut()
    }
}

impl std::fmt::Debug for StoreManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreManager")
            .field("modules", &self.modules.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Loader;
    use embed_runtime_common::EngineConfig;

    fn interpreter(config: &EngineConfig) -> Interpreter {
        Interpreter::new(config).unwrap()
    }

    #[test]
    fn test_store_creation() {
        let interp = interpreter(&EngineConfig::default());
        let manager = StoreManager::new(&interp);
        assert!(manager.is_ok());
    }

    #[test]
    fn test_store_fuel() {
        let config = EngineConfig {
            fuel_metering: true,
            max_fuel: 1000,
            ..Default::default()
        };
        let interp = interpreter(&config);
        let manager = StoreManager::new(&interp).unwrap();

        assert_eq!(manager.remaining_fuel(), Some(1000));
        assert_eq!(manager.fuel_consumed(), 0);
    }

    #[test]
    fn test_store_no_fuel_when_disabled() {
        let interp = interpreter(&EngineConfig::default());
        let manager = StoreManager::new(&interp).unwrap();

        assert_eq!(manager.remaining_fuel(), None);
        assert_eq!(manager.fuel_consumed(), 0);
    }

    #[test]
    fn test_register_and_lookup() {
        let interp = interpreter(&EngineConfig::default());
        let loader = Loader::new(&interp);
        let mut manager = StoreManager::new(&interp).unwrap();

        let module = loader.load_wat("(module)").unwrap();
        manager.register("start", module);

        assert!(manager.named_module("start").is_some());
        assert!(manager.named_module("missing").is_none());
        assert_eq!(manager.module_names().count(), 1);
    }
}
