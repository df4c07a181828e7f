//! Wasmtime engine configuration and creation.
//!
//! The [`Interpreter`] is the foundation of the runtime: one exists per engine
//! handle and every loader, validator, and store built from that handle shares
//! its compiled-code machinery.

use tracing::info;
use wasmtime::{Config, Engine, InstanceAllocationStrategy, OptLevel, PoolingAllocationConfig};

use embed_runtime_common::{EngineConfig, RuntimeError};

/// Execution back end built from an [`EngineConfig`] snapshot.
///
/// This struct wraps a Wasmtime [`Engine`] configured from the snapshot taken
/// at engine construction. It contains no per-store state.
#[derive(Clone)]
pub struct Interpreter {
    engine: Engine,
    config: EngineConfig,
}

impl Interpreter {
    /// Create a new interpreter with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The Wasmtime configuration is invalid
    /// - The pooling allocator cannot be initialized
    pub fn new(config: &EngineConfig) -> Result<Self, RuntimeError> {
        let mut wasmtime_config = Config::new();

        wasmtime_config.cranelift_opt_level(OptLevel::Speed);

        // Proposal toggles from the snapshot
        wasmtime_config.wasm_reference_types(config.reference_types);
        wasmtime_config.wasm_bulk_memory(config.bulk_memory);

        // Enable fuel metering for deterministic CPU limiting
        if config.fuel_metering {
            wasmtime_config.consume_fuel(true);
        }

        // Enable epoch-based interruption as a time-based backstop
        if config.epoch_interruption {
            wasmtime_config.epoch_interruption(true);
        }

        // Configure pooling allocator for high-performance instantiation
        if config.pooling_allocator {
            let pooling_config = Self::create_pooling_config(config);

            wasmtime_config
                .allocation_strategy(InstanceAllocationStrategy::Pooling(pooling_config));

            info!(
                max_instances = config.max_instances,
                instance_memory_mb = config.instance_memory_mb,
                "Pooling allocator enabled"
            );
        }

        let engine = Engine::new(&wasmtime_config).map_err(|e| {
            RuntimeError::invalid_config(format!("Failed to create Wasmtime engine: {e}"))
        })?;

        info!("Wasmtime engine initialized");

        Ok(Self {
            engine,
            config: config.clone(),
        })
    }

    /// Create pooling allocation configuration.
    fn create_pooling_config(config: &EngineConfig) -> PoolingAllocationConfig {
        let mut pooling = PoolingAllocationConfig::default();

        // Total number of core module instances
        pooling.total_core_instances(config.max_instances);

        // Total number of memories across all instances
        pooling.total_memories(config.max_instances);

        // Total number of tables across all instances
        pooling.total_tables(config.max_instances);

        // Maximum size of a single memory in bytes
        let max_memory_bytes = (config.instance_memory_mb as usize) * 1024 * 1024;
        pooling.max_memory_size(max_memory_bytes);

        pooling
    }

    /// Get a reference to the inner Wasmtime engine.
    pub fn inner(&self) -> &Engine {
        &self.engine
    }

    /// Get the configuration snapshot this interpreter was built from.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Increment the epoch counter.
    ///
    /// Meaningful only when `epoch_interruption` is enabled; the embedder
    /// calls this periodically to bound execution time.
    pub fn increment_epoch(&self) {
        self.engine.increment_epoch();
    }

    /// Check if the pooling allocator is enabled.
    pub fn is_pooling_enabled(&self) -> bool {
        self.config.pooling_allocator
    }
}

impl std::fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("pooling_allocator", &self.config.pooling_allocator)
            .field("fuel_metering", &self.config.fuel_metering)
            .field("max_instances", &self.config.max_instances)
            .finish_non_exhaustive()
    }
}
