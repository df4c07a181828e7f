//! Configuration snapshot for the engine.
//!
//! [`EngineConfig`] is captured once at engine construction and never mutated
//! afterward; every component built from that engine (loader, validator,
//! store manager) reads the same snapshot.

use serde::{Deserialize, Serialize};

/// Engine configuration snapshot.
///
/// These settings affect compilation and the shape of every store created
/// from the engine. The structure can be deserialized from JSON or any other
/// serde format by the embedding application.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Enable pooling allocator for fast instance creation.
    ///
    /// When enabled, memory is pre-allocated for a pool of instances.
    #[serde(default = "defaults::pooling_allocator")]
    pub pooling_allocator: bool,

    /// Maximum concurrent instances in the pool.
    ///
    /// Only effective when `pooling_allocator` is enabled.
    #[serde(default = "defaults::max_instances")]
    pub max_instances: u32,

    /// Memory per instance slot in megabytes.
    ///
    /// This determines the maximum linear memory each instance can use.
    #[serde(default = "defaults::instance_memory_mb")]
    pub instance_memory_mb: u32,

    /// Enable fuel metering.
    ///
    /// When enabled, each store is granted `max_fuel` units at creation and
    /// execution consumes them deterministically.
    #[serde(default = "defaults::fuel_metering")]
    pub fuel_metering: bool,

    /// Fuel granted to each store when `fuel_metering` is enabled.
    #[serde(default = "defaults::max_fuel")]
    pub max_fuel: u64,

    /// Enable epoch-based interruption.
    ///
    /// Requires the embedder to drive the epoch counter periodically.
    #[serde(default = "defaults::epoch_interruption")]
    pub epoch_interruption: bool,

    /// Enable the reference-types proposal.
    #[serde(default = "defaults::reference_types")]
    pub reference_types: bool,

    /// Enable the bulk-memory proposal.
    #[serde(default = "defaults::bulk_memory")]
    pub bulk_memory: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pooling_allocator: defaults::pooling_allocator(),
            max_instances: defaults::max_instances(),
            instance_memory_mb: defaults::instance_memory_mb(),
            fuel_metering: defaults::fuel_metering(),
            max_fuel: defaults::max_fuel(),
            epoch_interruption: defaults::epoch_interruption(),
            reference_types: defaults::reference_types(),
            bulk_memory: defaults::bulk_memory(),
        }
    }
}

/// Default value functions for serde.
mod defaults {
    pub const fn pooling_allocator() -> bool {
        false
    }

    pub const fn max_instances() -> u32 {
        1000
    }

    pub const fn instance_memory_mb() -> u32 {
        64
    }

    pub const fn fuel_metering() -> bool {
        false
    }

    pub const fn max_fuel() -> u64 {
        10_000_000
    }

    pub const fn epoch_interruption() -> bool {
        false
    }

    pub const fn reference_types() -> bool {
        true
    }

    pub const fn bulk_memory() -> bool {
        true
    }
}
