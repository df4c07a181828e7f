//! Common types, errors, and configuration for embed-runtime.
//!
//! This crate provides shared functionality used across the embed-runtime workspace:
//! - Error types using `thiserror` for type-safe error handling
//! - The engine configuration snapshot consumed at engine construction

pub mod config;
pub mod error;

pub use config::EngineConfig;
pub use error::RuntimeError;
