//! Engine internals for embed-runtime.
//!
//! This crate provides the components owned by the C API's engine and store
//! handles:
//! - [`Interpreter`]: configured Wasmtime engine, shared by everything built
//!   from the same engine handle
//! - [`Loader`]: module loading and compilation
//! - [`Validator`]: standalone module validation
//! - [`StoreManager`]: store-scoped state and the named-module registry
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                     Interpreter                         │
//! │  (One per engine handle; owns the Wasmtime engine)      │
//! └─────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │            Loader / Validator / StoreManager            │
//! │  (One of each per store handle, built from the engine)  │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Instantiation and execution of loaded modules belong to a higher layer;
//! nothing in this crate runs WebAssembly code.

pub mod engine;
pub mod loader;
pub mod store;
pub mod validator;

pub use engine::Interpreter;
pub use loader::{LoadedModule, Loader};
pub use store::{HostState, StoreManager};
pub use validator::Validator;
