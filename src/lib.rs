//! Standard `wasm.h` C API for the embed-runtime WebAssembly engine.
//!
//! This crate exposes the engine through the ABI-stable C interface of the
//! WebAssembly C API: opaque handles with explicit `new`/`copy`/`delete`
//! lifecycles, `{size, data}` vectors for variable-length collections, and a
//! closed, tag-discriminated extern-type hierarchy.
//!
//! - Type descriptors: `wasm_valtype_t`, `wasm_functype_t`,
//!   `wasm_globaltype_t`, `wasm_tabletype_t`, `wasm_memorytype_t`,
//!   `wasm_externtype_t`
//! - Module boundary descriptors: `wasm_importtype_t`, `wasm_exporttype_t`
//! - Runtime values and references: `wasm_val_t`, `wasm_ref_t`
//! - Engine shells: `wasm_config_t`, `wasm_engine_t`, `wasm_store_t`
//!
//! # Ownership
//!
//! Every heap object has exactly one owner. Constructors return owned handles
//! (null on failure), `copy` produces an independently owned deep duplicate,
//! and `delete` releases the object and everything it owns. Parameters
//! documented as taken are moved into the callee; everything else is borrowed
//! for the duration of the call. Passing null to any operation is defined:
//! destructive operations become no-ops and queries return a documented
//! default.
//!
//! On the Rust side the protocol maps onto the type system: owned handles are
//! `Box`es, taken parameters are consumed by value or emptied in place, and
//! borrowed parameters are references. Numeric encodings of the kind
//! enumerations are part of the wire contract and must not be renumbered.
//!
//! # Thread safety
//!
//! No handle is internally synchronized. An engine or store used from more
//! than one thread must be serialized by the caller.

#![allow(unsafe_code)]
#![allow(non_camel_case_types)]
#![allow(clippy::missing_safety_doc)]

mod engine;
mod externtype;
mod import_export;
mod refs;
mod types;
mod val;
mod vec;

pub use crate::engine::*;
pub use crate::externtype::*;
pub use crate::import_export::*;
pub use crate::refs::*;
pub use crate::types::*;
pub use crate::val::*;
pub use crate::vec::*;
