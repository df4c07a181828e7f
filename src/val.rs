//! The `wasm_val_t` runtime value variant.
//!
//! A value is a kind tag over a payload union. The four numeric kinds carry
//! plain bits; the two reference kinds own a `wasm_ref_t`, so `copy` and
//! `delete` dispatch on the tag.

use std::ptr;

use crate::refs::{wasm_ref_copy, wasm_ref_delete, wasm_ref_t};
use crate::types::{WASM_ANYREF, WASM_FUNCREF, WASM_I32, wasm_valkind_t};

/// Payload of a [`wasm_val_t`]; which field is live is determined by the
/// value's kind tag.
#[repr(C)]
#[derive(Clone, Copy)]
pub union wasm_val_union_t {
    pub i32: i32,
    pub i64: i64,
    pub f32: f32,
    pub f64: f64,
    pub ref_: *mut wasm_ref_t,
}

/// A kind-tagged WebAssembly value.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct wasm_val_t {
    pub kind: wasm_valkind_t,
    pub of: wasm_val_union_t,
}

impl Default for wasm_val_t {
    fn default() -> wasm_val_t {
        wasm_val_t {
            kind: WASM_I32,
            of: wasm_val_union_t { i64: 0 },
        }
    }
}

/// Release the payload of a value in place.
///
/// Numeric payloads hold no resources and are zeroed; reference payloads
/// release their reference and are nulled, so deleting the same value again
/// is a no-op.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn wasm_val_delete(val: Option<&mut wasm_val_t>) {
    let Some(val) = val else { return };
    match val.kind {
        WASM_ANYREF | WASM_FUNCREF => {
            // SAFETY: for reference kinds the ref_ field is the live one.
            let r = unsafe { val.of.ref_ };
            if !r.is_null() {
                // SAFETY: a non-null reference payload is owned by the value.
                wasm_ref_delete(Some(unsafe { Box::from_raw(r) }));
            }
            val.of.ref_ = ptr::null_mut();
        }
        _ => {
            val.of = wasm_val_union_t { i64: 0 };
        }
    }
}

/// Copy a value, kind-dependently.
///
/// Reference kinds get an independently owned duplicate of the reference;
/// numeric kinds are copied as plain bits.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn wasm_val_copy(out: Option<&mut wasm_val_t>, val: Option<&wasm_val_t>) {
    let (Some(out), Some(val)) = (out, val) else {
        return;
    };
    out.kind = val.kind;
    match val.kind {
        WASM_ANYREF | WASM_FUNCREF => {
            // SAFETY: for reference kinds the ref_ field is the live one.
            let r = unsafe { val.of.ref_ };
            let dup = wasm_ref_copy(unsafe { r.as_ref() });
            out.of = wasm_val_union_t {
                ref_: dup.map_or(ptr::null_mut(), Box::into_raw),
            };
        }
        _ => out.of = val.of,
    }
}
