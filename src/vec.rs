//! The `wasm_*_vec_t` container family.
//!
//! Every vector is a `{size, data}` pair whose backing buffer is owned by the
//! vector value itself. Two families share one contract and differ only in
//! element ownership:
//!
//! - *scalar* vectors hold their elements inline (`byte`, `val`);
//! - *boxed* vectors own one heap allocation per element (every descriptor
//!   type).
//!
//! An empty vector always has `size == 0` and a null `data` pointer, no
//! matter how it became empty; a size-0 allocation request never produces a
//! non-null buffer. `delete` resets the vector to that empty state, so
//! deleting the same vector value twice is a no-op.

use std::mem;
use std::ptr;
use std::slice;

use crate::externtype::{
    wasm_externtype_t, wasm_functype_t, wasm_globaltype_t, wasm_memorytype_t, wasm_tabletype_t,
};
use crate::import_export::{wasm_exporttype_t, wasm_importtype_t};
use crate::types::wasm_valtype_t;
use crate::val::wasm_val_t;

pub type wasm_byte_t = u8;

/// Name buffers are plain byte vectors.
pub type wasm_name_t = wasm_byte_vec_t;

/// Struct definition and buffer plumbing shared by both vector families.
macro_rules! declare_vec_plumbing {
    ($name:ident, $elem:ty) => {
        #[repr(C)]
        pub struct $name {
            pub size: usize,
            pub data: *mut $elem,
        }

        impl $name {
            /// Hand the buffer to this vector.
            ///
            /// The destination fields are overwritten, not freed: per the C
            /// contract an output parameter is treated as uninitialized.
            pub(crate) fn set_buffer(&mut self, buffer: Vec<$elem>) {
                let mut buffer = buffer.into_boxed_slice();
                self.size = buffer.len();
                self.data = if buffer.is_empty() {
                    ptr::null_mut()
                } else {
                    let data = buffer.as_mut_ptr();
                    mem::forget(buffer);
                    data
                };
            }

            /// View the elements as a slice.
            pub fn as_slice(&self) -> &[$elem] {
                if self.data.is_null() {
                    &[]
                } else {
                    // SAFETY: a non-null data pointer always refers to a live
                    // buffer of exactly `size` elements.
                    unsafe {
                        slice::from_raw_parts(self.data, self.size)
                    }
                }
            }

            /// Take the buffer back out, leaving the vector empty.
            pub(crate) fn take(&mut self) -> Vec<$elem> {
                if self.data.is_null() {
                    self.size = 0;
                    return Vec::new();
                }
                // SAFETY: the buffer was produced by `set_buffer` from a boxed
                // slice, so length and capacity coincide.
                let vec = unsafe { Vec::from_raw_parts(self.data, self.size, self.size) };
                self.size = 0;
                self.data = ptr::null_mut();
                vec
            }
        }

        impl Default for $name {
            fn default() -> $name {
                $name {
                    size: 0,
                    data: ptr::null_mut(),
                }
            }
        }

        impl Clone for $name {
            fn clone(&self) -> $name {
                let mut out = $name::default();
                out.set_buffer(self.as_slice().to_vec());
                out
            }
        }

        impl Drop for $name {
            fn drop(&mut self) {
                drop(self.take());
            }
        }
    };
}

/// Lifecycle functions shared by both families; only `new` differs.
macro_rules! declare_vec_lifecycle {
    ($name:ident, $empty:ident, $uninit:ident, $copy:ident, $delete:ident) => {
        #[unsafe(no_mangle)]
        pub extern "C" fn $empty(out: Option<&mut $name>) {
            if let Some(out) = out {
                out.size = 0;
                out.data = ptr::null_mut();
            }
        }

        #[unsafe(no_mangle)]
        pub extern "C" fn $uninit(out: Option<&mut $name>, size: usize) {
            if let Some(out) = out {
                out.set_buffer(vec![Default::default(); size]);
            }
        }

        #[unsafe(no_mangle)]
        pub extern "C" fn $copy(out: Option<&mut $name>, src: Option<&$name>) {
            if let (Some(out), Some(src)) = (out, src) {
                out.set_buffer(src.as_slice().to_vec());
            }
        }

        #[unsafe(no_mangle)]
        pub extern "C" fn $delete(vec: Option<&mut $name>) {
            if let Some(vec) = vec {
                vec.take();
            }
        }
    };
}

/// A vector whose elements are inline values; `new` copies them flat.
macro_rules! declare_scalar_vecs {
    ($((
        name: $name:ident,
        ty: $elem:ty,
        empty: $empty:ident,
        uninit: $uninit:ident,
        new: $new:ident,
        copy: $copy:ident,
        delete: $delete:ident,
    ))*) => {$(
        declare_vec_plumbing!($name, $elem);
        declare_vec_lifecycle!($name, $empty, $uninit, $copy, $delete);

        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $new(out: Option<&mut $name>, size: usize, src: *const $elem) {
            let Some(out) = out else { return };
            let buffer = if size == 0 || src.is_null() {
                Vec::new()
            } else {
                // SAFETY: the caller supplies `size` readable elements.
                unsafe { slice::from_raw_parts(src, size) }.to_vec()
            };
            out.set_buffer(buffer);
        }
    )*};
}

/// A vector whose elements are independently owned sub-objects; `new` steals
/// each element pointer and leaves the caller's slots null.
macro_rules! declare_boxed_vecs {
    ($((
        name: $name:ident,
        ty: $elem:ty,
        empty: $empty:ident,
        uninit: $uninit:ident,
        new: $new:ident,
        copy: $copy:ident,
        delete: $delete:ident,
    ))*) => {$(
        declare_vec_plumbing!($name, Option<Box<$elem>>);
        declare_vec_lifecycle!($name, $empty, $uninit, $copy, $delete);

        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $new(
            out: Option<&mut $name>,
            size: usize,
            src: *mut Option<Box<$elem>>,
        ) {
            let Some(out) = out else { return };
            let buffer = if size == 0 || src.is_null() {
                Vec::new()
            } else {
                // SAFETY: the caller supplies `size` element slots; ownership
                // of each element moves into the vector and the source slots
                // are cleared.
                unsafe { slice::from_raw_parts_mut(src, size) }
                    .iter_mut()
                    .map(mem::take)
                    .collect()
            };
            out.set_buffer(buffer);
        }
    )*};
}

declare_scalar_vecs! {
    (
        name: wasm_byte_vec_t,
        ty: wasm_byte_t,
        empty: wasm_byte_vec_new_empty,
        uninit: wasm_byte_vec_new_uninitialized,
        new: wasm_byte_vec_new,
        copy: wasm_byte_vec_copy,
        delete: wasm_byte_vec_delete,
    )
    (
        name: wasm_val_vec_t,
        ty: wasm_val_t,
        empty: wasm_val_vec_new_empty,
        uninit: wasm_val_vec_new_uninitialized,
        new: wasm_val_vec_new,
        copy: wasm_val_vec_copy,
        delete: wasm_val_vec_delete,
    )
}

declare_boxed_vecs! {
    (
        name: wasm_valtype_vec_t,
        ty: wasm_valtype_t,
        empty: wasm_valtype_vec_new_empty,
        uninit: wasm_valtype_vec_new_uninitialized,
        new: wasm_valtype_vec_new,
        copy: wasm_valtype_vec_copy,
        delete: wasm_valtype_vec_delete,
    )
    (
        name: wasm_functype_vec_t,
        ty: wasm_functype_t,
        empty: wasm_functype_vec_new_empty,
        uninit: wasm_functype_vec_new_uninitialized,
        new: wasm_functype_vec_new,
        copy: wasm_functype_vec_copy,
        delete: wasm_functype_vec_delete,
    )
    (
        name: wasm_globaltype_vec_t,
        ty: wasm_globaltype_t,
        empty: wasm_globaltype_vec_new_empty,
        uninit: wasm_globaltype_vec_new_uninitialized,
        new: wasm_globaltype_vec_new,
        copy: wasm_globaltype_vec_copy,
        delete: wasm_globaltype_vec_delete,
    )
    (
        name: wasm_tabletype_vec_t,
        ty: wasm_tabletype_t,
        empty: wasm_tabletype_vec_new_empty,
        uninit: wasm_tabletype_vec_new_uninitialized,
        new: wasm_tabletype_vec_new,
        copy: wasm_tabletype_vec_copy,
        delete: wasm_tabletype_vec_delete,
    )
    (
        name: wasm_memorytype_vec_t,
        ty: wasm_memorytype_t,
        empty: wasm_memorytype_vec_new_empty,
        uninit: wasm_memorytype_vec_new_uninitialized,
        new: wasm_memorytype_vec_new,
        copy: wasm_memorytype_vec_copy,
        delete: wasm_memorytype_vec_delete,
    )
    (
        name: wasm_externtype_vec_t,
        ty: wasm_externtype_t,
        empty: wasm_externtype_vec_new_empty,
        uninit: wasm_externtype_vec_new_uninitialized,
        new: wasm_externtype_vec_new,
        copy: wasm_externtype_vec_copy,
        delete: wasm_externtype_vec_delete,
    )
    (
        name: wasm_importtype_vec_t,
        ty: wasm_importtype_t,
        empty: wasm_importtype_vec_new_empty,
        uninit: wasm_importtype_vec_new_uninitialized,
        new: wasm_importtype_vec_new,
        copy: wasm_importtype_vec_copy,
        delete: wasm_importtype_vec_delete,
    )
    (
        name: wasm_exporttype_vec_t,
        ty: wasm_exporttype_t,
        empty: wasm_exporttype_vec_new_empty,
        uninit: wasm_exporttype_vec_new_uninitialized,
        new: wasm_exporttype_vec_new,
        copy: wasm_exporttype_vec_copy,
        delete: wasm_exporttype_vec_delete,
    )
}
