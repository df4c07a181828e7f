//! Opaque references carrying embedder-attached data.
//!
//! A `wasm_ref_t` pairs a `host_info` pointer, whose lifetime the embedder
//! manages, with a finalizer callback describing how the embedder would
//! release that data. Two references are "the same" when both pointers are
//! equal; the identity of the `wasm_ref_t` objects themselves is irrelevant.

use std::ffi::c_void;
use std::ptr;

/// Release callback for embedder data attached to a reference.
pub type wasm_finalizer_t = unsafe extern "C" fn(data: *mut c_void);

/// Opaque reference handle.
#[derive(Clone)]
pub struct wasm_ref_t {
    host_info: *mut c_void,
    finalizer: Option<wasm_finalizer_t>,
}

impl wasm_ref_t {
    /// Create a reference wrapping embedder data.
    ///
    /// Runtime objects hand out references through this constructor; it is
    /// not itself part of the C symbol catalogue.
    pub fn new(host_info: *mut c_void, finalizer: Option<wasm_finalizer_t>) -> Box<wasm_ref_t> {
        Box::new(wasm_ref_t {
            host_info,
            finalizer,
        })
    }

    fn finalizer_addr(&self) -> Option<usize> {
        self.finalizer.map(|f| f as usize)
    }
}

/// Release a reference.
///
/// Only the reference object itself is released: the attached `host_info`
/// stays alive and the recorded finalizer is NOT invoked. The embedder
/// remains responsible for releasing its own data; the finalizer field is
/// informational. Pinned by `finalizer_is_not_invoked_on_delete`.
#[unsafe(no_mangle)]
pub extern "C" fn wasm_ref_delete(_r: Option<Box<wasm_ref_t>>) {}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_ref_copy(r: Option<&wasm_ref_t>) -> Option<Box<wasm_ref_t>> {
    r.map(|r| Box::new(r.clone()))
}

/// Whether two references designate the same host object.
///
/// True iff both `host_info` pointers and both finalizers are equal; false
/// whenever either argument is null.
#[unsafe(no_mangle)]
pub extern "C" fn wasm_ref_same(a: Option<&wasm_ref_t>, b: Option<&wasm_ref_t>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => {
            a.host_info == b.host_info && a.finalizer_addr() == b.finalizer_addr()
        }
        _ => false,
    }
}

/// Embedder data attached to the reference; null when `r` is null.
#[unsafe(no_mangle)]
pub extern "C" fn wasm_ref_get_host_info(r: Option<&wasm_ref_t>) -> *mut c_void {
    r.map_or(ptr::null_mut(), |r| r.host_info)
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_ref_set_host_info(r: Option<&mut wasm_ref_t>, info: *mut c_void) {
    if let Some(r) = r {
        r.host_info = info;
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_ref_set_host_info_with_finalizer(
    r: Option<&mut wasm_ref_t>,
    info: *mut c_void,
    finalizer: Option<wasm_finalizer_t>,
) {
    if let Some(r) = r {
        r.host_info = info;
        r.finalizer = finalizer;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static FINALIZED: AtomicUsize = AtomicUsize::new(0);

    unsafe extern "C" fn count_finalize(_data: *mut c_void) {
        FINALIZED.fetch_add(1, Ordering::SeqCst);
    }

    unsafe extern "C" fn other_finalize(_data: *mut c_void) {}

    #[test]
    fn same_is_identity_over_host_info_and_finalizer() {
        let mut data = 7i32;
        let info = std::ptr::from_mut::<i32>(&mut data).cast::<c_void>();

        // Two distinct reference objects over the same host object.
        let a = wasm_ref_t::new(info, Some(count_finalize));
        let b = wasm_ref_t::new(info, Some(count_finalize));
        assert!(wasm_ref_same(Some(&a), Some(&b)));

        // A different finalizer breaks the equivalence.
        let c = wasm_ref_t::new(info, Some(other_finalize));
        assert!(!wasm_ref_same(Some(&a), Some(&c)));

        // So does different host data.
        let d = wasm_ref_t::new(ptr::null_mut(), Some(count_finalize));
        assert!(!wasm_ref_same(Some(&a), Some(&d)));

        // Null compares unequal to everything.
        assert!(!wasm_ref_same(Some(&a), None));
        assert!(!wasm_ref_same(None, Some(&a)));
        assert!(!wasm_ref_same(None, None));
    }

    #[test]
    fn host_info_is_settable_after_construction() {
        let mut data = 1i32;
        let info = std::ptr::from_mut::<i32>(&mut data).cast::<c_void>();

        let mut r = wasm_ref_t::new(ptr::null_mut(), None);
        assert!(wasm_ref_get_host_info(Some(&r)).is_null());

        wasm_ref_set_host_info(Some(&mut r), info);
        assert_eq!(wasm_ref_get_host_info(Some(&r)), info);

        wasm_ref_set_host_info_with_finalizer(Some(&mut r), info, Some(count_finalize));
        let dup = wasm_ref_copy(Some(&r)).unwrap();
        assert!(wasm_ref_same(Some(&r), Some(&dup)));
    }

    #[test]
    fn null_host_info_queries_default() {
        assert!(wasm_ref_get_host_info(None).is_null());
        wasm_ref_set_host_info(None, ptr::null_mut());
        wasm_ref_delete(None);
    }

    #[test]
    fn finalizer_is_not_invoked_on_delete() {
        let mut data = 3i32;
        let info = std::ptr::from_mut::<i32>(&mut data).cast::<c_void>();

        let r = wasm_ref_t::new(info, Some(count_finalize));
        wasm_ref_delete(Some(r));

        // Releasing the reference must leave the host data untouched.
        assert_eq!(FINALIZED.load(Ordering::SeqCst), 0);
    }
}
