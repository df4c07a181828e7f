//! Module-boundary descriptors: `wasm_importtype_t` and `wasm_exporttype_t`.
//!
//! Both aggregates take full ownership of their name buffer(s) and extern
//! type at construction and release everything, recursively, on delete.
//! Accessors hand out borrows of the held parts.

use std::mem;

use crate::externtype::wasm_externtype_t;
use crate::vec::wasm_name_t;

/// An import a module requires: module name, item name, and item shape.
#[derive(Clone)]
pub struct wasm_importtype_t {
    module: wasm_name_t,
    name: wasm_name_t,
    ty: Option<Box<wasm_externtype_t>>,
}

/// An export a module provides: item name and item shape.
#[derive(Clone)]
pub struct wasm_exporttype_t {
    name: wasm_name_t,
    ty: Option<Box<wasm_externtype_t>>,
}

// ---------------------------------------------------------------------------
// wasm_importtype_t
// ---------------------------------------------------------------------------

/// Build an import descriptor from taken name buffers and a taken type.
///
/// The caller's name vector values are left empty.
#[unsafe(no_mangle)]
pub extern "C" fn wasm_importtype_new(
    module: Option<&mut wasm_name_t>,
    name: Option<&mut wasm_name_t>,
    ty: Option<Box<wasm_externtype_t>>,
) -> Box<wasm_importtype_t> {
    Box::new(wasm_importtype_t {
        module: module.map(mem::take).unwrap_or_default(),
        name: name.map(mem::take).unwrap_or_default(),
        ty,
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_importtype_delete(_importtype: Option<Box<wasm_importtype_t>>) {}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_importtype_copy(
    importtype: Option<&wasm_importtype_t>,
) -> Option<Box<wasm_importtype_t>> {
    importtype.map(|it| Box::new(it.clone()))
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_importtype_module(
    importtype: Option<&wasm_importtype_t>,
) -> Option<&wasm_name_t> {
    importtype.map(|it| &it.module)
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_importtype_name(
    importtype: Option<&wasm_importtype_t>,
) -> Option<&wasm_name_t> {
    importtype.map(|it| &it.name)
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_importtype_type(
    importtype: Option<&wasm_importtype_t>,
) -> Option<&wasm_externtype_t> {
    importtype.and_then(|it| it.ty.as_deref())
}

// ---------------------------------------------------------------------------
// wasm_exporttype_t
// ---------------------------------------------------------------------------

/// Build an export descriptor from a taken name buffer and a taken type.
#[unsafe(no_mangle)]
pub extern "C" fn wasm_exporttype_new(
    name: Option<&mut wasm_name_t>,
    ty: Option<Box<wasm_externtype_t>>,
) -> Box<wasm_exporttype_t> {
    Box::new(wasm_exporttype_t {
        name: name.map(mem::take).unwrap_or_default(),
        ty,
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_exporttype_delete(_exporttype: Option<Box<wasm_exporttype_t>>) {}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_exporttype_copy(
    exporttype: Option<&wasm_exporttype_t>,
) -> Option<Box<wasm_exporttype_t>> {
    exporttype.map(|et| Box::new(et.clone()))
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_exporttype_name(
    exporttype: Option<&wasm_exporttype_t>,
) -> Option<&wasm_name_t> {
    exporttype.map(|et| &et.name)
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_exporttype_type(
    exporttype: Option<&wasm_exporttype_t>,
) -> Option<&wasm_externtype_t> {
    exporttype.and_then(|et| et.ty.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::externtype::{
        wasm_externtype_kind, wasm_globaltype_as_externtype_const, wasm_globaltype_new,
    };
    use crate::types::{WASM_CONST, WASM_EXTERN_GLOBAL, WASM_I32, wasm_valtype_new};
    use crate::vec::wasm_byte_vec_new;

    fn name(text: &str) -> wasm_name_t {
        let mut out = wasm_name_t::default();
        unsafe { wasm_byte_vec_new(Some(&mut out), text.len(), text.as_ptr()) };
        out
    }

    fn global_externtype() -> Box<wasm_externtype_t> {
        let gt = wasm_globaltype_new(Some(wasm_valtype_new(WASM_I32)), WASM_CONST).unwrap();
        let ext = wasm_globaltype_as_externtype_const(Some(&gt)).unwrap();
        Box::new(ext.clone())
    }

    #[test]
    fn importtype_reads_back_construction_values() {
        let mut module = name("module");
        let mut item = name("global1");
        let it = wasm_importtype_new(Some(&mut module), Some(&mut item), Some(global_externtype()));

        // Name buffers were taken; the caller's vectors are empty now.
        assert_eq!(module.size, 0);
        assert!(module.data.is_null());

        assert_eq!(wasm_importtype_module(Some(&it)).unwrap().as_slice(), b"module");
        assert_eq!(wasm_importtype_name(Some(&it)).unwrap().as_slice(), b"global1");
        assert_eq!(
            wasm_externtype_kind(wasm_importtype_type(Some(&it))),
            WASM_EXTERN_GLOBAL
        );
    }

    #[test]
    fn importtype_null_accessors() {
        assert!(wasm_importtype_module(None).is_none());
        assert!(wasm_importtype_name(None).is_none());
        assert!(wasm_importtype_type(None).is_none());
    }

    #[test]
    fn exporttype_copy_is_independent() {
        let mut item = name("answer");
        let et = wasm_exporttype_new(Some(&mut item), Some(global_externtype()));
        let dup = wasm_exporttype_copy(Some(&et)).unwrap();
        wasm_exporttype_delete(Some(et));

        assert_eq!(wasm_exporttype_name(Some(&dup)).unwrap().as_slice(), b"answer");
        assert_eq!(
            wasm_externtype_kind(wasm_exporttype_type(Some(&dup))),
            WASM_EXTERN_GLOBAL
        );
    }

    #[test]
    fn aggregates_tolerate_missing_parts() {
        let it = wasm_importtype_new(None, None, None);
        assert_eq!(wasm_importtype_module(Some(&it)).unwrap().size, 0);
        assert!(wasm_importtype_type(Some(&it)).is_none());
    }
}
